use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::ImportStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImportHistoryId(pub Uuid);

impl ImportHistoryId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }

    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for ImportHistoryId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ImportHistoryId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Аудиторская запись одного запуска импорта
///
/// Append-only: после создания меняется только статус
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportHistory {
    #[serde(flatten)]
    pub base: BaseAggregate<ImportHistoryId>,

    #[serde(rename = "mandateRef")]
    pub mandate_ref: String,

    #[serde(rename = "fileName", default)]
    pub file_name: String,

    /// Вид импорта: "time_records" или "manual_payroll"
    #[serde(rename = "importKind")]
    pub import_kind: String,

    /// Метка периода в исходном файле (например, "2025-06")
    #[serde(rename = "periodLabel", default)]
    pub period_label: String,

    #[serde(rename = "periodStart")]
    pub period_start: Option<NaiveDate>,

    #[serde(rename = "periodEnd")]
    pub period_end: Option<NaiveDate>,

    #[serde(rename = "totalRows")]
    pub total_rows: i32,

    #[serde(rename = "createdCount")]
    pub created_count: i32,

    #[serde(rename = "updatedCount")]
    pub updated_count: i32,

    #[serde(rename = "skippedCount")]
    pub skipped_count: i32,

    #[serde(rename = "errorCount")]
    pub error_count: i32,

    pub status: ImportStatus,
}

impl ImportHistory {
    pub fn new_for_insert(
        code: String,
        mandate_ref: String,
        file_name: String,
        import_kind: String,
        period_label: String,
        period_start: Option<NaiveDate>,
        period_end: Option<NaiveDate>,
    ) -> Self {
        let description = format!("{} {}", import_kind, period_label);
        let base = BaseAggregate::new(ImportHistoryId::new_v4(), code, description);

        Self {
            base,
            mandate_ref,
            file_name,
            import_kind,
            period_label,
            period_start,
            period_end,
            total_rows: 0,
            created_count: 0,
            updated_count: 0,
            skipped_count: 0,
            error_count: 0,
            status: ImportStatus::Pending,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.mandate_ref.trim().is_empty() {
            return Err("История импорта должна ссылаться на заведение".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for ImportHistory {
    type Id = ImportHistoryId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "import_history"
    }

    fn element_name() -> &'static str {
        "История импорта"
    }

    fn list_name() -> &'static str {
        "История импортов"
    }
}
