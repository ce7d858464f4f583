use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManualPayrollEntryId(pub Uuid);

impl ManualPayrollEntryId {
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

impl AggregateId for ManualPayrollEntryId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ManualPayrollEntryId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Укрупненная зарплата за месяц, введенная вручную
///
/// Альтернатива расчетным записям, когда детальных данных времени нет.
/// Натуральный ключ (mandate_ref, year, month)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualPayrollEntry {
    #[serde(flatten)]
    pub base: BaseAggregate<ManualPayrollEntryId>,

    #[serde(rename = "mandateRef")]
    pub mandate_ref: String,

    pub year: i32,

    /// Месяц 1..=12
    pub month: u32,

    #[serde(rename = "totalHours")]
    pub total_hours: f64,

    #[serde(rename = "totalGross")]
    pub total_gross: f64,

    #[serde(rename = "socialCharges")]
    pub social_charges: f64,

    #[serde(rename = "totalCost")]
    pub total_cost: f64,

    #[serde(rename = "employeeCount")]
    pub employee_count: i32,

    /// Откуда пришли цифры (например, имя файла импорта)
    #[serde(rename = "source", default)]
    pub source: String,
}

impl ManualPayrollEntry {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        mandate_ref: String,
        year: i32,
        month: u32,
        total_hours: f64,
        total_gross: f64,
        social_charges: f64,
        employee_count: i32,
        source: String,
    ) -> Self {
        let description = format!("{:04}-{:02}", year, month);
        let base = BaseAggregate::new(ManualPayrollEntryId::new_v4(), code, description);

        Self {
            base,
            mandate_ref,
            year,
            month,
            total_hours,
            total_gross,
            social_charges,
            total_cost: total_gross + social_charges,
            employee_count,
            source,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.mandate_ref.trim().is_empty() {
            return Err("Запись должна ссылаться на заведение".into());
        }
        if !(1..=12).contains(&self.month) {
            return Err("Месяц должен быть в диапазоне 1..12".into());
        }
        if self.total_hours < 0.0 || self.total_gross < 0.0 {
            return Err("Итоги не могут быть отрицательными".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for ManualPayrollEntry {
    type Id = ManualPayrollEntryId;

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
        "a005"
    }

    fn collection_name() -> &'static str {
        "manual_payroll_entry"
    }

    fn element_name() -> &'static str {
        "Ручная запись зарплаты"
    }

    fn list_name() -> &'static str {
        "Ручные записи зарплаты"
    }
}
