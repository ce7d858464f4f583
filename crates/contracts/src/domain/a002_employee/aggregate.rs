use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmployeeId(pub Uuid);

impl EmployeeId {
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

impl AggregateId for EmployeeId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(EmployeeId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Сотрудник заведения
///
/// Создается при регистрации или автоматически при импорте, когда
/// сопоставление не нашло кандидата
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(flatten)]
    pub base: BaseAggregate<EmployeeId>,

    /// Табельный номер из внешней системы учета времени
    #[serde(rename = "externalId")]
    pub external_id: Option<String>,

    #[serde(rename = "firstName")]
    pub first_name: String,

    #[serde(rename = "lastName")]
    pub last_name: String,

    /// Персональная часовая ставка; None — берется ставка по умолчанию
    #[serde(rename = "hourlyRate")]
    pub hourly_rate: Option<f64>,

    #[serde(rename = "position", default)]
    pub position: String,

    #[serde(rename = "isActive", default)]
    pub is_active: bool,

    #[serde(rename = "mandateRef")]
    pub mandate_ref: String,
}

impl Employee {
    pub fn new_for_insert(
        code: String,
        external_id: Option<String>,
        first_name: String,
        last_name: String,
        hourly_rate: Option<f64>,
        position: String,
        mandate_ref: String,
        comment: Option<String>,
    ) -> Self {
        let description = format!("{} {}", first_name, last_name);
        let mut base = BaseAggregate::new(EmployeeId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            external_id,
            first_name,
            last_name,
            hourly_rate,
            position,
            is_active: true,
            mandate_ref,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// Полное имя для отображения и аудита сопоставления
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn update(&mut self, dto: &EmployeeDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.comment = dto.comment.clone();
        self.external_id = dto.external_id.clone();
        self.first_name = dto.first_name.clone();
        self.last_name = dto.last_name.clone();
        self.hourly_rate = dto.hourly_rate;
        self.position = dto.position.clone().unwrap_or_default();
        if let Some(is_active) = dto.is_active {
            self.is_active = is_active;
        }
        if let Some(mandate_ref) = &dto.mandate_ref {
            self.mandate_ref = mandate_ref.clone();
        }
        self.base.description = self.full_name();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.first_name.trim().is_empty() && self.last_name.trim().is_empty() {
            return Err("Имя и фамилия не могут быть пустыми одновременно".into());
        }
        if self.mandate_ref.trim().is_empty() {
            return Err("Сотрудник должен принадлежать заведению".into());
        }
        if let Some(rate) = self.hourly_rate {
            if rate < 0.0 {
                return Err("Часовая ставка не может быть отрицательной".into());
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Employee {
    type Id = EmployeeId;

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
        "a002"
    }

    fn collection_name() -> &'static str {
        "employee"
    }

    fn element_name() -> &'static str {
        "Сотрудник"
    }

    fn list_name() -> &'static str {
        "Сотрудники"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub comment: Option<String>,
    #[serde(rename = "externalId")]
    pub external_id: Option<String>,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(rename = "hourlyRate")]
    pub hourly_rate: Option<f64>,
    pub position: Option<String>,
    #[serde(rename = "isActive")]
    pub is_active: Option<bool>,
    #[serde(rename = "mandateRef")]
    pub mandate_ref: Option<String>,
}
