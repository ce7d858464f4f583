use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MandateId(pub Uuid);

impl MandateId {
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

impl AggregateId for MandateId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(MandateId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Мандат — заведение/центр затрат (отель, ресторан), владеющий сотрудниками
/// и финансовыми записями
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Mandate {
    #[serde(flatten)]
    pub base: BaseAggregate<MandateId>,

    #[serde(rename = "address", default)]
    pub address: String,

    /// Ставка по умолчанию для сотрудников без персональной ставки
    #[serde(rename = "defaultHourlyRate")]
    pub default_hourly_rate: Option<f64>,

    // Кэшированные агрегаты (обновляются только расчетом/импортом)
    #[serde(rename = "totalRevenue", default)]
    pub total_revenue: f64,

    #[serde(rename = "lastEntryDate")]
    pub last_entry_date: Option<NaiveDate>,

    #[serde(rename = "totalPayrollCost", default)]
    pub total_payroll_cost: f64,

    #[serde(rename = "lastPayrollCalculation")]
    pub last_payroll_calculation: Option<DateTime<Utc>>,
}

impl Mandate {
    pub fn new_for_insert(
        code: String,
        description: String,
        address: String,
        default_hourly_rate: Option<f64>,
        comment: Option<String>,
    ) -> Self {
        let mut base = BaseAggregate::new(MandateId::new_v4(), code, description);
        base.comment = comment;

        Self {
            base,
            address,
            default_hourly_rate,
            total_revenue: 0.0,
            last_entry_date: None,
            total_payroll_cost: 0.0,
            last_payroll_calculation: None,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn update(&mut self, dto: &MandateDto) {
        self.base.code = dto.code.clone().unwrap_or_default();
        self.base.description = dto.description.clone();
        self.base.comment = dto.comment.clone();
        self.address = dto.address.clone().unwrap_or_default();
        self.default_hourly_rate = dto.default_hourly_rate;
        // Кэшированные totals обновляются только из расчета зарплаты/импорта
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.description.trim().is_empty() {
            return Err("Название заведения не может быть пустым".into());
        }
        if let Some(rate) = self.default_hourly_rate {
            if rate < 0.0 {
                return Err("Ставка по умолчанию не может быть отрицательной".into());
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for Mandate {
    type Id = MandateId;

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
        "a001"
    }

    fn collection_name() -> &'static str {
        "mandate"
    }

    fn element_name() -> &'static str {
        "Заведение"
    }

    fn list_name() -> &'static str {
        "Заведения"
    }
}

// ============================================================================
// DTO
// ============================================================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MandateDto {
    pub id: Option<String>,
    pub code: Option<String>,
    pub description: String,
    pub comment: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "defaultHourlyRate")]
    pub default_hourly_rate: Option<f64>,
}
