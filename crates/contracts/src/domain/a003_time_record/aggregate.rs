use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRecordId(pub Uuid);

impl TimeRecordId {
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

impl AggregateId for TimeRecordId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(TimeRecordId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Запись отработанного времени: один сотрудник, одна дата, одно заведение
///
/// Натуральный ключ (employee_ref, work_date, mandate_ref) — не более одной
/// записи на ключ; повторный импорт того же ключа обновляет запись на месте
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeRecord {
    #[serde(flatten)]
    pub base: BaseAggregate<TimeRecordId>,

    #[serde(rename = "employeeRef")]
    pub employee_ref: String,

    #[serde(rename = "mandateRef")]
    pub mandate_ref: String,

    #[serde(rename = "workDate")]
    pub work_date: NaiveDate,

    /// Время прихода в формате HH:MM (если источник его дал)
    #[serde(rename = "clockIn")]
    pub clock_in: Option<String>,

    /// Время ухода в формате HH:MM
    #[serde(rename = "clockOut")]
    pub clock_out: Option<String>,

    #[serde(rename = "breakMinutes", default)]
    pub break_minutes: i32,

    #[serde(rename = "workedHours")]
    pub worked_hours: f64,

    #[serde(rename = "isOvertime", default)]
    pub is_overtime: bool,

    /// Ставка, действовавшая на момент импорта
    #[serde(rename = "hourlyRateUsed")]
    pub hourly_rate_used: Option<f64>,

    // Происхождение записи
    #[serde(rename = "importSource", default)]
    pub import_source: String,

    #[serde(rename = "importBatchRef")]
    pub import_batch_ref: Option<String>,
}

impl TimeRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        employee_ref: String,
        mandate_ref: String,
        work_date: NaiveDate,
        clock_in: Option<String>,
        clock_out: Option<String>,
        break_minutes: i32,
        worked_hours: f64,
        hourly_rate_used: Option<f64>,
        import_source: String,
        import_batch_ref: Option<String>,
    ) -> Self {
        let description = format!("{} / {}", work_date, worked_hours);
        let base = BaseAggregate::new(TimeRecordId::new_v4(), code, description);

        Self {
            base,
            employee_ref,
            mandate_ref,
            work_date,
            clock_in,
            clock_out,
            break_minutes,
            worked_hours,
            is_overtime: false,
            hourly_rate_used,
            import_source,
            import_batch_ref,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.employee_ref.trim().is_empty() {
            return Err("Запись времени должна ссылаться на сотрудника".into());
        }
        if self.mandate_ref.trim().is_empty() {
            return Err("Запись времени должна ссылаться на заведение".into());
        }
        if self.worked_hours < 0.0 {
            return Err("Отработанные часы не могут быть отрицательными".into());
        }
        if self.break_minutes < 0 {
            return Err("Перерыв не может быть отрицательным".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for TimeRecord {
    type Id = TimeRecordId;

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
        "a003"
    }

    fn collection_name() -> &'static str {
        "time_record"
    }

    fn element_name() -> &'static str {
        "Запись времени"
    }

    fn list_name() -> &'static str {
        "Записи времени"
    }
}
