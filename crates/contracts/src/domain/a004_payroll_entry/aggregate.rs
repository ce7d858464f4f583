use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::PeriodType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// ID Type
// ============================================================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayrollEntryId(pub Uuid);

impl PayrollEntryId {
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

impl AggregateId for PayrollEntryId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(PayrollEntryId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

// ============================================================================
// Aggregate Root
// ============================================================================

/// Рассчитанная зарплата сотрудника за один период
///
/// Натуральный ключ (employee_ref, mandate_ref, period_start, period_type) —
/// ровно одна запись на ключ. Заблокированная запись пересчитывается только
/// по явному флагу recalculate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollEntry {
    #[serde(flatten)]
    pub base: BaseAggregate<PayrollEntryId>,

    #[serde(rename = "employeeRef")]
    pub employee_ref: String,

    #[serde(rename = "mandateRef")]
    pub mandate_ref: String,

    #[serde(rename = "periodStart")]
    pub period_start: NaiveDate,

    #[serde(rename = "periodEnd")]
    pub period_end: NaiveDate,

    #[serde(rename = "periodType")]
    pub period_type: PeriodType,

    #[serde(rename = "regularHours")]
    pub regular_hours: f64,

    #[serde(rename = "overtimeHours")]
    pub overtime_hours: f64,

    #[serde(rename = "totalHours")]
    pub total_hours: f64,

    #[serde(rename = "hourlyRate")]
    pub hourly_rate: f64,

    #[serde(rename = "baseSalary")]
    pub base_salary: f64,

    #[serde(rename = "overtimePay")]
    pub overtime_pay: f64,

    #[serde(rename = "totalGross")]
    pub total_gross: f64,

    #[serde(rename = "socialCharges")]
    pub social_charges: f64,

    #[serde(rename = "totalCost")]
    pub total_cost: f64,

    /// Рекомендательная блокировка: заблокированная запись не пересчитывается
    /// без явного флага recalculate
    #[serde(rename = "isLocked", default)]
    pub is_locked: bool,
}

impl PayrollEntry {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        employee_ref: String,
        mandate_ref: String,
        period_start: NaiveDate,
        period_end: NaiveDate,
        period_type: PeriodType,
        regular_hours: f64,
        overtime_hours: f64,
        hourly_rate: f64,
        base_salary: f64,
        overtime_pay: f64,
        social_charges: f64,
    ) -> Self {
        let description = format!("{} {} — {}", period_type.code(), period_start, period_end);
        let base = BaseAggregate::new(PayrollEntryId::new_v4(), code, description);
        let total_gross = base_salary + overtime_pay;

        Self {
            base,
            employee_ref,
            mandate_ref,
            period_start,
            period_end,
            period_type,
            regular_hours,
            overtime_hours,
            total_hours: regular_hours + overtime_hours,
            hourly_rate,
            base_salary,
            overtime_pay,
            total_gross,
            social_charges,
            total_cost: total_gross + social_charges,
            is_locked: false,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.period_start > self.period_end {
            return Err("Начало периода позже его конца".into());
        }
        if self.regular_hours < 0.0 || self.overtime_hours < 0.0 {
            return Err("Часы не могут быть отрицательными".into());
        }
        // Денежные инварианты записи
        if (self.total_gross - (self.base_salary + self.overtime_pay)).abs() > 1e-9 {
            return Err("totalGross должен равняться baseSalary + overtimePay".into());
        }
        if (self.total_cost - (self.total_gross + self.social_charges)).abs() > 1e-9 {
            return Err("totalCost должен равняться totalGross + socialCharges".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.base.touch();
    }
}

impl AggregateRoot for PayrollEntry {
    type Id = PayrollEntryId;

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
        "a004"
    }

    fn collection_name() -> &'static str {
        "payroll_entry"
    }

    fn element_name() -> &'static str {
        "Запись зарплаты"
    }

    fn list_name() -> &'static str {
        "Записи зарплаты"
    }
}
