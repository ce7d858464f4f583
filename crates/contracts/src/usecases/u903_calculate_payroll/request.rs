use crate::enums::PeriodType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Запрос на расчет зарплаты
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatePayrollRequest {
    /// Конкретное заведение; None — все заведения
    #[serde(rename = "mandateId")]
    pub mandate_id: Option<String>,

    #[serde(rename = "periodStart")]
    pub period_start: NaiveDate,

    #[serde(rename = "periodEnd")]
    pub period_end: NaiveDate,

    #[serde(rename = "periodType")]
    pub period_type: PeriodType,

    /// Пересчитывать ли заблокированные записи
    #[serde(default)]
    pub recalculate: bool,
}
