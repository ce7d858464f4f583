use crate::usecases::common::RawTimeRow;
use serde::{Deserialize, Serialize};

/// Запрос на подтвержденный импорт записей времени (всегда пишет)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportTimeRecordsRequest {
    #[serde(rename = "mandateId")]
    pub mandate_id: String,

    #[serde(rename = "fileName", default)]
    pub file_name: String,

    /// Метка источника для провенанса записей (например, "timesheet_xlsx")
    #[serde(rename = "importSource", default)]
    pub import_source: String,

    /// Ставка для сотрудников без персональной ставки
    #[serde(rename = "defaultHourlyRate")]
    pub default_hourly_rate: Option<f64>,

    /// Создавать ли сотрудника, когда сопоставление ничего не нашло
    #[serde(rename = "createMissingEmployees", default = "default_true")]
    pub create_missing_employees: bool,

    pub rows: Vec<RawTimeRow>,
}

fn default_true() -> bool {
    true
}
