use crate::usecases::common::RawTimeRow;
use serde::{Deserialize, Serialize};

/// Запрос на проверку файла импорта (ничего не пишет)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateImportRequest {
    #[serde(rename = "mandateId")]
    pub mandate_id: String,

    #[serde(rename = "fileName", default)]
    pub file_name: String,

    /// Ставка для сотрудников без персональной ставки
    #[serde(rename = "defaultHourlyRate")]
    pub default_hourly_rate: Option<f64>,

    pub rows: Vec<RawTimeRow>,
}
