use serde::{Deserialize, Serialize};

/// Строка списка сотрудников, проверенного человеком
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewedEmployeeRow {
    /// Подтвержденный оператором сотрудник (если выбран)
    #[serde(rename = "matchedEmployeeId")]
    pub matched_employee_id: Option<String>,

    #[serde(rename = "externalId")]
    pub external_id: Option<String>,

    #[serde(rename = "firstName", default)]
    pub first_name: String,

    #[serde(rename = "lastName", default)]
    pub last_name: String,

    pub hours: f64,

    /// Ставка; None — ставка по умолчанию заведения
    pub rate: Option<f64>,
}

/// Запрос подтвержденного месячного импорта
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmedImportRequest {
    #[serde(rename = "mandateId")]
    pub mandate_id: String,

    /// Период в формате YYYY-MM
    pub period: String,

    #[serde(rename = "fileName", default)]
    pub file_name: String,

    pub employees: Vec<ReviewedEmployeeRow>,

    /// Переопределение ставки социальных отчислений на этот импорт
    #[serde(rename = "socialChargeRate")]
    pub social_charge_rate: Option<f64>,
}
