use serde::{Deserialize, Serialize};

/// Итог подтвержденного месячного импорта
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmedImportResponse {
    /// ID созданной/обновленной ручной записи зарплаты
    #[serde(rename = "manualEntryId")]
    pub manual_entry_id: String,

    /// ID записи истории импорта
    #[serde(rename = "importId")]
    pub import_id: String,

    /// true — запись создана, false — обновлена по натуральному ключу
    pub created: bool,

    #[serde(rename = "employeeCount")]
    pub employee_count: i32,

    #[serde(rename = "totalHours")]
    pub total_hours: f64,

    #[serde(rename = "totalGross")]
    pub total_gross: f64,

    #[serde(rename = "socialCharges")]
    pub social_charges: f64,

    #[serde(rename = "totalCost")]
    pub total_cost: f64,
}
