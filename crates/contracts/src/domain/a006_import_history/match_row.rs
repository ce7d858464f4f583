use crate::enums::MatchType;
use serde::{Deserialize, Serialize};

/// Строка аудита сопоставления: один обработанный сотрудник одного импорта
///
/// Фиксирует путь сопоставления и флаг ручной проверки; после записи не меняется
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRow {
    pub id: String,

    #[serde(rename = "importRef")]
    pub import_ref: String,

    // Сырые данные строки источника
    #[serde(rename = "rawExternalId")]
    pub raw_external_id: Option<String>,

    #[serde(rename = "rawFirstName")]
    pub raw_first_name: String,

    #[serde(rename = "rawLastName")]
    pub raw_last_name: String,

    // Результат сопоставления
    #[serde(rename = "matchedEmployeeRef")]
    pub matched_employee_ref: Option<String>,

    #[serde(rename = "matchType")]
    pub match_type: MatchType,

    /// Уверенность 0..100
    pub confidence: i32,

    #[serde(rename = "needsReview")]
    pub needs_review: bool,

    #[serde(rename = "totalHours")]
    pub total_hours: f64,
}
