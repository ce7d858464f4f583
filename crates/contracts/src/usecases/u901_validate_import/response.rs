use crate::enums::MatchType;
use serde::{Deserialize, Serialize};

/// Предпросмотр одного сотрудника из файла импорта
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeePreview {
    #[serde(rename = "rawExternalId")]
    pub raw_external_id: Option<String>,

    #[serde(rename = "rawFirstName")]
    pub raw_first_name: String,

    #[serde(rename = "rawLastName")]
    pub raw_last_name: String,

    #[serde(rename = "matchedEmployeeRef")]
    pub matched_employee_ref: Option<String>,

    #[serde(rename = "matchedEmployeeName")]
    pub matched_employee_name: Option<String>,

    #[serde(rename = "matchType")]
    pub match_type: MatchType,

    /// Уверенность сопоставления 0..100
    pub confidence: i32,

    #[serde(rename = "needsReview")]
    pub needs_review: bool,

    /// Почему поднят флаг проверки (пусто, если needs_review = false)
    #[serde(rename = "reviewReasons", default)]
    pub review_reasons: Vec<String>,

    #[serde(rename = "totalHours")]
    pub total_hours: f64,

    /// Ставка, которая будет применена при подтверждении
    #[serde(rename = "proposedRate")]
    pub proposed_rate: f64,
}

/// Сводная статистика проверки файла
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportStatistics {
    #[serde(rename = "totalEmployees")]
    pub total_employees: i32,

    #[serde(rename = "exactMatches")]
    pub exact_matches: i32,

    #[serde(rename = "partialMatches")]
    pub partial_matches: i32,

    #[serde(rename = "noMatches")]
    pub no_matches: i32,

    #[serde(rename = "needsReview")]
    pub needs_review: i32,

    #[serde(rename = "totalHours")]
    pub total_hours: f64,

    #[serde(rename = "estimatedTotalCost")]
    pub estimated_total_cost: f64,
}

/// Ответ проверки файла импорта
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateImportResponse {
    pub employees: Vec<EmployeePreview>,

    pub statistics: ImportStatistics,

    /// Ошибки построчной валидации (не блокируют импорт)
    #[serde(default)]
    pub errors: Vec<String>,

    /// true, когда ни одна строка не требует ручной проверки
    #[serde(rename = "canProceed")]
    pub can_proceed: bool,
}
