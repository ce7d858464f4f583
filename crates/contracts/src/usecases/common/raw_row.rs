use serde::{Deserialize, Serialize};

/// Нормализованная строка импорта учета времени
///
/// Парсинг файла (XLSX/CSV, подбор колонок по псевдонимам заголовков) живет
/// во внешнем нормализаторе; ядро получает уже именованные поля. Все поля
/// опциональны — пропуски ловит построчная валидация, а не десериализация
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTimeRow {
    /// Табельный номер во внешней системе
    #[serde(rename = "externalId")]
    pub external_id: Option<String>,

    #[serde(rename = "firstName")]
    pub first_name: Option<String>,

    #[serde(rename = "lastName")]
    pub last_name: Option<String>,

    /// Дата в формате YYYY-MM-DD
    pub date: Option<String>,

    #[serde(rename = "clockIn")]
    pub clock_in: Option<String>,

    #[serde(rename = "clockOut")]
    pub clock_out: Option<String>,

    #[serde(rename = "breakMinutes")]
    pub break_minutes: Option<i32>,

    #[serde(rename = "workedHours")]
    pub worked_hours: Option<f64>,

    /// Ставка из файла, если источник ее дает
    #[serde(rename = "hourlyRate")]
    pub hourly_rate: Option<f64>,
}
