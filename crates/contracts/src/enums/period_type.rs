use serde::{Deserialize, Serialize};

/// Тип расчетного периода
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PeriodType {
    Weekly,
    Monthly,
}

impl PeriodType {
    /// Получить код для хранения в БД
    pub fn code(&self) -> &'static str {
        match self {
            PeriodType::Weekly => "WEEKLY",
            PeriodType::Monthly => "MONTHLY",
        }
    }

    /// Получить человекочитаемое название
    pub fn display_name(&self) -> &'static str {
        match self {
            PeriodType::Weekly => "Неделя",
            PeriodType::Monthly => "Месяц",
        }
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "WEEKLY" => Some(PeriodType::Weekly),
            "MONTHLY" => Some(PeriodType::Monthly),
            _ => None,
        }
    }
}
