use serde::{Deserialize, Serialize};

/// Результат классификации сопоставления сотрудника
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Точное совпадение (по внешнему ID или полному имени)
    Exact,
    /// Частичное совпадение, требует подтверждения
    Partial,
    /// Совпадение не найдено
    None,
}

impl MatchType {
    /// Получить код для хранения в БД
    pub fn code(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::Partial => "partial",
            MatchType::None => "none",
        }
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "exact" => Some(MatchType::Exact),
            "partial" => Some(MatchType::Partial),
            "none" => Some(MatchType::None),
            _ => None,
        }
    }
}
