use serde::{Deserialize, Serialize};

/// Статус запуска импорта (единственная мутация записи истории)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportStatus {
    /// Импорт создан, записи еще пишутся
    Pending,
    /// Все строки обработаны без ошибок
    Completed,
    /// Импорт прошел, но часть строк отклонена
    Partial,
    /// Ни один чанк не записан
    Failed,
}

impl ImportStatus {
    /// Получить код для хранения в БД
    pub fn code(&self) -> &'static str {
        match self {
            ImportStatus::Pending => "PENDING",
            ImportStatus::Completed => "COMPLETED",
            ImportStatus::Partial => "PARTIAL",
            ImportStatus::Failed => "FAILED",
        }
    }

    /// Парсинг из строки
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PENDING" => Some(ImportStatus::Pending),
            "COMPLETED" => Some(ImportStatus::Completed),
            "PARTIAL" => Some(ImportStatus::Partial),
            "FAILED" => Some(ImportStatus::Failed),
            _ => None,
        }
    }
}
