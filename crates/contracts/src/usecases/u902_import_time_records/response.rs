use crate::enums::ImportStatus;
use serde::{Deserialize, Serialize};

/// Итог пакетного импорта записей времени
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportTimeRecordsResponse {
    /// ID записи истории импорта
    #[serde(rename = "importId")]
    pub import_id: String,

    pub created: i32,
    pub updated: i32,
    pub skipped: i32,

    /// Человекочитаемые ошибки строк и чанков; импорт при них не прерывается
    pub errors: Vec<String>,

    pub status: ImportStatus,
}
