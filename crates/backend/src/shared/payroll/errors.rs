use thiserror::Error;

/// Фатальные ошибки предусловий импорта/расчета
///
/// Отклоняют запрос целиком до первой записи в базу. Ошибки отдельных строк
/// в эту иерархию не входят: они собираются в список и не прерывают импорт
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Заведение {0} не найдено")]
    MandateNotFound(String),

    #[error(
        "Файл содержит {rows} строк при лимите {max}. Разделите файл на несколько и загрузите по частям"
    )]
    TooManyRows { rows: usize, max: usize },

    #[error("{0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ImportError {
    /// Ошибка пользователя (4xx), а не хранилища
    pub fn is_precondition(&self) -> bool {
        !matches!(self, ImportError::Storage(_))
    }
}
