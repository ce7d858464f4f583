/// Трейт для идентификаторов агрегатов
///
/// Все ID агрегатов — newtype над Uuid с единым строковым представлением
pub trait AggregateId: Sized {
    /// Получить строковое представление ID
    fn as_string(&self) -> String;

    /// Восстановить ID из строки
    fn from_string(s: &str) -> Result<Self, String>;
}
