/// Итог upsert по натуральному ключу
///
/// Явный результат вместо управления потоком через исключения: реконсилятор
/// ветвится по исходу, не разбирая текст ошибок БД
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// Записи с таким ключом не было, создана новая
    Created,
    /// Запись с таким ключом обновлена на месте
    Updated,
    /// Ключ уже занят, запись не тронута (benign skip)
    Conflict,
}
