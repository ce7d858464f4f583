use super::repository;
use chrono::NaiveDate;
use contracts::domain::a003_time_record::TimeRecord;
use uuid::Uuid;

// Записи времени рождаются в импорте (u902), ручного создания через API нет

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<TimeRecord>> {
    repository::get_by_id(id).await
}

pub async fn list_by_mandate(mandate_ref: &str) -> anyhow::Result<Vec<TimeRecord>> {
    repository::list_by_mandate(mandate_ref).await
}

pub async fn list_by_mandate_and_range(
    mandate_ref: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> anyhow::Result<Vec<TimeRecord>> {
    repository::list_by_mandate_and_range(mandate_ref, start, end).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}
