use super::repository;
use chrono::NaiveDate;
use contracts::domain::a004_payroll_entry::PayrollEntry;
use uuid::Uuid;

// Записи зарплаты создаёт расчёт (u903), ручного создания через API нет

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<PayrollEntry>> {
    repository::get_by_id(id).await
}

pub async fn list_by_mandate(mandate_ref: &str) -> anyhow::Result<Vec<PayrollEntry>> {
    repository::list_by_mandate(mandate_ref).await
}

pub async fn list_by_mandate_and_range(
    mandate_ref: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> anyhow::Result<Vec<PayrollEntry>> {
    repository::list_by_mandate_and_range(mandate_ref, start, end).await
}

pub async fn set_locked(id: Uuid, locked: bool) -> anyhow::Result<bool> {
    repository::set_locked(id, locked).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}
