use super::repository;
use contracts::domain::a005_manual_payroll_entry::ManualPayrollEntry;
use uuid::Uuid;

// Укрупненные записи создаёт подтвержденный импорт (u904)

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<ManualPayrollEntry>> {
    repository::get_by_id(id).await
}

pub async fn list_by_mandate(mandate_ref: &str) -> anyhow::Result<Vec<ManualPayrollEntry>> {
    repository::list_by_mandate(mandate_ref).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}
