use super::repository;
use contracts::domain::a002_employee::{Employee, EmployeeDto};
use uuid::Uuid;

pub async fn create(dto: EmployeeDto) -> anyhow::Result<Uuid> {
    let code = dto
        .code
        .clone()
        .unwrap_or_else(|| generate_code());

    let mandate_ref = dto
        .mandate_ref
        .clone()
        .ok_or_else(|| anyhow::anyhow!("mandateRef is required"))?;

    let mut aggregate = Employee::new_for_insert(
        code,
        dto.external_id.clone(),
        dto.first_name.clone(),
        dto.last_name.clone(),
        dto.hourly_rate,
        dto.position.clone().unwrap_or_default(),
        mandate_ref,
        dto.comment.clone(),
    );

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.before_write();

    repository::insert(&aggregate).await
}

pub async fn update(dto: EmployeeDto) -> anyhow::Result<()> {
    let id = dto
        .id
        .as_ref()
        .and_then(|s| Uuid::parse_str(s).ok())
        .ok_or_else(|| anyhow::anyhow!("Invalid ID"))?;

    let mut aggregate = repository::get_by_id(id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Not found"))?;

    aggregate.update(&dto);

    aggregate
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    aggregate.before_write();

    repository::update(&aggregate).await
}

pub async fn delete(id: Uuid) -> anyhow::Result<bool> {
    repository::soft_delete(id).await
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Employee>> {
    repository::get_by_id(id).await
}

pub async fn list_all() -> anyhow::Result<Vec<Employee>> {
    repository::list_all().await
}

pub async fn list_by_mandate(mandate_ref: &str) -> anyhow::Result<Vec<Employee>> {
    repository::list_by_mandate(mandate_ref).await
}

/// Код для сотрудников, созданных автоматически при импорте
pub fn generate_code() -> String {
    let suffix = Uuid::new_v4().to_string();
    format!("EMP-{}", &suffix[..8])
}
