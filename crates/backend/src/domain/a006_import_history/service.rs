use super::{match_rows, repository};
use contracts::domain::a006_import_history::{ImportHistory, MatchRow};
use uuid::Uuid;

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<ImportHistory>> {
    repository::get_by_id(id).await
}

pub async fn list_by_mandate(mandate_ref: &str) -> anyhow::Result<Vec<ImportHistory>> {
    repository::list_by_mandate(mandate_ref).await
}

pub async fn list_all() -> anyhow::Result<Vec<ImportHistory>> {
    repository::list_all().await
}

pub async fn list_match_rows(import_id: Uuid) -> anyhow::Result<Vec<MatchRow>> {
    match_rows::list_by_import(&import_id.to_string()).await
}
