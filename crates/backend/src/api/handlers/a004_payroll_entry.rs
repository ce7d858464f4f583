use axum::{extract::Path, Json};
use serde_json::json;

use crate::domain::a004_payroll_entry;

/// GET /api/mandate/:id/payroll_entries
pub async fn list_by_mandate(
    Path(id): Path<String>,
) -> Result<Json<Vec<contracts::domain::a004_payroll_entry::PayrollEntry>>, axum::http::StatusCode>
{
    if uuid::Uuid::parse_str(&id).is_err() {
        return Err(axum::http::StatusCode::BAD_REQUEST);
    }
    match a004_payroll_entry::service::list_by_mandate(&id).await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list payroll entries: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/payroll_entry/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<contracts::domain::a004_payroll_entry::PayrollEntry>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a004_payroll_entry::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/payroll_entry/:id/lock
pub async fn lock(Path(id): Path<String>) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    set_locked(&id, true).await
}

/// POST /api/payroll_entry/:id/unlock
pub async fn unlock(
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    set_locked(&id, false).await
}

async fn set_locked(
    id: &str,
    locked: bool,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a004_payroll_entry::service::set_locked(uuid, locked).await {
        Ok(true) => Ok(Json(json!({"id": id, "isLocked": locked}))),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to change payroll entry lock: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// DELETE /api/payroll_entry/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a004_payroll_entry::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}
