use axum::{extract::Path, Json};

use crate::domain::a006_import_history;

/// GET /api/import_history
pub async fn list_all() -> Result<
    Json<Vec<contracts::domain::a006_import_history::ImportHistory>>,
    axum::http::StatusCode,
> {
    match a006_import_history::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Failed to list import history: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/mandate/:id/import_history
pub async fn list_by_mandate(
    Path(id): Path<String>,
) -> Result<Json<Vec<contracts::domain::a006_import_history::ImportHistory>>, axum::http::StatusCode>
{
    if uuid::Uuid::parse_str(&id).is_err() {
        return Err(axum::http::StatusCode::BAD_REQUEST);
    }
    match a006_import_history::service::list_by_mandate(&id).await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /api/import_history/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<contracts::domain::a006_import_history::ImportHistory>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a006_import_history::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /api/import_history/:id/match_rows
pub async fn list_match_rows(
    Path(id): Path<String>,
) -> Result<Json<Vec<contracts::domain::a006_import_history::MatchRow>>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a006_import_history::service::list_match_rows(uuid).await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}
