use axum::http::StatusCode;
use axum::Json;

use crate::shared::payroll::errors::ImportError;
use crate::usecases;

/// Текст ошибки предусловия нужен оператору; ошибки хранилища остаются в логах
fn map_error(err: ImportError) -> (StatusCode, Json<serde_json::Value>) {
    let status = match &err {
        ImportError::MandateNotFound(_) => StatusCode::NOT_FOUND,
        ImportError::TooManyRows { .. } | ImportError::InvalidRequest(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ImportError::Storage(inner) => {
            tracing::error!("UseCase storage error: {}", inner);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "internal error"})),
            );
        }
    };
    (status, Json(serde_json::json!({"error": err.to_string()})))
}

/// POST /api/u901/validate_import
pub async fn u901_validate_import(
    Json(request): Json<contracts::usecases::u901_validate_import::ValidateImportRequest>,
) -> Result<
    Json<contracts::usecases::u901_validate_import::ValidateImportResponse>,
    (StatusCode, Json<serde_json::Value>),
> {
    usecases::u901_validate_import::executor::execute(request)
        .await
        .map(Json)
        .map_err(map_error)
}

/// POST /api/u902/import_time_records
pub async fn u902_import_time_records(
    Json(request): Json<contracts::usecases::u902_import_time_records::ImportTimeRecordsRequest>,
) -> Result<
    Json<contracts::usecases::u902_import_time_records::ImportTimeRecordsResponse>,
    (StatusCode, Json<serde_json::Value>),
> {
    usecases::u902_import_time_records::executor::execute(request)
        .await
        .map(Json)
        .map_err(map_error)
}

/// POST /api/u903/calculate_payroll
pub async fn u903_calculate_payroll(
    Json(request): Json<contracts::usecases::u903_calculate_payroll::CalculatePayrollRequest>,
) -> Result<
    Json<contracts::usecases::u903_calculate_payroll::CalculatePayrollResponse>,
    (StatusCode, Json<serde_json::Value>),
> {
    usecases::u903_calculate_payroll::executor::execute(request)
        .await
        .map(Json)
        .map_err(map_error)
}

/// POST /api/u904/confirmed_import
pub async fn u904_confirmed_import(
    Json(request): Json<contracts::usecases::u904_confirmed_import::ConfirmedImportRequest>,
) -> Result<
    Json<contracts::usecases::u904_confirmed_import::ConfirmedImportResponse>,
    (StatusCode, Json<serde_json::Value>),
> {
    usecases::u904_confirmed_import::executor::execute(request)
        .await
        .map(Json)
        .map_err(map_error)
}
