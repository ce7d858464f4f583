use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // A001 Mandate handlers
        // ========================================
        .route(
            "/api/mandate",
            get(handlers::a001_mandate::list_all).post(handlers::a001_mandate::upsert),
        )
        .route(
            "/api/mandate/:id",
            get(handlers::a001_mandate::get_by_id).delete(handlers::a001_mandate::delete),
        )
        .route(
            "/api/mandate/:id/employees",
            get(handlers::a002_employee::list_by_mandate),
        )
        .route(
            "/api/mandate/:id/time_records",
            get(handlers::a003_time_record::list_by_mandate),
        )
        .route(
            "/api/mandate/:id/payroll_entries",
            get(handlers::a004_payroll_entry::list_by_mandate),
        )
        .route(
            "/api/mandate/:id/manual_payroll",
            get(handlers::a005_manual_payroll_entry::list_by_mandate),
        )
        .route(
            "/api/mandate/:id/import_history",
            get(handlers::a006_import_history::list_by_mandate),
        )
        // ========================================
        // A002 Employee handlers
        // ========================================
        .route(
            "/api/employee",
            get(handlers::a002_employee::list_all).post(handlers::a002_employee::upsert),
        )
        .route(
            "/api/employee/:id",
            get(handlers::a002_employee::get_by_id).delete(handlers::a002_employee::delete),
        )
        // ========================================
        // A003 Time record handlers
        // ========================================
        .route(
            "/api/time_record/:id",
            get(handlers::a003_time_record::get_by_id).delete(handlers::a003_time_record::delete),
        )
        // ========================================
        // A004 Payroll entry handlers
        // ========================================
        .route(
            "/api/payroll_entry/:id",
            get(handlers::a004_payroll_entry::get_by_id)
                .delete(handlers::a004_payroll_entry::delete),
        )
        .route(
            "/api/payroll_entry/:id/lock",
            post(handlers::a004_payroll_entry::lock),
        )
        .route(
            "/api/payroll_entry/:id/unlock",
            post(handlers::a004_payroll_entry::unlock),
        )
        // ========================================
        // A005 Manual payroll handlers
        // ========================================
        .route(
            "/api/manual_payroll/:id",
            get(handlers::a005_manual_payroll_entry::get_by_id)
                .delete(handlers::a005_manual_payroll_entry::delete),
        )
        // ========================================
        // A006 Import history handlers
        // ========================================
        .route(
            "/api/import_history",
            get(handlers::a006_import_history::list_all),
        )
        .route(
            "/api/import_history/:id",
            get(handlers::a006_import_history::get_by_id),
        )
        .route(
            "/api/import_history/:id/match_rows",
            get(handlers::a006_import_history::list_match_rows),
        )
        // ========================================
        // UseCase handlers (u901-u904)
        // ========================================
        .route(
            "/api/u901/validate_import",
            post(handlers::usecases::u901_validate_import),
        )
        .route(
            "/api/u902/import_time_records",
            post(handlers::usecases::u902_import_time_records),
        )
        .route(
            "/api/u903/calculate_payroll",
            post(handlers::usecases::u903_calculate_payroll),
        )
        .route(
            "/api/u904/confirmed_import",
            post(handlers::usecases::u904_confirmed_import),
        )
}
