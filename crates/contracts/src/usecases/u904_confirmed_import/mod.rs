pub mod request;
pub mod response;

pub use request::{ConfirmedImportRequest, ReviewedEmployeeRow};
pub use response::ConfirmedImportResponse;

use crate::usecases::common::UseCaseMetadata;

pub struct ConfirmedImport;

impl UseCaseMetadata for ConfirmedImport {
    fn usecase_index() -> &'static str {
        "u904"
    }

    fn usecase_name() -> &'static str {
        "confirmed_import"
    }

    fn display_name() -> &'static str {
        "Подтвержденный месячный импорт"
    }

    fn description() -> &'static str {
        "Запись проверенных месячных итогов зарплаты без детального учета времени"
    }
}
