pub mod request;
pub mod response;

pub use request::ValidateImportRequest;
pub use response::{EmployeePreview, ImportStatistics, ValidateImportResponse};

use crate::usecases::common::UseCaseMetadata;

pub struct ValidateImport;

impl UseCaseMetadata for ValidateImport {
    fn usecase_index() -> &'static str {
        "u901"
    }

    fn usecase_name() -> &'static str {
        "validate_import"
    }

    fn display_name() -> &'static str {
        "Проверка файла импорта"
    }

    fn description() -> &'static str {
        "Сопоставление строк файла с сотрудниками без записи в базу"
    }
}
