pub mod request;
pub mod response;

pub use request::ImportTimeRecordsRequest;
pub use response::ImportTimeRecordsResponse;

use crate::usecases::common::UseCaseMetadata;

pub struct ImportTimeRecords;

impl UseCaseMetadata for ImportTimeRecords {
    fn usecase_index() -> &'static str {
        "u902"
    }

    fn usecase_name() -> &'static str {
        "import_time_records"
    }

    fn display_name() -> &'static str {
        "Импорт учета времени"
    }

    fn description() -> &'static str {
        "Пакетная загрузка записей времени с сопоставлением сотрудников"
    }
}
