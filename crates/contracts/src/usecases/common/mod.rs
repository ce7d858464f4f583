pub mod raw_row;
pub mod usecase_metadata;
pub mod usecase_result;

pub use raw_row::RawTimeRow;
pub use usecase_metadata::UseCaseMetadata;
pub use usecase_result::{UseCaseError, UseCaseResult};
