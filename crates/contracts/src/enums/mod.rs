pub mod import_status;
pub mod match_type;
pub mod period_type;

pub use import_status::ImportStatus;
pub use match_type::MatchType;
pub use period_type::PeriodType;
