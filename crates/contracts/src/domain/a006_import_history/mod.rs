pub mod aggregate;
pub mod match_row;

pub use aggregate::{ImportHistory, ImportHistoryId};
pub use match_row::MatchRow;
