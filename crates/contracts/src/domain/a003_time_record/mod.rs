pub mod aggregate;

pub use aggregate::{TimeRecord, TimeRecordId};
