pub mod aggregate;

pub use aggregate::{PayrollEntry, PayrollEntryId};
