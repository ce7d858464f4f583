pub mod aggregate;

pub use aggregate::{ManualPayrollEntry, ManualPayrollEntryId};
