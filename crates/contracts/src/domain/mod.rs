pub mod a001_mandate;
pub mod a002_employee;
pub mod a003_time_record;
pub mod a004_payroll_entry;
pub mod a005_manual_payroll_entry;
pub mod a006_import_history;
pub mod common;
