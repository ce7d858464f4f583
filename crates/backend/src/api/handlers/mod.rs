// Aggregate handlers (a001-a006)
pub mod a001_mandate;
pub mod a002_employee;
pub mod a003_time_record;
pub mod a004_payroll_entry;
pub mod a005_manual_payroll_entry;
pub mod a006_import_history;

// UseCase handlers (u901-u904)
pub mod usecases;
