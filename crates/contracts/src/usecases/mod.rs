pub mod common;
pub mod u901_validate_import;
pub mod u902_import_time_records;
pub mod u903_calculate_payroll;
pub mod u904_confirmed_import;
