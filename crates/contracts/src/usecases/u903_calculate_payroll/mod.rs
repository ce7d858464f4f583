pub mod request;
pub mod response;

pub use request::CalculatePayrollRequest;
pub use response::{
    CalculatePayrollResponse, EmployeeBreakdown, MandateBreakdown, PayrollTotals,
};

use crate::usecases::common::UseCaseMetadata;

pub struct CalculatePayroll;

impl UseCaseMetadata for CalculatePayroll {
    fn usecase_index() -> &'static str {
        "u903"
    }

    fn usecase_name() -> &'static str {
        "calculate_payroll"
    }

    fn display_name() -> &'static str {
        "Расчет зарплаты"
    }

    fn description() -> &'static str {
        "Расчет записей зарплаты по периодам из записей учета времени"
    }
}
