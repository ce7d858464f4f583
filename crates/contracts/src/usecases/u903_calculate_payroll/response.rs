use crate::domain::a004_payroll_entry::PayrollEntry;
use serde::{Deserialize, Serialize};

/// Глобальные итоги расчета
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PayrollTotals {
    #[serde(rename = "totalHours")]
    pub total_hours: f64,

    #[serde(rename = "totalRegularHours")]
    pub total_regular_hours: f64,

    #[serde(rename = "totalOvertimeHours")]
    pub total_overtime_hours: f64,

    #[serde(rename = "totalGrossPay")]
    pub total_gross_pay: f64,

    #[serde(rename = "totalSocialCharges")]
    pub total_social_charges: f64,

    #[serde(rename = "totalCost")]
    pub total_cost: f64,
}

impl PayrollTotals {
    /// Прибавить запись к итогам
    pub fn accumulate(&mut self, entry: &PayrollEntry) {
        self.total_hours += entry.total_hours;
        self.total_regular_hours += entry.regular_hours;
        self.total_overtime_hours += entry.overtime_hours;
        self.total_gross_pay += entry.total_gross;
        self.total_social_charges += entry.social_charges;
        self.total_cost += entry.total_cost;
    }
}

/// Разбивка по одному сотруднику
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeBreakdown {
    #[serde(rename = "employeeRef")]
    pub employee_ref: String,

    #[serde(rename = "employeeName")]
    pub employee_name: String,

    pub entries: Vec<PayrollEntry>,

    pub totals: PayrollTotals,
}

/// Разбивка по одному заведению
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MandateBreakdown {
    #[serde(rename = "mandateRef")]
    pub mandate_ref: String,

    #[serde(rename = "mandateName")]
    pub mandate_name: String,

    pub employees: Vec<EmployeeBreakdown>,

    pub totals: PayrollTotals,
}

/// Ответ расчета зарплаты
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatePayrollResponse {
    pub mandates: Vec<MandateBreakdown>,

    pub totals: PayrollTotals,

    /// Сколько периодов пропущено из-за блокировки
    #[serde(rename = "lockedSkipped")]
    pub locked_skipped: i32,
}
