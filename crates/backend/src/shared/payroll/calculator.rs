use chrono::NaiveDate;
use contracts::enums::PeriodType;

use crate::shared::config::PayrollConfig;

/// Константы расчета, передаются явно вместо зашитых литералов
#[derive(Debug, Clone, Copy)]
pub struct PayrollRates {
    pub overtime_multiplier: f64,
    pub social_charge_rate: f64,
    pub default_hourly_rate: f64,
    pub weekly_overtime_threshold: f64,
}

impl From<&PayrollConfig> for PayrollRates {
    fn from(cfg: &PayrollConfig) -> Self {
        Self {
            overtime_multiplier: cfg.overtime_multiplier,
            social_charge_rate: cfg.social_charge_rate,
            default_hourly_rate: cfg.default_hourly_rate,
            weekly_overtime_threshold: cfg.weekly_overtime_threshold,
        }
    }
}

/// Разбивка часов на обычные и сверхурочные
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoursSplit {
    pub regular_hours: f64,
    pub overtime_hours: f64,
}

impl HoursSplit {
    pub fn total(&self) -> f64 {
        self.regular_hours + self.overtime_hours
    }
}

/// Денежные итоги одного периода
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoneyFigures {
    pub base_salary: f64,
    pub overtime_pay: f64,
    pub total_gross: f64,
    pub social_charges: f64,
    pub total_cost: f64,
}

/// Порог сверхурочных для периода
///
/// WEEKLY — фиксированный недельный порог; MONTHLY — недельный порог,
/// умноженный на число недель периода с округлением вверх (неполная неделя
/// считается целой)
pub fn overtime_threshold(
    period_type: PeriodType,
    period_start: NaiveDate,
    period_end: NaiveDate,
    weekly_threshold: f64,
) -> f64 {
    match period_type {
        PeriodType::Weekly => weekly_threshold,
        PeriodType::Monthly => {
            let days = (period_end - period_start).num_days() + 1;
            let weeks = (days as f64 / 7.0).ceil();
            weekly_threshold * weeks
        }
    }
}

/// Разделить отработанные часы по порогу сверхурочных
pub fn split_hours(total_hours: f64, threshold: f64) -> HoursSplit {
    if total_hours <= threshold {
        HoursSplit {
            regular_hours: total_hours,
            overtime_hours: 0.0,
        }
    } else {
        HoursSplit {
            regular_hours: threshold,
            overtime_hours: total_hours - threshold,
        }
    }
}

/// Посчитать деньги по разбивке часов
///
/// Без промежуточных округлений — округление только на отображении
pub fn compute_money(split: HoursSplit, hourly_rate: f64, rates: &PayrollRates) -> MoneyFigures {
    let base_salary = split.regular_hours * hourly_rate;
    let overtime_pay = split.overtime_hours * hourly_rate * rates.overtime_multiplier;
    let total_gross = base_salary + overtime_pay;
    let social_charges = total_gross * rates.social_charge_rate;

    MoneyFigures {
        base_salary,
        overtime_pay,
        total_gross,
        social_charges,
        total_cost: total_gross + social_charges,
    }
}

/// Ставка сотрудника с фолбэком на ставку по умолчанию
pub fn effective_rate(
    employee_rate: Option<f64>,
    mandate_default: Option<f64>,
    rates: &PayrollRates,
) -> f64 {
    employee_rate
        .or(mandate_default)
        .unwrap_or(rates.default_hourly_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_rates() -> PayrollRates {
        PayrollRates::from(&PayrollConfig::default())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekly_overtime_split() {
        let split = split_hours(45.0, 40.0);
        assert_eq!(split.regular_hours, 40.0);
        assert_eq!(split.overtime_hours, 5.0);
    }

    #[test]
    fn test_weekly_under_threshold_no_overtime() {
        let split = split_hours(38.0, 40.0);
        assert_eq!(split.regular_hours, 38.0);
        assert_eq!(split.overtime_hours, 0.0);
    }

    #[test]
    fn test_monthly_threshold_rounds_weeks_up() {
        // Июнь 2025: 30 дней -> ceil(30/7) = 5 недель -> 200 часов
        let threshold = overtime_threshold(
            PeriodType::Monthly,
            date(2025, 6, 1),
            date(2025, 6, 30),
            40.0,
        );
        assert_eq!(threshold, 200.0);

        // Обрезанный месяц из 14 дней -> ровно 2 недели -> 80 часов
        let threshold = overtime_threshold(
            PeriodType::Monthly,
            date(2025, 6, 1),
            date(2025, 6, 14),
            40.0,
        );
        assert_eq!(threshold, 80.0);
    }

    #[test]
    fn test_weekly_threshold_is_flat() {
        let threshold = overtime_threshold(
            PeriodType::Weekly,
            date(2025, 6, 2),
            date(2025, 6, 8),
            40.0,
        );
        assert_eq!(threshold, 40.0);
    }

    #[test]
    fn test_money_identities() {
        let rates = default_rates();
        let split = split_hours(45.0, 40.0);
        let money = compute_money(split, 20.0, &rates);

        assert_eq!(money.base_salary, 800.0);
        assert_eq!(money.overtime_pay, 125.0);
        assert_eq!(money.total_gross, 925.0);
        assert_eq!(money.social_charges, 203.5);
        assert_eq!(money.total_cost, 1128.5);

        // Инварианты суммы
        assert_eq!(money.total_gross, money.base_salary + money.overtime_pay);
        assert_eq!(money.total_cost, money.total_gross + money.social_charges);
        assert!((money.total_cost - money.total_gross * 1.22).abs() < 1e-9);
    }

    #[test]
    fn test_zero_hours_zero_money() {
        let money = compute_money(split_hours(0.0, 40.0), 20.0, &default_rates());
        assert_eq!(money.total_cost, 0.0);
    }

    #[test]
    fn test_effective_rate_fallback_chain() {
        let rates = default_rates();
        assert_eq!(effective_rate(Some(30.0), Some(18.0), &rates), 30.0);
        assert_eq!(effective_rate(None, Some(18.0), &rates), 18.0);
        assert_eq!(effective_rate(None, None, &rates), 25.0);
    }

    #[test]
    fn test_alternate_rates_flow_through() {
        let rates = PayrollRates {
            overtime_multiplier: 2.0,
            social_charge_rate: 0.1,
            default_hourly_rate: 10.0,
            weekly_overtime_threshold: 35.0,
        };
        let money = compute_money(split_hours(40.0, 35.0), 10.0, &rates);
        assert_eq!(money.base_salary, 350.0);
        assert_eq!(money.overtime_pay, 100.0);
        assert_eq!(money.social_charges, 45.0);
        assert_eq!(money.total_cost, 495.0);
    }
}
