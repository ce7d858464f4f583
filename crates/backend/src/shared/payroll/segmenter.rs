use chrono::{Datelike, Duration, NaiveDate};
use contracts::enums::PeriodType;

/// Один расчетный период; границы включительные
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayrollPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Разбивает диапазон [start, end] на непересекающиеся периоды без зазоров
///
/// WEEKLY — блоки по 7 дней от start, последний обрезается по end.
/// MONTHLY — календарные месяцы, первый и последний обрезаются по диапазону.
/// Всегда тотальна; start > end — забота вызывающего, не сегментера
pub fn segment_periods(start: NaiveDate, end: NaiveDate, period_type: PeriodType) -> Vec<PayrollPeriod> {
    let mut periods = Vec::new();
    let mut cursor = start;

    match period_type {
        PeriodType::Weekly => {
            while cursor <= end {
                let block_end = cursor + Duration::days(6);
                periods.push(PayrollPeriod {
                    start: cursor,
                    end: block_end.min(end),
                });
                cursor = block_end + Duration::days(1);
            }
        }
        PeriodType::Monthly => {
            while cursor <= end {
                let month_end = last_day_of_month(cursor);
                periods.push(PayrollPeriod {
                    start: cursor,
                    end: month_end.min(end),
                });
                cursor = month_end + Duration::days(1);
            }
        }
    }

    periods
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    // Первое число следующего месяца всегда существует
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .map(|d| d - Duration::days(1))
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn assert_covering(periods: &[PayrollPeriod], start: NaiveDate, end: NaiveDate) {
        assert!(!periods.is_empty());
        assert_eq!(periods.first().unwrap().start, start);
        assert_eq!(periods.last().unwrap().end, end);
        for p in periods {
            assert!(p.start <= p.end);
        }
        // Без зазоров и перекрытий
        for pair in periods.windows(2) {
            assert_eq!(pair[1].start, pair[0].end + Duration::days(1));
        }
    }

    #[test]
    fn test_weekly_exact_weeks() {
        let periods = segment_periods(date(2025, 6, 2), date(2025, 6, 15), PeriodType::Weekly);
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].end, date(2025, 6, 8));
        assert_covering(&periods, date(2025, 6, 2), date(2025, 6, 15));
    }

    #[test]
    fn test_weekly_last_block_clipped() {
        let periods = segment_periods(date(2025, 6, 2), date(2025, 6, 18), PeriodType::Weekly);
        assert_eq!(periods.len(), 3);
        assert_eq!(periods[2].start, date(2025, 6, 16));
        assert_eq!(periods[2].end, date(2025, 6, 18));
        assert_covering(&periods, date(2025, 6, 2), date(2025, 6, 18));
    }

    #[test]
    fn test_monthly_clipped_both_ends() {
        let periods = segment_periods(date(2025, 1, 15), date(2025, 3, 10), PeriodType::Monthly);
        assert_eq!(periods.len(), 3);
        assert_eq!(periods[0].start, date(2025, 1, 15));
        assert_eq!(periods[0].end, date(2025, 1, 31));
        assert_eq!(periods[1].start, date(2025, 2, 1));
        assert_eq!(periods[1].end, date(2025, 2, 28));
        assert_eq!(periods[2].end, date(2025, 3, 10));
        assert_covering(&periods, date(2025, 1, 15), date(2025, 3, 10));
    }

    #[test]
    fn test_monthly_december_wraps_year() {
        let periods = segment_periods(date(2024, 12, 1), date(2025, 1, 31), PeriodType::Monthly);
        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].end, date(2024, 12, 31));
        assert_covering(&periods, date(2024, 12, 1), date(2025, 1, 31));
    }

    #[test]
    fn test_single_day_range() {
        let d = date(2025, 7, 4);
        let weekly = segment_periods(d, d, PeriodType::Weekly);
        assert_eq!(weekly, vec![PayrollPeriod { start: d, end: d }]);

        let monthly = segment_periods(d, d, PeriodType::Monthly);
        assert_eq!(monthly, vec![PayrollPeriod { start: d, end: d }]);
    }

    #[test]
    fn test_leap_february() {
        let periods = segment_periods(date(2024, 2, 1), date(2024, 2, 29), PeriodType::Monthly);
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].end, date(2024, 2, 29));
    }
}
