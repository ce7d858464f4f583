use std::collections::HashMap;

use chrono::Utc;
use contracts::domain::a001_mandate::Mandate;
use contracts::domain::a004_payroll_entry::PayrollEntry;
use contracts::usecases::u903_calculate_payroll::{
    CalculatePayrollRequest, CalculatePayrollResponse, EmployeeBreakdown, MandateBreakdown,
    PayrollTotals,
};
use uuid::Uuid;

use crate::domain::{a001_mandate, a002_employee, a003_time_record, a004_payroll_entry};
use crate::shared::config::payroll_config;
use crate::shared::payroll::calculator::{
    compute_money, effective_rate, overtime_threshold, split_hours, PayrollRates,
};
use crate::shared::payroll::errors::ImportError;
use crate::shared::payroll::segmenter::segment_periods;

/// Сколько заведений пересчитывает кэш стоимости труда одновременно
const STATS_REFRESH_BATCH: usize = 10;

/// Расчет зарплаты по периодам
///
/// Идемпотентен: свежий расчет замещает прежние записи по натуральному ключу.
/// Заблокированные записи не пересчитываются без флага recalculate, но
/// попадают в разбивку как есть
pub async fn execute(
    request: CalculatePayrollRequest,
) -> Result<CalculatePayrollResponse, ImportError> {
    if request.period_end < request.period_start {
        return Err(ImportError::InvalidRequest(
            "Конец периода раньше начала".to_string(),
        ));
    }

    let config = payroll_config();
    let rates = PayrollRates::from(config);

    let mandates: Vec<Mandate> = match &request.mandate_id {
        Some(raw_id) => {
            let id = Uuid::parse_str(raw_id)
                .map_err(|_| ImportError::MandateNotFound(raw_id.clone()))?;
            let mandate = a001_mandate::service::get_by_id(id)
                .await?
                .ok_or_else(|| ImportError::MandateNotFound(raw_id.clone()))?;
            vec![mandate]
        }
        None => a001_mandate::service::list_all().await?,
    };

    let periods = segment_periods(request.period_start, request.period_end, request.period_type);

    tracing::info!(
        "Payroll calculation started: mandates={}, periods={}, type={}",
        mandates.len(),
        periods.len(),
        request.period_type.code()
    );

    let mut response = CalculatePayrollResponse {
        mandates: Vec::new(),
        totals: PayrollTotals::default(),
        locked_skipped: 0,
    };

    for mandate in &mandates {
        let mandate_ref = mandate.to_string_id();

        let records = a003_time_record::repository::list_by_mandate_and_range(
            &mandate_ref,
            request.period_start,
            request.period_end,
        )
        .await?;
        if records.is_empty() {
            continue;
        }

        let employees = a002_employee::repository::list_by_mandate(&mandate_ref).await?;
        let employee_by_ref: HashMap<String, _> = employees
            .into_iter()
            .map(|e| (e.to_string_id(), e))
            .collect();

        // Записи времени по сотрудникам; порядок появления сохраняется
        let mut per_employee: Vec<(String, Vec<&contracts::domain::a003_time_record::TimeRecord>)> =
            Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();
        for record in &records {
            match seen.get(&record.employee_ref) {
                Some(&i) => per_employee[i].1.push(record),
                None => {
                    seen.insert(record.employee_ref.clone(), per_employee.len());
                    per_employee.push((record.employee_ref.clone(), vec![record]));
                }
            }
        }

        let mut mandate_breakdown = MandateBreakdown {
            mandate_ref: mandate_ref.clone(),
            mandate_name: mandate.base.description.clone(),
            employees: Vec::new(),
            totals: PayrollTotals::default(),
        };

        for (employee_ref, employee_records) in per_employee {
            let employee = employee_by_ref.get(&employee_ref);
            let rate = effective_rate(
                employee.and_then(|e| e.hourly_rate),
                mandate.default_hourly_rate,
                &rates,
            );

            let mut breakdown = EmployeeBreakdown {
                employee_ref: employee_ref.clone(),
                employee_name: employee
                    .map(|e| e.full_name())
                    .unwrap_or_else(|| employee_ref.clone()),
                entries: Vec::new(),
                totals: PayrollTotals::default(),
            };

            for period in &periods {
                let hours: f64 = employee_records
                    .iter()
                    .filter(|r| r.work_date >= period.start && r.work_date <= period.end)
                    .map(|r| r.worked_hours)
                    .sum();
                if hours <= 0.0 {
                    continue;
                }

                let existing = a004_payroll_entry::repository::get_by_natural_key(
                    &employee_ref,
                    &mandate_ref,
                    period.start,
                    request.period_type,
                )
                .await?;

                if let Some(found) = &existing {
                    if found.is_locked && !request.recalculate {
                        response.locked_skipped += 1;
                        breakdown.totals.accumulate(found);
                        breakdown.entries.push(found.clone());
                        continue;
                    }
                }

                let threshold = overtime_threshold(
                    request.period_type,
                    period.start,
                    period.end,
                    rates.weekly_overtime_threshold,
                );
                let split = split_hours(hours, threshold);
                let money = compute_money(split, rate, &rates);

                let mut entry = PayrollEntry::new_for_insert(
                    format!("PAY-{}", &Uuid::new_v4().to_string()[..8]),
                    employee_ref.clone(),
                    mandate_ref.clone(),
                    period.start,
                    period.end,
                    request.period_type,
                    split.regular_hours,
                    split.overtime_hours,
                    rate,
                    money.base_salary,
                    money.overtime_pay,
                    money.social_charges,
                );
                entry.before_write();
                a004_payroll_entry::repository::upsert_by_natural_key(&entry).await?;

                breakdown.totals.accumulate(&entry);
                breakdown.entries.push(entry);
            }

            if !breakdown.entries.is_empty() {
                mandate_breakdown.totals.total_hours += breakdown.totals.total_hours;
                mandate_breakdown.totals.total_regular_hours +=
                    breakdown.totals.total_regular_hours;
                mandate_breakdown.totals.total_overtime_hours +=
                    breakdown.totals.total_overtime_hours;
                mandate_breakdown.totals.total_gross_pay += breakdown.totals.total_gross_pay;
                mandate_breakdown.totals.total_social_charges +=
                    breakdown.totals.total_social_charges;
                mandate_breakdown.totals.total_cost += breakdown.totals.total_cost;
                mandate_breakdown.employees.push(breakdown);
            }
        }

        if !mandate_breakdown.employees.is_empty() {
            response.totals.total_hours += mandate_breakdown.totals.total_hours;
            response.totals.total_regular_hours += mandate_breakdown.totals.total_regular_hours;
            response.totals.total_overtime_hours += mandate_breakdown.totals.total_overtime_hours;
            response.totals.total_gross_pay += mandate_breakdown.totals.total_gross_pay;
            response.totals.total_social_charges += mandate_breakdown.totals.total_social_charges;
            response.totals.total_cost += mandate_breakdown.totals.total_cost;
            response.mandates.push(mandate_breakdown);
        }
    }

    // Кэш стоимости труда заведений, пачками чтобы не душить SQLite
    let touched: Vec<Uuid> = response
        .mandates
        .iter()
        .filter_map(|m| Uuid::parse_str(&m.mandate_ref).ok())
        .collect();
    refresh_mandate_payroll_stats(touched).await;

    tracing::info!(
        "Payroll calculation finished: mandates={}, total_cost={:.2}, locked_skipped={}",
        response.mandates.len(),
        response.totals.total_cost,
        response.locked_skipped
    );

    Ok(response)
}

/// Пересчет кэша total_payroll_cost затронутых заведений
async fn refresh_mandate_payroll_stats(mandate_ids: Vec<Uuid>) {
    for batch in mandate_ids.chunks(STATS_REFRESH_BATCH) {
        let mut handles = Vec::with_capacity(batch.len());
        for id in batch {
            let id = *id;
            handles.push(tokio::spawn(async move {
                let total =
                    a004_payroll_entry::repository::sum_total_cost_by_mandate(&id.to_string())
                        .await?;
                a001_mandate::repository::update_payroll_stats(id, total, Utc::now()).await
            }));
        }
        for handle in handles {
            match handle.await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => tracing::warn!("Mandate stats refresh failed: {}", err),
                Err(err) => tracing::warn!("Mandate stats refresh task panicked: {}", err),
            }
        }
    }
}
