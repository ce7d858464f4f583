use contracts::domain::a005_manual_payroll_entry::ManualPayrollEntry;
use contracts::domain::a006_import_history::{ImportHistory, MatchRow};
use contracts::enums::{ImportStatus, MatchType};
use contracts::usecases::u904_confirmed_import::{ConfirmedImportRequest, ConfirmedImportResponse};
use uuid::Uuid;

use crate::domain::common::UpsertOutcome;
use crate::domain::{a001_mandate, a005_manual_payroll_entry, a006_import_history};
use crate::shared::config::payroll_config;
use crate::shared::payroll::calculator::{effective_rate, PayrollRates};
use crate::shared::payroll::errors::ImportError;

/// Период YYYY-MM
fn parse_period(period: &str) -> Result<(i32, u32), ImportError> {
    let invalid = || {
        ImportError::InvalidRequest(format!(
            "Период '{}' не в формате YYYY-MM",
            period
        ))
    };
    let (year_str, month_str) = period.split_once('-').ok_or_else(invalid)?;
    let year: i32 = year_str.parse().map_err(|_| invalid())?;
    let month: u32 = month_str.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

/// Подтвержденный месячный импорт: укрупненные итоги без записей времени
///
/// Список сотрудников уже проверен человеком; ядро только суммирует и пишет
/// одну запись на (заведение, год, месяц). Повтор месяца замещает итоги
pub async fn execute(
    request: ConfirmedImportRequest,
) -> Result<ConfirmedImportResponse, ImportError> {
    let config = payroll_config();

    let mandate_id = Uuid::parse_str(&request.mandate_id)
        .map_err(|_| ImportError::MandateNotFound(request.mandate_id.clone()))?;
    let mandate = a001_mandate::service::get_by_id(mandate_id)
        .await?
        .ok_or_else(|| ImportError::MandateNotFound(request.mandate_id.clone()))?;
    let mandate_ref = mandate.to_string_id();

    let (year, month) = parse_period(&request.period)?;

    let mut rates = PayrollRates::from(config);
    if let Some(rate) = request.social_charge_rate {
        rates.social_charge_rate = rate;
    }

    let mut total_hours = 0.0;
    let mut total_gross = 0.0;
    for row in &request.employees {
        let rate = effective_rate(row.rate, mandate.default_hourly_rate, &rates);
        total_hours += row.hours;
        total_gross += row.hours * rate;
    }
    let social_charges = total_gross * rates.social_charge_rate;
    let employee_count = request.employees.len() as i32;

    let mut entry = ManualPayrollEntry::new_for_insert(
        format!("MPE-{}", &Uuid::new_v4().to_string()[..8]),
        mandate_ref.clone(),
        year,
        month,
        total_hours,
        total_gross,
        social_charges,
        employee_count,
        request.file_name.clone(),
    );
    entry
        .validate()
        .map_err(ImportError::InvalidRequest)?;
    entry.before_write();

    let outcome = a005_manual_payroll_entry::repository::upsert_by_natural_key(&entry).await?;
    let created = outcome == UpsertOutcome::Created;

    // Запись, оставшаяся в базе, при обновлении сохраняет прежний id
    let manual_entry_id = match created {
        true => entry.to_string_id(),
        false => {
            a005_manual_payroll_entry::repository::get_by_natural_key(&mandate_ref, year, month)
                .await?
                .map(|e| e.to_string_id())
                .unwrap_or_else(|| entry.to_string_id())
        }
    };

    let mut history = ImportHistory::new_for_insert(
        format!("IMP-{}", &Uuid::new_v4().to_string()[..8]),
        mandate_ref.clone(),
        request.file_name.clone(),
        "manual_payroll".to_string(),
        request.period.clone(),
        None,
        None,
    );
    history.total_rows = employee_count;
    history.created_count = if created { 1 } else { 0 };
    history.updated_count = if created { 0 } else { 1 };
    history.status = ImportStatus::Completed;
    history.before_write();
    let import_id = a006_import_history::repository::insert(&history).await?;

    // Аудит подтвержденного списка
    let audit_rows: Vec<MatchRow> = request
        .employees
        .iter()
        .map(|row| MatchRow {
            id: Uuid::new_v4().to_string(),
            import_ref: import_id.to_string(),
            raw_external_id: row.external_id.clone(),
            raw_first_name: row.first_name.clone(),
            raw_last_name: row.last_name.clone(),
            matched_employee_ref: row.matched_employee_id.clone(),
            match_type: if row.matched_employee_id.is_some() {
                MatchType::Exact
            } else {
                MatchType::None
            },
            confidence: if row.matched_employee_id.is_some() { 100 } else { 0 },
            needs_review: false,
            total_hours: row.hours,
        })
        .collect();
    if let Err(err) = a006_import_history::match_rows::insert_many(&audit_rows).await {
        tracing::warn!("Match audit rows were not written: {}", err);
    }

    tracing::info!(
        "Confirmed monthly import: mandate={}, period={}, employees={}, total_cost={:.2}, created={}",
        mandate.base.code,
        request.period,
        employee_count,
        total_gross + social_charges,
        created
    );

    Ok(ConfirmedImportResponse {
        manual_entry_id,
        import_id: import_id.to_string(),
        created,
        employee_count,
        total_hours,
        total_gross,
        social_charges,
        total_cost: total_gross + social_charges,
    })
}
