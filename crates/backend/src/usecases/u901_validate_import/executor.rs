use contracts::enums::MatchType;
use contracts::usecases::u901_validate_import::{
    EmployeePreview, ImportStatistics, ValidateImportRequest, ValidateImportResponse,
};
use uuid::Uuid;

use crate::domain::{a001_mandate, a002_employee};
use crate::shared::config::payroll_config;
use crate::shared::payroll::calculator::{effective_rate, PayrollRates};
use crate::shared::payroll::errors::ImportError;
use crate::shared::payroll::matcher::{match_employee, review_reasons};
use crate::usecases::common::{group_rows, parse_row};

/// Проверка файла импорта: сопоставление и статистика без единой записи в базу
pub async fn execute(request: ValidateImportRequest) -> Result<ValidateImportResponse, ImportError> {
    let config = payroll_config();

    let mandate_id = Uuid::parse_str(&request.mandate_id)
        .map_err(|_| ImportError::MandateNotFound(request.mandate_id.clone()))?;
    let mandate = a001_mandate::service::get_by_id(mandate_id)
        .await?
        .ok_or_else(|| ImportError::MandateNotFound(request.mandate_id.clone()))?;

    let max_rows = config.max_import_rows();
    if request.rows.len() > max_rows {
        return Err(ImportError::TooManyRows {
            rows: request.rows.len(),
            max: max_rows,
        });
    }

    let candidates = a002_employee::service::list_by_mandate(&mandate.to_string_id()).await?;

    let mut rates = PayrollRates::from(config);
    if let Some(rate) = request.default_hourly_rate {
        rates.default_hourly_rate = rate;
    }

    let mut errors = Vec::new();
    let mut parsed = Vec::new();
    for (idx, raw) in request.rows.iter().enumerate() {
        match parse_row(idx, raw) {
            Ok(row) => parsed.push(row),
            Err(msg) => errors.push(msg),
        }
    }

    let groups = group_rows(parsed);

    let mut employees = Vec::with_capacity(groups.len());
    let mut statistics = ImportStatistics::default();

    for group in &groups {
        let outcome = match_employee(
            group.external_id.as_deref(),
            &group.first_name,
            &group.last_name,
            &candidates,
        );
        let total_hours = group.total_hours();

        let reasons = review_reasons(
            outcome.match_type,
            outcome.matched.map(|e| e.is_active),
            group.external_id.is_some(),
            total_hours,
            config.review_hours_threshold,
        );
        let needs_review = !reasons.is_empty();

        let proposed_rate = effective_rate(
            group.file_rate().or(outcome.matched.and_then(|e| e.hourly_rate)),
            mandate.default_hourly_rate,
            &rates,
        );

        statistics.total_employees += 1;
        match outcome.match_type {
            MatchType::Exact => statistics.exact_matches += 1,
            MatchType::Partial => statistics.partial_matches += 1,
            MatchType::None => statistics.no_matches += 1,
        }
        if needs_review {
            statistics.needs_review += 1;
        }
        statistics.total_hours += total_hours;
        statistics.estimated_total_cost +=
            total_hours * proposed_rate * (1.0 + rates.social_charge_rate);

        employees.push(EmployeePreview {
            raw_external_id: group.external_id.clone(),
            raw_first_name: group.first_name.clone(),
            raw_last_name: group.last_name.clone(),
            matched_employee_ref: outcome.matched.map(|e| e.to_string_id()),
            matched_employee_name: outcome.matched.map(|e| e.full_name()),
            match_type: outcome.match_type,
            confidence: outcome.confidence,
            needs_review,
            review_reasons: reasons,
            total_hours,
            proposed_rate,
        });
    }

    let can_proceed = statistics.needs_review == 0;

    tracing::info!(
        "Import validation for mandate {}: {} employees, {} need review, {} row errors",
        mandate.base.code,
        statistics.total_employees,
        statistics.needs_review,
        errors.len()
    );

    Ok(ValidateImportResponse {
        employees,
        statistics,
        errors,
        can_proceed,
    })
}
