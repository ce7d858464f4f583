use std::collections::HashMap;

use contracts::domain::a002_employee::Employee;
use contracts::domain::a003_time_record::TimeRecord;
use contracts::domain::a006_import_history::{ImportHistory, MatchRow};
use contracts::enums::ImportStatus;
use contracts::usecases::u902_import_time_records::{
    ImportTimeRecordsRequest, ImportTimeRecordsResponse,
};
use sea_orm::TransactionTrait;
use uuid::Uuid;

use crate::domain::common::UpsertOutcome;
use crate::domain::{
    a001_mandate, a002_employee, a003_time_record, a006_import_history,
};
use crate::shared::config::payroll_config;
use crate::shared::data::db::get_connection;
use crate::shared::payroll::errors::ImportError;
use crate::shared::payroll::matcher::{match_employee, review_reasons};
use crate::usecases::common::{group_key, group_rows, parse_row, ParsedRow};

/// Сопоставленный сотрудник одной группы строк файла
struct ResolvedGroup {
    /// None — сопоставления нет и создание выключено
    employee_ref: Option<String>,
    /// Сотрудника нужно создать в транзакции первого чанка с его строками
    pending: Option<Employee>,
    /// Карточка с новой ставкой из файла, ждет транзакции первого чанка
    rate_update: Option<Employee>,
    audit: MatchRow,
}

/// Отложенная запись по сотруднику внутри транзакции чанка
enum EmployeeWrite {
    Create(Employee),
    RateUpdate(Employee),
}

/// Подтвержденный импорт записей времени
///
/// Предусловия отклоняют запрос целиком до первой записи. Дальше строки
/// пишутся чанками, каждый чанк — одна транзакция: упавший чанк откатывается
/// и попадает в ошибки, остальные остаются. Повтор того же файла безопасен:
/// ключ (сотрудник, дата, заведение) обновляется на месте
pub async fn execute(
    request: ImportTimeRecordsRequest,
) -> Result<ImportTimeRecordsResponse, ImportError> {
    let config = payroll_config();

    let mandate_id = Uuid::parse_str(&request.mandate_id)
        .map_err(|_| ImportError::MandateNotFound(request.mandate_id.clone()))?;
    let mandate = a001_mandate::service::get_by_id(mandate_id)
        .await?
        .ok_or_else(|| ImportError::MandateNotFound(request.mandate_id.clone()))?;
    let mandate_ref = mandate.to_string_id();

    let max_rows = config.max_import_rows();
    if request.rows.len() > max_rows {
        return Err(ImportError::TooManyRows {
            rows: request.rows.len(),
            max: max_rows,
        });
    }

    tracing::info!(
        "Time record import started: mandate={}, file={}, rows={}",
        mandate.base.code,
        request.file_name,
        request.rows.len()
    );

    // Построчная валидация; невалидные строки не прерывают импорт
    let mut errors: Vec<String> = Vec::new();
    let mut parsed: Vec<ParsedRow> = Vec::new();
    for (idx, raw) in request.rows.iter().enumerate() {
        match parse_row(idx, raw) {
            Ok(row) => parsed.push(row),
            Err(msg) => errors.push(msg),
        }
    }
    let period_start = parsed.iter().map(|r| r.work_date).min();
    let period_end = parsed.iter().map(|r| r.work_date).max();
    let period_label = match (period_start, period_end) {
        (Some(s), Some(e)) => format!("{} / {}", s, e),
        _ => String::new(),
    };

    // Сопоставление групп с реестром до начала записи
    let candidates = a002_employee::service::list_by_mandate(&mandate_ref).await?;
    let groups = group_rows(parsed.clone());
    let mut resolved: HashMap<(String, String, String), ResolvedGroup> = HashMap::new();

    for group in &groups {
        let outcome = match_employee(
            group.external_id.as_deref(),
            &group.first_name,
            &group.last_name,
            &candidates,
        );
        let total_hours = group.total_hours();
        let needs_review = !review_reasons(
            outcome.match_type,
            outcome.matched.map(|e| e.is_active),
            group.external_id.is_some(),
            total_hours,
            config.review_hours_threshold,
        )
        .is_empty();

        let (employee_ref, pending, rate_update) = match outcome.matched {
            Some(found) => {
                // Явная ставка из строк файла обновляет карточку сотрудника
                let rate_update = match group.file_rate() {
                    Some(rate) if found.hourly_rate != Some(rate) => {
                        let mut updated = found.clone();
                        updated.hourly_rate = Some(rate);
                        Some(updated)
                    }
                    _ => None,
                };
                (Some(found.to_string_id()), None, rate_update)
            }
            None if request.create_missing_employees => {
                let mut employee = Employee::new_for_insert(
                    a002_employee::service::generate_code(),
                    group.external_id.clone(),
                    group.first_name.clone(),
                    group.last_name.clone(),
                    group.file_rate().or(request.default_hourly_rate),
                    String::new(),
                    mandate_ref.clone(),
                    Some(format!("Создан импортом {}", request.file_name)),
                );
                employee.before_write();
                (Some(employee.to_string_id()), Some(employee), None)
            }
            None => {
                errors.push(format!(
                    "Сотрудник '{} {}' не сопоставлен, строки пропущены",
                    group.first_name, group.last_name
                ));
                (None, None, None)
            }
        };

        let key = (
            group.external_id.clone().unwrap_or_default(),
            group.first_name.to_lowercase(),
            group.last_name.to_lowercase(),
        );
        resolved.insert(
            key,
            ResolvedGroup {
                employee_ref: employee_ref.clone(),
                pending,
                rate_update,
                audit: MatchRow {
                    id: Uuid::new_v4().to_string(),
                    import_ref: String::new(),
                    raw_external_id: group.external_id.clone(),
                    raw_first_name: group.first_name.clone(),
                    raw_last_name: group.last_name.clone(),
                    matched_employee_ref: employee_ref,
                    match_type: outcome.match_type,
                    confidence: outcome.confidence,
                    needs_review,
                    total_hours,
                },
            },
        );
    }

    // Запись истории: с этого момента запуск виден в аудите как PENDING
    let history_code = format!("IMP-{}", &Uuid::new_v4().to_string()[..8]);
    let mut history = ImportHistory::new_for_insert(
        history_code,
        mandate_ref.clone(),
        request.file_name.clone(),
        "time_records".to_string(),
        period_label,
        period_start,
        period_end,
    );
    history.before_write();
    let import_id = a006_import_history::repository::insert(&history).await?;

    let import_source = if request.import_source.is_empty() {
        "file_import".to_string()
    } else {
        request.import_source.clone()
    };

    let mut created = 0;
    let mut updated = 0;
    let mut skipped = 0;

    let db = get_connection();
    let chunk_size = config.import_batch_size.max(1);

    for (chunk_no, chunk) in parsed.chunks(chunk_size).enumerate() {
        match write_chunk(
            db,
            chunk,
            &mut resolved,
            &mandate_ref,
            &import_source,
            &import_id.to_string(),
        )
        .await
        {
            Ok(outcome) => {
                created += outcome.created;
                updated += outcome.updated;
                skipped += outcome.skipped;
                errors.extend(outcome.errors);
            }
            Err(err) => {
                skipped += chunk.len() as i32;
                let msg = format!(
                    "Чанк {} ({} строк) откатился: {}",
                    chunk_no + 1,
                    chunk.len(),
                    err
                );
                tracing::error!("{}", msg);
                errors.push(msg);
            }
        }
    }

    // Аудит сопоставления пишется независимо от судьбы чанков
    let mut audit_rows: Vec<MatchRow> = resolved
        .into_values()
        .map(|g| {
            let mut row = g.audit;
            row.import_ref = import_id.to_string();
            row
        })
        .collect();
    audit_rows.sort_by(|a, b| {
        (a.raw_last_name.clone(), a.raw_first_name.clone())
            .cmp(&(b.raw_last_name.clone(), b.raw_first_name.clone()))
    });
    if let Err(err) = a006_import_history::match_rows::insert_many(&audit_rows).await {
        tracing::warn!("Match audit rows were not written: {}", err);
    }

    // Кэш последней отработанной даты заведения
    if created + updated > 0 {
        let last_date = a003_time_record::repository::max_work_date(&mandate_ref).await?;
        a001_mandate::repository::update_last_entry_date(mandate.base.id.value(), last_date)
            .await?;
    }

    let status = if errors.is_empty() {
        ImportStatus::Completed
    } else if created + updated > 0 {
        ImportStatus::Partial
    } else {
        ImportStatus::Failed
    };

    history.total_rows = request.rows.len() as i32;
    history.created_count = created;
    history.updated_count = updated;
    history.skipped_count = skipped;
    history.error_count = errors.len() as i32;
    history.status = status;
    a006_import_history::repository::update_counts_and_status(&history).await?;

    tracing::info!(
        "Time record import finished: import_id={}, created={}, updated={}, skipped={}, errors={}, status={:?}",
        import_id,
        created,
        updated,
        history.skipped_count,
        errors.len(),
        status
    );

    Ok(ImportTimeRecordsResponse {
        import_id: import_id.to_string(),
        created,
        updated,
        skipped: history.skipped_count,
        errors,
        status,
    })
}

struct ChunkOutcome {
    created: i32,
    updated: i32,
    skipped: i32,
    errors: Vec<String>,
}

/// Один чанк = одна транзакция SQLite
///
/// При откате записи по сотрудникам (создание, смена ставки) возвращаются в
/// отложенное состояние: следующий чанк с их строками применит их заново
async fn write_chunk(
    db: &sea_orm::DatabaseConnection,
    chunk: &[ParsedRow],
    resolved: &mut HashMap<(String, String, String), ResolvedGroup>,
    mandate_ref: &str,
    import_source: &str,
    import_batch_ref: &str,
) -> anyhow::Result<ChunkOutcome> {
    let txn = db.begin().await?;
    let mut taken: Vec<((String, String, String), EmployeeWrite)> = Vec::new();

    let applied = apply_chunk(
        &txn,
        chunk,
        resolved,
        &mut taken,
        mandate_ref,
        import_source,
        import_batch_ref,
    )
    .await;

    match applied {
        Ok(outcome) => match txn.commit().await {
            Ok(()) => Ok(outcome),
            Err(err) => {
                restore_pending(resolved, taken);
                Err(err.into())
            }
        },
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                tracing::error!("Chunk rollback failed: {}", rollback_err);
            }
            restore_pending(resolved, taken);
            Err(err)
        }
    }
}

fn restore_pending(
    resolved: &mut HashMap<(String, String, String), ResolvedGroup>,
    taken: Vec<((String, String, String), EmployeeWrite)>,
) {
    for (key, write) in taken {
        if let Some(group) = resolved.get_mut(&key) {
            match write {
                EmployeeWrite::Create(employee) => group.pending = Some(employee),
                EmployeeWrite::RateUpdate(employee) => group.rate_update = Some(employee),
            }
        }
    }
}

async fn apply_chunk(
    txn: &sea_orm::DatabaseTransaction,
    chunk: &[ParsedRow],
    resolved: &mut HashMap<(String, String, String), ResolvedGroup>,
    taken: &mut Vec<((String, String, String), EmployeeWrite)>,
    mandate_ref: &str,
    import_source: &str,
    import_batch_ref: &str,
) -> anyhow::Result<ChunkOutcome> {
    let mut outcome = ChunkOutcome {
        created: 0,
        updated: 0,
        skipped: 0,
        errors: Vec::new(),
    };

    for row in chunk {
        let key = group_key(row);
        let group = match resolved.get_mut(&key) {
            Some(g) => g,
            None => {
                outcome.skipped += 1;
                continue;
            }
        };

        let employee_ref = match &group.employee_ref {
            Some(r) => r.clone(),
            None => {
                outcome.skipped += 1;
                continue;
            }
        };

        // Создание недостающего сотрудника в транзакции его первого чанка
        if let Some(pending) = group.pending.take() {
            taken.push((key.clone(), EmployeeWrite::Create(pending.clone())));
            a002_employee::repository::insert_txn(txn, &pending).await?;
        }

        // Смена ставки в карточке применяется там же, где и его строки
        if let Some(mut changed) = group.rate_update.take() {
            taken.push((key.clone(), EmployeeWrite::RateUpdate(changed.clone())));
            changed.before_write();
            a002_employee::repository::update_txn(txn, &changed).await?;
        }

        let mut record = TimeRecord::new_for_insert(
            format!("TRC-{}", &Uuid::new_v4().to_string()[..8]),
            employee_ref,
            mandate_ref.to_string(),
            row.work_date,
            row.clock_in.clone(),
            row.clock_out.clone(),
            row.break_minutes,
            row.worked_hours,
            row.hourly_rate,
            import_source.to_string(),
            Some(import_batch_ref.to_string()),
        );
        record.before_write();

        match a003_time_record::repository::upsert_by_natural_key_txn(txn, &record).await? {
            UpsertOutcome::Created => outcome.created += 1,
            UpsertOutcome::Updated => outcome.updated += 1,
            UpsertOutcome::Conflict => {
                outcome.skipped += 1;
                outcome.errors.push(format!(
                    "Строка {} / {}: ключ уже занят, пропущена",
                    row.work_date, record.employee_ref
                ));
            }
        }
    }

    Ok(outcome)
}
