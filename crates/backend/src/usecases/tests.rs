//! Сквозной сценарий: проверка, импорт, расчет, подтвержденный месяц.
//!
//! Один тест на одну тестовую базу: глобальное подключение инициализируется
//! один раз, шаги идут последовательно и проверяют состояние после каждого

use chrono::NaiveDate;
use contracts::domain::a001_mandate::MandateDto;
use contracts::domain::a002_employee::EmployeeDto;
use contracts::enums::{ImportStatus, MatchType, PeriodType};
use contracts::usecases::common::RawTimeRow;
use contracts::usecases::u901_validate_import::ValidateImportRequest;
use contracts::usecases::u902_import_time_records::ImportTimeRecordsRequest;
use contracts::usecases::u903_calculate_payroll::CalculatePayrollRequest;
use contracts::usecases::u904_confirmed_import::{ConfirmedImportRequest, ReviewedEmployeeRow};
use uuid::Uuid;

use crate::domain::{a001_mandate, a002_employee, a003_time_record, a004_payroll_entry};
use crate::shared::data::db::initialize_database;
use crate::shared::payroll::errors::ImportError;
use crate::usecases::{
    u901_validate_import, u902_import_time_records, u903_calculate_payroll, u904_confirmed_import,
};

fn raw_row(
    external_id: Option<&str>,
    first: &str,
    last: &str,
    date: &str,
    hours: f64,
) -> RawTimeRow {
    RawTimeRow {
        external_id: external_id.map(str::to_string),
        first_name: Some(first.to_string()),
        last_name: Some(last.to_string()),
        date: Some(date.to_string()),
        worked_hours: Some(hours),
        ..Default::default()
    }
}

fn timesheet_rows() -> Vec<RawTimeRow> {
    let mut rows = Vec::new();
    // Анна: источник отдает неделю одной строкой с 45 часами
    rows.push(raw_row(Some("E-1"), "Anna", "Muster", "2025-06-02", 45.0));
    // Бруно: без табельного номера, сопоставление по полному имени;
    // первая строка несет явную ставку из файла
    let mut bruno = raw_row(None, "Bruno", "Keller", "2025-06-03", 8.0);
    bruno.hourly_rate = Some(21.0);
    rows.push(bruno);
    rows.push(raw_row(None, "Bruno", "Keller", "2025-06-04", 8.0));
    // Клара: в реестре нет, будет создана импортом
    rows.push(raw_row(None, "Clara", "Neu", "2025-06-05", 4.0));
    // Невалидная строка: дата не в ISO-формате
    rows.push(raw_row(None, "Kaputt", "Datum", "05.06.2025", 8.0));
    rows
}

async fn seed_mandate_and_employees() -> String {
    let mandate_id = a001_mandate::service::create(MandateDto {
        id: None,
        code: None,
        description: "Restaurant Seeblick".to_string(),
        comment: None,
        address: Some("Seestrasse 1".to_string()),
        default_hourly_rate: Some(22.0),
    })
    .await
    .unwrap();

    a002_employee::service::create(EmployeeDto {
        id: None,
        code: None,
        comment: None,
        external_id: Some("E-1".to_string()),
        first_name: "Anna".to_string(),
        last_name: "Muster".to_string(),
        hourly_rate: Some(20.0),
        position: Some("Service".to_string()),
        is_active: Some(true),
        mandate_ref: Some(mandate_id.to_string()),
    })
    .await
    .unwrap();

    a002_employee::service::create(EmployeeDto {
        id: None,
        code: None,
        comment: None,
        external_id: None,
        first_name: "Bruno".to_string(),
        last_name: "Keller".to_string(),
        hourly_rate: None,
        position: Some("Küche".to_string()),
        is_active: Some(true),
        mandate_ref: Some(mandate_id.to_string()),
    })
    .await
    .unwrap();

    mandate_id.to_string()
}

#[tokio::test]
async fn test_full_import_and_payroll_flow() {
    let db_file = std::env::temp_dir().join(format!("payroll_core_test_{}.db", Uuid::new_v4()));
    initialize_database(db_file.to_str()).await.unwrap();

    let mandate_id = seed_mandate_and_employees().await;

    // --- u901: проверка без записи ---
    let validation = u901_validate_import::executor::execute(ValidateImportRequest {
        mandate_id: mandate_id.clone(),
        file_name: "juni.xlsx".to_string(),
        default_hourly_rate: None,
        rows: timesheet_rows(),
    })
    .await
    .unwrap();

    assert_eq!(validation.statistics.total_employees, 3);
    assert_eq!(validation.statistics.exact_matches, 2);
    assert_eq!(validation.statistics.no_matches, 1);
    assert_eq!(validation.errors.len(), 1);
    assert!(!validation.can_proceed);

    let anna = validation
        .employees
        .iter()
        .find(|e| e.raw_first_name == "Anna")
        .unwrap();
    assert_eq!(anna.match_type, MatchType::Exact);
    assert_eq!(anna.confidence, 100);
    assert!(!anna.needs_review);
    assert!((anna.total_hours - 45.0).abs() < 1e-9);
    assert!((anna.proposed_rate - 20.0).abs() < 1e-9);

    let bruno = validation
        .employees
        .iter()
        .find(|e| e.raw_first_name == "Bruno")
        .unwrap();
    assert_eq!(bruno.match_type, MatchType::Exact);
    assert_eq!(bruno.confidence, 90);
    // Нет табельного номера: флаг проверки поднят, но импорт не блокируется
    assert!(bruno.needs_review);
    // Явная ставка из строки файла важнее ставки заведения
    assert!((bruno.proposed_rate - 21.0).abs() < 1e-9);

    // Проверка ничего не пишет
    assert!(a003_time_record::repository::list_by_mandate(&mandate_id)
        .await
        .unwrap()
        .is_empty());

    // --- u902: импорт ---
    let import = u902_import_time_records::executor::execute(ImportTimeRecordsRequest {
        mandate_id: mandate_id.clone(),
        file_name: "juni.xlsx".to_string(),
        import_source: "timesheet_xlsx".to_string(),
        default_hourly_rate: Some(18.0),
        create_missing_employees: true,
        rows: timesheet_rows(),
    })
    .await
    .unwrap();

    assert_eq!(import.created, 4);
    assert_eq!(import.updated, 0);
    // Невалидная строка попадает только в errors, не в skipped
    assert_eq!(import.skipped, 0);
    assert_eq!(import.errors.len(), 1);
    assert_eq!(import.status, ImportStatus::Partial);

    let employees = a002_employee::repository::list_by_mandate(&mandate_id)
        .await
        .unwrap();
    assert_eq!(employees.len(), 3, "Клара создана импортом");

    // Ставка из строки файла записана в карточку Бруно
    let bruno_card = employees
        .iter()
        .find(|e| e.first_name == "Bruno")
        .unwrap();
    assert_eq!(bruno_card.hourly_rate, Some(21.0));

    // Клара создана без ставки в файле: берется ставка из запроса
    let clara_card = employees
        .iter()
        .find(|e| e.first_name == "Clara")
        .unwrap();
    assert_eq!(clara_card.hourly_rate, Some(18.0));

    // --- Повторный импорт того же файла: обновление на месте ---
    let second = u902_import_time_records::executor::execute(ImportTimeRecordsRequest {
        mandate_id: mandate_id.clone(),
        file_name: "juni.xlsx".to_string(),
        import_source: "timesheet_xlsx".to_string(),
        default_hourly_rate: None,
        create_missing_employees: true,
        rows: timesheet_rows(),
    })
    .await
    .unwrap();

    assert_eq!(second.created, 0);
    assert_eq!(second.updated, 4);
    assert_eq!(
        a003_time_record::repository::list_by_mandate(&mandate_id)
            .await
            .unwrap()
            .len(),
        4
    );
    assert_eq!(
        a002_employee::repository::list_by_mandate(&mandate_id)
            .await
            .unwrap()
            .len(),
        3,
        "повтор не плодит сотрудников"
    );

    // --- Лимит строк: отказ до первой записи ---
    let oversized = u902_import_time_records::executor::execute(ImportTimeRecordsRequest {
        mandate_id: mandate_id.clone(),
        file_name: "huge.xlsx".to_string(),
        import_source: String::new(),
        default_hourly_rate: None,
        create_missing_employees: true,
        rows: vec![RawTimeRow::default(); 10_001],
    })
    .await;
    match oversized {
        Err(ImportError::TooManyRows { rows, max }) => {
            assert_eq!(rows, 10_001);
            assert_eq!(max, 10_000);
        }
        other => panic!("ожидался TooManyRows, получено {:?}", other.map(|_| ())),
    }

    // --- u903: недельный расчет ---
    let week_start = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let week_end = NaiveDate::from_ymd_opt(2025, 6, 8).unwrap();
    let payroll = u903_calculate_payroll::executor::execute(CalculatePayrollRequest {
        mandate_id: None,
        period_start: week_start,
        period_end: week_end,
        period_type: PeriodType::Weekly,
        recalculate: false,
    })
    .await
    .unwrap();

    assert_eq!(payroll.mandates.len(), 1);
    assert_eq!(payroll.locked_skipped, 0);
    assert!((payroll.totals.total_hours - 65.0).abs() < 1e-9);

    // 45 часов по ставке 20: 40 обычных + 5 сверхурочных с множителем 1.25
    let anna_ref = employees
        .iter()
        .find(|e| e.first_name == "Anna")
        .unwrap()
        .to_string_id();
    let anna_entry = a004_payroll_entry::repository::get_by_natural_key(
        &anna_ref,
        &mandate_id,
        week_start,
        PeriodType::Weekly,
    )
    .await
    .unwrap()
    .unwrap();
    assert!((anna_entry.regular_hours - 40.0).abs() < 1e-9);
    assert!((anna_entry.overtime_hours - 5.0).abs() < 1e-9);
    assert!((anna_entry.base_salary - 800.0).abs() < 1e-9);
    assert!((anna_entry.overtime_pay - 125.0).abs() < 1e-9);
    assert!((anna_entry.total_gross - 925.0).abs() < 1e-9);
    assert!((anna_entry.social_charges - 203.5).abs() < 1e-9);
    assert!((anna_entry.total_cost - 1128.5).abs() < 1e-9);
    assert!(anna_entry.validate().is_ok());

    // Кэш стоимости труда заведения пересчитан
    let mandate = a001_mandate::service::get_by_id(Uuid::parse_str(&mandate_id).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!((mandate.total_payroll_cost - payroll.totals.total_cost).abs() < 1e-6);
    assert!(mandate.last_payroll_calculation.is_some());

    // --- Блокировка: без флага recalculate запись не пересчитывается ---
    a004_payroll_entry::repository::set_locked(anna_entry.base.id.value(), true)
        .await
        .unwrap();

    let locked_run = u903_calculate_payroll::executor::execute(CalculatePayrollRequest {
        mandate_id: Some(mandate_id.clone()),
        period_start: week_start,
        period_end: week_end,
        period_type: PeriodType::Weekly,
        recalculate: false,
    })
    .await
    .unwrap();
    assert_eq!(locked_run.locked_skipped, 1);

    let forced_run = u903_calculate_payroll::executor::execute(CalculatePayrollRequest {
        mandate_id: Some(mandate_id.clone()),
        period_start: week_start,
        period_end: week_end,
        period_type: PeriodType::Weekly,
        recalculate: true,
    })
    .await
    .unwrap();
    assert_eq!(forced_run.locked_skipped, 0);

    // Блокировка пережила пересчет
    let after_forced = a004_payroll_entry::repository::get_by_natural_key(
        &anna_ref,
        &mandate_id,
        week_start,
        PeriodType::Weekly,
    )
    .await
    .unwrap()
    .unwrap();
    assert!(after_forced.is_locked);

    // --- u904: подтвержденный месячный импорт ---
    let confirmed_request = ConfirmedImportRequest {
        mandate_id: mandate_id.clone(),
        period: "2025-06".to_string(),
        file_name: "monat.xlsx".to_string(),
        employees: vec![
            ReviewedEmployeeRow {
                matched_employee_id: Some(anna_ref.clone()),
                external_id: Some("E-1".to_string()),
                first_name: "Anna".to_string(),
                last_name: "Muster".to_string(),
                hours: 100.0,
                rate: Some(20.0),
            },
            ReviewedEmployeeRow {
                matched_employee_id: None,
                external_id: None,
                first_name: "Bruno".to_string(),
                last_name: "Keller".to_string(),
                hours: 50.0,
                rate: None,
            },
        ],
        social_charge_rate: None,
    };

    let confirmed = u904_confirmed_import::executor::execute(confirmed_request.clone())
        .await
        .unwrap();
    assert!(confirmed.created);
    assert_eq!(confirmed.employee_count, 2);
    assert!((confirmed.total_hours - 150.0).abs() < 1e-9);
    // 100 * 20 + 50 * 22 (ставка заведения)
    assert!((confirmed.total_gross - 3100.0).abs() < 1e-9);
    assert!((confirmed.social_charges - 682.0).abs() < 1e-9);
    assert!((confirmed.total_cost - 3782.0).abs() < 1e-9);

    // Повтор месяца замещает итоги, id записи сохраняется
    let repeat = u904_confirmed_import::executor::execute(confirmed_request)
        .await
        .unwrap();
    assert!(!repeat.created);
    assert_eq!(repeat.manual_entry_id, confirmed.manual_entry_id);

    // Период не в формате YYYY-MM
    let bad_period = u904_confirmed_import::executor::execute(ConfirmedImportRequest {
        mandate_id: mandate_id.clone(),
        period: "06-2025".to_string(),
        file_name: String::new(),
        employees: Vec::new(),
        social_charge_rate: None,
    })
    .await;
    assert!(matches!(bad_period, Err(ImportError::InvalidRequest(_))));

    // Несуществующее заведение: предусловие, а не ошибка хранилища
    let missing = u901_validate_import::executor::execute(ValidateImportRequest {
        mandate_id: Uuid::new_v4().to_string(),
        file_name: String::new(),
        default_hourly_rate: None,
        rows: Vec::new(),
    })
    .await;
    match missing {
        Err(err) => assert!(err.is_precondition()),
        Ok(_) => panic!("ожидался MandateNotFound"),
    }

    let _ = std::fs::remove_file(&db_file);
}
