use chrono::NaiveDate;
use contracts::usecases::common::RawTimeRow;

/// Строка импорта, прошедшая построчную валидацию
#[derive(Debug, Clone)]
pub struct ParsedRow {
    pub external_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub work_date: NaiveDate,
    pub clock_in: Option<String>,
    pub clock_out: Option<String>,
    pub break_minutes: i32,
    pub worked_hours: f64,
    pub hourly_rate: Option<f64>,
}

/// Все строки одного сотрудника внутри файла
#[derive(Debug, Clone)]
pub struct EmployeeGroup {
    pub external_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub rows: Vec<ParsedRow>,
}

impl EmployeeGroup {
    pub fn total_hours(&self) -> f64 {
        self.rows.iter().map(|r| r.worked_hours).sum()
    }

    /// Первая явная ставка из строк файла
    pub fn file_rate(&self) -> Option<f64> {
        self.rows.iter().find_map(|r| r.hourly_rate)
    }
}

fn trimmed(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Минуты из строки HH:MM
fn parse_clock(value: &str) -> Option<i32> {
    let (h, m) = value.split_once(':')?;
    let h: i32 = h.trim().parse().ok()?;
    let m: i32 = m.trim().parse().ok()?;
    if !(0..24).contains(&h) || !(0..60).contains(&m) {
        return None;
    }
    Some(h * 60 + m)
}

/// Построчная валидация сырой строки
///
/// Часы берутся из файла, а при их отсутствии выводятся из времен прихода и
/// ухода за вычетом перерыва. Ошибка не прерывает импорт: строка исключается,
/// сообщение попадает в список ошибок ответа
pub fn parse_row(index: usize, raw: &RawTimeRow) -> Result<ParsedRow, String> {
    let row_no = index + 1;

    let external_id = trimmed(&raw.external_id);
    let first_name = trimmed(&raw.first_name).unwrap_or_default();
    let last_name = trimmed(&raw.last_name).unwrap_or_default();

    if external_id.is_none() && first_name.is_empty() && last_name.is_empty() {
        return Err(format!(
            "Строка {}: нет ни табельного номера, ни имени",
            row_no
        ));
    }

    let date_str = trimmed(&raw.date)
        .ok_or_else(|| format!("Строка {}: не заполнена дата", row_no))?;
    let work_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| format!("Строка {}: дата '{}' не в формате YYYY-MM-DD", row_no, date_str))?;

    let break_minutes = raw.break_minutes.unwrap_or(0);
    if break_minutes < 0 {
        return Err(format!("Строка {}: перерыв отрицателен", row_no));
    }

    let clock_in = trimmed(&raw.clock_in);
    let clock_out = trimmed(&raw.clock_out);

    let worked_hours = match raw.worked_hours {
        Some(h) => h,
        None => {
            let start = clock_in
                .as_deref()
                .and_then(parse_clock)
                .ok_or_else(|| format!("Строка {}: нет ни часов, ни времени прихода", row_no))?;
            let end = clock_out
                .as_deref()
                .and_then(parse_clock)
                .ok_or_else(|| format!("Строка {}: нет ни часов, ни времени ухода", row_no))?;
            // Смена через полночь: уход раньше прихода означает следующий день
            let span = if end >= start { end - start } else { end + 24 * 60 - start };
            (span - break_minutes) as f64 / 60.0
        }
    };

    if worked_hours < 0.0 {
        return Err(format!("Строка {}: отработанные часы отрицательны", row_no));
    }

    Ok(ParsedRow {
        external_id,
        first_name,
        last_name,
        work_date,
        clock_in,
        clock_out,
        break_minutes,
        worked_hours,
        hourly_rate: raw.hourly_rate,
    })
}

/// Ключ группировки, регистронезависимый по именам
pub fn group_key(row: &ParsedRow) -> (String, String, String) {
    (
        row.external_id.clone().unwrap_or_default(),
        row.first_name.to_lowercase(),
        row.last_name.to_lowercase(),
    )
}

/// Группировка валидных строк по сотруднику с сохранением порядка файла
pub fn group_rows(rows: Vec<ParsedRow>) -> Vec<EmployeeGroup> {
    let mut groups: Vec<EmployeeGroup> = Vec::new();
    let mut index: std::collections::HashMap<(String, String, String), usize> =
        std::collections::HashMap::new();

    for row in rows {
        let key = group_key(&row);
        match index.get(&key) {
            Some(&i) => groups[i].rows.push(row),
            None => {
                index.insert(key, groups.len());
                groups.push(EmployeeGroup {
                    external_id: row.external_id.clone(),
                    first_name: row.first_name.clone(),
                    last_name: row.last_name.clone(),
                    rows: vec![row],
                });
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(first: &str, last: &str, date: &str, hours: Option<f64>) -> RawTimeRow {
        RawTimeRow {
            external_id: None,
            first_name: Some(first.to_string()),
            last_name: Some(last.to_string()),
            date: Some(date.to_string()),
            worked_hours: hours,
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_row_rejects_missing_identity() {
        let row = RawTimeRow {
            date: Some("2025-06-02".to_string()),
            worked_hours: Some(8.0),
            ..Default::default()
        };
        let err = parse_row(0, &row).unwrap_err();
        assert!(err.contains("Строка 1"));
    }

    #[test]
    fn test_parse_row_rejects_bad_date() {
        let row = raw("Anna", "Muster", "02.06.2025", Some(8.0));
        assert!(parse_row(4, &row).unwrap_err().contains("Строка 5"));
    }

    #[test]
    fn test_hours_derived_from_clock_times() {
        let mut row = raw("Anna", "Muster", "2025-06-02", None);
        row.clock_in = Some("09:00".to_string());
        row.clock_out = Some("17:30".to_string());
        row.break_minutes = Some(30);
        let parsed = parse_row(0, &row).unwrap();
        assert!((parsed.worked_hours - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_hours_derived_across_midnight() {
        let mut row = raw("Nachtschicht", "Mitarbeiter", "2025-06-02", None);
        row.clock_in = Some("22:00".to_string());
        row.clock_out = Some("06:00".to_string());
        let parsed = parse_row(0, &row).unwrap();
        assert!((parsed.worked_hours - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_hours_rejected() {
        let row = raw("Anna", "Muster", "2025-06-02", Some(-2.0));
        assert!(parse_row(0, &row).is_err());
    }

    #[test]
    fn test_large_hour_totals_pass_through() {
        // Источник может отдавать агрегат за несколько смен одной строкой;
        // подозрительные объемы ловит порог проверки, а не парсер
        let row = raw("Anna", "Muster", "2025-06-02", Some(45.0));
        let parsed = parse_row(0, &row).unwrap();
        assert!((parsed.worked_hours - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_grouping_is_case_insensitive_and_stable() {
        let rows = vec![
            parse_row(0, &raw("Anna", "Muster", "2025-06-02", Some(8.0))).unwrap(),
            parse_row(1, &raw("Bruno", "Keller", "2025-06-02", Some(6.0))).unwrap(),
            parse_row(2, &raw("ANNA", "MUSTER", "2025-06-03", Some(7.5))).unwrap(),
        ];
        let groups = group_rows(rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].first_name, "Anna");
        assert!((groups[0].total_hours() - 15.5).abs() < 1e-9);
        assert_eq!(groups[1].first_name, "Bruno");
    }
}
