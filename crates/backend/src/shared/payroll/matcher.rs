use contracts::domain::a002_employee::Employee;
use contracts::enums::MatchType;

/// Результат сопоставления одной сырой строки с реестром сотрудников
#[derive(Debug, Clone)]
pub struct MatchOutcome<'a> {
    pub matched: Option<&'a Employee>,
    pub match_type: MatchType,
    /// 0..100
    pub confidence: i32,
}

// Пороговые баллы имен
const SCORE_FULL_NAME: i32 = 90;
const SCORE_ONE_NAME: i32 = 50;
const SCORE_SUBSTRING: i32 = 30;

/// Сопоставить сырую строку импорта с кандидатами
///
/// Совпадение по внешнему ID абсолютный приоритет: имена при нем не
/// проверяются. Иначе побеждает лучший балл по именам; при равенстве — первый
/// встреченный кандидат. Чистая функция: создание сотрудника при отсутствии
/// совпадения решает вызывающий
pub fn match_employee<'a>(
    external_id: Option<&str>,
    first_name: &str,
    last_name: &str,
    candidates: &'a [Employee],
) -> MatchOutcome<'a> {
    // 1. Точный внешний ID
    if let Some(ext_id) = external_id {
        let ext_id = ext_id.trim();
        if !ext_id.is_empty() {
            for candidate in candidates {
                if candidate
                    .external_id
                    .as_deref()
                    .map(|c| c.trim() == ext_id)
                    .unwrap_or(false)
                {
                    return MatchOutcome {
                        matched: Some(candidate),
                        match_type: MatchType::Exact,
                        confidence: 100,
                    };
                }
            }
        }
    }

    // 2. Балльное сравнение имен
    let norm_first = normalize_name(first_name);
    let norm_last = normalize_name(last_name);

    let mut best: Option<&Employee> = None;
    let mut best_score = 0;

    for candidate in candidates {
        let score = name_score(
            &norm_first,
            &norm_last,
            &normalize_name(&candidate.first_name),
            &normalize_name(&candidate.last_name),
        );
        // Строгое "больше" оставляет первого из равных
        if score > best_score {
            best_score = score;
            best = Some(candidate);
        }
    }

    let match_type = classify(best_score);
    MatchOutcome {
        matched: if match_type == MatchType::None {
            None
        } else {
            best
        },
        match_type,
        confidence: best_score,
    }
}

fn classify(score: i32) -> MatchType {
    if score >= SCORE_FULL_NAME {
        MatchType::Exact
    } else if score >= SCORE_SUBSTRING {
        MatchType::Partial
    } else {
        MatchType::None
    }
}

fn name_score(raw_first: &str, raw_last: &str, cand_first: &str, cand_last: &str) -> i32 {
    let first_eq = !raw_first.is_empty() && raw_first == cand_first;
    let last_eq = !raw_last.is_empty() && raw_last == cand_last;

    if first_eq && last_eq {
        return SCORE_FULL_NAME;
    }
    if first_eq || last_eq {
        return SCORE_ONE_NAME;
    }
    if contains_either(raw_first, cand_first)
        || contains_either(raw_last, cand_last)
        || contains_either(raw_first, cand_last)
        || contains_either(raw_last, cand_first)
    {
        return SCORE_SUBSTRING;
    }
    0
}

fn contains_either(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(b) || b.contains(a)
}

/// Нормализация имени: нижний регистр без диакритики и внешних пробелов
///
/// Источники дают "Jérôme"/"jerome"/"JEROME" для одного человека; таблица
/// покрывает латиницу с диакритикой из европейских раскладок
pub fn normalize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(fold_diacritic)
        .collect()
}

fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'æ' => 'a',
        'œ' => 'o',
        'ß' => 's',
        other => other,
    }
}

/// Причины ручной проверки для одного сотрудника файла
///
/// needs_review не блокирует импорт — только помечает строку для
/// подтверждения человеком
pub fn review_reasons(
    match_type: MatchType,
    matched_is_active: Option<bool>,
    has_external_id: bool,
    total_hours: f64,
    review_hours_threshold: f64,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if match_type != MatchType::Exact {
        reasons.push(format!(
            "Сопоставление не точное ({})",
            match_type.code()
        ));
    }
    if matched_is_active == Some(false) {
        reasons.push("Сотрудник неактивен".to_string());
    }
    if !has_external_id {
        reasons.push("В строке нет табельного номера".to_string());
    }
    if total_hours > review_hours_threshold {
        reasons.push(format!(
            "Часы за период превышают порог: {} > {}",
            total_hours, review_hours_threshold
        ));
    }

    reasons
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(external_id: Option<&str>, first: &str, last: &str) -> Employee {
        Employee::new_for_insert(
            format!("EMP-{}-{}", first, last),
            external_id.map(|s| s.to_string()),
            first.to_string(),
            last.to_string(),
            Some(20.0),
            "serveur".to_string(),
            "mandate-1".to_string(),
            None,
        )
    }

    #[test]
    fn test_external_id_wins_over_mismatched_names() {
        let candidates = vec![
            employee(Some("E-77"), "Marie", "Laurent"),
            employee(Some("E-42"), "Pierre", "Martin"),
        ];
        // Имена не совпадают вообще, но ID строки указывает на второго
        let outcome = match_employee(Some("E-42"), "Totally", "Different", &candidates);
        assert_eq!(outcome.match_type, MatchType::Exact);
        assert_eq!(outcome.confidence, 100);
        assert_eq!(outcome.matched.unwrap().external_id.as_deref(), Some("E-42"));
    }

    #[test]
    fn test_full_name_match_is_exact() {
        let candidates = vec![employee(None, "Jean", "Dupont")];
        let outcome = match_employee(None, "JEAN", "dupont", &candidates);
        assert_eq!(outcome.match_type, MatchType::Exact);
        assert_eq!(outcome.confidence, 90);
    }

    #[test]
    fn test_diacritics_are_ignored() {
        let candidates = vec![employee(None, "Jérôme", "Lefèvre")];
        let outcome = match_employee(None, "jerome", "lefevre", &candidates);
        assert_eq!(outcome.match_type, MatchType::Exact);
        assert_eq!(outcome.confidence, 90);
    }

    #[test]
    fn test_one_name_match_is_partial() {
        let candidates = vec![employee(None, "Jean", "Dupont")];
        let outcome = match_employee(None, "Jean", "Dupond", &candidates);
        assert_eq!(outcome.match_type, MatchType::Partial);
        assert_eq!(outcome.confidence, 50);
    }

    #[test]
    fn test_substring_match_is_partial() {
        let candidates = vec![employee(None, "Christophe", "Moreau")];
        let outcome = match_employee(None, "Chris", "Morel", &candidates);
        assert_eq!(outcome.match_type, MatchType::Partial);
        assert_eq!(outcome.confidence, 30);
    }

    #[test]
    fn test_no_match_returns_none_candidate() {
        let candidates = vec![employee(None, "Jean", "Dupont")];
        let outcome = match_employee(None, "Olga", "Schmidt", &candidates);
        assert_eq!(outcome.match_type, MatchType::None);
        assert_eq!(outcome.confidence, 0);
        assert!(outcome.matched.is_none());
    }

    #[test]
    fn test_tie_keeps_first_candidate() {
        let candidates = vec![
            employee(None, "Jean", "Martin"),
            employee(None, "Jean", "Morel"),
        ];
        // Оба дают 50 за совпавшее имя; победить должен первый
        let outcome = match_employee(None, "Jean", "Dupont", &candidates);
        assert_eq!(outcome.confidence, 50);
        assert_eq!(outcome.matched.unwrap().last_name, "Martin");
    }

    #[test]
    fn test_empty_names_do_not_score() {
        let candidates = vec![employee(None, "", "")];
        let outcome = match_employee(None, "", "", &candidates);
        assert_eq!(outcome.match_type, MatchType::None);
    }

    #[test]
    fn test_review_reasons_for_clean_exact_match() {
        let reasons = review_reasons(MatchType::Exact, Some(true), true, 160.0, 200.0);
        assert!(reasons.is_empty());
    }

    #[test]
    fn test_review_reasons_collects_all_flags() {
        let reasons = review_reasons(MatchType::Partial, Some(false), false, 210.0, 200.0);
        assert_eq!(reasons.len(), 4);
    }
}
