use super::domain::EmployeeCount;

/// Normalizes a raw employee figure to a whole number. Numbers truncate
/// toward zero; text keeps only its ASCII digits (`"~1,200 FTE"` is 1200).
pub fn parse_employees(value: Option<&EmployeeCount>) -> Option<i64> {
    match value? {
        EmployeeCount::Number(number) if number.is_finite() => Some(number.trunc() as i64),
        EmployeeCount::Number(_) => None,
        EmployeeCount::Text(text) => {
            let digits: String = text.chars().filter(char::is_ascii_digit).collect();
            if digits.is_empty() {
                None
            } else {
                digits.parse().ok()
            }
        }
    }
}

/// Trims a cell and strips invisible characters spreadsheets like to leave
/// behind. Empty cells become `None`.
pub(crate) fn clean_cell(value: &str) -> Option<String> {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let trimmed = cleaned.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Truncates to at most `limit` characters without splitting a code point.
pub(crate) fn truncate_chars(value: &str, limit: usize) -> String {
    match value.char_indices().nth(limit) {
        Some((index, _)) => value[..index].to_string(),
        None => value.to_string(),
    }
}
