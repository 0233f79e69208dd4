/// Форматирует число с разделителями тысяч (точками)
///
/// # Примеры
/// ```
/// use backend::shared::format::format_number;
/// assert_eq!(format_number(1234567), "1.234.567");
/// assert_eq!(format_number(42), "42");
/// assert_eq!(format_number(0), "0");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Доля `count` от `total` с одним знаком после запятой: `"37.5%"`.
///
/// При `total == 0` возвращает `"0%"`.
pub fn format_percentage(count: usize, total: usize) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", count as f64 / total as f64 * 100.0)
}

/// Округление до двух знаков (суммы и средние в статистике)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
