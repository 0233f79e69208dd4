//! Разбор и форматирование дат прогноза
//!
//! Даты приходят строками (`2025-03-21T00:00:00`, `2025-03-21`, RFC 3339).
//! Сравнивать их как текст нельзя, поэтому упорядочивание идёт через разбор.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const DATETIME_FORMATS: [&str; 9] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

// Американский порядок `MM/DD/YYYY` проверяется раньше `YYYY/MM/DD`
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

/// Разбор строки даты прогноза. Смещения приводятся к UTC.
pub fn parse_forecast_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Заголовок колонки: `MM/DD/YYYY`
/// Пример: "2025-03-21T00:00:00" -> "03/21/2025"
pub fn format_date_header(value: &str) -> String {
    match parse_forecast_date(value) {
        Some(dt) => dt.format("%m/%d/%Y").to_string(),
        None => value.to_string(),
    }
}

/// Длинная дата на испанском
/// Пример: "2025-03-21T00:00:00" -> "21 de marzo de 2025"
pub fn format_date_display(value: &str) -> String {
    match parse_forecast_date(value) {
        Some(dt) => format!(
            "{} de {} de {}",
            dt.day(),
            MONTHS_ES[dt.month0() as usize],
            dt.year()
        ),
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 3, 21)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_forecast_date("2025-03-21T00:00:00"), Some(expected));
        assert_eq!(parse_forecast_date("2025-03-21"), Some(expected));
        assert_eq!(parse_forecast_date("2025-03-21 00:00:00"), Some(expected));
        assert_eq!(parse_forecast_date("2025-03-21T00:00:00.000"), Some(expected));
        assert_eq!(parse_forecast_date("2025-03-21T00:00:00Z"), Some(expected));
        assert_eq!(parse_forecast_date("2025-03-21T02:00:00+02:00"), Some(expected));
    }

    #[test]
    fn test_parse_slash_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 21)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(parse_forecast_date("03/21/2024"), Some(expected));
        assert_eq!(parse_forecast_date("2024/03/21"), Some(expected));
        assert_eq!(parse_forecast_date("3/21/2024"), Some(expected));

        let with_time = NaiveDate::from_ymd_opt(2024, 3, 21)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap();
        assert_eq!(parse_forecast_date("03/21/2024 14:30:00"), Some(with_time));
        assert_eq!(parse_forecast_date("2024/03/21 14:30"), Some(with_time));

        assert_eq!(format_date_header("2024/03/21"), "03/21/2024");
        assert_eq!(format_date_display("03/21/2024"), "21 de marzo de 2024");
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(parse_forecast_date(""), None);
        assert_eq!(parse_forecast_date("tomorrow"), None);
        assert_eq!(parse_forecast_date("2025-13-01"), None);
    }

    #[test]
    fn test_format_header() {
        assert_eq!(format_date_header("2025-03-21T00:00:00"), "03/21/2025");
        assert_eq!(format_date_header("2025-12-01"), "12/01/2025");
        assert_eq!(format_date_header("invalid"), "invalid");
    }

    #[test]
    fn test_format_display() {
        assert_eq!(format_date_display("2025-03-21T00:00:00"), "21 de marzo de 2025");
        assert_eq!(format_date_display("2025-09-05"), "5 de septiembre de 2025");
        assert_eq!(format_date_display("invalid"), "invalid");
    }
}
