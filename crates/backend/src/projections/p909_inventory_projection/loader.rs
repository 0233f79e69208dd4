use contracts::projections::p909_inventory_projection::dto::InventoryRecordDto;
use serde_json::{Map, Value};
use std::path::Path;
use thiserror::Error;

use super::error::ProjectionError;

/// Корневое поле с массивом записей
pub const ROOT_FIELD: &str = "Datos";

/// Результат загрузки: валидные записи и число отброшенных
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub records: Vec<InventoryRecordDto>,
    pub dropped: usize,
}

/// Причина отбраковки записи (только для лога)
#[derive(Debug, Error, PartialEq)]
enum RejectReason {
    #[error("missing or empty field {0}")]
    MissingField(&'static str),

    #[error("field {0} is not a finite number")]
    NotNumeric(&'static str),

    #[error("field {0} is negative")]
    Negative(&'static str),
}

pub fn load_from_path(path: &Path) -> Result<LoadReport, ProjectionError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ProjectionError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!("P909: loading projection data from {}", path.display());
    load_from_str(&contents)
}

pub fn load_from_str(json: &str) -> Result<LoadReport, ProjectionError> {
    let value: Value = serde_json::from_str(json)?;
    load_from_value(value)
}

/// Принимает `{ "Datos": [...] }` или просто массив.
pub fn load_from_value(value: Value) -> Result<LoadReport, ProjectionError> {
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(mut root) => match root.remove(ROOT_FIELD) {
            Some(Value::Array(entries)) => entries,
            Some(_) => {
                return Err(ProjectionError::InvalidFormat(format!(
                    "field {} is not an array",
                    ROOT_FIELD
                )))
            }
            None => {
                return Err(ProjectionError::InvalidFormat(format!(
                    "field {} is missing",
                    ROOT_FIELD
                )))
            }
        },
        _ => {
            return Err(ProjectionError::InvalidFormat(
                "expected an object or an array".to_string(),
            ))
        }
    };

    Ok(validate_entries(&entries))
}

/// Приведение типов, проверка и присвоение id.
///
/// Не-объекты пропускаются без расхода индекса; отброшенный объект индекс
/// расходует, поэтому id привязан к позиции в источнике.
pub fn validate_entries(entries: &[Value]) -> LoadReport {
    let mut report = LoadReport::default();

    for (index, item) in entries.iter().filter_map(Value::as_object).enumerate() {
        match to_record(item, index) {
            Ok(record) => report.records.push(record),
            Err(reason) => {
                tracing::debug!("P909: dropping entry #{}: {}", index, reason);
                report.dropped += 1;
            }
        }
    }

    let skipped = entries.len() - entries.iter().filter(|v| v.is_object()).count();
    report.dropped += skipped;

    if report.dropped > 0 {
        tracing::warn!(
            "P909: {} of {} entries dropped during validation",
            report.dropped,
            entries.len()
        );
    }
    tracing::info!("P909: {} records loaded", report.records.len());

    report
}

fn to_record(item: &Map<String, Value>, index: usize) -> Result<InventoryRecordDto, RejectReason> {
    let center_code = required_string(item, "CenterCode")?;
    let reference = required_string(item, "Reference")?;
    let forecast_date = required_string(item, "VisibleForecastedDate")?;

    let net_flow = number_field(item, "NetFlow")?;
    let red_zone = non_negative_field(item, "RedZone")?;
    let yellow_zone = non_negative_field(item, "YellowZone")?;
    let green_zone = non_negative_field(item, "GreenZone")?;
    let make_to_order = non_negative_field(item, "MakeToOrder")?;

    Ok(InventoryRecordDto {
        id: format!("{}-{}-{}", center_code, reference, index),
        center_code,
        reference,
        forecast_date,
        net_flow,
        red_zone,
        yellow_zone,
        green_zone,
        make_to_order,
    })
}

fn required_string(item: &Map<String, Value>, field: &'static str) -> Result<String, RejectReason> {
    match item.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        _ => Err(RejectReason::MissingField(field)),
    }
}

fn number_field(item: &Map<String, Value>, field: &'static str) -> Result<f64, RejectReason> {
    match item.get(field) {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(0.0),
        Some(value) => number_from_value(value).ok_or(RejectReason::NotNumeric(field)),
    }
}

fn non_negative_field(item: &Map<String, Value>, field: &'static str) -> Result<f64, RejectReason> {
    let value = number_field(item, field)?;
    if value < 0.0 {
        return Err(RejectReason::Negative(field));
    }
    Ok(value)
}

/// Конечное число из JSON-числа или числовой строки.
pub fn number_from_value(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn entry(center: &str, reference: &str, date: &str) -> Value {
        json!({
            "CenterCode": center,
            "Reference": reference,
            "VisibleForecastedDate": date,
            "NetFlow": 1513.0,
            "GreenZone": 121.77,
            "YellowZone": 121.77,
            "RedZone": 194.83,
            "MakeToOrder": 0
        })
    }

    #[test]
    fn test_loads_wrapped_array() {
        let doc = json!({ "Datos": [entry("BCV", "R20", "2025-03-21T00:00:00")] });
        let report = load_from_value(doc).unwrap();
        assert_eq!(report.dropped, 0);
        assert_eq!(report.records.len(), 1);

        let r = &report.records[0];
        assert_eq!(r.id, "BCV-R20-0");
        assert_eq!(r.forecast_date, "2025-03-21T00:00:00");
        assert_eq!(r.net_flow, 1513.0);
        assert_eq!(r.red_zone, 194.83);
        assert_eq!(r.make_to_order, 0.0);
    }

    #[test]
    fn test_loads_bare_array() {
        let doc = json!([entry("A", "1", "2025-01-01"), entry("A", "1", "2025-01-02")]);
        let report = load_from_value(doc).unwrap();
        let ids: Vec<_> = report.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["A-1-0", "A-1-1"]);
    }

    #[test]
    fn test_rejects_bad_documents() {
        assert!(matches!(
            load_from_str("not json"),
            Err(ProjectionError::Json(_))
        ));
        assert!(matches!(
            load_from_value(json!({ "Other": [] })),
            Err(ProjectionError::InvalidFormat(_))
        ));
        assert!(matches!(
            load_from_value(json!({ "Datos": {} })),
            Err(ProjectionError::InvalidFormat(_))
        ));
        assert!(matches!(
            load_from_value(json!(42)),
            Err(ProjectionError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_empty_array_is_a_successful_load() {
        let report = load_from_value(json!({ "Datos": [] })).unwrap();
        assert!(report.records.is_empty());
        assert_eq!(report.dropped, 0);
    }

    #[test]
    fn test_drops_malformed_entries_and_keeps_indices() {
        let mut missing_ref = entry("A", "2", "2025-01-01");
        missing_ref["Reference"] = json!("");
        let mut text_flow = entry("A", "3", "2025-01-01");
        text_flow["NetFlow"] = json!("abc");
        let mut negative_zone = entry("A", "4", "2025-01-01");
        negative_zone["RedZone"] = json!(-1);
        let mut bool_mto = entry("A", "5", "2025-01-01");
        bool_mto["MakeToOrder"] = json!(true);

        let doc = json!([
            entry("A", "1", "2025-01-01"),
            "not an object",
            missing_ref,
            text_flow,
            negative_zone,
            bool_mto,
            entry("A", "6", "2025-01-01"),
        ]);
        let report = load_from_value(doc).unwrap();

        let ids: Vec<_> = report.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["A-1-0", "A-6-5"]);
        assert_eq!(report.dropped, 5);
    }

    #[test]
    fn test_coerces_numeric_fields() {
        let mut e = entry("A", "1", "2025-01-01");
        e["NetFlow"] = json!(" -12.5 ");
        e["GreenZone"] = Value::Null;
        e.as_object_mut().unwrap().remove("MakeToOrder");
        e["YellowZone"] = json!("");

        let report = load_from_value(json!([e])).unwrap();
        let r = &report.records[0];
        assert_eq!(r.net_flow, -12.5);
        assert_eq!(r.green_zone, 0.0);
        assert_eq!(r.yellow_zone, 0.0);
        assert_eq!(r.make_to_order, 0.0);
    }

    #[test]
    fn test_rejects_non_finite_strings() {
        let mut e = entry("A", "1", "2025-01-01");
        e["NetFlow"] = json!("NaN");
        let mut f = entry("A", "2", "2025-01-01");
        f["GreenZone"] = json!("inf");
        let report = load_from_value(json!([e, f])).unwrap();
        assert!(report.records.is_empty());
        assert_eq!(report.dropped, 2);
    }

    #[test]
    fn test_number_from_value() {
        assert_eq!(number_from_value(&json!(3)), Some(3.0));
        assert_eq!(number_from_value(&json!("4.5")), Some(4.5));
        assert_eq!(number_from_value(&json!("x")), None);
        assert_eq!(number_from_value(&json!([])), None);
        assert_eq!(number_from_value(&Value::Null), None);
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let doc = json!({ "Datos": [entry("BCV", "R20", "2025-03-21T00:00:00")] });
        write!(file, "{}", doc).unwrap();

        let report = load_from_path(file.path()).unwrap();
        assert_eq!(report.records.len(), 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_from_path(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(ProjectionError::Io { .. })));
    }
}
