use contracts::projections::p909_inventory_projection::dto::{
    product_key, DateColumnDto, InventoryRecordDto, ProductCellDto, ProductRowDto,
};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use crate::shared::date::{format_date_display, format_date_header, parse_forecast_date};

/// Уникальные даты прогноза по возрастанию календарного времени.
///
/// Неразобранные даты идут последними, в текстовом порядке. Разные строки
/// с одним и тем же моментом остаются отдельными колонками.
pub fn unique_dates(records: &[InventoryRecordDto]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut dates: Vec<(Option<chrono::NaiveDateTime>, &str)> = records
        .iter()
        .filter(|r| seen.insert(r.forecast_date.as_str()))
        .map(|r| (parse_forecast_date(&r.forecast_date), r.forecast_date.as_str()))
        .collect();

    dates.sort_by(|(a_time, a_raw), (b_time, b_raw)| {
        let by_time = match (a_time, b_time) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_time.then_with(|| a_raw.cmp(b_raw))
    });

    dates.into_iter().map(|(_, raw)| raw.to_string()).collect()
}

/// Колонки заголовка грида.
pub fn to_date_columns(dates: &[String]) -> Vec<DateColumnDto> {
    dates
        .iter()
        .map(|value| DateColumnDto {
            value: value.clone(),
            header: format_date_header(value),
            display: format_date_display(value),
        })
        .collect()
}

/// Плоские записи -> одна строка на пару (склад, артикул).
///
/// Группировка идёт по самой паре, а не по склеенному `id`. Строки
/// сохраняют порядок первого появления; повторная запись той же пары
/// и даты заменяет ячейку.
pub fn to_product_rows(records: &[InventoryRecordDto]) -> Vec<ProductRowDto> {
    let mut rows: Vec<ProductRowDto> = Vec::new();
    let mut index_by_pair: HashMap<(&str, &str), usize> = HashMap::new();

    for record in records {
        let pair = (record.center_code.as_str(), record.reference.as_str());
        let row_index = *index_by_pair.entry(pair).or_insert_with(|| {
            rows.push(ProductRowDto {
                id: product_key(&record.center_code, &record.reference),
                center_code: record.center_code.clone(),
                reference: record.reference.clone(),
                cells: BTreeMap::new(),
            });
            rows.len() - 1
        });

        rows[row_index].cells.insert(
            record.forecast_date.clone(),
            ProductCellDto {
                make_to_order: record.make_to_order,
                color: record.color(),
                record: record.clone(),
            },
        );
    }

    rows
}
