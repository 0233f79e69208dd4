use contracts::projections::p909_inventory_projection::dto::{
    DateRangeDto, InventoryRecordDto, MetricsDto,
};
use std::collections::HashSet;

use crate::shared::date::parse_forecast_date;

/// Счётчики по коллекции и диапазон разобранных дат прогноза.
pub fn calculate_metrics(records: &[InventoryRecordDto]) -> MetricsDto {
    let unique_centers: HashSet<&str> = records.iter().map(|r| r.center_code.as_str()).collect();
    let unique_references: HashSet<&str> = records.iter().map(|r| r.reference.as_str()).collect();

    let mut dates = records
        .iter()
        .filter_map(|r| parse_forecast_date(&r.forecast_date));
    let date_range = dates.next().map(|first| {
        let (start, end) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        DateRangeDto { start, end }
    });

    MetricsDto {
        total_products: records.len(),
        unique_centers: unique_centers.len(),
        unique_references: unique_references.len(),
        date_range,
    }
}
