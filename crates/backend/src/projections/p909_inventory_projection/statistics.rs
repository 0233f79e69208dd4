use contracts::projections::p909_inventory_projection::dto::{
    ColorChipDto, ColorStatDto, ColorStatsDto, GeneralStatsDto, InventoryRecordDto, SummaryDto,
};
use contracts::shared::zones::{ColorCategory, ZonePalette};
use std::collections::BTreeMap;

use crate::shared::date::format_date_display;
use crate::shared::format::{format_percentage, round2};

/// Распределение цветов по записям с датой ровно `selected_date`.
///
/// Все пять категорий присутствуют всегда, сумма счётчиков равна `total`.
/// Проценты округляются по отдельности и в сумме могут не дать 100.
pub fn color_stats(records: &[InventoryRecordDto], selected_date: &str) -> ColorStatsDto {
    let mut counts: BTreeMap<ColorCategory, usize> =
        ColorCategory::ALL.iter().map(|c| (*c, 0)).collect();

    let mut total = 0;
    for record in records.iter().filter(|r| r.forecast_date == selected_date) {
        *counts.entry(record.color()).or_insert(0) += 1;
        total += 1;
    }

    let stats = counts
        .into_iter()
        .map(|(color, count)| {
            (
                color,
                ColorStatDto {
                    count,
                    percentage: format_percentage(count, total),
                },
            )
        })
        .collect();

    ColorStatsDto {
        date: selected_date.to_string(),
        stats,
        total,
    }
}

/// Количество и средние (округлённые) по всей коллекции.
pub fn general_stats(records: &[InventoryRecordDto]) -> GeneralStatsDto {
    if records.is_empty() {
        return GeneralStatsDto {
            total_products: 0,
            average_net_flow: 0.0,
            average_make_to_order: 0.0,
        };
    }

    let n = records.len() as f64;
    let net_flow: f64 = records.iter().map(|r| r.net_flow).sum();
    let make_to_order: f64 = records.iter().map(|r| r.make_to_order).sum();

    GeneralStatsDto {
        total_products: records.len(),
        average_net_flow: round2(net_flow / n),
        average_make_to_order: round2(make_to_order / n),
    }
}

/// Данные панели итогов: чип на каждую непустую категорию.
pub fn summary(
    records: &[InventoryRecordDto],
    selected_date: Option<&str>,
    palette: &ZonePalette,
) -> SummaryDto {
    let Some(date) = selected_date else {
        return SummaryDto {
            has_data: false,
            date: None,
            formatted_date: String::new(),
            total: 0,
            chips: vec![],
        };
    };

    let stats = color_stats(records, date);
    let chips = ColorCategory::ALL
        .iter()
        .filter_map(|color| {
            let stat = stats.stats.get(color)?;
            (stat.count > 0).then(|| ColorChipDto {
                color: *color,
                count: stat.count,
                percentage: stat.percentage.clone(),
                background: palette.background(*color).to_string(),
                text: palette.text_color(*color).to_string(),
                name: palette.name(*color).to_string(),
            })
        })
        .collect();

    SummaryDto {
        has_data: true,
        date: Some(date.to_string()),
        formatted_date: format_date_display(date),
        total: stats.total,
        chips,
    }
}
