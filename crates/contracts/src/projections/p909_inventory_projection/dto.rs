use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::shared::zones::{classify, ColorCategory};

/// Ключ строки грида: склад + артикул
pub fn product_key(center_code: &str, reference: &str) -> String {
    format!("{}-{}", center_code, reference)
}

/// DTO для записи Inventory Projection (P909)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecordDto {
    /// `{center_code}-{reference}-{index}`, назначается при загрузке
    pub id: String,

    // Dimensions
    pub center_code: String,
    pub reference: String,
    /// Строка даты как в источнике, например `2025-03-21T00:00:00`
    pub forecast_date: String,

    // Sums
    pub net_flow: f64,
    pub red_zone: f64,
    pub yellow_zone: f64,
    pub green_zone: f64,
    pub make_to_order: f64,
}

impl InventoryRecordDto {
    pub fn color(&self) -> ColorCategory {
        classify(
            self.net_flow,
            self.make_to_order,
            self.red_zone,
            self.yellow_zone,
            self.green_zone,
        )
    }

    pub fn product_key(&self) -> String {
        product_key(&self.center_code, &self.reference)
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Ячейка грида: редактируемое количество, цвет и исходная запись
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCellDto {
    pub make_to_order: f64,
    pub color: ColorCategory,
    pub record: InventoryRecordDto,
}

/// Строка грида на пару (склад, артикул)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRowDto {
    pub id: String,
    pub center_code: String,
    pub reference: String,
    /// Ключ `forecast_date`; дат без записи нет в карте.
    pub cells: BTreeMap<String, ProductCellDto>,
}

/// Колонка грида
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateColumnDto {
    /// Исходная строка даты, ключ в `ProductRowDto::cells`
    pub value: String,
    /// Короткий заголовок, `MM/DD/YYYY`
    pub header: String,
    /// Длинная подпись, например `21 de marzo de 2025`
    pub display: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridDto {
    pub version: u64,
    pub dates: Vec<DateColumnDto>,
    pub rows: Vec<ProductRowDto>,
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorStatDto {
    pub count: usize,
    /// `"37.5%"`, либо `"0%"`, если на дату нет записей
    pub percentage: String,
}

/// Распределение цветов для выбранной даты
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorStatsDto {
    pub date: String,
    /// Всегда содержит все пять категорий.
    pub stats: BTreeMap<ColorCategory, ColorStatDto>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralStatsDto {
    pub total_products: usize,
    pub average_net_flow: f64,
    pub average_make_to_order: f64,
}

/// Чип панели итогов (только категории с записями)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorChipDto {
    pub color: ColorCategory,
    pub count: usize,
    pub percentage: String,
    pub background: String,
    pub text: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryDto {
    pub has_data: bool,
    pub date: Option<String>,
    pub formatted_date: String,
    pub total: usize,
    pub chips: Vec<ColorChipDto>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRangeDto {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsDto {
    pub total_products: usize,
    pub unique_centers: usize,
    pub unique_references: usize,
    pub date_range: Option<DateRangeDto>,
}

// ---------------------------------------------------------------------------
// API request / response
// ---------------------------------------------------------------------------

/// Запрос на изменение MakeToOrder ячейки
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMakeToOrderRequest {
    pub id: String,
    /// Недоверенный ввод: числа и числовые строки,
    /// всё остальное считается 0.
    #[serde(default)]
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectDateRequest {
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedDateResponse {
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionStatusDto {
    pub loaded: bool,
    pub error: Option<String>,
    pub record_count: usize,
    pub version: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
