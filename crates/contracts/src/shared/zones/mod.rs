use serde::{Deserialize, Serialize};

pub mod palette;

pub use palette::{ZonePalette, ZoneStyle};

// ---------------------------------------------------------------------------
// Color categories
// ---------------------------------------------------------------------------

/// Категория риска ячейки прогноза.
///
/// Всегда вычисляется через [`classify`], никогда не хранится.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorCategory {
    Red,
    Yellow,
    Green,
    Blue,
    Black,
}

impl ColorCategory {
    /// Все категории в порядке отображения.
    pub const ALL: [ColorCategory; 5] = [
        ColorCategory::Red,
        ColorCategory::Yellow,
        ColorCategory::Green,
        ColorCategory::Blue,
        ColorCategory::Black,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorCategory::Red => "red",
            ColorCategory::Yellow => "yellow",
            ColorCategory::Green => "green",
            ColorCategory::Blue => "blue",
            ColorCategory::Black => "black",
        }
    }
}

impl std::fmt::Display for ColorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Классификация `net_flow + make_to_order` по трём зонам, уложенным подряд.
///
/// Верхние границы включительные: сумма, равная `red_zone`, красная, а не
/// жёлтая. Ровно ноль = чёрный. У красной зоны нет нижней границы, поэтому
/// любая отрицательная ненулевая сумма красная.
///
/// ```
/// use contracts::shared::zones::{classify, ColorCategory};
/// assert_eq!(classify(0.0, 0.0, 10.0, 10.0, 10.0), ColorCategory::Black);
/// assert_eq!(classify(10.0, 0.0, 10.0, 10.0, 10.0), ColorCategory::Red);
/// assert_eq!(classify(31.0, 0.0, 10.0, 10.0, 10.0), ColorCategory::Blue);
/// ```
pub fn classify(
    net_flow: f64,
    make_to_order: f64,
    red_zone: f64,
    yellow_zone: f64,
    green_zone: f64,
) -> ColorCategory {
    let total = net_flow + make_to_order;
    if total == 0.0 {
        return ColorCategory::Black;
    }

    let red_bound = red_zone;
    let yellow_bound = red_bound + yellow_zone;
    let green_bound = yellow_bound + green_zone;

    if total <= red_bound {
        ColorCategory::Red
    } else if total <= yellow_bound {
        ColorCategory::Yellow
    } else if total <= green_bound {
        ColorCategory::Green
    } else {
        ColorCategory::Blue
    }
}
