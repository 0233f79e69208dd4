use serde::{Deserialize, Serialize};

use super::ColorCategory;

/// Цвета и отображаемое имя одной категории.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneStyle {
    /// Фон ячейки (CSS цвет).
    pub background: String,
    /// Цвет текста, контрастный к `background`.
    pub text: String,
    /// Название в панели итогов.
    pub name: String,
}

impl ZoneStyle {
    fn new(background: &str, text: &str, name: &str) -> Self {
        Self {
            background: background.to_string(),
            text: text.to_string(),
            name: name.to_string(),
        }
    }
}

/// Палитра: один стиль на каждую категорию.
///
/// Обычное значение, передаётся туда, где рисуется ячейка или чип.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZonePalette {
    pub red: ZoneStyle,
    pub yellow: ZoneStyle,
    pub green: ZoneStyle,
    pub blue: ZoneStyle,
    pub black: ZoneStyle,
}

impl Default for ZonePalette {
    fn default() -> Self {
        Self {
            red: ZoneStyle::new("#ffebee", "#c53030", "Rojo"),
            yellow: ZoneStyle::new("#fff8e1", "#d69e2e", "Amarillo"),
            green: ZoneStyle::new("#e8f5e8", "#38a169", "Verde"),
            blue: ZoneStyle::new("#e3f2fd", "#3182ce", "Azul"),
            black: ZoneStyle::new("#f5f5f5", "#4a5568", "Negro"),
        }
    }
}

impl ZonePalette {
    pub fn style(&self, category: ColorCategory) -> &ZoneStyle {
        match category {
            ColorCategory::Red => &self.red,
            ColorCategory::Yellow => &self.yellow,
            ColorCategory::Green => &self.green,
            ColorCategory::Blue => &self.blue,
            ColorCategory::Black => &self.black,
        }
    }

    pub fn background(&self, category: ColorCategory) -> &str {
        &self.style(category).background
    }

    pub fn text_color(&self, category: ColorCategory) -> &str {
        &self.style(category).text
    }

    pub fn name(&self, category: ColorCategory) -> &str {
        &self.style(category).name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_palette() {
        let palette = ZonePalette::default();
        assert_eq!(palette.background(ColorCategory::Red), "#ffebee");
        assert_eq!(palette.text_color(ColorCategory::Blue), "#3182ce");
        assert_eq!(palette.name(ColorCategory::Black), "Negro");
        assert_eq!(palette.name(ColorCategory::Yellow), "Amarillo");
    }

    #[test]
    fn test_every_category_has_distinct_background() {
        let palette = ZonePalette::default();
        let mut seen: Vec<&str> = ColorCategory::ALL
            .iter()
            .map(|c| palette.background(*c))
            .collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), ColorCategory::ALL.len());
    }
}
