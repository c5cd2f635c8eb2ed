use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::CellValue;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: category value → Color32
// ---------------------------------------------------------------------------

/// Maps the categories of one column to distinct colours, used to tint the
/// category cells of the table and the category selector.
#[derive(Debug, Clone)]
pub struct ColorMap {
    pub column: String,
    mapping: BTreeMap<CellValue, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map; colours are assigned in the order of `categories`.
    pub fn new(column: &str, categories: &[CellValue]) -> Self {
        let palette = generate_palette(categories.len());
        let mapping: BTreeMap<CellValue, Color32> = categories
            .iter()
            .zip(palette)
            .map(|(v, c)| (v.clone(), c))
            .collect();

        ColorMap {
            column: column.to_string(),
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given category.
    pub fn color_for(&self, value: &CellValue) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Colour for a category given by its label, as the selector holds it.
    pub fn color_for_label(&self, label: &str) -> Option<Color32> {
        self.mapping
            .iter()
            .find(|(v, _)| v.matches_label(label))
            .map(|(_, c)| *c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_size_and_distinct() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_lookup() {
        let cats = vec![CellValue::String("A".into()), CellValue::String("B".into())];
        let map = ColorMap::new("category", &cats);
        assert_ne!(map.color_for(&cats[0]), map.color_for(&cats[1]));
        assert_eq!(map.color_for(&CellValue::String("Z".into())), Color32::GRAY);
        assert_eq!(map.color_for_label("B"), Some(map.color_for(&cats[1])));
        assert_eq!(map.color_for_label("All"), None);
    }
}
