use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Hue step between consecutive categories, in degrees. Successive hues stay
/// far apart however many categories a table has.
const GOLDEN_ANGLE: f32 = 137.507_77;

// ---------------------------------------------------------------------------
// Category colours for the inventory grid
// ---------------------------------------------------------------------------

/// Assigns each category of the loaded table a stable colour. The n-th
/// category (in first-appearance order) always gets the same hue, so adding
/// categories to a sheet never recolours the existing ones.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new(categories: &[String]) -> Self {
        let mapping = categories
            .iter()
            .enumerate()
            .map(|(i, category)| (category.clone(), category_color(i)))
            .collect();
        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }
}

fn category_color(index: usize) -> Color32 {
    let hue = (index as f32 * GOLDEN_ANGLE) % 360.0;
    let rgb: Srgb = Hsl::new(hue, 0.65, 0.45).into_color();
    let (r, g, b) = rgb.into_format::<u8>().into_components();
    Color32::from_rgb(r, g, b)
}
