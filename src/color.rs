use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Darken, Hsl, IntoColor, Srgb};

use crate::data::PredictedClass;

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
            let hue = (i as f32 / n as f32) * 360.0 + 200.0;
            let hsl = Hsl::new(hue, 0.65, 0.70);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

/// The same colour with its lightness reduced by `factor` (0.0-1.0).
pub fn darker(color: Color32, factor: f32) -> Color32 {
    let rgb = Srgb::new(color.r(), color.g(), color.b()).into_format::<f32>();
    let hsl: Hsl = rgb.into_color();
    to_color32(hsl.darken(factor).into_color())
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

// ---------------------------------------------------------------------------
// Class colours
// ---------------------------------------------------------------------------

pub const HUMAN_COLOR: Color32 = Color32::from_rgb(0x83, 0xC9, 0xF1);
pub const BOT_COLOR: Color32 = Color32::from_rgb(0xFE, 0xD2, 0x8F);

pub fn class_color(class: PredictedClass) -> Color32 {
    match class {
        PredictedClass::Human => HUMAN_COLOR,
        PredictedClass::Bot => BOT_COLOR,
    }
}

// ---------------------------------------------------------------------------
// Color mapping: key → Color32
// ---------------------------------------------------------------------------

/// Maps a fixed set of keys (datasets, groups) to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap<K> {
    mapping: BTreeMap<K, Color32>,
    default_color: Color32,
}

impl<K: Ord + Clone> ColorMap<K> {
    pub fn new<'a>(keys: impl IntoIterator<Item = &'a K>) -> Self
    where
        K: 'a,
    {
        let keys: Vec<&K> = keys.into_iter().collect();
        let palette = generate_palette(keys.len());
        let mapping = keys
            .into_iter()
            .zip(palette)
            .map(|(k, c)| (k.clone(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a key.
    pub fn color_for(&self, key: &K) -> Color32 {
        self.mapping.get(key).copied().unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DatasetKind;

    #[test]
    fn palette_colours_are_distinct() {
        let colors = generate_palette(3);
        assert_eq!(colors.len(), 3);
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn darker_reduces_brightness() {
        let dark = darker(HUMAN_COLOR, 0.4);
        let sum = |c: Color32| u32::from(c.r()) + u32::from(c.g()) + u32::from(c.b());
        assert!(sum(dark) < sum(HUMAN_COLOR));
    }

    #[test]
    fn unknown_key_falls_back_to_gray() {
        let map = ColorMap::new(&[DatasetKind::Us, DatasetKind::Georgia]);
        assert_ne!(map.color_for(&DatasetKind::Us), Color32::GRAY);
        assert_eq!(map.color_for(&DatasetKind::Training), Color32::GRAY);
    }
}
