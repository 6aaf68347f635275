use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::SizeCategory;

/// Sidebar and primary accent.
pub const ACCENT: Color32 = Color32::from_rgb(0x4e, 0x73, 0xdf);

/// Neutral fill for the "Other" bucket.
pub const OTHER: Color32 = Color32::from_rgb(0xb7, 0xb9, 0xcc);

/// Fixed colour per size category, shared by badges, charts and the map.
pub fn size_color(size: SizeCategory) -> Color32 {
    match size {
        SizeCategory::Small => Color32::from_rgb(0x1c, 0xc8, 0x8a),
        SizeCategory::Medium => ACCENT,
        SizeCategory::Large => Color32::from_rgb(0xe7, 0x4a, 0x3b),
        SizeCategory::Unknown => Color32::from_rgb(0xf6, 0xc2, 0x3e),
    }
}

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
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_distinct() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(6);
        assert_eq!(colors.len(), 6);
        for (i, a) in colors.iter().enumerate() {
            assert!(colors[i + 1..].iter().all(|b| a != b));
        }
    }

    #[test]
    fn test_size_colors_are_distinct() {
        let colors: Vec<Color32> = SizeCategory::DISPLAY_ORDER.map(size_color).to_vec();
        for (i, a) in colors.iter().enumerate() {
            assert!(colors[i + 1..].iter().all(|b| a != b));
        }
    }
}
