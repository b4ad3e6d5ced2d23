use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

/// Big Ten spotlight and profile chart colour (`#E00122`).
pub const BIG_TEN_RED: Color32 = Color32::from_rgb(0xE0, 0x01, 0x22);

/// National average bars (`#777777`).
pub const NATIONAL_GRAY: Color32 = Color32::from_rgb(0x77, 0x77, 0x77);

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
            let hsl = Hsl::new(hue, 0.6, 0.5);
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
// Conference → Color32
// ---------------------------------------------------------------------------

/// One distinct colour per conference for the comparison chart.
#[derive(Debug, Clone, Default)]
pub struct ConferenceColors {
    mapping: BTreeMap<String, Color32>,
}

impl ConferenceColors {
    /// Assign colours in the given order; duplicates keep their first colour.
    pub fn new<'a>(conferences: impl IntoIterator<Item = &'a str>) -> Self {
        let mut names: Vec<&str> = Vec::new();
        for c in conferences {
            if !names.contains(&c) {
                names.push(c);
            }
        }
        let mapping = names
            .iter()
            .zip(generate_palette(names.len()))
            .map(|(name, color)| (name.to_string(), color))
            .collect();
        ConferenceColors { mapping }
    }

    pub fn color_for(&self, conference: &str) -> Color32 {
        self.mapping
            .get(conference)
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_conference_gets_a_distinct_colour() {
        let colors = ConferenceColors::new(["SEC", "ACC", "SEC", "Big Ten"]);
        let sec = colors.color_for("SEC");
        assert_ne!(sec, colors.color_for("ACC"));
        assert_ne!(sec, colors.color_for("Big Ten"));
        assert_eq!(colors.color_for("Ivy"), Color32::GRAY);
    }
}
