use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::config::TWO_STATUS_COLORS;

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
// Color scale: health status → Color32
// ---------------------------------------------------------------------------

/// Maps health-status values to colours for both chart layers.
#[derive(Debug, Clone)]
pub struct ColorScale {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorScale {
    /// Build the scale from the full (unfiltered) health-status option set,
    /// so colours stay put while the selection changes.
    ///
    /// Exactly two statuses get the fixed green/red pair; any other count
    /// falls back to an evenly spaced palette.
    pub fn for_health_status(options: &BTreeSet<String>) -> Self {
        let palette = if options.len() == 2 {
            TWO_STATUS_COLORS.to_vec()
        } else {
            generate_palette(options.len())
        };

        let mapping = options.iter().cloned().zip(palette).collect();

        ColorScale {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given status.
    pub fn color_for(&self, value: &str) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Return the legend entries (value label → colour) for the UI.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(v, c)| (v.clone(), *c))
            .collect()
    }
}
