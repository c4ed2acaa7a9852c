//! Garment color presets for the product preview overlay.

#[cfg(test)]
#[path = "color_preset_test.rs"]
mod color_preset_test;

use serde::Serialize;

/// CSS settings that tint the product mockup for one garment color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorPreset {
    /// Overlay fill color.
    pub color: &'static str,
    /// Overlay opacity in `0.0..=1.0`.
    pub opacity: f64,
    /// CSS `mix-blend-mode` for the overlay.
    pub blend: &'static str,
    /// CSS `filter` applied to the mockup image.
    pub filter: &'static str,
    /// Background behind the mockup.
    pub background: &'static str,
}

const PRESETS: [(&str, ColorPreset); 5] = [
    (
        "white",
        ColorPreset { color: "#ffffff", opacity: 0.0, blend: "normal", filter: "none", background: "#f5f5f5" },
    ),
    (
        "black",
        ColorPreset {
            color: "#1a1a1a",
            opacity: 0.85,
            blend: "multiply",
            filter: "brightness(0.6)",
            background: "#111111",
        },
    ),
    (
        "navy",
        ColorPreset {
            color: "#1f2a44",
            opacity: 0.75,
            blend: "multiply",
            filter: "saturate(1.2)",
            background: "#1f2a44",
        },
    ),
    (
        "red",
        ColorPreset {
            color: "#c62828",
            opacity: 0.7,
            blend: "multiply",
            filter: "saturate(1.4)",
            background: "#c62828",
        },
    ),
    (
        "green",
        ColorPreset {
            color: "#2e7d32",
            opacity: 0.7,
            blend: "multiply",
            filter: "saturate(1.3)",
            background: "#2e7d32",
        },
    ),
];

/// Look up the preset for `name`, ignoring case and surrounding whitespace.
#[must_use]
pub fn lookup(name: &str) -> Option<ColorPreset> {
    let name = name.trim();
    PRESETS
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, preset)| *preset)
}
