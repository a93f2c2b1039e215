//! Palette registry for loading and accessing color palettes
//!
//! Loads palettes from palettes.json (embedded at compile time) and provides
//! access by name. The default `tab10` palette matches the categorical colors
//! most plotting tools use, so panel colors look familiar.

use super::error::{ChartError, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;

/// Embedded palettes.json content
const PALETTES_JSON: &str = include_str!("../../palettes.json");

/// Global palette registry, initialized lazily on first access
pub static PALETTE_REGISTRY: Lazy<PaletteRegistry> = Lazy::new(|| {
    PaletteRegistry::from_json(PALETTES_JSON).unwrap_or_else(|e| {
        log::error!("Failed to load palettes.json: {}", e);
        PaletteRegistry::default()
    })
});

/// Palette type as defined in palettes.json
///
/// Panels take distinct colors by slot, so only categorical palettes load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteType {
    Categorical,
}

/// A single palette definition from palettes.json
#[derive(Debug, Clone, Deserialize)]
pub struct PaletteDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub palette_type: PaletteType,
    pub colors: Vec<String>,
}

impl PaletteDefinition {
    /// Get a color by index (wraps around)
    pub fn get_color(&self, index: usize) -> [u8; 3] {
        if self.colors.is_empty() {
            return [128, 128, 128]; // Gray fallback
        }
        let idx = index % self.colors.len();
        parse_hex_color(&self.colors[idx]).unwrap_or([128, 128, 128])
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Registry of all available palettes
#[derive(Debug, Clone, Default)]
pub struct PaletteRegistry {
    /// All palettes by name (lowercase keys for case-insensitive lookup)
    palettes: HashMap<String, PaletteDefinition>,
    /// Palette names in file order (for listing)
    names: Vec<String>,
}

impl PaletteRegistry {
    /// Load palettes from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let definitions: Vec<PaletteDefinition> = serde_json::from_str(json)?;

        let mut registry = Self::default();
        for def in definitions {
            registry.names.push(def.name.clone());
            registry.palettes.insert(def.name.to_lowercase(), def);
        }

        log::debug!("PaletteRegistry: loaded {} palettes", registry.palettes.len());
        Ok(registry)
    }

    /// Get a palette by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&PaletteDefinition> {
        self.palettes.get(&name.to_lowercase())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// Parse a hex color string to RGB array
///
/// Supports `#RRGGBB`, `#RRGGBBAA` (alpha ignored) and both without `#`.
pub fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let hex = hex.trim_start_matches('#');

    if (hex.len() != 6 && hex.len() != 8) || !hex.is_ascii() {
        log::warn!("Invalid hex color '{}'", hex);
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some([r, g, b])
}

/// Look up a color in a named categorical palette
///
/// Unknown palette names are a configuration error, listing what is available.
pub fn palette_color(palette_name: &str, index: usize) -> Result<[u8; 3]> {
    let palette = PALETTE_REGISTRY.get(palette_name).ok_or_else(|| {
        ChartError::Config(format!(
            "unknown palette '{}' (available: {})",
            palette_name,
            PALETTE_REGISTRY.names().join(", ")
        ))
    })?;

    Ok(palette.get_color(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF0000"), Some([255, 0, 0]));
        assert_eq!(parse_hex_color("#1F77B4"), Some([31, 119, 180]));
        assert_eq!(parse_hex_color("2CA02C"), Some([44, 160, 44]));
        assert_eq!(parse_hex_color("#D62728FF"), Some([214, 39, 40]));

        assert_eq!(parse_hex_color("#FFF"), None); // Too short
        assert_eq!(parse_hex_color("GGGGGG"), None); // Invalid hex
    }

    #[test]
    fn test_palette_registry_loads() {
        let registry = &*PALETTE_REGISTRY;
        assert!(registry.get("tab10").is_some());
        assert!(registry.get("SET1").is_some());
        assert_eq!(registry.names()[0], "tab10");

        let tab10 = registry.get("tab10").unwrap();
        assert_eq!(tab10.palette_type, PaletteType::Categorical);
        assert_eq!(tab10.len(), 10);
    }

    #[test]
    fn test_tab10_panel_colors() {
        // blue, green, red
        assert_eq!(palette_color("tab10", 0).unwrap(), [31, 119, 180]);
        assert_eq!(palette_color("tab10", 2).unwrap(), [44, 160, 44]);
        assert_eq!(palette_color("tab10", 3).unwrap(), [214, 39, 40]);
    }

    #[test]
    fn test_palette_color_wrapping() {
        let palette = PALETTE_REGISTRY.get("Dark2").unwrap();
        let len = palette.len();
        assert_eq!(palette.get_color(0), palette.get_color(len));
    }

    #[test]
    fn test_registry_rejects_non_categorical() {
        let json = r##"[{"name": "ramp", "type": "sequential", "colors": ["#000000", "#FFFFFF"]}]"##;
        assert!(PaletteRegistry::from_json(json).is_err());
    }

    #[test]
    fn test_unknown_palette() {
        let err = palette_color("nope", 0).unwrap_err();
        assert!(err.to_string().contains("tab10"));
    }
}
