//! Chart property definitions with defaults from chart.json
//!
//! chart.json is embedded at compile time and is the single place where
//! property defaults live. User values come from a flat JSON object
//! (`chart_config.json` or `--config`) and from CLI overrides.

use super::error::{ChartError, Result};
use serde::Deserialize;
use std::collections::HashMap;

/// chart.json embedded at compile time
const CHART_JSON: &str = include_str!("../../chart.json");

/// Property definition from chart.json
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDef {
    pub name: String,
    pub kind: PropertyKind,
    #[serde(default)]
    pub default_value: String,
    /// For EnumeratedProperty, the valid values
    #[serde(default, rename = "values")]
    pub valid_values: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum PropertyKind {
    #[serde(rename = "StringProperty")]
    String,
    #[serde(rename = "EnumeratedProperty")]
    Enumerated,
    #[serde(rename = "DoubleProperty")]
    Double,
    #[serde(rename = "BooleanProperty")]
    Boolean,
}

/// Top level of chart.json; other keys are documentation only
#[derive(Deserialize)]
struct ChartDefinition {
    properties: Vec<PropertyDef>,
}

/// Registry of all chart properties with their defaults
#[derive(Debug)]
pub struct PropertyRegistry {
    properties: HashMap<String, PropertyDef>,
}

impl PropertyRegistry {
    /// Parse a chart definition document
    pub fn from_json(json: &str) -> Result<Self> {
        let definition: ChartDefinition = serde_json::from_str(json)?;

        let properties = definition
            .properties
            .into_iter()
            .map(|mut prop| {
                if prop.kind != PropertyKind::Enumerated {
                    prop.valid_values = None;
                }
                (prop.name.clone(), prop)
            })
            .collect();

        Ok(Self { properties })
    }

    /// Build the registry from the embedded chart.json
    ///
    /// Panics if chart.json is malformed, which the registry tests catch
    /// since the file is compile-time embedded.
    pub fn from_chart_json() -> Self {
        Self::from_json(CHART_JSON).expect("chart.json is not a valid chart definition")
    }

    pub fn get_default(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(|p| p.default_value.as_str())
    }

    pub fn get_property(&self, name: &str) -> Option<&PropertyDef> {
        self.properties.get(name)
    }

    /// Check if a value is valid for an enumerated property
    pub fn is_valid_enum_value(&self, name: &str, value: &str) -> bool {
        self.properties
            .get(name)
            .and_then(|p| p.valid_values.as_ref())
            .map(|values| values.iter().any(|v| v.eq_ignore_ascii_case(value)))
            .unwrap_or(true) // Non-enumerated properties accept any value
    }

    /// All property names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.properties.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }
}

static REGISTRY: std::sync::OnceLock<PropertyRegistry> = std::sync::OnceLock::new();

/// Get the global property registry
pub fn registry() -> &'static PropertyRegistry {
    REGISTRY.get_or_init(PropertyRegistry::from_chart_json)
}

/// Typed property reader: user values first, chart.json defaults otherwise
#[derive(Debug, Clone, Default)]
pub struct PropertyReader {
    user_values: HashMap<String, String>,
}

impl PropertyReader {
    /// Create from name/value pairs; empty values count as "not set"
    pub fn new<I, K, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut reader = Self::default();
        for (name, value) in values {
            reader.set(name, value);
        }
        reader
    }

    /// Parse a flat JSON object of property values
    ///
    /// Strings, numbers and booleans are accepted; other values are skipped
    /// with a warning.
    pub fn from_json(json: &str) -> Result<Self> {
        let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;

        let mut reader = Self::default();
        for (key, value) in map {
            let value_str = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                other => {
                    log::warn!("Ignoring property '{}': unsupported value {}", key, other);
                    continue;
                }
            };
            if registry().get_property(&key).is_none() {
                log::warn!("Unknown property '{}' (known: {:?})", key, registry().names());
            }
            reader.set(key, value_str);
        }

        Ok(reader)
    }

    /// Load from a JSON file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            ChartError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// Set (or override) a user value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if value.is_empty() {
            self.user_values.remove(&name);
        } else {
            self.user_values.insert(name, value);
        }
    }

    pub fn len(&self) -> usize {
        self.user_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.user_values.is_empty()
    }

    /// Get string property (user value or default from chart.json)
    pub fn get_string(&self, name: &str) -> String {
        if let Some(value) = self.user_values.get(name) {
            return value.clone();
        }
        registry().get_default(name).unwrap_or("").to_string()
    }

    /// Get enumerated property, falling back to the default on invalid values
    pub fn get_enum(&self, name: &str) -> String {
        let reg = registry();
        let default = reg.get_default(name).unwrap_or("");

        if let Some(value) = self.user_values.get(name) {
            if reg.is_valid_enum_value(name, value) {
                return value.to_lowercase();
            }
            let valid_values = reg
                .get_property(name)
                .and_then(|p| p.valid_values.as_ref())
                .map(|v| v.join(", "))
                .unwrap_or_default();
            log::warn!(
                "Invalid value '{}' for property '{}'. Valid values: [{}]. Using default: '{}'",
                value,
                name,
                valid_values,
                default
            );
        }

        default.to_string()
    }

    /// Get boolean property ("true"/"false", case-insensitive)
    pub fn get_bool(&self, name: &str) -> bool {
        let default = registry()
            .get_default(name)
            .map(|d| d.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        match self.user_values.get(name).map(|v| v.to_lowercase()) {
            Some(v) if v == "true" => true,
            Some(v) if v == "false" => false,
            Some(other) => {
                log::warn!(
                    "Invalid boolean value '{}' for property '{}'. Using default: {}",
                    other,
                    name,
                    default
                );
                default
            }
            None => default,
        }
    }

    /// Get f64 property, falling back to the default on parse errors
    pub fn get_f64(&self, name: &str) -> f64 {
        let default = default_f64(name);

        match self.user_values.get(name) {
            None => default,
            Some(value) => match value.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => v,
                _ => {
                    log::warn!(
                        "Invalid numeric value '{}' for property '{}'. Using default: {}",
                        value,
                        name,
                        default
                    );
                    default
                }
            },
        }
    }

    /// Get f64 property with range validation
    pub fn get_f64_in_range(&self, name: &str, min: f64, max: f64) -> f64 {
        let value = self.get_f64(name);
        if (min..=max).contains(&value) {
            value
        } else {
            let default = default_f64(name);
            log::warn!(
                "Value {} for property '{}' out of range [{}, {}]. Using default: {}",
                value,
                name,
                min,
                max,
                default
            );
            default
        }
    }
}

fn default_f64(name: &str) -> f64 {
    registry()
        .get_default(name)
        .and_then(|d| d.parse::<f64>().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_loads() {
        let reg = registry();
        assert!(reg.get_property("figure.width").is_some());
        assert!(reg.get_property("png.compression").is_some());
        assert!(reg.get_property("output.path").is_some());
        assert_eq!(
            reg.get_property("grid").map(|p| p.kind.clone()),
            Some(PropertyKind::Boolean)
        );
    }

    #[test]
    fn test_registry_defaults() {
        let reg = registry();
        assert_eq!(reg.get_default("figure.width"), Some("18"));
        assert_eq!(reg.get_default("figure.height"), Some("5"));
        assert_eq!(reg.get_default("figure.dpi"), Some("300"));
        assert_eq!(reg.get_default("palette"), Some("tab10"));
    }

    #[test]
    fn test_registry_from_json() {
        let reg = PropertyRegistry::from_json(
            r#"{"properties": [
                {"kind": "EnumeratedProperty", "name": "mode", "defaultValue": "a", "values": ["a", "b"]},
                {"kind": "DoubleProperty", "name": "size", "defaultValue": "2", "values": ["ignored"]},
                {"kind": "StringProperty", "name": "label"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(reg.names(), ["label", "mode", "size"]);
        assert_eq!(reg.get_default("label"), Some(""));
        assert!(reg.is_valid_enum_value("mode", "B"));
        assert!(!reg.is_valid_enum_value("mode", "c"));
        assert!(reg.get_property("size").unwrap().valid_values.is_none());
    }

    #[test]
    fn test_registry_rejects_unknown_kind() {
        let result = PropertyRegistry::from_json(
            r#"{"properties": [{"kind": "ColorProperty", "name": "c", "defaultValue": "red"}]}"#,
        );
        assert!(matches!(result, Err(ChartError::Json(_))));
    }

    #[test]
    fn test_enum_validation() {
        let reg = registry();
        assert!(reg.is_valid_enum_value("png.compression", "fast"));
        assert!(reg.is_valid_enum_value("png.compression", "BEST"));
        assert!(!reg.is_valid_enum_value("png.compression", "ultra"));
        // Non-enumerated properties accept anything
        assert!(reg.is_valid_enum_value("output.path", "whatever.png"));
    }

    #[test]
    fn test_reader_defaults() {
        let reader = PropertyReader::default();
        assert!(reader.is_empty());
        assert_eq!(reader.get_f64("figure.width"), 18.0);
        assert_eq!(reader.get_f64("figure.dpi"), 300.0);
        assert_eq!(reader.get_enum("png.compression"), "default");
        assert!(reader.get_bool("grid"));
        assert_eq!(reader.get_string("output.path"), "analisis_workers.png");
        assert_eq!(reader.get_string("no.such.property"), "");
    }

    #[test]
    fn test_reader_user_values() {
        let reader = PropertyReader::new([
            ("figure.dpi", "150"),
            ("grid", "False"),
            ("png.compression", "Best"),
            ("output.path", ""),
        ]);
        assert_eq!(reader.len(), 3);
        assert_eq!(reader.get_f64("figure.dpi"), 150.0);
        assert!(!reader.get_bool("grid"));
        assert_eq!(reader.get_enum("png.compression"), "best");
        // Empty = not set
        assert_eq!(reader.get_string("output.path"), "analisis_workers.png");
    }

    #[test]
    fn test_reader_invalid_values_fall_back() {
        let reader = PropertyReader::new([
            ("figure.width", "wide"),
            ("annotate", "maybe"),
            ("png.compression", "ultra"),
            ("figure.dpi", "5000"),
        ]);
        assert_eq!(reader.get_f64("figure.width"), 18.0);
        assert!(reader.get_bool("annotate"));
        assert_eq!(reader.get_enum("png.compression"), "default");
        assert_eq!(reader.get_f64_in_range("figure.dpi", 36.0, 1200.0), 300.0);
    }

    #[test]
    fn test_reader_from_json() {
        let reader =
            PropertyReader::from_json(r#"{"figure.dpi": 72, "grid": false, "palette": "Set1", "x": [1]}"#)
                .unwrap();
        assert_eq!(reader.get_f64("figure.dpi"), 72.0);
        assert!(!reader.get_bool("grid"));
        assert_eq!(reader.get_string("palette"), "Set1");
        assert_eq!(reader.len(), 3);
    }

    #[test]
    fn test_reader_from_json_rejects_non_object() {
        assert!(PropertyReader::from_json("[1, 2]").is_err());
    }

    #[test]
    fn test_set_overrides() {
        let mut reader = PropertyReader::new([("output.path", "a.png")]);
        reader.set("output.path", "b.png");
        assert_eq!(reader.get_string("output.path"), "b.png");
    }
}
