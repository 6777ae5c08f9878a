//! Editor configuration.

use crate::geometry::{PIXELS_PER_METER, Placement, ViewTransform};
use serde::{Deserialize, Serialize};

/// Configuration shared by the floor-plan editor and its views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Floor-plan scale in pixels per meter.
    pub pixels_per_meter: f64,
    /// Placement given to items added from the catalog.
    pub default_placement: Placement,
    /// Distance in pixels between the selected item's top edge and its controls.
    pub controls_offset: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            pixels_per_meter: PIXELS_PER_METER,
            default_placement: Placement::new(2.0, 2.0, 0.0),
            controls_offset: 40.0,
        }
    }
}

impl EditorConfig {
    /// View transform for the configured scale.
    pub fn transform(&self) -> ViewTransform {
        ViewTransform::new(self.pixels_per_meter)
    }

    /// Deserialize a config from JSON. Missing fields use defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.transform().scale, 100.0);
        assert_eq!(config.default_placement, Placement::new(2.0, 2.0, 0.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EditorConfig::from_json(r#"{"pixelsPerMeter": 50}"#).unwrap();
        assert_eq!(config.pixels_per_meter, 50.0);
        assert_eq!(config.controls_offset, 40.0);
    }

    #[test]
    fn test_round_trip() {
        let config = EditorConfig {
            controls_offset: 24.0,
            ..EditorConfig::default()
        };
        let back = EditorConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }
}
