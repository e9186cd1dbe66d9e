//! Tunable engine constants.

use crate::error::EngineResult;
use serde::{Deserialize, Serialize};

/// Default number of undo steps kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;
/// Default snap distance in document units.
pub const DEFAULT_SNAP_THRESHOLD: f64 = 5.0;
/// Drag distance below which a draw gesture counts as a click.
pub const DEFAULT_CLICK_THRESHOLD: f64 = 10.0;
/// Smallest width/height a resize may produce.
pub const DEFAULT_MIN_ELEMENT_SIZE: f64 = 5.0;

/// Engine configuration.
///
/// Every field has a default, so a JSON override only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Maximum depth of the undo stack.
    pub history_limit: usize,
    /// Largest misalignment that still snaps.
    pub snap_threshold: f64,
    /// Post-snap tolerance for emitting a guideline.
    pub guideline_epsilon: f64,
    /// Extra length added to both ends of a guideline.
    pub guideline_margin: f64,
    /// Minimum drag distance for draw tools to create an element.
    pub click_threshold: f64,
    /// Hard floor for width and height on resize.
    pub min_element_size: f64,
    /// Font size clamp applied when resizing text-bearing elements.
    pub min_font_size: f64,
    pub max_font_size: f64,
    /// Distance from a stroke's line that still counts as a hit.
    pub stroke_hit_tolerance: f64,
    /// Radius around a pen path's start point that closes the path.
    pub pen_close_radius: f64,
    /// Offset applied to both axes when duplicating.
    pub duplicate_offset: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            snap_threshold: DEFAULT_SNAP_THRESHOLD,
            guideline_epsilon: 1.0,
            guideline_margin: 20.0,
            click_threshold: DEFAULT_CLICK_THRESHOLD,
            min_element_size: DEFAULT_MIN_ELEMENT_SIZE,
            min_font_size: 5.0,
            max_font_size: 200.0,
            stroke_hit_tolerance: 10.0,
            pen_close_radius: 10.0,
            duplicate_offset: 20.0,
        }
    }
}

impl EngineConfig {
    /// Load a configuration from JSON, filling missing keys with defaults.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config = serde_json::from_str(json)?;
        log::debug!("Loaded engine config: {:?}", config);
        Ok(config)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.history_limit, 100);
        assert!((config.snap_threshold - 5.0).abs() < f64::EPSILON);
        assert!((config.click_threshold - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_override() {
        let config = EngineConfig::from_json(r#"{ "historyLimit": 10, "snapThreshold": 8 }"#).unwrap();
        assert_eq!(config.history_limit, 10);
        assert!((config.snap_threshold - 8.0).abs() < f64::EPSILON);
        assert!((config.guideline_margin - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_malformed_json() {
        let result = EngineConfig::from_json("{ historyLimit: ");
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = EngineConfig { pen_close_radius: 14.0, ..Default::default() };
        let json = config.to_json().unwrap();
        assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
    }
}
