//! Canvas configuration.

use crate::snap::GRID_SIZE;
use kurbo::{Rect, Size};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Hint phrases shown on a card until the user types into it.
pub const DEFAULT_PLACEHOLDERS: &[&str] = &[
    "Escreva uma ideia aqui…",
    "O que você está pensando?",
    "Comece digitando…",
    "Planeje algo incrível…",
    "Escreva maravilhas…",
    "Suas notinhas...",
];

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Grid size must be positive, got {0}")]
    GridSize(f64),
    #[error("Invalid zoom bounds: min {min}, max {max}")]
    ZoomBounds { min: f64, max: f64 },
    #[error("Zoom step must be greater than 1, got {0}")]
    ZoomStep(f64),
    #[error("Card size must be positive, got {0}x{1}")]
    CardSize(f64, f64),
    #[error("Placeholder pool is empty")]
    NoPlaceholders,
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables for the canvas core.
///
/// Every field has a default, so a partial JSON document only overrides what
/// it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Snap grid spacing in world units.
    pub grid_size: f64,
    /// Fixed size of every card body.
    pub card_size: Size,
    /// Corner radius of the card body.
    pub card_corner_radius: f64,
    /// Inset of the text region inside the card body.
    pub card_text_inset: f64,
    /// Smallest allowed zoom factor.
    pub min_zoom: f64,
    /// Largest allowed zoom factor.
    pub max_zoom: f64,
    /// Zoom multiplier applied per wheel notch.
    pub wheel_zoom_step: f64,
    /// Zoom multiplier applied per pinch gesture tick.
    pub pinch_zoom_step: f64,
    /// How long the zoom indicator stays fully visible.
    pub indicator_hold_ms: u64,
    /// Duration of the zoom indicator fade-out.
    pub indicator_fade_ms: u64,
    /// Finite world extent. `None` means unbounded.
    pub world_bounds: Option<Rect>,
    /// Keep panning inside `world_bounds`.
    pub clamp_pan_to_world: bool,
    /// Maximum delay between two presses of a double-click.
    pub double_click_ms: u64,
    /// Maximum pointer travel between two presses of a double-click.
    pub double_click_distance: f64,
    /// Pool of card placeholder phrases.
    pub placeholders: Vec<String>,
}

impl Default for CanvasConfig {
    // Deliberately 3.14, not PI.
    #[allow(clippy::approx_constant)]
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            card_size: Size::new(220.0, 140.0),
            card_corner_radius: 12.0,
            card_text_inset: 10.0,
            min_zoom: 0.5,
            max_zoom: 3.14,
            wheel_zoom_step: 1.12,
            pinch_zoom_step: 1.08,
            indicator_hold_ms: 1000,
            indicator_fade_ms: 300,
            world_bounds: Some(Rect::new(-5000.0, -5000.0, 5000.0, 5000.0)),
            clamp_pan_to_world: false,
            double_click_ms: 500,
            double_click_distance: 5.0,
            placeholders: DEFAULT_PLACEHOLDERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CanvasConfig {
    /// Parse a config from JSON and validate it.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded canvas config: grid {} zoom {}..{}",
            config.grid_size,
            config.min_zoom,
            config.max_zoom
        );
        Ok(config)
    }

    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.grid_size <= 0.0 || !self.grid_size.is_finite() {
            log::warn!("Rejecting grid size {}", self.grid_size);
            return Err(ConfigError::GridSize(self.grid_size));
        }
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom && self.max_zoom.is_finite()) {
            log::warn!("Rejecting zoom bounds {}..{}", self.min_zoom, self.max_zoom);
            return Err(ConfigError::ZoomBounds {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        for step in [self.wheel_zoom_step, self.pinch_zoom_step] {
            if step <= 1.0 || !step.is_finite() {
                log::warn!("Rejecting zoom step {step}");
                return Err(ConfigError::ZoomStep(step));
            }
        }
        if self.card_size.width <= 0.0 || self.card_size.height <= 0.0 {
            return Err(ConfigError::CardSize(self.card_size.width, self.card_size.height));
        }
        if self.placeholders.is_empty() {
            return Err(ConfigError::NoPlaceholders);
        }
        Ok(())
    }

    /// Indicator hold time as a duration.
    pub fn indicator_hold(&self) -> Duration {
        Duration::from_millis(self.indicator_hold_ms)
    }

    /// Indicator fade time as a duration.
    pub fn indicator_fade(&self) -> Duration {
        Duration::from_millis(self.indicator_fade_ms)
    }

    /// Double-click window as a duration.
    pub fn double_click_time(&self) -> Duration {
        Duration::from_millis(self.double_click_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = CanvasConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.placeholders.len(), 6);
        assert!((config.grid_size - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CanvasConfig::from_json(r#"{ "grid_size": 20.0, "max_zoom": 4.0 }"#).unwrap();
        assert!((config.grid_size - 20.0).abs() < f64::EPSILON);
        assert!((config.max_zoom - 4.0).abs() < f64::EPSILON);
        assert!((config.min_zoom - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.card_size, Size::new(220.0, 140.0));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = CanvasConfig::default();
        let json = config.to_json().unwrap();
        let back = CanvasConfig::from_json(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn test_invalid_json() {
        let err = CanvasConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_inverted_zoom_bounds() {
        let err = CanvasConfig::from_json(r#"{ "min_zoom": 2.0, "max_zoom": 1.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::ZoomBounds { .. }));
    }

    #[test]
    fn test_rejects_bad_values() {
        let config = CanvasConfig {
            grid_size: 0.0,
            ..CanvasConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::GridSize(_))));

        let config = CanvasConfig {
            wheel_zoom_step: 0.9,
            ..CanvasConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZoomStep(_))));

        let config = CanvasConfig {
            placeholders: Vec::new(),
            ..CanvasConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoPlaceholders)));
    }
}
