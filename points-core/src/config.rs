//! Tunables for the points modal.
//!
//! Every field has a default matching the stock host-page markup, so an empty
//! JSON object is a complete configuration.

use crate::feedback::DEFAULT_DISMISS_MS;
use crate::outcome::TooEarlyPolicy;
use crate::request::PointsRange;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// DOM ids of the nodes the modal binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub container: String,
    pub close_button: String,
    pub save_button: String,
    pub points_input: String,
    pub player_id_input: String,
    pub player_name: String,
    pub message: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            container: "points-modal".to_string(),
            close_button: "close-modal".to_string(),
            save_button: "modal-save-btn".to_string(),
            points_input: "modal-points-input".to_string(),
            player_id_input: "modal-player-id".to_string(),
            player_name: "player-name".to_string(),
            message: "modal-msg".to_string(),
        }
    }
}

impl ElementIds {
    fn all(&self) -> [(&'static str, &str); 7] {
        [
            ("container", &self.container),
            ("close_button", &self.close_button),
            ("save_button", &self.save_button),
            ("points_input", &self.points_input),
            ("player_id_input", &self.player_id_input),
            ("player_name", &self.player_name),
            ("message", &self.message),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalConfig {
    pub dismiss_after_ms: u32,
    /// Prepended to `/{game_id}/action/points`.
    pub endpoint_prefix: String,
    pub too_early_policy: TooEarlyPolicy,
    pub min_points: i32,
    pub max_points: i32,
    pub ids: ElementIds,
    pub visible_class: String,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            dismiss_after_ms: DEFAULT_DISMISS_MS,
            endpoint_prefix: String::new(),
            too_early_policy: TooEarlyPolicy::default(),
            min_points: PointsRange::DEFAULT_MIN,
            max_points: PointsRange::DEFAULT_MAX,
            ids: ElementIds::default(),
            visible_class: "show".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("element id for {0} must not be empty")]
    EmptyId(&'static str),
    #[error("visible class must not be empty")]
    EmptyVisibleClass,
    #[error("points range invalid (min {min} > max {max})")]
    InvertedRange { min: i32, max: i32 },
}

impl ModalConfig {
    /// Parse and validate a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or fails [`Self::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field invariants that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, id) in self.ids.all() {
            if id.trim().is_empty() {
                return Err(ConfigError::EmptyId(name));
            }
        }
        if self.visible_class.trim().is_empty() {
            return Err(ConfigError::EmptyVisibleClass);
        }
        if self.min_points > self.max_points {
            return Err(ConfigError::InvertedRange {
                min: self.min_points,
                max: self.max_points,
            });
        }
        Ok(())
    }

    #[must_use]
    pub const fn points_range(&self) -> PointsRange {
        PointsRange::new(self.min_points, self.max_points)
    }
}
