//! Request model for the points mutation endpoint.
//!
//! Raw form text is validated into a [`PointsEditRequest`] before anything
//! touches the network, so the endpoint never sees a coerced `NaN` or an
//! empty player id.

use crate::session::{GameId, PlayerId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Path segment appended to `/{game_id}` for the points mutation.
pub const POINTS_ACTION_PATH: &str = "action/points";

/// JSON body posted to the points endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsEditRequest {
    pub player_id: PlayerId,
    pub points: i32,
}

/// Inclusive bounds on an edited points value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsRange {
    pub min: i32,
    pub max: i32,
}

impl PointsRange {
    pub const DEFAULT_MIN: i32 = -99_999;
    pub const DEFAULT_MAX: i32 = 99_999;

    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub const fn contains(&self, value: i64) -> bool {
        value >= self.min as i64 && value <= self.max as i64
    }
}

impl Default for PointsRange {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN, Self::DEFAULT_MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter a points value.")]
    EmptyPoints,
    #[error("Points must be a whole number (got \"{0}\").")]
    NonNumericPoints(String),
    #[error("Points must be between {min} and {max} (got {value}).")]
    PointsOutOfRange { value: i64, min: i32, max: i32 },
    #[error("Player id does not match the open player (got \"{0}\").")]
    InvalidPlayerId(String),
}

/// Raw values read from the modal's form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PointsForm {
    pub points: String,
    pub player_id: String,
}

impl PointsForm {
    #[must_use]
    pub fn new(points: impl Into<String>, player_id: impl Into<String>) -> Self {
        Self {
            points: points.into(),
            player_id: player_id.into(),
        }
    }

    /// Validate the raw field values and build the request body for
    /// `player`, the player of the open session.
    ///
    /// The hidden player field never chooses the target. A blank field is
    /// accepted; any other value must name `player`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found; the player field is
    /// checked before the points value.
    pub fn validate(
        &self,
        player: PlayerId,
        range: PointsRange,
    ) -> Result<PointsEditRequest, ValidationError> {
        check_player_field(&self.player_id, player)?;
        let points = parse_points(&self.points, range)?;
        Ok(PointsEditRequest {
            player_id: player,
            points,
        })
    }
}

fn check_player_field(raw: &str, player: PlayerId) -> Result<(), ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(());
    }
    match trimmed.parse::<i32>() {
        Ok(id) if id == player.get() => Ok(()),
        _ => Err(ValidationError::InvalidPlayerId(trimmed.to_string())),
    }
}

fn parse_points(raw: &str, range: PointsRange) -> Result<i32, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyPoints);
    }
    let value = trimmed
        .parse::<i64>()
        .map_err(|_| ValidationError::NonNumericPoints(trimmed.to_string()))?;
    if !range.contains(value) {
        return Err(ValidationError::PointsOutOfRange {
            value,
            min: range.min,
            max: range.max,
        });
    }
    // `contains` bounds the value by two i32 limits.
    i32::try_from(value).map_err(|_| ValidationError::PointsOutOfRange {
        value,
        min: range.min,
        max: range.max,
    })
}

/// Build the endpoint URL for a game, honoring an optional mount prefix.
#[must_use]
pub fn points_endpoint(prefix: &str, game_id: &GameId) -> String {
    let prefix = prefix.trim_end_matches('/');
    format!("{prefix}/{game_id}/{POINTS_ACTION_PATH}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> PointsRange {
        PointsRange::default()
    }

    const P4: PlayerId = PlayerId(4);

    #[test]
    fn request_body_matches_endpoint_shape() {
        let body = PointsEditRequest {
            player_id: PlayerId(7),
            points: -3,
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"player_id":7,"points":-3}"#
        );
    }

    #[test]
    fn validate_accepts_padded_integers() {
        let req = PointsForm::new(" 15 ", "4").validate(P4, range()).unwrap();
        assert_eq!(req.player_id, PlayerId(4));
        assert_eq!(req.points, 15);
    }

    #[test]
    fn validate_rejects_bad_points() {
        assert_eq!(
            PointsForm::new("", "4").validate(P4, range()),
            Err(ValidationError::EmptyPoints)
        );
        assert_eq!(
            PointsForm::new("1.5", "4").validate(P4, range()),
            Err(ValidationError::NonNumericPoints("1.5".into()))
        );
        assert_eq!(
            PointsForm::new("100000", "4").validate(P4, range()),
            Err(ValidationError::PointsOutOfRange {
                value: 100_000,
                min: PointsRange::DEFAULT_MIN,
                max: PointsRange::DEFAULT_MAX,
            })
        );
    }

    #[test]
    fn validate_checks_player_before_points() {
        assert_eq!(
            PointsForm::new("abc", "5").validate(P4, range()),
            Err(ValidationError::InvalidPlayerId("5".into()))
        );
        assert_eq!(
            PointsForm::new("1", "-2").validate(P4, range()),
            Err(ValidationError::InvalidPlayerId("-2".into()))
        );
    }

    #[test]
    fn blank_player_field_uses_session_player() {
        let req = PointsForm::new("8", "  ").validate(P4, range()).unwrap();
        assert_eq!(req.player_id, P4);
        assert_eq!(req.points, 8);
    }

    #[test]
    fn huge_values_do_not_overflow() {
        let err = PointsForm::new("99999999999999", "1")
            .validate(PlayerId(1), PointsRange::new(i32::MIN, i32::MAX))
            .unwrap_err();
        assert!(matches!(err, ValidationError::PointsOutOfRange { .. }));
    }

    #[test]
    fn endpoint_joins_prefix_and_game() {
        let game = GameId::new("abc").unwrap();
        assert_eq!(points_endpoint("", &game), "/abc/action/points");
        assert_eq!(points_endpoint("/rulette/", &game), "/rulette/abc/action/points");
    }
}
