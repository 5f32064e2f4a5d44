//! Normalization of the loosely typed arguments host templates pass to
//! `openPointsModal`.
//!
//! Templates render ids either as numbers or quoted strings, and older pages
//! call the three-argument form `(gameId, playerId, playerName)` without a
//! current score.

use points_core::{GameId, OpenRequest, PlayerId, SessionError};
use thiserror::Error;

/// A JavaScript argument reduced to the shapes the modal cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Missing,
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpenArgsError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("player id must be a non-negative integer (got {0})")]
    PlayerId(String),
    #[error("current points must be an integer (got {0})")]
    Points(String),
}

impl ArgValue {
    fn describe(&self) -> String {
        match self {
            Self::Missing => "nothing".to_string(),
            Self::Number(n) => n.to_string(),
            Self::Text(t) => format!("\"{t}\""),
        }
    }

    fn as_integer(&self) -> Option<i32> {
        match self {
            Self::Missing => None,
            Self::Number(n) => number_to_i32(*n),
            Self::Text(t) => t.trim().parse::<i32>().ok(),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn number_to_i32(n: f64) -> Option<i32> {
    let in_range = n >= f64::from(i32::MIN) && n <= f64::from(i32::MAX);
    (n.is_finite() && n.fract() == 0.0 && in_range).then_some(n as i32)
}

/// Build an [`OpenRequest`] from raw call arguments.
///
/// # Errors
///
/// Returns an error when the game id is blank or an id/score is not an
/// integer.
pub fn parse_open_args(
    game_id: ArgValue,
    player_id: &ArgValue,
    current_points: ArgValue,
    player_name: ArgValue,
) -> Result<OpenRequest, OpenArgsError> {
    let game_id = match game_id {
        ArgValue::Text(text) => GameId::new(text)?,
        ArgValue::Number(n) => GameId::new(n.to_string())?,
        ArgValue::Missing => return Err(SessionError::EmptyGameId.into()),
    };
    let player_id = player_id
        .as_integer()
        .filter(|id| *id >= 0)
        .map(PlayerId)
        .ok_or_else(|| OpenArgsError::PlayerId(player_id.describe()))?;

    let (current_points, player_name) = match (current_points, player_name) {
        (ArgValue::Text(name), ArgValue::Missing) => (ArgValue::Missing, name),
        (points, ArgValue::Text(name)) => (points, name),
        (points, other) => (points, text_or_empty(other)),
    };
    let current_points = match current_points {
        ArgValue::Missing => None,
        other => Some(
            other
                .as_integer()
                .ok_or_else(|| OpenArgsError::Points(other.describe()))?,
        ),
    };

    Ok(OpenRequest {
        game_id,
        player_id,
        current_points,
        player_name,
    })
}

fn text_or_empty(value: ArgValue) -> String {
    match value {
        ArgValue::Text(text) => text,
        ArgValue::Number(n) => n.to_string(),
        ArgValue::Missing => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> ArgValue {
        ArgValue::Text(s.to_string())
    }

    #[test]
    fn four_argument_form() {
        let req = parse_open_args(
            text("abc"),
            &ArgValue::Number(3.0),
            ArgValue::Number(42.0),
            text("Ada"),
        )
        .unwrap();
        assert_eq!(req.game_id.as_str(), "abc");
        assert_eq!(req.player_id, PlayerId(3));
        assert_eq!(req.current_points, Some(42));
        assert_eq!(req.player_name, "Ada");
    }

    #[test]
    fn three_argument_form_defaults_points() {
        let req =
            parse_open_args(text("abc"), &text("7"), text("Lin"), ArgValue::Missing).unwrap();
        assert_eq!(req.player_id, PlayerId(7));
        assert_eq!(req.current_points, None);
        assert_eq!(req.player_name, "Lin");
    }

    #[test]
    fn numeric_text_points_are_accepted() {
        let req = parse_open_args(text("abc"), &text("7"), text(" -5 "), text("Lin")).unwrap();
        assert_eq!(req.current_points, Some(-5));
    }

    #[test]
    fn rejects_blank_game_and_bad_ids() {
        assert_eq!(
            parse_open_args(text(" "), &text("1"), ArgValue::Missing, text("x")),
            Err(OpenArgsError::Session(SessionError::EmptyGameId))
        );
        assert_eq!(
            parse_open_args(text("g"), &ArgValue::Number(1.5), ArgValue::Missing, text("x")),
            Err(OpenArgsError::PlayerId("1.5".to_string()))
        );
        assert_eq!(
            parse_open_args(text("g"), &text("-1"), ArgValue::Missing, text("x")),
            Err(OpenArgsError::PlayerId("\"-1\"".to_string()))
        );
        assert_eq!(
            parse_open_args(text("g"), &text("1"), ArgValue::Number(f64::NAN), text("x")),
            Err(OpenArgsError::Points("NaN".to_string()))
        );
    }
}
