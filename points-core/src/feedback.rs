use crate::outcome::Outcome;
use crate::request::ValidationError;
use serde::{Deserialize, Serialize};

pub const MSG_SUCCESS: &str = "Points updated!";
pub const MSG_FORBIDDEN: &str = "Failed. Only the host can change points.";
pub const MSG_TOO_EARLY: &str = "Failed. The game has not started yet.";
pub const MSG_RETRY: &str = "Failed. Try again.";

/// Default delay before a successful update dismisses the modal.
pub const DEFAULT_DISMISS_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackColor {
    #[default]
    Neutral,
    Green,
    Red,
}

impl FeedbackColor {
    /// CSS color value written to the message area.
    #[must_use]
    pub const fn css(self) -> &'static str {
        match self {
            Self::Neutral => "",
            Self::Green => "green",
            Self::Red => "red",
        }
    }
}

/// What the message area should currently show.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeedbackState {
    pub visible_text: String,
    pub color: FeedbackColor,
    pub visible: bool,
    pub dismiss_after_ms: Option<u32>,
}

impl FeedbackState {
    /// Hidden, neutral message area.
    #[must_use]
    pub fn hidden() -> Self {
        Self::default()
    }

    /// Feedback for a classified submission.
    #[must_use]
    pub fn for_outcome(outcome: Outcome, dismiss_after_ms: u32) -> Self {
        match outcome {
            Outcome::Success => Self {
                visible_text: MSG_SUCCESS.to_string(),
                color: FeedbackColor::Green,
                visible: true,
                dismiss_after_ms: Some(dismiss_after_ms),
            },
            Outcome::Forbidden => Self::failure(MSG_FORBIDDEN),
            Outcome::TooEarly => Self::failure(MSG_TOO_EARLY),
            Outcome::OtherFailure | Outcome::NetworkFailure => Self::failure(MSG_RETRY),
        }
    }

    /// Feedback for input rejected before sending.
    #[must_use]
    pub fn invalid(err: &ValidationError) -> Self {
        Self::failure(format!("Invalid input. {err}"))
    }

    fn failure(text: impl Into<String>) -> Self {
        Self {
            visible_text: text.into(),
            color: FeedbackColor::Red,
            visible: true,
            dismiss_after_ms: None,
        }
    }
}
