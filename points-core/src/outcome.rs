use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const STATUS_FORBIDDEN: u16 = 403;
pub const STATUS_TOO_EARLY: u16 = 425;

/// Classified result of one submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    /// Caller is not the host of the game.
    Forbidden,
    /// The game has not started yet.
    TooEarly,
    OtherFailure,
    /// The request never completed.
    NetworkFailure,
}

impl Outcome {
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    /// Whether retrying from the same modal can plausibly succeed.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(
            self,
            Self::TooEarly | Self::OtherFailure | Self::NetworkFailure
        )
    }
}

/// How a `425 Too Early` response is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TooEarlyPolicy {
    /// Show the dedicated "game has not started" message.
    #[default]
    Distinct,
    /// Fold 425 into the generic failure message.
    Generic,
}

/// Failure below the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request encoding error: {0}")]
    Encode(String),
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encode(err.to_string())
    }
}

/// Map a raw transport result onto an [`Outcome`].
#[must_use]
pub fn classify(result: &Result<u16, TransportError>, policy: TooEarlyPolicy) -> Outcome {
    match result {
        Err(_) => Outcome::NetworkFailure,
        Ok(status) => classify_status(*status, policy),
    }
}

/// Map an HTTP status code onto an [`Outcome`].
#[must_use]
pub const fn classify_status(status: u16, policy: TooEarlyPolicy) -> Outcome {
    match status {
        200..=299 => Outcome::Success,
        STATUS_FORBIDDEN => Outcome::Forbidden,
        STATUS_TOO_EARLY => match policy {
            TooEarlyPolicy::Distinct => Outcome::TooEarly,
            TooEarlyPolicy::Generic => Outcome::OtherFailure,
        },
        _ => Outcome::OtherFailure,
    }
}
