//! Points Modal Core
//!
//! Platform-agnostic logic behind the host's "edit points" dialog.
//! This crate provides session state, input validation, outcome
//! classification and feedback without DOM or network dependencies.

pub mod client;
pub mod config;
pub mod feedback;
pub mod modal;
pub mod outcome;
pub mod request;
pub mod session;

// Re-export commonly used types
pub use client::{
    PointsTransport, ScriptedTransport, SentRequest, SubmissionClient, SubmitReport, submit,
};
pub use config::{ConfigError, ElementIds, ModalConfig};
pub use feedback::{
    DEFAULT_DISMISS_MS, FeedbackColor, FeedbackState, MSG_FORBIDDEN, MSG_RETRY, MSG_SUCCESS,
    MSG_TOO_EARLY,
};
pub use modal::{
    DismissTimer, IgnoreReason, ModalController, OpenRequest, OpenView, PendingSubmission,
    Presentation, SubmitStep, Ticket,
};
pub use outcome::{Outcome, TooEarlyPolicy, TransportError, classify, classify_status};
pub use request::{PointsEditRequest, PointsForm, PointsRange, ValidationError, points_endpoint};
pub use session::{GameId, PlayerId, SessionError, SessionRef};
