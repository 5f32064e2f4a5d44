//! Lifecycle of the points dialog.
//!
//! [`ModalController`] is a plain state machine: it never touches the DOM or
//! the network. Front ends feed it user actions and transport results and
//! render whatever it reports back.

use crate::config::ModalConfig;
use crate::feedback::FeedbackState;
use crate::outcome::{Outcome, TransportError, classify};
use crate::request::{PointsEditRequest, PointsForm, points_endpoint};
use crate::session::{GameId, PlayerId, SessionRef};
use serde::{Deserialize, Serialize};

/// Session generation a submission or timer was issued under.
///
/// Every open and close starts a new generation; results carrying an older
/// ticket are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket(u64);

/// Arguments of the host page's open call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest {
    pub game_id: GameId,
    pub player_id: PlayerId,
    pub current_points: Option<i32>,
    pub player_name: String,
}

/// Field values to write into the dialog after an open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenView {
    pub points: i32,
    pub player_id: PlayerId,
    pub player_name: String,
}

/// A validated request ready to be handed to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub ticket: Ticket,
    pub session: SessionRef,
    pub url: String,
    pub request: PointsEditRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NotOpen,
    InFlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStep {
    /// Nothing to do; the click is swallowed.
    Ignored(IgnoreReason),
    /// Input failed validation; show the feedback, send nothing.
    Rejected(FeedbackState),
    Send(PendingSubmission),
}

/// Delayed hide-and-close scheduled after a successful update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DismissTimer {
    pub ticket: Ticket,
    pub after_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub outcome: Outcome,
    pub feedback: FeedbackState,
    pub dismiss: Option<DismissTimer>,
}

#[derive(Debug, Clone)]
pub struct ModalController {
    config: ModalConfig,
    session: Option<SessionRef>,
    visible: bool,
    feedback: FeedbackState,
    in_flight: bool,
    generation: u64,
}

impl Default for ModalController {
    fn default() -> Self {
        Self::new(ModalConfig::default())
    }
}

impl ModalController {
    #[must_use]
    pub fn new(config: ModalConfig) -> Self {
        Self {
            config,
            session: None,
            visible: false,
            feedback: FeedbackState::hidden(),
            in_flight: false,
            generation: 0,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ModalConfig {
        &self.config
    }

    #[must_use]
    pub const fn session(&self) -> Option<&SessionRef> {
        self.session.as_ref()
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub const fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    #[must_use]
    pub const fn feedback(&self) -> &FeedbackState {
        &self.feedback
    }

    #[must_use]
    pub const fn ticket(&self) -> Ticket {
        Ticket(self.generation)
    }

    /// Open (or re-open) the dialog for a player.
    ///
    /// Overwrites any previous session, clears stale feedback and abandons
    /// whatever submission or dismiss timer belonged to the old generation.
    pub fn open(&mut self, req: OpenRequest) -> OpenView {
        self.generation += 1;
        self.session = Some(SessionRef::new(req.game_id, req.player_id));
        self.visible = true;
        self.in_flight = false;
        self.feedback = FeedbackState::hidden();
        OpenView {
            points: req.current_points.unwrap_or(0),
            player_id: req.player_id,
            player_name: req.player_name,
        }
    }

    /// Hide the dialog. Safe to call in any state.
    pub fn close(&mut self) {
        self.generation += 1;
        self.visible = false;
        self.in_flight = false;
        self.feedback = FeedbackState::hidden();
    }

    /// Validate the form and, if possible, start a submission.
    pub fn begin_submit(&mut self, form: &PointsForm) -> SubmitStep {
        let Some(session) = self.session.clone().filter(|_| self.visible) else {
            return SubmitStep::Ignored(IgnoreReason::NotOpen);
        };
        if self.in_flight {
            return SubmitStep::Ignored(IgnoreReason::InFlight);
        }
        let request = match form.validate(session.player_id, self.config.points_range()) {
            Ok(request) => request,
            Err(err) => {
                self.feedback = FeedbackState::invalid(&err);
                return SubmitStep::Rejected(self.feedback.clone());
            }
        };
        self.in_flight = true;
        let url = points_endpoint(&self.config.endpoint_prefix, &session.game_id);
        SubmitStep::Send(PendingSubmission {
            ticket: self.ticket(),
            session,
            url,
            request,
        })
    }

    /// Classify a finished submission and update the feedback.
    ///
    /// Returns `None` when the submission belongs to an older generation.
    pub fn finish_submit(
        &mut self,
        ticket: Ticket,
        result: &Result<u16, TransportError>,
    ) -> Option<Presentation> {
        if ticket != self.ticket() {
            return None;
        }
        self.in_flight = false;
        let outcome = classify(result, self.config.too_early_policy);
        self.feedback = FeedbackState::for_outcome(outcome, self.config.dismiss_after_ms);
        let dismiss = self.feedback.dismiss_after_ms.map(|after_ms| DismissTimer {
            ticket: self.ticket(),
            after_ms,
        });
        Some(Presentation {
            outcome,
            feedback: self.feedback.clone(),
            dismiss,
        })
    }

    /// Fire a dismiss timer. Returns whether the dialog was closed.
    pub fn dismiss(&mut self, ticket: Ticket) -> bool {
        if ticket != self.ticket() || !self.visible {
            return false;
        }
        self.close();
        true
    }
}
