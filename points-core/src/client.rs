//! Submission client and the transport seam it sends through.

use crate::feedback::FeedbackState;
use crate::modal::{IgnoreReason, ModalController, PendingSubmission, Presentation, SubmitStep};
use crate::outcome::TransportError;
use crate::request::{PointsEditRequest, PointsForm};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::future::Future;

/// Sends a points edit to the server and reports the HTTP status.
///
/// Implementations must not interpret the status; classification happens in
/// [`crate::outcome::classify`].
pub trait PointsTransport {
    /// POST `body` as JSON to `url`.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] when no response was received.
    fn post_points(
        &self,
        url: &str,
        body: &PointsEditRequest,
    ) -> impl Future<Output = Result<u16, TransportError>>;
}

/// Issues exactly one request per accepted submission.
#[derive(Debug, Clone, Default)]
pub struct SubmissionClient<T> {
    transport: T,
}

impl<T: PointsTransport> SubmissionClient<T> {
    pub const fn new(transport: T) -> Self {
        Self { transport }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a pending submission and return the raw result.
    ///
    /// # Errors
    ///
    /// Propagates the transport's error unchanged.
    #[allow(clippy::future_not_send)] // Browser transports are single-threaded.
    pub async fn send(&self, pending: &PendingSubmission) -> Result<u16, TransportError> {
        self.transport
            .post_points(&pending.url, &pending.request)
            .await
    }
}

/// What a full submit round trip did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitReport {
    Ignored(IgnoreReason),
    Rejected(FeedbackState),
    /// The dialog moved to a new session while the request was out.
    Stale,
    Presented(Presentation),
}

/// Run one submission against a shared controller.
///
/// The controller is never borrowed across the network await.
#[allow(clippy::future_not_send)]
pub async fn submit<T: PointsTransport>(
    modal: &RefCell<ModalController>,
    client: &SubmissionClient<T>,
    form: &PointsForm,
) -> SubmitReport {
    let step = modal.borrow_mut().begin_submit(form);
    let pending = match step {
        SubmitStep::Ignored(reason) => return SubmitReport::Ignored(reason),
        SubmitStep::Rejected(feedback) => return SubmitReport::Rejected(feedback),
        SubmitStep::Send(pending) => pending,
    };
    let result = client.send(&pending).await;
    modal
        .borrow_mut()
        .finish_submit(pending.ticket, &result)
        .map_or(SubmitReport::Stale, SubmitReport::Presented)
}

/// A request recorded by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentRequest {
    pub url: String,
    pub body: PointsEditRequest,
}

/// In-memory transport that replays canned results in order.
///
/// Once the script runs out every request gets the fallback result.
#[derive(Debug)]
pub struct ScriptedTransport {
    script: RefCell<VecDeque<Result<u16, TransportError>>>,
    fallback: Result<u16, TransportError>,
    sent: RefCell<Vec<SentRequest>>,
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ScriptedTransport {
    #[must_use]
    pub fn new(script: Vec<Result<u16, TransportError>>) -> Self {
        Self {
            script: RefCell::new(script.into()),
            fallback: Ok(200),
            sent: RefCell::new(Vec::new()),
        }
    }

    /// Transport that answers every request with `status`.
    #[must_use]
    pub fn always(status: u16) -> Self {
        Self::new(Vec::new()).with_fallback(Ok(status))
    }

    /// Transport whose every request fails below HTTP.
    #[must_use]
    pub fn offline() -> Self {
        Self::new(Vec::new()).with_fallback(Err(TransportError::Network(
            "Failed to fetch".to_string(),
        )))
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: Result<u16, TransportError>) -> Self {
        self.fallback = fallback;
        self
    }

    #[must_use]
    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.borrow().clone()
    }

    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.sent.borrow().len()
    }
}

impl PointsTransport for ScriptedTransport {
    fn post_points(
        &self,
        url: &str,
        body: &PointsEditRequest,
    ) -> impl Future<Output = Result<u16, TransportError>> {
        self.sent.borrow_mut().push(SentRequest {
            url: url.to_string(),
            body: *body,
        });
        let result = self
            .script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        std::future::ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::OpenRequest;
    use crate::outcome::Outcome;
    use crate::session::{GameId, PlayerId};
    use futures::executor::block_on;

    fn opened(game: &str, player: i32) -> RefCell<ModalController> {
        let mut modal = ModalController::default();
        modal.open(OpenRequest {
            game_id: GameId::new(game).unwrap(),
            player_id: PlayerId(player),
            current_points: Some(10),
            player_name: "Ada".to_string(),
        });
        RefCell::new(modal)
    }

    #[test]
    fn submit_posts_body_to_game_endpoint() {
        let modal = opened("G", 8);
        let client = SubmissionClient::new(ScriptedTransport::always(200));
        let report = block_on(submit(&modal, &client, &PointsForm::new("14", "8")));

        let SubmitReport::Presented(shown) = report else {
            panic!("expected presentation, got {report:?}");
        };
        assert_eq!(shown.outcome, Outcome::Success);
        assert_eq!(
            client.transport().sent(),
            vec![SentRequest {
                url: "/G/action/points".to_string(),
                body: PointsEditRequest {
                    player_id: PlayerId(8),
                    points: 14,
                },
            }]
        );
    }

    #[test]
    fn network_failure_keeps_modal_open() {
        let modal = opened("G", 8);
        let client = SubmissionClient::new(ScriptedTransport::offline());
        let report = block_on(submit(&modal, &client, &PointsForm::new("1", "8")));
        assert!(matches!(
            report,
            SubmitReport::Presented(Presentation {
                outcome: Outcome::NetworkFailure,
                ..
            })
        ));
        assert!(modal.borrow().is_visible());
        assert!(!modal.borrow().is_in_flight());
    }

    #[test]
    fn rejected_input_sends_nothing() {
        let modal = opened("G", 8);
        let client = SubmissionClient::new(ScriptedTransport::default());
        let report = block_on(submit(&modal, &client, &PointsForm::new("", "8")));
        assert!(matches!(report, SubmitReport::Rejected(_)));
        assert_eq!(client.transport().sent_count(), 0);
    }

    #[test]
    fn script_is_replayed_in_order() {
        let modal = opened("G", 8);
        let client = SubmissionClient::new(ScriptedTransport::new(vec![Ok(403), Ok(425)]));
        let form = PointsForm::new("1", "8");
        let outcomes: Vec<_> = (0..3)
            .map(|_| match block_on(submit(&modal, &client, &form)) {
                SubmitReport::Presented(p) => p.outcome,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(
            outcomes,
            vec![Outcome::Forbidden, Outcome::TooEarly, Outcome::Success]
        );
    }
}
