use anyhow::{Context, Result, bail, ensure};
use futures::executor::block_on;
use points_core::{
    FeedbackColor, GameId, ModalConfig, ModalController, OpenRequest, Outcome, PlayerId,
    PointsForm, Presentation, ScriptedTransport, SubmissionClient, SubmitReport,
};
use std::cell::RefCell;

/// A modal controller wired to a scripted transport, standing in for the page.
pub struct Harness {
    modal: RefCell<ModalController>,
    client: SubmissionClient<ScriptedTransport>,
    player_field: String,
}

impl Harness {
    pub fn new(config: ModalConfig, transport: ScriptedTransport) -> Self {
        Self {
            modal: RefCell::new(ModalController::new(config)),
            client: SubmissionClient::new(transport),
            player_field: String::new(),
        }
    }

    pub fn with_transport(transport: ScriptedTransport) -> Self {
        Self::new(ModalConfig::default(), transport)
    }

    pub fn open(&mut self, game: &str, player: i32, points: Option<i32>) -> Result<i32> {
        let view = self.modal.borrow_mut().open(OpenRequest {
            game_id: GameId::new(game).context("building game id")?,
            player_id: PlayerId(player),
            current_points: points,
            player_name: format!("Player {player}"),
        });
        self.player_field = view.player_id.to_string();
        Ok(view.points)
    }

    pub fn close(&self) {
        self.modal.borrow_mut().close();
    }

    pub fn submit(&self, points: &str) -> SubmitReport {
        let form = PointsForm::new(points, self.player_field.clone());
        block_on(points_core::submit(&self.modal, &self.client, &form))
    }

    pub fn submit_presented(&self, points: &str) -> Result<Presentation> {
        match self.submit(points) {
            SubmitReport::Presented(p) => Ok(p),
            other => bail!("expected a classified response, got {other:?}"),
        }
    }

    pub fn modal(&self) -> std::cell::Ref<'_, ModalController> {
        self.modal.borrow()
    }

    pub fn modal_mut(&self) -> std::cell::RefMut<'_, ModalController> {
        self.modal.borrow_mut()
    }

    pub fn transport(&self) -> &ScriptedTransport {
        self.client.transport()
    }

    pub fn expect_outcome(
        &self,
        shown: &Presentation,
        outcome: Outcome,
        color: FeedbackColor,
        needle: &str,
    ) -> Result<()> {
        ensure!(
            shown.outcome == outcome,
            "expected {outcome:?}, got {:?}",
            shown.outcome
        );
        ensure!(
            shown.feedback.color == color,
            "expected {color:?} feedback, got {:?}",
            shown.feedback.color
        );
        ensure!(
            shown.feedback.visible_text.contains(needle),
            "message {:?} does not mention {needle:?}",
            shown.feedback.visible_text
        );
        ensure!(
            self.modal().is_visible(),
            "modal closed immediately after the response"
        );
        Ok(())
    }
}
