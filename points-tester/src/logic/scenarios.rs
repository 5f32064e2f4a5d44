use anyhow::{Result, ensure};
use points_core::{
    FeedbackColor, IgnoreReason, ModalConfig, Outcome, PointsForm, ScriptedTransport, SubmitReport,
    SubmitStep, TooEarlyPolicy, TransportError,
};

use super::harness::Harness;

fn success_autoclose() -> Result<()> {
    let mut h = Harness::with_transport(ScriptedTransport::always(200));
    h.open("G", 1, Some(10))?;
    let shown = h.submit_presented("15")?;
    h.expect_outcome(&shown, Outcome::Success, FeedbackColor::Green, "Points updated!")?;
    let timer = shown
        .dismiss
        .ok_or_else(|| anyhow::anyhow!("success did not schedule a dismiss"))?;
    ensure!(timer.after_ms == 5_000, "dismiss after {} ms", timer.after_ms);
    ensure!(h.modal_mut().dismiss(timer.ticket), "dismiss did not close");
    ensure!(!h.modal().is_visible(), "modal still visible after dismiss");
    ensure!(!h.modal().feedback().visible, "message still visible after dismiss");
    Ok(())
}

fn forbidden() -> Result<()> {
    let mut h = Harness::with_transport(ScriptedTransport::always(403));
    h.open("G", 1, Some(10))?;
    let shown = h.submit_presented("15")?;
    h.expect_outcome(
        &shown,
        Outcome::Forbidden,
        FeedbackColor::Red,
        "Only the host can change points",
    )?;
    ensure!(shown.dismiss.is_none(), "failure scheduled an auto-close");
    Ok(())
}

fn too_early() -> Result<()> {
    let mut h = Harness::with_transport(ScriptedTransport::always(425));
    h.open("G", 1, Some(10))?;
    let shown = h.submit_presented("15")?;
    h.expect_outcome(
        &shown,
        Outcome::TooEarly,
        FeedbackColor::Red,
        "The game has not started yet",
    )
}

fn too_early_generic() -> Result<()> {
    let config = ModalConfig {
        too_early_policy: TooEarlyPolicy::Generic,
        ..ModalConfig::default()
    };
    let mut h = Harness::new(config, ScriptedTransport::always(425));
    h.open("G", 1, Some(10))?;
    let shown = h.submit_presented("15")?;
    h.expect_outcome(&shown, Outcome::OtherFailure, FeedbackColor::Red, "Try again")
}

fn server_error() -> Result<()> {
    let mut h = Harness::with_transport(ScriptedTransport::always(500));
    h.open("G", 1, Some(10))?;
    let shown = h.submit_presented("15")?;
    h.expect_outcome(&shown, Outcome::OtherFailure, FeedbackColor::Red, "Try again")
}

fn network_failure() -> Result<()> {
    let mut h = Harness::with_transport(ScriptedTransport::offline());
    h.open("G", 1, Some(10))?;
    let shown = h.submit_presented("15")?;
    h.expect_outcome(
        &shown,
        Outcome::NetworkFailure,
        FeedbackColor::Red,
        "Try again",
    )?;
    // The modal stays usable: a retry goes out.
    let retry = h.submit(" 15 ");
    ensure!(
        matches!(retry, SubmitReport::Presented(_)),
        "retry after network failure was {retry:?}"
    );
    ensure!(h.transport().sent_count() == 2, "retry was not sent");
    Ok(())
}

fn double_submit() -> Result<()> {
    let mut h = Harness::with_transport(ScriptedTransport::always(200));
    h.open("G", 1, Some(10))?;
    let form = PointsForm::new("15", "1");
    let first = h.modal_mut().begin_submit(&form);
    let second = h.modal_mut().begin_submit(&form);
    ensure!(matches!(first, SubmitStep::Send(_)), "first click was {first:?}");
    ensure!(
        second == SubmitStep::Ignored(IgnoreReason::InFlight),
        "second click was {second:?}"
    );
    Ok(())
}

fn invalid_input() -> Result<()> {
    let mut h = Harness::with_transport(ScriptedTransport::always(200));
    h.open("G", 1, Some(10))?;
    for bad in ["", "abc", "2.5", "1000000"] {
        let report = h.submit(bad);
        ensure!(
            matches!(report, SubmitReport::Rejected(_)),
            "input {bad:?} was {report:?}"
        );
    }
    ensure!(h.transport().sent_count() == 0, "invalid input reached the server");
    ensure!(
        h.modal().feedback().color == FeedbackColor::Red,
        "validation message is not red"
    );
    Ok(())
}

fn reopen_clears_feedback() -> Result<()> {
    let mut h = Harness::with_transport(ScriptedTransport::always(403));
    h.open("G", 1, Some(10))?;
    h.submit_presented("15")?;
    let points = h.open("G", 2, None)?;
    ensure!(points == 0, "omitted score opened as {points}");
    let fb = h.modal().feedback().clone();
    ensure!(!fb.visible && fb.visible_text.is_empty(), "stale feedback {fb:?}");
    Ok(())
}

fn stale_dismiss() -> Result<()> {
    let mut h = Harness::with_transport(ScriptedTransport::always(200));
    h.open("G", 1, Some(10))?;
    let timer = h
        .submit_presented("15")?
        .dismiss
        .ok_or_else(|| anyhow::anyhow!("no dismiss timer"))?;
    h.close();
    h.open("G", 2, Some(3))?;
    ensure!(
        !h.modal_mut().dismiss(timer.ticket),
        "old timer closed the reopened modal"
    );
    ensure!(h.modal().is_visible(), "reopened modal is hidden");
    Ok(())
}

fn endpoint_target() -> Result<()> {
    let mut h = Harness::with_transport(ScriptedTransport::new(vec![Err(
        TransportError::Network("reset".into()),
    )]));
    h.open("first", 1, Some(0))?;
    h.open("abc123", 9, Some(0))?;
    h.submit("-4");
    let sent = h.transport().sent();
    ensure!(sent.len() == 1, "expected one request, saw {}", sent.len());
    ensure!(
        sent[0].url == "/abc123/action/points",
        "posted to {}",
        sent[0].url
    );
    let body = serde_json::to_string(&sent[0].body)?;
    ensure!(
        body == r#"{"player_id":9,"points":-4}"#,
        "unexpected body {body}"
    );
    Ok(())
}

pub struct LogicScenario {
    pub key: &'static str,
    pub description: &'static str,
    pub run: fn() -> Result<()>,
}

pub const LOGIC_SCENARIOS: &[LogicScenario] = &[
    LogicScenario {
        key: "success-autoclose",
        description: "2xx shows green confirmation then closes after the delay",
        run: success_autoclose,
    },
    LogicScenario {
        key: "forbidden",
        description: "403 explains that only the host can change points",
        run: forbidden,
    },
    LogicScenario {
        key: "too-early",
        description: "425 reports the game has not started",
        run: too_early,
    },
    LogicScenario {
        key: "too-early-generic",
        description: "425 folds into the retry message under the generic policy",
        run: too_early_generic,
    },
    LogicScenario {
        key: "server-error",
        description: "Other statuses ask the user to try again",
        run: server_error,
    },
    LogicScenario {
        key: "network-failure",
        description: "Transport failures keep the modal usable for a retry",
        run: network_failure,
    },
    LogicScenario {
        key: "double-submit",
        description: "A second click while a request is out sends nothing",
        run: double_submit,
    },
    LogicScenario {
        key: "invalid-input",
        description: "Malformed points never reach the endpoint",
        run: invalid_input,
    },
    LogicScenario {
        key: "reopen-clears-feedback",
        description: "Opening again drops the previous message",
        run: reopen_clears_feedback,
    },
    LogicScenario {
        key: "stale-dismiss",
        description: "A timer from an earlier session cannot close a new one",
        run: stale_dismiss,
    },
    LogicScenario {
        key: "endpoint-target",
        description: "Requests go to the game and player of the latest open",
        run: endpoint_target,
    },
];

pub fn find_logic_scenario(key: &str) -> Option<&'static LogicScenario> {
    LOGIC_SCENARIOS.iter().find(|s| s.key == key)
}
