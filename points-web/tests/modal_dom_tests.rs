#![cfg(target_arch = "wasm32")]

use gloo::timers::future::TimeoutFuture;
use points_core::{
    DEFAULT_DISMISS_MS, ElementIds, FeedbackState, GameId, ModalConfig, OpenRequest, Outcome,
    PlayerId, ScriptedTransport,
};
use points_web::controller::PointsModal;
use points_web::elements::ModalElements;
use points_web::{dom, view};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlElement, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

const MARKUP: &str = r#"
<div id="points-modal" class="modal">
  <span id="close-modal">&times;</span>
  <h3 id="player-name"></h3>
  <form>
    <input type="hidden" id="modal-player-id" />
    <input type="number" id="modal-points-input" />
    <button type="submit" id="modal-save-btn">Save</button>
  </form>
  <div id="modal-msg" style="display:none"></div>
</div>
"#;

fn mount_fixture() {
    let doc = dom::document().expect("document");
    let root = match doc.get_element_by_id("fixture") {
        Some(root) => root,
        None => {
            let root = doc.create_element("div").expect("create fixture root");
            root.set_id("fixture");
            doc.body()
                .expect("document body")
                .append_child(&root)
                .expect("append fixture root");
            root
        }
    };
    root.set_inner_html(MARKUP);
}

fn modal_with(transport: ScriptedTransport, config: ModalConfig) -> Rc<PointsModal<ScriptedTransport>> {
    mount_fixture();
    let doc = dom::document().expect("document");
    PointsModal::new(doc, config, transport)
}

fn by_id<T: JsCast>(id: &str) -> T {
    let doc = dom::document().expect("document");
    dom::element_by_id::<T>(&doc, id).unwrap_or_else(|| panic!("#{id} missing"))
}

fn open_for(modal: &PointsModal<ScriptedTransport>, game: &str, player: i32, points: i32) {
    modal.open(OpenRequest {
        game_id: GameId::new(game).expect("game id"),
        player_id: PlayerId(player),
        current_points: Some(points),
        player_name: "Ada".to_string(),
    });
}

fn container_visible() -> bool {
    by_id::<HtmlElement>("points-modal")
        .class_list()
        .contains("show")
}

fn message() -> (String, String, String) {
    let msg = by_id::<HtmlElement>("modal-msg");
    let style = msg.style();
    (
        msg.text_content().unwrap_or_default(),
        style.get_property_value("color").unwrap_or_default(),
        style.get_property_value("display").unwrap_or_default(),
    )
}

async fn settle(ms: u32) {
    TimeoutFuture::new(ms).await;
}

#[wasm_bindgen_test]
fn open_populates_fields_and_shows() {
    let modal = modal_with(ScriptedTransport::default(), ModalConfig::default());
    modal.register();
    open_for(&modal, "G1", 4, 17);

    assert_eq!(by_id::<HtmlInputElement>("modal-points-input").value(), "17");
    assert_eq!(by_id::<HtmlInputElement>("modal-player-id").value(), "4");
    assert_eq!(
        by_id::<HtmlElement>("player-name").text_content().unwrap_or_default(),
        "Ada"
    );
    assert!(container_visible());
}

#[wasm_bindgen_test]
fn close_button_hides_modal() {
    let modal = modal_with(ScriptedTransport::default(), ModalConfig::default());
    modal.register();
    open_for(&modal, "G1", 4, 17);
    by_id::<HtmlElement>("close-modal").click();
    assert!(!container_visible());
    assert!(!modal.state().is_visible());
}

#[wasm_bindgen_test]
async fn double_registration_submits_once() {
    let modal = modal_with(ScriptedTransport::always(200), ModalConfig::default());
    modal.register();
    let second = modal.register();
    assert!(second.save_bound && second.close_bound);
    open_for(&modal, "G1", 4, 17);

    by_id::<HtmlElement>("modal-save-btn").click();
    settle(20).await;

    let sent = modal.transport().sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].url, "/G1/action/points");
    assert_eq!(sent[0].body.points, 17);
    assert_eq!(sent[0].body.player_id, PlayerId(4));
}

#[wasm_bindgen_test]
async fn save_is_disabled_until_response() {
    let modal = modal_with(ScriptedTransport::always(500), ModalConfig::default());
    modal.register();
    open_for(&modal, "G1", 4, 17);

    let save = by_id::<HtmlElement>("modal-save-btn");
    save.click();
    assert!(save.has_attribute("disabled"));
    save.click();
    settle(20).await;

    assert_eq!(modal.transport().sent_count(), 1);
    assert!(!by_id::<HtmlElement>("modal-save-btn").has_attribute("disabled"));
}

#[wasm_bindgen_test]
async fn forbidden_keeps_modal_open_with_red_message() {
    let modal = modal_with(ScriptedTransport::always(403), ModalConfig::default());
    modal.register();
    open_for(&modal, "G1", 4, 17);
    by_id::<HtmlElement>("modal-save-btn").click();
    settle(20).await;

    let (text, color, display) = message();
    assert!(text.contains("Only the host can change points"));
    assert_eq!(color, "red");
    assert_eq!(display, "block");
    assert!(container_visible());
}

#[wasm_bindgen_test]
async fn success_dismisses_after_delay() {
    let config = ModalConfig {
        dismiss_after_ms: 60,
        ..ModalConfig::default()
    };
    let modal = modal_with(ScriptedTransport::always(200), config);
    modal.register();
    open_for(&modal, "G1", 4, 17);
    by_id::<HtmlElement>("modal-save-btn").click();
    settle(10).await;

    let (text, color, _) = message();
    assert_eq!(text, "Points updated!");
    assert_eq!(color, "green");
    assert!(container_visible());

    settle(120).await;
    assert!(!container_visible());
    assert_eq!(message().2, "none");
}

#[wasm_bindgen_test]
async fn reopen_clears_stale_message() {
    let modal = modal_with(ScriptedTransport::always(425), ModalConfig::default());
    modal.register();
    open_for(&modal, "G1", 4, 17);
    by_id::<HtmlElement>("modal-save-btn").click();
    settle(20).await;
    assert!(message().0.contains("has not started yet"));

    open_for(&modal, "G1", 5, 2);
    let (text, _, display) = message();
    assert!(text.is_empty());
    assert_eq!(display, "none");
}

#[wasm_bindgen_test]
async fn invalid_points_are_rejected_locally() {
    let modal = modal_with(ScriptedTransport::default(), ModalConfig::default());
    modal.register();
    open_for(&modal, "G1", 4, 17);
    by_id::<HtmlInputElement>("modal-points-input").set_value("");
    by_id::<HtmlElement>("modal-save-btn").click();
    settle(20).await;

    assert_eq!(modal.transport().sent_count(), 0);
    let (text, color, _) = message();
    assert!(text.starts_with("Invalid input."));
    assert_eq!(color, "red");
}

#[wasm_bindgen_test]
fn rebinding_after_markup_swap_reaches_new_nodes() {
    let modal = modal_with(ScriptedTransport::default(), ModalConfig::default());
    modal.register();
    open_for(&modal, "G1", 4, 17);

    mount_fixture();
    modal.register();
    open_for(&modal, "G1", 4, 17);
    assert!(container_visible());
    by_id::<HtmlElement>("close-modal").click();
    assert!(!container_visible());
}

#[wasm_bindgen_test]
async fn blank_player_field_posts_session_player() {
    let modal = modal_with(ScriptedTransport::always(200), ModalConfig::default());
    modal.register();
    open_for(&modal, "G1", 4, 17);
    by_id::<HtmlInputElement>("modal-player-id").set_value("");
    by_id::<HtmlElement>("modal-save-btn").click();
    settle(20).await;

    let sent = modal.transport().sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].body.player_id, PlayerId(4));
}

#[wasm_bindgen_test]
async fn replaced_instance_cannot_close_new_session() {
    let config = ModalConfig {
        dismiss_after_ms: 40,
        ..ModalConfig::default()
    };
    let old = modal_with(ScriptedTransport::always(200), config.clone());
    old.register();
    open_for(&old, "G1", 4, 17);
    // The response is delivered only after this test yields.
    by_id::<HtmlElement>("modal-save-btn").click();

    old.unbind();
    let doc = dom::document().expect("document");
    let new = PointsModal::new(doc, config, ScriptedTransport::default());
    new.register();
    open_for(&new, "G2", 5, 3);

    settle(120).await;
    assert_eq!(old.transport().sent_count(), 1);
    assert!(!old.state().is_visible());
    assert!(container_visible());
    assert!(new.state().is_visible());
    assert!(message().0.is_empty());
}

#[wasm_bindgen_test]
fn rejected_class_token_does_not_abort_rendering() {
    mount_fixture();
    let doc = dom::document().expect("document");
    let elements = ModalElements::locate(&doc, &ElementIds::default());

    // classList rejects tokens containing whitespace.
    view::set_visible(&elements, "not valid", true);
    assert!(!container_visible());

    view::set_save_enabled(&elements, false);
    view::render_feedback(
        &elements,
        &FeedbackState::for_outcome(Outcome::Forbidden, DEFAULT_DISMISS_MS),
    );
    assert!(by_id::<HtmlElement>("modal-save-btn").has_attribute("aria-busy"));
    assert_eq!(message().1, "red");
}
