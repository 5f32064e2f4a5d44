use wasm_bindgen::prelude::*;

pub mod args;
pub mod controller;
pub mod dom;
pub mod elements;
pub mod logger;
pub mod runtime;
pub mod transport;
pub mod view;

use args::{ArgValue, parse_open_args};
use points_core::ModalConfig;

/// DOM event the partial-refresh library fires after swapping markup.
pub const AFTER_SWAP_EVENT: &str = "htmx:afterSwap";

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init();

    let Some(document) = dom::document() else {
        return;
    };
    // Re-bind on first load and after every markup swap.
    for event in ["DOMContentLoaded", AFTER_SWAP_EVENT] {
        gloo::events::EventListener::new(&document, event, |_| {
            runtime::register();
        })
        .forget();
    }
    if dom::document_parsed(&document) {
        runtime::register();
    }
}

fn arg_value(value: &JsValue) -> ArgValue {
    if value.is_undefined() || value.is_null() {
        ArgValue::Missing
    } else if let Some(n) = value.as_f64() {
        ArgValue::Number(n)
    } else if let Some(s) = value.as_string() {
        ArgValue::Text(s)
    } else {
        ArgValue::Text(dom::js_error_message(value))
    }
}

/// Open the points dialog. Called from host templates as
/// `openPointsModal(gameId, playerId, currentPoints, playerName)`; the older
/// `openPointsModal(gameId, playerId, playerName)` form is also accepted.
///
/// # Errors
///
/// Throws when the game id is blank or an id is not an integer.
#[wasm_bindgen(js_name = openPointsModal)]
pub fn open_points_modal(
    game_id: &JsValue,
    player_id: &JsValue,
    current_points: &JsValue,
    player_name: &JsValue,
) -> Result<(), JsValue> {
    let req = parse_open_args(
        arg_value(game_id),
        &arg_value(player_id),
        arg_value(current_points),
        arg_value(player_name),
    )
    .map_err(|err| {
        log::warn!("points modal not opened: {err}");
        JsValue::from_str(&err.to_string())
    })?;
    if let Some(modal) = runtime::current() {
        modal.open(req);
    }
    Ok(())
}

#[wasm_bindgen(js_name = closePointsModal)]
pub fn close_points_modal() {
    if let Some(modal) = runtime::current() {
        modal.close();
    }
}

/// Bind the modal's triggers. Safe to call any number of times.
#[wasm_bindgen(js_name = attachModalHandlers)]
pub fn attach_modal_handlers() {
    runtime::register();
}

/// Replace the modal configuration with a JS object such as
/// `{ dismiss_after_ms: 3000, too_early_policy: "generic" }`.
///
/// # Errors
///
/// Throws when the object does not describe a valid configuration.
#[wasm_bindgen(js_name = configurePointsModal)]
pub fn configure_points_modal(config: JsValue) -> Result<(), JsValue> {
    let config: ModalConfig = if config.is_undefined() || config.is_null() {
        ModalConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)?
    };
    runtime::configure(config).map_err(|err| JsValue::from_str(&err.to_string()))?;
    Ok(())
}
