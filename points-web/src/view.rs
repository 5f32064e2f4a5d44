use crate::dom::js_error_message;
use crate::elements::ModalElements;
use points_core::{FeedbackState, OpenView, PointsForm};
use wasm_bindgen::JsValue;

/// Log a failed DOM write. Rendering carries on with the remaining nodes.
fn log_dom_failure<T>(action: &str, result: Result<T, JsValue>) {
    if let Err(err) = result {
        log::debug!("points modal could not {action}: {}", js_error_message(&err));
    }
}

/// Write the opened player's values into the form.
pub fn apply_open(elements: &ModalElements, view: &OpenView) {
    if let Some(input) = &elements.points_input {
        input.set_value(&view.points.to_string());
    }
    if let Some(input) = &elements.player_id_input {
        input.set_value(&view.player_id.to_string());
    }
    if let Some(label) = &elements.player_name {
        label.set_text_content(Some(&view.player_name));
    }
}

/// Read the raw field values. Missing inputs read as empty.
#[must_use]
pub fn read_form(elements: &ModalElements) -> PointsForm {
    PointsForm {
        points: elements
            .points_input
            .as_ref()
            .map(web_sys::HtmlInputElement::value)
            .unwrap_or_default(),
        player_id: elements
            .player_id_input
            .as_ref()
            .map(web_sys::HtmlInputElement::value)
            .unwrap_or_default(),
    }
}

pub fn set_visible(elements: &ModalElements, class: &str, visible: bool) {
    let Some(container) = &elements.container else {
        return;
    };
    let classes = container.class_list();
    if visible {
        log_dom_failure("add the visible class", classes.add_1(class));
    } else {
        log_dom_failure("remove the visible class", classes.remove_1(class));
    }
}

#[must_use]
pub fn is_visible(elements: &ModalElements, class: &str) -> bool {
    elements
        .container
        .as_ref()
        .is_some_and(|container| container.class_list().contains(class))
}

pub fn render_feedback(elements: &ModalElements, feedback: &FeedbackState) {
    let Some(message) = &elements.message else {
        return;
    };
    message.set_text_content(Some(&feedback.visible_text));
    let style = message.style();
    log_dom_failure(
        "set the message display",
        style.set_property("display", if feedback.visible { "block" } else { "none" }),
    );
    let color = feedback.color.css();
    if color.is_empty() {
        log_dom_failure("clear the message color", style.remove_property("color"));
    } else {
        log_dom_failure("set the message color", style.set_property("color", color));
    }
}

/// Toggle the save trigger while a request is outstanding.
pub fn set_save_enabled(elements: &ModalElements, enabled: bool) {
    let Some(button) = &elements.save_button else {
        return;
    };
    let result = if enabled {
        button
            .remove_attribute("disabled")
            .and_then(|()| button.remove_attribute("aria-busy"))
    } else {
        button
            .set_attribute("disabled", "")
            .and_then(|()| button.set_attribute("aria-busy", "true"))
    };
    log_dom_failure("toggle the save control", result);
}

/// Hide everything a closed modal should not show.
pub fn render_closed(elements: &ModalElements, class: &str) {
    set_visible(elements, class, false);
    render_feedback(elements, &FeedbackState::hidden());
    set_save_enabled(elements, true);
}
