//! Lookup of the modal's DOM nodes.
//!
//! The host page may swap the modal markup at any time, so nodes are located
//! afresh for every action instead of being cached.

use crate::dom::element_by_id;
use points_core::ElementIds;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

#[derive(Debug, Clone)]
pub struct ModalElements {
    pub container: Option<Element>,
    pub close_button: Option<HtmlElement>,
    pub save_button: Option<HtmlElement>,
    pub points_input: Option<HtmlInputElement>,
    pub player_id_input: Option<HtmlInputElement>,
    pub player_name: Option<Element>,
    pub message: Option<HtmlElement>,
}

impl ModalElements {
    #[must_use]
    pub fn locate(document: &Document, ids: &ElementIds) -> Self {
        Self {
            container: element_by_id(document, &ids.container),
            close_button: element_by_id(document, &ids.close_button),
            save_button: element_by_id(document, &ids.save_button),
            points_input: element_by_id(document, &ids.points_input),
            player_id_input: element_by_id(document, &ids.player_id_input),
            player_name: element_by_id(document, &ids.player_name),
            message: element_by_id(document, &ids.message),
        }
    }

    /// Names of the nodes that could not be found.
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        let present = [
            ("container", self.container.is_some()),
            ("close_button", self.close_button.is_some()),
            ("save_button", self.save_button.is_some()),
            ("points_input", self.points_input.is_some()),
            ("player_id_input", self.player_id_input.is_some()),
            ("player_name", self.player_name.is_some()),
            ("message", self.message.is_some()),
        ];
        present
            .into_iter()
            .filter(|(_, found)| !found)
            .map(|(name, _)| name)
            .collect()
    }
}
