//! The page-wide modal instance addressed by the JavaScript entry points.

use crate::controller::{PointsModal, Registration};
use crate::dom;
use crate::transport::FetchTransport;
use points_core::{ConfigError, ModalConfig};
use std::cell::RefCell;
use std::rc::Rc;

pub type PageModal = PointsModal<FetchTransport>;

thread_local! {
    static MODAL: RefCell<Option<Rc<PageModal>>> = const { RefCell::new(None) };
}

/// The current page modal, created with the default configuration on first
/// use. `None` outside a browser document.
#[must_use]
pub fn current() -> Option<Rc<PageModal>> {
    if let Some(modal) = MODAL.with(|slot| slot.borrow().clone()) {
        return Some(modal);
    }
    let document = dom::document()?;
    let modal = PointsModal::new(document, ModalConfig::default(), FetchTransport);
    MODAL.with(|slot| *slot.borrow_mut() = Some(Rc::clone(&modal)));
    Some(modal)
}

/// Replace the page modal with one built from `config` and bind it.
///
/// # Errors
///
/// Returns an error if the configuration fails validation. The existing
/// modal is kept in that case.
pub fn configure(config: ModalConfig) -> Result<Option<Registration>, ConfigError> {
    config.validate()?;
    let Some(document) = dom::document() else {
        return Ok(None);
    };
    if let Some(previous) = MODAL.with(|slot| slot.borrow_mut().take()) {
        // An in-flight request may keep the old instance alive for a while.
        previous.unbind();
    }
    let modal = PointsModal::new(document, config, FetchTransport);
    let registration = modal.register();
    MODAL.with(|slot| *slot.borrow_mut() = Some(modal));
    Ok(Some(registration))
}

/// Run a registration pass on the page modal.
pub fn register() -> Option<Registration> {
    current().map(|modal| modal.register())
}
