//! DOM-bound modal controller.
//!
//! Wraps the core [`ModalController`] state machine and renders each step into
//! the host page's markup.

use crate::elements::ModalElements;
use crate::view;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use points_core::{
    DismissTimer, ModalConfig, ModalController, OpenRequest, PointsTransport, SubmissionClient,
    SubmitStep, Ticket, TransportError,
};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use web_sys::Document;

/// Listeners installed by one registration pass.
///
/// Dropping the set unregisters every listener in it.
struct Bindings {
    _close: Option<EventListener>,
    _save: Option<EventListener>,
}

/// Which triggers a registration pass found and bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Registration {
    pub close_bound: bool,
    pub save_bound: bool,
}

pub struct PointsModal<T: PointsTransport + 'static> {
    document: Document,
    state: RefCell<ModalController>,
    client: SubmissionClient<T>,
    bindings: RefCell<Option<Bindings>>,
    dismiss_timer: RefCell<Option<Timeout>>,
}

impl<T: PointsTransport + 'static> PointsModal<T> {
    #[must_use]
    pub fn new(document: Document, config: ModalConfig, transport: T) -> Rc<Self> {
        Rc::new(Self {
            document,
            state: RefCell::new(ModalController::new(config)),
            client: SubmissionClient::new(transport),
            bindings: RefCell::new(None),
            dismiss_timer: RefCell::new(None),
        })
    }

    pub fn transport(&self) -> &T {
        self.client.transport()
    }

    /// Snapshot of the underlying state machine.
    #[must_use]
    pub fn state(&self) -> ModalController {
        self.state.borrow().clone()
    }

    fn elements(&self) -> ModalElements {
        ModalElements::locate(&self.document, &self.state.borrow().config().ids)
    }

    fn visible_class(&self) -> String {
        self.state.borrow().config().visible_class.clone()
    }

    /// Bind the close and save triggers currently in the document.
    ///
    /// Replaces the listeners of any previous pass, so calling this after
    /// every markup swap never stacks handlers.
    pub fn register(self: &Rc<Self>) -> Registration {
        let elements = self.elements();
        let missing = elements.missing();
        if !missing.is_empty() {
            log::debug!("points modal registration skipped missing nodes: {missing:?}");
        }

        let close = elements.close_button.as_ref().map(|button| {
            let modal = Rc::downgrade(self);
            EventListener::new(button, "click", move |_| {
                if let Some(modal) = modal.upgrade() {
                    modal.close();
                }
            })
        });
        let save = elements.save_button.as_ref().map(|button| {
            let modal = Rc::downgrade(self);
            EventListener::new_with_options(
                button,
                "click",
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    event.prevent_default();
                    if let Some(modal) = modal.upgrade() {
                        modal.submit();
                    }
                },
            )
        });

        let registration = Registration {
            close_bound: close.is_some(),
            save_bound: save.is_some(),
        };
        let previous = self.bindings.borrow_mut().replace(Bindings {
            _close: close,
            _save: save,
        });
        drop(previous);
        log::debug!("points modal handlers bound: {registration:?}");
        registration
    }

    /// Remove every listener and pending timer this instance installed.
    ///
    /// Also ends the current session, so a request still in flight on this
    /// instance is discarded when it completes. The DOM is left alone; it
    /// may already belong to a replacement instance.
    pub fn unbind(&self) {
        self.cancel_dismiss();
        self.state.borrow_mut().close();
        let bindings = self.bindings.borrow_mut().take();
        drop(bindings);
    }

    /// Show the dialog for a player, discarding any earlier session.
    pub fn open(&self, req: OpenRequest) {
        self.cancel_dismiss();
        log::debug!(
            "opening points modal for player {} in game {}",
            req.player_id,
            req.game_id
        );
        let view_model = self.state.borrow_mut().open(req);
        let elements = self.elements();
        view::apply_open(&elements, &view_model);
        view::render_feedback(&elements, self.state.borrow().feedback());
        view::set_save_enabled(&elements, true);
        view::set_visible(&elements, &self.visible_class(), true);
    }

    pub fn close(&self) {
        self.cancel_dismiss();
        self.state.borrow_mut().close();
        view::render_closed(&self.elements(), &self.visible_class());
        log::debug!("points modal closed");
    }

    /// Handle a save click.
    pub fn submit(self: &Rc<Self>) {
        let elements = self.elements();
        let form = view::read_form(&elements);
        let step = self.state.borrow_mut().begin_submit(&form);
        match step {
            SubmitStep::Ignored(reason) => {
                log::debug!("points submit ignored: {reason:?}");
            }
            SubmitStep::Rejected(feedback) => {
                log::debug!("points submit rejected: {}", feedback.visible_text);
                view::render_feedback(&elements, &feedback);
            }
            SubmitStep::Send(pending) => {
                view::set_save_enabled(&elements, false);
                log::debug!("posting points edit to {}", pending.url);
                let modal = Rc::clone(self);
                wasm_bindgen_futures::spawn_local(async move {
                    let result = modal.client.send(&pending).await;
                    modal.complete(pending.ticket, &result);
                });
            }
        }
    }

    /// Render the classified result of a finished request.
    pub fn complete(self: &Rc<Self>, ticket: Ticket, result: &Result<u16, TransportError>) {
        let presentation = self.state.borrow_mut().finish_submit(ticket, result);
        let Some(presentation) = presentation else {
            log::debug!("discarding points response from a previous session");
            return;
        };
        log::debug!("points submission outcome: {:?}", presentation.outcome);
        let elements = self.elements();
        view::set_save_enabled(&elements, true);
        view::render_feedback(&elements, &presentation.feedback);
        if let Some(timer) = presentation.dismiss {
            self.schedule_dismiss(timer);
        }
    }

    fn schedule_dismiss(self: &Rc<Self>, timer: DismissTimer) {
        let modal: Weak<Self> = Rc::downgrade(self);
        let handle = Timeout::new(timer.after_ms, move || {
            if let Some(modal) = modal.upgrade() {
                modal.fire_dismiss(timer.ticket);
            }
        });
        let previous = self.dismiss_timer.borrow_mut().replace(handle);
        drop(previous);
    }

    fn fire_dismiss(&self, ticket: Ticket) {
        // The handle owns the closure that is running right now; release it
        // after this callback returns.
        if let Some(spent) = self.dismiss_timer.borrow_mut().take() {
            wasm_bindgen_futures::spawn_local(async move { drop(spent) });
        }
        if self.state.borrow_mut().dismiss(ticket) {
            view::render_closed(&self.elements(), &self.visible_class());
            log::debug!("points modal auto-dismissed");
        }
    }

    fn cancel_dismiss(&self) {
        // Dropping a `Timeout` clears it.
        let pending = self.dismiss_timer.borrow_mut().take();
        drop(pending);
    }
}
