//! Page-wide scroll suppression.
//!
//! While a lightbox is open the page must not scroll. Suppression is a
//! single shared resource bound to the window, so it is modeled as an
//! explicit lock object shared by every gallery on the page: at most one
//! holder, acquire/release tied to the open/close transitions. A second
//! gallery attempting to acquire while the lock is held is refused
//! (logged) instead of silently clobbering the window handlers.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Event};

const EVENTS: [&str; 2] = ["wheel", "touchmove"];

#[derive(Default)]
struct Inner {
    // One preventDefault handler per suppressed event; Some while held.
    handlers: Option<Vec<Closure<dyn FnMut(Event)>>>,
}

/// Shared page-scroll lock. Cloning shares the underlying state.
#[derive(Clone, Default)]
pub struct ScrollLock {
    inner: Rc<RefCell<Inner>>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self) -> bool {
        self.inner.borrow().handlers.is_some()
    }

    /// Suppress page scrolling. A no-op (with a warning) if already held.
    pub fn acquire(&self) {
        let mut inner = self.inner.borrow_mut();
        if inner.handlers.is_some() {
            log::warn!("scroll lock already held; ignoring acquire");
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };

        // preventDefault only works from non-passive listeners.
        let options = AddEventListenerOptions::new();
        options.set_passive(false);

        let mut handlers = Vec::with_capacity(EVENTS.len());
        for event in EVENTS {
            let closure = Closure::wrap(Box::new(move |e: Event| {
                e.prevent_default();
            }) as Box<dyn FnMut(Event)>);
            if window
                .add_event_listener_with_callback_and_add_event_listener_options(
                    event,
                    closure.as_ref().unchecked_ref(),
                    &options,
                )
                .is_err()
            {
                log::error!("failed to bind {event} suppression");
            }
            handlers.push(closure);
        }
        inner.handlers = Some(handlers);
    }

    /// Restore page scrolling. A no-op if not held.
    pub fn release(&self) {
        let Some(handlers) = self.inner.borrow_mut().handlers.take() else {
            return;
        };
        let Some(window) = web_sys::window() else {
            return;
        };
        for (event, closure) in EVENTS.iter().zip(&handlers) {
            let _ = window
                .remove_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        }
    }
}
