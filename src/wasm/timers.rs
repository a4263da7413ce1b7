//! `setTimeout`-backed scheduling primitives.
//!
//! The crate needs exactly two scheduling shapes: a one-tick deferral (so
//! callers of a freshly constructed load session can attach listeners
//! before any resolution may run) and a trailing-edge debounce coalescing
//! resize/scroll bursts.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// Run `f` on the next task-queue tick.
pub fn defer<F: FnOnce() + 'static>(f: F) {
    let Some(window) = web_sys::window() else {
        return;
    };
    // once_into_js frees the closure after its single invocation.
    let cb = Closure::once_into_js(f);
    if window
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), 0)
        .is_err()
    {
        log::error!("failed to schedule deferred callback");
    }
}

struct Pending {
    handle: Option<i32>,
    // Kept until the next call replaces it; dropping a closure that is
    // still scheduled would invalidate the timeout.
    closure: Option<Closure<dyn FnMut()>>,
}

/// Trailing-edge debouncer: each call cancels the previously scheduled
/// run, so a burst of calls collapses into one invocation after the burst
/// settles.
pub struct Debouncer {
    delay_ms: i32,
    pending: Rc<RefCell<Pending>>,
}

impl Debouncer {
    pub fn new(delay_ms: i32) -> Self {
        Self {
            delay_ms,
            pending: Rc::new(RefCell::new(Pending {
                handle: None,
                closure: None,
            })),
        }
    }

    /// Schedule `f`, cancelling any not-yet-fired earlier schedule.
    pub fn call<F: FnMut() + 'static>(&self, mut f: F) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let mut pending = self.pending.borrow_mut();
        if let Some(handle) = pending.handle.take() {
            window.clear_timeout_with_handle(handle);
        }

        let shared = Rc::clone(&self.pending);
        let closure = Closure::wrap(Box::new(move || {
            if let Ok(mut p) = shared.try_borrow_mut() {
                p.handle = None;
            }
            f();
        }) as Box<dyn FnMut()>);

        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            self.delay_ms,
        ) {
            Ok(handle) => {
                pending.handle = Some(handle);
                pending.closure = Some(closure);
            }
            Err(_) => log::error!("failed to schedule debounced callback"),
        }
    }
}
