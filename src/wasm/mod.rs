//! Browser layer: DOM glue and the WebAssembly entry point.

mod controller;
mod dom;
mod packer;
mod scroll_lock;
mod timers;
mod tracker;

pub use tracker::{BackgroundScan, LoadSession, ResourceReport};

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use crate::constants::class;
use controller::Gallery;
use scroll_lock::ScrollLock;

thread_local! {
    /// Wired galleries live for the page lifetime; they are parked here so
    /// their event closures stay alive.
    static GALLERIES: RefCell<Vec<Gallery>> = const { RefCell::new(Vec::new()) };
}

/// Page entry point: wire every gallery root in the document.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        web_sys::console::error_1(&"material-photo-gallery: no document".into());
        return;
    };

    let selector = format!(".{}", class::GALLERY);
    let roots = dom::query_all_in_document(&document, &selector);
    if roots.is_empty() {
        log::debug!("no gallery roots found");
        return;
    }

    // One scroll lock per page, shared by every gallery (at most one open
    // lightbox may suppress scrolling at a time).
    let scroll_lock = ScrollLock::new();

    for root in roots {
        match Gallery::init(&document, root, scroll_lock.clone()) {
            Ok(gallery) => GALLERIES.with(|g| g.borrow_mut().push(gallery)),
            // A failed root stays inert; its siblings are unaffected.
            Err(err) => log::error!("gallery initialization failed: {err}"),
        }
    }
}
