//! DOM image-load tracking.
//!
//! The DOM half of a load session: enumerates trackable resources under a
//! set of elements (`<img>` tags and, optionally, CSS background images),
//! attaches a detached probe image per resource, and resolves each
//! resource exactly once from the first load/error signal. Counting and
//! terminal-event ordering live in [`crate::loader::SessionState`].
//!
//! Resolution is never synchronous with construction: the check pass runs
//! one scheduling tick after [`LoadSession::track`] returns, so listeners
//! attached right after construction always observe every event, even
//! when every image is already complete.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, HtmlImageElement};

use super::{dom, timers};
use crate::callback::{Callback, Callback0};
use crate::loader::{extract_background_urls, ConfirmReason, SessionState, Terminal};

/// Whether and how CSS background images are scanned.
#[derive(Debug, Clone, Default)]
pub enum BackgroundScan {
    /// Only `<img>` elements are tracked.
    #[default]
    None,
    /// Scan the given elements' own computed backgrounds too.
    All,
    /// Scan backgrounds of descendants matching this selector.
    Selector(String),
}

/// One resource's resolution, delivered on each progress notification.
#[derive(Debug, Clone)]
pub struct ResourceReport {
    /// The visual element the resource affects.
    pub element: Element,
    /// The tracked URL (image source or background URL).
    pub src: String,
    pub is_loaded: bool,
    pub reason: ConfirmReason,
}

enum ResourceKind {
    /// A real `<img>`; the probe shadows its `src` to observe completion
    /// without re-triggering a fetch on the visible element.
    Image { img: HtmlImageElement },
    /// A background URL extracted from `element`'s computed style; the
    /// probe is the only loadable element involved.
    Background { element: Element, url: String },
}

struct Binding {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

struct Resource {
    kind: ResourceKind,
    probe: RefCell<Option<HtmlImageElement>>,
    // Single-assignment result cell: the first signal from any binding
    // wins, later signals are ignored.
    resolved: Cell<bool>,
    bindings: RefCell<Vec<Binding>>,
}

impl Resource {
    fn image(img: HtmlImageElement) -> Self {
        Self::new(ResourceKind::Image { img })
    }

    fn background(element: Element, url: String) -> Self {
        Self::new(ResourceKind::Background { element, url })
    }

    fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            probe: RefCell::new(None),
            resolved: Cell::new(false),
            bindings: RefCell::new(Vec::new()),
        }
    }

    fn visual_element(&self) -> Element {
        match &self.kind {
            ResourceKind::Image { img } => img.clone().into(),
            ResourceKind::Background { element, .. } => element.clone(),
        }
    }

    fn src_value(&self) -> String {
        match &self.kind {
            ResourceKind::Image { img } => img.src(),
            ResourceKind::Background { url, .. } => url.clone(),
        }
    }

    fn check(this: &Rc<Self>, session: &Rc<SessionInner>) {
        match &this.kind {
            ResourceKind::Image { img } => {
                if img.complete() {
                    // Already-complete element: a zero natural width means
                    // the fetch or decode failed.
                    let is_loaded = img.natural_width() != 0;
                    Self::resolve(this, session, is_loaded, ConfirmReason::AlreadyComplete);
                    return;
                }
                let Ok(document) = dom::document() else {
                    return;
                };
                let Ok(probe) = dom::create_image(&document) else {
                    Self::resolve(this, session, false, ConfirmReason::Error);
                    return;
                };
                Self::bind(this, session, probe.as_ref());
                // Some engines fire load/error on the original element but
                // not a same-src probe; race both, first signal wins.
                Self::bind(this, session, img.as_ref());
                probe.set_src(&img.src());
                this.probe.replace(Some(probe));
            }
            ResourceKind::Background { url, .. } => {
                let Ok(document) = dom::document() else {
                    return;
                };
                let Ok(probe) = dom::create_image(&document) else {
                    Self::resolve(this, session, false, ConfirmReason::Error);
                    return;
                };
                Self::bind(this, session, probe.as_ref());
                probe.set_src(url);
                if probe.complete() {
                    let is_loaded = probe.natural_width() != 0;
                    Self::resolve(this, session, is_loaded, ConfirmReason::AlreadyComplete);
                }
                this.probe.replace(Some(probe));
            }
        }
    }

    fn bind(this: &Rc<Self>, session: &Rc<SessionInner>, target: &EventTarget) {
        for event in ["load", "error"] {
            let resource = Rc::clone(this);
            let sess = Rc::clone(session);
            let closure = Closure::wrap(Box::new(move |e: Event| {
                let is_loaded = e.type_() == "load";
                let reason = if is_loaded {
                    ConfirmReason::Load
                } else {
                    ConfirmReason::Error
                };
                Resource::resolve(&resource, &sess, is_loaded, reason);
            }) as Box<dyn FnMut(Event)>);

            if target
                .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
                .is_err()
            {
                log::error!("failed to bind {event} observer");
            }
            this.bindings.borrow_mut().push(Binding {
                target: target.clone(),
                event,
                closure,
            });
        }
    }

    fn resolve(this: &Rc<Self>, session: &Rc<SessionInner>, is_loaded: bool, reason: ConfirmReason) {
        if this.resolved.replace(true) {
            return;
        }
        this.unbind();
        let report = ResourceReport {
            element: this.visual_element(),
            src: this.src_value(),
            is_loaded,
            reason,
        };
        SessionInner::progress(session, report);
    }

    fn unbind(&self) {
        // Listeners are removed; the closures themselves stay allocated
        // until the session goes away, since one of them is executing
        // right now when resolution comes from an event.
        for binding in self.bindings.borrow().iter() {
            let _ = binding
                .target
                .remove_event_listener_with_callback(
                    binding.event,
                    binding.closure.as_ref().unchecked_ref(),
                );
        }
    }
}

struct SessionInner {
    state: RefCell<SessionState>,
    resources: Vec<Rc<Resource>>,
    on_progress: RefCell<Callback<ResourceReport>>,
    on_done: RefCell<Callback0>,
    on_fail: RefCell<Callback0>,
    on_always: RefCell<Callback0>,
}

impl SessionInner {
    fn check(session: &Rc<Self>) {
        let empty_terminal = session.state.borrow_mut().complete_empty();
        if let Some(terminal) = empty_terminal {
            Self::complete(session, terminal);
            return;
        }
        for resource in &session.resources {
            Resource::check(resource, session);
        }
    }

    fn progress(session: &Rc<Self>, report: ResourceReport) {
        let terminal = session.state.borrow_mut().record(report.is_loaded);
        session.on_progress.borrow().emit(&report);
        if let Some(terminal) = terminal {
            Self::complete(session, terminal);
        }
    }

    fn complete(session: &Rc<Self>, terminal: Terminal) {
        log::debug!(
            "load session complete: {terminal:?} ({} resources)",
            session.resources.len()
        );
        match terminal {
            Terminal::Done => session.on_done.borrow().emit(),
            Terminal::Fail => session.on_fail.borrow().emit(),
        }
        session.on_always.borrow().emit();
    }
}

/// One tracking run over the images under a set of elements.
///
/// Construct with [`LoadSession::track`], then attach listeners; the
/// check pass starts on the next scheduling tick.
#[derive(Clone)]
pub struct LoadSession {
    inner: Rc<SessionInner>,
}

impl LoadSession {
    /// Enumerate trackable resources under `elements` and start tracking.
    pub fn track(elements: &[Element], background: &BackgroundScan) -> Self {
        let mut found = Vec::new();
        for element in elements {
            collect_element(element, background, &mut found);
        }

        log::debug!("tracking {} image resources", found.len());
        let inner = Rc::new(SessionInner {
            state: RefCell::new(SessionState::new(found.len())),
            resources: found.into_iter().map(Rc::new).collect(),
            on_progress: RefCell::new(Callback::none()),
            on_done: RefCell::new(Callback0::none()),
            on_fail: RefCell::new(Callback0::none()),
            on_always: RefCell::new(Callback0::none()),
        });

        let deferred = Rc::clone(&inner);
        timers::defer(move || SessionInner::check(&deferred));

        Self { inner }
    }

    /// Called once per resource as it resolves, in resolution order.
    pub fn on_progress<F: Fn(&ResourceReport) + 'static>(&self, f: F) {
        *self.inner.on_progress.borrow_mut() = Callback::new(f);
    }

    /// Called once if every resource loaded.
    pub fn on_done<F: Fn() + 'static>(&self, f: F) {
        *self.inner.on_done.borrow_mut() = Callback0::new(f);
    }

    /// Called once if any resource was broken.
    pub fn on_fail<F: Fn() + 'static>(&self, f: F) {
        *self.inner.on_fail.borrow_mut() = Callback0::new(f);
    }

    /// Called once on completion, after `done`/`fail`.
    pub fn on_always<F: Fn() + 'static>(&self, f: F) {
        *self.inner.on_always.borrow_mut() = Callback0::new(f);
    }

    pub fn resource_count(&self) -> usize {
        self.inner.resources.len()
    }

    pub fn is_complete(&self) -> bool {
        self.inner.state.borrow().is_complete()
    }

    pub fn has_any_broken(&self) -> bool {
        self.inner.state.borrow().has_any_broken()
    }
}

fn collect_element(element: &Element, background: &BackgroundScan, out: &mut Vec<Resource>) {
    if let Some(img) = element.dyn_ref::<HtmlImageElement>() {
        out.push(Resource::image(img.clone()));
    }
    if matches!(background, BackgroundScan::All) {
        collect_backgrounds(element, out);
    }

    for child in dom::query_all(element, "img") {
        if let Ok(img) = child.dyn_into::<HtmlImageElement>() {
            out.push(Resource::image(img));
        }
    }

    if let BackgroundScan::Selector(selector) = background {
        for child in dom::query_all(element, selector) {
            collect_backgrounds(&child, out);
        }
    }
}

fn collect_backgrounds(element: &Element, out: &mut Vec<Resource>) {
    let Some(value) = dom::computed_background_image(element) else {
        return;
    };
    for url in extract_background_urls(&value) {
        out.push(Resource::background(element.clone(), url));
    }
}
