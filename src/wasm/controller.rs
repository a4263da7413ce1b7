//! DOM gallery controller.
//!
//! Wires one gallery root: builds the lightbox and controls, runs the two
//! load-tracking passes (thumbnails, then full-size images), drives the
//! view-state machine from user interactions, and keeps the cached
//! thumbnail transforms in sync with live geometry across resize and
//! scroll.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlImageElement, TouchEvent};

use super::scroll_lock::ScrollLock;
use super::tracker::{BackgroundScan, LoadSession};
use super::{dom, packer, timers};
use crate::constants::{attr, class, timing};
use crate::error::GalleryError;
use crate::geometry::ThumbTransform;
use crate::state::{Effect, GalleryState};
use crate::swipe::{SwipeDirection, SwipeTracker};

/// A fully wired gallery root. Lives for the page lifetime.
pub struct Gallery {
    #[expect(dead_code, reason = "owner keeps the controller and its DOM bindings alive")]
    inner: Rc<GalleryInner>,
}

struct GalleryInner {
    root: Element,
    thumbs_box: Element,
    thumbs: Vec<HtmlImageElement>,
    full_box: Element,
    full_imgs: Vec<HtmlImageElement>,
    controls: Element,

    state: RefCell<GalleryState>,
    transforms: RefCell<Vec<ThumbTransform>>,
    swipe: RefCell<SwipeTracker>,
    scroll_lock: ScrollLock,
    geometry_debounce: timers::Debouncer,
    needs_relayout: Cell<bool>,
    broken_srcs: RefCell<Vec<String>>,

    // Event closures and sessions held for the page lifetime.
    bindings: RefCell<Vec<Closure<dyn FnMut(Event)>>>,
    sessions: RefCell<Vec<LoadSession>>,
}

impl Gallery {
    /// Wire a gallery root. A failure leaves the root inert and must not
    /// affect sibling galleries.
    pub fn init(
        document: &Document,
        root: Element,
        scroll_lock: ScrollLock,
    ) -> Result<Self, GalleryError> {
        let thumbs_box = dom::query(&root, &format!(".{}", class::THUMBS_BOX))?;

        let mut thumbs = Vec::new();
        for el in dom::query_all(&thumbs_box, &format!(".{}", class::THUMB_IMG)) {
            let img = el.dyn_into::<HtmlImageElement>().map_err(|_| {
                GalleryError::WrongElementType {
                    selector: format!(".{}", class::THUMB_IMG),
                    expected: "HtmlImageElement",
                }
            })?;
            thumbs.push(img);
        }

        let full_box = document.create_element("div").map_err(dom::js_err)?;
        full_box.set_class_name(class::FULL_BOX);
        root.append_child(&full_box).map_err(dom::js_err)?;

        // Full-size images come from each thumbnail's data-full.
        let mut full_imgs = Vec::with_capacity(thumbs.len());
        for thumb in &thumbs {
            let src = match thumb.get_attribute(attr::DATA_FULL) {
                Some(src) => src,
                None => {
                    log::warn!(
                        "thumbnail missing {}; falling back to the thumbnail source",
                        attr::DATA_FULL
                    );
                    thumb.src()
                }
            };
            let img = dom::create_image(document)?;
            img.set_class_name(class::FULL_IMG);
            img.set_src(&src);
            full_box.append_child(&img).map_err(dom::js_err)?;
            full_imgs.push(img);
        }

        let controls = dom::build_controls(document)?;
        root.append_child(&controls).map_err(dom::js_err)?;

        let count = thumbs.len();
        let inner = Rc::new(GalleryInner {
            root,
            thumbs_box,
            thumbs,
            full_box,
            full_imgs,
            controls,
            state: RefCell::new(GalleryState::new(count)),
            transforms: RefCell::new(vec![ThumbTransform::identity(); count]),
            swipe: RefCell::new(SwipeTracker::new()),
            scroll_lock,
            geometry_debounce: timers::Debouncer::new(timing::GEOMETRY_DEBOUNCE_MS),
            needs_relayout: Cell::new(false),
            broken_srcs: RefCell::new(Vec::new()),
            bindings: RefCell::new(Vec::new()),
            sessions: RefCell::new(Vec::new()),
        });

        bind_events(&inner)?;
        track_thumbnails(&inner);

        log::info!("gallery initialized with {count} images");
        Ok(Self { inner })
    }
}

fn listen<F>(inner: &Rc<GalleryInner>, target: &EventTarget, event: &str, f: F)
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
    if target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .is_err()
    {
        log::error!("failed to bind {event} listener");
    }
    inner.bindings.borrow_mut().push(closure);
}

fn bind_events(inner: &Rc<GalleryInner>) -> Result<(), GalleryError> {
    for (index, thumb) in inner.thumbs.iter().enumerate() {
        let this = Rc::clone(inner);
        listen(inner, thumb.as_ref(), "click", move |_| {
            handle_thumb_click(&this, index);
        });
        let this = Rc::clone(inner);
        listen(inner, thumb.as_ref(), "mouseover", move |_| {
            prime_setup(&this, index);
        });
    }

    let close_selector = format!(".{}", class::CONTROLS_CLOSE);
    let prev_selector = format!(".{}", class::CONTROLS_PREV);
    let next_selector = format!(".{}", class::CONTROLS_NEXT);
    let close_btn = dom::query(&inner.controls, &close_selector)?;
    let prev_btn = dom::query(&inner.controls, &prev_selector)?;
    let next_btn = dom::query(&inner.controls, &next_selector)?;

    let this = Rc::clone(inner);
    listen(inner, close_btn.as_ref(), "click", move |_| {
        handle_close(&this);
    });
    let this = Rc::clone(inner);
    listen(inner, prev_btn.as_ref(), "click", move |_| {
        handle_nav(&this, SwipeDirection::Prev);
    });
    let this = Rc::clone(inner);
    listen(inner, next_btn.as_ref(), "click", move |_| {
        handle_nav(&this, SwipeDirection::Next);
    });

    // Touch swipe on the lightbox surface.
    let this = Rc::clone(inner);
    listen(inner, inner.full_box.as_ref(), "touchstart", move |e| {
        if let Some((x, y)) = first_touch(&e) {
            this.swipe.borrow_mut().begin(x, y);
        }
    });
    let this = Rc::clone(inner);
    listen(inner, inner.full_box.as_ref(), "touchmove", move |e| {
        if let Some((x, y)) = first_touch(&e) {
            let direction = this.swipe.borrow_mut().update(x, y);
            if let Some(direction) = direction {
                handle_nav(&this, direction);
            }
        }
    });
    let this = Rc::clone(inner);
    listen(inner, inner.full_box.as_ref(), "touchend", move |_| {
        this.swipe.borrow_mut().end();
    });

    // Viewport signals refresh cached geometry; only resize moves the
    // thumbnail grid, so only resize re-packs rows.
    let window = dom::window()?;
    let this = Rc::clone(inner);
    listen(inner, window.as_ref(), "resize", move |_| {
        this.needs_relayout.set(true);
        schedule_geometry_refresh(&this);
    });
    let this = Rc::clone(inner);
    listen(inner, window.as_ref(), "scroll", move |_| {
        schedule_geometry_refresh(&this);
    });

    Ok(())
}

fn first_touch(event: &Event) -> Option<(f64, f64)> {
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some((f64::from(touch.client_x()), f64::from(touch.client_y())))
}

// ---------------------------- load tracking ----------------------------

fn track_thumbnails(inner: &Rc<GalleryInner>) {
    let session = LoadSession::track(
        std::slice::from_ref(&inner.thumbs_box),
        &BackgroundScan::None,
    );

    session.on_progress(|report| {
        // One settle tick before reading rendered sizes: the load signal
        // can arrive before the element's layout reflects it.
        let element = report.element.clone();
        timers::defer(move || stamp_dimensions(&element));
    });

    session.on_fail(|| {
        log::warn!("some thumbnails failed to load; they are skipped by the row layout");
    });

    // Layout and the full-image pass start on completion regardless of
    // broken thumbnails (a broken thumbnail stays unstamped and unsized).
    let this = Rc::clone(inner);
    session.on_always(move || {
        // The stamping above is itself deferred by a tick; run the layout
        // pass behind it on the same queue.
        let this = Rc::clone(&this);
        timers::defer(move || {
            if this.thumbs_box.has_attribute(attr::LAYOUT_MARKER) {
                packer::align(&this.thumbs_box);
            } else {
                log::debug!("thumbnail container opted out of row layout");
            }
            track_full_images(&this);
        });
    });

    inner.sessions.borrow_mut().push(session);
}

fn stamp_dimensions(element: &Element) {
    let Some(el) = element.dyn_ref::<web_sys::HtmlElement>() else {
        return;
    };
    let width = el.offset_width();
    let height = el.offset_height();
    if width <= 0 || height <= 0 {
        log::warn!("image rendered with zero size; leaving it unstamped");
        return;
    }
    let _ = element.set_attribute(attr::DATA_WIDTH, &width.to_string());
    let _ = element.set_attribute(attr::DATA_HEIGHT, &height.to_string());
}

fn track_full_images(inner: &Rc<GalleryInner>) {
    let session = LoadSession::track(
        std::slice::from_ref(&inner.full_box),
        &BackgroundScan::None,
    );

    let this = Rc::clone(inner);
    session.on_progress(move |report| {
        if report.is_loaded {
            return;
        }
        if let Some(index) = index_of_full(&this, &report.element) {
            this.state.borrow_mut().mark_broken(index);
        }
        this.broken_srcs.borrow_mut().push(report.src.clone());
    });

    let this = Rc::clone(inner);
    session.on_fail(move || {
        render_error_box(&this);
    });

    let this = Rc::clone(inner);
    session.on_always(move || {
        this.state.borrow_mut().set_full_imgs_loaded();
        refresh_geometry(&this, false);
        log::info!("full-size images ready");
    });

    inner.sessions.borrow_mut().push(session);
}

fn index_of_full(inner: &GalleryInner, element: &Element) -> Option<usize> {
    inner
        .full_imgs
        .iter()
        .position(|img| img.is_same_node(Some(element.as_ref())))
}

fn render_error_box(inner: &Rc<GalleryInner>) {
    let broken = inner.broken_srcs.borrow();
    log::error!("{} full-size images failed to load", broken.len());

    let Ok(document) = dom::document() else {
        return;
    };
    let Ok(error_box) = document.create_element("div") else {
        return;
    };
    error_box.set_class_name(class::ERROR_BOX);
    error_box.set_text_content(Some(&format!(
        "Failed to load full-size images: {}",
        broken.join(", ")
    )));
    let _ = inner.root.append_child(&error_box);
}

// ------------------------------ geometry -------------------------------

/// Recompute and pre-apply the transform pairing full image `index` with
/// its thumbnail. The inline transform is cleared first so the rectangle
/// read reflects native geometry rather than a previously applied
/// transform.
fn recompute_pair(inner: &GalleryInner, index: usize) -> ThumbTransform {
    let thumb = &inner.thumbs[index];
    let full = &inner.full_imgs[index];
    dom::clear_style(full, "transform");
    let transform = ThumbTransform::between(dom::rect_of(full.as_ref()), dom::rect_of(thumb.as_ref()));
    dom::set_style(full, "transform", &transform.css());
    transform
}

fn refresh_geometry(inner: &Rc<GalleryInner>, relayout: bool) {
    if relayout && inner.thumbs_box.has_attribute(attr::LAYOUT_MARKER) {
        packer::align(&inner.thumbs_box);
    }

    let state = inner.state.borrow();
    if !state.full_imgs_loaded() {
        return;
    }
    let open = state.open_index();
    drop(state);

    let count = inner.thumbs.len().min(inner.full_imgs.len());
    let mut transforms = inner.transforms.borrow_mut();
    for index in 0..count {
        if Some(index) == open {
            // The open image must not jump; it stays at identity.
            transforms[index] = ThumbTransform::identity();
            continue;
        }
        if inner.state.borrow().is_broken(index) {
            // A broken image has no usable rendered geometry.
            continue;
        }
        transforms[index] = recompute_pair(inner, index);
    }
}

fn schedule_geometry_refresh(inner: &Rc<GalleryInner>) {
    let this = Rc::clone(inner);
    inner.geometry_debounce.call(move || {
        let relayout = this.needs_relayout.replace(false);
        refresh_geometry(&this, relayout);
    });
}

/// Capture the active thumbnail/full-image pair's geometry ahead of an
/// open. Runs on the first hover or click once full images are ready.
fn prime_setup(inner: &Rc<GalleryInner>, index: usize) {
    {
        let state = inner.state.borrow();
        if !state.full_imgs_loaded()
            || state.open_index().is_some()
            || index >= inner.thumbs.len()
            || state.is_broken(index)
        {
            return;
        }
    }
    let transform = recompute_pair(inner, index);
    inner.transforms.borrow_mut()[index] = transform;
    inner.state.borrow_mut().set_setup_complete();
}

// ----------------------------- transitions -----------------------------

fn handle_thumb_click(inner: &Rc<GalleryInner>, index: usize) {
    // The first interaction may be this click itself.
    if !inner.state.borrow().setup_complete() {
        prime_setup(inner, index);
    }
    let effect = inner.state.borrow_mut().select(index);
    if let Some(Effect::Opened { index }) = effect {
        apply_open(inner, index);
    }
}

fn handle_close(inner: &Rc<GalleryInner>) {
    let effect = inner.state.borrow_mut().close();
    if let Some(Effect::Closed { index }) = effect {
        apply_close(inner, index);
    }
}

fn handle_nav(inner: &Rc<GalleryInner>, direction: SwipeDirection) {
    let effect = match direction {
        SwipeDirection::Next => inner.state.borrow_mut().next(),
        SwipeDirection::Prev => inner.state.borrow_mut().prev(),
    };
    if let Some(Effect::Navigated { from, to }) = effect {
        apply_nav(inner, from, to);
    }
}

fn apply_open(inner: &Rc<GalleryInner>, index: usize) {
    log::info!("opening image {index}");
    let thumb = &inner.thumbs[index];
    let full = &inner.full_imgs[index];

    dom::add_class(thumb.as_ref(), class::HIDE);
    dom::add_class(full.as_ref(), class::ACTIVE);
    // The cached transform is already applied; identity animates the full
    // image out of the thumbnail's footprint to its native geometry.
    dom::set_style(full, "transform", &ThumbTransform::identity().css());

    for (i, other) in inner.full_imgs.iter().enumerate() {
        if i != index {
            dom::add_class(other.as_ref(), class::ALMOST_ACTIVE);
        }
    }
    dom::add_class(&inner.full_box, class::ACTIVE);
    dom::add_class(&inner.controls, class::ACTIVE);
    inner.scroll_lock.acquire();
}

fn apply_close(inner: &Rc<GalleryInner>, index: usize) {
    log::info!("closing image {index}");
    let thumb = &inner.thumbs[index];
    let full = &inner.full_imgs[index];

    // Shrink back into the thumbnail.
    let transform = inner.transforms.borrow()[index];
    dom::set_style(full, "transform", &transform.css());

    dom::remove_class(thumb.as_ref(), class::HIDE);
    dom::remove_class(&inner.full_box, class::ACTIVE);
    dom::remove_class(&inner.controls, class::ACTIVE);
    for other in &inner.full_imgs {
        dom::remove_class(other.as_ref(), class::ALMOST_ACTIVE);
    }

    // The full image stays visible until its shrink transition lands; if
    // transitions are suppressed this final step never runs and the image
    // remains visible (known gap).
    let this = Rc::clone(inner);
    once_transition_end(full.as_ref(), move || {
        if this.state.borrow().open_index().is_some() {
            // Reopened before the transition finished; leave the lightbox
            // alone and keep the scroll lock.
            return;
        }
        dom::remove_class(this.full_imgs[index].as_ref(), class::ACTIVE);
        this.scroll_lock.release();
    });
}

fn apply_nav(inner: &Rc<GalleryInner>, from: usize, to: usize) {
    log::info!("navigating {from} -> {to}");
    let outgoing = &inner.full_imgs[from];
    dom::remove_class(outgoing.as_ref(), class::ACTIVE);
    dom::add_class(outgoing.as_ref(), class::ALMOST_ACTIVE);
    // Reset so its next reopening starts from its new neighbor position.
    dom::set_style(outgoing, "transform", &ThumbTransform::identity().css());
    inner.transforms.borrow_mut()[from] = ThumbTransform::identity();
    dom::remove_class(inner.thumbs[from].as_ref(), class::HIDE);

    let incoming = &inner.full_imgs[to];
    dom::remove_class(incoming.as_ref(), class::ALMOST_ACTIVE);
    dom::add_class(incoming.as_ref(), class::ACTIVE);
    dom::set_style(incoming, "transform", &ThumbTransform::identity().css());
    dom::add_class(inner.thumbs[to].as_ref(), class::HIDE);
}

fn once_transition_end<F: FnOnce() + 'static>(target: &EventTarget, f: F) {
    let options = AddEventListenerOptions::new();
    options.set_once(true);
    let cb = Closure::once_into_js(f);
    if target
        .add_event_listener_with_callback_and_add_event_listener_options(
            "transitionend",
            cb.unchecked_ref(),
            &options,
        )
        .is_err()
    {
        log::error!("failed to bind transitionend listener");
    }
}
