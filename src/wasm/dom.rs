//! Thin helpers over the DOM surfaces the gallery consumes: element
//! queries, class toggling, inline styles, rendered geometry, computed
//! backgrounds, and the controls factory.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, Window};

use crate::constants::class;
use crate::error::GalleryError;
use crate::geometry::Rect;

pub fn window() -> Result<Window, GalleryError> {
    web_sys::window().ok_or(GalleryError::NoContext("window"))
}

pub fn document() -> Result<Document, GalleryError> {
    window()?
        .document()
        .ok_or(GalleryError::NoContext("document"))
}

pub fn js_err(err: JsValue) -> GalleryError {
    GalleryError::Dom(format!("{err:?}"))
}

/// Find the first descendant matching `selector`, or fail.
pub fn query(parent: &Element, selector: &str) -> Result<Element, GalleryError> {
    parent
        .query_selector(selector)
        .map_err(js_err)?
        .ok_or_else(|| GalleryError::MissingElement {
            selector: selector.to_string(),
        })
}

/// All descendants of `parent` matching `selector`.
pub fn query_all(parent: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = parent.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// All elements in the document matching `selector`.
pub fn query_all_in_document(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn add_class(el: &Element, name: &str) {
    let _ = el.class_list().add_1(name);
}

pub fn remove_class(el: &Element, name: &str) {
    let _ = el.class_list().remove_1(name);
}

/// Current rendered rectangle, in viewport coordinates. Reading it flushes
/// pending layout, so values reflect the live geometry.
pub fn rect_of(el: &Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect::new(r.left(), r.top(), r.width(), r.height())
}

/// Write one inline style property.
pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    if el.style().set_property(property, value).is_err() {
        log::warn!("failed to set style {property}: {value}");
    }
}

/// Clear one inline style property.
pub fn clear_style(el: &HtmlElement, property: &str) {
    let _ = el.style().remove_property(property);
}

/// The element's computed `background-image` value, if resolvable.
pub fn computed_background_image(el: &Element) -> Option<String> {
    let window = web_sys::window()?;
    let style = window.get_computed_style(el).ok().flatten()?;
    style.get_property_value("background-image").ok()
}

/// Create a detached image element (probes, full-size images).
pub fn create_image(document: &Document) -> Result<HtmlImageElement, GalleryError> {
    document
        .create_element("img")
        .map_err(js_err)?
        .dyn_into::<HtmlImageElement>()
        .map_err(|_| GalleryError::WrongElementType {
            selector: "img".to_string(),
            expected: "HtmlImageElement",
        })
}

/// Build the controls subtree: a container with close, previous, and next
/// buttons locatable via the documented class names.
pub fn build_controls(document: &Document) -> Result<Element, GalleryError> {
    let controls = document.create_element("div").map_err(js_err)?;
    controls.set_class_name(class::CONTROLS);

    for (name, label) in [
        (class::CONTROLS_CLOSE, "Close"),
        (class::CONTROLS_PREV, "Previous image"),
        (class::CONTROLS_NEXT, "Next image"),
    ] {
        let button = document.create_element("button").map_err(js_err)?;
        button.set_class_name(name);
        button.set_attribute("type", "button").map_err(js_err)?;
        button.set_attribute("aria-label", label).map_err(js_err)?;
        controls.append_child(&button).map_err(js_err)?;
    }

    Ok(controls)
}
