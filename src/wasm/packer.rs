//! DOM row packer.
//!
//! Applies [`crate::layout::pack_rows`] to marked containers: reads the
//! stamped intrinsic dimensions off each descendant image, the container's
//! content width, and its row-height cap, then writes the computed sizes
//! back as inline styles.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};
use web_time::Instant;

use super::dom;
use crate::constants::{attr, class, layout};
use crate::layout::{pack_rows, ImageDim};

/// Lay out every container in the document carrying the layout marker.
pub fn layout_all(document: &Document) {
    let selector = format!("[{}]", attr::LAYOUT_MARKER);
    for container in dom::query_all_in_document(document, &selector) {
        align(&container);
    }
}

/// Lay out one container's images into justified rows.
///
/// Images without stamped dimensions (not yet loaded, or broken) are left
/// untouched. Sized images are marked `layout-completed` so later passes
/// can tell them apart.
pub fn align(container: &Element) {
    let started = Instant::now();
    let container_width = f64::from(container.client_width());
    let max_row_height = container
        .get_attribute(attr::DATA_MAX_HEIGHT)
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(layout::DEFAULT_MAX_ROW_HEIGHT);

    let mut elements: Vec<HtmlElement> = Vec::new();
    let mut dims: Vec<ImageDim> = Vec::new();
    for img in dom::query_all(container, "img") {
        let stamped = stamped_dimensions(&img);
        let Some(dim) = stamped else {
            log::warn!("skipping image without stamped dimensions");
            continue;
        };
        let Ok(el) = img.dyn_into::<HtmlElement>() else {
            continue;
        };
        elements.push(el);
        dims.push(dim);
    }

    if dims.is_empty() {
        return;
    }

    let rows = pack_rows(&dims, container_width, max_row_height);

    let mut index = 0;
    for row in &rows {
        for &width in &row.widths {
            let el = &elements[index];
            index += 1;
            dom::set_style(el, "width", &format!("{width}px"));
            dom::set_style(el, "height", &format!("{}px", row.height));
            dom::add_class(el, class::LAYOUT_COMPLETED);
        }
    }

    log::debug!(
        "packed {} images into {} rows ({}px wide) in {:?}",
        dims.len(),
        rows.len(),
        container_width,
        started.elapsed()
    );
}

fn stamped_dimensions(img: &Element) -> Option<ImageDim> {
    let width = img.get_attribute(attr::DATA_WIDTH)?.parse::<u32>().ok()?;
    let height = img.get_attribute(attr::DATA_HEIGHT)?.parse::<u32>().ok()?;
    if width == 0 || height == 0 {
        return None;
    }
    Some(ImageDim::new(width, height))
}
