//! Structural initialization errors.

use thiserror::Error;

/// Errors raised while wiring a gallery root.
///
/// These are fatal for the root being initialized (it stays
/// non-interactive) but must not affect sibling galleries on the page.
/// Resource load failures are not errors; they are tracked per resource
/// and aggregated by the load session.
#[derive(Debug, Error)]
pub enum GalleryError {
    /// A required descendant (thumbnails container, controls, ...) is
    /// missing from the root's subtree.
    #[error("required element not found: {selector}")]
    MissingElement { selector: String },

    /// An element matched a selector but has an unexpected type (e.g. a
    /// thumbnail that is not an image element).
    #[error("element matching {selector} is not a {expected}")]
    WrongElementType {
        selector: String,
        expected: &'static str,
    },

    /// The document or window object is unavailable.
    #[error("no browsing context: {0}")]
    NoContext(&'static str),

    /// A DOM call failed; carries the stringified JS error.
    #[error("DOM error: {0}")]
    Dom(String),
}
