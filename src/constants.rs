//! Class names, markup attributes, and tuning constants.
//!
//! The class surface is the widget's public contract with page markup and
//! stylesheets: a gallery root is any element carrying [`class::GALLERY`],
//! and the controls built by the widget are locatable via the control
//! classes below.

/// CSS class names.
pub mod class {
    /// Gallery root element.
    pub const GALLERY: &str = "m-p-g";
    /// Container of thumbnail images inside a root.
    pub const THUMBS_BOX: &str = "m-p-g__thumbs";
    /// A single thumbnail image.
    pub const THUMB_IMG: &str = "m-p-g__thumbs-img";
    /// Container of full-size images (the lightbox).
    pub const FULL_BOX: &str = "m-p-g__fullscreen";
    /// A single full-size image.
    pub const FULL_IMG: &str = "m-p-g__fullscreen-img";
    /// Controls container.
    pub const CONTROLS: &str = "m-p-g__controls";
    /// Close button.
    pub const CONTROLS_CLOSE: &str = "m-p-g__controls-close";
    /// Next-image arrow.
    pub const CONTROLS_NEXT: &str = "m-p-g__controls-arrow--next";
    /// Previous-image arrow.
    pub const CONTROLS_PREV: &str = "m-p-g__controls-arrow--prev";
    /// Error box listing full-size images that failed to load.
    pub const ERROR_BOX: &str = "m-p-g__error";

    /// Visual state: element is the active/visible one.
    pub const ACTIVE: &str = "active";
    /// Visual state: element is hidden.
    pub const HIDE: &str = "hide";
    /// Visual state: full-size image adjacent to the open one (dimmed).
    pub const ALMOST_ACTIVE: &str = "almost-active";
    /// Marker: image has been sized by a row-packing pass.
    pub const LAYOUT_COMPLETED: &str = "layout-completed";
}

/// Markup attribute names.
pub mod attr {
    /// Full-size image URL on a thumbnail.
    pub const DATA_FULL: &str = "data-full";
    /// Intrinsic width stamped on a thumbnail after load.
    pub const DATA_WIDTH: &str = "data-width";
    /// Intrinsic height stamped on a thumbnail after load.
    pub const DATA_HEIGHT: &str = "data-height";
    /// Per-container row-height cap override.
    pub const DATA_MAX_HEIGHT: &str = "data-max-height";
    /// Marker selecting containers the row packer lays out.
    pub const LAYOUT_MARKER: &str = "data-image-layout";
}

/// Row-packing defaults.
pub mod layout {
    /// Row height cap when a container has no `data-max-height`.
    pub const DEFAULT_MAX_ROW_HEIGHT: f64 = 120.0;
}

/// Scheduling windows.
pub mod timing {
    /// Trailing-edge window coalescing resize/scroll bursts.
    pub const GEOMETRY_DEBOUNCE_MS: i32 = 60;
}

/// Touch gesture tuning.
pub mod touch {
    /// Horizontal travel, in CSS pixels, before a move counts as a swipe.
    pub const SWIPE_THRESHOLD_PX: f64 = 30.0;
}
