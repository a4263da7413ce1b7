//! Material Photo Gallery
//!
//! An in-page photo gallery widget: justified thumbnail rows that open
//! into a lightbox with geometric thumbnail/full-image transitions.
//! Compiled to WebAssembly for the browser; the layout, load-tracking, and
//! view-state cores are platform-neutral and tested natively.

pub mod callback;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod loader;
pub mod state;
pub mod swipe;

pub use error::GalleryError;
pub use geometry::{Rect, ThumbTransform};
pub use layout::{pack_rows, ImageDim, Row};
pub use loader::{ConfirmReason, SessionState, Terminal};
pub use state::{Effect, GalleryState, ViewState};
pub use swipe::{SwipeDirection, SwipeTracker};

// WASM entry point and DOM layer
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{start, BackgroundScan, LoadSession, ResourceReport};
