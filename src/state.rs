//! Gallery view-state machine.
//!
//! The lightbox lifecycle as an explicit tagged state: `Closed`, or
//! `Open(index)` with a valid index into the thumbnail/full-image pair
//! lists. Transitions are requested by the DOM layer and either return the
//! effect to apply or `None`: a guarded-off or out-of-state request is a
//! silent no-op with no side effects, which makes duplicate triggers
//! (double clicks, re-entrant events) naturally idempotent.

use std::collections::HashSet;

/// Lightbox view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Thumbnails visible, no full-size image shown.
    Closed,
    /// Full-size image at the index is shown.
    Open(usize),
}

/// The DOM work a successful transition requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Hide thumbnail, reveal full image at identity, show controls,
    /// acquire the scroll lock.
    Opened { index: usize },
    /// Re-apply the cached thumbnail transform and tear the lightbox down
    /// once the transition completes.
    Closed { index: usize },
    /// Swap the visible full image.
    Navigated { from: usize, to: usize },
}

/// State machine for one gallery root.
#[derive(Debug)]
pub struct GalleryState {
    len: usize,
    view: ViewState,
    full_imgs_loaded: bool,
    setup_complete: bool,
    broken: HashSet<usize>,
}

impl GalleryState {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            view: ViewState::Closed,
            full_imgs_loaded: false,
            setup_complete: false,
            broken: HashSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    /// The open index, if the lightbox is open.
    pub fn open_index(&self) -> Option<usize> {
        match self.view {
            ViewState::Open(i) => Some(i),
            ViewState::Closed => None,
        }
    }

    /// Mark the full-image load session as terminated (done or fail).
    pub fn set_full_imgs_loaded(&mut self) {
        self.full_imgs_loaded = true;
    }

    pub fn full_imgs_loaded(&self) -> bool {
        self.full_imgs_loaded
    }

    /// Mark initial geometry as captured (first thumbnail interaction).
    pub fn set_setup_complete(&mut self) {
        self.setup_complete = true;
    }

    pub fn setup_complete(&self) -> bool {
        self.setup_complete
    }

    /// Record that the full image at `index` failed to load. A broken
    /// index is never opened or navigated to.
    pub fn mark_broken(&mut self, index: usize) {
        self.broken.insert(index);
    }

    pub fn is_broken(&self, index: usize) -> bool {
        self.broken.contains(&index)
    }

    /// `Closed -> Open(index)`, guarded by load completion, geometry
    /// setup, index validity, and the index not being broken.
    pub fn select(&mut self, index: usize) -> Option<Effect> {
        if self.view != ViewState::Closed
            || !self.full_imgs_loaded
            || !self.setup_complete
            || index >= self.len
            || self.is_broken(index)
        {
            return None;
        }
        self.view = ViewState::Open(index);
        Some(Effect::Opened { index })
    }

    /// `Open(i) -> Closed`.
    pub fn close(&mut self) -> Option<Effect> {
        match self.view {
            ViewState::Open(index) => {
                self.view = ViewState::Closed;
                Some(Effect::Closed { index })
            }
            ViewState::Closed => None,
        }
    }

    /// `Open(i) -> Open((i+1) mod N)`, skipping broken indices.
    pub fn next(&mut self) -> Option<Effect> {
        self.navigate(1)
    }

    /// `Open(i) -> Open((i-1) mod N)`, skipping broken indices.
    pub fn prev(&mut self) -> Option<Effect> {
        self.navigate(-1)
    }

    fn navigate(&mut self, step: isize) -> Option<Effect> {
        let ViewState::Open(from) = self.view else {
            return None;
        };
        // Walk around the ring until a usable index comes up; exhausting
        // the other indices means every other image is broken.
        let len = self.len as isize;
        let mut to = from as isize;
        for _ in 1..len {
            to = (to + step).rem_euclid(len);
            let candidate = to as usize;
            if !self.is_broken(candidate) {
                self.view = ViewState::Open(candidate);
                return Some(Effect::Navigated {
                    from,
                    to: candidate,
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready(len: usize) -> GalleryState {
        let mut s = GalleryState::new(len);
        s.set_full_imgs_loaded();
        s.set_setup_complete();
        s
    }

    #[test]
    fn test_select_requires_loaded_and_setup() {
        let mut s = GalleryState::new(3);
        assert_eq!(s.select(0), None);

        s.set_full_imgs_loaded();
        assert_eq!(s.select(0), None);

        s.set_setup_complete();
        assert_eq!(s.select(0), Some(Effect::Opened { index: 0 }));
        assert_eq!(s.view(), ViewState::Open(0));
    }

    #[test]
    fn test_select_out_of_range_is_noop() {
        let mut s = ready(3);
        assert_eq!(s.select(3), None);
        assert_eq!(s.view(), ViewState::Closed);
    }

    #[test]
    fn test_select_while_open_is_noop() {
        let mut s = ready(3);
        s.select(1);
        assert_eq!(s.select(2), None);
        assert_eq!(s.view(), ViewState::Open(1));
    }

    #[test]
    fn test_broken_index_never_opens() {
        let mut s = ready(3);
        s.mark_broken(1);
        assert_eq!(s.select(1), None);
        assert_eq!(s.view(), ViewState::Closed);
    }

    #[test]
    fn test_next_wraps_around() {
        let mut s = ready(3);
        s.select(2);
        assert_eq!(s.next(), Some(Effect::Navigated { from: 2, to: 0 }));
        assert_eq!(s.view(), ViewState::Open(0));
    }

    #[test]
    fn test_prev_wraps_around() {
        let mut s = ready(3);
        s.select(0);
        assert_eq!(s.prev(), Some(Effect::Navigated { from: 0, to: 2 }));
    }

    #[test]
    fn test_navigation_skips_broken() {
        let mut s = ready(4);
        s.mark_broken(2);
        s.select(1);
        assert_eq!(s.next(), Some(Effect::Navigated { from: 1, to: 3 }));
    }

    #[test]
    fn test_navigation_with_all_others_broken_is_noop() {
        let mut s = ready(3);
        s.mark_broken(1);
        s.mark_broken(2);
        s.select(0);
        assert_eq!(s.next(), None);
        assert_eq!(s.prev(), None);
        assert_eq!(s.view(), ViewState::Open(0));
    }

    #[test]
    fn test_single_image_navigation_is_noop() {
        let mut s = ready(1);
        s.select(0);
        assert_eq!(s.next(), None);
        assert_eq!(s.view(), ViewState::Open(0));
    }

    #[test]
    fn test_closed_transitions_are_noops() {
        let mut s = ready(3);
        assert_eq!(s.close(), None);
        assert_eq!(s.next(), None);
        assert_eq!(s.prev(), None);
        assert_eq!(s.view(), ViewState::Closed);
    }

    #[test]
    fn test_open_close_round_trip() {
        let mut s = ready(2);
        assert_eq!(s.select(1), Some(Effect::Opened { index: 1 }));
        assert_eq!(s.close(), Some(Effect::Closed { index: 1 }));
        assert_eq!(s.view(), ViewState::Closed);
        // Reopening works; the setup flag survives a close.
        assert_eq!(s.select(0), Some(Effect::Opened { index: 0 }));
    }
}
