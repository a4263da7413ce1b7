//! Touch-swipe recognition.
//!
//! A minimal delta-threshold heuristic: a gesture fires at most one
//! navigation, once its horizontal travel passes the threshold with the
//! horizontal axis dominating the vertical.

use crate::constants::touch::SWIPE_THRESHOLD_PX;

/// Navigation direction produced by a swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// Swipe right: go to the previous image.
    Prev,
    /// Swipe left: go to the next image.
    Next,
}

/// Tracks one touch gesture from start to end.
#[derive(Debug, Clone, Default)]
pub struct SwipeTracker {
    start: Option<(f64, f64)>,
    fired: bool,
}

impl SwipeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a gesture at the given touch position.
    pub fn begin(&mut self, x: f64, y: f64) {
        self.start = Some((x, y));
        self.fired = false;
    }

    /// Feed a touch-move position; yields a direction at most once per
    /// gesture.
    pub fn update(&mut self, x: f64, y: f64) -> Option<SwipeDirection> {
        if self.fired {
            return None;
        }
        let (start_x, start_y) = self.start?;
        let dx = x - start_x;
        let dy = y - start_y;

        if dx.abs() >= SWIPE_THRESHOLD_PX && dx.abs() > dy.abs() {
            self.fired = true;
            Some(if dx < 0.0 {
                SwipeDirection::Next
            } else {
                SwipeDirection::Prev
            })
        } else {
            None
        }
    }

    /// End the gesture.
    pub fn end(&mut self) {
        self.start = None;
        self.fired = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_travel_does_not_fire() {
        let mut t = SwipeTracker::new();
        t.begin(100.0, 100.0);
        assert_eq!(t.update(110.0, 100.0), None);
    }

    #[test]
    fn test_left_swipe_is_next() {
        let mut t = SwipeTracker::new();
        t.begin(200.0, 100.0);
        assert_eq!(t.update(150.0, 105.0), Some(SwipeDirection::Next));
    }

    #[test]
    fn test_right_swipe_is_prev() {
        let mut t = SwipeTracker::new();
        t.begin(100.0, 100.0);
        assert_eq!(t.update(160.0, 95.0), Some(SwipeDirection::Prev));
    }

    #[test]
    fn test_vertical_drag_does_not_fire() {
        // Vertical travel dominates: this is a scroll, not a swipe.
        let mut t = SwipeTracker::new();
        t.begin(100.0, 100.0);
        assert_eq!(t.update(140.0, 200.0), None);
    }

    #[test]
    fn test_fires_once_per_gesture() {
        let mut t = SwipeTracker::new();
        t.begin(200.0, 100.0);
        assert_eq!(t.update(150.0, 100.0), Some(SwipeDirection::Next));
        assert_eq!(t.update(100.0, 100.0), None);

        // A new gesture can fire again.
        t.end();
        t.begin(200.0, 100.0);
        assert_eq!(t.update(150.0, 100.0), Some(SwipeDirection::Next));
    }

    #[test]
    fn test_move_without_begin_is_ignored() {
        let mut t = SwipeTracker::new();
        assert_eq!(t.update(150.0, 100.0), None);
    }
}
