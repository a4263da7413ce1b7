//! Thumbnail/full-image transform mathematics.
//!
//! The lightbox transition is a 2D scale+translate that maps a full-size
//! image's rendered rectangle onto its thumbnail's rectangle. Applying the
//! transform shrinks the full image to exactly overlay the thumbnail;
//! applying the identity restores native size and position. Extracted here
//! so the mapping is testable without a DOM.

/// An axis-aligned rendered rectangle, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Horizontal center of the rectangle.
    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }

    /// Vertical center of the rectangle.
    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// A scale+translate mapping a full-size image onto its thumbnail.
///
/// Scales are rounded to 3 decimals and translations to whole pixels, the
/// precision browsers render transforms at reliably.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThumbTransform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

impl ThumbTransform {
    /// The identity transform (native size and position).
    pub fn identity() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// Compute the transform that overlays `full` onto `thumb`.
    ///
    /// The translation is the vector from the full image's center to the
    /// thumbnail's center; with the default center transform origin the
    /// scale then matches the thumbnail's size in place.
    pub fn between(full: Rect, thumb: Rect) -> Self {
        Self {
            translate_x: (thumb.center_x() - full.center_x()).round(),
            translate_y: (thumb.center_y() - full.center_y()).round(),
            scale_x: round3(thumb.width / full.width),
            scale_y: round3(thumb.height / full.height),
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Serialize as a CSS `transform` property value.
    pub fn css(&self) -> String {
        format!(
            "translate({}px,{}px) scale({},{})",
            self.translate_x, self.translate_y, self.scale_x, self.scale_y
        )
    }

    /// The rectangle produced by applying this transform to `rect`.
    ///
    /// Mirrors the browser's evaluation with a center transform origin:
    /// the element scales about its center, then the center moves by the
    /// translation.
    pub fn apply_to(&self, rect: Rect) -> Rect {
        let cx = rect.center_x() + self.translate_x;
        let cy = rect.center_y() + self.translate_y;
        let width = rect.width * self.scale_x;
        let height = rect.height * self.scale_y;
        Rect {
            left: cx - width / 2.0,
            top: cy - height / 2.0,
            width,
            height,
        }
    }
}

impl Default for ThumbTransform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() <= tolerance
    }

    #[test]
    fn test_identity_css() {
        let t = ThumbTransform::identity();
        assert!(t.is_identity());
        assert_eq!(t.css(), "translate(0px,0px) scale(1,1)");
    }

    #[test]
    fn test_identity_preserves_rect() {
        let rect = Rect::new(10.0, 20.0, 300.0, 200.0);
        assert_eq!(ThumbTransform::identity().apply_to(rect), rect);
    }

    #[test]
    fn test_between_scales_and_translates() {
        let full = Rect::new(100.0, 50.0, 800.0, 600.0);
        let thumb = Rect::new(20.0, 700.0, 200.0, 150.0);
        let t = ThumbTransform::between(full, thumb);

        assert_eq!(t.scale_x, 0.25);
        assert_eq!(t.scale_y, 0.25);
        // thumb center (120, 775), full center (500, 350)
        assert_eq!(t.translate_x, -380.0);
        assert_eq!(t.translate_y, 425.0);
    }

    #[test]
    fn test_round_trip_overlays_thumbnail() {
        // Applying the computed transform to the full rect must yield the
        // thumbnail rect, within the 3-decimal scale rounding.
        let full = Rect::new(315.0, 40.0, 1250.0, 833.0);
        let thumb = Rect::new(17.0, 912.0, 180.0, 120.0);
        let t = ThumbTransform::between(full, thumb);
        let mapped = t.apply_to(full);

        assert!(approx_eq(mapped.width, thumb.width, 1.0));
        assert!(approx_eq(mapped.height, thumb.height, 1.0));
        assert!(approx_eq(mapped.left, thumb.left, 1.0));
        assert!(approx_eq(mapped.top, thumb.top, 1.0));
    }

    #[test]
    fn test_scale_rounded_to_three_decimals() {
        let full = Rect::new(0.0, 0.0, 900.0, 900.0);
        let thumb = Rect::new(0.0, 0.0, 100.0, 100.0);
        let t = ThumbTransform::between(full, thumb);

        // 100/900 = 0.1111... rounds to 0.111
        assert_eq!(t.scale_x, 0.111);
        assert_eq!(t.css(), "translate(-400px,-400px) scale(0.111,0.111)");
    }
}
