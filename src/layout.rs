//! Justified row layout.
//!
//! Partitions a sequence of images into display rows of uniform height that
//! fill a container width: a row of images with aspect ratios `r1..rn` laid
//! out at height `h` is `(r1 + ... + rn) * h` wide, so the height that
//! exactly fills the container is `h = width / sum(ratios)`. Rows grow
//! greedily until that height drops below the configured cap.
//!
//! Spacing between images is left entirely to CSS margins; no width is
//! reserved here.

/// Intrinsic pixel dimensions of one image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDim {
    pub width: u32,
    pub height: u32,
}

impl ImageDim {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Aspect ratio (width over height).
    pub fn ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// One committed row: a uniform height and the rendered width of each image.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub height: f64,
    pub widths: Vec<f64>,
}

impl Row {
    /// Number of images in the row.
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}

/// The row height at which `dims` exactly fill `container_width`.
fn fill_height(dims: &[ImageDim], container_width: f64) -> f64 {
    let ratio_sum: f64 = dims.iter().map(ImageDim::ratio).sum();
    container_width / ratio_sum
}

fn commit(dims: &[ImageDim], height: f64) -> Row {
    Row {
        height,
        widths: dims.iter().map(|d| height * d.ratio()).collect(),
    }
}

/// Partition `dims` into contiguous rows filling `container_width`.
///
/// Each candidate row grows one image at a time; it is committed as soon as
/// its fill height drops strictly below `max_row_height`. The comparison
/// must stay strict: a prefix landing exactly on the cap keeps growing. If
/// the sequence runs out before any prefix fits, the remainder becomes a
/// final row clamped to the cap (the one row that may be narrower than the
/// container).
pub fn pack_rows(dims: &[ImageDim], container_width: f64, max_row_height: f64) -> Vec<Row> {
    let mut rows = Vec::new();
    let mut rest = dims;

    'outer: while !rest.is_empty() {
        for take in 1..=rest.len() {
            let h = fill_height(&rest[..take], container_width);
            if h < max_row_height {
                rows.push(commit(&rest[..take], h));
                rest = &rest[take..];
                continue 'outer;
            }
        }

        // Even all remaining images stay at or above the cap.
        let h = fill_height(rest, container_width);
        rows.push(commit(rest, h.min(max_row_height)));
        break;
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-6;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn dims_from_ratios(ratios: &[f64]) -> Vec<ImageDim> {
        // Build integer dimensions with the requested w/h ratios.
        ratios
            .iter()
            .map(|r| ImageDim::new((r * 1000.0).round() as u32, 1000))
            .collect()
    }

    #[test]
    fn test_empty_sequence_produces_no_rows() {
        assert!(pack_rows(&[], 1000.0, 120.0).is_empty());
    }

    #[test]
    fn test_reference_growth() {
        // Container 1000, cap 300, ratios [1.5, 1.0, 2.0, 1.5, 0.8]:
        // prefixes of the first row compute 666.7, 400.0, then
        // 1000/4.5 = 222.2 < 300 -> row of three. The remaining two never
        // drop below the cap (666.7, then 1000/2.3 = 434.8), so they form
        // the clamped final row at 300.
        let dims = dims_from_ratios(&[1.5, 1.0, 2.0, 1.5, 0.8]);
        let rows = pack_rows(&dims, 1000.0, 300.0);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[1].len(), 2);

        let h0 = 1000.0 / 4.5;
        assert!(approx_eq(rows[0].height, h0));
        assert!(approx_eq(rows[0].widths[0], 1.5 * h0));
        assert!(approx_eq(rows[0].widths[1], 1.0 * h0));
        assert!(approx_eq(rows[0].widths[2], 2.0 * h0));

        assert!(approx_eq(rows[1].height, 300.0));
        assert!(approx_eq(rows[1].widths[0], 450.0));
        assert!(approx_eq(rows[1].widths[1], 240.0));
    }

    #[test]
    fn test_committed_rows_fill_container_width() {
        let dims = dims_from_ratios(&[1.5, 1.0, 2.0, 1.5, 0.8, 1.2, 0.9]);
        let rows = pack_rows(&dims, 1000.0, 300.0);

        // Every row except possibly the last sums to the container width.
        for row in &rows[..rows.len() - 1] {
            let total: f64 = row.widths.iter().sum();
            assert!(approx_eq(total, 1000.0));
            assert!(row.height < 300.0);
        }
    }

    #[test]
    fn test_partition_preserves_sequence() {
        let dims = dims_from_ratios(&[0.7, 1.3, 2.1, 0.9, 1.0, 1.8]);
        let rows = pack_rows(&dims, 800.0, 200.0);

        let total: usize = rows.iter().map(Row::len).sum();
        assert_eq!(total, dims.len());
        assert!(rows.iter().all(|r| !r.is_empty()));
    }

    #[test]
    fn test_cap_boundary_is_strict() {
        // Ratios [2, 2, 4] in a 1000 container with cap 250: the two-image
        // prefix computes exactly 250, which strict-less-than rejects, so
        // the packer keeps growing and commits all three at 125.
        let dims = dims_from_ratios(&[2.0, 2.0, 4.0]);
        let rows = pack_rows(&dims, 1000.0, 250.0);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].len(), 3);
        assert!(approx_eq(rows[0].height, 125.0));
    }

    #[test]
    fn test_final_overflow_row_is_clamped() {
        // A single narrow image can never fill 400px under the cap; it is
        // committed clamped, narrower than the container.
        let dims = vec![ImageDim::new(500, 500)];
        let rows = pack_rows(&dims, 400.0, 120.0);

        assert_eq!(rows.len(), 1);
        assert!(approx_eq(rows[0].height, 120.0));
        assert!(approx_eq(rows[0].widths[0], 120.0));
        assert!(rows[0].widths[0] < 400.0);
    }

    #[test]
    fn test_wide_single_image_fits_normally() {
        let dims = vec![ImageDim::new(4000, 1000)];
        let rows = pack_rows(&dims, 400.0, 120.0);

        assert_eq!(rows.len(), 1);
        assert!(approx_eq(rows[0].height, 100.0));
        assert!(approx_eq(rows[0].widths[0], 400.0));
    }
}
