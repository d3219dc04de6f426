//! Rectangle and block-kernel model.
//!
//! A kernel is an ordered list of weighted rectangles, each expressed relative
//! to the query pixel. Its response at `(x, y)` is the weighted sum of the region
//! sums of every rectangle shifted to `(x, y)`, which covers box filters and
//! Haar-like features alike.

use crate::util::{IntegralError, IntegralResult};

/// Axis-aligned rectangle with half-open bounds `x0 <= x < x1`, `y0 <= y < y1`.
///
/// Coordinates are offsets relative to a query pixel and may be negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x0: isize,
    pub y0: isize,
    pub x1: isize,
    pub y1: isize,
}

impl Rect {
    /// Creates a rectangle from its corner offsets.
    pub const fn new(x0: isize, y0: isize, x1: isize, y1: isize) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Square `2 * radius + 1` wide, centered on the query pixel.
    pub const fn centered(radius: isize) -> Self {
        Self::new(-radius, -radius, radius + 1, radius + 1)
    }

    /// Width in pixels, zero when empty.
    pub fn width(&self) -> usize {
        self.x1.saturating_sub(self.x0).max(0) as usize
    }

    /// Height in pixels, zero when empty.
    pub fn height(&self) -> usize {
        self.y1.saturating_sub(self.y0).max(0) as usize
    }

    /// Number of pixels covered, saturating at `usize::MAX`.
    pub fn area(&self) -> usize {
        self.width().saturating_mul(self.height())
    }

    /// Returns true if the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    /// Returns the rectangle shifted by `(dx, dy)`.
    ///
    /// Corners saturate at the `isize` range. Any corner that saturates already
    /// lies outside every image, so zero-border sums over the result are exact.
    pub fn translate(&self, dx: isize, dy: isize) -> Self {
        Self::new(
            self.x0.saturating_add(dx),
            self.y0.saturating_add(dy),
            self.x1.saturating_add(dx),
            self.y1.saturating_add(dy),
        )
    }
}

/// Margins for which every kernel block stays inside the image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KernelBorder {
    /// Columns to treat as border on the left and right edges.
    pub x: usize,
    /// Rows to treat as border on the top and bottom edges.
    pub y: usize,
}

/// Immutable ordered list of weighted rectangles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntegralKernel {
    blocks: Vec<Rect>,
    scales: Vec<i32>,
}

impl IntegralKernel {
    /// Builds a kernel from parallel rectangle and scale lists.
    pub fn new(blocks: Vec<Rect>, scales: Vec<i32>) -> IntegralResult<Self> {
        if blocks.is_empty() {
            return Err(IntegralError::InvalidKernel("kernel has no blocks"));
        }
        if blocks.len() != scales.len() {
            return Err(IntegralError::InvalidKernel(
                "blocks and scales differ in length",
            ));
        }
        Ok(Self { blocks, scales })
    }

    /// Builds a kernel from `(rect, scale)` pairs.
    pub fn from_pairs<I>(pairs: I) -> IntegralResult<Self>
    where
        I: IntoIterator<Item = (Rect, i32)>,
    {
        let (blocks, scales) = pairs.into_iter().unzip();
        Self::new(blocks, scales)
    }

    /// Unit-weight box filter of side `2 * radius + 1`.
    pub fn box_filter(radius: isize) -> Self {
        Self {
            blocks: vec![Rect::centered(radius)],
            scales: vec![1],
        }
    }

    /// Returns the rectangles in evaluation order.
    pub fn blocks(&self) -> &[Rect] {
        &self.blocks
    }

    /// Returns the per-block scales.
    pub fn scales(&self) -> &[i32] {
        &self.scales
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Always false; kernels are validated to be non-empty.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterates over `(rect, scale)` pairs in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (Rect, i32)> + '_ {
        self.blocks.iter().copied().zip(self.scales.iter().copied())
    }

    /// Smallest symmetric border for which the unchecked interior path is exact.
    ///
    /// Pixel `x` keeps every non-empty block inside `[0, W)` when
    /// `x >= -x0` and `x + x1 <= W` for all blocks; the border covers both sides.
    pub fn border(&self) -> KernelBorder {
        let mut left = 0isize;
        let mut right = 0isize;
        let mut top = 0isize;
        let mut bottom = 0isize;
        for rect in self.blocks.iter().filter(|r| !r.is_empty()) {
            left = left.max(rect.x0.saturating_neg());
            right = right.max(rect.x1 - 1);
            top = top.max(rect.y0.saturating_neg());
            bottom = bottom.max(rect.y1 - 1);
        }
        KernelBorder {
            x: left.max(right) as usize,
            y: top.max(bottom) as usize,
        }
    }
}
