//! Block-kernel convolution over integral images.
//!
//! The response of a kernel at `(x, y)` is
//! `R(x, y) = sum_i scale_i * block(x + x0_i, y + y0_i, x + x1_i, y + y1_i)`.
//! Full-image and sparse evaluation use the zero-border query, so blocks that
//! overhang an edge see zero-valued pixels. The two-zone variant switches to the
//! unchecked query away from the edges.

use std::ops::Range;

use crate::image::{ImageView, ImageViewMut};
use crate::integral::{block_unsafe, block_zero};
use crate::kernel::IntegralKernel;
use crate::pixel::Accumulator;
use crate::trace::{debug_event, trace_span};
use crate::util::error::check_same_shape;
use crate::util::IntegralResult;

#[cfg(feature = "rayon")]
pub mod rayon;

/// Writes the kernel response at every pixel of `output`.
///
/// `output` must have the same shape as `table`.
pub fn convolve<T: Accumulator>(
    table: ImageView<'_, T>,
    kernel: &IntegralKernel,
    mut output: ImageViewMut<'_, T>,
) -> IntegralResult<()> {
    check_same_shape(
        table.width(),
        table.height(),
        output.width(),
        output.height(),
    )?;
    let _span = trace_span!(
        "convolve",
        width = table.width(),
        height = table.height(),
        blocks = kernel.len()
    )
    .entered();

    for (y, row) in output.rows_mut().enumerate() {
        convolve_row_zero(table, kernel, y, row);
    }
    Ok(())
}

/// Two-zone convolution: zero-border queries within `border_x` columns and
/// `border_y` rows of each edge, unchecked queries elsewhere.
///
/// Exact when the borders are at least [`IntegralKernel::border`]. Smaller
/// borders break the unchecked query's contract; the resulting values are
/// unspecified and may panic on an out-of-range index.
pub fn convolve_border<T: Accumulator>(
    table: ImageView<'_, T>,
    kernel: &IntegralKernel,
    mut output: ImageViewMut<'_, T>,
    border_x: usize,
    border_y: usize,
) -> IntegralResult<()> {
    check_same_shape(
        table.width(),
        table.height(),
        output.width(),
        output.height(),
    )?;
    let _span = trace_span!(
        "convolve_border",
        width = table.width(),
        height = table.height(),
        blocks = kernel.len()
    )
    .entered();

    let zone = InteriorZone::new(table.width(), table.height(), border_x, border_y);
    debug_event!(
        "interior_zone",
        interior_cols = zone.cols.len(),
        interior_rows = zone.rows.len()
    );
    for (y, row) in output.rows_mut().enumerate() {
        convolve_row_border(table, kernel, &zone, y, row);
    }
    Ok(())
}

/// Evaluates the kernel response at a single point with zero-border queries.
///
/// Matches the value [`convolve`] writes at `(x, y)`. Any point is accepted,
/// including ones near the ends of the `isize` range; blocks see only their
/// overlap with the image.
#[inline]
pub fn convolve_sparse<T: Accumulator>(
    table: ImageView<'_, T>,
    kernel: &IntegralKernel,
    x: isize,
    y: isize,
) -> T {
    let mut total = T::zero();
    for (rect, scale) in kernel.iter().filter(|(rect, _)| !rect.is_empty()) {
        let r = rect.translate(x, y);
        let sum = block_zero(table, r.x0, r.y0, r.x1, r.y1);
        total = total.plus(sum.scaled(scale));
    }
    total
}

/// Kernel response using unchecked queries; every block must lie in the image.
#[inline]
fn response_interior<T: Accumulator>(
    table: ImageView<'_, T>,
    kernel: &IntegralKernel,
    x: usize,
    y: usize,
) -> T {
    let (x, y) = (x as isize, y as isize);
    let mut total = T::zero();
    for (rect, scale) in kernel.iter().filter(|(rect, _)| !rect.is_empty()) {
        let sum = block_unsafe(
            table,
            (x + rect.x0) as usize,
            (y + rect.y0) as usize,
            (x + rect.x1) as usize,
            (y + rect.y1) as usize,
        );
        total = total.plus(sum.scaled(scale));
    }
    total
}

/// Pixel ranges handled by the unchecked path.
#[derive(Clone, Debug)]
pub(crate) struct InteriorZone {
    cols: Range<usize>,
    rows: Range<usize>,
}

impl InteriorZone {
    pub(crate) fn new(width: usize, height: usize, border_x: usize, border_y: usize) -> Self {
        Self {
            cols: interior_range(width, border_x),
            rows: interior_range(height, border_y),
        }
    }
}

fn interior_range(len: usize, border: usize) -> Range<usize> {
    let start = border.min(len);
    let end = len.saturating_sub(border).max(start);
    start..end
}

pub(crate) fn convolve_row_zero<T: Accumulator>(
    table: ImageView<'_, T>,
    kernel: &IntegralKernel,
    y: usize,
    row: &mut [T],
) {
    let y = y as isize;
    for (x, out) in row.iter_mut().enumerate() {
        *out = convolve_sparse(table, kernel, x as isize, y);
    }
}

pub(crate) fn convolve_row_border<T: Accumulator>(
    table: ImageView<'_, T>,
    kernel: &IntegralKernel,
    zone: &InteriorZone,
    y: usize,
    row: &mut [T],
) {
    if !zone.rows.contains(&y) {
        convolve_row_zero(table, kernel, y, row);
        return;
    }
    for (x, out) in row.iter_mut().enumerate() {
        *out = if zone.cols.contains(&x) {
            response_interior(table, kernel, x, y)
        } else {
            convolve_sparse(table, kernel, x as isize, y as isize)
        };
    }
}
