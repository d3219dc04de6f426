//! Constant-time rectangle sums over an integral image.
//!
//! Both queries apply
//! `sum = I(x1-1, y1-1) - I(x0-1, y1-1) - I(x1-1, y0-1) + I(x0-1, y0-1)`
//! with a virtual zero row and column at index -1.

use crate::image::ImageView;
use crate::pixel::Accumulator;

/// Sums the half-open rectangle `[x0, x1) x [y0, y1)` without bounds adjustment.
///
/// The caller guarantees `x0 < x1 <= width` and `y0 < y1 <= height`; violating
/// that yields an unspecified value or an index panic.
#[inline]
pub fn block_unsafe<T: Accumulator>(
    table: ImageView<'_, T>,
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
) -> T {
    let data = table.as_slice();
    let stride = table.stride();
    let bottom = (y1 - 1) * stride;

    let mut sum = data[bottom + x1 - 1];
    if x0 > 0 {
        sum = sum.minus(data[bottom + x0 - 1]);
    }
    if y0 > 0 {
        let top = (y0 - 1) * stride;
        sum = sum.minus(data[top + x1 - 1]);
        if x0 > 0 {
            sum = sum.plus(data[top + x0 - 1]);
        }
    }
    sum
}

/// Sums `[x0, x1) x [y0, y1)` treating everything outside the image as zero.
///
/// Corners are clamped to `[0, width] x [0, height]`; a rectangle that is empty
/// after clamping sums to zero.
#[inline]
pub fn block_zero<T: Accumulator>(
    table: ImageView<'_, T>,
    x0: isize,
    y0: isize,
    x1: isize,
    y1: isize,
) -> T {
    let width = table.width() as isize;
    let height = table.height() as isize;
    let x0 = x0.clamp(0, width);
    let y0 = y0.clamp(0, height);
    let x1 = x1.clamp(0, width);
    let y1 = y1.clamp(0, height);
    if x1 <= x0 || y1 <= y0 {
        return T::zero();
    }
    block_unsafe(table, x0 as usize, y0 as usize, x1 as usize, y1 as usize)
}
