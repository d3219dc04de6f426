//! Integral image construction.
//!
//! The integral image `I` of a source `S` has the same shape as `S` and holds
//! `I(x, y) = sum of S(i, j) for i <= x, j <= y` in the accumulator type chosen
//! by [`Pixel::Sum`]. It is built in two passes: an independent running sum per
//! row, then a top-to-bottom pass adding the row above.

use crate::image::{ImageView, ImageViewMut, OwnedImage};
use crate::pixel::{Accumulator, Pixel};
use crate::trace::{trace_event, trace_span};
use crate::util::error::check_same_shape;
use crate::util::IntegralResult;

mod block;

pub use block::{block_unsafe, block_zero};

/// Writes the integral image of `src` into `dst`.
///
/// Fails with `ShapeMismatch` before writing anything if the shapes differ.
pub fn transform<P: Pixel>(
    src: ImageView<'_, P>,
    mut dst: ImageViewMut<'_, P::Sum>,
) -> IntegralResult<()> {
    check_same_shape(src.width(), src.height(), dst.width(), dst.height())?;
    let _span = trace_span!(
        "integral_transform",
        width = src.width(),
        height = src.height(),
        kind = %P::KIND
    )
    .entered();

    for (src_row, dst_row) in src.rows().zip(dst.rows_mut()) {
        row_prefix_sum(src_row, dst_row);
    }
    accumulate_columns(&mut dst);

    trace_event!("integral_built", pixels = src.width() * src.height());
    Ok(())
}

/// Allocates and returns the integral image of `src`.
pub fn integral_image<P: Pixel>(src: ImageView<'_, P>) -> IntegralResult<OwnedImage<P::Sum>> {
    let mut out = OwnedImage::zeros(src.width(), src.height())?;
    transform(src, out.view_mut())?;
    Ok(out)
}

/// Running horizontal sum of one row.
#[inline]
pub(crate) fn row_prefix_sum<P: Pixel>(src: &[P], dst: &mut [P::Sum]) {
    let mut sum = P::Sum::zero();
    for (out, &value) in dst.iter_mut().zip(src) {
        sum = sum.plus(value.widen());
        *out = sum;
    }
}

/// Adds each row's column totals from the row above, top to bottom.
pub(crate) fn accumulate_columns<T: Accumulator>(dst: &mut ImageViewMut<'_, T>) {
    let width = dst.width();
    let height = dst.height();
    let stride = dst.stride();
    let data = dst.as_mut_slice();
    for y in 1..height {
        let (above, below) = data.split_at_mut(y * stride);
        let prev = &above[(y - 1) * stride..(y - 1) * stride + width];
        for (value, &up) in below[..width].iter_mut().zip(prev) {
            *value = value.plus(up);
        }
    }
}
