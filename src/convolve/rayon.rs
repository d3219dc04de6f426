//! Rayon-parallel builders and convolutions (feature-gated).
//!
//! Rows are distributed across threads. The integral row pass and every
//! convolution row are independent; the integral column pass stays sequential.
//! Results are bit-identical to the scalar versions.

use crate::convolve::{convolve_row_border, convolve_row_zero, InteriorZone};
use crate::image::{ImageView, ImageViewMut};
use crate::integral::{accumulate_columns, row_prefix_sum};
use crate::kernel::IntegralKernel;
use crate::pixel::{Accumulator, Pixel};
use crate::trace::{debug_event, trace_span};
use crate::util::error::check_same_shape;
use crate::util::IntegralResult;
use rayon::prelude::*;

/// Row-parallel [`transform`](crate::integral::transform).
pub fn transform_par<P: Pixel>(
    src: ImageView<'_, P>,
    mut dst: ImageViewMut<'_, P::Sum>,
) -> IntegralResult<()> {
    check_same_shape(src.width(), src.height(), dst.width(), dst.height())?;
    let _span = trace_span!(
        "integral_transform_par",
        width = src.width(),
        height = src.height()
    )
    .entered();

    let width = dst.width();
    let height = dst.height();
    let stride = dst.stride();
    let src_stride = src.stride();
    let src_data = src.as_slice();

    // Row pass in parallel
    dst.as_mut_slice()
        .par_chunks_mut(stride)
        .take(height)
        .enumerate()
        .for_each(|(y, row)| {
            let start = y * src_stride;
            row_prefix_sum(&src_data[start..start + width], &mut row[..width]);
        });

    accumulate_columns(&mut dst);
    Ok(())
}

/// Row-parallel [`convolve`](crate::convolve::convolve).
pub fn convolve_par<T: Accumulator>(
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
        "convolve_par",
        width = table.width(),
        height = table.height(),
        blocks = kernel.len()
    )
    .entered();

    let width = output.width();
    let height = output.height();
    let stride = output.stride();
    output
        .as_mut_slice()
        .par_chunks_mut(stride)
        .take(height)
        .enumerate()
        .for_each(|(y, row)| convolve_row_zero(table, kernel, y, &mut row[..width]));
    Ok(())
}

/// Row-parallel [`convolve_border`](crate::convolve::convolve_border).
pub fn convolve_border_par<T: Accumulator>(
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
        "convolve_border_par",
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
    let width = output.width();
    let height = output.height();
    let stride = output.stride();
    output
        .as_mut_slice()
        .par_chunks_mut(stride)
        .take(height)
        .enumerate()
        .for_each(|(y, row)| convolve_row_border(table, kernel, &zone, y, &mut row[..width]));
    Ok(())
}
