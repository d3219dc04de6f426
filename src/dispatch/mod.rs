//! Runtime routing of type-erased buffers to the generic implementations.
//!
//! Each entry point matches on the element kinds of its arguments and calls the
//! instantiation whose accumulator fits the source kind. Kinds without an
//! accumulator mapping fail with `UnsupportedType`; buffers whose kind differs
//! from what the mapping requires fail with `TypeMismatch`. Both are reported
//! before any output is written.

mod dyn_image;

pub use dyn_image::{BlockSum, DynImage, DynImageView, DynImageViewMut};

use crate::convolve as engine;
use crate::integral;
use crate::kernel::IntegralKernel;
use crate::pixel_math;
use crate::trace::trace_span;
use crate::util::{IntegralError, IntegralResult};

/// Routes a source/destination pair to the builder instantiation for its kind.
macro_rules! route_transform {
    ($src:expr, $dst:expr, $func:path) => {{
        let src = $src;
        let dst = $dst;
        let kind = src.kind();
        let expected = kind
            .accumulator()
            .ok_or(IntegralError::UnsupportedType { kind })?;
        let got = dst.kind();
        match (src, dst) {
            (DynImageView::U8(s), DynImageViewMut::I32(d)) => $func(s, d),
            (DynImageView::I8(s), DynImageViewMut::I32(d)) => $func(s, d),
            (DynImageView::U16(s), DynImageViewMut::I32(d)) => $func(s, d),
            (DynImageView::I16(s), DynImageViewMut::I32(d)) => $func(s, d),
            (DynImageView::I32(s), DynImageViewMut::I64(d)) => $func(s, d),
            (DynImageView::F32(s), DynImageViewMut::F64(d)) => $func(s, d),
            (DynImageView::F64(s), DynImageViewMut::F64(d)) => $func(s, d),
            _ => Err(IntegralError::TypeMismatch { expected, got }),
        }
    }};
}

/// Routes a table/output pair of the same accumulator kind to `$body`.
macro_rules! route_table_output {
    ($table:expr, $out:expr, |$t:ident, $o:ident| $body:expr) => {{
        let table = $table;
        let out = $out;
        let table_kind = table.kind();
        let out_kind = out.kind();
        match (table, out) {
            (DynImageView::I32($t), DynImageViewMut::I32($o)) => $body,
            (DynImageView::I64($t), DynImageViewMut::I64($o)) => $body,
            (DynImageView::F64($t), DynImageViewMut::F64($o)) => $body,
            _ if !table_kind.is_accumulator() => {
                Err(IntegralError::UnsupportedType { kind: table_kind })
            }
            _ => Err(IntegralError::TypeMismatch {
                expected: table_kind,
                got: out_kind,
            }),
        }
    }};
}

/// Routes a table to `$body` and wraps the scalar result in [`BlockSum`].
macro_rules! route_table {
    ($table:expr, |$t:ident| $body:expr) => {
        match $table {
            DynImageView::I32($t) => Ok(BlockSum::from($body)),
            DynImageView::I64($t) => Ok(BlockSum::from($body)),
            DynImageView::F64($t) => Ok(BlockSum::from($body)),
            other => Err(IntegralError::UnsupportedType { kind: other.kind() }),
        }
    };
}

/// Routes two same-kind inputs and a promoted output to `$func`.
macro_rules! route_binary {
    ($a:expr, $b:expr, $out:expr, $func:path, $output_kind:ident;
     $(($input:ident, $output:ident)),+ $(,)?) => {
        match ($a, $b, $out) {
            $(
                (DynImageView::$input(a), DynImageView::$input(b), DynImageViewMut::$output(out)) => {
                    $func(a, b, out)
                }
            )+
            (a, b, out) => {
                if a.kind() != b.kind() {
                    Err(IntegralError::TypeMismatch {
                        expected: a.kind(),
                        got: b.kind(),
                    })
                } else {
                    Err(IntegralError::TypeMismatch {
                        expected: a.kind().$output_kind(),
                        got: out.kind(),
                    })
                }
            }
        }
    };
}

/// Writes the integral image of `src` into `dst`.
///
/// `dst` must have the accumulator kind of `src` (see [`PixelKind::accumulator`]).
///
/// [`PixelKind::accumulator`]: crate::pixel::PixelKind::accumulator
pub fn transform(src: DynImageView<'_>, dst: DynImageViewMut<'_>) -> IntegralResult<()> {
    let _span = trace_span!("dispatch_transform", source = %src.kind(), target = %dst.kind())
        .entered();
    route_transform!(src, dst, integral::transform)
}

/// Row-parallel [`transform`].
#[cfg(feature = "rayon")]
pub fn transform_par(src: DynImageView<'_>, dst: DynImageViewMut<'_>) -> IntegralResult<()> {
    let _span = trace_span!("dispatch_transform_par", source = %src.kind()).entered();
    route_transform!(src, dst, engine::rayon::transform_par)
}

/// Allocates the integral image of `src` in its accumulator kind.
pub fn integral_image(src: DynImageView<'_>) -> IntegralResult<DynImage> {
    let kind = src
        .kind()
        .accumulator()
        .ok_or(IntegralError::UnsupportedType { kind: src.kind() })?;
    let mut out = DynImage::zeros(kind, src.width(), src.height())?;
    transform(src, out.view_mut())?;
    Ok(out)
}

/// Unchecked region sum; see [`integral::block_unsafe`] for the contract.
pub fn block_unsafe(
    table: DynImageView<'_>,
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
) -> IntegralResult<BlockSum> {
    route_table!(table, |t| integral::block_unsafe(t, x0, y0, x1, y1))
}

/// Zero-border region sum.
pub fn block_zero(
    table: DynImageView<'_>,
    x0: isize,
    y0: isize,
    x1: isize,
    y1: isize,
) -> IntegralResult<BlockSum> {
    route_table!(table, |t| integral::block_zero(t, x0, y0, x1, y1))
}

/// Full-image convolution; `out` must share the table's kind and shape.
pub fn convolve(
    table: DynImageView<'_>,
    kernel: &IntegralKernel,
    out: DynImageViewMut<'_>,
) -> IntegralResult<()> {
    let _span = trace_span!("dispatch_convolve", kind = %table.kind()).entered();
    route_table_output!(table, out, |t, o| engine::convolve(t, kernel, o))
}

/// Row-parallel [`convolve`].
#[cfg(feature = "rayon")]
pub fn convolve_par(
    table: DynImageView<'_>,
    kernel: &IntegralKernel,
    out: DynImageViewMut<'_>,
) -> IntegralResult<()> {
    let _span = trace_span!("dispatch_convolve_par", kind = %table.kind()).entered();
    route_table_output!(table, out, |t, o| engine::rayon::convolve_par(t, kernel, o))
}

/// Two-zone convolution; see [`crate::convolve::convolve_border`] for the border contract.
pub fn convolve_border(
    table: DynImageView<'_>,
    kernel: &IntegralKernel,
    out: DynImageViewMut<'_>,
    border_x: usize,
    border_y: usize,
) -> IntegralResult<()> {
    let _span = trace_span!("dispatch_convolve_border", kind = %table.kind()).entered();
    route_table_output!(table, out, |t, o| engine::convolve_border(
        t, kernel, o, border_x, border_y
    ))
}

/// Row-parallel [`convolve_border`].
#[cfg(feature = "rayon")]
pub fn convolve_border_par(
    table: DynImageView<'_>,
    kernel: &IntegralKernel,
    out: DynImageViewMut<'_>,
    border_x: usize,
    border_y: usize,
) -> IntegralResult<()> {
    let _span = trace_span!("dispatch_convolve_border_par", kind = %table.kind()).entered();
    route_table_output!(table, out, |t, o| engine::rayon::convolve_border_par(
        t, kernel, o, border_x, border_y
    ))
}

/// Kernel response at a single point.
pub fn convolve_sparse(
    table: DynImageView<'_>,
    kernel: &IntegralKernel,
    x: isize,
    y: isize,
) -> IntegralResult<BlockSum> {
    route_table!(table, |t| engine::convolve_sparse(t, kernel, x, y))
}

/// Element-wise `a + b` with the promoted output kind.
pub fn add(
    a: DynImageView<'_>,
    b: DynImageView<'_>,
    out: DynImageViewMut<'_>,
) -> IntegralResult<()> {
    route_binary!(a, b, out, pixel_math::add, add_output;
        (U8, U16),
        (I8, I16),
        (U16, I32),
        (I16, I32),
        (I32, I32),
        (I64, I64),
        (F32, F32),
        (F64, F64),
    )
}

/// Element-wise `a - b` with the promoted output kind.
pub fn subtract(
    a: DynImageView<'_>,
    b: DynImageView<'_>,
    out: DynImageViewMut<'_>,
) -> IntegralResult<()> {
    route_binary!(a, b, out, pixel_math::subtract, sub_output;
        (U8, I16),
        (I8, I16),
        (U16, I32),
        (I16, I32),
        (I32, I32),
        (I64, I64),
        (F32, F32),
        (F64, F64),
    )
}

#[cfg(test)]
mod tests {
    use super::{block_zero, integral_image, transform, BlockSum, DynImage};
    use crate::image::OwnedImage;
    use crate::pixel::PixelKind;
    use crate::util::IntegralError;

    #[test]
    fn integral_image_picks_accumulator_kind() {
        let src: DynImage = OwnedImage::new(vec![1u16; 6], 3, 2).unwrap().into();
        let table = integral_image(src.view()).unwrap();
        assert_eq!(table.kind(), PixelKind::I32);
        assert_eq!(table.get_f64(2, 1), Some(6.0));
        assert_eq!(
            block_zero(table.view(), -1, -1, 2, 9).unwrap(),
            BlockSum::I32(4)
        );
    }

    #[test]
    fn i64_source_is_unsupported() {
        let src: DynImage = OwnedImage::new(vec![1i64; 4], 2, 2).unwrap().into();
        let err = integral_image(src.view()).unwrap_err();
        assert_eq!(
            err,
            IntegralError::UnsupportedType {
                kind: PixelKind::I64,
            }
        );
    }

    #[test]
    fn wrong_destination_kind_is_a_type_mismatch() {
        let src: DynImage = OwnedImage::new(vec![1i32; 4], 2, 2).unwrap().into();
        let mut dst = DynImage::zeros(PixelKind::I32, 2, 2).unwrap();
        let err = transform(src.view(), dst.view_mut()).unwrap_err();
        assert_eq!(
            err,
            IntegralError::TypeMismatch {
                expected: PixelKind::I64,
                got: PixelKind::I32,
            }
        );
    }

    #[test]
    fn non_accumulator_table_is_unsupported() {
        let table: DynImage = OwnedImage::new(vec![1u8; 4], 2, 2).unwrap().into();
        let err = block_zero(table.view(), 0, 0, 1, 1).unwrap_err();
        assert_eq!(
            err,
            IntegralError::UnsupportedType {
                kind: PixelKind::U8,
            }
        );
    }
}
