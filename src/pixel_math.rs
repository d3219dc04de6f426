//! Element-wise addition and subtraction of two images with type promotion.
//!
//! Each input type has fixed output types, chosen so that the result of adding
//! or subtracting two in-range values cannot overflow for types narrower than
//! 32 bits:
//!
//! | input | add | subtract |
//! |---|---|---|
//! | `u8` | `u16` | `i16` |
//! | `i8` | `i16` | `i16` |
//! | `u16`, `i16` | `i32` | `i32` |
//! | `i32` | `i32` | `i32` |
//! | `i64` | `i64` | `i64` |
//! | `f32` | `f32` | `f32` |
//! | `f64` | `f64` | `f64` |
//!
//! `i32` and `i64` results wrap on overflow.

use crate::image::{ImageView, ImageViewMut};
use crate::pixel::PixelKind;
use crate::trace::trace_span;
use crate::util::error::check_same_shape;
use crate::util::IntegralResult;

/// Element type that supports promoted two-image arithmetic.
pub trait PixelMath: Copy + Send + Sync + 'static {
    /// Runtime tag of this type.
    const KIND: PixelKind;
    /// Output element type of [`add`].
    type AddOut: Copy;
    /// Output element type of [`subtract`].
    type SubOut: Copy;

    fn add_promoted(self, rhs: Self) -> Self::AddOut;

    fn sub_promoted(self, rhs: Self) -> Self::SubOut;
}

macro_rules! impl_widening_math {
    ($t:ty, $kind:ident, $add:ty, $sub:ty) => {
        impl PixelMath for $t {
            const KIND: PixelKind = PixelKind::$kind;
            type AddOut = $add;
            type SubOut = $sub;

            #[inline]
            fn add_promoted(self, rhs: Self) -> $add {
                <$add>::from(self) + <$add>::from(rhs)
            }

            #[inline]
            fn sub_promoted(self, rhs: Self) -> $sub {
                <$sub>::from(self) - <$sub>::from(rhs)
            }
        }
    };
}

macro_rules! impl_wrapping_math {
    ($t:ty, $kind:ident) => {
        impl PixelMath for $t {
            const KIND: PixelKind = PixelKind::$kind;
            type AddOut = $t;
            type SubOut = $t;

            #[inline]
            fn add_promoted(self, rhs: Self) -> $t {
                self.wrapping_add(rhs)
            }

            #[inline]
            fn sub_promoted(self, rhs: Self) -> $t {
                self.wrapping_sub(rhs)
            }
        }
    };
}

macro_rules! impl_float_math {
    ($t:ty, $kind:ident) => {
        impl PixelMath for $t {
            const KIND: PixelKind = PixelKind::$kind;
            type AddOut = $t;
            type SubOut = $t;

            #[inline]
            fn add_promoted(self, rhs: Self) -> $t {
                self + rhs
            }

            #[inline]
            fn sub_promoted(self, rhs: Self) -> $t {
                self - rhs
            }
        }
    };
}

impl_widening_math!(u8, U8, u16, i16);
impl_widening_math!(i8, I8, i16, i16);
impl_widening_math!(u16, U16, i32, i32);
impl_widening_math!(i16, I16, i32, i32);
impl_wrapping_math!(i32, I32);
impl_wrapping_math!(i64, I64);
impl_float_math!(f32, F32);
impl_float_math!(f64, F64);

/// Writes `a + b` into `out`; all three must share a shape.
pub fn add<P: PixelMath>(
    a: ImageView<'_, P>,
    b: ImageView<'_, P>,
    out: ImageViewMut<'_, P::AddOut>,
) -> IntegralResult<()> {
    let _span = trace_span!("pixel_add", kind = %P::KIND).entered();
    zip_map(a, b, out, P::add_promoted)
}

/// Writes `a - b` into `out`; all three must share a shape.
pub fn subtract<P: PixelMath>(
    a: ImageView<'_, P>,
    b: ImageView<'_, P>,
    out: ImageViewMut<'_, P::SubOut>,
) -> IntegralResult<()> {
    let _span = trace_span!("pixel_subtract", kind = %P::KIND).entered();
    zip_map(a, b, out, P::sub_promoted)
}

fn zip_map<P: Copy, O>(
    a: ImageView<'_, P>,
    b: ImageView<'_, P>,
    mut out: ImageViewMut<'_, O>,
    op: impl Fn(P, P) -> O,
) -> IntegralResult<()> {
    check_same_shape(a.width(), a.height(), b.width(), b.height())?;
    check_same_shape(a.width(), a.height(), out.width(), out.height())?;
    for ((row_a, row_b), row_out) in a.rows().zip(b.rows()).zip(out.rows_mut()) {
        for ((&va, &vb), dst) in row_a.iter().zip(row_b).zip(row_out.iter_mut()) {
            *dst = op(va, vb);
        }
    }
    Ok(())
}
