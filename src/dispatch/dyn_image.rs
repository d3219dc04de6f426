//! Tagged image and scalar variants over the supported element kinds.

use crate::image::{ImageView, ImageViewMut, OwnedImage};
use crate::pixel::PixelKind;
use crate::util::IntegralResult;

/// Applies `$body` to the payload of whichever variant `$value` holds.
macro_rules! each_variant {
    ($value:expr, $enum:ident, $bind:ident => $body:expr) => {
        match $value {
            $enum::U8($bind) => $body,
            $enum::I8($bind) => $body,
            $enum::U16($bind) => $body,
            $enum::I16($bind) => $body,
            $enum::I32($bind) => $body,
            $enum::I64($bind) => $body,
            $enum::F32($bind) => $body,
            $enum::F64($bind) => $body,
        }
    };
}

/// Widening to `f64` for reporting; exact for every kind except large `i64`.
trait AsF64: Copy {
    fn as_f64(self) -> f64;
}

macro_rules! impl_as_f64 {
    ($($t:ty),+) => {
        $(
            impl AsF64 for $t {
                #[inline]
                fn as_f64(self) -> f64 {
                    f64::from(self)
                }
            }
        )+
    };
}

impl_as_f64!(u8, i8, u16, i16, i32, f32, f64);

impl AsF64 for i64 {
    #[inline]
    fn as_f64(self) -> f64 {
        self as f64
    }
}

/// Read-only view whose element type is known only at runtime.
#[derive(Clone, Copy, Debug)]
pub enum DynImageView<'a> {
    U8(ImageView<'a, u8>),
    I8(ImageView<'a, i8>),
    U16(ImageView<'a, u16>),
    I16(ImageView<'a, i16>),
    I32(ImageView<'a, i32>),
    I64(ImageView<'a, i64>),
    F32(ImageView<'a, f32>),
    F64(ImageView<'a, f64>),
}

impl DynImageView<'_> {
    /// Element kind of the view.
    pub fn kind(&self) -> PixelKind {
        match self {
            DynImageView::U8(_) => PixelKind::U8,
            DynImageView::I8(_) => PixelKind::I8,
            DynImageView::U16(_) => PixelKind::U16,
            DynImageView::I16(_) => PixelKind::I16,
            DynImageView::I32(_) => PixelKind::I32,
            DynImageView::I64(_) => PixelKind::I64,
            DynImageView::F32(_) => PixelKind::F32,
            DynImageView::F64(_) => PixelKind::F64,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        each_variant!(self, DynImageView, view => view.width())
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        each_variant!(self, DynImageView, view => view.height())
    }

    /// Pixel at `(x, y)` converted to `f64`, if in bounds.
    pub fn get_f64(&self, x: usize, y: usize) -> Option<f64> {
        each_variant!(self, DynImageView, view => view.get(x, y).map(|&v| v.as_f64()))
    }
}

/// Mutable view whose element type is known only at runtime.
#[derive(Debug)]
pub enum DynImageViewMut<'a> {
    U8(ImageViewMut<'a, u8>),
    I8(ImageViewMut<'a, i8>),
    U16(ImageViewMut<'a, u16>),
    I16(ImageViewMut<'a, i16>),
    I32(ImageViewMut<'a, i32>),
    I64(ImageViewMut<'a, i64>),
    F32(ImageViewMut<'a, f32>),
    F64(ImageViewMut<'a, f64>),
}

impl DynImageViewMut<'_> {
    /// Element kind of the view.
    pub fn kind(&self) -> PixelKind {
        match self {
            DynImageViewMut::U8(_) => PixelKind::U8,
            DynImageViewMut::I8(_) => PixelKind::I8,
            DynImageViewMut::U16(_) => PixelKind::U16,
            DynImageViewMut::I16(_) => PixelKind::I16,
            DynImageViewMut::I32(_) => PixelKind::I32,
            DynImageViewMut::I64(_) => PixelKind::I64,
            DynImageViewMut::F32(_) => PixelKind::F32,
            DynImageViewMut::F64(_) => PixelKind::F64,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        each_variant!(self, DynImageViewMut, view => view.width())
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        each_variant!(self, DynImageViewMut, view => view.height())
    }
}

/// Owned contiguous image whose element type is known only at runtime.
#[derive(Clone, Debug, PartialEq)]
pub enum DynImage {
    U8(OwnedImage<u8>),
    I8(OwnedImage<i8>),
    U16(OwnedImage<u16>),
    I16(OwnedImage<i16>),
    I32(OwnedImage<i32>),
    I64(OwnedImage<i64>),
    F32(OwnedImage<f32>),
    F64(OwnedImage<f64>),
}

impl DynImage {
    /// Allocates a zero-filled image of the given kind.
    pub fn zeros(kind: PixelKind, width: usize, height: usize) -> IntegralResult<Self> {
        Ok(match kind {
            PixelKind::U8 => DynImage::U8(OwnedImage::zeros(width, height)?),
            PixelKind::I8 => DynImage::I8(OwnedImage::zeros(width, height)?),
            PixelKind::U16 => DynImage::U16(OwnedImage::zeros(width, height)?),
            PixelKind::I16 => DynImage::I16(OwnedImage::zeros(width, height)?),
            PixelKind::I32 => DynImage::I32(OwnedImage::zeros(width, height)?),
            PixelKind::I64 => DynImage::I64(OwnedImage::zeros(width, height)?),
            PixelKind::F32 => DynImage::F32(OwnedImage::zeros(width, height)?),
            PixelKind::F64 => DynImage::F64(OwnedImage::zeros(width, height)?),
        })
    }

    /// Element kind of the image.
    pub fn kind(&self) -> PixelKind {
        self.view().kind()
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        each_variant!(self, DynImage, img => img.width())
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        each_variant!(self, DynImage, img => img.height())
    }

    /// Pixel at `(x, y)` converted to `f64`, if in bounds.
    pub fn get_f64(&self, x: usize, y: usize) -> Option<f64> {
        self.view().get_f64(x, y)
    }

    /// Borrowed view of the image.
    pub fn view(&self) -> DynImageView<'_> {
        match self {
            DynImage::U8(img) => DynImageView::U8(img.view()),
            DynImage::I8(img) => DynImageView::I8(img.view()),
            DynImage::U16(img) => DynImageView::U16(img.view()),
            DynImage::I16(img) => DynImageView::I16(img.view()),
            DynImage::I32(img) => DynImageView::I32(img.view()),
            DynImage::I64(img) => DynImageView::I64(img.view()),
            DynImage::F32(img) => DynImageView::F32(img.view()),
            DynImage::F64(img) => DynImageView::F64(img.view()),
        }
    }

    /// Mutable view of the image.
    pub fn view_mut(&mut self) -> DynImageViewMut<'_> {
        match self {
            DynImage::U8(img) => DynImageViewMut::U8(img.view_mut()),
            DynImage::I8(img) => DynImageViewMut::I8(img.view_mut()),
            DynImage::U16(img) => DynImageViewMut::U16(img.view_mut()),
            DynImage::I16(img) => DynImageViewMut::I16(img.view_mut()),
            DynImage::I32(img) => DynImageViewMut::I32(img.view_mut()),
            DynImage::I64(img) => DynImageViewMut::I64(img.view_mut()),
            DynImage::F32(img) => DynImageViewMut::F32(img.view_mut()),
            DynImage::F64(img) => DynImageViewMut::F64(img.view_mut()),
        }
    }
}

macro_rules! impl_from_typed {
    ($($t:ty => $variant:ident),+ $(,)?) => {
        $(
            impl<'a> From<ImageView<'a, $t>> for DynImageView<'a> {
                fn from(view: ImageView<'a, $t>) -> Self {
                    DynImageView::$variant(view)
                }
            }

            impl<'a> From<ImageViewMut<'a, $t>> for DynImageViewMut<'a> {
                fn from(view: ImageViewMut<'a, $t>) -> Self {
                    DynImageViewMut::$variant(view)
                }
            }

            impl From<OwnedImage<$t>> for DynImage {
                fn from(img: OwnedImage<$t>) -> Self {
                    DynImage::$variant(img)
                }
            }
        )+
    };
}

impl_from_typed!(
    u8 => U8,
    i8 => I8,
    u16 => U16,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
);

/// Region sum or kernel response in the table's accumulator type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BlockSum {
    I32(i32),
    I64(i64),
    F64(f64),
}

impl BlockSum {
    /// Accumulator kind the value was computed in.
    pub fn kind(&self) -> PixelKind {
        match self {
            BlockSum::I32(_) => PixelKind::I32,
            BlockSum::I64(_) => PixelKind::I64,
            BlockSum::F64(_) => PixelKind::F64,
        }
    }

    /// Value converted to `f64`.
    pub fn to_f64(self) -> f64 {
        match self {
            BlockSum::I32(v) => f64::from(v),
            BlockSum::I64(v) => v as f64,
            BlockSum::F64(v) => v,
        }
    }
}

impl From<i32> for BlockSum {
    fn from(value: i32) -> Self {
        BlockSum::I32(value)
    }
}

impl From<i64> for BlockSum {
    fn from(value: i64) -> Self {
        BlockSum::I64(value)
    }
}

impl From<f64> for BlockSum {
    fn from(value: f64) -> Self {
        BlockSum::F64(value)
    }
}
