//! Element kinds and the source-to-accumulator type mapping.
//!
//! Every supported source element type implements [`Pixel`], whose associated
//! `Sum` type is the accumulator its integral image is stored in. The mapping is
//! fixed at compile time:
//!
//! | source | accumulator |
//! |---|---|
//! | `u8`, `i8`, `u16`, `i16` | `i32` |
//! | `i32` | `i64` |
//! | `f32`, `f64` | `f64` |
//!
//! Integer accumulators add and subtract with two's-complement wrapping. Table
//! entries of very large images may wrap, but inclusion-exclusion recovers every
//! region sum whose true value fits in the accumulator.

use std::fmt;

/// Runtime tag for the element type of a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelKind {
    U8,
    I8,
    U16,
    I16,
    I32,
    I64,
    F32,
    F64,
}

impl PixelKind {
    /// Every kind, in order of increasing width within each family.
    pub const ALL: [PixelKind; 8] = [
        PixelKind::U8,
        PixelKind::I8,
        PixelKind::U16,
        PixelKind::I16,
        PixelKind::I32,
        PixelKind::I64,
        PixelKind::F32,
        PixelKind::F64,
    ];

    /// Returns the accumulator kind used for integral images of this kind.
    pub fn accumulator(self) -> Option<PixelKind> {
        match self {
            PixelKind::U8 | PixelKind::I8 | PixelKind::U16 | PixelKind::I16 => {
                Some(PixelKind::I32)
            }
            PixelKind::I32 => Some(PixelKind::I64),
            PixelKind::F32 | PixelKind::F64 => Some(PixelKind::F64),
            PixelKind::I64 => None,
        }
    }

    /// Returns true if integral images can be stored in this kind.
    pub fn is_accumulator(self) -> bool {
        matches!(self, PixelKind::I32 | PixelKind::I64 | PixelKind::F64)
    }

    /// Output kind of element-wise addition of two images of this kind.
    pub fn add_output(self) -> PixelKind {
        match self {
            PixelKind::U8 => PixelKind::U16,
            PixelKind::I8 => PixelKind::I16,
            PixelKind::U16 | PixelKind::I16 | PixelKind::I32 => PixelKind::I32,
            other => other,
        }
    }

    /// Output kind of element-wise subtraction of two images of this kind.
    pub fn sub_output(self) -> PixelKind {
        match self {
            PixelKind::U8 | PixelKind::I8 => PixelKind::I16,
            PixelKind::U16 | PixelKind::I16 | PixelKind::I32 => PixelKind::I32,
            other => other,
        }
    }

    /// Size of one element in bytes.
    pub fn size_bytes(self) -> usize {
        match self {
            PixelKind::U8 | PixelKind::I8 => 1,
            PixelKind::U16 | PixelKind::I16 => 2,
            PixelKind::I32 | PixelKind::F32 => 4,
            PixelKind::I64 | PixelKind::F64 => 8,
        }
    }

    /// Lowercase Rust name of the element type.
    pub fn name(self) -> &'static str {
        match self {
            PixelKind::U8 => "u8",
            PixelKind::I8 => "i8",
            PixelKind::U16 => "u16",
            PixelKind::I16 => "i16",
            PixelKind::I32 => "i32",
            PixelKind::I64 => "i64",
            PixelKind::F32 => "f32",
            PixelKind::F64 => "f64",
        }
    }
}

impl fmt::Display for PixelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric type that integral images are stored and summed in.
pub trait Accumulator: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Runtime tag of this type.
    const KIND: PixelKind;

    /// Additive identity.
    fn zero() -> Self {
        Self::default()
    }

    /// `self + rhs`, wrapping for integers.
    fn plus(self, rhs: Self) -> Self;

    /// `self - rhs`, wrapping for integers.
    fn minus(self, rhs: Self) -> Self;

    /// `self * scale`, wrapping for integers.
    fn scaled(self, scale: i32) -> Self;

    /// Lossy conversion used for reporting.
    fn to_f64(self) -> f64;
}

macro_rules! impl_int_accumulator {
    ($t:ty, $kind:ident) => {
        impl Accumulator for $t {
            const KIND: PixelKind = PixelKind::$kind;

            #[inline]
            fn plus(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }

            #[inline]
            fn minus(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }

            #[inline]
            fn scaled(self, scale: i32) -> Self {
                self.wrapping_mul(scale as $t)
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_int_accumulator!(i32, I32);
impl_int_accumulator!(i64, I64);

impl Accumulator for f64 {
    const KIND: PixelKind = PixelKind::F64;

    #[inline]
    fn plus(self, rhs: Self) -> Self {
        self + rhs
    }

    #[inline]
    fn minus(self, rhs: Self) -> Self {
        self - rhs
    }

    #[inline]
    fn scaled(self, scale: i32) -> Self {
        self * f64::from(scale)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}

/// Source element type with a fixed accumulator for its integral image.
pub trait Pixel: Copy + Send + Sync + 'static {
    /// Accumulator the integral image of this type is stored in.
    type Sum: Accumulator;

    /// Runtime tag of this type.
    const KIND: PixelKind;

    /// Converts the value into the accumulator without loss.
    fn widen(self) -> Self::Sum;
}

macro_rules! impl_pixel {
    ($t:ty, $kind:ident, $sum:ty) => {
        impl Pixel for $t {
            type Sum = $sum;
            const KIND: PixelKind = PixelKind::$kind;

            #[inline]
            fn widen(self) -> $sum {
                <$sum>::from(self)
            }
        }
    };
}

impl_pixel!(u8, U8, i32);
impl_pixel!(i8, I8, i32);
impl_pixel!(u16, U16, i32);
impl_pixel!(i16, I16, i32);
impl_pixel!(i32, I32, i64);
impl_pixel!(f32, F32, f64);
impl_pixel!(f64, F64, f64);
