//! Error types for integral-ops.

use crate::pixel::PixelKind;
use thiserror::Error;

/// Result alias for integral-ops operations.
pub type IntegralResult<T> = std::result::Result<T, IntegralError>;

/// Errors that can occur when building or querying integral images.
///
/// Every error is reported before the first write to an output buffer.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IntegralError {
    /// Input and output buffers do not have the same dimensions.
    #[error("shape mismatch: {width}x{height} vs {other_width}x{other_height}")]
    ShapeMismatch {
        width: usize,
        height: usize,
        other_width: usize,
        other_height: usize,
    },
    /// The kernel is empty or its rectangle and scale lists disagree.
    #[error("invalid kernel: {0}")]
    InvalidKernel(&'static str),
    /// No accumulator mapping exists for the element kind.
    #[error("unsupported pixel type: {kind}")]
    UnsupportedType { kind: PixelKind },
    /// A buffer has a different element kind than the operation requires.
    #[error("pixel type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: PixelKind, got: PixelKind },
    /// Width or height is zero or overflows the address space.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing slice is shorter than the view requires.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A region of interest does not fit inside its parent image.
    #[error("roi {x},{y} {width}x{height} outside {img_width}x{img_height} image")]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// Image decoding failed.
    #[error("image io: {reason}")]
    ImageIo { reason: String },
}

pub(crate) fn check_same_shape(
    width: usize,
    height: usize,
    other_width: usize,
    other_height: usize,
) -> IntegralResult<()> {
    if width != other_width || height != other_height {
        return Err(IntegralError::ShapeMismatch {
            width,
            height,
            other_width,
            other_height,
        });
    }
    Ok(())
}
