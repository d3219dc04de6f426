//! integral-ops computes integral images (summed-area tables) and evaluates
//! rectangular block kernels on them in constant time per pixel.
//!
//! The core is generic over the source element type: [`Pixel`] fixes the
//! accumulator each integral image is stored in, [`integral::transform`] builds
//! the table, [`integral::block_zero`] and [`integral::block_unsafe`] sum
//! rectangles, and the [`convolve`](mod@convolve) module applies an
//! [`IntegralKernel`] to a whole image or a single point. The [`dispatch`]
//! module routes type-erased buffers to the right instantiation at runtime.
//! Row-parallel variants are available with the `rayon` feature.

pub mod convolve;
pub mod dispatch;
pub mod image;
pub mod integral;
pub mod kernel;
pub mod pixel;
pub mod pixel_math;
mod trace;
pub mod util;

#[cfg(feature = "image-io")]
pub use crate::image::io;

pub use crate::image::{ImageView, ImageViewMut, OwnedImage};
pub use convolve::{convolve, convolve_border, convolve_sparse};
pub use dispatch::{BlockSum, DynImage, DynImageView, DynImageViewMut};
pub use integral::{block_unsafe, block_zero, integral_image, transform};
pub use kernel::{IntegralKernel, KernelBorder, Rect};
pub use pixel::{Accumulator, Pixel, PixelKind};
pub use util::{IntegralError, IntegralResult};

#[cfg(feature = "rayon")]
pub use convolve::rayon::{convolve_border_par, convolve_par, transform_par};
