//! Helpers for loading images via the `image` crate.
//!
//! Available when the `image-io` feature is enabled. Images are loaded as a
//! single luminance band in the narrowest kind that preserves their samples.

use crate::dispatch::DynImage;
use crate::image::{ImageView, OwnedImage};
use crate::util::{IntegralError, IntegralResult};
use std::path::Path;

/// Creates a borrowed view from an 8-bit grayscale image buffer.
pub fn view_from_gray_image(img: &image::GrayImage) -> IntegralResult<ImageView<'_, u8>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    ImageView::from_slice(img.as_raw(), width, height)
}

/// Converts a decoded image into a single-band owned image.
///
/// 8-bit gray stays `u8`, 16-bit gray stays `u16`, floating-point images become
/// `f32` luminance, and everything else is converted to 8-bit gray.
pub fn dyn_from_dynamic_image(img: &image::DynamicImage) -> IntegralResult<DynImage> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let out = match img {
        image::DynamicImage::ImageLuma16(gray) => {
            DynImage::U16(OwnedImage::new(gray.as_raw().clone(), width, height)?)
        }
        image::DynamicImage::ImageRgb32F(_) | image::DynamicImage::ImageRgba32F(_) => {
            let luma = img.to_luma32f();
            DynImage::F32(OwnedImage::new(luma.into_raw(), width, height)?)
        }
        _ => {
            let gray = img.to_luma8();
            DynImage::U8(OwnedImage::new(gray.into_raw(), width, height)?)
        }
    };
    Ok(out)
}

/// Loads an image from disk as a single-band owned image.
pub fn load_dyn_image<P: AsRef<Path>>(path: P) -> IntegralResult<DynImage> {
    let img = image::open(path).map_err(|err| IntegralError::ImageIo {
        reason: err.to_string(),
    })?;
    dyn_from_dynamic_image(&img)
}
