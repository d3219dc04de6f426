//! Owned contiguous image buffers.

use crate::image::{ImageView, ImageViewMut};
use crate::util::{IntegralError, IntegralResult};

/// Owned contiguous single-band image buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedImage<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T: Copy> OwnedImage<T> {
    /// Wraps a row-major buffer of exactly `width * height` elements.
    pub fn new(data: Vec<T>, width: usize, height: usize) -> IntegralResult<Self> {
        let needed = element_count(width, height)?;
        if data.len() < needed {
            return Err(IntegralError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        if data.len() > needed {
            return Err(IntegralError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Allocates an image with every pixel set to `value`.
    pub fn filled(width: usize, height: usize, value: T) -> IntegralResult<Self> {
        let needed = element_count(width, height)?;
        Ok(Self {
            data: vec![value; needed],
            width,
            height,
        })
    }

    /// Copies a possibly strided view into a contiguous buffer.
    pub fn from_view(view: ImageView<'_, T>) -> IntegralResult<Self> {
        let width = view.width();
        let height = view.height();
        let needed = element_count(width, height)?;
        let mut data = Vec::with_capacity(needed);
        for row in view.rows() {
            data.extend_from_slice(row);
        }
        Self::new(data, width, height)
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the pixel data in row-major order.
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consumes the image and returns its row-major buffer.
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x).copied()
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_, T> {
        ImageView {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }

    /// Returns a mutable view of the image.
    pub fn view_mut(&mut self) -> ImageViewMut<'_, T> {
        ImageViewMut {
            data: &mut self.data,
            width: self.width,
            height: self.height,
            stride: self.width,
        }
    }
}

impl<T: Copy + Default> OwnedImage<T> {
    /// Allocates an image filled with `T::default()`.
    pub fn zeros(width: usize, height: usize) -> IntegralResult<Self> {
        Self::filled(width, height, T::default())
    }
}

fn element_count(width: usize, height: usize) -> IntegralResult<usize> {
    if width == 0 || height == 0 {
        return Err(IntegralError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(IntegralError::InvalidDimensions { width, height })
}
