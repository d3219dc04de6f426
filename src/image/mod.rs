//! Strided image views and owned buffers.
//!
//! `ImageView` is a borrowed read-only 2D view into a 1D buffer with an explicit
//! stride; `ImageViewMut` is its exclusive counterpart for output buffers. The
//! stride counts elements between the starts of consecutive rows, so a stride
//! larger than the width represents padded rows. ROI slices are zero-copy views
//! into the same backing slice and keep the parent stride.

use crate::util::{IntegralError, IntegralResult};

#[cfg(feature = "image-io")]
pub mod io;
mod owned;

pub use owned::OwnedImage;

/// Read-only 2D window over a slice; rows start `stride` elements apart.
#[derive(Copy, Clone, Debug)]
pub struct ImageView<'a, T> {
    data: &'a [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageView<'a, T> {
    /// Creates a contiguous view with `stride == width`.
    pub fn from_slice(data: &'a [T], width: usize, height: usize) -> IntegralResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a view with an explicit stride.
    pub fn new(data: &'a [T], width: usize, height: usize, stride: usize) -> IntegralResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(IntegralError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Elements between consecutive row starts; at least `width`.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [T] {
        self.data
    }

    /// Returns the element at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    /// Iterates over the rows, each trimmed to `width` elements.
    pub fn rows(&self) -> impl Iterator<Item = &'a [T]> + 'a {
        let width = self.width;
        self.data
            .chunks(self.stride)
            .take(self.height)
            .map(move |row| &row[..width])
    }

    /// Returns a zero-copy ROI view into the same backing buffer.
    pub fn roi(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> IntegralResult<ImageView<'a, T>> {
        let start = roi_start(self.width, self.height, self.stride, x, y, width, height)?;
        let data = self
            .data
            .get(start..)
            .ok_or(IntegralError::BufferTooSmall {
                needed: start.saturating_add(1),
                got: self.data.len(),
            })?;

        ImageView::new(data, width, height, self.stride)
    }
}

/// Exclusively borrowed 2D image view with an explicit stride.
#[derive(Debug)]
pub struct ImageViewMut<'a, T> {
    data: &'a mut [T],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a, T> ImageViewMut<'a, T> {
    /// Creates a contiguous mutable view with `stride == width`.
    pub fn from_slice(data: &'a mut [T], width: usize, height: usize) -> IntegralResult<Self> {
        Self::new(data, width, height, width)
    }

    /// Creates a mutable view with an explicit stride.
    pub fn new(
        data: &'a mut [T],
        width: usize,
        height: usize,
        stride: usize,
    ) -> IntegralResult<Self> {
        let needed = required_len(width, height, stride)?;
        if data.len() < needed {
            return Err(IntegralError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Columns written per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Rows in the view.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Elements between row starts; padding past `width` is never written.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Shared access to the element at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y.checked_mul(self.stride)?.checked_add(x)?;
        self.data.get(idx)
    }

    /// Returns row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&[T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get(start..end)
    }

    /// Returns row `y` mutably with length `width`.
    pub fn row_mut(&mut self, y: usize) -> Option<&mut [T]> {
        if y >= self.height {
            return None;
        }
        let start = y.checked_mul(self.stride)?;
        let end = start.checked_add(self.width)?;
        self.data.get_mut(start..end)
    }

    /// Iterates mutably over the rows, each trimmed to `width` elements.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [T]> + '_ {
        let width = self.width;
        self.data
            .chunks_mut(self.stride)
            .take(self.height)
            .map(move |row| &mut row[..width])
    }

    /// Returns a read-only view of the same pixels.
    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            data: &self.data[..],
            width: self.width,
            height: self.height,
            stride: self.stride,
        }
    }

    /// Returns a mutable ROI view borrowing from this one.
    pub fn roi_mut(
        &mut self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> IntegralResult<ImageViewMut<'_, T>> {
        let start = roi_start(self.width, self.height, self.stride, x, y, width, height)?;
        let got = self.data.len();
        let stride = self.stride;
        let data = self
            .data
            .get_mut(start..)
            .ok_or(IntegralError::BufferTooSmall {
                needed: start.saturating_add(1),
                got,
            })?;

        ImageViewMut::new(data, width, height, stride)
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data[..]
    }
}

fn required_len(width: usize, height: usize, stride: usize) -> IntegralResult<usize> {
    if width == 0 || height == 0 {
        return Err(IntegralError::InvalidDimensions { width, height });
    }
    if stride < width {
        return Err(IntegralError::InvalidStride { width, stride });
    }
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(width))
        .ok_or(IntegralError::InvalidDimensions { width, height })?;
    Ok(needed)
}

fn roi_start(
    img_width: usize,
    img_height: usize,
    stride: usize,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) -> IntegralResult<usize> {
    if width == 0 || height == 0 {
        return Err(IntegralError::InvalidDimensions { width, height });
    }

    let out_of_bounds = IntegralError::RoiOutOfBounds {
        x,
        y,
        width,
        height,
        img_width,
        img_height,
    };
    let end_x = x.checked_add(width).ok_or(out_of_bounds.clone())?;
    let end_y = y.checked_add(height).ok_or(out_of_bounds.clone())?;
    if end_x > img_width || end_y > img_height {
        return Err(out_of_bounds);
    }

    y.checked_mul(stride)
        .and_then(|v| v.checked_add(x))
        .ok_or(IntegralError::InvalidDimensions {
            width: img_width,
            height: img_height,
        })
}
