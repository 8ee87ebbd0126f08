//! Module for in-memory [`Image`]s, i.e. rectangular buffers of pixels with a [`PixelFormat`].
#[cfg(feature = "images")]
mod images;

use crate::{
    error::{ArgumentError, Axis, Result},
    units::{index, Extent, Offset},
};

/// A pixel as red, green, blue and alpha components.
pub type Rgba = [u8; 4];

/// Memory layout of a single pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Three bytes per pixel. Every pixel is opaque.
    Rgb,
    /// Four bytes per pixel, with per-pixel transparency.
    Rgba,
}

impl PixelFormat {
    /// Picks the format with or without an alpha channel.
    pub const fn with_alpha(alpha: bool) -> Self {
        if alpha {
            PixelFormat::Rgba
        } else {
            PixelFormat::Rgb
        }
    }

    /// Number of bytes used by one pixel.
    pub const fn channels(self) -> usize {
        match self {
            PixelFormat::Rgb => 3,
            PixelFormat::Rgba => 4,
        }
    }
}

/// An owned image. Pixels are stored row-major with no padding between rows.
///
/// The point (0, 0) is the top left pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

/// Checks that `start + span <= available` along one axis.
pub(crate) fn check_span(
    axis: Axis,
    start: u32,
    span: u64,
    available: u32,
) -> std::result::Result<(), ArgumentError> {
    // u32 + u32 * u32 always fits into a u64
    let required = start as u64 + span;
    if required > available as u64 {
        Err(ArgumentError::OutOfBounds {
            axis,
            required,
            available,
        })
    } else {
        Ok(())
    }
}

impl Image {
    /// Create a new image of the given size. Every byte is zero, so RGBA images
    /// start out fully transparent and RGB images start out black.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            format,
            data: vec![0; Extent::new(width, height).area() * format.channels()],
        }
    }

    /// Wraps an existing pixel buffer.
    ///
    /// Fails if `data` doesn't hold exactly `width * height` pixels of the given format.
    pub fn from_raw(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        let expected = Extent::new(width, height).area() * format.channels();
        if data.len() != expected {
            return Err(ArgumentError::BufferSize {
                expected,
                actual: data.len(),
            }
            .into());
        }
        Ok(Self {
            width,
            height,
            format,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn extent(&self) -> Extent {
        Extent::new(self.width, self.height)
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// The raw pixel bytes, in row-major order.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    fn byte_index(&self, x: u32, y: u32) -> usize {
        index(x, y, self.width) * self.format.channels()
    }

    /// Returns the pixel at (x, y), or `None` if the position is out of bounds.
    /// RGB pixels are reported as opaque.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x < self.width && y < self.height {
            let i = self.byte_index(x, y);
            let px = &self.data[i..i + self.format.channels()];
            Some(match self.format {
                PixelFormat::Rgb => [px[0], px[1], px[2], u8::MAX],
                PixelFormat::Rgba => [px[0], px[1], px[2], px[3]],
            })
        } else {
            None
        }
    }

    /// Overwrites the pixel at (x, y). The alpha component is dropped for RGB images.
    /// Returns `true` if a pixel was written, and `false` if the position was out of bounds.
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: Rgba) -> bool {
        if x < self.width && y < self.height {
            let i = self.byte_index(x, y);
            let channels = self.format.channels();
            self.data[i..i + channels].copy_from_slice(&rgba[..channels]);
            true
        } else {
            false
        }
    }

    /// Iterates over every pixel as `(x, y, rgba)`, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Rgba)> + '_ {
        let width = self.width;
        (0..self.height).flat_map(move |y| {
            (0..width).filter_map(move |x| self.pixel(x, y).map(|px| (x, y, px)))
        })
    }

    /// The bytes of a single row.
    fn row(&self, y: u32) -> &[u8] {
        let start = self.byte_index(0, y);
        &self.data[start..start + self.width as usize * self.format.channels()]
    }

    /// Copies a rectangular region into a newly allocated image with the given format.
    ///
    /// When the formats differ, RGB sources become opaque RGBA pixels and RGBA sources lose their alpha.
    /// Fails without allocating if the region doesn't lie entirely inside this image.
    pub fn copy_region(&self, origin: Offset, extent: Extent, format: PixelFormat) -> Result<Self> {
        check_span(Axis::X, origin.x, extent.width as u64, self.width)?;
        check_span(Axis::Y, origin.y, extent.height as u64, self.height)?;

        let mut out = Self::new(extent.width, extent.height, format);
        if format == self.format {
            let channels = format.channels();
            let start = origin.x as usize * channels;
            let len = extent.width as usize * channels;
            for y in 0..extent.height {
                let src = &self.row(origin.y + y)[start..start + len];
                let dst = out.byte_index(0, y);
                out.data[dst..dst + len].copy_from_slice(src);
            }
        } else {
            for y in 0..extent.height {
                for x in 0..extent.width {
                    if let Some(px) = self.pixel(origin.x + x, origin.y + y) {
                        out.put_pixel(x, y, px);
                    }
                }
            }
        }
        Ok(out)
    }
}
