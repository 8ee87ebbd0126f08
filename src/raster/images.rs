//! Module for reading images out of image files.

use super::*;

use image::{DynamicImage, GenericImageView, RgbaImage};

impl Image {
    /// Reads and decodes an image from the specified file path.
    ///
    /// The file can be in any image format supported by [`image::open()`], decided by the file extension given.
    /// Images with an alpha channel are loaded as [`PixelFormat::Rgba`], everything else as [`PixelFormat::Rgb`].
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)?;
        log::debug!(
            "Decoded {} ({}x{}, {:?})",
            path.display(),
            img.width(),
            img.height(),
            img.color()
        );
        Ok(Self::from_dynamic(img))
    }

    /// Converts decoded image data, keeping transparency if the source has any.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        let (width, height) = img.dimensions();
        if img.color().has_alpha() {
            Self {
                width,
                height,
                format: PixelFormat::Rgba,
                data: img.into_rgba8().into_raw(),
            }
        } else {
            Self {
                width,
                height,
                format: PixelFormat::Rgb,
                data: img.into_rgb8().into_raw(),
            }
        }
    }

    /// Converts back into an [`image`] buffer, e.g. for saving a sprite to disk.
    pub fn to_rgba_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(self.pixel(x, y).unwrap_or_default())
        })
    }
}

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};

    use super::*;

    #[test]
    fn keeps_alpha_channel() {
        let src = RgbaImage::from_fn(3, 2, |x, y| image::Rgba([x as u8, y as u8, 7, 100]));
        let img = Image::from_dynamic(DynamicImage::ImageRgba8(src));
        assert_eq!(img.format(), PixelFormat::Rgba);
        assert_eq!(img.extent(), Extent::new(3, 2));
        assert_eq!(img.pixel(2, 1), Some([2, 1, 7, 100]));
    }

    #[test]
    fn opaque_source_is_rgb() {
        let src = RgbImage::from_pixel(2, 2, Rgb([9, 8, 7]));
        let img = Image::from_dynamic(DynamicImage::ImageRgb8(src));
        assert_eq!(img.format(), PixelFormat::Rgb);
        assert_eq!(img.to_rgba_image().get_pixel(1, 1).0, [9, 8, 7, 255]);
    }

    #[test]
    fn missing_file() {
        let err = Image::open("does/not/exist.png").unwrap_err();
        assert!(matches!(err, crate::Error::Image(_)));
        assert!(!err.is_invalid_argument());
    }
}
