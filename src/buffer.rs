use std::path::Path;

use image::{DynamicImage, RgbaImage};

use crate::error::AnalysisError;

/// An immutable, decoded RGBA8 image.
///
/// This is the only pixel input the engine accepts. Decoding, canvas reads and
/// any other way of obtaining pixels belong to the caller; once a
/// `PixelBuffer` exists its bytes are guaranteed to be `width * height * 4`
/// long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    image: RgbaImage,
}

impl PixelBuffer {
    /// Wraps a flat RGBA byte sequence.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::SourceUnreadable`] if `data.len()` is not
    /// `width * height * 4`.
    ///
    /// # Examples
    ///
    /// ```
    /// use diff_spotter::PixelBuffer;
    ///
    /// let buffer = PixelBuffer::from_raw(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255]).unwrap();
    /// assert_eq!(buffer.dimensions(), (2, 1));
    ///
    /// assert!(PixelBuffer::from_raw(2, 2, vec![0; 3]).is_err());
    /// ```
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, AnalysisError> {
        let expected = width as usize * height as usize * 4;
        let actual = data.len();
        // `RgbaImage::from_raw` tolerates oversized containers, we don't.
        if actual != expected {
            return Err(AnalysisError::SourceUnreadable {
                reason: format!(
                    "expected {expected} bytes for a {width}x{height} RGBA buffer, got {actual}"
                ),
            });
        }
        RgbaImage::from_raw(width, height, data)
            .map(|image| Self { image })
            .ok_or_else(|| AnalysisError::SourceUnreadable {
                reason: format!("{width}x{height} RGBA buffer could not be wrapped"),
            })
    }

    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Converts any decoded image to RGBA8.
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        Self {
            image: image.to_rgba8(),
        }
    }

    /// Decodes an image file from disk.
    ///
    /// # Errors
    ///
    /// IO and decode failures are reported as [`AnalysisError::SourceUnreadable`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AnalysisError> {
        let image = image::open(path.as_ref()).map_err(|err| AnalysisError::SourceUnreadable {
            reason: format!("{}: {err}", path.as_ref().display()),
        })?;
        Ok(Self::from_dynamic(&image))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// The flat RGBA bytes in row-major order.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Fails with [`AnalysisError::ZeroDimension`] if either side is zero.
    pub(crate) fn ensure_non_empty(&self) -> Result<(), AnalysisError> {
        let (width, height) = self.dimensions();
        if width == 0 || height == 0 {
            return Err(AnalysisError::ZeroDimension { width, height });
        }
        Ok(())
    }
}

impl From<RgbaImage> for PixelBuffer {
    fn from(image: RgbaImage) -> Self {
        Self::from_image(image)
    }
}
