// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — load, downscale, circular-mask and encode logo images.
// Operates on in-memory images using the `image` and `imageproc` crates.

use std::path::Path;

use image::{DynamicImage, ImageFormat};
use medreport_core::error::ReportError;
use tracing::{debug, info, instrument};

use crate::image::mask;

/// Image processing pipeline operating on a single in-memory image.
///
/// Each transformation consumes `self` and returns a new `ImageProcessor`
/// wrapping the result, enabling method chaining.
///
/// ```ignore
/// ImageProcessor::open("Logo.png")?
///     .circular_mask()
///     .save("circular_logo.png")?;
/// ```
pub struct ImageProcessor {
    /// The current working image.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let img = image::open(path.as_ref())
            .map_err(|err| ReportError::image_read(path.as_ref(), err))?;
        info!(width = img.width(), height = img.height(), "Image loaded");
        Ok(Self { image: img })
    }

    /// Create a processor from raw encoded bytes (JPEG, PNG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, ReportError> {
        let img = image::load_from_memory(data)
            .map_err(|err| ReportError::Image(format!("failed to decode image: {}", err)))?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self { image: img })
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self { image }
    }

    // -- Accessors ------------------------------------------------------------

    /// Current image width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Current image height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Consume the processor and return the underlying `DynamicImage`.
    pub fn into_dynamic(self) -> DynamicImage {
        self.image
    }

    // -- Transformations (consume self, return new Self) -----------------------

    /// Shrink the image to fit within `max_width` x `max_height`, preserving
    /// aspect ratio. Images already inside the box are returned untouched.
    /// Uses Lanczos3 filtering for high-quality downscaling.
    #[instrument(skip(self), fields(max_width, max_height))]
    pub fn fit_within(self, max_width: u32, max_height: u32) -> Self {
        if self.image.width() <= max_width && self.image.height() <= max_height {
            return self;
        }
        info!(
            from_w = self.image.width(),
            from_h = self.image.height(),
            max_width,
            max_height,
            "Downscaling image"
        );
        let resized = self
            .image
            .resize(max_width, max_height, image::imageops::FilterType::Lanczos3);
        debug!(
            new_w = resized.width(),
            new_h = resized.height(),
            "Resize complete"
        );
        Self { image: resized }
    }

    /// Make everything outside the inscribed ellipse transparent.
    ///
    /// Any existing alpha channel is replaced, so applying this twice gives
    /// the same transparency as applying it once.
    #[instrument(skip(self))]
    pub fn circular_mask(self) -> Self {
        info!(
            width = self.image.width(),
            height = self.image.height(),
            "Applying circular mask"
        );
        Self {
            image: DynamicImage::ImageRgba8(mask::mask_image(&self.image)),
        }
    }

    // -- Output ---------------------------------------------------------------

    /// Encode the current image as PNG bytes.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>, ReportError> {
        let mut buffer = Vec::new();
        let mut cursor = std::io::Cursor::new(&mut buffer);
        self.image
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|err| ReportError::Image(format!("PNG encoding failed: {}", err)))?;
        Ok(buffer)
    }

    /// Write the image to a file, overwriting any existing file. The format is
    /// inferred from the file extension and must be able to carry alpha
    /// (PNG, TIFF, WebP) for the mask to survive.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        self.image
            .save(path.as_ref())
            .map_err(|err| ReportError::image_write(path.as_ref(), err))?;
        debug!(path = %path.as_ref().display(), "Image written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn solid(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([200, 30, 30])))
    }

    #[test]
    fn fit_within_keeps_small_images() {
        let processor = ImageProcessor::from_dynamic(solid(40, 20)).fit_within(100, 100);
        assert_eq!((processor.width(), processor.height()), (40, 20));
    }

    #[test]
    fn fit_within_preserves_aspect_ratio() {
        let processor = ImageProcessor::from_dynamic(solid(400, 200)).fit_within(100, 100);
        assert_eq!((processor.width(), processor.height()), (100, 50));
    }

    #[test]
    fn png_bytes_round_trip_keeps_alpha() {
        let bytes = ImageProcessor::from_dynamic(solid(30, 30))
            .circular_mask()
            .to_png_bytes()
            .unwrap();
        let decoded = ImageProcessor::from_bytes(&bytes).unwrap().into_dynamic();
        assert!(decoded.color().has_alpha());
        assert_eq!(decoded.to_rgba8().get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn open_missing_file_is_image_read_error() {
        let err = ImageProcessor::open("/definitely/not/here.png").err().unwrap();
        assert!(matches!(err, ReportError::ImageRead { .. }));
    }

    #[test]
    fn garbage_bytes_fail_to_decode() {
        assert!(ImageProcessor::from_bytes(b"not an image").is_err());
    }
}
