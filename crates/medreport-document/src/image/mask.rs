// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Circular alpha mask for hospital logos.
//
// The mask is drawn at 3x the logo size and downsampled with Lanczos3, which
// anti-aliases the circle edge without any explicit edge treatment.

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma, RgbaImage};
use imageproc::drawing::draw_filled_ellipse_mut;
use medreport_core::MaskedImage;
use medreport_core::error::ReportError;
use tracing::{debug, info, instrument};

use crate::image::processor::ImageProcessor;

/// Supersampling factor of the mask canvas.
pub const SUPERSAMPLE: u32 = 3;

/// Build the anti-aliased alpha mask for a `width` x `height` image: 255
/// inside the inscribed ellipse, 0 outside, with a soft edge.
pub fn circular_alpha_mask(width: u32, height: u32) -> GrayImage {
    let big_w = width * SUPERSAMPLE;
    let big_h = height * SUPERSAMPLE;

    let mut canvas = GrayImage::from_pixel(big_w, big_h, Luma([0u8]));
    let center = ((big_w / 2) as i32, (big_h / 2) as i32);
    draw_filled_ellipse_mut(
        &mut canvas,
        center,
        (big_w / 2) as i32,
        (big_h / 2) as i32,
        Luma([255u8]),
    );

    imageops::resize(&canvas, width, height, FilterType::Lanczos3)
}

/// Apply the circular mask to a decoded image, replacing its alpha channel.
pub fn mask_image(image: &DynamicImage) -> RgbaImage {
    let mut rgba = image.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return rgba;
    }

    let mask = circular_alpha_mask(rgba.width(), rgba.height());
    for (pixel, alpha) in rgba.pixels_mut().zip(mask.pixels()) {
        pixel[3] = alpha[0];
    }
    rgba
}

/// Mask the image at `input_path` and write the result to `output_path`.
///
/// The output format follows the output extension; use `.png` to keep the
/// transparency. An existing output file is overwritten.
#[instrument(skip_all, fields(input = %input_path.as_ref().display(), output = %output_path.as_ref().display()))]
pub fn mask_file(
    input_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<MaskedImage, ReportError> {
    let masked = ImageProcessor::open(input_path.as_ref())?.circular_mask();
    masked.save(output_path.as_ref())?;

    info!(
        width = masked.width(),
        height = masked.height(),
        "Circular logo written"
    );

    Ok(MaskedImage {
        input_path: input_path.as_ref().to_path_buf(),
        output_path: output_path.as_ref().to_path_buf(),
        width: masked.width(),
        height: masked.height(),
    })
}

/// Mask encoded image bytes and return the result as PNG bytes.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn mask_bytes(data: &[u8]) -> Result<Vec<u8>, ReportError> {
    let png = ImageProcessor::from_bytes(data)?
        .circular_mask()
        .to_png_bytes()?;
    debug!(png_len = png.len(), "Circular logo encoded");
    Ok(png)
}
