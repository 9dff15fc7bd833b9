// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Report pipeline — mask the request's logo, then compose the report.
//
// The masked logo is handed to the composer in memory. It only touches the
// filesystem when `ReportConfig::masked_logo_path` asks for a copy.

use std::path::Path;

use chrono::{DateTime, Local};
use image::DynamicImage;
use medreport_core::config::ReportConfig;
use medreport_core::error::Result;
use medreport_core::types::ReportRequest;
use tracing::{info, instrument, warn};

use crate::image::processor::ImageProcessor;
use crate::pdf::composer::{ReportComposer, ReportDocument};

/// Runs the masker and the composer in sequence.
pub struct ReportPipeline {
    composer: ReportComposer,
}

impl ReportPipeline {
    pub fn new(config: ReportConfig) -> Result<Self> {
        Ok(Self {
            composer: ReportComposer::new(config)?,
        })
    }

    /// Stamp reports with `timestamp` instead of the current time.
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.composer = self.composer.with_timestamp(timestamp);
        self
    }

    pub fn composer(&self) -> &ReportComposer {
        &self.composer
    }

    /// Mask `request.logo_path` (if any), render, and write the report to
    /// `output_path`.
    #[instrument(skip_all, fields(output = %output_path.as_ref().display()))]
    pub fn run(
        &self,
        request: &ReportRequest,
        output_path: impl AsRef<Path>,
    ) -> Result<ReportDocument> {
        let logo = self.masked_logo(request.logo_path.as_deref())?;
        let document = self.composer.render(request, logo.as_ref())?;
        document.save(output_path.as_ref())?;
        info!(
            bytes = document.len(),
            with_logo = logo.is_some(),
            "Report generated"
        );
        Ok(document)
    }

    /// Render to bytes without writing the report.
    pub fn render(&self, request: &ReportRequest) -> Result<ReportDocument> {
        let logo = self.masked_logo(request.logo_path.as_deref())?;
        self.composer.render(request, logo.as_ref())
    }

    /// Load and mask the logo. A missing file means no logo.
    fn masked_logo(&self, logo_path: Option<&Path>) -> Result<Option<DynamicImage>> {
        let Some(path) = logo_path else {
            return Ok(None);
        };
        if !path.exists() {
            warn!(path = %path.display(), "Logo not found, omitting logo block");
            return Ok(None);
        }

        let masked = ImageProcessor::open(path)?.circular_mask();
        if let Some(keep) = &self.composer.config().masked_logo_path {
            masked.save(keep)?;
            info!(path = %keep.display(), "Masked logo kept");
        }
        Ok(Some(masked.into_dynamic()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use medreport_core::ReportError;

    fn request(logo: Option<&Path>) -> ReportRequest {
        ReportRequest {
            doctor_name: "Dr. John Doe".into(),
            hospital_name: "City Hospital".into(),
            logo_path: logo.map(Path::to_path_buf),
            ..ReportRequest::default()
        }
    }

    fn write_logo(path: &Path) {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(64, 64, Rgb([0, 120, 200])))
            .save(path)
            .unwrap();
    }

    #[test]
    fn keeps_masked_logo_when_asked() {
        let dir = tempfile::tempdir().unwrap();
        let logo = dir.path().join("Logo.png");
        let kept = dir.path().join("circular_logo.png");
        write_logo(&logo);

        let pipeline = ReportPipeline::new(ReportConfig {
            masked_logo_path: Some(kept.clone()),
            ..ReportConfig::default()
        })
        .unwrap();
        pipeline
            .run(&request(Some(logo.as_path())), dir.path().join("report.pdf"))
            .unwrap();

        let masked = image::open(&kept).unwrap().to_rgba8();
        assert_eq!(masked.get_pixel(0, 0)[3], 0);
        assert!(masked.get_pixel(32, 32)[3] >= 250);
    }

    #[test]
    fn masked_logo_is_transient_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let logo = dir.path().join("Logo.png");
        write_logo(&logo);

        let pipeline = ReportPipeline::new(ReportConfig::default()).unwrap();
        pipeline
            .run(&request(Some(logo.as_path())), dir.path().join("report.pdf"))
            .unwrap();

        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["Logo.png", "report.pdf"]);
    }

    #[test]
    fn missing_logo_is_skipped() {
        let pipeline = ReportPipeline::new(ReportConfig::default()).unwrap();
        let document = pipeline
            .render(&request(Some(Path::new("/no/such/Logo.png"))))
            .unwrap();
        assert!(!document.is_empty());
    }

    #[test]
    fn corrupt_logo_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let logo = dir.path().join("Logo.png");
        std::fs::write(&logo, b"not really a png").unwrap();

        let pipeline = ReportPipeline::new(ReportConfig::default()).unwrap();
        let err = pipeline.render(&request(Some(logo.as_path()))).unwrap_err();
        assert!(matches!(err, ReportError::ImageRead { .. }));
    }
}
