// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Report composer — turns a `ReportRequest` into a single-page A4 patient
// report using `printpdf` 0.8.
//
// The page is described as a `Story` of blocks (title, logo, doctor/date,
// demographics table, diagnosis, medicines, instructions) which the layout
// module renders into one `PdfPage`.

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Local};
use image::DynamicImage;
use medreport_core::config::ReportConfig;
use medreport_core::error::{ReportError, Result};
use medreport_core::types::{
    DEMOGRAPHICS_HEADER, DIAGNOSIS_LABEL, INSTRUCTIONS_LABEL, LayoutVariant, MEDICINES_LABEL,
    REPORT_TITLE, ReportRequest,
};
use printpdf::{PdfDocument, PdfSaveOptions, PdfWarnMsg, RawImage, RawImageData, RawImageFormat};
use tracing::{debug, info, instrument, warn};

use crate::image::processor::ImageProcessor;
use crate::pdf::layout::{Align, Block, LogoImage, LogoPlacement, PageCanvas, Story, Table};
use crate::pdf::markup::RichText;
use crate::pdf::winansi;

/// Logos are embedded at up to this many pixels per rendered point.
const LOGO_PIXELS_PER_POINT: f32 = 4.0;

/// A rendered report.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    bytes: Vec<u8>,
    page_count: usize,
}

impl ReportDocument {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Write the PDF to `path`.
    ///
    /// The bytes go to a temporary file next to `path` which is then renamed
    /// over it, so a failed write never leaves a truncated report behind.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file =
            tempfile::NamedTempFile::new_in(dir).map_err(|err| ReportError::write(path, err))?;
        file.write_all(&self.bytes)
            .and_then(|()| file.as_file().sync_all())
            .map_err(|err| ReportError::write(path, err))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.as_file()
                .set_permissions(std::fs::Permissions::from_mode(0o644))
                .map_err(|err| ReportError::write(path, err))?;
        }

        file.persist(path)
            .map_err(|err| ReportError::write(path, err.error))?;
        info!(bytes = self.bytes.len(), "Wrote report to {}", path.display());
        Ok(())
    }
}

/// Composes patient reports in one of the [`LayoutVariant`]s.
pub struct ReportComposer {
    config: ReportConfig,
    /// Fixed render time; `None` uses the clock at render time.
    timestamp: Option<DateTime<Local>>,
}

impl ReportComposer {
    /// Create a composer after validating the configuration.
    pub fn new(config: ReportConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            timestamp: None,
        })
    }

    /// A composer with default styling in the given variant.
    pub fn with_variant(variant: LayoutVariant) -> Result<Self> {
        Self::new(ReportConfig {
            variant,
            ..ReportConfig::default()
        })
    }

    /// Stamp reports with `timestamp` instead of the current time.
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    // -- Compose to file --------------------------------------------------------

    /// Render `request` with an already-masked logo and write it to
    /// `output_path`.
    ///
    /// A `logo_path` of `None`, or one that does not exist, omits the logo
    /// block. A logo file that exists but cannot be decoded is an error.
    #[instrument(skip_all, fields(output = %output_path.as_ref().display(), variant = %self.config.variant))]
    pub fn compose(
        &self,
        request: &ReportRequest,
        logo_path: Option<&Path>,
        output_path: impl AsRef<Path>,
    ) -> Result<ReportDocument> {
        let logo = match logo_path {
            Some(path) if path.exists() => Some(ImageProcessor::open(path)?.into_dynamic()),
            Some(path) => {
                warn!(path = %path.display(), "Logo not found, omitting logo block");
                None
            }
            None => None,
        };

        let document = self.render(request, logo.as_ref())?;
        document.save(output_path)?;
        Ok(document)
    }

    // -- Render in memory ---------------------------------------------------------

    /// Render `request` to PDF bytes. `logo` is embedded as-is, so pass an
    /// image that is already masked.
    #[instrument(skip_all, fields(variant = %self.config.variant, has_logo = logo.is_some()))]
    pub fn render(
        &self,
        request: &ReportRequest,
        logo: Option<&DynamicImage>,
    ) -> Result<ReportDocument> {
        let mut doc = PdfDocument::new(REPORT_TITLE);

        let logo_image = logo.map(|image| {
            let max_px = (self.config.style.logo_size * LOGO_PIXELS_PER_POINT).ceil() as u32;
            let rgba = ImageProcessor::from_dynamic(image.clone())
                .fit_within(max_px, max_px)
                .into_dynamic()
                .to_rgba8();
            let (width_px, height_px) = rgba.dimensions();
            let raw = RawImage {
                pixels: RawImageData::U8(rgba.into_raw()),
                width: width_px as usize,
                height: height_px as usize,
                data_format: RawImageFormat::RGBA8,
                tag: Vec::new(),
            };
            LogoImage {
                id: doc.add_image(&raw),
                width_px,
                height_px,
            }
        });

        let now = self.timestamp.unwrap_or_else(Local::now);
        let story = self.build_story(request, logo_image, now)?;

        let mut canvas = PageCanvas::a4(&self.config.style);
        canvas.render_story(&story)?;
        doc.with_pages(vec![canvas.into_page()]);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
        for warning in &warnings {
            debug!(?warning, "printpdf warning");
        }
        let bytes = if request_is_ascii(request) {
            bytes
        } else {
            winansi::reencode_document(bytes)?
        };

        info!(bytes = bytes.len(), "Report rendered");
        Ok(ReportDocument {
            bytes,
            page_count: 1,
        })
    }

    // -- Story --------------------------------------------------------------------

    /// Arrange the request into blocks for the configured variant.
    pub fn build_story(
        &self,
        request: &ReportRequest,
        logo: Option<LogoImage>,
        now: DateTime<Local>,
    ) -> Result<Story> {
        let variant = self.config.variant;
        let style = &self.config.style;
        let mut story = Story::new();

        story.push("title", Block::Title(RichText::strong(REPORT_TITLE)));
        story.push("title", Block::Spacer(style.block_spacing));

        let placement = match variant {
            LayoutVariant::Banner => LogoPlacement::Beside,
            LayoutVariant::Centered => LogoPlacement::Centered,
            LayoutVariant::Stacked | LayoutVariant::Compact => LogoPlacement::Above,
        };
        story.push(
            "logo",
            Block::Logo {
                image: logo,
                caption: RichText::strong(&request.hospital_name),
                placement,
            },
        );

        let doctor = RichText::strong("Doctor: ").regular(&request.doctor_name);
        let date = RichText::strong("Date: ").regular(self.format_date(now));
        match variant {
            LayoutVariant::Stacked => {
                story.push(
                    "doctor",
                    Block::Line {
                        text: doctor,
                        align: Align::Left,
                    },
                );
                story.push(
                    "date",
                    Block::Line {
                        text: date,
                        align: Align::Left,
                    },
                );
            }
            LayoutVariant::Compact => {
                let line = doctor
                    .regular(" | ")
                    .bold("Date: ")
                    .regular(self.format_date(now));
                story.push(
                    "doctor",
                    Block::Line {
                        text: line,
                        align: Align::Left,
                    },
                );
            }
            LayoutVariant::Banner | LayoutVariant::Centered => {
                story.push(
                    "doctor",
                    Block::Columns {
                        left: doctor,
                        right: date,
                    },
                );
            }
        }
        story.push("doctor", Block::Spacer(style.block_spacing));

        story.push("demographics", Block::Table(demographics_table(request, variant)?));
        story.push("demographics", Block::Spacer(style.block_spacing));

        story.push(
            "diagnosis",
            Block::Section {
                label: RichText::strong(DIAGNOSIS_LABEL),
                body: vec![RichText::plain(&request.diagnosis)],
                boxed: false,
            },
        );
        story.push("diagnosis", Block::Spacer(style.block_spacing));

        let medicines = request
            .medicines
            .iter()
            .enumerate()
            .map(|(index, medicine)| {
                if variant.numbered_medicines() {
                    RichText::plain(format!("{}. ", index + 1)).regular(medicine)
                } else {
                    RichText::plain(medicine)
                }
            })
            .collect();
        story.push(
            "medicines",
            Block::Section {
                label: RichText::strong(MEDICINES_LABEL),
                body: medicines,
                boxed: true,
            },
        );
        story.push("medicines", Block::Spacer(style.block_spacing));

        story.push(
            "instructions",
            Block::Section {
                label: RichText::strong(INSTRUCTIONS_LABEL),
                body: vec![RichText::plain(&request.instructions)],
                boxed: true,
            },
        );

        debug!(blocks = story.len(), "Story built");
        Ok(story)
    }

    /// Report date, e.g. "October 16, 2026" or "October 16, 2026 09:30 AM".
    fn format_date(&self, now: DateTime<Local>) -> String {
        if self.config.include_time {
            now.format("%B %d, %Y %I:%M %p").to_string()
        } else {
            now.format("%B %d, %Y").to_string()
        }
    }
}

/// The 2 x 4 demographics table: bold header, then the patient's values.
fn demographics_table(request: &ReportRequest, variant: LayoutVariant) -> Result<Table> {
    let widths = variant
        .column_widths_in()
        .iter()
        .map(|inches| inches * 72.0)
        .collect();
    let mut table = Table::new(widths);
    table
        .push_row(DEMOGRAPHICS_HEADER.iter().map(RichText::strong).collect(), true)
        .map_err(|err| relabel(err, "demographics"))?;
    table
        .push_row(
            request
                .demographics_row()
                .iter()
                .map(RichText::plain)
                .collect(),
            false,
        )
        .map_err(|err| relabel(err, "demographics"))?;
    Ok(table)
}

/// Whether every printed field of `request` is plain ASCII.
fn request_is_ascii(request: &ReportRequest) -> bool {
    [
        &request.doctor_name,
        &request.patient_name,
        &request.patient_id,
        &request.gender,
        &request.age,
        &request.diagnosis,
        &request.instructions,
        &request.hospital_name,
    ]
    .iter()
    .all(|field| field.is_ascii())
        && request.medicines.iter().all(|medicine| medicine.is_ascii())
}

/// Attribute a layout error to `stage`.
fn relabel(err: ReportError, stage: &str) -> ReportError {
    match err {
        ReportError::Layout { reason, .. } => ReportError::layout(stage, reason),
        other => other,
    }
}
