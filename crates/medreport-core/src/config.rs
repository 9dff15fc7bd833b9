// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Report configuration: presentation variant and the immutable style sheet
// passed into the composer.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};
use crate::types::{A4_MM, LayoutVariant};

/// An sRGB colour with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor::new(0, 0, 0);
    pub const LIGHT_BLUE: RgbColor = RgbColor::new(173, 216, 230);
    pub const WHITE_SMOKE: RgbColor = RgbColor::new(245, 245, 245);
    pub const LIGHT_GREY: RgbColor = RgbColor::new(211, 211, 211);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to 0.0..=1.0.
    pub fn to_unit(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

/// Fonts sizes, colours and spacing used by every layout variant.
///
/// All lengths are PDF points (1/72 inch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    pub title_size: f32,
    pub subheader_size: f32,
    pub body_size: f32,
    pub table_header_size: f32,
    /// Extra leading added to each font size to get the line height.
    pub leading: f32,
    pub page_margin: f32,
    /// Vertical gap between blocks.
    pub block_spacing: f32,
    /// Gap between a section label and its content.
    pub label_spacing: f32,
    /// Inner padding of table cells and section boxes.
    pub cell_padding: f32,
    /// Rendered width and height of the circular logo.
    pub logo_size: f32,
    /// Width of the medicine and instruction boxes.
    pub section_width: f32,
    pub grid_thickness: f32,
    pub text_color: RgbColor,
    /// Table header background.
    pub accent_color: RgbColor,
    /// Table data row background.
    pub row_color: RgbColor,
    /// Medicine and instruction box background.
    pub section_color: RgbColor,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            title_size: 22.0,
            subheader_size: 12.0,
            body_size: 10.0,
            table_header_size: 12.0,
            leading: 2.0,
            page_margin: 72.0,
            block_spacing: 12.0,
            label_spacing: 6.0,
            cell_padding: 6.0,
            logo_size: 60.0,
            section_width: 5.5 * 72.0,
            grid_thickness: 1.0,
            text_color: RgbColor::BLACK,
            accent_color: RgbColor::LIGHT_BLUE,
            row_color: RgbColor::WHITE_SMOKE,
            section_color: RgbColor::LIGHT_GREY,
        }
    }
}

impl StyleConfig {
    /// Usable width between the left and right page margins, on A4.
    pub fn content_width(&self) -> f32 {
        mm_to_pt(A4_MM.0) - 2.0 * self.page_margin
    }

    /// Check that every size is positive and the boxes fit on an A4 page.
    pub fn validate(&self) -> Result<()> {
        let sizes = [
            ("title_size", self.title_size),
            ("subheader_size", self.subheader_size),
            ("body_size", self.body_size),
            ("table_header_size", self.table_header_size),
            ("logo_size", self.logo_size),
            ("section_width", self.section_width),
        ];
        for (name, value) in sizes {
            if !(value.is_finite() && value > 0.0) {
                return Err(ReportError::Config(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let spacings = [
            ("leading", self.leading),
            ("page_margin", self.page_margin),
            ("block_spacing", self.block_spacing),
            ("label_spacing", self.label_spacing),
            ("cell_padding", self.cell_padding),
            ("grid_thickness", self.grid_thickness),
        ];
        for (name, value) in spacings {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ReportError::Config(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
        }

        let content_width = self.content_width();
        if content_width <= 0.0 {
            return Err(ReportError::Config(format!(
                "page_margin {} leaves no room on the page",
                self.page_margin
            )));
        }
        if self.section_width > content_width {
            return Err(ReportError::Config(format!(
                "section_width {} exceeds the content width {content_width}",
                self.section_width
            )));
        }
        Ok(())
    }
}

/// Top-level report settings, loadable from a JSON file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub variant: LayoutVariant,
    pub style: StyleConfig,
    /// Append the time of day to the report date.
    pub include_time: bool,
    /// Persist the masked logo here. When unset the masked logo only ever
    /// exists in memory.
    pub masked_logo_path: Option<PathBuf>,
}

impl ReportConfig {
    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: ReportConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the style against the variant's table geometry.
    ///
    /// The demographics table is centred on the page and may extend into the
    /// side margins, but it must fit on the paper.
    pub fn validate(&self) -> Result<()> {
        self.style.validate()?;

        let table_width: f32 = self.variant.column_widths_in().iter().sum::<f32>() * 72.0;
        let page_width = mm_to_pt(A4_MM.0);
        if table_width > page_width {
            return Err(ReportError::Config(format!(
                "{} table is {table_width}pt wide but the page is only {page_width}pt",
                self.variant
            )));
        }
        Ok(())
    }
}

/// Millimetres to PDF points.
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * 72.0 / 25.4
}
