// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Medreport.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

/// ISO A4 page dimensions in millimetres (width, height).
pub const A4_MM: (f32, f32) = (210.0, 297.0);

/// Literal title printed at the top of every report.
pub const REPORT_TITLE: &str = "Patient Report";

/// Header row of the demographics table, in column order.
pub const DEMOGRAPHICS_HEADER: [&str; 4] = ["Patient Name", "Patient CNIC", "Gender", "Age"];

/// Section labels.
pub const DIAGNOSIS_LABEL: &str = "Disease Detected";
pub const MEDICINES_LABEL: &str = "Medicine Recommendations";
pub const INSTRUCTIONS_LABEL: &str = "Special Instructions";

/// Everything needed to render one patient report.
///
/// All strings are used verbatim. Nothing here is validated or sanitised;
/// the composer treats every field as literal text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub doctor_name: String,
    pub patient_name: String,
    /// National identity number (CNIC) or any other patient identifier.
    pub patient_id: String,
    pub gender: String,
    pub age: String,
    pub diagnosis: String,
    #[serde(default)]
    pub medicines: Vec<String>,
    pub instructions: String,
    pub hospital_name: String,
    /// Raw (unmasked) hospital logo. `None` or a missing file omits the logo.
    #[serde(default)]
    pub logo_path: Option<PathBuf>,
}

impl ReportRequest {
    /// Parse a request from JSON.
    ///
    /// A `medicines` value that is not a list of strings is reported as a
    /// layout error naming the field, before any document work starts.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;

        let object = value
            .as_object()
            .ok_or_else(|| ReportError::layout("request", "expected a JSON object"))?;

        if let Some(medicines) = object.get("medicines") {
            let items = medicines.as_array().ok_or_else(|| {
                ReportError::layout("medicines", "expected a list of strings")
            })?;
            if let Some(index) = items.iter().position(|item| !item.is_string()) {
                return Err(ReportError::layout(
                    "medicines",
                    format!("entry {} is not a string", index),
                ));
            }
        }

        Ok(serde_json::from_value(value)?)
    }

    /// Demographics table data row, in header column order.
    pub fn demographics_row(&self) -> [&str; 4] {
        [
            self.patient_name.as_str(),
            self.patient_id.as_str(),
            self.gender.as_str(),
            self.age.as_str(),
        ]
    }
}

/// Presentation variants of the single-page report.
///
/// Each variant fixes column widths, block arrangement and list style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutVariant {
    /// Logo above the hospital name; doctor and date on separate lines.
    #[default]
    Stacked,
    /// Logo at the left with the hospital name beside it; doctor and date in
    /// two columns.
    Banner,
    /// Doctor and date concatenated on one line, equal-width columns,
    /// numbered medicines.
    Compact,
    /// Centred logo and hospital name, doctor and date in two columns,
    /// numbered medicines.
    Centered,
}

impl LayoutVariant {
    pub const ALL: [LayoutVariant; 4] = [
        LayoutVariant::Stacked,
        LayoutVariant::Banner,
        LayoutVariant::Compact,
        LayoutVariant::Centered,
    ];

    /// Demographics column widths in inches.
    pub fn column_widths_in(&self) -> [f32; 4] {
        match self {
            Self::Stacked => [2.0, 3.0, 1.0, 0.8],
            Self::Banner => [2.2, 2.2, 1.1, 1.0],
            Self::Compact => [1.7, 1.7, 1.7, 1.7],
            Self::Centered => [2.0, 2.5, 1.2, 1.0],
        }
    }

    /// Whether medicines are prefixed with `1.`, `2.`, ...
    pub fn numbered_medicines(&self) -> bool {
        matches!(self, Self::Compact | Self::Centered)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stacked => "stacked",
            Self::Banner => "banner",
            Self::Compact => "compact",
            Self::Centered => "centered",
        }
    }
}

impl std::fmt::Display for LayoutVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stacked" => Ok(Self::Stacked),
            "banner" => Ok(Self::Banner),
            "compact" => Ok(Self::Compact),
            "centered" | "centred" => Ok(Self::Centered),
            other => Err(format!(
                "unknown layout variant '{other}' (expected stacked, banner, compact or centered)"
            )),
        }
    }
}

/// Result of masking a logo file: where it came from, where it went, and its
/// pixel size. The mask is always the ellipse inscribed in that size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskedImage {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub width: u32,
    pub height: u32,
}
