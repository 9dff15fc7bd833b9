// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Medreport.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Top-level error type for all Medreport operations.
///
/// Every variant carries the file, field, or stage it failed on so a caller
/// can tell which part of the request needs fixing.
#[derive(Debug, Error)]
pub enum ReportError {
    // -- Image errors --
    #[error("cannot read image {}: {reason}", path.display())]
    ImageRead { path: PathBuf, reason: String },

    #[error("cannot write image {}: {reason}", path.display())]
    ImageWrite { path: PathBuf, reason: String },

    #[error("image processing failed: {0}")]
    Image(String),

    // -- Document errors --
    #[error("layout failed at {stage}: {reason}")]
    Layout { stage: String, reason: String },

    #[error("cannot write report {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF operation failed: {0}")]
    Pdf(String),

    // -- Configuration --
    #[error("invalid configuration: {0}")]
    Config(String),

    // -- Storage / serialisation --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ReportError {
    /// Build an [`ReportError::ImageRead`] for `path`.
    pub fn image_read(path: impl AsRef<Path>, reason: impl std::fmt::Display) -> Self {
        Self::ImageRead {
            path: path.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Build an [`ReportError::ImageWrite`] for `path`.
    pub fn image_write(path: impl AsRef<Path>, reason: impl std::fmt::Display) -> Self {
        Self::ImageWrite {
            path: path.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`ReportError::Layout`] naming the stage or field that failed.
    pub fn layout(stage: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Layout {
            stage: stage.into(),
            reason: reason.into(),
        }
    }

    /// Build a [`ReportError::Write`] for the report destination.
    pub fn write(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ReportError>;
