// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// medreport-document — Document processing for Medreport.
//
// Provides the circular logo mask, the single-page patient report composer,
// the mask-then-compose pipeline, and a small PDF reader used to inspect
// rendered reports.

pub mod image;
pub mod pdf;
pub mod pipeline;

// Re-export the primary structs so callers can use `medreport_document::ReportComposer` etc.
pub use image::mask::{mask_bytes, mask_file, mask_image};
pub use image::processor::ImageProcessor;
pub use pdf::composer::{ReportComposer, ReportDocument};
pub use pdf::markup::{FontWeight, RichText, Span};
pub use pdf::reader::ReportReader;
pub use pipeline::ReportPipeline;
