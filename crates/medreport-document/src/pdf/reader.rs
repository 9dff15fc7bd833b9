// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open a rendered report and inspect its pages, page size,
// embedded images and text using the `lopdf` crate.

use std::path::Path;

use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};
use medreport_core::error::ReportError;
use tracing::{debug, info, instrument};

use crate::pdf::winansi;

/// Read-only view of a PDF file.
///
/// Wraps `lopdf::Document`. Used by the `inspect` command and to check
/// rendered reports in tests.
pub struct ReportReader {
    document: Document,
}

impl ReportReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            ReportError::Pdf(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self { document })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, ReportError> {
        let document = Document::load_mem(data).map_err(|err| {
            ReportError::Pdf(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self { document })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Width and height in points of a page (1-indexed), from its MediaBox.
    pub fn page_size_pt(&self, page_number: u32) -> Result<(f32, f32), ReportError> {
        let page_id = self.page_id(page_number)?;

        let mut node = Some(page_id);
        while let Some(id) = node {
            let dict = self.document.get_dictionary(id).map_err(|err| {
                ReportError::Pdf(format!("cannot read page node {:?}: {}", id, err))
            })?;
            if let Ok(media_box) = dict.get(b"MediaBox") {
                let resolved = match media_box {
                    Object::Reference(ref_id) => self.document.get_object(*ref_id).map_err(|err| {
                        ReportError::Pdf(format!("cannot resolve MediaBox: {}", err))
                    })?,
                    other => other,
                };
                return media_box_size(resolved);
            }
            // MediaBox is inheritable from the page tree.
            node = dict
                .get(b"Parent")
                .ok()
                .and_then(|parent| parent.as_reference().ok());
        }

        Err(ReportError::Pdf(format!(
            "page {} has no MediaBox",
            page_number
        )))
    }

    /// Strings drawn by `Tj`/`TJ` on a page (1-indexed), decoded as WinAnsi,
    /// in content stream order. One entry per text-showing operator.
    #[instrument(skip(self), fields(page_number))]
    pub fn text_runs(&self, page_number: u32) -> Result<Vec<String>, ReportError> {
        let page_id = self.page_id(page_number)?;
        let raw = self.document.get_page_content(page_id).map_err(|err| {
            ReportError::Pdf(format!("cannot read content of page {}: {}", page_number, err))
        })?;
        let content = Content::decode(&raw).map_err(|err| {
            ReportError::Pdf(format!("cannot decode content of page {}: {}", page_number, err))
        })?;

        let mut runs = Vec::new();
        for operation in &content.operations {
            match operation.operator.as_str() {
                "Tj" | "'" | "\"" => {
                    if let Some(Object::String(bytes, _)) = operation.operands.last() {
                        runs.push(winansi::decode(bytes));
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(items)) = operation.operands.first() {
                        let text: String = items
                            .iter()
                            .filter_map(|item| match item {
                                Object::String(bytes, _) => Some(winansi::decode(bytes)),
                                _ => None,
                            })
                            .collect();
                        runs.push(text);
                    }
                }
                _ => {}
            }
        }

        debug!(runs = runs.len(), "Text runs extracted");
        Ok(runs)
    }

    /// Number of image XObjects in the file, soft masks included.
    pub fn image_count(&self) -> usize {
        self.document
            .objects
            .values()
            .filter(|object| match object {
                Object::Stream(stream) => stream
                    .dict
                    .get(b"Subtype")
                    .and_then(Object::as_name)
                    .map(|name| name == b"Image")
                    .unwrap_or(false),
                _ => false,
            })
            .count()
    }

    // -- Helpers --------------------------------------------------------------

    fn page_id(&self, page_number: u32) -> Result<ObjectId, ReportError> {
        let pages = self.document.get_pages();
        pages.get(&page_number).copied().ok_or_else(|| {
            ReportError::Pdf(format!(
                "page {} out of range (document has {} pages)",
                page_number,
                pages.len()
            ))
        })
    }
}

/// Width and height of a `[llx lly urx ury]` rectangle.
fn media_box_size(object: &Object) -> Result<(f32, f32), ReportError> {
    let values = object
        .as_array()
        .map_err(|err| ReportError::Pdf(format!("MediaBox is not an array: {}", err)))?
        .iter()
        .map(|value| {
            value
                .as_float()
                .map_err(|err| ReportError::Pdf(format!("MediaBox entry is not a number: {}", err)))
        })
        .collect::<Result<Vec<f32>, ReportError>>()?;

    match values.as_slice() {
        [llx, lly, urx, ury] => Ok(((urx - llx).abs(), (ury - lly).abs())),
        _ => Err(ReportError::Pdf(format!(
            "MediaBox has {} entries, expected 4",
            values.len()
        ))),
    }
}
