// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// WinAnsi text encoding for the builtin Helvetica fonts.
//
// printpdf declares builtin fonts as `WinAnsiEncoding` but writes string
// operands as UTF-8, so anything outside ASCII shows up garbled in a viewer.
// `reencode_document` rewrites the text operands of a saved PDF into real
// WinAnsi bytes with lopdf.

use lopdf::content::Content;
use lopdf::{Document, Object, StringFormat};
use medreport_core::error::{ReportError, Result};
use tracing::{debug, instrument};

/// Byte written for characters WinAnsi cannot represent.
const REPLACEMENT: u8 = b'?';

/// The 0x80..=0x9F block, where WinAnsi differs from Latin-1.
const HIGH_BLOCK: [(u8, char); 27] = [
    (0x80, '\u{20AC}'),
    (0x82, '\u{201A}'),
    (0x83, '\u{0192}'),
    (0x84, '\u{201E}'),
    (0x85, '\u{2026}'),
    (0x86, '\u{2020}'),
    (0x87, '\u{2021}'),
    (0x88, '\u{02C6}'),
    (0x89, '\u{2030}'),
    (0x8A, '\u{0160}'),
    (0x8B, '\u{2039}'),
    (0x8C, '\u{0152}'),
    (0x8E, '\u{017D}'),
    (0x91, '\u{2018}'),
    (0x92, '\u{2019}'),
    (0x93, '\u{201C}'),
    (0x94, '\u{201D}'),
    (0x95, '\u{2022}'),
    (0x96, '\u{2013}'),
    (0x97, '\u{2014}'),
    (0x98, '\u{02DC}'),
    (0x99, '\u{2122}'),
    (0x9A, '\u{0161}'),
    (0x9B, '\u{203A}'),
    (0x9C, '\u{0153}'),
    (0x9E, '\u{017E}'),
    (0x9F, '\u{0178}'),
];

/// WinAnsi code of `c`, if it has one.
pub fn encode_char(c: char) -> Option<u8> {
    match c as u32 {
        0x20..=0x7E | 0xA0..=0xFF => Some(c as u8),
        _ => HIGH_BLOCK
            .iter()
            .find(|(_, mapped)| *mapped == c)
            .map(|(byte, _)| *byte),
    }
}

/// Character for a WinAnsi byte. Unassigned codes decode to `None`.
pub fn decode_byte(byte: u8) -> Option<char> {
    match byte {
        0x20..=0x7E | 0xA0..=0xFF => Some(byte as char),
        _ => HIGH_BLOCK
            .iter()
            .find(|(code, _)| *code == byte)
            .map(|(_, c)| *c),
    }
}

/// Encode `text`; unmappable characters become `?`.
pub fn encode(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| encode_char(c).unwrap_or(REPLACEMENT))
        .collect()
}

pub fn decode(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&byte| decode_byte(byte).unwrap_or('\u{FFFD}'))
        .collect()
}

/// Rewrite every non-ASCII UTF-8 text operand in `pdf` as WinAnsi.
///
/// Returns the input unchanged when there is nothing to rewrite.
#[instrument(skip_all, fields(bytes_len = pdf.len()))]
pub fn reencode_document(pdf: Vec<u8>) -> Result<Vec<u8>> {
    let mut doc = Document::load_mem(&pdf)
        .map_err(|err| ReportError::Pdf(format!("failed to reload rendered PDF: {}", err)))?;

    let mut rewritten = 0usize;
    for (page_number, page_id) in doc.get_pages() {
        let raw = doc.get_page_content(page_id).map_err(|err| {
            ReportError::Pdf(format!("cannot read content of page {}: {}", page_number, err))
        })?;
        let mut content = Content::decode(&raw).map_err(|err| {
            ReportError::Pdf(format!("cannot decode content of page {}: {}", page_number, err))
        })?;

        let mut changed = 0usize;
        for operation in &mut content.operations {
            if matches!(operation.operator.as_str(), "Tj" | "TJ" | "'" | "\"") {
                for operand in &mut operation.operands {
                    changed += reencode_object(operand);
                }
            }
        }
        if changed == 0 {
            continue;
        }

        let encoded = content.encode().map_err(|err| {
            ReportError::Pdf(format!("cannot encode content of page {}: {}", page_number, err))
        })?;
        doc.change_page_content(page_id, encoded).map_err(|err| {
            ReportError::Pdf(format!("cannot replace content of page {}: {}", page_number, err))
        })?;
        rewritten += changed;
    }

    if rewritten == 0 {
        return Ok(pdf);
    }
    debug!(strings = rewritten, "Text re-encoded as WinAnsi");

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|err| ReportError::Pdf(format!("failed to serialise report: {}", err)))?;
    Ok(output)
}

/// Re-encode UTF-8 strings inside `object`; returns how many changed.
fn reencode_object(object: &mut Object) -> usize {
    match object {
        Object::String(bytes, format) => {
            let text = match std::str::from_utf8(bytes) {
                Ok(text) if !text.is_ascii() => text,
                _ => return 0,
            };
            *bytes = encode(text);
            *format = StringFormat::Literal;
            1
        }
        Object::Array(items) => items.iter_mut().map(reencode_object).sum(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin1_names_map_to_single_bytes() {
        assert_eq!(encode("José Müller"), b"Jos\xe9 M\xfcller");
        assert_eq!(decode(b"Jos\xe9 M\xfcller"), "José Müller");
    }

    #[test]
    fn typographic_punctuation_uses_the_high_block() {
        assert_eq!(encode("\u{201C}ok\u{201D} \u{2013} 5\u{20AC}"), b"\x93ok\x94 \x96 5\x80");
        assert_eq!(decode(b"\x93ok\x94"), "\u{201C}ok\u{201D}");
    }

    #[test]
    fn unmappable_characters_become_question_marks() {
        assert_eq!(encode("Dr. 王"), b"Dr. ?");
        assert_eq!(decode_byte(0x81), None);
    }

    #[test]
    fn ascii_strings_are_left_alone() {
        let mut object = Object::string_literal("Patient Report");
        assert_eq!(reencode_object(&mut object), 0);

        let mut array = Object::Array(vec![
            Object::string_literal("Gen\u{e8}ve"),
            Object::Integer(-120),
        ]);
        assert_eq!(reencode_object(&mut array), 1);
        match &array {
            Object::Array(items) => {
                assert_eq!(items[0], Object::String(b"Gen\xe8ve".to_vec(), StringFormat::Literal))
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn invalid_pdf_is_a_pdf_error() {
        let err = reencode_document(b"not a pdf".to_vec()).unwrap_err();
        assert!(matches!(err, ReportError::Pdf(_)));
    }
}
