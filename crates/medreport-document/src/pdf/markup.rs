// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Inline text model — runs of regular or bold text separated by explicit line
// breaks.
//
// Report text is never parsed for markup. A field containing `<b>` or `&amp;`
// is stored as those literal characters and printed as such.

/// Font weight of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// A run of text in one weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub weight: FontWeight,
}

impl Span {
    pub fn new(text: impl Into<String>, weight: FontWeight) -> Self {
        Self {
            text: text.into(),
            weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Inline {
    Span(Span),
    LineBreak,
}

/// Programmatically built rich text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RichText {
    items: Vec<Inline>,
}

impl RichText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Regular-weight text.
    pub fn plain(text: impl AsRef<str>) -> Self {
        Self::new().regular(text)
    }

    /// Bold text.
    pub fn strong(text: impl AsRef<str>) -> Self {
        Self::new().bold(text)
    }

    /// Append regular text.
    pub fn regular(self, text: impl AsRef<str>) -> Self {
        self.push(text.as_ref(), FontWeight::Regular)
    }

    /// Append bold text.
    pub fn bold(self, text: impl AsRef<str>) -> Self {
        self.push(text.as_ref(), FontWeight::Bold)
    }

    /// Append a hard line break.
    pub fn line_break(mut self) -> Self {
        self.items.push(Inline::LineBreak);
        self
    }

    /// Append `text` in `weight`. Embedded newlines become line breaks so no
    /// control character reaches the page.
    pub fn push(mut self, text: &str, weight: FontWeight) -> Self {
        for (index, piece) in text.split('\n').enumerate() {
            if index > 0 {
                self.items.push(Inline::LineBreak);
            }
            let piece = piece.trim_end_matches('\r');
            if !piece.is_empty() {
                self.items.push(Inline::Span(Span::new(piece, weight)));
            }
        }
        self
    }

    /// Spans grouped into hard lines. Always returns at least one (possibly
    /// empty) line.
    pub fn lines(&self) -> Vec<Vec<Span>> {
        let mut lines = vec![Vec::new()];
        for item in &self.items {
            match item {
                Inline::Span(span) => {
                    if let Some(line) = lines.last_mut() {
                        line.push(span.clone());
                    }
                }
                Inline::LineBreak => lines.push(Vec::new()),
            }
        }
        lines
    }

    /// Concatenated text with line breaks as `\n`.
    pub fn plain_text(&self) -> String {
        self.items
            .iter()
            .map(|item| match item {
                Inline::Span(span) => span.text.as_str(),
                Inline::LineBreak => "\n",
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
