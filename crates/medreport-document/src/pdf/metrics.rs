// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text measurement and word wrapping for the built-in Helvetica fonts.

use printpdf::BuiltinFont;

use crate::pdf::markup::{FontWeight, Span};

/// Helvetica advance widths (1/1000 em) for ASCII 32..=126.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Width used for characters outside the table.
const FALLBACK_WIDTH: u16 = 556;

/// Helvetica-Bold runs roughly this much wider than Helvetica.
const BOLD_FACTOR: f32 = 1.08;

/// The built-in font for a weight.
pub fn builtin_font(weight: FontWeight) -> BuiltinFont {
    match weight {
        FontWeight::Regular => BuiltinFont::Helvetica,
        FontWeight::Bold => BuiltinFont::HelveticaBold,
    }
}

/// Approximate rendered width of `text` in points.
pub fn text_width(text: &str, weight: FontWeight, size: f32) -> f32 {
    let units: u32 = text
        .chars()
        .map(|c| {
            let code = c as u32;
            if (32..=126).contains(&code) {
                HELVETICA_WIDTHS[(code - 32) as usize] as u32
            } else {
                FALLBACK_WIDTH as u32
            }
        })
        .sum();
    let width = units as f32 * size / 1000.0;
    match weight {
        FontWeight::Regular => width,
        FontWeight::Bold => width * BOLD_FACTOR,
    }
}

/// Width of a line of spans in points.
pub fn line_width(spans: &[Span], size: f32) -> f32 {
    spans
        .iter()
        .map(|span| text_width(&span.text, span.weight, size))
        .sum()
}

/// Word-wrap one hard line of spans so no output line exceeds `max_width`.
///
/// Whitespace runs collapse to single spaces. Words wider than `max_width`
/// are force-broken. An empty input yields a single empty line.
pub fn wrap_spans(spans: &[Span], max_width: f32, size: f32) -> Vec<Vec<Span>> {
    let mut lines: Vec<Vec<(String, FontWeight)>> = Vec::new();
    let mut current: Vec<(String, FontWeight)> = Vec::new();
    let mut current_width = 0.0f32;

    let words = spans.iter().flat_map(|span| {
        span.text
            .split_whitespace()
            .map(move |word| (word, span.weight))
    });

    for (word, weight) in words {
        for piece in break_word(word, weight, max_width, size) {
            let width = text_width(&piece, weight, size);
            if current.is_empty() {
                current_width = width;
                current.push((piece, weight));
                continue;
            }
            let space = text_width(" ", weight, size);
            if current_width + space + width <= max_width {
                current_width += space + width;
                current.push((piece, weight));
            } else {
                lines.push(std::mem::take(&mut current));
                current_width = width;
                current.push((piece, weight));
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines.into_iter().map(merge_words).collect()
}

/// Split a word into chunks no wider than `max_width`.
fn break_word(word: &str, weight: FontWeight, max_width: f32, size: f32) -> Vec<String> {
    if text_width(word, weight, size) <= max_width {
        return vec![word.to_owned()];
    }

    let mut chunks = Vec::new();
    let mut chunk = String::new();
    for c in word.chars() {
        let mut candidate = chunk.clone();
        candidate.push(c);
        if !chunk.is_empty() && text_width(&candidate, weight, size) > max_width {
            chunks.push(std::mem::take(&mut chunk));
            chunk.push(c);
        } else {
            chunk = candidate;
        }
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}

/// Join consecutive same-weight words into spans. The separating space stays
/// with the earlier span.
fn merge_words(words: Vec<(String, FontWeight)>) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::new();
    for (word, weight) in words {
        match spans.last_mut() {
            Some(last) if last.weight == weight => {
                last.text.push(' ');
                last.text.push_str(&word);
            }
            Some(last) => {
                last.text.push(' ');
                spans.push(Span::new(word, weight));
            }
            None => spans.push(Span::new(word, weight)),
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(lines: &[Vec<Span>]) -> Vec<String> {
        lines
            .iter()
            .map(|line| line.iter().map(|s| s.text.as_str()).collect())
            .collect()
    }

    #[test]
    fn measures_known_widths() {
        // "Age" = 667 + 556 + 556 units.
        assert!((text_width("Age", FontWeight::Regular, 10.0) - 17.79).abs() < 0.01);
        assert!(text_width("Age", FontWeight::Bold, 10.0) > text_width("Age", FontWeight::Regular, 10.0));
    }

    #[test]
    fn short_line_is_untouched() {
        let spans = vec![Span::new("Calpol 25mg", FontWeight::Regular)];
        let lines = wrap_spans(&spans, 300.0, 10.0);
        assert_eq!(texts(&lines), vec!["Calpol 25mg"]);
    }

    #[test]
    fn long_line_wraps_on_words() {
        let spans = vec![Span::new(
            "Stay hydrated and rest for at least three days",
            FontWeight::Regular,
        )];
        let lines = wrap_spans(&spans, 100.0, 10.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line_width(line, 10.0) <= 100.0);
        }
        assert_eq!(
            texts(&lines).join(" "),
            "Stay hydrated and rest for at least three days"
        );
    }

    #[test]
    fn oversized_word_is_force_broken_on_char_boundaries() {
        let spans = vec![Span::new("ÄÖÜ".repeat(20), FontWeight::Regular)];
        let lines = wrap_spans(&spans, 50.0, 10.0);
        assert!(lines.len() > 1);
        assert_eq!(texts(&lines).concat(), "ÄÖÜ".repeat(20));
    }

    #[test]
    fn weights_survive_wrapping() {
        let spans = vec![
            Span::new("Doctor:", FontWeight::Bold),
            Span::new("Dr. John Doe", FontWeight::Regular),
        ];
        let lines = wrap_spans(&spans, 400.0, 12.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0][0], Span::new("Doctor: ", FontWeight::Bold));
        assert_eq!(lines[0][1], Span::new("Dr. John Doe", FontWeight::Regular));
    }

    #[test]
    fn empty_input_gives_one_empty_line() {
        let lines = wrap_spans(&[], 100.0, 10.0);
        assert_eq!(lines, vec![Vec::<Span>::new()]);
    }
}
