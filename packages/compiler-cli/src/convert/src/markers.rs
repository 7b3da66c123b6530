//! Template part markers
//!
//! A tagged template is parsed as HTML by joining its string pieces with a
//! marker per substituted expression. Markers are plain name characters so
//! they survive in text, attribute names and values, and tag names alike.

use regex::Regex;

const MARKER_BASE: &str = "soymarker";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'t> {
    Text(&'t str),
    /// Index of the substituted expression.
    Part(usize),
}

#[derive(Debug, Clone)]
pub struct Markers {
    prefix: String,
    pattern: Regex,
}

impl Markers {
    /// Picks the first prefix that occurs in none of `texts`, so a marker in
    /// the joined markup can never be confused with template content.
    pub fn new<'s>(texts: impl IntoIterator<Item = &'s str>) -> Self {
        let texts: Vec<&str> = texts.into_iter().collect();
        let mut attempt = 0usize;
        let prefix = loop {
            let candidate = if attempt == 0 {
                format!("{}_", MARKER_BASE)
            } else {
                format!("{}{}_", MARKER_BASE, attempt)
            };
            if !texts.iter().any(|text| text.contains(&candidate)) {
                break candidate;
            }
            attempt += 1;
        };
        let pattern = Regex::new(&format!(r"{}(\d+)_", regex::escape(&prefix)))
            .unwrap_or_else(|_| unreachable!("marker prefixes are escaped"));
        Self { prefix, pattern }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn marker(&self, index: usize) -> String {
        format!("{}{}_", self.prefix, index)
    }

    /// Splits `text` into literal text and parts, dropping empty text.
    pub fn split<'t>(&self, text: &'t str) -> Vec<Segment<'t>> {
        let mut segments = Vec::new();
        let mut last = 0;
        for captures in self.pattern.captures_iter(text) {
            let (Some(whole), Some(index)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            let Ok(index) = index.as_str().parse::<usize>() else {
                continue;
            };
            if whole.start() > last {
                segments.push(Segment::Text(&text[last..whole.start()]));
            }
            segments.push(Segment::Part(index));
            last = whole.end();
        }
        if last < text.len() {
            segments.push(Segment::Text(&text[last..]));
        }
        segments
    }

    /// Indices of all parts in `text`, in order.
    pub fn parts_in(&self, text: &str) -> Vec<usize> {
        self.split(text)
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Part(index) => Some(index),
                Segment::Text(_) => None,
            })
            .collect()
    }

    pub fn has_parts(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// A template's pieces joined with markers, remembering where each piece
/// came from so markup positions can be reported against the source file.
#[derive(Debug, Clone)]
pub struct MarkedTemplate {
    pub html: String,
    pub markers: Markers,
    /// `(offset in html, offset in source, length)` per string piece.
    pieces: Vec<(usize, u32, usize)>,
    /// `(offset in html, source offset of the expression)` per marker.
    parts: Vec<(usize, u32)>,
}

impl MarkedTemplate {
    /// `quasis` holds each string piece with its source offset,
    /// `expression_starts` the source offset of each substitution.
    pub fn new(quasis: &[(&str, u32)], expression_starts: &[u32]) -> Self {
        let markers = Markers::new(quasis.iter().map(|(text, _)| *text));
        let mut html = String::new();
        let mut pieces = Vec::with_capacity(quasis.len());
        let mut parts = Vec::with_capacity(expression_starts.len());
        for (i, (text, source_start)) in quasis.iter().enumerate() {
            pieces.push((html.len(), *source_start, text.len()));
            html.push_str(text);
            if let Some(expression_start) = expression_starts.get(i) {
                parts.push((html.len(), *expression_start));
                html.push_str(&markers.marker(i));
            }
        }
        Self {
            html,
            markers,
            pieces,
            parts,
        }
    }

    /// Maps an offset in the joined markup back to the source file. Offsets
    /// inside a marker map to the start of its expression.
    pub fn source_offset(&self, offset: usize) -> u32 {
        let piece = self
            .pieces
            .iter()
            .rev()
            .find(|(html_start, _, _)| *html_start <= offset);
        let part = self
            .parts
            .iter()
            .rev()
            .find(|(html_start, _)| *html_start <= offset);
        match (piece, part) {
            (Some(&(piece_start, source_start, len)), part) => {
                let in_piece = offset - piece_start;
                match part {
                    Some(&(part_start, expression_start)) if part_start > piece_start => {
                        expression_start
                    }
                    _ if in_piece <= len => source_start + in_piece as u32,
                    Some(&(_, expression_start)) => expression_start,
                    None => source_start + len as u32,
                }
            }
            (None, _) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_text_and_parts() {
        let markers = Markers::new(["<p>", "</p>"]);
        let text = format!("a{}b{}", markers.marker(0), markers.marker(12));
        assert_eq!(
            markers.split(&text),
            vec![
                Segment::Text("a"),
                Segment::Part(0),
                Segment::Text("b"),
                Segment::Part(12)
            ]
        );
        assert_eq!(markers.parts_in(&text), vec![0, 12]);
        assert!(!markers.has_parts("plain"));
    }

    #[test]
    fn test_prefix_avoids_template_content() {
        let markers = Markers::new(["soymarker_ and soymarker1_", ""]);
        assert_eq!(markers.prefix(), "soymarker2_");
        // Template text that merely looks like the base is left alone.
        assert_eq!(
            markers.split("soymarker_0_"),
            vec![Segment::Text("soymarker_0_")]
        );
    }

    #[test]
    fn test_source_offsets() {
        // html`<b>${x}</b>` with the first piece at offset 10 and `x` at 15.
        let template = MarkedTemplate::new(&[("<b>", 10), ("</b>", 17)], &[15]);
        assert_eq!(template.html, "<b>soymarker_0_</b>");
        assert_eq!(template.source_offset(0), 10);
        assert_eq!(template.source_offset(1), 11);
        assert_eq!(template.source_offset(3), 15);
        assert_eq!(template.source_offset(5), 15);
        let closing = template.html.find("</b>").unwrap();
        assert_eq!(template.source_offset(closing), 17);
        assert_eq!(template.source_offset(closing + 2), 19);
    }
}
