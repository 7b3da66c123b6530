//! Parse Utilities
//!
//! Source files, locations, spans and parse errors shared by the markup parser
//! and the TypeScript-facing converter.

use crate::chars;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParseSourceFile {
    pub content: String,
    pub url: String,
    /// Byte offsets at which each line starts.
    #[serde(skip)]
    line_starts: Vec<usize>,
}

impl ParseSourceFile {
    pub fn new(content: String, url: String) -> Self {
        let line_starts = compute_line_starts(&content);
        ParseSourceFile {
            content,
            url,
            line_starts,
        }
    }

    /// Zero-based line and column of a byte offset. Offsets past the end clamp to
    /// the end of the file.
    pub fn location_of(&self, offset: usize) -> ParseLocation {
        let offset = offset.min(self.content.len());
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        let col = self.content[line_start..offset].chars().count();
        ParseLocation::new(offset, line, col)
    }

    pub fn span(&self, start: usize, end: usize) -> ParseSourceSpan {
        ParseSourceSpan::new(self.location_of(start), self.location_of(end))
    }
}

fn compute_line_starts(content: &str) -> Vec<usize> {
    let mut starts = vec![0];
    for (i, ch) in content.char_indices() {
        if ch == chars::NEWLINE {
            starts.push(i + 1);
        }
    }
    starts
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ParseLocation {
    pub offset: usize,
    pub line: usize,
    pub col: usize,
}

impl ParseLocation {
    pub fn new(offset: usize, line: usize, col: usize) -> Self {
        ParseLocation { offset, line, col }
    }
}

impl std::fmt::Display for ParseLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ParseSourceSpan {
    pub start: ParseLocation,
    pub end: ParseLocation,
}

impl ParseSourceSpan {
    pub fn new(start: ParseLocation, end: ParseLocation) -> Self {
        ParseSourceSpan { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The text this span covers in `source`.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source
            .get(self.start.offset..self.end.offset)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseErrorLevel {
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseError {
    pub span: ParseSourceSpan,
    pub msg: String,
    pub level: ParseErrorLevel,
}

impl ParseError {
    pub fn new(span: ParseSourceSpan, msg: impl Into<String>) -> Self {
        ParseError {
            span,
            msg: msg.into(),
            level: ParseErrorLevel::Error,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self.level {
            ParseErrorLevel::Warning => "WARNING",
            ParseErrorLevel::Error => "ERROR",
        };
        write!(f, "{} {}: {}", level, self.span.start, self.msg)
    }
}
