use serde::Serialize;
use soy_compiler::parse_util::ParseSourceFile;
use std::fmt;

/// A problem found while converting one source file. Line and column are
/// 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub file_name: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(
        file_name: impl Into<String>,
        line: usize,
        column: usize,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            line,
            column,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{} - {}",
            self.file_name, self.line, self.column, self.message
        )
    }
}

/// Append-only diagnostic list for one source file, translating byte offsets
/// into line/column positions.
#[derive(Debug, Clone)]
pub struct DiagnosticBag {
    file: ParseSourceFile,
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new(file_name: &str, source_text: &str) -> Self {
        Self {
            file: ParseSourceFile::new(source_text.to_string(), file_name.to_string()),
            diagnostics: Vec::new(),
        }
    }

    pub fn report(&mut self, offset: u32, message: impl Into<String>) {
        let location = self.file.location_of(offset as usize);
        self.diagnostics.push(Diagnostic::new(
            self.file.url.clone(),
            location.line + 1,
            location.col + 1,
            message,
        ));
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
