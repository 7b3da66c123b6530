//! Diagnostics
//!
//! Conversion problems are data, not errors: they are collected per file and
//! never abort a run.

pub mod src {
    pub mod diagnostic;
    pub mod format;
}

pub use src::diagnostic::{Diagnostic, DiagnosticBag};
pub use src::format::{format_diagnostics, DiagnosticFormat};
