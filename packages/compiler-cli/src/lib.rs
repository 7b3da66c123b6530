#![deny(clippy::all)]

/**
 * lit-soy Compiler CLI
 *
 * Converts lit-html templates and LitElement components to Closure Templates.
 */
// Re-export compiler for convenience
pub use soy_compiler as compiler;

pub mod checker;
pub mod config;
pub mod convert;
pub mod diagnostics;
pub mod logging;
pub mod perform_compile;
pub mod reflection;

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
