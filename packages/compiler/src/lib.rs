#![deny(clippy::all)]

/**
 * Soy Compiler
 *
 * Markup parsing and Closure Templates output for the lit-to-Soy converter
 */

// Core modules
pub mod chars;
pub mod parse_util;

// Parser modules
pub mod ml_parser;

// Output modules
pub mod output;
pub mod schema;

pub use parse_util::{ParseError, ParseLocation, ParseSourceFile, ParseSourceSpan};
