//! Markup parser: a forgiving HTML fragment parser yielding element, text and
//! comment nodes with source-accurate spans.

pub mod ast;
pub mod html_tags;
pub mod lexer;
pub mod parser;
pub mod tokens;

pub use parser::{ParseTreeResult, Parser};
