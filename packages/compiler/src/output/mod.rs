//! Output Module
//!
//! The Soy output AST and its serializer

pub mod soy_ast;
pub mod soy_emitter;

pub use soy_emitter::{emit_commands, emit_file, EmitError, EmitterContext};
