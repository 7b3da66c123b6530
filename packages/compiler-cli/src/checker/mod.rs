//! Type checking
//!
//! Host-language types and the assignability queries the converter makes.

pub mod src {
    pub mod annotation;
    pub mod checker;
    pub mod types;
}

pub use src::annotation::AnnotationChecker;
pub use src::checker::{is_assignable_to, TypeChecker};
pub use src::types::HostType;

#[cfg(test)]
mod test;
