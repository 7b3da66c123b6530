//! Conversion
//!
//! Turns `@soyCompatible` template functions and lit components of one
//! source file into Soy templates, collecting diagnostics on the way.

pub mod src {
    pub mod body;
    pub mod component;
    pub mod context;
    pub mod driver;
    pub mod expression;
    pub mod markers;
    pub mod markup;
    pub mod registry;
    pub mod scope;
    pub mod type_mapper;
}

pub use src::body::BodyKind;
pub use src::context::ConversionContext;
pub use src::driver::{namespace_for, ConversionResult, SoyConverter, LIT_MODULES, SOY_COMPATIBLE_TAG};
pub use src::registry::{RegisteredTemplate, TemplateRegistry};
pub use src::scope::{Binding, BindingKind, ComponentClass, Scope, ScopeError};
pub use src::type_mapper::map_type;

#[cfg(test)]
mod test;
