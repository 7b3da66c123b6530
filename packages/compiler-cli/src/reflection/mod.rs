pub mod src {
    pub mod host;
    pub mod jsdoc;
    pub mod typescript;
}

pub use src::host::{
    ClassMember, ClassMemberKind, Declaration, DeclarationKind, Decorator, FunctionDefinition,
    FunctionNode, Import, Parameter, ReflectionHost,
};
pub use src::typescript::{unwrap_parens, TypeScriptReflectionHost};
