//! Type checker interface
//!
//! The converter asks assignability questions only; how types are obtained
//! is up to the implementation.

use super::types::HostType;

pub trait TypeChecker {
    /// Whether a value of type `source` may be assigned to `target`, following
    /// TypeScript's rules (so `any` is assignable to everything).
    fn is_assignable(&self, source: &HostType, target: &HostType) -> bool;

    fn is_boolean(&self, ty: &HostType) -> bool {
        self.is_assignable(ty, &HostType::Boolean)
    }

    fn is_number(&self, ty: &HostType) -> bool {
        self.is_assignable(ty, &HostType::Number)
    }

    fn is_string(&self, ty: &HostType) -> bool {
        self.is_assignable(ty, &HostType::String)
    }

    fn is_nullish(&self, ty: &HostType) -> bool {
        self.is_assignable(ty, &HostType::Union(vec![HostType::Null, HostType::Undefined]))
    }

    fn is_list(&self, ty: &HostType) -> bool {
        self.is_assignable(ty, &HostType::Array(None))
    }
}

/// Structural assignability over [`HostType`].
pub fn is_assignable_to(source: &HostType, target: &HostType) -> bool {
    match (source, target) {
        (HostType::Any, _) | (HostType::Never, _) => true,
        (_, HostType::Any) | (_, HostType::Unknown) => true,
        (HostType::Union(members), _) => members.iter().all(|m| is_assignable_to(m, target)),
        (_, HostType::Union(members)) => members.iter().any(|m| is_assignable_to(source, m)),
        (HostType::Unknown, _) => false,

        (HostType::Boolean | HostType::BooleanLiteral(_), HostType::Boolean) => true,
        (HostType::BooleanLiteral(a), HostType::BooleanLiteral(b)) => a == b,
        (HostType::Number | HostType::NumberLiteral(_), HostType::Number) => true,
        (HostType::NumberLiteral(a), HostType::NumberLiteral(b)) => a == b,
        (HostType::String | HostType::StringLiteral(_), HostType::String) => true,
        (HostType::StringLiteral(a), HostType::StringLiteral(b)) => a == b,
        (HostType::Null, HostType::Null) => true,
        (HostType::Undefined, HostType::Undefined | HostType::Void) => true,
        (HostType::Void, HostType::Void) => true,

        (HostType::Array(_), HostType::Array(None)) => true,
        (HostType::Array(None), HostType::Array(Some(_))) => true,
        (HostType::Array(Some(a)), HostType::Array(Some(b))) => is_assignable_to(a, b),

        (HostType::Object | HostType::Array(_) | HostType::Function, HostType::Object) => true,
        (HostType::Function, HostType::Function) => true,
        (HostType::Named(a), HostType::Named(b)) => a == b,
        (HostType::Named(_), HostType::Object) => true,
        _ => false,
    }
}
