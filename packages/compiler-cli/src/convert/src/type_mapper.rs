//! Type mapper
//!
//! Host type to Soy type name. Only the checks below are made, in this order,
//! and anything else is left to the caller to report.

use crate::checker::{HostType, TypeChecker};

pub const SOY_BOOL: &str = "bool";
pub const SOY_NUMBER: &str = "number";
pub const SOY_STRING: &str = "string";
pub const SOY_NULL: &str = "null";

pub fn map_type(checker: &dyn TypeChecker, ty: &HostType) -> Option<String> {
    if let Some(scalar) = map_scalar(checker, ty) {
        return Some(scalar.to_string());
    }
    if checker.is_list(ty) {
        let element = match ty {
            HostType::Array(Some(element)) if is_concrete(element) => {
                map_scalar(checker, element)
            }
            _ => None,
        };
        return Some(match element {
            Some(element) => format!("list<{}>", element),
            None => "list<?>".to_string(),
        });
    }
    None
}

fn map_scalar(checker: &dyn TypeChecker, ty: &HostType) -> Option<&'static str> {
    if checker.is_boolean(ty) {
        Some(SOY_BOOL)
    } else if checker.is_number(ty) {
        Some(SOY_NUMBER)
    } else if checker.is_string(ty) {
        Some(SOY_STRING)
    } else if checker.is_nullish(ty) {
        Some(SOY_NULL)
    } else {
        None
    }
}

/// `any`, `unknown` and `never` elements do not name a single element type.
fn is_concrete(ty: &HostType) -> bool {
    !matches!(ty, HostType::Any | HostType::Unknown | HostType::Never)
}
