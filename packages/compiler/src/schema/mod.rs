pub mod reflected_attributes;

pub use reflected_attributes::{get_reflected_attribute, ReflectedAttribute, ANY_ELEMENT};
