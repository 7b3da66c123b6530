//! Host types
//!
//! The slice of the TypeScript type system the converter reasons about.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum HostType {
    Any,
    Unknown,
    Never,
    Boolean,
    BooleanLiteral(bool),
    Number,
    NumberLiteral(f64),
    String,
    StringLiteral(String),
    Null,
    Undefined,
    Void,
    /// `T[]` / `Array<T>`; `None` when the element type is not spelled out.
    Array(Option<Box<HostType>>),
    Union(Vec<HostType>),
    /// Object literal types, interfaces and `object`.
    Object,
    Function,
    /// A type reference that could not be resolved within the file.
    Named(String),
}

impl HostType {
    pub fn array_of(element: HostType) -> Self {
        HostType::Array(Some(Box::new(element)))
    }

    /// Builds a union, flattening nested unions and dropping duplicates. A
    /// single remaining member is returned as is.
    pub fn union(members: impl IntoIterator<Item = HostType>) -> Self {
        let mut flat: Vec<HostType> = Vec::new();
        for member in members {
            match member {
                HostType::Union(inner) => {
                    for ty in inner {
                        if !flat.contains(&ty) {
                            flat.push(ty);
                        }
                    }
                }
                ty => {
                    if !flat.contains(&ty) {
                        flat.push(ty);
                    }
                }
            }
        }
        match flat.len() {
            0 => HostType::Never,
            1 => flat.remove(0),
            _ => HostType::Union(flat),
        }
    }

    /// Element type of an array type, if spelled out.
    pub fn element_type(&self) -> Option<&HostType> {
        match self {
            HostType::Array(Some(element)) => Some(element),
            _ => None,
        }
    }
}

impl fmt::Display for HostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostType::Any => write!(f, "any"),
            HostType::Unknown => write!(f, "unknown"),
            HostType::Never => write!(f, "never"),
            HostType::Boolean => write!(f, "boolean"),
            HostType::BooleanLiteral(value) => write!(f, "{}", value),
            HostType::Number => write!(f, "number"),
            HostType::NumberLiteral(value) => write!(f, "{}", value),
            HostType::String => write!(f, "string"),
            HostType::StringLiteral(value) => write!(f, "'{}'", value),
            HostType::Null => write!(f, "null"),
            HostType::Undefined => write!(f, "undefined"),
            HostType::Void => write!(f, "void"),
            HostType::Array(None) => write!(f, "any[]"),
            HostType::Array(Some(element)) => match element.as_ref() {
                HostType::Union(_) => write!(f, "({})[]", element),
                other => write!(f, "{}[]", other),
            },
            HostType::Union(members) => {
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{}", member)?;
                }
                Ok(())
            }
            HostType::Object => write!(f, "object"),
            HostType::Function => write!(f, "Function"),
            HostType::Named(name) => write!(f, "{}", name),
        }
    }
}
