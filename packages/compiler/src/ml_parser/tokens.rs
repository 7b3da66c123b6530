//! ML Parser Tokens

use crate::parse_util::ParseSourceSpan;
use serde::{Deserialize, Serialize};

/// Token types produced by the markup lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum TokenType {
    /// `<name`, parts: `[name]`
    TagOpenStart,
    /// `>`
    TagOpenEnd,
    /// `/>`
    TagOpenEndVoid,
    /// `</name>`, parts: `[name]`
    TagClose,
    /// Raw text, parts: `[text]`
    Text,
    /// `<!-- ... -->`, parts: `[comment body]`
    Comment,
    /// `<!...>`, parts: `[content]`
    DocType,
    /// Attribute name, parts: `[name]`
    AttrName,
    /// Opening or closing quote of an attribute value, parts: `[quote]`
    AttrQuote,
    /// Attribute value text, parts: `[raw value]`
    AttrValueText,
    Eof,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub token_type: TokenType,
    pub parts: Vec<String>,
    pub source_span: ParseSourceSpan,
}

impl Token {
    pub fn new(token_type: TokenType, parts: Vec<String>, source_span: ParseSourceSpan) -> Self {
        Token {
            token_type,
            parts,
            source_span,
        }
    }

    /// First part of the token, or the empty string for part-less tokens.
    pub fn value(&self) -> &str {
        self.parts.first().map(String::as_str).unwrap_or_default()
    }
}
