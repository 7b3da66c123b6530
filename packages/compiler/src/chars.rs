/*
 * Character Codes
 */

//! Character constants and predicates used by the markup lexer

pub const EOF: char = '\0';
pub const TAB: char = '\t';
pub const LF: char = '\n';
pub const NEWLINE: char = '\n';
pub const VTAB: char = '\x0B';
pub const FF: char = '\x0C';
pub const CR: char = '\r';
pub const SPACE: char = ' ';
pub const NBSP: char = '\u{00A0}';

pub const BANG: char = '!';
pub const DQ: char = '"';
pub const SQ: char = '\'';
pub const MINUS: char = '-';
pub const SLASH: char = '/';
pub const LT: char = '<';
pub const EQ: char = '=';
pub const GT: char = '>';
pub const QUESTION: char = '?';

pub const LBRACE: char = '{';
pub const RBRACE: char = '}';

pub fn is_whitespace(code: char) -> bool {
    matches!(code, TAB | LF | VTAB | FF | CR | SPACE | NBSP)
}

pub fn is_ascii_letter(code: char) -> bool {
    code.is_ascii_alphabetic()
}

pub fn is_quote(code: char) -> bool {
    code == SQ || code == DQ
}

/// Characters that terminate a tag or attribute name.
pub fn is_name_end(code: char) -> bool {
    is_whitespace(code) || matches!(code, GT | LT | SLASH | SQ | DQ | EQ | EOF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_end() {
        assert!(is_name_end('='));
        assert!(is_name_end(' '));
        assert!(!is_name_end('.'));
        assert!(!is_name_end('@'));
        assert!(!is_name_end('?'));
    }
}
