//! ML Parser Lexer
//!
//! HTML fragment tokenizer. Text and attribute values are kept exactly as
//! written (no entity decoding) so that callers can re-emit them verbatim.

use super::html_tags::{get_html_tag_definition, TagContentType};
use super::tokens::{Token, TokenType};
use crate::chars;
use crate::parse_util::{ParseError, ParseSourceFile};

/// Tokenization result
#[derive(Debug, Clone)]
pub struct TokenizeResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<ParseError>,
}

/// Main tokenization function
pub fn tokenize(file: &ParseSourceFile) -> TokenizeResult {
    let mut tokenizer = Tokenizer::new(file);
    tokenizer.tokenize();
    TokenizeResult {
        tokens: tokenizer.tokens,
        errors: tokenizer.errors,
    }
}

struct Tokenizer<'f> {
    file: &'f ParseSourceFile,
    input: &'f str,
    offset: usize,
    tokens: Vec<Token>,
    errors: Vec<ParseError>,
}

impl<'f> Tokenizer<'f> {
    fn new(file: &'f ParseSourceFile) -> Self {
        Tokenizer {
            file,
            input: &file.content,
            offset: 0,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn peek(&self) -> char {
        self.input[self.offset..].chars().next().unwrap_or(chars::EOF)
    }

    fn peek_at(&self, n: usize) -> char {
        self.input[self.offset..].chars().nth(n).unwrap_or(chars::EOF)
    }

    fn at_eof(&self) -> bool {
        self.offset >= self.input.len()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.input[self.offset..].chars().next() {
            self.offset += ch.len_utf8();
        }
    }

    fn starts_with(&self, s: &str) -> bool {
        self.input[self.offset..].starts_with(s)
    }

    fn skip_whitespace(&mut self) {
        while !self.at_eof() && chars::is_whitespace(self.peek()) {
            self.advance();
        }
    }

    fn push(&mut self, token_type: TokenType, parts: Vec<String>, start: usize) {
        let span = self.file.span(start, self.offset);
        self.tokens.push(Token::new(token_type, parts, span));
    }

    fn error(&mut self, start: usize, msg: impl Into<String>) {
        let span = self.file.span(start, self.offset.max(start));
        self.errors.push(ParseError::new(span, msg));
    }

    fn tokenize(&mut self) {
        while !self.at_eof() {
            let start = self.offset;
            if self.starts_with("<!--") {
                self.consume_comment(start);
            } else if self.starts_with("</") && chars::is_ascii_letter(self.peek_at(2)) {
                self.consume_tag_close(start);
            } else if self.starts_with("<!") {
                self.consume_doc_type(start);
            } else if self.peek() == chars::LT && chars::is_ascii_letter(self.peek_at(1)) {
                self.consume_tag_open(start);
            } else {
                self.consume_text(start);
            }
        }
        let end = self.offset;
        self.push(TokenType::Eof, Vec::new(), end);
    }

    fn consume_comment(&mut self, start: usize) {
        self.offset += "<!--".len();
        let body_start = self.offset;
        match self.input[self.offset..].find("-->") {
            Some(rel) => {
                let body = self.input[body_start..body_start + rel].to_string();
                self.offset = body_start + rel + "-->".len();
                self.push(TokenType::Comment, vec![body], start);
            }
            None => {
                let body = self.input[body_start..].to_string();
                self.offset = self.input.len();
                self.error(start, "Unterminated comment");
                self.push(TokenType::Comment, vec![body], start);
            }
        }
    }

    fn consume_doc_type(&mut self, start: usize) {
        self.offset += "<!".len();
        let content_start = self.offset;
        let rel = self.input[self.offset..]
            .find(chars::GT)
            .unwrap_or(self.input.len() - self.offset);
        let content = self.input[content_start..content_start + rel].to_string();
        self.offset = (content_start + rel + 1).min(self.input.len());
        self.push(TokenType::DocType, vec![content], start);
    }

    fn consume_name(&mut self) -> String {
        let start = self.offset;
        while !self.at_eof() && !chars::is_name_end(self.peek()) {
            self.advance();
        }
        self.input[start..self.offset].to_string()
    }

    fn consume_tag_close(&mut self, start: usize) {
        self.offset += "</".len();
        let name = self.consume_name();
        self.skip_whitespace();
        if self.peek() == chars::GT {
            self.advance();
        } else {
            self.error(start, format!("Unexpected character in closing tag \"{}\"", name));
            while !self.at_eof() && self.peek() != chars::GT {
                self.advance();
            }
            self.advance();
        }
        self.push(TokenType::TagClose, vec![name], start);
    }

    fn consume_tag_open(&mut self, start: usize) {
        self.advance();
        let name = self.consume_name();
        self.push(TokenType::TagOpenStart, vec![name.clone()], start);

        loop {
            self.skip_whitespace();
            let attr_start = self.offset;
            if self.at_eof() {
                self.error(start, format!("Unterminated start tag \"{}\"", name));
                return;
            }
            if self.peek() == chars::GT {
                self.advance();
                self.push(TokenType::TagOpenEnd, Vec::new(), attr_start);
                break;
            }
            if self.starts_with("/>") {
                self.offset += "/>".len();
                self.push(TokenType::TagOpenEndVoid, Vec::new(), attr_start);
                return;
            }
            if self.peek() == chars::SLASH {
                self.advance();
                continue;
            }
            self.consume_attribute(attr_start);
        }

        let content_type = get_html_tag_definition(&name).content_type;
        if content_type != TagContentType::ParsableData {
            self.consume_raw_text(&name);
        }
    }

    fn consume_attribute(&mut self, start: usize) {
        let name = self.consume_name();
        if name.is_empty() {
            // A stray quote or `=` where a name was expected.
            self.advance();
            self.error(start, "Unexpected character in attribute name");
            return;
        }
        self.push(TokenType::AttrName, vec![name], start);

        let before_value = self.offset;
        self.skip_whitespace();
        if self.peek() != chars::EQ {
            self.offset = before_value;
            return;
        }
        self.advance();
        self.skip_whitespace();

        let quote = self.peek();
        if chars::is_quote(quote) {
            let quote_start = self.offset;
            self.advance();
            self.push(TokenType::AttrQuote, vec![quote.to_string()], quote_start);
            let value_start = self.offset;
            match self.input[self.offset..].find(quote) {
                Some(rel) => {
                    self.offset += rel;
                    let value = self.input[value_start..self.offset].to_string();
                    self.push(TokenType::AttrValueText, vec![value], value_start);
                    let close_start = self.offset;
                    self.advance();
                    self.push(TokenType::AttrQuote, vec![quote.to_string()], close_start);
                }
                None => {
                    self.offset = self.input.len();
                    let value = self.input[value_start..].to_string();
                    self.push(TokenType::AttrValueText, vec![value], value_start);
                    self.error(start, "Unterminated attribute value");
                }
            }
        } else {
            let value_start = self.offset;
            while !self.at_eof()
                && !chars::is_whitespace(self.peek())
                && self.peek() != chars::GT
            {
                self.advance();
            }
            let value = self.input[value_start..self.offset].to_string();
            self.push(TokenType::AttrValueText, vec![value], value_start);
        }
    }

    fn consume_raw_text(&mut self, tag_name: &str) {
        let start = self.offset;
        let closing = format!("</{}", tag_name.to_ascii_lowercase());
        let rest = self.input[self.offset..].to_ascii_lowercase();
        let rel = rest.find(&closing).unwrap_or(rest.len());
        self.offset += rel;
        if rel > 0 {
            let text = self.input[start..self.offset].to_string();
            self.push(TokenType::Text, vec![text], start);
        }
    }

    fn consume_text(&mut self, start: usize) {
        self.advance();
        while !self.at_eof() {
            if self.peek() == chars::LT {
                let next = self.peek_at(1);
                if chars::is_ascii_letter(next) || next == chars::SLASH || next == chars::BANG {
                    break;
                }
            }
            self.advance();
        }
        let text = self.input[start..self.offset].to_string();
        self.push(TokenType::Text, vec![text], start);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_types(input: &str) -> Vec<(TokenType, String)> {
        let file = ParseSourceFile::new(input.to_string(), "test.html".to_string());
        tokenize(&file)
            .tokens
            .into_iter()
            .map(|t| (t.token_type, t.value().to_string()))
            .collect()
    }

    #[test]
    fn test_tokenize_element_with_attributes() {
        assert_eq!(
            token_types("<a href=\"x\" .value=y disabled>t</a>"),
            vec![
                (TokenType::TagOpenStart, "a".to_string()),
                (TokenType::AttrName, "href".to_string()),
                (TokenType::AttrQuote, "\"".to_string()),
                (TokenType::AttrValueText, "x".to_string()),
                (TokenType::AttrQuote, "\"".to_string()),
                (TokenType::AttrName, ".value".to_string()),
                (TokenType::AttrValueText, "y".to_string()),
                (TokenType::AttrName, "disabled".to_string()),
                (TokenType::TagOpenEnd, String::new()),
                (TokenType::Text, "t".to_string()),
                (TokenType::TagClose, "a".to_string()),
                (TokenType::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_tokenize_self_closing_and_comment() {
        assert_eq!(
            token_types("<br/><!-- c -->"),
            vec![
                (TokenType::TagOpenStart, "br".to_string()),
                (TokenType::TagOpenEndVoid, String::new()),
                (TokenType::Comment, " c ".to_string()),
                (TokenType::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_less_than_in_text() {
        assert_eq!(
            token_types("a < b"),
            vec![
                (TokenType::Text, "a < b".to_string()),
                (TokenType::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn test_raw_text_element() {
        let tokens = token_types("<style>a < b { }</style>");
        assert_eq!(tokens[2], (TokenType::Text, "a < b { }".to_string()));
        assert_eq!(tokens[3], (TokenType::TagClose, "style".to_string()));
    }

    #[test]
    fn test_unterminated_attribute_value_is_an_error() {
        let file = ParseSourceFile::new("<a href=\"x".to_string(), "t".to_string());
        let result = tokenize(&file);
        assert!(!result.errors.is_empty());
    }
}
