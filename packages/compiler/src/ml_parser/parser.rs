//! ML Parser
//!
//! Builds an element/text tree out of the lexer's tokens. The parser is
//! forgiving: unclosed elements are closed implicitly at their parent's end tag
//! or at the end of input, and stray closing tags are reported and skipped.

use super::ast::*;
use super::html_tags::get_html_tag_definition;
use super::lexer::tokenize;
use super::tokens::{Token, TokenType};
use crate::parse_util::{ParseError, ParseSourceFile, ParseSourceSpan};

/// Parse tree result
#[derive(Debug, Clone)]
pub struct ParseTreeResult {
    pub root_nodes: Vec<Node>,
    pub errors: Vec<ParseError>,
}

impl ParseTreeResult {
    pub fn new(root_nodes: Vec<Node>, errors: Vec<ParseError>) -> Self {
        ParseTreeResult { root_nodes, errors }
    }
}

/// HTML fragment parser
#[derive(Debug, Default, Clone, Copy)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Parser
    }

    pub fn parse(&self, source: &str, url: &str) -> ParseTreeResult {
        let file = ParseSourceFile::new(source.to_string(), url.to_string());
        self.parse_file(&file)
    }

    pub fn parse_file(&self, file: &ParseSourceFile) -> ParseTreeResult {
        let tokenize_result = tokenize(file);
        let mut builder = TreeBuilder::new(tokenize_result.tokens);
        builder.build();

        let mut errors = tokenize_result.errors;
        errors.extend(builder.errors);
        ParseTreeResult::new(builder.root_nodes, errors)
    }
}

struct TreeBuilder {
    tokens: std::iter::Peekable<std::vec::IntoIter<Token>>,
    root_nodes: Vec<Node>,
    element_stack: Vec<Element>,
    errors: Vec<ParseError>,
}

impl TreeBuilder {
    fn new(tokens: Vec<Token>) -> Self {
        TreeBuilder {
            tokens: tokens.into_iter().peekable(),
            root_nodes: Vec::new(),
            element_stack: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn build(&mut self) {
        while let Some(token) = self.tokens.next() {
            match token.token_type {
                TokenType::TagOpenStart => self.consume_start_tag(token),
                TokenType::TagClose => self.consume_end_tag(token),
                TokenType::Text => self.add_to_parent(Node::Text(Text {
                    value: token.value().to_string(),
                    source_span: token.source_span,
                })),
                TokenType::Comment => self.add_to_parent(Node::Comment(Comment {
                    value: token.value().to_string(),
                    source_span: token.source_span,
                })),
                TokenType::Eof => break,
                // Doctypes carry nothing a fragment needs; stray attribute tokens
                // only appear after lexer errors that were already reported.
                _ => {}
            }
        }

        while let Some(mut element) = self.element_stack.pop() {
            if let Some(last) = element.children.last() {
                element.source_span.end = last.source_span().end;
            }
            self.add_to_parent(Node::Element(element));
        }
    }

    fn add_to_parent(&mut self, node: Node) {
        match self.element_stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.root_nodes.push(node),
        }
    }

    fn consume_start_tag(&mut self, start: Token) {
        let name = start.value().to_string();
        let mut attrs = Vec::new();
        let mut end_span = start.source_span;
        let mut self_closing = false;

        while let Some(token) = self.tokens.peek() {
            match token.token_type {
                TokenType::AttrName => {
                    if let Some(name_token) = self.tokens.next() {
                        attrs.push(self.consume_attr(name_token));
                    }
                }
                TokenType::TagOpenEnd => {
                    end_span = token.source_span;
                    self.tokens.next();
                    break;
                }
                TokenType::TagOpenEndVoid => {
                    end_span = token.source_span;
                    self_closing = true;
                    self.tokens.next();
                    break;
                }
                _ => break,
            }
        }

        let is_void = get_html_tag_definition(&name).is_void;
        let start_source_span = ParseSourceSpan::new(start.source_span.start, end_span.end);
        let element = Element {
            name,
            attrs,
            children: Vec::new(),
            is_self_closing: self_closing,
            is_void,
            source_span: start_source_span,
            start_source_span,
            end_source_span: None,
        };

        if self_closing || is_void {
            self.add_to_parent(Node::Element(element));
        } else {
            self.element_stack.push(element);
        }
    }

    fn consume_attr(&mut self, name_token: Token) -> Attribute {
        let name = name_token.value().to_string();
        let key_span = name_token.source_span;
        let mut end = key_span.end;
        let mut quote = None;
        let mut value = String::new();
        let mut value_span = None;

        if self.peek_is(TokenType::AttrQuote) {
            if let Some(open) = self.tokens.next() {
                quote = open.value().chars().next();
            }
        }
        if self.peek_is(TokenType::AttrValueText) {
            if let Some(text) = self.tokens.next() {
                value = text.value().to_string();
                value_span = Some(text.source_span);
                end = text.source_span.end;
            }
        }
        if quote.is_some() && self.peek_is(TokenType::AttrQuote) {
            if let Some(close) = self.tokens.next() {
                end = close.source_span.end;
            }
        }

        Attribute {
            name,
            value,
            quote,
            source_span: ParseSourceSpan::new(key_span.start, end),
            key_span,
            value_span,
        }
    }

    fn peek_is(&mut self, token_type: TokenType) -> bool {
        self.tokens
            .peek()
            .is_some_and(|t| t.token_type == token_type)
    }

    fn consume_end_tag(&mut self, end: Token) {
        let name = end.value();
        let position = self
            .element_stack
            .iter()
            .rposition(|el| el.name.eq_ignore_ascii_case(name));

        let Some(position) = position else {
            let msg = if get_html_tag_definition(name).is_void {
                format!("Void elements do not have end tags \"{}\"", name)
            } else {
                format!("Unexpected closing tag \"{}\"", name)
            };
            self.errors.push(ParseError::new(end.source_span, msg));
            return;
        };

        // Elements opened after the matching one are closed implicitly.
        while self.element_stack.len() > position + 1 {
            if let Some(mut unclosed) = self.element_stack.pop() {
                unclosed.source_span.end = end.source_span.start;
                self.add_to_parent(Node::Element(unclosed));
            }
        }
        if let Some(mut element) = self.element_stack.pop() {
            element.end_source_span = Some(end.source_span);
            element.source_span.end = end.source_span.end;
            self.add_to_parent(Node::Element(element));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> ParseTreeResult {
        Parser::new().parse(html, "TestComp")
    }

    #[test]
    fn test_parse_nested_elements() {
        let result = parse("<div><span>a</span>b</div>");
        assert!(result.errors.is_empty());
        assert_eq!(result.root_nodes.len(), 1);
        let Node::Element(div) = &result.root_nodes[0] else {
            panic!("expected element");
        };
        assert_eq!(div.name, "div");
        assert_eq!(div.children.len(), 2);
        assert!(div.end_source_span.is_some());
    }

    #[test]
    fn test_void_element_has_no_end_span() {
        let result = parse("<input value=\"x\">after");
        let Node::Element(input) = &result.root_nodes[0] else {
            panic!("expected element");
        };
        assert!(input.is_void);
        assert!(input.end_source_span.is_none());
        assert_eq!(input.attrs[0].value, "x");
        assert_eq!(input.attrs[0].quote, Some('"'));
        assert_eq!(result.root_nodes.len(), 2);
    }

    #[test]
    fn test_unclosed_element_is_closed_implicitly() {
        let result = parse("<div><p>text</div>");
        assert!(result.errors.is_empty());
        let Node::Element(div) = &result.root_nodes[0] else {
            panic!("expected element");
        };
        let Node::Element(p) = &div.children[0] else {
            panic!("expected element");
        };
        assert!(p.end_source_span.is_none());
        assert!(div.end_source_span.is_some());
    }

    #[test]
    fn test_stray_closing_tag_is_reported() {
        let result = parse("</span>text");
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].msg.contains("Unexpected closing tag"));
    }

    #[test]
    fn test_attribute_spans_are_source_accurate() {
        let source = "<a title='x y'>";
        let result = parse(source);
        let Node::Element(a) = &result.root_nodes[0] else {
            panic!("expected element");
        };
        let attr = &a.attrs[0];
        assert_eq!(attr.source_span.text(source), "title='x y'");
        assert_eq!(attr.value_span.map(|s| s.text(source)), Some("x y"));
    }
}
