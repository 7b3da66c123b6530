//! ML Parser AST
//!
//! HTML fragment node definitions

use crate::parse_util::ParseSourceSpan;

/// Node type union
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(Text),
    Comment(Comment),
}

impl Node {
    pub fn source_span(&self) -> &ParseSourceSpan {
        match self {
            Node::Element(el) => &el.source_span,
            Node::Text(text) => &text.source_span,
            Node::Comment(comment) => &comment.source_span,
        }
    }
}

/// Text node. `value` is the raw source text, entities undecoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub value: String,
    pub source_span: ParseSourceSpan,
}

/// Attribute node
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    /// Raw attribute value; empty for value-less attributes.
    pub value: String,
    /// Quote character used around the value, if any.
    pub quote: Option<char>,
    pub source_span: ParseSourceSpan,
    pub key_span: ParseSourceSpan,
    pub value_span: Option<ParseSourceSpan>,
}

impl Attribute {
    pub fn has_value(&self) -> bool {
        self.value_span.is_some()
    }
}

/// Element node
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Node>,
    pub is_self_closing: bool,
    pub is_void: bool,
    pub source_span: ParseSourceSpan,
    pub start_source_span: ParseSourceSpan,
    /// Present only when the source contained an explicit end tag.
    pub end_source_span: Option<ParseSourceSpan>,
}

/// Comment node
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub value: String,
    pub source_span: ParseSourceSpan,
}

/// Visitor trait for traversing AST
pub trait Visitor {
    fn visit_element(&mut self, element: &Element) {
        self.visit_attributes(&element.attrs);
        visit_all(self, &element.children);
    }

    fn visit_attributes(&mut self, attrs: &[Attribute]) {
        for attr in attrs {
            self.visit_attribute(attr);
        }
    }

    fn visit_attribute(&mut self, _attribute: &Attribute) {}

    fn visit_text(&mut self, _text: &Text) {}

    fn visit_comment(&mut self, _comment: &Comment) {}
}

/// Visit all nodes in document order
pub fn visit_all<V: Visitor + ?Sized>(visitor: &mut V, nodes: &[Node]) {
    for node in nodes {
        match node {
            Node::Element(el) => visitor.visit_element(el),
            Node::Text(text) => visitor.visit_text(text),
            Node::Comment(comment) => visitor.visit_comment(comment),
        }
    }
}
