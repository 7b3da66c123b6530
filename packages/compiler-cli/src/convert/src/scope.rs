//! Scope resolver
//!
//! A template scope is an immutable chain of frames, innermost first. Inner
//! bindings are added by creating a new scope that shares the outer chain, so
//! outer scopes never observe them.

use crate::checker::HostType;
use indexmap::IndexMap;
use oxc_ast::ast;
use oxc_semantic::Scoping;
use oxc_syntax::symbol::SymbolId;
use smallvec::SmallVec;
use std::collections::HashSet;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScopeError {
    #[error("unknown identifier `{0}`")]
    UnknownIdentifier(String),
    #[error("`this` can only be used inside the render method of a component")]
    NoEnclosingClass,
    #[error("`this.{0}`: referenced properties must be annotated as reactive with @property()")]
    NotReactive(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Parameter,
    Local,
}

/// A declaration an identifier can resolve to.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub symbol: SymbolId,
    pub name: String,
    pub ty: HostType,
    pub kind: BindingKind,
}

impl Binding {
    pub fn parameter(symbol: SymbolId, name: impl Into<String>, ty: HostType) -> Self {
        Self {
            symbol,
            name: name.into(),
            ty,
            kind: BindingKind::Parameter,
        }
    }

    pub fn local(symbol: SymbolId, name: impl Into<String>, ty: HostType) -> Self {
        Self {
            symbol,
            name: name.into(),
            ty,
            kind: BindingKind::Local,
        }
    }
}

#[derive(Debug)]
pub enum Frame {
    /// Parameters of one function or lambda. Only identifiers declared as one
    /// of exactly these parameters resolve here.
    Function(Vec<Binding>),
    /// Loop variables and `const` bindings.
    Local(SmallVec<[Binding; 2]>),
}

impl Frame {
    fn lookup(&self, symbol: SymbolId) -> Option<&Binding> {
        match self {
            Frame::Function(params) => params.iter().find(|b| b.symbol == symbol),
            Frame::Local(bindings) => bindings.iter().find(|b| b.symbol == symbol),
        }
    }
}

#[derive(Debug)]
struct FrameNode {
    frame: Frame,
    parent: Option<Rc<FrameNode>>,
}

/// The component class whose render method is being converted.
#[derive(Debug, Clone, Default)]
pub struct ComponentClass {
    pub class_name: String,
    pub tag_name: String,
    /// Reactive properties, most-derived class first.
    pub properties: IndexMap<String, HostType>,
    pub methods: HashSet<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Scope {
    head: Option<Rc<FrameNode>>,
    component: Option<Rc<ComponentClass>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_component(component: Rc<ComponentClass>) -> Self {
        Self {
            head: None,
            component: Some(component),
        }
    }

    fn push(&self, frame: Frame) -> Scope {
        Scope {
            head: Some(Rc::new(FrameNode {
                frame,
                parent: self.head.clone(),
            })),
            component: self.component.clone(),
        }
    }

    /// A new scope with a function-parameter frame innermost.
    pub fn with_function(&self, params: Vec<Binding>) -> Scope {
        self.push(Frame::Function(params))
    }

    /// A new scope with a local-binding frame innermost.
    pub fn with_locals(&self, bindings: impl IntoIterator<Item = Binding>) -> Scope {
        self.push(Frame::Local(bindings.into_iter().collect()))
    }

    pub fn component(&self) -> Option<&ComponentClass> {
        self.component.as_deref()
    }

    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        std::iter::successors(self.head.as_deref(), |node| node.parent.as_deref())
            .map(|node| &node.frame)
    }

    pub fn resolve_symbol(&self, symbol: SymbolId) -> Option<&Binding> {
        self.frames().find_map(|frame| frame.lookup(symbol))
    }

    pub fn resolve(
        &self,
        ident: &ast::IdentifierReference<'_>,
        scoping: &Scoping,
    ) -> Result<&Binding, ScopeError> {
        ident
            .reference_id
            .get()
            .and_then(|reference| scoping.get_reference(reference).symbol_id())
            .and_then(|symbol| self.resolve_symbol(symbol))
            .ok_or_else(|| ScopeError::UnknownIdentifier(ident.name.to_string()))
    }

    pub fn is_in_scope(&self, ident: &ast::IdentifierReference<'_>, scoping: &Scoping) -> bool {
        self.resolve(ident, scoping).is_ok()
    }

    /// Resolves `this.<name>` to the type of a reactive property.
    pub fn resolve_property(&self, name: &str) -> Result<&HostType, ScopeError> {
        let component = self.component().ok_or(ScopeError::NoEnclosingClass)?;
        component
            .properties
            .get(name)
            .ok_or_else(|| ScopeError::NotReactive(name.to_string()))
    }
}
