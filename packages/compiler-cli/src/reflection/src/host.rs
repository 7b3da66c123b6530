use oxc_ast::ast;
use oxc_syntax::symbol::SymbolId;
use oxc_span::Span;

/// Metadata extracted from an instance of a decorator on another declaration.
#[derive(Debug, Clone)]
pub struct Decorator<'a> {
    /// Name by which the decorator was invoked in the user's code.
    pub name: String,

    /// Oxc AST reference to the decorator itself.
    pub node: &'a ast::Decorator<'a>,

    /// Arguments of the invocation, or `None` for `@decorator` without parens.
    pub args: Option<Vec<&'a ast::Expression<'a>>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassMemberKind {
    Constructor,
    Getter,
    Setter,
    Property,
    Method,
}

#[derive(Debug, Clone)]
pub struct ClassMember<'a> {
    pub node: &'a ast::ClassElement<'a>,
    pub kind: ClassMemberKind,
    pub name: String,
    pub type_node: Option<&'a ast::TSTypeAnnotation<'a>>,
    pub is_static: bool,
    pub decorators: Vec<Decorator<'a>>,
    /// Function value of methods and accessors.
    pub function: Option<&'a ast::Function<'a>>,
}

impl ClassMember<'_> {
    pub fn has_decorator(&self, name: &str) -> bool {
        self.decorators.iter().any(|d| d.name == name)
    }
}

/// A function declaration, function expression or arrow function.
#[derive(Debug, Clone, Copy)]
pub enum FunctionNode<'a> {
    Function(&'a ast::Function<'a>),
    Arrow(&'a ast::ArrowFunctionExpression<'a>),
}

impl<'a> FunctionNode<'a> {
    pub fn span(&self) -> Span {
        match self {
            FunctionNode::Function(func) => func.span,
            FunctionNode::Arrow(arrow) => arrow.span,
        }
    }

    pub fn params(&self) -> &'a ast::FormalParameters<'a> {
        match self {
            FunctionNode::Function(func) => &func.params,
            FunctionNode::Arrow(arrow) => &arrow.params,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FunctionDefinition<'a> {
    pub node: FunctionNode<'a>,
    pub body: Option<&'a ast::FunctionBody<'a>>,
    /// Arrow functions with an expression body: `body` then holds a single
    /// expression statement.
    pub is_expression_body: bool,
    pub parameters: Vec<Parameter<'a>>,
    pub has_rest_parameter: bool,
}

impl<'a> FunctionDefinition<'a> {
    /// The expression of an expression-bodied arrow function.
    pub fn expression_body(&self) -> Option<&'a ast::Expression<'a>> {
        if !self.is_expression_body {
            return None;
        }
        match self.body?.statements.first()? {
            ast::Statement::ExpressionStatement(stmt) => Some(&stmt.expression),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Parameter<'a> {
    /// `None` for destructuring patterns.
    pub name: Option<String>,
    pub symbol: Option<SymbolId>,
    pub node: &'a ast::FormalParameter<'a>,
    pub type_node: Option<&'a ast::TSTypeAnnotation<'a>>,
}

#[derive(Debug, Clone)]
pub struct Import<'a> {
    /// Exported name in the source module.
    pub name: String,
    /// Local binding name.
    pub local_name: String,
    pub symbol: Option<SymbolId>,
    pub from: String,
    pub node: &'a ast::ImportDeclaration<'a>,
}

/// What a top-level statement declares.
#[derive(Debug, Clone)]
pub enum DeclarationKind<'a> {
    /// `function f() {}` or `const f = () => ...`.
    Function {
        name: String,
        symbol: Option<SymbolId>,
        definition: FunctionDefinition<'a>,
    },
    Class(&'a ast::Class<'a>),
    /// A binding whose value is not a function.
    Variable { name: String },
}

#[derive(Debug, Clone)]
pub struct Declaration<'a> {
    pub kind: DeclarationKind<'a>,
    /// Span of the statement, `export` keyword included.
    pub span: Span,
    /// Start of the statement's leading trivia: its leading comments are
    /// those between here and the statement itself.
    pub leading_start: u32,
}

impl Declaration<'_> {
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            DeclarationKind::Function { name, .. } | DeclarationKind::Variable { name } => {
                Some(name)
            }
            DeclarationKind::Class(class) => class.id.as_ref().map(|id| id.name.as_str()),
        }
    }
}

/// Abstracts reflection operations on the AST.
pub trait ReflectionHost<'a> {
    fn get_decorators_of_class(&self, clazz: &'a ast::Class<'a>) -> Vec<Decorator<'a>>;

    fn get_members_of_class(&self, clazz: &'a ast::Class<'a>) -> Vec<ClassMember<'a>>;

    fn get_definition_of_function(&self, node: FunctionNode<'a>) -> FunctionDefinition<'a>;

    /// Name of the directly extended class when the `extends` clause is a
    /// plain identifier.
    fn get_base_class_name(&self, clazz: &'a ast::Class<'a>) -> Option<&'a str>;

    fn get_imports(&self) -> Vec<Import<'a>>;

    /// Top-level declarations in source order, `export` forms included.
    fn get_declarations(&self) -> Vec<Declaration<'a>>;

    /// Whether the JSDoc comment directly preceding `declaration` carries
    /// `@tag`.
    fn has_jsdoc_tag(&self, declaration: &Declaration<'a>, tag: &str) -> bool;
}
