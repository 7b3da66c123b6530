//! Soy Output AST
//!
//! Commands and expressions of the Closure Templates language that the
//! converter produces. Nodes are plain data; serialization lives in
//! [`super::soy_emitter`].

/// Placeholder for a construct that could not be converted. A diagnostic has
/// always been recorded when one of these is created; serializing it fails.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorMarker {
    pub message: String,
}

impl ErrorMarker {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorMarker {
            message: message.into(),
        }
    }
}

//// Commands

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `{namespace a.b.c}`
    Namespace(String),
    /// `{template .name}...{/template}`
    Template(TemplateCmd),
    /// `{@param name: type}`
    Param(ParamDecl),
    /// Literal markup. Soy braces are escaped on output.
    RawText(String),
    /// `{expr}`
    Print(Expression),
    /// `{if cond}...{else}...{/if}`
    If(IfCmd),
    /// `{for $var in list}...{/for}`
    For(ForCmd),
    /// `{let $name: value /}`
    Let(LetCmd),
    /// `{call .template}...{/call}`
    Call(CallCmd),
    Error(ErrorMarker),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateCmd {
    pub name: String,
    pub body: Vec<Command>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamDecl {
    pub name: String,
    pub type_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfCmd {
    pub condition: Expression,
    pub then_commands: Vec<Command>,
    pub else_commands: Option<Vec<Command>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForCmd {
    pub var_name: String,
    pub list: Expression,
    pub body: Vec<Command>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetCmd {
    pub name: String,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallCmd {
    pub template: String,
    pub params: Vec<CallParam>,
}

/// Content kind of a block call parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Html,
    Text,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Html => "html",
            ContentKind::Text => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CallParam {
    /// `{param name: value /}`
    Value { name: String, value: Expression },
    /// `{param name kind="html"}...{/param}`
    Block {
        name: String,
        kind: ContentKind,
        body: Vec<Command>,
    },
}

//// Expressions

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    And,
    Or,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Lower,
    Bigger,
    LowerEquals,
    BiggerEquals,
    Equals,
    NotEquals,
}

impl BinaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOperator::And => "and",
            BinaryOperator::Or => "or",
            BinaryOperator::Plus => "+",
            BinaryOperator::Minus => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Lower => "<",
            BinaryOperator::Bigger => ">",
            BinaryOperator::LowerEquals => "<=",
            BinaryOperator::BiggerEquals => ">=",
            BinaryOperator::Equals => "==",
            BinaryOperator::NotEquals => "!=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Not,
    Minus,
}

impl UnaryOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOperator::Not => "not ",
            UnaryOperator::Minus => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
    Bool(bool),
    Null,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// `$name`
    Variable(String),
    Literal(Literal),
    Binary {
        op: BinaryOperator,
        lhs: Box<Expression>,
        rhs: Box<Expression>,
    },
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },
    Paren(Box<Expression>),
    Ternary {
        condition: Box<Expression>,
        when_true: Box<Expression>,
        when_false: Box<Expression>,
    },
    /// `receiver.name`
    PropertyAccess {
        receiver: Box<Expression>,
        name: String,
    },
    /// Builtin function call, e.g. `strLen($s)`
    FunctionCall { name: String, args: Vec<Expression> },
    /// `record(key: value, ...)`
    Record(Vec<(String, Expression)>),
    Error(ErrorMarker),
}

// Constructors used throughout the converter

pub fn variable(name: impl Into<String>) -> Expression {
    Expression::Variable(name.into())
}

pub fn string_literal(value: impl Into<String>) -> Expression {
    Expression::Literal(Literal::String(value.into()))
}

pub fn number_literal(value: f64) -> Expression {
    Expression::Literal(Literal::Number(value))
}

pub fn bool_literal(value: bool) -> Expression {
    Expression::Literal(Literal::Bool(value))
}

pub fn null_literal() -> Expression {
    Expression::Literal(Literal::Null)
}

pub fn binary(op: BinaryOperator, lhs: Expression, rhs: Expression) -> Expression {
    Expression::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

pub fn unary(op: UnaryOperator, operand: Expression) -> Expression {
    Expression::Unary {
        op,
        operand: Box::new(operand),
    }
}

pub fn paren(inner: Expression) -> Expression {
    Expression::Paren(Box::new(inner))
}

pub fn ternary(condition: Expression, when_true: Expression, when_false: Expression) -> Expression {
    Expression::Ternary {
        condition: Box::new(condition),
        when_true: Box::new(when_true),
        when_false: Box::new(when_false),
    }
}

pub fn property_access(receiver: Expression, name: impl Into<String>) -> Expression {
    Expression::PropertyAccess {
        receiver: Box::new(receiver),
        name: name.into(),
    }
}

pub fn function_call(name: impl Into<String>, args: Vec<Expression>) -> Expression {
    Expression::FunctionCall {
        name: name.into(),
        args,
    }
}

pub fn error_expr(message: impl Into<String>) -> Expression {
    Expression::Error(ErrorMarker::new(message))
}

impl Expression {
    /// Whether this expression or any sub-expression is an error marker.
    pub fn has_error(&self) -> bool {
        match self {
            Expression::Error(_) => true,
            Expression::Variable(_) | Expression::Literal(_) => false,
            Expression::Binary { lhs, rhs, .. } => lhs.has_error() || rhs.has_error(),
            Expression::Unary { operand, .. } => operand.has_error(),
            Expression::Paren(inner) => inner.has_error(),
            Expression::Ternary {
                condition,
                when_true,
                when_false,
            } => condition.has_error() || when_true.has_error() || when_false.has_error(),
            Expression::PropertyAccess { receiver, .. } => receiver.has_error(),
            Expression::FunctionCall { args, .. } => args.iter().any(Expression::has_error),
            Expression::Record(entries) => entries.iter().any(|(_, value)| value.has_error()),
        }
    }
}

impl Command {
    /// Whether this command or anything nested in it is an error marker.
    pub fn has_error(&self) -> bool {
        match self {
            Command::Error(_) => true,
            Command::Namespace(_) | Command::Param(_) | Command::RawText(_) => false,
            Command::Template(template) => template.body.iter().any(Command::has_error),
            Command::Print(expr) => expr.has_error(),
            Command::If(if_cmd) => {
                if_cmd.condition.has_error()
                    || if_cmd.then_commands.iter().any(Command::has_error)
                    || if_cmd
                        .else_commands
                        .as_ref()
                        .is_some_and(|cmds| cmds.iter().any(Command::has_error))
            }
            Command::For(for_cmd) => {
                for_cmd.list.has_error() || for_cmd.body.iter().any(Command::has_error)
            }
            Command::Let(let_cmd) => let_cmd.value.has_error(),
            Command::Call(call) => call.params.iter().any(|param| match param {
                CallParam::Value { value, .. } => value.has_error(),
                CallParam::Block { body, .. } => body.iter().any(Command::has_error),
            }),
        }
    }
}
