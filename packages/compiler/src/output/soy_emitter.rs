//! Soy Emitter
//!
//! Serializes the Soy output AST. Every node writes its text chunks into an
//! [`EmitterContext`]; reaching an [`ErrorMarker`] aborts serialization with
//! [`EmitError::ErrorMarker`].

use crate::output::soy_ast::*;
use thiserror::Error;

const INDENT_WITH: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    #[error("cannot serialize an unconvertible construct: {message}")]
    ErrorMarker { message: String },
}

impl From<&ErrorMarker> for EmitError {
    fn from(marker: &ErrorMarker) -> Self {
        EmitError::ErrorMarker {
            message: marker.message.clone(),
        }
    }
}

#[derive(Debug, Clone)]
struct EmittedLine {
    parts: Vec<String>,
    indent: usize,
}

impl EmittedLine {
    fn new(indent: usize) -> Self {
        EmittedLine {
            parts: Vec::new(),
            indent,
        }
    }
}

pub struct EmitterContext {
    lines: Vec<EmittedLine>,
    indent: usize,
}

impl Default for EmitterContext {
    fn default() -> Self {
        Self::create_root()
    }
}

impl EmitterContext {
    pub fn create_root() -> Self {
        EmitterContext {
            lines: vec![EmittedLine::new(0)],
            indent: 0,
        }
    }

    fn current_line_mut(&mut self) -> &mut EmittedLine {
        if self.lines.is_empty() {
            self.lines.push(EmittedLine::new(self.indent));
        }
        let last = self.lines.len() - 1;
        &mut self.lines[last]
    }

    pub fn line_is_empty(&self) -> bool {
        self.lines.last().map_or(true, |line| line.parts.is_empty())
    }

    pub fn print(&mut self, part: &str) {
        if !part.is_empty() {
            self.current_line_mut().parts.push(part.to_string());
        }
    }

    pub fn println(&mut self, last_part: &str) {
        self.print(last_part);
        self.lines.push(EmittedLine::new(self.indent));
    }

    /// Ends the current line unless nothing was printed on it yet.
    pub fn ensure_new_line(&mut self) {
        if !self.line_is_empty() {
            self.println("");
        }
    }

    pub fn inc_indent(&mut self) {
        self.indent += 1;
        if self.line_is_empty() {
            self.current_line_mut().indent = self.indent;
        }
    }

    pub fn dec_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        if self.line_is_empty() {
            self.current_line_mut().indent = self.indent;
        }
    }

    pub fn to_source(&self) -> String {
        let mut lines: Vec<String> = self
            .lines
            .iter()
            .map(|line| {
                if line.parts.is_empty() {
                    String::new()
                } else {
                    format!("{}{}", INDENT_WITH.repeat(line.indent), line.parts.concat())
                }
            })
            .collect();
        while lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        let mut source = lines.join("\n");
        source.push('\n');
        source
    }
}

/// Serializes a whole output file: a namespace followed by templates.
pub fn emit_file(commands: &[Command]) -> Result<String, EmitError> {
    let mut ctx = EmitterContext::create_root();
    for command in commands {
        command.emit(&mut ctx)?;
    }
    Ok(ctx.to_source())
}

/// Serializes a sequence of commands without any line structure, as they
/// would appear inside a template body.
pub fn emit_commands(commands: &[Command]) -> Result<String, EmitError> {
    let mut out = String::new();
    for command in commands {
        command.write_inline(&mut out)?;
    }
    Ok(out)
}

impl Command {
    /// Emits top-level structure (namespace, templates, params) on their own
    /// lines; everything else is written inline.
    pub fn emit(&self, ctx: &mut EmitterContext) -> Result<(), EmitError> {
        match self {
            Command::Namespace(name) => {
                ctx.ensure_new_line();
                ctx.println(&format!("{{namespace {}}}", name));
            }
            Command::Template(template) => {
                ctx.ensure_new_line();
                ctx.println("");
                ctx.println(&format!("{{template .{}}}", template.name));
                ctx.inc_indent();
                let (params, body): (Vec<&Command>, Vec<&Command>) = template
                    .body
                    .iter()
                    .partition(|cmd| matches!(cmd, Command::Param(_)));
                for param in params {
                    param.emit(ctx)?;
                }
                let mut inline = String::new();
                for command in body {
                    command.write_inline(&mut inline)?;
                }
                if !inline.is_empty() {
                    ctx.println(&inline);
                }
                ctx.dec_indent();
                ctx.println("{/template}");
            }
            Command::Param(param) => {
                ctx.ensure_new_line();
                ctx.println(&param_decl(param));
            }
            other => {
                let mut inline = String::new();
                other.write_inline(&mut inline)?;
                ctx.print(&inline);
            }
        }
        Ok(())
    }

    fn write_inline(&self, out: &mut String) -> Result<(), EmitError> {
        match self {
            Command::Namespace(name) => out.push_str(&format!("{{namespace {}}}", name)),
            Command::Template(template) => {
                out.push_str(&format!("{{template .{}}}", template.name));
                for command in &template.body {
                    command.write_inline(out)?;
                }
                out.push_str("{/template}");
            }
            Command::Param(param) => out.push_str(&param_decl(param)),
            Command::RawText(text) => out.push_str(&escape_raw_text(text)),
            Command::Print(expr) => {
                out.push('{');
                expr.write(out)?;
                out.push('}');
            }
            Command::If(if_cmd) => {
                out.push_str("{if ");
                if_cmd.condition.write(out)?;
                out.push('}');
                for command in &if_cmd.then_commands {
                    command.write_inline(out)?;
                }
                if let Some(else_commands) = &if_cmd.else_commands {
                    out.push_str("{else}");
                    for command in else_commands {
                        command.write_inline(out)?;
                    }
                }
                out.push_str("{/if}");
            }
            Command::For(for_cmd) => {
                out.push_str(&format!("{{for ${} in ", for_cmd.var_name));
                for_cmd.list.write(out)?;
                out.push('}');
                for command in &for_cmd.body {
                    command.write_inline(out)?;
                }
                out.push_str("{/for}");
            }
            Command::Let(let_cmd) => {
                out.push_str(&format!("{{let ${}: ", let_cmd.name));
                let_cmd.value.write(out)?;
                out.push_str(" /}");
            }
            Command::Call(call) => {
                let callee = callee_name(&call.template);
                if call.params.is_empty() {
                    out.push_str(&format!("{{call {} /}}", callee));
                    return Ok(());
                }
                out.push_str(&format!("{{call {}}}", callee));
                for param in &call.params {
                    match param {
                        CallParam::Value { name, value } => {
                            out.push_str(&format!("{{param {}: ", name));
                            value.write(out)?;
                            out.push_str(" /}");
                        }
                        CallParam::Block { name, kind, body } => {
                            out.push_str(&format!(
                                "{{param {} kind=\"{}\"}}",
                                name,
                                kind.as_str()
                            ));
                            for command in body {
                                command.write_inline(out)?;
                            }
                            out.push_str("{/param}");
                        }
                    }
                }
                out.push_str("{/call}");
            }
            Command::Error(marker) => return Err(marker.into()),
        }
        Ok(())
    }
}

/// Templates of the current namespace are called by their relative name,
/// anything else by its fully qualified one.
fn callee_name(template: &str) -> String {
    if template.contains('.') {
        template.to_string()
    } else {
        format!(".{}", template)
    }
}

fn param_decl(param: &ParamDecl) -> String {
    match &param.type_name {
        Some(type_name) => format!("{{@param {}: {}}}", param.name, type_name),
        None => format!("{{@param {}}}", param.name),
    }
}

impl Expression {
    pub fn write(&self, out: &mut String) -> Result<(), EmitError> {
        match self {
            Expression::Variable(name) => {
                out.push('$');
                out.push_str(name);
            }
            Expression::Literal(literal) => write_literal(literal, out),
            Expression::Binary { op, lhs, rhs } => {
                lhs.write(out)?;
                out.push(' ');
                out.push_str(op.as_str());
                out.push(' ');
                rhs.write(out)?;
            }
            Expression::Unary { op, operand } => {
                out.push_str(op.as_str());
                // `- -$n` would otherwise print as the invalid `--$n`.
                if matches!(
                    operand.as_ref(),
                    Expression::Unary { .. } | Expression::Binary { .. } | Expression::Ternary { .. }
                ) {
                    out.push('(');
                    operand.write(out)?;
                    out.push(')');
                } else {
                    operand.write(out)?;
                }
            }
            Expression::Paren(inner) => {
                out.push('(');
                inner.write(out)?;
                out.push(')');
            }
            Expression::Ternary {
                condition,
                when_true,
                when_false,
            } => {
                condition.write(out)?;
                out.push_str(" ? ");
                when_true.write(out)?;
                out.push_str(" : ");
                when_false.write(out)?;
            }
            Expression::PropertyAccess { receiver, name } => {
                receiver.write(out)?;
                out.push('.');
                out.push_str(name);
            }
            Expression::FunctionCall { name, args } => {
                out.push_str(name);
                out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    arg.write(out)?;
                }
                out.push(')');
            }
            Expression::Record(entries) => {
                out.push_str("record(");
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    out.push_str(key);
                    out.push_str(": ");
                    value.write(out)?;
                }
                out.push(')');
            }
            Expression::Error(marker) => return Err(marker.into()),
        }
        Ok(())
    }

    /// Serializes this expression on its own.
    pub fn to_soy(&self) -> Result<String, EmitError> {
        let mut out = String::new();
        self.write(&mut out)?;
        Ok(out)
    }
}

fn write_literal(literal: &Literal, out: &mut String) {
    match literal {
        Literal::String(value) => {
            out.push('\'');
            out.push_str(&escape_string(value));
            out.push('\'');
        }
        Literal::Number(value) => out.push_str(&format_number(*value)),
        Literal::Bool(value) => out.push_str(if *value { "true" } else { "false" }),
        Literal::Null => out.push_str("null"),
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Escapes a string for a single-quoted Soy string literal.
pub fn escape_string(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Literal braces in template text must be written as `{lb}` / `{rb}`.
pub fn escape_raw_text(text: &str) -> String {
    if !text.contains(['{', '}']) {
        return text.to_string();
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '{' => escaped.push_str("{lb}"),
            '}' => escaped.push_str("{rb}"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
