//! Conversion context
//!
//! Everything the converters share while working through one source file.

use super::registry::TemplateRegistry;
use super::scope::Scope;
use crate::checker::{AnnotationChecker, HostType, TypeChecker};
use crate::diagnostics::{Diagnostic, DiagnosticBag};
use crate::logging::Logger;
use crate::reflection::{unwrap_parens, TypeScriptReflectionHost};
use oxc_ast::ast;
use oxc_semantic::Scoping;
use oxc_span::Span;
use oxc_syntax::symbol::SymbolId;
use soy_compiler::output::soy_ast::{self as soy, Command, ErrorMarker};
use std::collections::HashSet;

/// Longest source excerpt quoted in a diagnostic message.
const MAX_EXCERPT_LEN: usize = 60;

pub struct ConversionContext<'a, 's> {
    pub file_name: String,
    pub source_text: &'a str,
    pub scoping: &'s Scoping,
    pub checker: &'s AnnotationChecker<'a>,
    pub host: &'s TypeScriptReflectionHost<'a>,
    pub registry: TemplateRegistry,
    /// Bindings of lit's `html` tag imported into this file.
    pub html_tags: HashSet<SymbolId>,
    pub logger: &'s dyn Logger,
    diagnostics: DiagnosticBag,
}

impl<'a, 's> ConversionContext<'a, 's> {
    pub fn new(
        file_name: &str,
        source_text: &'a str,
        scoping: &'s Scoping,
        checker: &'s AnnotationChecker<'a>,
        host: &'s TypeScriptReflectionHost<'a>,
        registry: TemplateRegistry,
        logger: &'s dyn Logger,
    ) -> Self {
        Self {
            file_name: file_name.to_string(),
            source_text,
            scoping,
            checker,
            host,
            registry,
            html_tags: HashSet::new(),
            logger,
            diagnostics: DiagnosticBag::new(file_name, source_text),
        }
    }

    pub fn report_at(&mut self, offset: u32, message: impl Into<String>) {
        let message = message.into();
        self.logger
            .debug(&format!("{}@{}: {}", self.file_name, offset, message));
        self.diagnostics.report(offset, message);
    }

    pub fn report(&mut self, span: Span, message: impl Into<String>) {
        self.report_at(span.start, message);
    }

    /// Reports a diagnostic and returns the marker standing in for the
    /// unconvertible expression.
    pub fn error_expr(&mut self, span: Span, message: impl Into<String>) -> soy::Expression {
        let message = message.into();
        self.report(span, message.clone());
        soy::Expression::Error(ErrorMarker::new(message))
    }

    pub fn error_command(&mut self, span: Span, message: impl Into<String>) -> Command {
        let message = message.into();
        self.report(span, message.clone());
        Command::Error(ErrorMarker::new(message))
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics.into_vec()
    }

    pub fn source_of(&self, span: Span) -> &'a str {
        self.source_text
            .get(span.start as usize..span.end as usize)
            .unwrap_or_default()
    }

    /// Source text of `span` for quoting in messages, shortened if long.
    pub fn excerpt(&self, span: Span) -> String {
        let text = self.source_of(span);
        if text.chars().count() <= MAX_EXCERPT_LEN {
            return text.to_string();
        }
        let mut short: String = text.chars().take(MAX_EXCERPT_LEN).collect();
        short.push_str("...");
        short
    }

    pub fn symbol_of(&self, ident: &ast::IdentifierReference<'_>) -> Option<SymbolId> {
        ident
            .reference_id
            .get()
            .and_then(|reference| self.scoping.get_reference(reference).symbol_id())
    }

    /// Whether `tag` is a reference to lit's `html` template tag.
    pub fn is_html_tag(&self, tag: &ast::Expression<'a>) -> bool {
        match unwrap_parens(tag) {
            ast::Expression::Identifier(ident) => self
                .symbol_of(ident)
                .is_some_and(|symbol| self.html_tags.contains(&symbol)),
            _ => false,
        }
    }

    /// `any` passes every assignability check, so it never selects a
    /// type-specific conversion.
    pub fn is_string_type(&self, ty: &HostType) -> bool {
        !matches!(ty, HostType::Any | HostType::Unknown) && self.checker.is_string(ty)
    }

    pub fn is_list_type(&self, ty: &HostType) -> bool {
        !matches!(ty, HostType::Any | HostType::Unknown) && self.checker.is_list(ty)
    }

    /// Best-effort static type of an expression, used where the conversion
    /// depends on it (`.length`, `.includes`, list element types).
    pub fn type_of(&self, expr: &ast::Expression<'a>, scope: &Scope) -> HostType {
        match expr {
            ast::Expression::ParenthesizedExpression(paren) => self.type_of(&paren.expression, scope),
            ast::Expression::Identifier(ident) => scope
                .resolve(ident, self.scoping)
                .map(|binding| binding.ty.clone())
                .unwrap_or(HostType::Unknown),
            ast::Expression::StringLiteral(_) | ast::Expression::TemplateLiteral(_) => {
                HostType::String
            }
            ast::Expression::NumericLiteral(_) => HostType::Number,
            ast::Expression::BooleanLiteral(_) => HostType::Boolean,
            ast::Expression::NullLiteral(_) => HostType::Null,
            ast::Expression::ArrayExpression(_) => HostType::Array(None),
            ast::Expression::ObjectExpression(_) => HostType::Object,
            ast::Expression::UnaryExpression(unary) => match unary.operator {
                oxc_syntax::operator::UnaryOperator::LogicalNot => HostType::Boolean,
                oxc_syntax::operator::UnaryOperator::UnaryNegation => HostType::Number,
                _ => HostType::Unknown,
            },
            ast::Expression::BinaryExpression(binary) => {
                use oxc_syntax::operator::BinaryOperator as Op;
                match binary.operator {
                    Op::Equality
                    | Op::Inequality
                    | Op::StrictEquality
                    | Op::StrictInequality
                    | Op::LessThan
                    | Op::LessEqualThan
                    | Op::GreaterThan
                    | Op::GreaterEqualThan => HostType::Boolean,
                    Op::Addition => {
                        let lhs = self.type_of(&binary.left, scope);
                        let rhs = self.type_of(&binary.right, scope);
                        if self.is_string_type(&lhs) || self.is_string_type(&rhs) {
                            HostType::String
                        } else {
                            HostType::Number
                        }
                    }
                    _ => HostType::Number,
                }
            }
            ast::Expression::LogicalExpression(logical) => HostType::union([
                self.type_of(&logical.left, scope),
                self.type_of(&logical.right, scope),
            ]),
            ast::Expression::ConditionalExpression(cond) => HostType::union([
                self.type_of(&cond.consequent, scope),
                self.type_of(&cond.alternate, scope),
            ]),
            ast::Expression::StaticMemberExpression(member) => {
                if matches!(member.object, ast::Expression::ThisExpression(_)) {
                    return scope
                        .resolve_property(&member.property.name)
                        .cloned()
                        .unwrap_or(HostType::Unknown);
                }
                if member.property.name == "length" {
                    return HostType::Number;
                }
                HostType::Unknown
            }
            ast::Expression::CallExpression(call) => match &call.callee {
                ast::Expression::StaticMemberExpression(member)
                    if member.property.name == "includes" =>
                {
                    HostType::Boolean
                }
                _ => HostType::Unknown,
            },
            _ => HostType::Unknown,
        }
    }
}
