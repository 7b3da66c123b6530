//! Function body converter
//!
//! Template bodies are a run of `const` declarations followed by a `return`
//! of the rendered markup. Expression-bodied arrows are treated as a bare
//! `return`.

use super::context::ConversionContext;
use super::scope::{Binding, Scope};
use crate::reflection::{unwrap_parens, FunctionDefinition};
use oxc_ast::ast;
use oxc_span::GetSpan;
use soy_compiler::output::soy_ast::{Command, IfCmd, LetCmd};

const MUST_RETURN: &str = "template functions must return a TemplateResult (an html`...` template)";

/// What a body's returned value may be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// Template functions and render methods: markup only.
    Template,
    /// `.map()` callbacks: anything allowed in a text position.
    Loop,
}

impl<'a> ConversionContext<'a, '_> {
    pub fn convert_body(
        &mut self,
        definition: &FunctionDefinition<'a>,
        scope: &Scope,
        kind: BodyKind,
    ) -> Vec<Command> {
        if let Some(expr) = definition.expression_body() {
            return self.convert_returned(expr, scope, kind);
        }
        let Some(body) = definition.body else {
            return vec![self.error_command(definition.node.span(), MUST_RETURN)];
        };

        let mut commands = Vec::new();
        let mut scope = scope.clone();
        for (index, statement) in body.statements.iter().enumerate() {
            match statement {
                ast::Statement::ReturnStatement(ret) => {
                    match &ret.argument {
                        Some(argument) => {
                            commands.extend(self.convert_returned(argument, &scope, kind))
                        }
                        None => commands.push(self.error_command(ret.span, MUST_RETURN)),
                    }
                    for unreachable in &body.statements[index + 1..] {
                        self.report(unreachable.span(), "unsupported statement");
                    }
                    return commands;
                }
                ast::Statement::VariableDeclaration(declaration)
                    if declaration.kind == ast::VariableDeclarationKind::Const =>
                {
                    for declarator in &declaration.declarations {
                        let (command, binding) = self.convert_const(declarator, &scope);
                        commands.push(command);
                        if let Some(binding) = binding {
                            scope = scope.with_locals([binding]);
                        }
                    }
                }
                _ => self.report(statement.span(), "unsupported statement"),
            }
        }
        commands.push(self.error_command(definition.node.span(), MUST_RETURN));
        commands
    }

    fn convert_returned(
        &mut self,
        expr: &'a ast::Expression<'a>,
        scope: &Scope,
        kind: BodyKind,
    ) -> Vec<Command> {
        if kind == BodyKind::Loop {
            return self.convert_text_part(expr, scope);
        }
        match unwrap_parens(expr) {
            ast::Expression::TaggedTemplateExpression(tagged) => {
                self.convert_tagged_template(tagged, scope)
            }
            ast::Expression::ConditionalExpression(cond) => {
                let condition = self.convert_expression(&cond.test, scope);
                let then_commands = self.convert_returned(&cond.consequent, scope, kind);
                let else_commands = self.convert_returned(&cond.alternate, scope, kind);
                vec![Command::If(IfCmd {
                    condition,
                    then_commands,
                    else_commands: Some(else_commands),
                })]
            }
            _ => vec![self.error_command(expr.span(), MUST_RETURN)],
        }
    }

    /// `const name = value;` becomes `{let $name: value /}` and binds `name`
    /// for the statements after it.
    fn convert_const(
        &mut self,
        declarator: &'a ast::VariableDeclarator<'a>,
        scope: &Scope,
    ) -> (Command, Option<Binding>) {
        let ast::BindingPatternKind::BindingIdentifier(id) = &declarator.id.kind else {
            let command = self.error_command(
                declarator.span,
                "unsupported statement: destructuring declarations cannot be converted",
            );
            return (command, None);
        };
        let Some(init) = &declarator.init else {
            let command = self.error_command(declarator.span, "`const` declarations need a value");
            return (command, None);
        };
        let ty = match declarator.id.type_annotation.as_deref() {
            Some(annotation) => self.checker.lower(&annotation.type_annotation),
            None => self.type_of(init, scope),
        };
        let value = self.convert_expression(init, scope);
        let command = Command::Let(LetCmd {
            name: id.name.to_string(),
            value,
        });
        let binding = id
            .symbol_id
            .get()
            .map(|symbol| Binding::local(symbol, id.name.as_str(), ty));
        (command, binding)
    }
}
