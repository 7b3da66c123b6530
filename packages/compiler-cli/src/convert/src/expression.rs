//! Expression converter
//!
//! Translates the allow-listed subset of TypeScript expressions into Soy
//! expressions. Anything outside the subset is reported once and replaced by
//! an error marker.

use super::context::ConversionContext;
use super::scope::Scope;
use oxc_ast::ast;
use oxc_span::GetSpan;
use oxc_syntax::operator::{BinaryOperator, LogicalOperator, UnaryOperator};
use soy_compiler::output::soy_ast::{self as soy, BinaryOperator as SoyBinary, UnaryOperator as SoyUnary};

pub const STR_LEN: &str = "strLen";
pub const LIST_LENGTH: &str = "length";
pub const STR_CONTAINS: &str = "strContains";

fn binary_operator(op: BinaryOperator) -> Option<SoyBinary> {
    Some(match op {
        BinaryOperator::Equality => SoyBinary::Equals,
        BinaryOperator::Inequality => SoyBinary::NotEquals,
        BinaryOperator::LessThan => SoyBinary::Lower,
        BinaryOperator::LessEqualThan => SoyBinary::LowerEquals,
        BinaryOperator::GreaterThan => SoyBinary::Bigger,
        BinaryOperator::GreaterEqualThan => SoyBinary::BiggerEquals,
        BinaryOperator::Addition => SoyBinary::Plus,
        BinaryOperator::Subtraction => SoyBinary::Minus,
        BinaryOperator::Multiplication => SoyBinary::Multiply,
        BinaryOperator::Division => SoyBinary::Divide,
        BinaryOperator::Remainder => SoyBinary::Modulo,
        _ => return None,
    })
}

impl<'a> ConversionContext<'a, '_> {
    pub fn convert_expression(&mut self, expr: &ast::Expression<'a>, scope: &Scope) -> soy::Expression {
        match expr {
            ast::Expression::ParenthesizedExpression(paren) => {
                soy::paren(self.convert_expression(&paren.expression, scope))
            }
            ast::Expression::Identifier(ident) => self.convert_identifier(ident, scope),
            ast::Expression::StringLiteral(lit) => soy::string_literal(lit.value.as_str()),
            ast::Expression::NumericLiteral(lit) => soy::number_literal(lit.value),
            ast::Expression::BooleanLiteral(lit) => soy::bool_literal(lit.value),
            ast::Expression::NullLiteral(_) => soy::null_literal(),
            ast::Expression::ObjectExpression(obj) => self.convert_object(obj, scope),
            ast::Expression::BinaryExpression(bin) => self.convert_binary(bin, scope),
            ast::Expression::LogicalExpression(logical) => {
                let op = match logical.operator {
                    LogicalOperator::And => SoyBinary::And,
                    LogicalOperator::Or => SoyBinary::Or,
                    LogicalOperator::Coalesce => return self.unsupported(expr),
                };
                let lhs = self.convert_expression(&logical.left, scope);
                let rhs = self.convert_expression(&logical.right, scope);
                soy::binary(op, lhs, rhs)
            }
            ast::Expression::UnaryExpression(unary) => {
                let op = match unary.operator {
                    UnaryOperator::LogicalNot => SoyUnary::Not,
                    UnaryOperator::UnaryNegation => SoyUnary::Minus,
                    _ => return self.unsupported(expr),
                };
                soy::unary(op, self.convert_expression(&unary.argument, scope))
            }
            ast::Expression::ConditionalExpression(cond) => {
                let condition = self.convert_expression(&cond.test, scope);
                let when_true = self.convert_expression(&cond.consequent, scope);
                let when_false = self.convert_expression(&cond.alternate, scope);
                soy::ternary(condition, when_true, when_false)
            }
            ast::Expression::StaticMemberExpression(member) => self.convert_member(member, scope),
            ast::Expression::CallExpression(call) => self.convert_call(expr, call, scope),
            _ => self.unsupported(expr),
        }
    }

    pub fn unsupported(&mut self, expr: &ast::Expression<'a>) -> soy::Expression {
        let excerpt = self.excerpt(expr.span());
        self.error_expr(expr.span(), format!("unsupported expression: `{}`", excerpt))
    }

    fn convert_identifier(&mut self, ident: &ast::IdentifierReference<'a>, scope: &Scope) -> soy::Expression {
        match scope.resolve(ident, self.scoping) {
            Ok(binding) => soy::variable(binding.name.clone()),
            // The global `undefined`; a shadowing binding would have resolved.
            Err(_) if ident.name == "undefined" && self.symbol_of(ident).is_none() => {
                soy::null_literal()
            }
            Err(err) => self.error_expr(ident.span, err.to_string()),
        }
    }

    fn convert_binary(&mut self, bin: &ast::BinaryExpression<'a>, scope: &Scope) -> soy::Expression {
        if matches!(
            bin.operator,
            BinaryOperator::StrictEquality | BinaryOperator::StrictInequality
        ) {
            return self.error_expr(
                bin.span,
                format!("{} is disallowed, use == or != instead", bin.operator.as_str()),
            );
        }
        let Some(op) = binary_operator(bin.operator) else {
            return self.error_expr(
                bin.span,
                format!("unsupported operator `{}`", bin.operator.as_str()),
            );
        };
        let lhs = self.convert_expression(&bin.left, scope);
        let rhs = self.convert_expression(&bin.right, scope);
        soy::binary(op, lhs, rhs)
    }

    fn convert_object(&mut self, obj: &ast::ObjectExpression<'a>, scope: &Scope) -> soy::Expression {
        let mut entries = Vec::new();
        for property in &obj.properties {
            let ast::ObjectPropertyKind::ObjectProperty(prop) = property else {
                return self.error_expr(
                    property.span(),
                    "spread properties are not supported in object literals",
                );
            };
            if prop.method || prop.computed || prop.kind != ast::PropertyKind::Init {
                return self.error_expr(
                    prop.span,
                    "object literals may only contain plain `key: value` properties",
                );
            }
            let key = match &prop.key {
                ast::PropertyKey::StaticIdentifier(id) => id.name.to_string(),
                ast::PropertyKey::StringLiteral(lit) => lit.value.to_string(),
                _ => {
                    return self.error_expr(
                        prop.key.span(),
                        "object literal keys must be identifiers or strings",
                    )
                }
            };
            let value = self.convert_expression(&prop.value, scope);
            entries.push((key, value));
        }
        soy::Expression::Record(entries)
    }

    fn convert_member(&mut self, member: &ast::StaticMemberExpression<'a>, scope: &Scope) -> soy::Expression {
        let name = member.property.name.as_str();
        if let ast::Expression::ThisExpression(_) = &member.object {
            return match scope.resolve_property(name) {
                Ok(_) => soy::variable(name),
                Err(err) => self.error_expr(member.span, err.to_string()),
            };
        }

        if name == "length" {
            let ty = self.type_of(&member.object, scope);
            if self.is_string_type(&ty) {
                let receiver = self.convert_expression(&member.object, scope);
                return soy::function_call(STR_LEN, vec![receiver]);
            }
            if self.is_list_type(&ty) {
                let receiver = self.convert_expression(&member.object, scope);
                return soy::function_call(LIST_LENGTH, vec![receiver]);
            }
        }

        let receiver = self.convert_expression(&member.object, scope);
        soy::property_access(receiver, name)
    }

    fn convert_call(
        &mut self,
        expr: &ast::Expression<'a>,
        call: &ast::CallExpression<'a>,
        scope: &Scope,
    ) -> soy::Expression {
        if let ast::Expression::StaticMemberExpression(member) = &call.callee {
            if member.property.name == "includes" && call.arguments.len() == 1 {
                let ty = self.type_of(&member.object, scope);
                let needle = call.arguments[0].as_expression();
                if let Some(needle) = needle.filter(|_| self.is_string_type(&ty)) {
                    let receiver = self.convert_expression(&member.object, scope);
                    let needle = self.convert_expression(needle, scope);
                    return soy::function_call(STR_CONTAINS, vec![receiver, needle]);
                }
            }
        }
        self.unsupported(expr)
    }
}
