//! Markup converter
//!
//! Converts `html` tagged templates. The template is joined with markers,
//! parsed as an HTML fragment and walked in document order; every marker met
//! on the way consumes the expression it stands for.

use super::context::ConversionContext;
use super::markers::{MarkedTemplate, Segment};
use super::scope::{Binding, Scope};
use super::body::BodyKind;
use crate::checker::HostType;
use crate::reflection::{unwrap_parens, FunctionNode, ReflectionHost};
use oxc_ast::ast;
use oxc_span::GetSpan;
use soy_compiler::ml_parser::ast::{Attribute, Element, Node, Text};
use soy_compiler::ml_parser::Parser;
use soy_compiler::output::soy_ast::{
    self as soy, CallCmd, CallParam, Command, ContentKind, ErrorMarker, ForCmd, IfCmd,
};
use soy_compiler::schema::get_reflected_attribute;

/// Block parameter every component template receives its light DOM in.
pub const CHILDREN_PARAM: &str = "children";

const EVENT_BINDING_MESSAGE: &str =
    "event bindings must be instance method references (`this.method`)";

/// Walk state for one template: which parts were consumed, and where
/// converted commands go. The innermost target collects the children of the
/// component call being built.
struct PartWalk<'t, 'a> {
    expressions: &'a [ast::Expression<'a>],
    template: &'t MarkedTemplate,
    consumed: Vec<bool>,
    next_part: usize,
    targets: Vec<Vec<Command>>,
}

impl<'t, 'a> PartWalk<'t, 'a> {
    fn new(expressions: &'a [ast::Expression<'a>], template: &'t MarkedTemplate) -> Self {
        Self {
            expressions,
            template,
            consumed: vec![false; expressions.len()],
            next_part: 0,
            targets: vec![Vec::new()],
        }
    }

    fn emit(&mut self, command: Command) {
        let Some(target) = self.targets.last_mut() else {
            return;
        };
        if let (Command::RawText(text), Some(Command::RawText(last))) = (&command, target.last_mut()) {
            last.push_str(text);
            return;
        }
        target.push(command);
    }

    fn emit_text(&mut self, text: impl Into<String>) {
        self.emit(Command::RawText(text.into()));
    }

    fn emit_all(&mut self, commands: impl IntoIterator<Item = Command>) {
        for command in commands {
            self.emit(command);
        }
    }

    fn into_commands(mut self) -> Vec<Command> {
        self.targets.pop().unwrap_or_default()
    }
}

/// `data-item-id` to `dataItemId`.
pub fn param_name(attribute_name: &str) -> String {
    let mut name = String::with_capacity(attribute_name.len());
    let mut upper = false;
    for ch in attribute_name.chars() {
        if ch == '-' {
            upper = true;
        } else if upper {
            name.push(ch.to_ascii_uppercase());
            upper = false;
        } else {
            name.push(ch);
        }
    }
    name
}

/// Attribute values are always written double-quoted.
fn escape_quotes(value: &str) -> String {
    value.replace('"', "&quot;")
}

impl<'a> ConversionContext<'a, '_> {
    /// Converts a tagged template found in a text or return position.
    pub fn convert_tagged_template(
        &mut self,
        tagged: &'a ast::TaggedTemplateExpression<'a>,
        scope: &Scope,
    ) -> Vec<Command> {
        if !self.is_html_tag(&tagged.tag) {
            let tag = self.excerpt(tagged.tag.span());
            return vec![self.error_command(
                tagged.tag.span(),
                format!(
                    "template tag `{}` is not lit's `html`; import it from 'lit', 'lit-html' or 'lit-element'",
                    tag
                ),
            )];
        }
        self.convert_markup(&tagged.quasi, scope)
    }

    pub fn convert_markup(&mut self, tpl: &'a ast::TemplateLiteral<'a>, scope: &Scope) -> Vec<Command> {
        let quasis: Vec<(&str, u32)> = tpl
            .quasis
            .iter()
            .map(|quasi| {
                let text = quasi.value.cooked.as_ref().unwrap_or(&quasi.value.raw);
                (text.as_str(), quasi.span.start)
            })
            .collect();
        let expression_starts: Vec<u32> = tpl.expressions.iter().map(|e| e.span().start).collect();
        let template = MarkedTemplate::new(&quasis, &expression_starts);

        let parsed = Parser::new().parse(&template.html, &self.file_name);
        let malformed = !parsed.errors.is_empty();
        for error in &parsed.errors {
            let offset = template.source_offset(error.span.start.offset);
            self.report_at(offset, format!("malformed markup: {}", error.msg));
        }

        let mut walk = PartWalk::new(&tpl.expressions, &template);
        self.convert_nodes(&mut walk, &parsed.root_nodes, scope);

        let unconsumed: Vec<&ast::Expression<'a>> = tpl
            .expressions
            .iter()
            .zip(&walk.consumed)
            .filter(|(_, consumed)| !**consumed)
            .map(|(expr, _)| expr)
            .collect();
        let mut commands = walk.into_commands();
        for expr in unconsumed {
            commands.push(self.error_command(
                expr.span(),
                "expressions are only supported in text and attribute value positions",
            ));
        }
        if malformed {
            commands.push(Command::Error(ErrorMarker::new("malformed markup")));
        }
        commands
    }

    fn convert_nodes(&mut self, walk: &mut PartWalk<'_, 'a>, nodes: &[Node], scope: &Scope) {
        for node in nodes {
            match node {
                Node::Text(text) => self.convert_text(walk, text, scope),
                Node::Element(element) => self.convert_element(walk, element, scope),
                // Comments are dropped; expressions inside them cannot be.
                Node::Comment(comment) => {
                    for expr in self.take_parts_in(walk, &comment.value) {
                        let cmd = self.error_command(
                            expr.span(),
                            "expressions inside comments are not supported",
                        );
                        walk.emit(cmd);
                    }
                }
            }
        }
    }

    fn take_part(&mut self, walk: &mut PartWalk<'_, 'a>, index: usize) -> Option<&'a ast::Expression<'a>> {
        let expressions = walk.expressions;
        let expr = expressions.get(index)?;
        if walk.consumed[index] {
            return None;
        }
        if index != walk.next_part {
            self.report(
                expr.span(),
                format!("expression #{} is out of document order", index + 1),
            );
        }
        walk.consumed[index] = true;
        walk.next_part = index + 1;
        Some(expr)
    }

    fn take_parts_in(&mut self, walk: &mut PartWalk<'_, 'a>, text: &str) -> Vec<&'a ast::Expression<'a>> {
        walk.template
            .markers
            .parts_in(text)
            .into_iter()
            .filter_map(|index| self.take_part(walk, index))
            .collect()
    }

    fn report_markup(&mut self, walk: &PartWalk<'_, 'a>, html_offset: usize, message: &str) -> Command {
        let offset = walk.template.source_offset(html_offset);
        self.report_at(offset, message);
        Command::Error(ErrorMarker::new(message))
    }

    fn convert_text(&mut self, walk: &mut PartWalk<'_, 'a>, text: &Text, scope: &Scope) {
        let template = walk.template;
        for segment in template.markers.split(&text.value) {
            match segment {
                Segment::Text(literal) => walk.emit_text(literal),
                Segment::Part(index) => {
                    if let Some(expr) = self.take_part(walk, index) {
                        let commands = self.convert_text_part(expr, scope);
                        walk.emit_all(commands);
                    }
                }
            }
        }
    }

    /// An expression in a text position. Conditionals, nested templates,
    /// template calls and `.map()` loops become commands; anything else is
    /// printed.
    pub fn convert_text_part(&mut self, expr: &'a ast::Expression<'a>, scope: &Scope) -> Vec<Command> {
        match unwrap_parens(expr) {
            ast::Expression::ConditionalExpression(cond) => {
                let condition = self.convert_expression(&cond.test, scope);
                let then_commands = self.convert_text_part(&cond.consequent, scope);
                let else_commands = self.convert_text_part(&cond.alternate, scope);
                vec![Command::If(IfCmd {
                    condition,
                    then_commands,
                    else_commands: Some(else_commands),
                })]
            }
            ast::Expression::TaggedTemplateExpression(tagged) => {
                self.convert_tagged_template(tagged, scope)
            }
            ast::Expression::CallExpression(call) => {
                if let Some(commands) = self.convert_template_call(call) {
                    return commands;
                }
                if let Some(commands) = self.convert_map(call, scope) {
                    return commands;
                }
                vec![Command::Print(self.convert_expression(expr, scope))]
            }
            _ => vec![Command::Print(self.convert_expression(expr, scope))],
        }
    }

    /// `header()` where `header` is a template function of this file. The
    /// call carries no parameters.
    fn convert_template_call(
        &mut self,
        call: &'a ast::CallExpression<'a>,
    ) -> Option<Vec<Command>> {
        let ast::Expression::Identifier(callee) = unwrap_parens(&call.callee) else {
            return None;
        };
        let symbol = self.symbol_of(callee)?;
        let template = self.registry.template(symbol)?.name.clone();
        if !call.arguments.is_empty() {
            self.logger.debug(&format!(
                "{}: arguments of the call to `{}` are not passed",
                self.file_name, template
            ));
        }
        Some(vec![Command::Call(CallCmd {
            template,
            params: Vec::new(),
        })])
    }

    /// `list.map((item) => ...)` with a single-parameter callback.
    fn convert_map(&mut self, call: &'a ast::CallExpression<'a>, scope: &Scope) -> Option<Vec<Command>> {
        let ast::Expression::StaticMemberExpression(member) = &call.callee else {
            return None;
        };
        if member.property.name != "map" || call.arguments.len() != 1 {
            return None;
        }
        let node = match call.arguments[0].as_expression().map(unwrap_parens)? {
            ast::Expression::ArrowFunctionExpression(arrow) => FunctionNode::Arrow(arrow),
            ast::Expression::FunctionExpression(func) => FunctionNode::Function(func),
            _ => return None,
        };
        let definition = self.host.get_definition_of_function(node);
        if definition.parameters.len() != 1 || definition.has_rest_parameter {
            return Some(vec![self.error_command(
                node.span(),
                "`.map()` callbacks must take exactly one parameter",
            )]);
        }
        let param = &definition.parameters[0];
        let (Some(var_name), Some(symbol)) = (param.name.clone(), param.symbol) else {
            return Some(vec![self.error_command(
                param.node.span,
                "destructured loop variables are not supported",
            )]);
        };

        let list_type = self.type_of(&member.object, scope);
        let item_type = match param.type_node {
            Some(annotation) => self.checker.lower(&annotation.type_annotation),
            None => list_type.element_type().cloned().unwrap_or(HostType::Unknown),
        };
        let list = self.convert_expression(&member.object, scope);
        let loop_scope = scope.with_locals([Binding::local(symbol, var_name.clone(), item_type)]);
        let body = self.convert_body(&definition, &loop_scope, BodyKind::Loop);
        Some(vec![Command::For(ForCmd {
            var_name,
            list,
            body,
        })])
    }

    fn convert_element(&mut self, walk: &mut PartWalk<'_, 'a>, element: &Element, scope: &Scope) {
        if walk.template.markers.has_parts(&element.name) {
            for expr in self.take_parts_in(walk, &element.name) {
                let cmd = self.error_command(expr.span(), "expressions are not supported as tag names");
                walk.emit(cmd);
            }
        }
        match self.registry.component(&element.name) {
            Some(template) => {
                let template = template.to_string();
                self.convert_component_element(walk, element, template, scope);
            }
            None => self.convert_literal_element(walk, element, scope),
        }
    }

    fn convert_literal_element(&mut self, walk: &mut PartWalk<'_, 'a>, element: &Element, scope: &Scope) {
        walk.emit_text(format!("<{}", element.name));
        let mut actions: Vec<String> = Vec::new();
        for attr in &element.attrs {
            self.convert_attribute(walk, element, attr, scope, &mut actions);
        }
        if !actions.is_empty() {
            walk.emit_text(format!(" jsaction=\"{}\"", actions.join(";")));
        }
        walk.emit_text(if element.is_self_closing { "/>" } else { ">" });
        self.convert_nodes(walk, &element.children, scope);
        if element.end_source_span.is_some() {
            walk.emit_text(format!("</{}>", element.name));
        }
    }

    fn attribute_name_has_parts(&mut self, walk: &mut PartWalk<'_, 'a>, attr: &Attribute) -> bool {
        if !walk.template.markers.has_parts(&attr.name) {
            return false;
        }
        for expr in self.take_parts_in(walk, &attr.name) {
            let cmd = self.error_command(expr.span(), "expressions are not supported in attribute names");
            walk.emit(cmd);
        }
        // Parts in the value go with the broken attribute.
        self.take_parts_in(walk, &attr.value);
        true
    }

    fn convert_attribute(
        &mut self,
        walk: &mut PartWalk<'_, 'a>,
        element: &Element,
        attr: &Attribute,
        scope: &Scope,
        actions: &mut Vec<String>,
    ) {
        if self.attribute_name_has_parts(walk, attr) {
            return;
        }
        if let Some(property) = attr.name.strip_prefix('.') {
            self.convert_property_binding(walk, element, attr, property, scope);
        } else if let Some(event) = attr.name.strip_prefix('@') {
            self.convert_event_binding(walk, attr, event, scope, actions);
        } else if attr.name.starts_with('?') {
            self.take_parts_in(walk, &attr.value);
            let message = format!(
                "boolean attribute bindings (`{}`) are not supported",
                attr.name
            );
            let cmd = self.report_markup(walk, attr.key_span.start.offset, &message);
            walk.emit(cmd);
        } else if walk.template.markers.has_parts(&attr.value) {
            walk.emit_text(format!(" {}=\"", attr.name));
            self.convert_attribute_value(walk, &attr.value, scope);
            walk.emit_text("\"");
        } else if attr.has_value() {
            walk.emit_text(format!(" {}=\"{}\"", attr.name, escape_quotes(&attr.value)));
        } else {
            walk.emit_text(format!(" {}", attr.name));
        }
    }

    /// `.prop=${value}`: rendered through the attribute the property reflects
    /// to. Unreflected properties have no markup counterpart and are dropped.
    fn convert_property_binding(
        &mut self,
        walk: &mut PartWalk<'_, 'a>,
        element: &Element,
        attr: &Attribute,
        property: &str,
        scope: &Scope,
    ) {
        let Some(reflected) = get_reflected_attribute(property, &element.name) else {
            self.take_parts_in(walk, &attr.value);
            self.logger.debug(&format!(
                "{}: dropping unreflected property binding `{}` on <{}>",
                self.file_name, attr.name, element.name
            ));
            return;
        };
        if reflected.is_boolean {
            let segments = walk.template.markers.split(&attr.value);
            let part = match segments.as_slice() {
                [Segment::Part(index)] => Some(*index),
                _ => None,
            };
            let Some(expr) = part.and_then(|index| self.take_part(walk, index)) else {
                self.take_parts_in(walk, &attr.value);
                let message = format!(
                    "`{}`: boolean property bindings must be a single expression",
                    attr.name
                );
                let cmd = self.report_markup(walk, attr.key_span.start.offset, &message);
                walk.emit(cmd);
                return;
            };
            let condition = self.convert_expression(expr, scope);
            walk.emit(Command::If(IfCmd {
                condition,
                then_commands: vec![Command::RawText(format!(" {}", reflected.attribute_name))],
                else_commands: None,
            }));
        } else {
            walk.emit_text(format!(" {}=\"", reflected.attribute_name));
            self.convert_attribute_value(walk, &attr.value, scope);
            walk.emit_text("\"");
        }
    }

    /// `@event=${this.method}`: collected into the element's `jsaction`.
    fn convert_event_binding(
        &mut self,
        walk: &mut PartWalk<'_, 'a>,
        attr: &Attribute,
        event: &str,
        scope: &Scope,
        actions: &mut Vec<String>,
    ) {
        let segments = walk.template.markers.split(&attr.value);
        let handler = match segments.as_slice() {
            [Segment::Part(index)] => self.take_part(walk, *index),
            _ => None,
        };
        let Some(handler) = handler else {
            self.take_parts_in(walk, &attr.value);
            let cmd = self.report_markup(walk, attr.key_span.start.offset, EVENT_BINDING_MESSAGE);
            walk.emit(cmd);
            return;
        };
        let ast::Expression::StaticMemberExpression(member) = unwrap_parens(handler) else {
            let cmd = self.error_command(handler.span(), EVENT_BINDING_MESSAGE);
            walk.emit(cmd);
            return;
        };
        if !matches!(member.object, ast::Expression::ThisExpression(_)) {
            let cmd = self.error_command(handler.span(), EVENT_BINDING_MESSAGE);
            walk.emit(cmd);
            return;
        }
        let method = member.property.name.as_str();
        let message = match scope.component() {
            None => Some(
                "event bindings are only supported inside the render method of a component"
                    .to_string(),
            ),
            Some(component) if !component.methods.contains(method) => Some(format!(
                "`this.{}` is not a method of `{}`",
                method, component.class_name
            )),
            Some(_) => None,
        };
        match message {
            Some(message) => {
                let cmd = self.error_command(handler.span(), message);
                walk.emit(cmd);
            }
            None => actions.push(format!("{}:{}", event, method)),
        }
    }

    /// Literal text and printed parts of an interpolated attribute value.
    fn convert_attribute_value(&mut self, walk: &mut PartWalk<'_, 'a>, value: &str, scope: &Scope) {
        let template = walk.template;
        for segment in template.markers.split(value) {
            match segment {
                Segment::Text(literal) => walk.emit_text(escape_quotes(literal)),
                Segment::Part(index) => {
                    if let Some(expr) = self.take_part(walk, index) {
                        let printed = self.convert_expression(expr, scope);
                        walk.emit(Command::Print(printed));
                    }
                }
            }
        }
    }

    /// An attribute value as a single expression: the bound expression itself
    /// for `attr=${x}`, a string concatenation when text and parts mix.
    fn attribute_expression(
        &mut self,
        walk: &mut PartWalk<'_, 'a>,
        value: &str,
        scope: &Scope,
    ) -> soy::Expression {
        let template = walk.template;
        let segments = template.markers.split(value);
        if let [Segment::Part(index)] = segments.as_slice() {
            return match self.take_part(walk, *index) {
                Some(expr) => self.convert_expression(expr, scope),
                None => soy::string_literal(""),
            };
        }
        let mut result = soy::string_literal("");
        let mut first = true;
        for segment in segments {
            let piece = match segment {
                Segment::Text(literal) => soy::string_literal(literal),
                Segment::Part(index) => match self.take_part(walk, index) {
                    Some(expr) => match self.convert_expression(expr, scope) {
                        converted @ (soy::Expression::Binary { .. }
                        | soy::Expression::Ternary { .. }) => soy::paren(converted),
                        converted => converted,
                    },
                    None => continue,
                },
            };
            result = if first && matches!(segment, Segment::Text(_)) {
                piece
            } else {
                soy::binary(soy::BinaryOperator::Plus, result, piece)
            };
            first = false;
        }
        result
    }

    /// A known component: a `{call}` whose parameters come from the
    /// attributes and whose `children` block holds the converted content.
    fn convert_component_element(
        &mut self,
        walk: &mut PartWalk<'_, 'a>,
        element: &Element,
        template: String,
        scope: &Scope,
    ) {
        let mut params = Vec::with_capacity(element.attrs.len() + 1);
        for attr in &element.attrs {
            if self.attribute_name_has_parts(walk, attr) {
                continue;
            }
            if attr.name.starts_with('@') || attr.name.starts_with('?') {
                self.take_parts_in(walk, &attr.value);
                let message = format!(
                    "`{}`: event and boolean attribute bindings are not supported on <{}>",
                    attr.name, element.name
                );
                let cmd = self.report_markup(walk, attr.key_span.start.offset, &message);
                walk.emit(cmd);
                continue;
            }
            let name = attr.name.strip_prefix('.').unwrap_or(&attr.name);
            let value = if attr.has_value() {
                self.attribute_expression(walk, &attr.value, scope)
            } else {
                soy::bool_literal(true)
            };
            params.push(CallParam::Value {
                name: param_name(name),
                value,
            });
        }

        walk.targets.push(Vec::new());
        self.convert_nodes(walk, &element.children, scope);
        let children = walk.targets.pop().unwrap_or_default();
        params.push(CallParam::Block {
            name: CHILDREN_PARAM.to_string(),
            kind: ContentKind::Html,
            body: children,
        });
        walk.emit(Command::Call(CallCmd { template, params }));
    }
}
