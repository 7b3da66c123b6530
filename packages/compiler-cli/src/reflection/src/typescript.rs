use super::host::*;
use super::jsdoc::{is_jsdoc_comment, jsdoc_has_tag};
use oxc_ast::ast as oxc;
use oxc_span::{GetSpan, Span};

/// Reflection over a single parsed TypeScript file.
pub struct TypeScriptReflectionHost<'a> {
    program: &'a oxc::Program<'a>,
}

impl<'a> TypeScriptReflectionHost<'a> {
    pub fn new(program: &'a oxc::Program<'a>) -> Self {
        Self { program }
    }

    pub fn source_text(&self) -> &'a str {
        self.program.source_text
    }

    fn convert_decorators(&self, oxc_decorators: &'a [oxc::Decorator<'a>]) -> Vec<Decorator<'a>> {
        let mut decorators = Vec::new();
        for decorator in oxc_decorators {
            match &decorator.expression {
                oxc::Expression::CallExpression(call_expr) => {
                    let oxc::Expression::Identifier(ident) = &call_expr.callee else {
                        continue;
                    };
                    let args = call_expr
                        .arguments
                        .iter()
                        .filter_map(|arg| arg.as_expression())
                        .collect::<Vec<_>>();
                    decorators.push(Decorator {
                        name: ident.name.to_string(),
                        node: decorator,
                        args: Some(args),
                    });
                }
                // @decorator without parens
                oxc::Expression::Identifier(ident) => decorators.push(Decorator {
                    name: ident.name.to_string(),
                    node: decorator,
                    args: None,
                }),
                _ => {}
            }
        }
        decorators
    }

    fn function_declaration(
        &self,
        node: FunctionNode<'a>,
        name: &str,
        symbol: Option<oxc_syntax::symbol::SymbolId>,
    ) -> DeclarationKind<'a> {
        DeclarationKind::Function {
            name: name.to_string(),
            symbol,
            definition: self.get_definition_of_function(node),
        }
    }

    fn collect_declaration(
        &self,
        decl: &'a oxc::Declaration<'a>,
        span: Span,
        leading_start: u32,
        out: &mut Vec<Declaration<'a>>,
    ) {
        match decl {
            oxc::Declaration::FunctionDeclaration(func) => {
                self.collect_function(func, span, leading_start, out);
            }
            oxc::Declaration::ClassDeclaration(class) => out.push(Declaration {
                kind: DeclarationKind::Class(class),
                span,
                leading_start,
            }),
            oxc::Declaration::VariableDeclaration(var_decl) => {
                self.collect_variables(var_decl, span, leading_start, out);
            }
            _ => {}
        }
    }

    fn collect_function(
        &self,
        func: &'a oxc::Function<'a>,
        span: Span,
        leading_start: u32,
        out: &mut Vec<Declaration<'a>>,
    ) {
        let Some(id) = &func.id else {
            return;
        };
        out.push(Declaration {
            kind: self.function_declaration(
                FunctionNode::Function(func),
                &id.name,
                id.symbol_id.get(),
            ),
            span,
            leading_start,
        });
    }

    fn collect_variables(
        &self,
        var_decl: &'a oxc::VariableDeclaration<'a>,
        span: Span,
        leading_start: u32,
        out: &mut Vec<Declaration<'a>>,
    ) {
        for declarator in &var_decl.declarations {
            let oxc::BindingPatternKind::BindingIdentifier(id) = &declarator.id.kind else {
                continue;
            };
            let kind = match declarator.init.as_ref().map(unwrap_parens) {
                Some(oxc::Expression::ArrowFunctionExpression(arrow)) => self.function_declaration(
                    FunctionNode::Arrow(arrow),
                    &id.name,
                    id.symbol_id.get(),
                ),
                Some(oxc::Expression::FunctionExpression(func)) => self.function_declaration(
                    FunctionNode::Function(func),
                    &id.name,
                    id.symbol_id.get(),
                ),
                _ => DeclarationKind::Variable {
                    name: id.name.to_string(),
                },
            };
            out.push(Declaration {
                kind,
                span,
                leading_start,
            });
        }
    }
}

/// Strips any number of enclosing parentheses.
pub fn unwrap_parens<'a, 'b>(expr: &'b oxc::Expression<'a>) -> &'b oxc::Expression<'a> {
    let mut current = expr;
    while let oxc::Expression::ParenthesizedExpression(paren) = current {
        current = &paren.expression;
    }
    current
}

fn property_key_name(key: &oxc::PropertyKey<'_>) -> Option<String> {
    match key {
        oxc::PropertyKey::StaticIdentifier(id) => Some(id.name.to_string()),
        oxc::PropertyKey::PrivateIdentifier(id) => Some(id.name.to_string()),
        oxc::PropertyKey::StringLiteral(lit) => Some(lit.value.to_string()),
        _ => None,
    }
}

impl<'a> ReflectionHost<'a> for TypeScriptReflectionHost<'a> {
    fn get_decorators_of_class(&self, clazz: &'a oxc::Class<'a>) -> Vec<Decorator<'a>> {
        self.convert_decorators(&clazz.decorators)
    }

    fn get_members_of_class(&self, clazz: &'a oxc::Class<'a>) -> Vec<ClassMember<'a>> {
        let mut members = Vec::new();
        for element in &clazz.body.body {
            match element {
                oxc::ClassElement::MethodDefinition(method) => {
                    let Some(name) = property_key_name(&method.key) else {
                        continue;
                    };
                    let kind = match method.kind {
                        oxc::MethodDefinitionKind::Constructor => ClassMemberKind::Constructor,
                        oxc::MethodDefinitionKind::Method => ClassMemberKind::Method,
                        oxc::MethodDefinitionKind::Get => ClassMemberKind::Getter,
                        oxc::MethodDefinitionKind::Set => ClassMemberKind::Setter,
                    };
                    members.push(ClassMember {
                        node: element,
                        kind,
                        name,
                        type_node: None,
                        is_static: method.r#static,
                        decorators: self.convert_decorators(&method.decorators),
                        function: Some(&*method.value),
                    });
                }
                oxc::ClassElement::PropertyDefinition(prop) => {
                    let Some(name) = property_key_name(&prop.key) else {
                        continue;
                    };
                    members.push(ClassMember {
                        node: element,
                        kind: ClassMemberKind::Property,
                        name,
                        type_node: prop.type_annotation.as_deref(),
                        is_static: prop.r#static,
                        decorators: self.convert_decorators(&prop.decorators),
                        function: None,
                    });
                }
                _ => {}
            }
        }
        members
    }

    fn get_definition_of_function(&self, node: FunctionNode<'a>) -> FunctionDefinition<'a> {
        let params = node.params();
        let mut parameters = Vec::new();
        for param in &params.items {
            let (name, symbol, type_node) = match &param.pattern.kind {
                oxc::BindingPatternKind::BindingIdentifier(id) => (
                    Some(id.name.to_string()),
                    id.symbol_id.get(),
                    param.pattern.type_annotation.as_deref(),
                ),
                // `name: T = default`
                oxc::BindingPatternKind::AssignmentPattern(assign) => match &assign.left.kind {
                    oxc::BindingPatternKind::BindingIdentifier(id) => (
                        Some(id.name.to_string()),
                        id.symbol_id.get(),
                        param
                            .pattern
                            .type_annotation
                            .as_deref()
                            .or(assign.left.type_annotation.as_deref()),
                    ),
                    _ => (None, None, None),
                },
                _ => (None, None, param.pattern.type_annotation.as_deref()),
            };
            parameters.push(Parameter {
                name,
                symbol,
                node: param,
                type_node,
            });
        }

        let (body, is_expression_body) = match node {
            FunctionNode::Function(func) => (func.body.as_deref(), false),
            FunctionNode::Arrow(arrow) => {
                let body: &'a oxc::FunctionBody<'a> = &arrow.body;
                (Some(body), arrow.expression)
            }
        };

        FunctionDefinition {
            node,
            body,
            is_expression_body,
            parameters,
            has_rest_parameter: params.rest.is_some(),
        }
    }

    fn get_base_class_name(&self, clazz: &'a oxc::Class<'a>) -> Option<&'a str> {
        match clazz.super_class.as_ref().map(unwrap_parens) {
            Some(oxc::Expression::Identifier(ident)) => Some(ident.name.as_str()),
            _ => None,
        }
    }

    fn get_imports(&self) -> Vec<Import<'a>> {
        let mut imports = Vec::new();
        for stmt in &self.program.body {
            let oxc::Statement::ImportDeclaration(import_decl) = stmt else {
                continue;
            };
            let Some(specifiers) = &import_decl.specifiers else {
                continue;
            };
            for specifier in specifiers {
                if let oxc::ImportDeclarationSpecifier::ImportSpecifier(spec) = specifier {
                    imports.push(Import {
                        name: spec.imported.name().to_string(),
                        local_name: spec.local.name.to_string(),
                        symbol: spec.local.symbol_id.get(),
                        from: import_decl.source.value.to_string(),
                        node: import_decl,
                    });
                }
            }
        }
        imports
    }

    fn get_declarations(&self) -> Vec<Declaration<'a>> {
        let mut declarations = Vec::new();
        let mut leading_start = 0;
        for stmt in &self.program.body {
            let span = stmt.span();
            match stmt {
                oxc::Statement::FunctionDeclaration(func) => {
                    self.collect_function(func, span, leading_start, &mut declarations);
                }
                oxc::Statement::ClassDeclaration(class) => declarations.push(Declaration {
                    kind: DeclarationKind::Class(class),
                    span,
                    leading_start,
                }),
                oxc::Statement::VariableDeclaration(var_decl) => {
                    self.collect_variables(var_decl, span, leading_start, &mut declarations);
                }
                oxc::Statement::ExportNamedDeclaration(export) => {
                    if let Some(decl) = &export.declaration {
                        self.collect_declaration(decl, span, leading_start, &mut declarations);
                    }
                }
                oxc::Statement::ExportDefaultDeclaration(export) => match &export.declaration {
                    oxc::ExportDefaultDeclarationKind::FunctionDeclaration(func) => {
                        self.collect_function(func, span, leading_start, &mut declarations);
                    }
                    oxc::ExportDefaultDeclarationKind::ClassDeclaration(class) => {
                        declarations.push(Declaration {
                            kind: DeclarationKind::Class(class),
                            span,
                            leading_start,
                        });
                    }
                    _ => {}
                },
                _ => {}
            }
            leading_start = span.end;
        }
        declarations
    }

    fn has_jsdoc_tag(&self, declaration: &Declaration<'a>, tag: &str) -> bool {
        let source = self.source_text();
        // Decorators may precede `export`, outside the statement's span.
        let mut end = declaration.span.start;
        if let DeclarationKind::Class(class) = &declaration.kind {
            if let Some(first) = class.decorators.first() {
                end = end.min(first.span.start);
            }
        }
        self.program
            .comments
            .iter()
            .rev()
            .find(|comment| {
                comment.span.start >= declaration.leading_start
                    && comment.span.end <= end
                    && is_jsdoc_comment(source, comment.span)
            })
            .is_some_and(|comment| {
                let text = &source[comment.span.start as usize..comment.span.end as usize];
                jsdoc_has_tag(text, tag)
            })
    }
}
