//! Annotation-driven type checker
//!
//! Types come from the annotations written in the file: parameter and
//! property annotations are lowered to [`HostType`], following local `type`
//! aliases. Interfaces and classes declared in the file lower to object types;
//! anything imported stays a [`HostType::Named`] reference.

use super::checker::{is_assignable_to, TypeChecker};
use super::types::HostType;
use oxc_ast::ast;
use std::collections::{HashMap, HashSet};

/// Alias chains longer than this are treated as unresolvable.
const MAX_ALIAS_DEPTH: usize = 8;

pub struct AnnotationChecker<'a> {
    aliases: HashMap<&'a str, &'a ast::TSType<'a>>,
    object_types: HashSet<&'a str>,
}

impl<'a> AnnotationChecker<'a> {
    /// Collects the type declarations at the top level of `program`.
    pub fn new(program: &'a ast::Program<'a>) -> Self {
        let mut checker = AnnotationChecker {
            aliases: HashMap::new(),
            object_types: HashSet::new(),
        };
        for stmt in &program.body {
            match stmt {
                ast::Statement::ExportNamedDeclaration(export) => {
                    if let Some(decl) = &export.declaration {
                        checker.collect_declaration(decl);
                    }
                }
                ast::Statement::TSTypeAliasDeclaration(alias) => {
                    checker
                        .aliases
                        .insert(alias.id.name.as_str(), &alias.type_annotation);
                }
                ast::Statement::TSInterfaceDeclaration(interface) => {
                    checker.object_types.insert(interface.id.name.as_str());
                }
                ast::Statement::ClassDeclaration(class) => {
                    if let Some(id) = &class.id {
                        checker.object_types.insert(id.name.as_str());
                    }
                }
                _ => {}
            }
        }
        checker
    }

    fn collect_declaration(&mut self, decl: &'a ast::Declaration<'a>) {
        match decl {
            ast::Declaration::TSTypeAliasDeclaration(alias) => {
                self.aliases
                    .insert(alias.id.name.as_str(), &alias.type_annotation);
            }
            ast::Declaration::TSInterfaceDeclaration(interface) => {
                self.object_types.insert(interface.id.name.as_str());
            }
            ast::Declaration::ClassDeclaration(class) => {
                if let Some(id) = &class.id {
                    self.object_types.insert(id.name.as_str());
                }
            }
            _ => {}
        }
    }

    /// Lowers an optional annotation; a missing annotation is implicitly `any`.
    pub fn type_of_annotation(&self, annotation: Option<&ast::TSTypeAnnotation<'a>>) -> HostType {
        match annotation {
            Some(annotation) => self.lower(&annotation.type_annotation),
            None => HostType::Any,
        }
    }

    pub fn lower(&self, ty: &ast::TSType<'a>) -> HostType {
        self.lower_with_depth(ty, 0)
    }

    fn lower_with_depth(&self, ty: &ast::TSType<'a>, depth: usize) -> HostType {
        match ty {
            ast::TSType::TSAnyKeyword(_) => HostType::Any,
            ast::TSType::TSUnknownKeyword(_) => HostType::Unknown,
            ast::TSType::TSNeverKeyword(_) => HostType::Never,
            ast::TSType::TSBooleanKeyword(_) => HostType::Boolean,
            ast::TSType::TSNumberKeyword(_) => HostType::Number,
            ast::TSType::TSStringKeyword(_) => HostType::String,
            ast::TSType::TSNullKeyword(_) => HostType::Null,
            ast::TSType::TSUndefinedKeyword(_) => HostType::Undefined,
            ast::TSType::TSVoidKeyword(_) => HostType::Void,
            ast::TSType::TSObjectKeyword(_) | ast::TSType::TSTypeLiteral(_) => HostType::Object,
            ast::TSType::TSFunctionType(_) => HostType::Function,
            ast::TSType::TSLiteralType(literal) => match &literal.literal {
                ast::TSLiteral::BooleanLiteral(lit) => HostType::BooleanLiteral(lit.value),
                ast::TSLiteral::NumericLiteral(lit) => HostType::NumberLiteral(lit.value),
                ast::TSLiteral::StringLiteral(lit) => HostType::StringLiteral(lit.value.to_string()),
                ast::TSLiteral::TemplateLiteral(_) => HostType::String,
                _ => HostType::Unknown,
            },
            ast::TSType::TSArrayType(array) => {
                HostType::array_of(self.lower_with_depth(&array.element_type, depth))
            }
            ast::TSType::TSUnionType(union) => HostType::union(
                union
                    .types
                    .iter()
                    .map(|member| self.lower_with_depth(member, depth)),
            ),
            ast::TSType::TSParenthesizedType(paren) => {
                self.lower_with_depth(&paren.type_annotation, depth)
            }
            ast::TSType::TSTypeReference(reference) => self.lower_reference(reference, depth),
            _ => HostType::Unknown,
        }
    }

    fn lower_reference(&self, reference: &ast::TSTypeReference<'a>, depth: usize) -> HostType {
        let ast::TSTypeName::IdentifierReference(ident) = &reference.type_name else {
            return HostType::Unknown;
        };
        let name = ident.name.as_str();
        let type_args: Vec<&ast::TSType<'a>> = reference
            .type_arguments
            .as_ref()
            .map(|args| args.params.iter().collect())
            .unwrap_or_default();

        match name {
            "Array" | "ReadonlyArray" => {
                return match type_args.as_slice() {
                    [element] => HostType::array_of(self.lower_with_depth(element, depth)),
                    _ => HostType::Array(None),
                };
            }
            "Boolean" => return HostType::Boolean,
            "Number" => return HostType::Number,
            "String" => return HostType::String,
            "Object" => return HostType::Object,
            "Function" => return HostType::Function,
            _ => {}
        }

        if let Some(aliased) = self.aliases.get(name) {
            if depth >= MAX_ALIAS_DEPTH {
                return HostType::Unknown;
            }
            return self.lower_with_depth(aliased, depth + 1);
        }
        if self.object_types.contains(name) {
            return HostType::Object;
        }
        HostType::Named(name.to_string())
    }
}

impl TypeChecker for AnnotationChecker<'_> {
    fn is_assignable(&self, source: &HostType, target: &HostType) -> bool {
        is_assignable_to(source, target)
    }
}
