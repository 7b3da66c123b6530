//! Converter driver
//!
//! One run converts one source file: parse, build the semantic model, then
//! turn every `@soyCompatible` declaration into Soy templates.

use super::component::{custom_element_tag, ClassTable};
use super::context::ConversionContext;
use super::registry::{RegisteredTemplate, TemplateRegistry};
use super::scope::{Binding, Scope};
use super::body::BodyKind;
use super::type_mapper::map_type;
use crate::checker::{AnnotationChecker, HostType};
use crate::config::ConverterOptions;
use crate::diagnostics::{Diagnostic, DiagnosticBag};
use crate::logging::Logger;
use crate::reflection::{
    Declaration, DeclarationKind, FunctionDefinition, ReflectionHost, TypeScriptReflectionHost,
};
use oxc_allocator::Allocator;
use oxc_ast::ast;
use oxc_parser::Parser;
use oxc_semantic::{Scoping, SemanticBuilder};
use oxc_span::SourceType;
use soy_compiler::output::soy_ast::{Command, ParamDecl, TemplateCmd};
use soy_compiler::output::{emit_file, EmitError};
use std::path::{Component, Path};

/// JSDoc tag marking declarations for conversion.
pub const SOY_COMPATIBLE_TAG: &str = "soyCompatible";

/// Modules lit's `html` tag may be imported from.
pub const LIT_MODULES: &[&str] = &["lit", "lit-html", "lit-element"];

const HTML_TAG: &str = "html";

#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub file_name: String,
    /// A namespace followed by templates.
    pub output: Vec<Command>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ConversionResult {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Serializes the output; fails if any construct could not be converted.
    pub fn to_soy(&self) -> Result<String, EmitError> {
        emit_file(&self.output)
    }
}

/// `src/ui/button.ts` relative to the root becomes `src.ui.button`.
pub fn namespace_for(file_name: &Path, root_dir: &Path) -> String {
    let relative = file_name.strip_prefix(root_dir).unwrap_or(file_name);
    let mut segments: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if let Some(last) = segments.last_mut() {
        if let Some(stem) = Path::new(last.as_str()).file_stem() {
            *last = stem.to_string_lossy().into_owned();
        }
    }
    segments.join(".")
}

pub struct SoyConverter<'o> {
    options: &'o ConverterOptions,
    logger: &'o dyn Logger,
}

impl<'o> SoyConverter<'o> {
    pub fn new(options: &'o ConverterOptions, logger: &'o dyn Logger) -> Self {
        Self { options, logger }
    }

    /// Parses and converts `source_text`. Syntax errors are reported as
    /// diagnostics and leave the output at the namespace header.
    pub fn convert_source(&self, file_name: &Path, source_text: &str) -> ConversionResult {
        let allocator = Allocator::default();
        let source_type = SourceType::from_path(file_name).unwrap_or_else(|_| SourceType::ts());
        let parsed = Parser::new(&allocator, source_text, source_type).parse();
        if !parsed.errors.is_empty() {
            let display_name = file_name.display().to_string();
            let mut diagnostics = DiagnosticBag::new(&display_name, source_text);
            for error in &parsed.errors {
                let offset = error
                    .labels
                    .as_ref()
                    .and_then(|labels| labels.first())
                    .map_or(0, |label| label.offset() as u32);
                diagnostics.report(offset, error.to_string());
            }
            return ConversionResult {
                file_name: display_name,
                output: vec![self.namespace_command(file_name)],
                diagnostics: diagnostics.into_vec(),
            };
        }

        let program = parsed.program;
        let semantic = SemanticBuilder::new().build(&program);
        let scoping = semantic.semantic.into_scoping();
        self.convert_file(file_name, &program, &scoping)
    }

    fn namespace_command(&self, file_name: &Path) -> Command {
        Command::Namespace(namespace_for(file_name, &self.options.root_dir))
    }

    pub fn convert_file<'a>(
        &self,
        file_name: &Path,
        program: &'a ast::Program<'a>,
        scoping: &Scoping,
    ) -> ConversionResult {
        let display_name = file_name.display().to_string();
        let host = TypeScriptReflectionHost::new(program);
        let checker = AnnotationChecker::new(program);
        let mut ctx = ConversionContext::new(
            &display_name,
            program.source_text,
            scoping,
            &checker,
            &host,
            TemplateRegistry::new(self.options),
            self.logger,
        );
        ctx.html_tags = host
            .get_imports()
            .into_iter()
            .filter(|import| import.name == HTML_TAG && LIT_MODULES.contains(&import.from.as_str()))
            .filter_map(|import| import.symbol)
            .collect();

        let declarations = host.get_declarations();
        let classes: ClassTable<'a> = declarations
            .iter()
            .filter_map(|declaration| match &declaration.kind {
                DeclarationKind::Class(class) => {
                    let class: &'a ast::Class<'a> = *class;
                    class.id.as_ref().map(|id| (id.name.as_str(), class))
                }
                _ => None,
            })
            .collect();
        let marked: Vec<&Declaration<'a>> = declarations
            .iter()
            .filter(|declaration| host.has_jsdoc_tag(declaration, SOY_COMPATIBLE_TAG))
            .collect();

        // Calls may precede the callee's declaration.
        for declaration in &marked {
            register_declaration(&mut ctx.registry, &host, declaration);
        }

        let mut output = vec![self.namespace_command(file_name)];
        for declaration in &declarations {
            let name = declaration.name().unwrap_or("<anonymous>");
            if !marked.iter().any(|m| std::ptr::eq(*m, declaration)) {
                self.logger
                    .debug(&format!("{}: skipping unmarked `{}`", display_name, name));
                continue;
            }
            match &declaration.kind {
                DeclarationKind::Function {
                    name, definition, ..
                } => {
                    self.logger
                        .debug(&format!("{}: converting template `{}`", display_name, name));
                    output.push(ctx.convert_template_function(name, definition));
                }
                DeclarationKind::Class(class) => {
                    self.logger
                        .debug(&format!("{}: converting component `{}`", display_name, name));
                    output.extend(ctx.convert_component(*class, &classes));
                }
                DeclarationKind::Variable { .. } => {
                    self.logger.debug(&format!(
                        "{}: skipping `{}`, only functions and classes are converted",
                        display_name, name
                    ));
                }
            }
        }

        ConversionResult {
            file_name: display_name,
            output,
            diagnostics: ctx.into_diagnostics(),
        }
    }
}

fn register_declaration<'a>(
    registry: &mut TemplateRegistry,
    host: &TypeScriptReflectionHost<'a>,
    declaration: &Declaration<'a>,
) {
    match &declaration.kind {
        DeclarationKind::Function {
            name,
            symbol: Some(symbol),
            ..
        } => registry.register_template(*symbol, RegisteredTemplate { name: name.clone() }),
        DeclarationKind::Class(class) => {
            if let (Some(id), Some(tag)) = (&class.id, custom_element_tag(host, *class)) {
                registry.register_component(tag, id.name.as_str());
            }
        }
        _ => {}
    }
}

impl<'a> ConversionContext<'a, '_> {
    /// A standalone template function: one `{@param}` per parameter, then the
    /// converted body.
    pub fn convert_template_function(
        &mut self,
        name: &str,
        definition: &FunctionDefinition<'a>,
    ) -> Command {
        let mut body = Vec::with_capacity(definition.parameters.len());
        let mut bindings = Vec::with_capacity(definition.parameters.len());
        if definition.has_rest_parameter {
            self.report(
                definition.node.span(),
                format!("`{}`: rest parameters are not supported", name),
            );
        }
        for param in &definition.parameters {
            let Some(param_name) = param.name.clone() else {
                self.report(param.node.span, "destructured parameters are not supported");
                continue;
            };
            let (ty, type_name) = match param.type_node {
                None => {
                    self.report(
                        param.node.span,
                        format!("`{}`: parameters must have a declared type", param_name),
                    );
                    (HostType::Any, None)
                }
                Some(annotation) => {
                    let ty = self.checker.lower(&annotation.type_annotation);
                    let type_name = map_type(self.checker, &ty);
                    if type_name.is_none() {
                        self.report(
                            annotation.span,
                            format!("`{}`: type `{}` has no Soy equivalent", param_name, ty),
                        );
                    }
                    (ty, type_name)
                }
            };
            body.push(Command::Param(ParamDecl {
                name: param_name.clone(),
                type_name,
            }));
            if let Some(symbol) = param.symbol {
                bindings.push(Binding::parameter(symbol, param_name, ty));
            }
        }

        let scope = Scope::new().with_function(bindings);
        body.extend(self.convert_body(definition, &scope, BodyKind::Template));
        Command::Template(TemplateCmd {
            name: name.to_string(),
            body,
        })
    }
}
