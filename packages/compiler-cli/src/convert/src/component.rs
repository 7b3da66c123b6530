//! Component converter
//!
//! A `@customElement` class extending `LitElement` becomes two templates:
//! `.ClassName` renders the host element around a call to
//! `.ClassName_shadow`, which holds the converted `render()` output.

use super::body::BodyKind;
use super::context::ConversionContext;
use super::markup::CHILDREN_PARAM;
use super::scope::{ComponentClass, Scope};
use super::type_mapper::{map_type, SOY_STRING};
use crate::reflection::{ClassMember, ClassMemberKind, FunctionNode, ReflectionHost};
use indexmap::IndexMap;
use oxc_ast::ast;
use soy_compiler::output::soy_ast::{
    self as soy, CallCmd, CallParam, Command, ParamDecl, TemplateCmd,
};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

pub const LIT_ELEMENT: &str = "LitElement";
pub const CUSTOM_ELEMENT_DECORATOR: &str = "customElement";
pub const PROPERTY_DECORATOR: &str = "property";
pub const RENDER_METHOD: &str = "render";
pub const SHADOW_SUFFIX: &str = "_shadow";

/// Classes declared in the file being converted, by name.
pub type ClassTable<'a> = HashMap<&'a str, &'a ast::Class<'a>>;

/// Reads the tag name from `@customElement('tag-name')`.
pub fn custom_element_tag<'a>(
    host: &impl ReflectionHost<'a>,
    class: &'a ast::Class<'a>,
) -> Option<String> {
    host.get_decorators_of_class(class)
        .into_iter()
        .find(|decorator| decorator.name == CUSTOM_ELEMENT_DECORATOR)
        .and_then(|decorator| match decorator.args.as_deref() {
            Some([ast::Expression::StringLiteral(tag)]) => Some(tag.value.to_string()),
            _ => None,
        })
}

/// A reactive property and, when mappable, its Soy type.
struct ReactiveProperty {
    name: String,
    soy_type: Option<String>,
}

impl<'a> ConversionContext<'a, '_> {
    pub fn convert_component(&mut self, class: &'a ast::Class<'a>, classes: &ClassTable<'a>) -> Vec<Command> {
        let Some(class_name) = class.id.as_ref().map(|id| id.name.to_string()) else {
            self.report(class.span, "components must be named classes");
            return Vec::new();
        };
        let Some(tag_name) = custom_element_tag(self.host, class) else {
            self.report(
                class.span,
                format!(
                    "`{}` must declare its tag name with @customElement('tag-name')",
                    class_name
                ),
            );
            return Vec::new();
        };
        let Some(chain) = self.class_chain(class, &class_name, classes) else {
            return Vec::new();
        };

        let mut component = ComponentClass {
            class_name: class_name.clone(),
            tag_name: tag_name.clone(),
            properties: IndexMap::new(),
            methods: HashSet::new(),
        };
        let mut properties: Vec<ReactiveProperty> = Vec::new();
        let mut render: Option<&'a ast::Function<'a>> = None;
        let host = self.host;
        for member in chain.iter().flat_map(|c| host.get_members_of_class(*c)) {
            if member.is_static {
                continue;
            }
            match member.kind {
                ClassMemberKind::Property if member.has_decorator(PROPERTY_DECORATOR) => {
                    if component.properties.contains_key(&member.name) {
                        continue;
                    }
                    let soy_type = self.reactive_property_type(&class_name, &member);
                    let ty = self.checker.type_of_annotation(member.type_node);
                    component.properties.insert(member.name.clone(), ty);
                    properties.push(ReactiveProperty {
                        name: member.name.clone(),
                        soy_type,
                    });
                }
                ClassMemberKind::Method => {
                    if member.name == RENDER_METHOD && render.is_none() {
                        render = member.function;
                    }
                    component.methods.insert(member.name.clone());
                }
                _ => {}
            }
        }
        self.logger.debug(&format!(
            "{}: component `{}` <{}> with {} reactive properties",
            self.file_name,
            class_name,
            tag_name,
            properties.len()
        ));

        let mut templates = vec![self.wrapper_template(&class_name, &tag_name, &properties)];
        let Some(render) = render else {
            self.report(class.span, format!("`{}`: no render method found", class_name));
            return templates;
        };

        let mut body: Vec<Command> = properties.iter().map(property_param).collect();
        let definition = self.host.get_definition_of_function(FunctionNode::Function(render));
        let scope = Scope::with_component(Rc::new(component)).with_function(Vec::new());
        body.extend(self.convert_body(&definition, &scope, BodyKind::Template));
        templates.push(Command::Template(TemplateCmd {
            name: format!("{}{}", class_name, SHADOW_SUFFIX),
            body,
        }));
        templates
    }

    /// The class followed by its ancestors up to, not including,
    /// `LitElement`. `None` (with a diagnostic) when the chain does not end
    /// there.
    fn class_chain(
        &mut self,
        class: &'a ast::Class<'a>,
        class_name: &str,
        classes: &ClassTable<'a>,
    ) -> Option<Vec<&'a ast::Class<'a>>> {
        let mut chain = vec![class];
        let mut visited: HashSet<&str> = HashSet::from([class_name]);
        let mut current = class;
        loop {
            match self.host.get_base_class_name(current) {
                Some(LIT_ELEMENT) => return Some(chain),
                Some(base) => match classes.get(base) {
                    Some(&next) if visited.insert(base) => {
                        chain.push(next);
                        current = next;
                    }
                    Some(_) => {
                        self.report(
                            class.span,
                            format!("`{}` has a cyclic class hierarchy", class_name),
                        );
                        return None;
                    }
                    None => {
                        self.report(
                            class.span,
                            format!(
                                "`{}` must extend LitElement; base class `{}` is not declared in this file",
                                class_name, base
                            ),
                        );
                        return None;
                    }
                },
                None => {
                    self.report(class.span, format!("`{}` must extend LitElement", class_name));
                    return None;
                }
            }
        }
    }

    fn reactive_property_type(&mut self, class_name: &str, member: &ClassMember<'a>) -> Option<String> {
        let ast::ClassElement::PropertyDefinition(definition) = member.node else {
            return None;
        };
        let Some(annotation) = member.type_node else {
            self.report(
                definition.span,
                format!(
                    "`{}.{}`: reactive properties must have a declared type",
                    class_name, member.name
                ),
            );
            return None;
        };
        let ty = self.checker.lower(&annotation.type_annotation);
        let soy_type = map_type(self.checker, &ty);
        if soy_type.is_none() {
            self.report(
                annotation.span,
                format!(
                    "`{}.{}`: type `{}` has no Soy equivalent",
                    class_name, member.name, ty
                ),
            );
        }
        soy_type
    }

    fn wrapper_template(
        &mut self,
        class_name: &str,
        tag_name: &str,
        properties: &[ReactiveProperty],
    ) -> Command {
        let mut body = vec![Command::Param(ParamDecl {
            name: CHILDREN_PARAM.to_string(),
            type_name: Some(SOY_STRING.to_string()),
        })];
        body.extend(properties.iter().map(property_param));
        body.push(Command::RawText(format!("<{}>", tag_name)));
        body.push(Command::Print(soy::variable(CHILDREN_PARAM)));
        body.push(Command::Call(CallCmd {
            template: format!("{}{}", class_name, SHADOW_SUFFIX),
            params: properties
                .iter()
                .map(|property| CallParam::Value {
                    name: property.name.clone(),
                    value: soy::variable(property.name.as_str()),
                })
                .collect(),
        }));
        body.push(Command::RawText(format!("</{}>", tag_name)));
        Command::Template(TemplateCmd {
            name: class_name.to_string(),
            body,
        })
    }
}

fn property_param(property: &ReactiveProperty) -> Command {
    Command::Param(ParamDecl {
        name: property.name.clone(),
        type_name: property.soy_type.clone(),
    })
}
