//! Template registry
//!
//! Per-run table of what the markup converter may turn into `{call}`s:
//! same-file template functions, keyed by the symbol of their binding, and
//! custom element tags of known components.

use crate::config::ConverterOptions;
use indexmap::IndexMap;
use oxc_syntax::symbol::SymbolId;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredTemplate {
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<SymbolId, RegisteredTemplate>,
    components: IndexMap<String, String>,
}

impl TemplateRegistry {
    pub fn new(options: &ConverterOptions) -> Self {
        Self {
            templates: HashMap::new(),
            components: options.known_components.clone(),
        }
    }

    pub fn register_template(&mut self, symbol: SymbolId, template: RegisteredTemplate) {
        self.templates.insert(symbol, template);
    }

    pub fn template(&self, symbol: SymbolId) -> Option<&RegisteredTemplate> {
        self.templates.get(&symbol)
    }

    /// Components declared in the file being converted shadow configured ones.
    pub fn register_component(&mut self, tag_name: impl Into<String>, template: impl Into<String>) {
        self.components.insert(tag_name.into(), template.into());
    }

    pub fn component(&self, tag_name: &str) -> Option<&str> {
        self.components
            .get(tag_name)
            .or_else(|| self.components.get(&tag_name.to_ascii_lowercase()))
            .map(String::as_str)
    }
}
