use indexmap::IndexMap;
use std::path::PathBuf;

/// Options for one conversion run.
#[derive(Debug, Clone)]
pub struct ConverterOptions {
    /// Namespaces are derived from file paths relative to this directory.
    pub root_dir: PathBuf,
    /// Custom element tag name to the Soy template rendering it. Elements with
    /// these tags become `{call}`s instead of literal markup.
    pub known_components: IndexMap<String, String>,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            known_components: IndexMap::new(),
        }
    }
}

impl ConverterOptions {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_known_component(
        mut self,
        tag_name: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.known_components
            .insert(tag_name.into(), template.into());
        self
    }
}
