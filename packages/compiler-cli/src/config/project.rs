use super::options::ConverterOptions;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up when `--project` points at a directory.
pub const PROJECT_FILE_NAME: &str = "lit-soy.json";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("known component '{0}' is not a valid custom element name (it must contain a '-')")]
    InvalidTagName(String),
    #[error("known component '{tag}' maps to an empty template name")]
    EmptyTemplateName { tag: String },
    #[error("'include' must list at least one pattern")]
    NoIncludePatterns,
}

/// Contents of a `lit-soy.json` project file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    pub root_dir: Option<String>,
    #[serde(default = "default_include")]
    pub include: Vec<String>,
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
    pub out_dir: Option<String>,
    #[serde(default)]
    pub known_components: IndexMap<String, String>,
}

fn default_include() -> Vec<String> {
    vec!["**/*.ts".to_string()]
}

fn default_exclude() -> Vec<String> {
    vec!["**/node_modules/**".to_string(), "**/*.d.ts".to_string()]
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root_dir: None,
            include: default_include(),
            exclude: default_exclude(),
            out_dir: None,
            known_components: IndexMap::new(),
        }
    }
}

/// A project file with every relative path resolved against its directory.
#[derive(Debug, Clone)]
pub struct ResolvedProject {
    pub base_dir: PathBuf,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub out_dir: Option<PathBuf>,
    pub options: ConverterOptions,
}

impl ProjectConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: ProjectConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.include.is_empty() {
            return Err(ConfigError::NoIncludePatterns);
        }
        for (tag, template) in &self.known_components {
            if !tag.contains('-') {
                return Err(ConfigError::InvalidTagName(tag.clone()));
            }
            if template.trim().is_empty() {
                return Err(ConfigError::EmptyTemplateName { tag: tag.clone() });
            }
        }
        Ok(())
    }

    pub fn resolve(&self, base_dir: &Path) -> ResolvedProject {
        let root_dir = match &self.root_dir {
            Some(root) => base_dir.join(root),
            None => base_dir.to_path_buf(),
        };
        ResolvedProject {
            base_dir: base_dir.to_path_buf(),
            include: self.include.clone(),
            exclude: self.exclude.clone(),
            out_dir: self.out_dir.as_ref().map(|out| base_dir.join(out)),
            options: ConverterOptions {
                root_dir,
                known_components: self.known_components.clone(),
            },
        }
    }
}

/// Finds the project file for a `--project` argument, which may name either
/// the file itself or the directory containing it.
pub fn project_file_path(project: &Path) -> PathBuf {
    if project.is_dir() {
        project.join(PROJECT_FILE_NAME)
    } else {
        project.to_path_buf()
    }
}
