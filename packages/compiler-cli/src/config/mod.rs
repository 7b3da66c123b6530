//! Configuration
//!
//! Per-run converter options and the `lit-soy.json` project file.

pub mod options;
pub mod project;

pub use options::ConverterOptions;
pub use project::{project_file_path, ConfigError, ProjectConfig, ResolvedProject, PROJECT_FILE_NAME};
