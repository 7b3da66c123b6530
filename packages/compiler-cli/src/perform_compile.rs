//! Perform Compile
//!
//! Project configuration, file discovery and the batch conversion entry
//! point shared by the `lit2soy` binary and tests.

use crate::config::{project_file_path, ConverterOptions, ProjectConfig};
use crate::convert::{ConversionResult, SoyConverter};
use crate::diagnostics::Diagnostic;
use crate::logging::Logger;
use anyhow::Context;
use rayon::prelude::*;
use soy_compiler::output::EmitError;
use std::fs;
use std::path::{Path, PathBuf};

pub const SOY_EXTENSION: &str = "soy";

/// Parsed configuration from a `lit-soy.json` project file.
#[derive(Debug, Clone)]
pub struct ParsedConfiguration {
    /// Path of the project file.
    pub project: PathBuf,
    /// Source files selected by `include` minus `exclude`.
    pub root_names: Vec<PathBuf>,
    pub options: ConverterOptions,
    pub out_dir: Option<PathBuf>,
}

/// Reads the project file `project` names (a file, or a directory holding
/// `lit-soy.json`) and discovers its source files.
pub fn read_configuration(project: &Path) -> anyhow::Result<ParsedConfiguration> {
    let project_file = project_file_path(project);
    let config = ProjectConfig::load(&project_file)
        .with_context(|| format!("Failed to load project file {}", project_file.display()))?;
    let base_dir = project_file
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let resolved = config.resolve(base_dir);
    let root_names = discover_files(&resolved.base_dir, &resolved.include, &resolved.exclude);
    Ok(ParsedConfiguration {
        project: project_file,
        root_names,
        options: resolved.options,
        out_dir: resolved.out_dir,
    })
}

/// Discover files matching include patterns and excluding exclude patterns.
/// The result is sorted and free of duplicates.
pub fn discover_files(base_dir: &Path, include: &[String], exclude: &[String]) -> Vec<PathBuf> {
    let exclude_patterns: Vec<glob::Pattern> = exclude
        .iter()
        .filter_map(|excl| glob::Pattern::new(&base_dir.join(excl).to_string_lossy()).ok())
        .collect();

    let mut files = Vec::new();
    for pattern in include {
        let full_pattern = base_dir.join(pattern);
        let paths = match glob::glob(&full_pattern.to_string_lossy()) {
            Ok(paths) => paths,
            Err(_) => continue,
        };
        for path in paths.flatten() {
            let path_str = path.to_string_lossy();
            // node_modules is skipped wherever it appears.
            let excluded = path_str.contains("node_modules")
                || exclude_patterns.iter().any(|p| p.matches(&path_str));
            if !excluded && path.is_file() {
                files.push(path);
            }
        }
    }
    files.sort();
    files.dedup();
    files
}

/// Where the Soy file for `source` goes: mirrored under `out_dir` relative to
/// `root_dir`, or next to the source without an output directory.
pub fn output_path_for(source: &Path, root_dir: &Path, out_dir: Option<&Path>) -> PathBuf {
    match out_dir {
        Some(out_dir) => {
            let relative = source.strip_prefix(root_dir).unwrap_or(source);
            let relative = match relative.file_name() {
                Some(name) if relative.is_absolute() => Path::new(name),
                _ => relative,
            };
            out_dir.join(relative).with_extension(SOY_EXTENSION)
        }
        None => source.with_extension(SOY_EXTENSION),
    }
}

/// One converted file.
#[derive(Debug)]
pub struct FileConversion {
    pub path: PathBuf,
    pub result: ConversionResult,
    pub soy: Result<String, EmitError>,
}

/// Converts `files` in parallel, each with its own parser state and
/// converter. Results come back sorted by path.
pub fn convert_files(
    files: &[PathBuf],
    options: &ConverterOptions,
    logger: &dyn Logger,
) -> Vec<FileConversion> {
    let mut conversions: Vec<FileConversion> = files
        .par_iter()
        .map(|path| {
            let converter = SoyConverter::new(options, logger);
            let result = match fs::read_to_string(path) {
                Ok(source) => converter.convert_source(path, &source),
                Err(err) => unreadable(path, &err),
            };
            let soy = result.to_soy();
            FileConversion {
                path: path.clone(),
                result,
                soy,
            }
        })
        .collect();
    conversions.sort_by(|a, b| a.path.cmp(&b.path));
    conversions
}

fn unreadable(path: &Path, err: &std::io::Error) -> ConversionResult {
    let file_name = path.display().to_string();
    ConversionResult {
        diagnostics: vec![Diagnostic::new(
            file_name.clone(),
            1,
            1,
            format!("cannot read file: {}", err),
        )],
        file_name,
        output: Vec::new(),
    }
}

/// Compilation result.
#[derive(Debug)]
pub struct CompilationResult {
    pub files: Vec<FileConversion>,
    /// Outputs written to disk.
    pub written: Vec<PathBuf>,
}

impl CompilationResult {
    pub fn diagnostics(&self) -> Vec<&Diagnostic> {
        self.files
            .iter()
            .flat_map(|file| &file.result.diagnostics)
            .collect()
    }

    pub fn serialization_failures(&self) -> Vec<(&Path, &EmitError)> {
        self.files
            .iter()
            .filter_map(|file| file.soy.as_ref().err().map(|err| (file.path.as_path(), err)))
            .collect()
    }
}

/// Converts `root_names` and writes every output that serialized.
pub fn perform_conversion(
    root_names: &[PathBuf],
    options: &ConverterOptions,
    out_dir: Option<&Path>,
    logger: &dyn Logger,
) -> anyhow::Result<CompilationResult> {
    logger.info(&format!("Converting {} files...", root_names.len()));
    let files = convert_files(root_names, options, logger);

    let mut written = Vec::new();
    for file in &files {
        let Ok(soy) = &file.soy else {
            continue;
        };
        let output_path = output_path_for(&file.path, &options.root_dir, out_dir);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&output_path, soy)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        logger.debug(&format!("Wrote {}", output_path.display()));
        written.push(output_path);
    }
    logger.info(&format!(
        "Wrote {} of {} files",
        written.len(),
        files.len()
    ));
    Ok(CompilationResult { files, written })
}

/// Get exit code from compilation result: 1 when anything was reported or
/// failed to serialize.
pub fn exit_code_from_result(result: &CompilationResult) -> i32 {
    if result.diagnostics().is_empty() && result.serialization_failures().is_empty() {
        0
    } else {
        1
    }
}
