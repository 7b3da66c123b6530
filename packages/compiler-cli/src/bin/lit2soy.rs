/**
 * lit2soy
 *
 * Converts lit-html templates and LitElement components to Closure Templates.
 */
use clap::{Arg, ArgAction, Command};
use soy_compiler_cli::config::ConverterOptions;
use soy_compiler_cli::diagnostics::{format_diagnostics, Diagnostic, DiagnosticFormat};
use soy_compiler_cli::logging::{ConsoleLogger, Logger};
use soy_compiler_cli::perform_compile::{
    exit_code_from_result, perform_conversion, read_configuration,
};
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    let matches = Command::new("lit2soy")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Converts lit-html templates to Closure Templates (Soy)")
        .arg(
            Arg::new("files")
                .value_name("FILE")
                .num_args(0..)
                .help("Source files to convert"),
        )
        .arg(
            Arg::new("project")
                .short('p')
                .long("project")
                .value_name("PATH")
                .help("Path to lit-soy.json, or a directory containing one"),
        )
        .arg(
            Arg::new("root-dir")
                .long("root-dir")
                .value_name("DIR")
                .help("Directory namespaces are derived relative to"),
        )
        .arg(
            Arg::new("out-dir")
                .long("out-dir")
                .value_name("DIR")
                .help("Directory to write .soy files to (default: next to each source)"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_name("FORMAT")
                .value_parser(["text", "json"])
                .default_value("text")
                .help("Diagnostic output format"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Log every declaration considered"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Only log errors"),
        )
        .get_matches();

    let logger = ConsoleLogger::from_flags(matches.get_flag("verbose"), matches.get_flag("quiet"));
    let format: DiagnosticFormat = matches
        .get_one::<String>("format")
        .and_then(|f| f.parse().ok())
        .unwrap_or_default();

    let files: Vec<PathBuf> = matches
        .get_many::<String>("files")
        .map(|files| files.map(PathBuf::from).collect())
        .unwrap_or_default();

    let (root_names, mut options, mut out_dir) = match matches.get_one::<String>("project") {
        Some(project) => match read_configuration(Path::new(project)) {
            Ok(parsed) => {
                let root_names = if files.is_empty() {
                    parsed.root_names
                } else {
                    files
                };
                (root_names, parsed.options, parsed.out_dir)
            }
            Err(err) => {
                logger.error(&format!("{:#}", err));
                process::exit(1);
            }
        },
        None => (files, ConverterOptions::default(), None),
    };
    if let Some(root_dir) = matches.get_one::<String>("root-dir") {
        options.root_dir = PathBuf::from(root_dir);
    }
    if let Some(dir) = matches.get_one::<String>("out-dir") {
        out_dir = Some(PathBuf::from(dir));
    }

    if root_names.is_empty() {
        logger.error("No input files. Pass source files or --project.");
        process::exit(1);
    }

    let result = match perform_conversion(&root_names, &options, out_dir.as_deref(), &logger) {
        Ok(result) => result,
        Err(err) => {
            logger.error(&format!("{:#}", err));
            process::exit(1);
        }
    };

    let diagnostics: Vec<Diagnostic> = result.diagnostics().into_iter().cloned().collect();
    if !diagnostics.is_empty() {
        eprint!("{}", format_diagnostics(&diagnostics, format));
        if format == DiagnosticFormat::Json {
            eprintln!();
        }
    }
    for (path, err) in result.serialization_failures() {
        logger.warn(&format!("{}: no output written ({})", path.display(), err));
    }

    process::exit(exit_code_from_result(&result));
}
