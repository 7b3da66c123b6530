use super::diagnostic::Diagnostic;

/// How diagnostics are printed by the command line driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagnosticFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for DiagnosticFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(DiagnosticFormat::Text),
            "json" => Ok(DiagnosticFormat::Json),
            other => Err(format!("unknown diagnostic format '{}'", other)),
        }
    }
}

/// Format diagnostics for display.
pub fn format_diagnostics(diagnostics: &[Diagnostic], format: DiagnosticFormat) -> String {
    match format {
        DiagnosticFormat::Text => {
            let mut output = String::new();
            for diag in diagnostics {
                output.push_str(&diag.to_string());
                output.push('\n');
            }
            output
        }
        DiagnosticFormat::Json => {
            // Serializing plain strings and integers cannot fail.
            serde_json::to_string_pretty(diagnostics).unwrap_or_else(|_| "[]".to_string())
        }
    }
}
