//! Diagnostics output shared by the commands.

use apigen_core::{Diagnostics, Severity};
use console::style;
use tracing::{error, warn};

/// Log every diagnostic and return the number of (warnings, errors).
pub fn log_diagnostics(diagnostics: &Diagnostics) -> (usize, usize) {
    let mut warnings = 0;
    let mut errors = 0;
    for diagnostic in diagnostics {
        match diagnostic.severity {
            Severity::Warning => {
                warnings += 1;
                warn!(kind = diagnostic.kind.as_str(), subject = %diagnostic.subject, "{}", diagnostic.message);
            }
            Severity::Error => {
                errors += 1;
                error!(kind = diagnostic.kind.as_str(), subject = %diagnostic.subject, "{}", diagnostic.message);
            }
        }
    }
    (warnings, errors)
}

/// `2 warnings, 1 error` (empty when there is nothing to report).
pub fn counts(warnings: usize, errors: usize) -> String {
    let plural = |n: usize, word: &str| {
        if n == 1 {
            format!("{n} {word}")
        } else {
            format!("{n} {word}s")
        }
    };

    let mut parts = Vec::new();
    if warnings > 0 {
        parts.push(style(plural(warnings, "warning")).yellow().to_string());
    }
    if errors > 0 {
        parts.push(style(plural(errors, "error")).red().to_string());
    }
    parts.join(", ")
}

/// Print the closing line of a command.
pub fn print_summary(headline: &str, warnings: usize, errors: usize) {
    let mark = if errors > 0 {
        style("✗").red().bold()
    } else {
        style("✓").green().bold()
    };
    let details = counts(warnings, errors);
    if details.is_empty() {
        println!("{mark} {headline}");
    } else {
        println!("{mark} {headline} ({details})");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apigen_core::DiagnosticKind;

    #[test]
    fn test_log_diagnostics_counts() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warn(DiagnosticKind::UntaggedOperation, "GET /health", "skipped");
        diagnostics.warn(DiagnosticKind::NameCollision, "GET /items", "renamed");
        diagnostics.error(DiagnosticKind::WriteFailed, "defaults.ts", "denied");
        assert_eq!(log_diagnostics(&diagnostics), (2, 1));
    }

    #[test]
    fn test_counts() {
        console::set_colors_enabled(false);
        assert_eq!(counts(0, 0), "");
        assert_eq!(counts(1, 0), "1 warning");
        assert_eq!(counts(2, 3), "2 warnings, 3 errors");
    }
}
