//! Console output for progress and errors.
//!
//! Message text is built by `format_*` functions so it can be checked
//! without a terminal; `display_*` functions style and print it.

use console::style;

use crate::cli::orchestration::ComponentOutcome;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// One progress line for a processed component.
pub fn format_outcome(outcome: &ComponentOutcome) -> String {
    outcome.to_string()
}

/// Print the progress line for a component, followed by the preview
/// document in dry-run mode.
pub fn display_outcome(outcome: &ComponentOutcome) {
    match outcome {
        ComponentOutcome::Updated { .. } => display_success(&format_outcome(outcome)),
        ComponentOutcome::Deleted { .. } | ComponentOutcome::UpToDate { .. } => {
            display_status(&format_outcome(outcome))
        }
        ComponentOutcome::Preview { document, .. } => {
            display_status(&format_outcome(outcome));
            println!("{}", style(document).dim());
        }
    }
}

/// Lines listing the catalog, one per component.
pub fn format_components(components: &[(String, String, String)]) -> Vec<String> {
    components
        .iter()
        .map(|(id, version, path)| format!("  - {} {} ({})", id, version, path))
        .collect()
}

/// Display catalog components.
///
/// # Arguments
/// * `components` - `(id, version, directory)` triples
pub fn display_components(components: &[(String, String, String)]) {
    println!("{}", style("Configured components:").bold());
    for line in format_components(components) {
        println!("{}", line);
    }
}
