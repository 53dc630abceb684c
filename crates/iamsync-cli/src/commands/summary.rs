//! Run summary rendering

use colored::Colorize;

use iamsync_core::{Operation, SummaryReport};

use crate::error::{CliError, Result};

/// Print `report` for humans, or as JSON.
pub fn print_report(report: &SummaryReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", render(report));
    }
    Ok(())
}

/// Human-readable summary text.
pub fn render(report: &SummaryReport) -> String {
    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!("{}\n", "Summary".bold()));

    if report.types.is_empty() {
        out.push_str("   Nothing was processed.\n");
    }

    for entry in &report.types {
        let counts: Vec<String> = [
            (Operation::Export, entry.exported),
            (Operation::Import, entry.imported),
            (Operation::Update, entry.updated),
            (Operation::Delete, entry.deleted),
        ]
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(operation, count)| format!("{} {}", count, operation.past_tense()))
        .collect();

        let counts = if counts.is_empty() {
            "no changes".dimmed().to_string()
        } else {
            counts.join(", ")
        };
        out.push_str(&format!("   {} {}: {}\n", "-".blue(), entry.resource_type.to_string().cyan(), counts));

        for failure in &entry.failed {
            out.push_str(&format!(
                "     {} {} ({})\n",
                "!".red(),
                failure.name,
                failure.operation
            ));
        }
    }

    for error in &report.errors {
        out.push_str(&format!(
            "   {} {}: {}\n",
            "!".red(),
            error.resource_type.to_string().cyan(),
            error.message
        ));
    }

    let failures = report.total_failures();
    if failures == 0 {
        out.push_str(&format!(
            "{} {} operation(s) succeeded.\n",
            "OK".green().bold(),
            report.total_successes()
        ));
    } else {
        out.push_str(&format!(
            "{} {} operation(s) succeeded, {} failed.\n",
            "FAILED".red().bold(),
            report.total_successes(),
            failures
        ));
    }
    out
}

/// Turn recorded failures into the command's error.
pub fn ensure_clean(report: &SummaryReport) -> Result<()> {
    if report.is_clean() {
        return Ok(());
    }
    Err(CliError::user(format!(
        "{} operation(s) failed",
        report.total_failures()
    )))
}
