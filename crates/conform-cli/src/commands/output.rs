//! Shared output formatting for conformance reports.

use anyhow::Result;
use conform_core::{ConformanceReport, RuleStatus};

use crate::OutputFormat;

/// Print a conformance report in the specified format.
pub fn print(report: &ConformanceReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(report),
        OutputFormat::Json => return print_json(report),
        OutputFormat::Compact => print!("{}", report.format_compact()),
    }
    Ok(())
}

fn print_text(report: &ConformanceReport) {
    for outcome in &report.outcomes {
        match outcome.status {
            RuleStatus::Passed => println!("\x1b[32mPASS\x1b[0m {}", outcome.rule),
            RuleStatus::NotRun => println!("\x1b[33mSKIP\x1b[0m {} (not run)", outcome.rule),
            RuleStatus::Failed => {
                println!(
                    "\x1b[31mFAIL\x1b[0m {} ({} violation(s))",
                    outcome.rule,
                    outcome.violations.len()
                );
                for v in &outcome.violations {
                    println!("  {}: {}", v.symbol, v.reason);
                }
            }
        }
    }

    let (passed, failed, not_run) = report.count_by_status();
    let summary_color = if failed > 0 { "\x1b[31m" } else { "\x1b[32m" };
    println!(
        "\n{}{} rule(s): {} passed, {} failed, {} not run\x1b[0m",
        summary_color,
        report.outcomes.len(),
        passed,
        failed,
        not_run
    );
}

fn print_json(report: &ConformanceReport) -> Result<()> {
    let json = report.format_json()?;
    println!("{json}");
    Ok(())
}
