use colored::*;
use conform_validator::{BatchSummary, FileOutcome, FileStatus};
use serde_json::{Value, json};

pub fn print_batch_report(summary: &BatchSummary, format: &str) {
    match format {
        "json" => print_json_report(summary),
        _ => print_text_report(summary),
    }
}

fn print_text_report(summary: &BatchSummary) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    for outcome in &summary.outcomes {
        print_outcome(outcome);
    }

    if summary.passed() {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    println!("\n{}", "Summary:".bold());
    println!("  Valid files:   {}", summary.valid_count());
    println!("  Invalid files: {}", summary.invalid_count());
    println!("  Failed files:  {}", summary.failed_count());
    println!("  Skipped files: {}", summary.skipped_count());
    println!("  Total errors:  {}", summary.error_count());
    println!("  Duration:      {}ms", summary.duration_ms);
    println!("{}", "═".repeat(60));
}

fn print_outcome(outcome: &FileOutcome) {
    match &outcome.status {
        FileStatus::Checked(report) if report.is_valid() => {
            println!(
                "\n{} {} ({} rows)",
                "✓".green().bold(),
                outcome.path.green(),
                report.rows
            );
        }
        FileStatus::Checked(report) => {
            println!(
                "\n{} {} ({} rows, {} errors)",
                "✗".red().bold(),
                outcome.path.red(),
                report.rows,
                report.errors.len()
            );
            for (i, error) in report.errors.iter().enumerate() {
                println!("  {}. {}", i + 1, error.to_string().red());
            }
        }
        FileStatus::Failed(error) => {
            println!("\n{} {}", "✗".red().bold(), outcome.path.red());
            println!("  {}", error.to_string().red());
        }
        FileStatus::Skipped => {
            println!(
                "\n{} {} {}",
                "-".yellow().bold(),
                outcome.path.yellow(),
                "(skipped)".yellow()
            );
        }
    }
}

fn outcome_json(outcome: &FileOutcome) -> Value {
    match &outcome.status {
        FileStatus::Checked(report) => json!({
            "path": outcome.path,
            "dataset": outcome.dataset,
            "status": if report.is_valid() { "valid" } else { "invalid" },
            "rows": report.rows,
            "errors": report.errors,
        }),
        FileStatus::Failed(error) => json!({
            "path": outcome.path,
            "dataset": outcome.dataset,
            "status": "failed",
            "error": error.to_string(),
        }),
        FileStatus::Skipped => json!({
            "path": outcome.path,
            "dataset": outcome.dataset,
            "status": "skipped",
        }),
    }
}

fn print_json_report(summary: &BatchSummary) {
    let output = json!({
        "passed": summary.passed(),
        "files": summary.outcomes.iter().map(outcome_json).collect::<Vec<_>>(),
        "summary": {
            "valid_count": summary.valid_count(),
            "invalid_count": summary.invalid_count(),
            "failed_count": summary.failed_count(),
            "skipped_count": summary.skipped_count(),
            "error_count": summary.error_count(),
            "duration_ms": summary.duration_ms,
        }
    });

    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", output),
    }
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
