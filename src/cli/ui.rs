use colored::*;
use console::Term;
use textwrap::wrap;

use session_rules::{ Outcome, OutcomeReport, RuleInfo, Severity };

/// Print a section header
pub fn print_header(title: &str) {
    let title = format!(" {} ", title);
    println!("\n{}\n", title.bold().white().on_blue());
}

/// Print text wrapped to the terminal width
pub fn print_text(text: &str) {
    let width = Term::stdout().size().1 as usize;
    for line in text.lines() {
        for wrapped_line in wrap(line, width.saturating_sub(10).max(20)) {
            println!("{}", wrapped_line);
        }
    }
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "WARNING:".yellow().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "SUCCESS:".green().bold(), message);
}

/// Print information
pub fn print_info(message: &str) {
    println!("{} {}", "INFO:".blue().bold(), message);
}

/// Print a formatted result
pub fn print_result(label: &str, value: &str) {
    println!("{}: {}", label.bold(), value);
}

/// Print one rule outcome with color: red blocks, amber cautions, green passes
pub fn print_outcome(rule: &str, outcome: &Outcome) {
    let (marker, label) = match outcome.severity() {
        Severity::Error => ("✗".red().bold(), rule.red().bold()),
        Severity::Warning => ("!".yellow().bold(), rule.yellow().bold()),
        Severity::Info => ("✓".green().bold(), rule.green()),
    };

    if outcome.message().is_empty() {
        println!("{} {}", marker, label);
    } else {
        println!("{} {}: {}", marker, label, outcome.message());
    }

    if !outcome.payload().is_empty() {
        let mut keys: Vec<&String> = outcome.payload().keys().collect();
        keys.sort();
        for key in keys {
            println!("    {} = {}", key.dimmed(), outcome.payload()[key]);
        }
    }
}

/// Print every outcome of a report followed by a verdict line
pub fn print_report(report: &OutcomeReport) {
    for entry in report.entries() {
        print_outcome(&entry.rule, &entry.outcome);
    }
    println!();

    let warnings = report.warnings().count();
    if let Some(first) = report.first_error() {
        print_error(&format!("Blocked by {}: {}", first.rule, first.outcome.message()));
    } else if warnings > 0 {
        print_warning(&format!("Accepted with {} warning(s)", warnings));
    } else {
        print_success("All checks passed");
    }
}

/// Print the list of registered rules
pub fn print_rules(rules: &[RuleInfo]) {
    for info in rules {
        println!("{} {}", info.name.bold(), format!("({:?})", info.target).dimmed());
        print_text(&format!("    {}", info.description));
    }
}
