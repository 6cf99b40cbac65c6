use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use intake_validation::IntakeConfig;
use serde::Serialize;

use super::open_session;

#[derive(Serialize)]
struct Report<'a> {
    valid: bool,
    submit_visible: bool,
    errors: Vec<ErrorLine<'a>>,
}

#[derive(Serialize)]
struct ErrorLine<'a> {
    field: &'static str,
    slot: String,
    message: &'a str,
}

/// Full pass over the snapshot. Returns whether the form is submittable.
pub fn execute(file: &Path, today: Option<&str>, json: bool, config: IntakeConfig) -> Result<bool> {
    let mut session = open_session(file, today, config)?;
    let valid = session.validate_form();

    let errors: Vec<ErrorLine> = session
        .errors()
        .errors()
        .map(|(field, message)| ErrorLine {
            field: field.as_str(),
            slot: field.error_slot(),
            message,
        })
        .collect();

    if json {
        let report = Report {
            valid,
            submit_visible: session.submit_visible(),
            errors,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(valid);
    }

    if valid {
        println!("{}", "✓ Form is valid, submit enabled".green().bold());
    } else {
        println!(
            "{}",
            format!("✗ {} field(s) need attention", errors.len()).red().bold()
        );
        println!();
        for line in &errors {
            println!("  {:<14} {}", line.field.cyan(), line.message);
        }
    }

    Ok(valid)
}
