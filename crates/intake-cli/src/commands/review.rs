use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use intake_validation::IntakeConfig;

use super::open_session;

/// Validate, then print the review rows. Nothing is printed for an invalid form
/// beyond the failing fields.
pub fn execute(file: &Path, today: Option<&str>, json: bool, config: IntakeConfig) -> Result<bool> {
    let mut session = open_session(file, today, config)?;

    let Some(rows) = session.review() else {
        println!("{}", "✗ Review unavailable until the form is valid".red().bold());
        for (field, message) in session.errors().errors() {
            println!("  {:<14} {}", field.as_str().cyan(), message);
        }
        return Ok(false);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(true);
    }

    println!("{}", "Review".bold());
    println!();
    for row in &rows {
        println!("{} {}", format!("{}:", row.label).bold(), row.value);
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_review_needs_a_valid_form() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("form.toml");
        fs::write(&file, "[values]\nzip = \"1234\"\n").unwrap();
        let passed = execute(&file, Some("2026-10-19"), false, IntakeConfig::default());
        assert!(!passed.unwrap());

        fs::write(&file, "[values]\nzip = \"44301\"\n").unwrap();
        let passed = execute(&file, Some("2026-10-19"), true, IntakeConfig::default());
        assert!(passed.unwrap());
    }
}
