use anyhow::Result;
use colored::Colorize;
use intake_validation::{slider_label, today_banner, DateBounds, FieldId, IntakeConfig};

use super::parse_today;

pub fn execute(today: Option<&str>, config: &IntakeConfig) -> Result<()> {
    let today = parse_today(today)?;
    let bounds = DateBounds::for_today(today, config.form.max_age_years);

    println!("{}", today_banner(today).bold());
    println!();
    println!("DOB:     {} .. {}", bounds.dob_min.cyan(), bounds.dob_max.cyan());
    println!("Move-in: {} ..", bounds.movein_min.cyan());
    if let Some(label) = slider_label(FieldId::Weight, "5", &config.review.weight_unit) {
        println!("Weight slider starts at {}", label);
    }

    Ok(())
}
