// File: src/affordance.rs
// Purpose: Computed UI hints: date input bounds, slider labels, today banner

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields::FieldId;
use crate::validators::DobBounds;

/// `min`/`max` attributes for the date inputs, as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateBounds {
    pub dob_min: String,
    pub dob_max: String,
    pub movein_min: String,
}

impl DateBounds {
    pub fn for_today(today: NaiveDate, max_age_years: u32) -> Self {
        Self::from_dob(&DobBounds::new(today, max_age_years))
    }

    pub fn from_dob(dob: &DobBounds) -> Self {
        let iso = |d: NaiveDate| d.format("%Y-%m-%d").to_string();
        Self {
            dob_min: iso(dob.min),
            dob_max: iso(dob.max),
            movein_min: iso(dob.max),
        }
    }
}

/// Text shown next to a range slider. Only pain and weight have one.
pub fn slider_label(field: FieldId, raw: &str, weight_unit: &str) -> Option<String> {
    match field {
        FieldId::Pain => Some(raw.to_string()),
        FieldId::Weight => Some(format!("{raw} {weight_unit}")),
        _ => None,
    }
}

/// Long-form date for the page header, e.g. "Monday, October 19, 2026".
pub fn today_banner(today: NaiveDate) -> String {
    today.format("%A, %B %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_bounds() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let bounds = DateBounds::for_today(today, 120);
        assert_eq!(bounds.dob_min, "1906-10-19");
        assert_eq!(bounds.dob_max, "2026-10-19");
        assert_eq!(bounds.movein_min, "2026-10-19");
    }

    #[test]
    fn test_slider_labels() {
        assert_eq!(slider_label(FieldId::Pain, "4", "lbs").as_deref(), Some("4"));
        assert_eq!(
            slider_label(FieldId::Weight, "180", "lbs").as_deref(),
            Some("180 lbs")
        );
        assert_eq!(slider_label(FieldId::City, "x", "lbs"), None);
    }

    #[test]
    fn test_today_banner() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert_eq!(today_banner(today), "Monday, March 2, 2026");
    }
}
