pub mod bounds;
pub mod review;
pub mod ssn;
pub mod validate;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use intake_validation::{IntakeConfig, IntakeError, MemoryStore, ValidationSession};

/// Read a form snapshot; `.json` files are JSON, anything else TOML.
pub fn load_snapshot(path: &Path) -> Result<MemoryStore> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {:?}", path))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let store = if is_json {
        MemoryStore::from_json(&content)
    } else {
        MemoryStore::from_toml(&content)
    };
    store.with_context(|| format!("Invalid snapshot: {:?}", path))
}

pub fn parse_today(today: Option<&str>) -> Result<NaiveDate> {
    match today {
        None => Ok(Local::now().date_naive()),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
            IntakeError::InvalidDate {
                value: value.to_string(),
            }
            .into()
        }),
    }
}

pub fn open_session(
    file: &Path,
    today: Option<&str>,
    config: IntakeConfig,
) -> Result<ValidationSession<MemoryStore>> {
    let store = load_snapshot(file)?;
    let today = parse_today(today)?;
    Ok(ValidationSession::new(store, today, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_validation::{FieldId, FieldStore};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_load_snapshot_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let json = dir.path().join("form.json");
        fs::write(&json, r#"{"values":{"zip":"44301"}}"#).unwrap();
        assert_eq!(load_snapshot(&json).unwrap().value(FieldId::Zip), "44301");

        let toml = dir.path().join("form.toml");
        fs::write(&toml, "[values]\nzip = \"44302\"\n").unwrap();
        assert_eq!(load_snapshot(&toml).unwrap().value(FieldId::Zip), "44302");

        let bad = dir.path().join("bad.json");
        fs::write(&bad, "[values]").unwrap();
        assert!(load_snapshot(&bad).is_err());
    }

    #[test]
    fn test_parse_today() {
        assert_eq!(
            parse_today(Some("2026-10-19")).unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
        );
        let err = parse_today(Some("10/19/2026")).unwrap_err();
        assert!(err.to_string().contains("expected YYYY-MM-DD"));
    }
}
