// File: src/validators.rs
// Purpose: Per-field rules for the intake form

use chrono::{Months, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::fields::FieldId;
use crate::store::FieldStore;

// `[0-9]` rather than `\d`: the regex crate's `\d` matches any Unicode digit.
static USER_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]{4,19}$").unwrap());

static FIRST_NAME_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z'\-]{1,30}$").unwrap());

static MIDDLE_INITIAL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]$").unwrap());

// Browser whitespace: the Unicode space separators plus BOM, without NEL (U+0085).
const FORM_WHITESPACE_CLASS: &str =
    r"[\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]";

static LAST_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^[A-Za-z'\-]+(?:{}?(?:2nd|3rd|4th|5th))?$",
        FORM_WHITESPACE_CLASS
    ))
    .unwrap()
});

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{3}-[0-9]{3}-[0-9]{4}$").unwrap());

static ZIP_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{5}$").unwrap());

static SSN_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{3}-[0-9]{2}-[0-9]{4}$").unwrap());

pub const PAIN_RANGE: (i64, i64) = (1, 10);
pub const WEIGHT_RANGE: (i64, i64) = (5, 400);

/// Outcome of one rule evaluation.
///
/// `message` is non-empty exactly when `valid` is false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    valid: bool,
    message: String,
}

impl Verdict {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        let message = message.into();
        debug_assert!(!message.is_empty(), "a failing verdict needs a message");
        Self {
            valid: false,
            message,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Whitespace as the browser's `trim()` and `\s` see it. Differs from
/// [`char::is_whitespace`] on U+FEFF (included) and U+0085 (excluded).
pub fn is_form_whitespace(c: char) -> bool {
    match c {
        '\u{FEFF}' => true,
        '\u{0085}' => false,
        c => c.is_whitespace(),
    }
}

/// `raw` with leading and trailing [`is_form_whitespace`] removed.
pub fn trim_form_value(raw: &str) -> &str {
    raw.trim_matches(is_form_whitespace)
}

/// Accepted date-of-birth window, pinned to the session's "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DobBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
    pub max_age_years: u32,
}

impl DobBounds {
    /// `[today - max_age_years, today]`. A Feb 29 "today" clamps the lower
    /// bound to Feb 28.
    pub fn new(today: NaiveDate, max_age_years: u32) -> Self {
        let min = today
            .checked_sub_months(Months::new(max_age_years.saturating_mul(12)))
            .unwrap_or(NaiveDate::MIN);
        Self {
            min,
            max: today,
            max_age_years,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.min && date <= self.max
    }
}

/// Run the rule for `field` against the store.
///
/// Returns `None` when the field is not on the form, or has no rule of its
/// own (move-in date, and the password pair which the cross-field rules own).
/// Email is written back trimmed and lowercased before it is checked.
pub fn validate_field<S: FieldStore + ?Sized>(
    field: FieldId,
    store: &mut S,
    dob: &DobBounds,
) -> Option<Verdict> {
    let raw = store.get(field)?;
    let verdict = match field {
        FieldId::UserId => validate_user_id(&raw),
        FieldId::FirstName => validate_first_name(&raw),
        FieldId::MiddleInitial => validate_middle_initial(&raw),
        FieldId::LastName => validate_last_name(&raw),
        FieldId::Dob => validate_dob(&raw, dob),
        FieldId::Email => {
            if let Some(lowered) = normalize_email(&raw) {
                store.set(FieldId::Email, lowered);
            }
            validate_email(&raw)
        }
        FieldId::Phone => validate_phone(&raw),
        FieldId::Address1 => validate_address1(&raw),
        FieldId::Address2 => validate_address2(&raw),
        FieldId::City => validate_city(&raw),
        FieldId::State => validate_state(&raw),
        FieldId::Zip => validate_zip(&raw),
        FieldId::Ssn => validate_ssn(&raw),
        FieldId::Pain => validate_pain(&raw),
        FieldId::Weight => validate_weight(&raw),
        FieldId::Symptoms => validate_symptoms(&raw),
        FieldId::MoveIn | FieldId::Password | FieldId::ConfirmPassword => return None,
    };
    Some(verdict)
}

pub fn validate_user_id(raw: &str) -> Verdict {
    let value = trim_form_value(raw);
    if value.is_empty() {
        return Verdict::fail("User ID is required.");
    }
    if !USER_ID_REGEX.is_match(value) {
        return Verdict::fail("5–20 chars; start with letter; letters, numbers, - or _ only.");
    }
    Verdict::ok()
}

pub fn validate_first_name(raw: &str) -> Verdict {
    let value = trim_form_value(raw);
    if value.is_empty() {
        return Verdict::fail("First name is required.");
    }
    if !FIRST_NAME_REGEX.is_match(value) {
        return Verdict::fail("Letters, apostrophes, and dashes only (1–30).");
    }
    Verdict::ok()
}

pub fn validate_middle_initial(raw: &str) -> Verdict {
    let value = trim_form_value(raw);
    if value.is_empty() || MIDDLE_INITIAL_REGEX.is_match(value) {
        return Verdict::ok();
    }
    Verdict::fail("Middle initial must be 1 letter or blank.")
}

pub fn validate_last_name(raw: &str) -> Verdict {
    let value = trim_form_value(raw);
    if value.is_empty() {
        return Verdict::fail("Last name is required.");
    }
    // The 30 limit covers the suffix too, and the whole value must sit on one line.
    let single_line = !value.contains(['\n', '\r', '\u{2028}', '\u{2029}']);
    if !single_line || value.chars().count() > 30 || !LAST_NAME_REGEX.is_match(value) {
        return Verdict::fail("1–30 letters/apostrophes/dashes; optional 2nd–5th.");
    }
    Verdict::ok()
}

pub fn validate_dob(raw: &str, bounds: &DobBounds) -> Verdict {
    if raw.is_empty() {
        return Verdict::fail("Date of birth is required.");
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) if bounds.contains(date) => Verdict::ok(),
        _ => Verdict::fail(format!(
            "DOB must be within the last {} years and not in the future.",
            bounds.max_age_years
        )),
    }
}

/// Trimmed, lowercased address; `None` for a blank input, which is left as typed.
pub fn normalize_email(raw: &str) -> Option<String> {
    let value = trim_form_value(raw);
    (!value.is_empty()).then(|| value.to_lowercase())
}

pub fn validate_email(raw: &str) -> Verdict {
    let Some(value) = normalize_email(raw) else {
        return Verdict::fail("Email is required.");
    };
    if !EMAIL_REGEX.is_match(&value) {
        return Verdict::fail("Email must be in the format name@domain.tld.");
    }
    Verdict::ok()
}

pub fn validate_phone(raw: &str) -> Verdict {
    let value = trim_form_value(raw);
    if value.is_empty() {
        return Verdict::fail("Phone number is required.");
    }
    if !PHONE_REGEX.is_match(value) {
        return Verdict::fail("Use format 000-000-0000.");
    }
    Verdict::ok()
}

fn length_between(value: &str, min: usize, max: usize) -> bool {
    let len = value.chars().count();
    len >= min && len <= max
}

pub fn validate_address1(raw: &str) -> Verdict {
    let value = trim_form_value(raw);
    if value.is_empty() {
        return Verdict::fail("Address Line 1 is required.");
    }
    if !length_between(value, 2, 30) {
        return Verdict::fail("2–30 characters required.");
    }
    Verdict::ok()
}

pub fn validate_address2(raw: &str) -> Verdict {
    let value = trim_form_value(raw);
    if value.is_empty() || length_between(value, 2, 30) {
        return Verdict::ok();
    }
    Verdict::fail("If entered, must be 2–30 characters.")
}

pub fn validate_city(raw: &str) -> Verdict {
    let value = trim_form_value(raw);
    if value.is_empty() {
        return Verdict::fail("City is required.");
    }
    if !length_between(value, 2, 30) {
        return Verdict::fail("2–30 characters required.");
    }
    Verdict::ok()
}

/// Any selected option passes; the placeholder option has an empty value.
pub fn validate_state(raw: &str) -> Verdict {
    if raw.is_empty() {
        return Verdict::fail("Please select a state.");
    }
    Verdict::ok()
}

pub fn validate_zip(raw: &str) -> Verdict {
    let value = trim_form_value(raw);
    if value.is_empty() {
        return Verdict::fail("Zip code is required.");
    }
    if !ZIP_REGEX.is_match(value) {
        return Verdict::fail("Zip must be exactly 5 digits.");
    }
    Verdict::ok()
}

pub fn validate_ssn(raw: &str) -> Verdict {
    let value = trim_form_value(raw);
    if value.is_empty() || SSN_REGEX.is_match(value) {
        return Verdict::ok();
    }
    Verdict::fail("SSN must be 9 digits, formatted 000-00-0000.")
}

pub fn validate_pain(raw: &str) -> Verdict {
    match parse_leading_int(raw) {
        Some(level) if (PAIN_RANGE.0..=PAIN_RANGE.1).contains(&level) => Verdict::ok(),
        _ => Verdict::fail("Pain level must be between 1 and 10."),
    }
}

pub fn validate_weight(raw: &str) -> Verdict {
    match parse_leading_int(raw) {
        Some(lbs) if (WEIGHT_RANGE.0..=WEIGHT_RANGE.1).contains(&lbs) => Verdict::ok(),
        _ => Verdict::fail("Weight must be between 5 and 400 lbs."),
    }
}

pub fn validate_symptoms(raw: &str) -> Verdict {
    if raw.contains('"') {
        return Verdict::fail("Please avoid using double quotes (\").");
    }
    Verdict::ok()
}

/// Base-10 integer prefix of `raw`, the way browsers read a numeric input:
/// leading whitespace is skipped, an optional sign is honored, and parsing
/// stops at the first non-digit. `None` when no digit follows.
/// Out-of-range magnitudes saturate.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start_matches(is_form_whitespace);
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let magnitude = rest[..digits_len].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}
