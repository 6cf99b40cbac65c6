// File: src/transform.rs
// Purpose: Value rewrites that run before validation, and review formatting

use crate::fields::FieldId;
use crate::store::FieldStore;
use crate::validators::trim_form_value;

pub const DEFAULT_MASK: char = '•';

/// Trim and lowercase the user id in place. Returns the normalized value,
/// or an empty string when the form has no user id input.
pub fn normalize_user_id<S: FieldStore + ?Sized>(store: &mut S) -> String {
    let Some(raw) = store.get(FieldId::UserId) else {
        return String::new();
    };
    let normalized = trim_form_value(&raw).to_lowercase();
    if normalized != raw {
        tracing::debug!(from = %raw, to = %normalized, "normalized user id");
        store.set(FieldId::UserId, normalized.clone());
    }
    normalized
}

/// Progressive `DDD-DD-DDDD` grouping of the first nine digits in `raw`.
///
/// ```
/// use intake_validation::format_ssn;
/// assert_eq!(format_ssn("12"), "12");
/// assert_eq!(format_ssn("1234"), "123-4");
/// assert_eq!(format_ssn("123 45 6789 0"), "123-45-6789");
/// ```
pub fn format_ssn(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).take(9).collect();
    let mut formatted = String::with_capacity(11);
    for (i, digit) in digits.chars().enumerate() {
        if i == 3 || i == 5 {
            formatted.push('-');
        }
        formatted.push(digit);
    }
    formatted
}

/// Reformat the SSN input in place, as done on every keystroke.
pub fn format_ssn_input<S: FieldStore + ?Sized>(store: &mut S) {
    if let Some(raw) = store.get(FieldId::Ssn) {
        let formatted = format_ssn(&raw);
        if formatted != raw {
            store.set(FieldId::Ssn, formatted);
        }
    }
}

/// Mask every digit but the last four with [`DEFAULT_MASK`]; blank is "N/A".
pub fn mask_ssn(raw: &str) -> String {
    mask_ssn_with(raw, DEFAULT_MASK)
}

pub fn mask_ssn_with(raw: &str, mask: char) -> String {
    if raw.is_empty() {
        return "N/A".to_string();
    }
    let total_digits = raw.chars().filter(char::is_ascii_digit).count();
    let hidden = total_digits.saturating_sub(4);
    let mut seen = 0;
    raw.chars()
        .map(|c| {
            if !c.is_ascii_digit() {
                return c;
            }
            seen += 1;
            if seen <= hidden {
                mask
            } else {
                c
            }
        })
        .collect()
}

/// Leading five digits of the entered zip, or empty when it doesn't start
/// with five digits.
pub fn truncate_zip(raw: &str) -> String {
    match raw.get(..5) {
        Some(head) if head.bytes().all(|b| b.is_ascii_digit()) => head.to_string(),
        _ => String::new(),
    }
}
