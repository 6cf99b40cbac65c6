//! Password validation: strength plus the cross-field identity checks

use serde::Serialize;

use crate::fields::FieldId;
use crate::store::FieldStore;
use crate::validators::{trim_form_value, Verdict};

/// Characters that satisfy the "special character" requirement.
pub const SPECIAL_CHARS: &[char] = &[
    '!', '@', '#', '%', '^', '&', '*', '(', ')', '-', '_', '=', '+', '\\', '/', '>', '<', '.', ',',
    '`', '~',
];

pub const MIN_LEN: usize = 8;
pub const MAX_LEN: usize = 30;

/// Strength predicate: 8-30 characters with an ASCII uppercase letter, an
/// ASCII lowercase letter, an ASCII digit and one of [`SPECIAL_CHARS`], and no
/// double quote anywhere.
pub fn is_strong(password: &str) -> bool {
    let len = password.chars().count();
    let has_uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lowercase = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| SPECIAL_CHARS.contains(&c));
    let has_quote = password.contains('"');

    has_uppercase
        && has_lowercase
        && has_digit
        && has_special
        && !has_quote
        && (MIN_LEN..=MAX_LEN).contains(&len)
}

/// Verdicts for the two error slots the password rules own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordVerdicts {
    pub password: Verdict,
    pub confirm: Verdict,
}

impl PasswordVerdicts {
    pub fn is_valid(&self) -> bool {
        self.password.is_valid() && self.confirm.is_valid()
    }
}

/// The values the password rules read, already trimmed; identity values
/// are lowercased.
#[derive(Debug, Clone, Default)]
pub struct PasswordInputs {
    pub password: String,
    pub confirm: String,
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
}

impl PasswordInputs {
    /// `None` when neither password input is on the form.
    pub fn read<S: FieldStore + ?Sized>(store: &S) -> Option<Self> {
        if store.get(FieldId::Password).is_none() && store.get(FieldId::ConfirmPassword).is_none()
        {
            return None;
        }
        let trimmed = |field| trim_form_value(&store.value(field)).to_string();
        let identity = |field| trim_form_value(&store.value(field)).to_lowercase();
        Some(Self {
            password: trimmed(FieldId::Password),
            confirm: trimmed(FieldId::ConfirmPassword),
            user_id: identity(FieldId::UserId),
            first_name: identity(FieldId::FirstName),
            last_name: identity(FieldId::LastName),
        })
    }
}

/// Evaluate every password rule in order.
///
/// Nothing short-circuits: each rule that fires overwrites whatever an earlier
/// rule wrote into the same slot, so the last failing rule's message is the
/// one reported.
pub fn check_passwords(inputs: &PasswordInputs) -> PasswordVerdicts {
    let p1 = inputs.password.as_str();
    let p2 = inputs.confirm.as_str();
    let p1_lower = p1.to_lowercase();

    let mut password = Verdict::ok();
    let mut confirm = Verdict::ok();

    if p1.is_empty() {
        password = Verdict::fail("Password is required.");
    } else if !is_strong(p1) {
        password =
            Verdict::fail("8–30 chars with upper, lower, digit, and special; no double quotes.");
    }

    if p2.is_empty() {
        confirm = Verdict::fail("Please re-enter the password.");
    } else if !p1.is_empty() && p1 != p2 {
        confirm = Verdict::fail("Passwords do not match.");
    }

    let leaks = |needle: &str| !p1.is_empty() && !needle.is_empty() && p1_lower.contains(needle);

    if leaks(&inputs.user_id) {
        password = Verdict::fail("Password cannot contain your user ID.");
    }
    if leaks(&inputs.first_name) {
        password = Verdict::fail("Password cannot contain your first name.");
    }
    if leaks(&inputs.last_name) {
        password = Verdict::fail("Password cannot contain your last name.");
    }
    // Redundant with the containment check above: equality implies
    // containment, so this only changes which message wins.
    if !p1.is_empty() && !inputs.user_id.is_empty() && p1_lower == inputs.user_id {
        password = Verdict::fail("Password cannot equal your user ID.");
    }

    PasswordVerdicts { password, confirm }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(password: &str, confirm: &str) -> PasswordInputs {
        PasswordInputs {
            password: password.to_string(),
            confirm: confirm.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_strength() {
        assert!(is_strong("Passw0rd!"));
        assert!(is_strong("Secure~Pass1"));
        assert!(!is_strong("Pa0!"));
        assert!(!is_strong("NoSpecial123"));
        assert!(!is_strong("nouppercas!1"));
        assert!(!is_strong("NOLOWERCASE!1"));
        assert!(!is_strong("NoDigits!Aa"));
        assert!(!is_strong("Quote\"Pass1!"));
        assert!(!is_strong("Dollar$Only1"));
        assert!(!is_strong(&format!("Aa1!{}", "x".repeat(27))));
    }

    #[test]
    fn test_required_messages() {
        let verdicts = check_passwords(&inputs("", ""));
        assert_eq!(verdicts.password.message(), "Password is required.");
        assert_eq!(verdicts.confirm.message(), "Please re-enter the password.");
    }

    #[test]
    fn test_mismatch_lands_on_confirmation() {
        let verdicts = check_passwords(&inputs("Passw0rd!", "Passw0rd"));
        assert!(verdicts.password.is_valid());
        assert_eq!(verdicts.confirm.message(), "Passwords do not match.");
    }

    #[test]
    fn test_user_id_containment_beats_strength() {
        let mut input = inputs("alice123!", "alice123!");
        input.user_id = "alice".to_string();
        let verdicts = check_passwords(&input);
        assert_eq!(
            verdicts.password.message(),
            "Password cannot contain your user ID."
        );
        assert!(verdicts.confirm.is_valid());
    }

    #[test]
    fn test_last_rule_wins() {
        let mut input = inputs("Bob12", "Bob12");
        input.user_id = "bob12".to_string();
        input.first_name = "bob".to_string();
        let verdicts = check_passwords(&input);
        assert_eq!(verdicts.password.message(), "Password cannot equal your user ID.");
    }

    #[test]
    fn test_weak_password_message() {
        let verdicts = check_passwords(&inputs("weakpass", "weakpass"));
        assert_eq!(
            verdicts.password.message(),
            "8–30 chars with upper, lower, digit, and special; no double quotes."
        );
        assert!(verdicts.confirm.is_valid());
    }

    #[test]
    fn test_first_name_containment() {
        let mut input = inputs("Robert#2024x", "Robert#2024x");
        input.first_name = "robert".to_string();
        let verdicts = check_passwords(&input);
        assert_eq!(
            verdicts.password.message(),
            "Password cannot contain your first name."
        );
    }

    #[test]
    fn test_last_name_containment() {
        let mut input = inputs("Xsmith#2024", "Xsmith#2024");
        input.last_name = "smith".to_string();
        let verdicts = check_passwords(&input);
        assert_eq!(
            verdicts.password.message(),
            "Password cannot contain your last name."
        );
    }

    #[test]
    fn test_identity_rule_overwrites_strength_message() {
        // Too weak and contains both names: the last name rule runs last.
        let mut input = inputs("robertsmith", "robertsmith");
        input.first_name = "robert".to_string();
        input.last_name = "smith".to_string();
        let verdicts = check_passwords(&input);
        assert_eq!(
            verdicts.password.message(),
            "Password cannot contain your last name."
        );
    }

    #[test]
    fn test_empty_identity_never_rejects() {
        let verdicts = check_passwords(&inputs("Str0ng!Pass", "Str0ng!Pass"));
        assert!(verdicts.is_valid());
    }
}
