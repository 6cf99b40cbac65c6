// File: src/fields.rs
// Purpose: Field identifiers and their DOM join keys

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IntakeError;

/// Every input on the intake form that carries a value.
///
/// The string form (`as_str`) is the element id the page uses, and the join
/// key between the field store and the error registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldId {
    #[serde(rename = "UserID")]
    UserId,
    #[serde(rename = "fname")]
    FirstName,
    #[serde(rename = "mi")]
    MiddleInitial,
    #[serde(rename = "lname")]
    LastName,
    #[serde(rename = "dob")]
    Dob,
    #[serde(rename = "movein")]
    MoveIn,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "phone")]
    Phone,
    #[serde(rename = "homeAddress1")]
    Address1,
    #[serde(rename = "homeAddress2")]
    Address2,
    #[serde(rename = "city")]
    City,
    #[serde(rename = "state")]
    State,
    #[serde(rename = "zip")]
    Zip,
    #[serde(rename = "ssn")]
    Ssn,
    #[serde(rename = "pain")]
    Pain,
    #[serde(rename = "weight")]
    Weight,
    #[serde(rename = "symptoms")]
    Symptoms,
    #[serde(rename = "Password")]
    Password,
    #[serde(rename = "RPassword")]
    ConfirmPassword,
}

impl FieldId {
    /// Fields checked by a full pass, in the order they are checked.
    /// The password pair is handled by the cross-field rules afterwards.
    pub const VALIDATED: [FieldId; 16] = [
        FieldId::UserId,
        FieldId::FirstName,
        FieldId::MiddleInitial,
        FieldId::LastName,
        FieldId::Dob,
        FieldId::Email,
        FieldId::Phone,
        FieldId::Address1,
        FieldId::Address2,
        FieldId::City,
        FieldId::State,
        FieldId::Zip,
        FieldId::Ssn,
        FieldId::Pain,
        FieldId::Weight,
        FieldId::Symptoms,
    ];

    /// Every field that owns an error slot on the page.
    pub const WITH_ERROR_SLOT: [FieldId; 18] = [
        FieldId::UserId,
        FieldId::FirstName,
        FieldId::MiddleInitial,
        FieldId::LastName,
        FieldId::Dob,
        FieldId::Email,
        FieldId::Phone,
        FieldId::Address1,
        FieldId::Address2,
        FieldId::City,
        FieldId::State,
        FieldId::Zip,
        FieldId::Ssn,
        FieldId::Pain,
        FieldId::Weight,
        FieldId::Symptoms,
        FieldId::Password,
        FieldId::ConfirmPassword,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldId::UserId => "UserID",
            FieldId::FirstName => "fname",
            FieldId::MiddleInitial => "mi",
            FieldId::LastName => "lname",
            FieldId::Dob => "dob",
            FieldId::MoveIn => "movein",
            FieldId::Email => "email",
            FieldId::Phone => "phone",
            FieldId::Address1 => "homeAddress1",
            FieldId::Address2 => "homeAddress2",
            FieldId::City => "city",
            FieldId::State => "state",
            FieldId::Zip => "zip",
            FieldId::Ssn => "ssn",
            FieldId::Pain => "pain",
            FieldId::Weight => "weight",
            FieldId::Symptoms => "symptoms",
            FieldId::Password => "Password",
            FieldId::ConfirmPassword => "RPassword",
        }
    }

    /// Id of the element that displays this field's error (`<id>-error`).
    pub fn error_slot(self) -> String {
        format!("{}-error", self.as_str())
    }

    /// True for the two fields owned by the password rules.
    pub fn is_password(self) -> bool {
        matches!(self, FieldId::Password | FieldId::ConfirmPassword)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.strip_suffix("-error").unwrap_or(s);
        FieldId::WITH_ERROR_SLOT
            .iter()
            .chain(std::iter::once(&FieldId::MoveIn))
            .copied()
            .find(|field| field.as_str() == id)
            .ok_or_else(|| IntakeError::UnknownField(s.to_string()))
    }
}

/// Checkbox and radio groups, queried by their shared `name` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoiceGroup {
    Vaccines,
    Insurance,
    Pregnant,
    Gender,
}

impl ChoiceGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            ChoiceGroup::Vaccines => "vaccines",
            ChoiceGroup::Insurance => "insurance",
            ChoiceGroup::Pregnant => "pregnant",
            ChoiceGroup::Gender => "gender",
        }
    }
}

impl FromStr for ChoiceGroup {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vaccines" => Ok(ChoiceGroup::Vaccines),
            "insurance" => Ok(ChoiceGroup::Insurance),
            "pregnant" => Ok(ChoiceGroup::Pregnant),
            "gender" => Ok(ChoiceGroup::Gender),
            other => Err(IntakeError::UnknownGroup(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_slot_naming() {
        assert_eq!(FieldId::UserId.error_slot(), "UserID-error");
        assert_eq!(FieldId::ConfirmPassword.error_slot(), "RPassword-error");
    }

    #[test]
    fn test_parse_field_ids() {
        assert_eq!("fname".parse::<FieldId>().unwrap(), FieldId::FirstName);
        assert_eq!("zip-error".parse::<FieldId>().unwrap(), FieldId::Zip);
        assert_eq!("movein".parse::<FieldId>().unwrap(), FieldId::MoveIn);
        assert!("nickname".parse::<FieldId>().is_err());
    }

    #[test]
    fn test_round_trip_every_id() {
        for field in FieldId::WITH_ERROR_SLOT {
            assert_eq!(field.as_str().parse::<FieldId>().unwrap(), field);
        }
    }

    #[test]
    fn test_choice_groups() {
        assert_eq!("gender".parse::<ChoiceGroup>().unwrap(), ChoiceGroup::Gender);
        assert!("allergies".parse::<ChoiceGroup>().is_err());
    }
}
