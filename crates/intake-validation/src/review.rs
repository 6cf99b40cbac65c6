// File: src/review.rs
// Purpose: Read-only review summary built from the current form values

use serde::{Deserialize, Serialize};

use crate::config::ReviewConfig;
use crate::fields::{ChoiceGroup, FieldId};
use crate::store::FieldStore;
use crate::transform::{mask_ssn_with, normalize_user_id, truncate_zip};

/// One label/value line of the review panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRow {
    pub label: String,
    pub value: String,
}

impl ReviewRow {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
        }
    }
}

fn or_na(value: String) -> String {
    if value.is_empty() {
        "N/A".to_string()
    } else {
        value
    }
}

/// Build the review rows.
///
/// Re-normalizes the user id first, otherwise only reads. It does not
/// validate: callers run a full pass and only project when it succeeded.
pub fn render_review<S: FieldStore + ?Sized>(store: &mut S, config: &ReviewConfig) -> Vec<ReviewRow> {
    normalize_user_id(store);

    let zip_entered = store.value(FieldId::Zip);
    let zip_truncated = truncate_zip(&zip_entered);

    let vaccines = store.checked(ChoiceGroup::Vaccines).join(", ");
    let vaccines = if vaccines.is_empty() { "None".to_string() } else { vaccines };
    let single = |group| {
        or_na(store.checked(group).into_iter().next().unwrap_or_default())
    };

    let weight = or_na(store.value(FieldId::Weight));

    vec![
        ReviewRow::new("User ID (lowercased)", store.value(FieldId::UserId)),
        ReviewRow::new("First Name", store.value(FieldId::FirstName)),
        ReviewRow::new("Middle Initial", or_na(store.value(FieldId::MiddleInitial))),
        ReviewRow::new("Last Name", store.value(FieldId::LastName)),
        ReviewRow::new("DOB", store.value(FieldId::Dob)),
        ReviewRow::new("Move-In / Travel Date", or_na(store.value(FieldId::MoveIn))),
        ReviewRow::new("Email", store.value(FieldId::Email)),
        ReviewRow::new("Phone", store.value(FieldId::Phone)),
        ReviewRow::new("Address 1", or_na(store.value(FieldId::Address1))),
        ReviewRow::new("Address 2", or_na(store.value(FieldId::Address2))),
        ReviewRow::new("City", store.value(FieldId::City)),
        ReviewRow::new("State", store.value(FieldId::State)),
        ReviewRow::new("Zip (entered)", zip_entered),
        ReviewRow::new("Zip (truncated to 5)", zip_truncated),
        ReviewRow::new("Vaccines", vaccines),
        ReviewRow::new("Insurance", single(ChoiceGroup::Insurance)),
        ReviewRow::new("Pregnant", single(ChoiceGroup::Pregnant)),
        ReviewRow::new("Gender", single(ChoiceGroup::Gender)),
        ReviewRow::new("Pain Level", or_na(store.value(FieldId::Pain))),
        ReviewRow::new(
            "Current Body Weight",
            format!("{} {}", weight, config.weight_unit),
        ),
        ReviewRow::new("Symptoms", or_na(store.value(FieldId::Symptoms))),
        ReviewRow::new(
            "SSN (masked)",
            mask_ssn_with(&store.value(FieldId::Ssn), config.mask_char),
        ),
    ]
}
