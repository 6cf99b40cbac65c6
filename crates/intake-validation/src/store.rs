// File: src/store.rs
// Purpose: Field accessor abstraction and the in-memory snapshot store

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{IntakeError, Result};
use crate::fields::{ChoiceGroup, FieldId};

/// Read/write access to the form's current values.
///
/// On the page this is the DOM; in tests, the CLI and the WASM bindings it is
/// a [`MemoryStore`]. `get` returns `None` when the field is not on the form,
/// which the rules treat as "nothing to validate".
pub trait FieldStore {
    fn get(&self, field: FieldId) -> Option<String>;

    fn set(&mut self, field: FieldId, value: String);

    /// Values of the checked inputs sharing the group's `name`.
    fn checked(&self, group: ChoiceGroup) -> Vec<String>;

    /// Value of the field, empty when absent.
    fn value(&self, field: FieldId) -> String {
        self.get(field).unwrap_or_default()
    }
}

/// Snapshot of a form: field values by element id, plus checked group values.
///
/// Serialized as
/// ```toml
/// [values]
/// UserID = "bob12"
///
/// [groups]
/// vaccines = ["Flu", "Tetanus"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    pub values: BTreeMap<String, String>,

    #[serde(default)]
    pub groups: BTreeMap<String, Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures.
    pub fn with(mut self, field: FieldId, value: impl Into<String>) -> Self {
        self.values.insert(field.as_str().to_string(), value.into());
        self
    }

    pub fn with_checked<I, V>(mut self, group: ChoiceGroup, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.groups.insert(
            group.as_str().to_string(),
            values.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Drop a field from the form entirely.
    pub fn remove(&mut self, field: FieldId) -> Option<String> {
        self.values.remove(field.as_str())
    }

    /// What the browser does on a native form reset: every input present on
    /// the form goes back to empty, every checkbox/radio is unchecked.
    pub fn clear_values(&mut self) {
        for value in self.values.values_mut() {
            value.clear();
        }
        self.groups.clear();
    }

    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|e| IntakeError::Snapshot(e.to_string()))
    }

    pub fn from_toml(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| IntakeError::Snapshot(e.to_string()))
    }
}

impl FieldStore for MemoryStore {
    fn get(&self, field: FieldId) -> Option<String> {
        self.values.get(field.as_str()).cloned()
    }

    fn set(&mut self, field: FieldId, value: String) {
        self.values.insert(field.as_str().to_string(), value);
    }

    fn checked(&self, group: ChoiceGroup) -> Vec<String> {
        self.groups.get(group.as_str()).cloned().unwrap_or_default()
    }
}
