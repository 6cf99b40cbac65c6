//! Intake Validation
//!
//! Field rules, password cross-checks, the error registry / submit gate and the
//! review projection for the patient intake form.
//! Used by both the WASM client bindings and the `intake` command line tool.

pub mod affordance;
pub mod config;
pub mod error;
pub mod fields;
pub mod password;
pub mod review;
pub mod session;
pub mod store;
pub mod transform;
pub mod validators;

pub use affordance::{slider_label, today_banner, DateBounds};
pub use config::IntakeConfig;
pub use error::{IntakeError, Result};
pub use fields::{ChoiceGroup, FieldId};
pub use review::{render_review, ReviewRow};
pub use session::{
    Button, ErrorRegistry, EventOutcome, FormEvent, ReviewSink, SubmitSink, ValidationSession,
};
pub use store::{FieldStore, MemoryStore};
pub use transform::{format_ssn, mask_ssn, normalize_user_id, truncate_zip};
pub use validators::{trim_form_value, DobBounds, Verdict};
