// File: src/session.rs
// Purpose: Error registry, submit gate and event dispatch for one form session

use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::affordance::{slider_label, DateBounds};
use crate::config::IntakeConfig;
use crate::fields::FieldId;
use crate::password::{check_passwords, PasswordInputs};
use crate::review::{render_review, ReviewRow};
use crate::store::FieldStore;
use crate::transform::{format_ssn_input, normalize_user_id};
use crate::validators::{self, trim_form_value, DobBounds, Verdict};

/// Current message per error slot; an empty message means no error.
///
/// Every slot on the page starts out present and empty, so a field's entry is
/// always the verdict of its latest check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorRegistry {
    slots: BTreeMap<FieldId, String>,
}

impl ErrorRegistry {
    pub fn new() -> Self {
        Self {
            slots: FieldId::WITH_ERROR_SLOT
                .iter()
                .map(|field| (*field, String::new()))
                .collect(),
        }
    }

    pub fn set(&mut self, field: FieldId, message: impl Into<String>) {
        self.slots.insert(field, message.into());
    }

    pub fn clear(&mut self, field: FieldId) {
        if let Some(slot) = self.slots.get_mut(&field) {
            slot.clear();
        }
    }

    pub fn clear_all(&mut self) {
        self.slots.values_mut().for_each(String::clear);
    }

    pub fn record(&mut self, field: FieldId, verdict: &Verdict) {
        if verdict.is_valid() {
            self.clear(field);
        } else {
            self.set(field, verdict.message());
        }
    }

    /// The field's message, `None` when its slot is empty.
    pub fn message(&self, field: FieldId) -> Option<&str> {
        self.slots
            .get(&field)
            .map(String::as_str)
            .filter(|m| !trim_form_value(m).is_empty())
    }

    pub fn has_errors(&self) -> bool {
        self.slots.values().any(|m| !trim_form_value(m).is_empty())
    }

    /// Non-empty slots, in field order.
    pub fn errors(&self) -> impl Iterator<Item = (FieldId, &str)> {
        self.slots
            .iter()
            .filter(|(_, m)| !trim_form_value(m).is_empty())
            .map(|(field, m)| (*field, m.as_str()))
    }
}

impl Default for ErrorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Receives submit button visibility changes.
pub trait SubmitSink {
    fn set_submit_visible(&mut self, visible: bool);
}

/// Receives the review rows; showing the panel and scrolling it into view
/// are up to the implementation.
pub trait ReviewSink {
    fn show_review(&mut self, rows: &[ReviewRow]);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    Validate,
    Review,
}

/// Notifications delivered by the page, one handler run per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "target", rename_all = "camelCase")]
pub enum FormEvent {
    Input(FieldId),
    Blur(FieldId),
    Change(FieldId),
    Click(Button),
    Submit,
    /// The user pressed reset; the platform has not cleared the inputs yet.
    ResetRequested,
    /// The platform finished clearing the inputs.
    ResetApplied,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum EventOutcome {
    /// A single field (or the password pair) was checked.
    Checked {
        field: FieldId,
        valid: bool,
        slider_label: Option<String>,
    },
    /// Full pass from the Validate button.
    Validated { valid: bool },
    Reviewed { rows: Vec<ReviewRow> },
    ReviewBlocked,
    Submitted,
    /// The submit must be cancelled.
    SubmitBlocked,
    ResetPending,
    ResetApplied,
    /// The event targets something without a rule.
    Ignored,
}

/// One form's validation state: the field store, the error registry and the
/// submit gate, plus the "today" every date rule is pinned to.
pub struct ValidationSession<S: FieldStore> {
    store: S,
    errors: ErrorRegistry,
    config: IntakeConfig,
    today: NaiveDate,
    dob: DobBounds,
    submit_visible: bool,
    reset_pending: bool,
    submit_sink: Option<Box<dyn SubmitSink>>,
    review_sink: Option<Box<dyn ReviewSink>>,
}

impl<S: FieldStore> ValidationSession<S> {
    pub fn new(store: S, today: NaiveDate, config: IntakeConfig) -> Self {
        let dob = DobBounds::new(today, config.form.max_age_years);
        debug!(%today, dob_min = %dob.min, "validation session started");
        Self {
            store,
            errors: ErrorRegistry::new(),
            config,
            today,
            dob,
            submit_visible: false,
            reset_pending: false,
            submit_sink: None,
            review_sink: None,
        }
    }

    /// Session pinned to the local calendar date.
    pub fn starting_today(store: S, config: IntakeConfig) -> Self {
        Self::new(store, Local::now().date_naive(), config)
    }

    pub fn with_submit_sink(mut self, sink: impl SubmitSink + 'static) -> Self {
        self.submit_sink = Some(Box::new(sink));
        self
    }

    pub fn with_review_sink(mut self, sink: impl ReviewSink + 'static) -> Self {
        self.review_sink = Some(Box::new(sink));
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn errors(&self) -> &ErrorRegistry {
        &self.errors
    }

    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn dob_bounds(&self) -> &DobBounds {
        &self.dob
    }

    pub fn date_bounds(&self) -> DateBounds {
        DateBounds::from_dob(&self.dob)
    }

    pub fn has_errors(&self) -> bool {
        self.errors.has_errors()
    }

    /// Visibility last published by [`Self::update_submit_button`].
    pub fn submit_visible(&self) -> bool {
        self.submit_visible
    }

    /// Recompute the gate from the whole registry and publish it.
    pub fn update_submit_button(&mut self) -> bool {
        let visible = !self.errors.has_errors();
        debug!(visible, "submit gate recomputed");
        self.submit_visible = visible;
        if let Some(sink) = self.submit_sink.as_mut() {
            sink.set_submit_visible(visible);
        }
        visible
    }

    /// Run one field's rule and record the result, without touching the gate.
    /// Fields missing from the form, and fields without a rule, pass.
    fn check(&mut self, field: FieldId) -> bool {
        if field.is_password() {
            return self.check_passwords();
        }
        match validators::validate_field(field, &mut self.store, &self.dob) {
            Some(verdict) => {
                debug!(%field, valid = verdict.is_valid(), message = verdict.message(), "field checked");
                self.errors.record(field, &verdict);
                verdict.is_valid()
            }
            None => true,
        }
    }

    /// Check one field, then recompute the gate.
    pub fn validate_field(&mut self, field: FieldId) -> bool {
        let valid = self.check(field);
        self.update_submit_button();
        valid
    }

    /// Password strength, confirmation and identity-leak rules. Records both
    /// password slots; does not recompute the gate.
    pub fn check_passwords(&mut self) -> bool {
        let Some(inputs) = PasswordInputs::read(&self.store) else {
            return true;
        };
        let verdicts = check_passwords(&inputs);
        debug!(
            password = verdicts.password.message(),
            confirm = verdicts.confirm.message(),
            "password rules checked"
        );
        self.errors.record(FieldId::Password, &verdicts.password);
        self.errors.record(FieldId::ConfirmPassword, &verdicts.confirm);
        verdicts.is_valid()
    }

    /// Full pass: normalize the user id, every field rule in form order, the
    /// password rules, then the gate.
    pub fn validate_form(&mut self) -> bool {
        normalize_user_id(&mut self.store);
        let mut ok = true;
        for field in FieldId::VALIDATED {
            // no short-circuit: every slot must reflect this pass
            ok &= self.check(field);
        }
        ok &= self.check_passwords();
        self.update_submit_button();
        info!(valid = ok, errors = self.errors.errors().count(), "form validated");
        ok
    }

    /// Review rows for the current values. Only call after a successful
    /// [`Self::validate_form`].
    pub fn render_review(&mut self) -> Vec<ReviewRow> {
        render_review(&mut self.store, &self.config.review)
    }

    /// Validate everything and, when the form is clean, project and publish
    /// the review. `None` when validation failed.
    pub fn review(&mut self) -> Option<Vec<ReviewRow>> {
        if !self.validate_form() {
            return None;
        }
        let rows = self.render_review();
        if let Some(sink) = self.review_sink.as_mut() {
            sink.show_review(&rows);
        }
        Some(rows)
    }

    /// Run the handler for one page event to completion.
    pub fn handle(&mut self, event: FormEvent) -> EventOutcome {
        match event {
            FormEvent::Input(field) | FormEvent::Blur(field) | FormEvent::Change(field) => {
                self.field_event(event, field)
            }
            FormEvent::Click(Button::Validate) => EventOutcome::Validated {
                valid: self.validate_form(),
            },
            FormEvent::Click(Button::Review) => match self.review() {
                Some(rows) => EventOutcome::Reviewed { rows },
                None => EventOutcome::ReviewBlocked,
            },
            FormEvent::Submit => {
                if !self.validate_form() {
                    info!("submit blocked by validation errors");
                    return EventOutcome::SubmitBlocked;
                }
                normalize_user_id(&mut self.store);
                info!("form submitted");
                EventOutcome::Submitted
            }
            FormEvent::ResetRequested => {
                self.reset_pending = true;
                EventOutcome::ResetPending
            }
            FormEvent::ResetApplied => {
                if !self.reset_pending {
                    warn!("reset applied without a pending reset request");
                }
                self.reset_pending = false;
                self.errors.clear_all();
                self.submit_visible = false;
                if let Some(sink) = self.submit_sink.as_mut() {
                    sink.set_submit_visible(false);
                }
                info!("form reset");
                EventOutcome::ResetApplied
            }
        }
    }

    fn field_event(&mut self, event: FormEvent, field: FieldId) -> EventOutcome {
        // transformers run before the rule reads the value
        match (event, field) {
            (FormEvent::Input(_), FieldId::Ssn) => format_ssn_input(&mut self.store),
            (FormEvent::Blur(_), FieldId::UserId) => {
                normalize_user_id(&mut self.store);
            }
            _ => {}
        }

        let slider_label = match event {
            FormEvent::Input(_) => self.store.get(field).and_then(|raw| {
                slider_label(field, &raw, &self.config.review.weight_unit)
            }),
            _ => None,
        };

        if field == FieldId::MoveIn {
            return EventOutcome::Ignored;
        }

        let valid = self.validate_field(field);
        EventOutcome::Checked {
            field,
            valid,
            slider_label,
        }
    }
}
