//! Intake Validation WASM
//!
//! WebAssembly bindings for the intake form rules.
//! The page keeps one [`IntakeForm`] alive, pushes a snapshot of its inputs
//! before each event, and writes back the values and error messages it gets.

use std::collections::BTreeMap;

use chrono::Local;
use intake_validation::{
    self as core, FieldId, FormEvent, IntakeConfig, MemoryStore, ValidationSession,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// State handed back to JavaScript after every call
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FormReport {
    pub ok: bool,
    pub submit_visible: bool,
    /// `<fieldId>-error` slot id to message, every slot included
    pub errors: BTreeMap<String, String>,
    /// Current values, including rewrites (lowercased email / user id, formatted SSN)
    pub values: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<core::EventOutcome>,
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(Into::into)
}

fn parse_snapshot(snapshot: JsValue) -> Result<MemoryStore, JsValue> {
    serde_wasm_bindgen::from_value(snapshot)
        .map_err(|e| JsValue::from_str(&format!("Failed to parse form snapshot: {}", e)))
}

fn parse_field(field_id: &str) -> Result<FieldId, JsValue> {
    field_id
        .parse::<FieldId>()
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// One form on the page, holding its error registry between events.
#[wasm_bindgen]
pub struct IntakeForm {
    session: ValidationSession<MemoryStore>,
}

#[wasm_bindgen]
impl IntakeForm {
    /// Pins "today" to the browser's local date.
    #[wasm_bindgen(constructor)]
    pub fn new() -> IntakeForm {
        IntakeForm {
            session: ValidationSession::starting_today(MemoryStore::new(), IntakeConfig::default()),
        }
    }

    /// Replace the known values with a fresh `{ values, groups }` snapshot.
    pub fn sync(&mut self, snapshot: JsValue) -> Result<(), JsValue> {
        *self.session.store_mut() = parse_snapshot(snapshot)?;
        Ok(())
    }

    /// Run the handler for `{ type, target }`, e.g.
    /// `{ type: "input", target: "ssn" }` or `{ type: "resetApplied" }`.
    pub fn handle(&mut self, event: JsValue) -> Result<JsValue, JsValue> {
        let event: FormEvent = serde_wasm_bindgen::from_value(event).map_err(|e| {
            web_sys::console::warn_1(&JsValue::from_str(&format!("ignored form event: {}", e)));
            JsValue::from_str(&format!("Failed to parse event: {}", e))
        })?;
        let outcome = self.session.handle(event);
        let ok = !matches!(
            outcome,
            core::EventOutcome::Checked { valid: false, .. }
                | core::EventOutcome::Validated { valid: false }
                | core::EventOutcome::ReviewBlocked
                | core::EventOutcome::SubmitBlocked
        );
        to_js(&self.report(ok, Some(outcome)))
    }

    /// Full pass over everything, as the Validate button does.
    #[wasm_bindgen(js_name = validateForm)]
    pub fn validate_form(&mut self) -> Result<JsValue, JsValue> {
        let ok = self.session.validate_form();
        to_js(&self.report(ok, None))
    }

    /// Check a single field by element id and recompute the gate.
    #[wasm_bindgen(js_name = validateField)]
    pub fn validate_field(&mut self, field_id: &str) -> Result<JsValue, JsValue> {
        let field = parse_field(field_id)?;
        let ok = self.session.validate_field(field);
        to_js(&self.report(ok, None))
    }

    /// Review rows when the whole form is valid, `null` otherwise.
    #[wasm_bindgen(js_name = renderReview)]
    pub fn render_review(&mut self) -> Result<JsValue, JsValue> {
        match self.session.review() {
            Some(rows) => to_js(&rows),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(getter, js_name = submitVisible)]
    pub fn submit_visible(&self) -> bool {
        self.session.submit_visible()
    }

    #[wasm_bindgen(js_name = dateBounds)]
    pub fn date_bounds(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.date_bounds())
    }
}

impl IntakeForm {
    fn report(&self, ok: bool, outcome: Option<core::EventOutcome>) -> FormReport {
        let registry = self.session.errors();
        let errors = FieldId::WITH_ERROR_SLOT
            .iter()
            .map(|field| {
                let message = registry.message(*field).unwrap_or_default();
                (field.error_slot(), message.to_string())
            })
            .collect();
        FormReport {
            ok,
            submit_visible: self.session.submit_visible(),
            errors,
            values: self.session.store().values.clone(),
            outcome,
        }
    }
}

impl Default for IntakeForm {
    fn default() -> Self {
        Self::new()
    }
}

/// Progressive SSN grouping for the input handler
#[wasm_bindgen(js_name = formatSsn)]
pub fn format_ssn_js(raw: &str) -> String {
    core::format_ssn(raw)
}

/// SSN with every digit but the last four masked
#[wasm_bindgen(js_name = maskSsn)]
pub fn mask_ssn_js(raw: &str) -> String {
    core::mask_ssn(raw)
}

/// Label for the pain / weight sliders; `undefined` for other fields
#[wasm_bindgen(js_name = sliderLabel)]
pub fn slider_label_js(field_id: &str, raw: &str) -> Result<Option<String>, JsValue> {
    let field = parse_field(field_id)?;
    Ok(core::slider_label(field, raw, "lbs"))
}

/// Header text for today's date
#[wasm_bindgen(js_name = todayBanner)]
pub fn today_banner_js() -> String {
    core::today_banner(Local::now().date_naive())
}

/// One-shot full pass over a snapshot, without keeping any state
#[wasm_bindgen(js_name = validateSnapshot)]
pub fn validate_snapshot(snapshot: JsValue) -> Result<JsValue, JsValue> {
    let mut form = IntakeForm::new();
    form.sync(snapshot)?;
    form.validate_form()
}
