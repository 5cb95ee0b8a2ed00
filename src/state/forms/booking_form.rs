//! The booking form and its validation state machine
//!
//! Every transition is a plain method on [`BookingForm`] that updates field
//! flags and the banner, and returns what the caller has to do next. The
//! TUI shell only turns key events into these calls.

use super::field::FormField;
use super::rules::{FormatRules, ValidationResult};
use crate::client::RelayClientError;
use crate::relay::{RelayOutcome, SubmissionPayload};
use crate::state::Notice;

/// Shown after a request has been accepted
pub const SUCCESS_MESSAGE: &str =
    "Thanks! Your appointment request has been received. We will contact you shortly.";

/// Prefix of the aggregated validation error
pub const ERROR_PREFIX: &str = "Please fix the following: ";

/// Shown when the relay accepted the request but could not hand it to the mail system
pub const DELIVERY_FAILED_MESSAGE: &str =
    "We could not send your request right now. Please try again later.";

/// Shown when the relay refused the request
pub const REJECTED_MESSAGE: &str = "The booking service rejected the request.";

/// Number of input fields in the booking form
pub const FIELD_COUNT: usize = 7;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> &mut FormField;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// What the shell must do after a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitEffect {
    /// Validation failed; the error banner is already showing
    Blocked,
    /// Every required field is valid; deliver this payload
    Proceed(SubmissionPayload),
}

#[derive(Debug, Clone)]
pub struct BookingForm {
    pub name: FormField,
    pub email: FormField,
    pub phone: FormField,
    pub date: FormField,
    pub time: FormField,
    pub service: FormField,
    pub message: FormField,
    pub active_field_index: usize,
    pub notice: Notice,
    rules: FormatRules,
}

impl BookingForm {
    pub fn new(services: &[String]) -> Self {
        Self::with_rules(services, FormatRules::default())
    }

    pub fn with_rules(services: &[String], rules: FormatRules) -> Self {
        Self {
            name: FormField::text("name", "Name", true, false),
            email: FormField::text("email", "Email", true, false),
            phone: FormField::text("phone", "Phone", true, false),
            date: FormField::text("date", "Date", true, false),
            time: FormField::text("time", "Time", true, false),
            service: FormField::choice("service", "Service", true, services),
            message: FormField::text("message", "Message (optional)", false, true),
            active_field_index: 0,
            notice: Notice::None,
            rules,
        }
    }

    fn get_field_mut(&mut self, index: usize) -> Option<&mut FormField> {
        match index {
            0 => Some(&mut self.name),
            1 => Some(&mut self.email),
            2 => Some(&mut self.phone),
            3 => Some(&mut self.date),
            4 => Some(&mut self.time),
            5 => Some(&mut self.service),
            6 => Some(&mut self.message),
            _ => None,
        }
    }

    /// Validate a single field without touching its flag
    pub fn validate_field(&self, field: &FormField) -> ValidationResult {
        self.rules.validate_field(field)
    }

    /// Re-validate the field at `index` after its value changed and update
    /// its invalid flag. Optional fields are left alone.
    pub fn on_input(&mut self, index: usize) -> Option<ValidationResult> {
        let result = {
            let field = self.get_field(index)?;
            if !field.required {
                return None;
            }
            self.validate_field(field)
        };
        if let Some(field) = self.get_field_mut(index) {
            field.invalid = !result.is_valid();
        }
        Some(result)
    }

    /// Re-validate every required field, update every flag and return the
    /// non-empty messages in field order
    pub fn validate_all(&mut self) -> Vec<String> {
        let mut messages = Vec::new();
        for index in 0..FIELD_COUNT {
            if let Some(result) = self.on_input(index) {
                if !result.is_valid() {
                    messages.push(result.message);
                }
            }
        }
        messages
    }

    /// Handle a submit attempt
    pub fn submit(&mut self) -> SubmitEffect {
        let messages = self.validate_all();
        if !messages.is_empty() {
            tracing::debug!(errors = messages.len(), "booking form blocked");
            self.show_errors(&messages);
            return SubmitEffect::Blocked;
        }
        self.notice = Notice::None;
        SubmitEffect::Proceed(self.to_payload())
    }

    /// Confirm the request without contacting a relay, then reset
    pub fn complete_locally(&mut self) {
        self.show_success(SUCCESS_MESSAGE);
        self.reset();
    }

    /// Apply the relay's answer to a submitted payload
    pub fn apply_relay_reply(&mut self, reply: Result<RelayOutcome, RelayClientError>) {
        match reply {
            Ok(RelayOutcome::Success) => self.complete_locally(),
            Ok(RelayOutcome::TransportError) => self.show_error(DELIVERY_FAILED_MESSAGE),
            Ok(RelayOutcome::InvalidMethod) => self.show_error(REJECTED_MESSAGE),
            Err(err) => {
                tracing::warn!("booking relay unreachable: {err}");
                self.show_error(format!("Could not reach the booking service: {err}"));
            }
        }
    }

    /// Show the aggregated validation error
    pub fn show_errors(&mut self, messages: &[String]) {
        if messages.is_empty() {
            self.notice = Notice::None;
        } else {
            self.show_error(format!("{ERROR_PREFIX}{}", messages.join(", ")));
        }
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.notice = Notice::Error(message.into());
    }

    pub fn show_success(&mut self, message: impl Into<String>) {
        self.notice = Notice::Success(message.into());
    }

    /// Clear every value and invalid flag. The banner is kept.
    pub fn reset(&mut self) {
        for index in 0..FIELD_COUNT {
            if let Some(field) = self.get_field_mut(index) {
                field.clear();
            }
        }
        self.active_field_index = 0;
    }

    /// Trimmed field values as they are posted to the relay
    pub fn to_payload(&self) -> SubmissionPayload {
        SubmissionPayload {
            name: self.name.as_text().trim().to_string(),
            email: self.email.as_text().trim().to_string(),
            phone: self.phone.as_text().trim().to_string(),
            date: self.date.as_text().trim().to_string(),
            time: self.time.as_text().trim().to_string(),
            service: self.service.as_text().trim().to_string(),
            message: self.message.as_text().trim().to_string(),
        }
    }

    pub fn is_active_field_multiline(&self) -> bool {
        self.get_field(self.active_field_index)
            .is_some_and(|f| f.is_multiline)
    }

    pub fn is_active_field_choice(&self) -> bool {
        self.get_field(self.active_field_index)
            .is_some_and(FormField::is_choice)
    }
}

impl Default for BookingForm {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl Form for BookingForm {
    fn field_count(&self) -> usize {
        FIELD_COUNT
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(FIELD_COUNT - 1);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.name,
            1 => &mut self.email,
            2 => &mut self.phone,
            3 => &mut self.date,
            4 => &mut self.time,
            5 => &mut self.service,
            _ => &mut self.message,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.name),
            1 => Some(&self.email),
            2 => Some(&self.phone),
            3 => Some(&self.date),
            4 => Some(&self.time),
            5 => Some(&self.service),
            6 => Some(&self.message),
            _ => None,
        }
    }
}
