//! Form domain layer
//!
//! Type-safe fields, the format rule registry and the booking form state
//! machine.

mod booking_form;
mod field;
mod rules;

pub use booking_form::{BookingForm, Form, SubmitEffect};
pub use field::FormField;

#[cfg(test)]
pub use booking_form::SUCCESS_MESSAGE;
