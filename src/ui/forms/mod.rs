//! Form rendering module
//!
//! This module contains UI components for rendering forms:
//! - `field_renderer`: Field rendering utilities
//! - `booking_form`: The appointment booking form

mod booking_form;
mod field_renderer;

pub use booking_form::draw_booking_form;
