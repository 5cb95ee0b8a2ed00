//! UI module for rendering the TUI

mod forms;
mod layout;

use crate::app::App;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (form_area, notice_area, status_area) = layout::create_layout(frame.area());

    forms::draw_booking_form(frame, form_area, &app.form);
    layout::draw_notice(frame, notice_area, &app.form.notice);
    layout::draw_status_bar(frame, status_area, app);
}
