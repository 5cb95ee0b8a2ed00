//! Booking form rendering

use super::field_renderer::{draw_field, draw_help_text};
use crate::platform::{PASTE_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{BookingForm, Form};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Draw the booking form
pub fn draw_booking_form(frame: &mut Frame, area: Rect, form: &BookingForm) {
    let block = Block::default()
        .title(" Book an Appointment ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(3), // Email | Phone
            Constraint::Length(3), // Date | Time
            Constraint::Length(3), // Service
            Constraint::Min(4),    // Message
            Constraint::Length(1), // Help text
        ])
        .margin(1)
        .split(area);

    let split = |row: Rect| {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(row)
    };
    let contact = split(rows[1]);
    let when = split(rows[2]);

    let areas = [
        rows[0], contact[0], contact[1], when[0], when[1], rows[3], rows[4],
    ];
    for (index, field_area) in areas.into_iter().enumerate() {
        if let Some(field) = form.get_field(index) {
            draw_field(frame, field_area, field, form.active_field() == index);
        }
    }

    draw_help_text(
        frame,
        rows[5],
        &[
            ("Tab", "next"),
            ("Shift+Tab", "prev"),
            ("←/→", "service"),
            (SUBMIT_SHORTCUT, "submit"),
            (PASTE_SHORTCUT, "paste"),
            ("Esc", "quit"),
        ],
    );
}
