//! Layout components (form area, banner, status bar)

use crate::app::App;
use crate::state::Notice;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Split the screen into form, banner and status bar
pub fn create_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Form
            Constraint::Length(4), // Banner
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Draw the error or success banner, or nothing
pub fn draw_notice(frame: &mut Frame, area: Rect, notice: &Notice) {
    if notice.is_none() {
        return;
    }
    let (title, message, color) = match (notice.error(), notice.success()) {
        (Some(msg), _) => (" Error ", msg, Color::Red),
        (None, Some(msg)) => (" Request sent ", msg, Color::Green),
        (None, None) => return,
    };

    let block = Block::default()
        .title(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let paragraph = Paragraph::new(message)
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![];

    // Delivery mode
    match app.relay_endpoint() {
        Some(endpoint) => {
            spans.push(Span::styled(" ● ", Style::default().fg(Color::Green)));
            spans.push(Span::styled(
                format!("relay {endpoint}"),
                Style::default().fg(Color::DarkGray),
            ));
        }
        None => {
            spans.push(Span::styled(" ○ ", Style::default().fg(Color::Yellow)));
            spans.push(Span::styled(
                "local confirmation only",
                Style::default().fg(Color::DarkGray),
            ));
        }
    }

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::BookingForm;
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| crate::ui::draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_create_layout_reserves_banner_and_status() {
        let (form, banner, status) = create_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(status.height, 1);
        assert_eq!(banner.height, 4);
        assert_eq!(form.height, 19);
    }

    #[test]
    fn test_renders_fields_and_local_mode() {
        let app = App::with_relay(BookingForm::default(), None);
        let screen = render(&app);
        assert!(screen.contains("Book an Appointment"));
        assert!(screen.contains("Email *"));
        assert!(screen.contains("Message (optional)"));
        assert!(screen.contains("local confirmation only"));
    }

    #[test]
    fn test_renders_status_message() {
        let mut app = App::with_relay(BookingForm::default(), None);
        app.status_message = Some(crate::app::SENDING_STATUS.to_string());
        assert!(render(&app).contains(crate::app::SENDING_STATUS));
    }

    #[test]
    fn test_renders_error_banner() {
        let mut app = App::with_relay(BookingForm::default(), None);
        app.form.submit();
        let screen = render(&app);
        assert!(screen.contains(" Error "));
        assert!(screen.contains("Please fix the following"));
    }
}
