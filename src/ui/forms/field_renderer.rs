//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Border color: invalid fields are outlined in red whether focused or not
fn border_color(field: &FormField, is_active: bool) -> Color {
    match (field.invalid, is_active) {
        (true, _) => Color::Red,
        (false, true) => Color::Cyan,
        (false, false) => Color::DarkGray,
    }
}

/// Draw a form field using FormField from the domain layer
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };
    let placeholder_style = Style::default().fg(Color::DarkGray);

    let display_value = field.display_value();
    let placeholder = if field.is_choice() {
        "(select an option, ←/→)"
    } else {
        "(empty)"
    };

    let cursor = if is_active && !field.is_choice() {
        "▌"
    } else {
        ""
    };
    let cursor_span = Span::styled(cursor, Style::default().fg(Color::Cyan));

    let content = if display_value.is_empty() {
        let shown = if is_active && !field.is_choice() {
            ""
        } else {
            placeholder
        };
        Paragraph::new(Line::from(vec![
            Span::styled(shown, placeholder_style),
            cursor_span,
        ]))
    } else if field.is_multiline {
        let mut lines: Vec<Line> = display_value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), style)))
            .collect();
        if let Some(last) = lines.last_mut() {
            last.spans.push(cursor_span);
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_value, style),
            cursor_span,
        ]))
    };

    let title = if field.required {
        format!(" {} * ", field.label)
    } else {
        format!(" {} ", field.label)
    };
    let mut title_style = Style::default().fg(border_color(field, is_active));
    if is_active {
        title_style = title_style.add_modifier(Modifier::BOLD);
    }

    let block = Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(field, is_active)));

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Draw the key hint line under a form
pub fn draw_help_text(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            format!(" {action}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
