//! Help overlay widget.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

fn key_line(key: &'static str, text: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<9}", key), Style::default().fg(Color::Yellow)),
        Span::raw(text),
    ])
}

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)))
}

/// Render a centered help overlay.
pub fn render_help_overlay(frame: &mut Frame) {
    let popup_area = centered_rect(60, 70, frame.area());

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            "CMS-ADMIN HELP",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        section("Navigation"),
        Line::raw(""),
        key_line("↑/↓", "Select a row"),
        key_line("R", "Reload the table"),
        key_line("Q / Esc", "Quit"),
        key_line("?", "Toggle this help"),
        Line::raw(""),
        section("Editing order"),
        Line::raw(""),
        key_line("Enter", "Edit the selected row's order"),
        key_line("0-9", "Start typing a new order"),
        key_line("Backspace", "Delete a digit"),
        key_line("Enter", "Save (blank saves 0)"),
        key_line("Esc", "Cancel the edit"),
        Line::raw(""),
        section("Rows"),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  saving…  ", Style::default().fg(Color::DarkGray)),
            Span::raw("Save in flight, row is read-only"),
        ]),
        Line::from(vec![
            Span::styled("  -        ", Style::default().fg(Color::Yellow)),
            Span::raw("No order value, listed last"),
        ]),
        Line::raw(""),
        Line::from(Span::styled(
            "The list re-sorts once a save is confirmed. A failed save",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            "restores the value stored on the server.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(help_text).block(
        Block::default()
            .title(" Help ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    frame.render_widget(paragraph, popup_area);
}

/// Create a centered rectangle.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);

    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside_and_centered() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 70, area);

        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 35);
        assert_eq!(popup.x, 20);
        assert!(popup.y + popup.height <= area.height);
    }
}
