//! Main layout orchestration.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  CMS-ADMIN  Projects  Last refresh: 10:42:07  Next order: 5   │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  PROJECTS                                                       │
//! │  ...                                                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ✓ Order of "Atlas Rebrand" updated                             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use cms_01_ordering::AllocationPolicy;
use shared_types::NotificationLevel;

use crate::domain::{App, AppState};

use super::{list_panel, widgets};

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.area();

    // Main vertical layout: header, body, footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(6),    // Rows
            Constraint::Length(3), // Footer (notification or keybinds)
        ])
        .split(size);

    render_header(frame, main_chunks[0], app);
    list_panel::render(frame, main_chunks[1], app);
    render_footer(frame, main_chunks[2], app);

    if app.state == AppState::Help {
        widgets::render_help_overlay(frame);
    }
}

/// Render the header bar.
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            " CMS-ADMIN ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {} ", app.table.title()), Style::default().fg(Color::White)),
    ];

    // Show last refresh time or error
    spans.push(if let Some(err) = &app.error_message {
        Span::styled(format!(" ⚠ {} ", err), Style::default().fg(Color::Red))
    } else if let Some(time) = app.last_refresh {
        Span::styled(
            format!(" Last refresh: {} ", time.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled(" No data ", Style::default().fg(Color::DarkGray))
    });

    let slotted = matches!(app.table.allocation(), AllocationPolicy::Slots { .. });
    match app.next_order {
        Some(next) => spans.push(Span::styled(
            format!(" {}: {} ", app.table.next_label(), next),
            Style::default().fg(Color::Yellow),
        )),
        None if slotted && !app.rows.is_empty() => spans.push(Span::styled(
            format!(" {}: full ", app.table.next_label()),
            Style::default().fg(Color::Red),
        )),
        None => {}
    }

    if let Some(user) = &app.user {
        spans.push(Span::styled(format!(" [{}] ", user), Style::default().fg(Color::DarkGray)));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );

    frame.render_widget(header, area);
}

/// Render the latest notification, or the keyboard shortcuts when there
/// is none.
fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let line = match (app.state, app.latest_notification()) {
        (AppState::Editing, _) => Line::from(vec![
            Span::styled("[0-9]", Style::default().fg(Color::Yellow)),
            Span::raw(" Type order  "),
            Span::styled("[Backspace]", Style::default().fg(Color::Yellow)),
            Span::raw(" Delete  "),
            Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
            Span::raw(" Save  "),
            Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
            Span::raw(" Cancel"),
        ]),
        (_, Some(notification)) => {
            let (mark, color) = match notification.level {
                NotificationLevel::Success => ("✓", Color::Green),
                NotificationLevel::Warning => ("!", Color::Yellow),
                NotificationLevel::Error => ("✗", Color::Red),
            };
            Line::from(vec![
                Span::styled(format!("{} {}: ", mark, notification.title), Style::default().fg(color)),
                Span::raw(notification.text.clone()),
            ])
        }
        (_, None) => Line::from(vec![
            Span::styled("[↑↓]", Style::default().fg(Color::Yellow)),
            Span::raw(" Select  "),
            Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
            Span::raw(" Edit order  "),
            Span::styled("[R]", Style::default().fg(Color::Yellow)),
            Span::raw(" Refresh  "),
            Span::styled("[?]", Style::default().fg(Color::Yellow)),
            Span::raw(" Help  "),
            Span::styled("[Q]", Style::default().fg(Color::Yellow)),
            Span::raw(" Quit"),
        ]),
    };

    let footer = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .centered();

    frame.render_widget(footer, area);
}
