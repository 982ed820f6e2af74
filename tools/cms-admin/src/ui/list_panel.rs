//! List panel: rows of the table being reordered.
//!
//! ```text
//! ┌ PROJECTS ───────────────────────────────────────────┐
//! │ ORDER  ID     TITLE                        STATE    │
//! │ 1      12     Atlas Rebrand                          │
//! │ 2▏     14     Birch Editorial              editing  │
//! │ 3      15     Delta Campaign               saving…  │
//! │ -      13     Cedar Packaging                        │
//! └─────────────────────────────────────────────────────┘
//! ```

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use cms_01_ordering::RowView;

use crate::domain::{App, AppState};

/// Render the list panel.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(format!(" {} ", app.table.title().to_uppercase()))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    if app.rows.is_empty() {
        let empty = Paragraph::new(Line::styled(
            "No records. Press R to reload.",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block)
        .centered();
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(["ORDER", "ID", "TITLE", "STATE"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app.rows.iter().map(|row| table_row(app, row)).collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(11),
            Constraint::Length(10),
            Constraint::Min(20),
            Constraint::Length(9),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

    let mut state = TableState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn table_row<'a>(app: &App, row: &'a RowView) -> Row<'a> {
    let editing = app.state == AppState::Editing
        && app.edit.as_ref().is_some_and(|edit| edit.id == row.id);

    let (state, style) = if row.pending {
        ("saving…", Style::default().fg(Color::DarkGray))
    } else if editing {
        ("editing", Style::default().fg(Color::Yellow))
    } else {
        ("", Style::default())
    };

    let order_style = match row.order {
        None if !editing => Style::default().fg(Color::Yellow),
        _ => Style::default(),
    };

    Row::new([
        Cell::from(app.order_cell(row)).style(order_style),
        Cell::from(row.id.to_string()),
        Cell::from(row.label.as_str()),
        Cell::from(state),
    ])
    .style(style)
}
