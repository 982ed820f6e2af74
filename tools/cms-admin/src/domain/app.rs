//! Application state management.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use cms_01_ordering::{coerce_order_input, MutationOutcome, RowView};
use shared_types::{Notification, RecordId};

use super::TableKind;

/// Notifications kept for the footer.
pub const NOTIFICATION_LIMIT: usize = 3;

/// Longest order value that can be typed.
pub const MAX_INPUT_DIGITS: usize = 9;

/// Application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Table view.
    #[default]
    Dashboard,
    /// Typing a new order value for the selected row.
    Editing,
    /// Help overlay.
    Help,
    /// Quitting.
    Quit,
}

/// Keys the panel reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Enter,
    Backspace,
    Esc,
}

/// Work the event loop must run on behalf of the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Re-fetch the table.
    Refresh,
    /// Persist a new order value.
    CommitOrder { id: RecordId, order: i64 },
}

/// An order value being typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderEdit {
    pub id: RecordId,
    pub buffer: String,
}

/// Main application model.
pub struct App {
    /// Current application state/view.
    pub state: AppState,
    pub table: TableKind,
    /// Rows in display order.
    pub rows: Vec<RowView>,
    /// Index into `rows`.
    pub selected: usize,
    pub edit: Option<OrderEdit>,
    /// Order a new record would receive.
    pub next_order: Option<i64>,
    /// Newest last.
    pub notifications: VecDeque<Notification>,
    /// Last refresh timestamp.
    pub last_refresh: Option<DateTime<Utc>>,
    /// Error message to display (if any).
    pub error_message: Option<String>,
    /// Signed-in operator, or `demo`.
    pub user: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new(TableKind::default())
    }
}

impl App {
    /// Create a new application instance.
    pub fn new(table: TableKind) -> Self {
        Self {
            state: AppState::Dashboard,
            table,
            rows: Vec::new(),
            selected: 0,
            edit: None,
            next_order: None,
            notifications: VecDeque::new(),
            last_refresh: None,
            error_message: None,
            user: None,
        }
    }

    /// Handle keyboard input.
    pub fn handle_key(&mut self, key: Key) -> Option<Command> {
        match self.state {
            AppState::Dashboard => self.handle_dashboard_key(key),
            AppState::Editing => self.handle_editing_key(key),
            AppState::Help => {
                // Any key closes help
                self.state = AppState::Dashboard;
                None
            }
            AppState::Quit => None,
        }
    }

    fn handle_dashboard_key(&mut self, key: Key) -> Option<Command> {
        match key {
            Key::Char('q') | Key::Char('Q') | Key::Esc => self.state = AppState::Quit,
            Key::Char('?') => self.state = AppState::Help,
            Key::Char('r') | Key::Char('R') => return Some(Command::Refresh),
            Key::Up => self.select_prev(),
            Key::Down => self.select_next(),
            Key::Enter | Key::Char('e') => {
                let current = self
                    .selected_row()
                    .and_then(|row| row.order)
                    .map(|order| order.to_string())
                    .unwrap_or_default();
                self.start_edit(current);
            }
            Key::Char(c) if c.is_ascii_digit() => self.start_edit(c.to_string()),
            _ => {}
        }
        None
    }

    fn handle_editing_key(&mut self, key: Key) -> Option<Command> {
        match key {
            Key::Char(c) if c.is_ascii_digit() => {
                if let Some(edit) = self.edit.as_mut() {
                    if edit.buffer.len() < MAX_INPUT_DIGITS {
                        edit.buffer.push(c);
                    }
                }
                None
            }
            Key::Backspace => {
                if let Some(edit) = self.edit.as_mut() {
                    edit.buffer.pop();
                }
                None
            }
            Key::Esc => {
                self.cancel_edit();
                None
            }
            Key::Enter => {
                self.state = AppState::Dashboard;
                self.edit.take().map(|edit| Command::CommitOrder {
                    order: coerce_order_input(&edit.buffer),
                    id: edit.id,
                })
            }
            _ => None,
        }
    }

    /// Begin editing the selected row. Rows with a save in flight are
    /// read-only.
    fn start_edit(&mut self, buffer: String) {
        let Some(row) = self.selected_row() else {
            return;
        };
        if row.pending {
            let text = format!("\"{}\" is still saving", row.label);
            self.notify(Notification::warning(text));
            return;
        }
        self.edit = Some(OrderEdit {
            id: row.id.clone(),
            buffer,
        });
        self.state = AppState::Editing;
    }

    fn cancel_edit(&mut self) {
        self.edit = None;
        self.state = AppState::Dashboard;
    }

    /// Move selection up.
    pub fn select_prev(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.selected = if self.selected == 0 {
            self.rows.len() - 1
        } else {
            self.selected - 1
        };
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.rows.len();
    }

    /// Get the currently selected row.
    pub fn selected_row(&self) -> Option<&RowView> {
        self.rows.get(self.selected)
    }

    /// Replace the rows, keeping the selection on the same record when it
    /// is still present.
    pub fn set_rows(&mut self, rows: Vec<RowView>) {
        let selected_id = self.selected_row().map(|row| row.id.clone());
        self.rows = rows;

        self.selected = selected_id
            .and_then(|id| self.rows.iter().position(|row| row.id == id))
            .unwrap_or_else(|| self.selected.min(self.rows.len().saturating_sub(1)));

        // The edited record may have been deleted by a refresh.
        if let Some(edit) = &self.edit {
            if !self.rows.iter().any(|row| row.id == edit.id) {
                self.cancel_edit();
            }
        }
    }

    /// Queue a footer notification, dropping the oldest past the limit.
    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push_back(notification);
        while self.notifications.len() > NOTIFICATION_LIMIT {
            self.notifications.pop_front();
        }
    }

    pub fn latest_notification(&self) -> Option<&Notification> {
        self.notifications.back()
    }

    /// Report how a committed edit ended. Failures already arrive through
    /// the mutator's notifier.
    pub fn record_outcome(&mut self, id: &RecordId, outcome: &MutationOutcome) {
        if matches!(outcome, MutationOutcome::Reconciled) {
            let label = self
                .rows
                .iter()
                .find(|row| &row.id == id)
                .map(|row| row.label.clone())
                .unwrap_or_else(|| id.to_string());
            self.notify(Notification::success(format!("Order of \"{}\" updated", label)));
        }
    }

    /// Text shown in the order column for a row.
    pub fn order_cell(&self, row: &RowView) -> String {
        match &self.edit {
            Some(edit) if edit.id == row.id => format!("{}▏", edit.buffer),
            _ => row
                .order
                .map(|order| order.to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }

    /// Check if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.state == AppState::Quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cms_01_ordering::MutationPhase;
    use shared_types::NotificationLevel;

    fn row(id: i64, label: &str, order: Option<i64>, pending: bool) -> RowView {
        RowView {
            id: RecordId::Int(id),
            label: label.to_string(),
            order,
            pending,
            phase: if pending {
                MutationPhase::Persisting
            } else {
                MutationPhase::Idle
            },
        }
    }

    fn app_with_rows() -> App {
        let mut app = App::new(TableKind::Projects);
        app.set_rows(vec![
            row(1, "Atlas", Some(1), false),
            row(2, "Birch", Some(2), true),
            row(3, "Cedar", None, false),
        ]);
        app
    }

    #[test]
    fn test_quit_and_help_keys() {
        let mut app = App::default();
        app.handle_key(Key::Char('?'));
        assert_eq!(app.state, AppState::Help);

        app.handle_key(Key::Char('x'));
        assert_eq!(app.state, AppState::Dashboard);

        assert_eq!(app.handle_key(Key::Char('r')), Some(Command::Refresh));
        app.handle_key(Key::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_enter_prefills_current_order_and_commits() {
        let mut app = app_with_rows();

        app.handle_key(Key::Enter);
        assert_eq!(app.state, AppState::Editing);
        assert_eq!(app.order_cell(&app.rows[0]), "1▏");

        app.handle_key(Key::Backspace);
        app.handle_key(Key::Char('4'));
        app.handle_key(Key::Char('2'));
        let command = app.handle_key(Key::Enter);

        assert_eq!(
            command,
            Some(Command::CommitOrder {
                id: RecordId::Int(1),
                order: 42
            })
        );
        assert_eq!(app.state, AppState::Dashboard);
        assert!(app.edit.is_none());
    }

    #[test]
    fn test_empty_buffer_commits_zero() {
        let mut app = app_with_rows();
        app.select_next();
        app.select_next();

        app.handle_key(Key::Enter);
        assert_eq!(app.order_cell(&app.rows[2]), "▏");
        let command = app.handle_key(Key::Enter);

        assert_eq!(
            command,
            Some(Command::CommitOrder {
                id: RecordId::Int(3),
                order: 0
            })
        );
    }

    #[test]
    fn test_escape_cancels_edit() {
        let mut app = app_with_rows();
        app.handle_key(Key::Char('7'));
        assert_eq!(app.edit.as_ref().map(|e| e.buffer.as_str()), Some("7"));

        assert_eq!(app.handle_key(Key::Esc), None);
        assert_eq!(app.state, AppState::Dashboard);
        assert_eq!(app.order_cell(&app.rows[0]), "1");
    }

    #[test]
    fn test_pending_row_is_not_editable() {
        let mut app = app_with_rows();
        app.select_next();

        app.handle_key(Key::Enter);

        assert_eq!(app.state, AppState::Dashboard);
        let note = app.latest_notification().unwrap();
        assert_eq!(note.level, NotificationLevel::Warning);
        assert!(note.text.contains("Birch"));
    }

    #[test]
    fn test_input_length_is_capped() {
        let mut app = app_with_rows();
        app.handle_key(Key::Char('1'));
        for _ in 0..20 {
            app.handle_key(Key::Char('9'));
        }
        assert_eq!(app.edit.as_ref().unwrap().buffer.len(), MAX_INPUT_DIGITS);
    }

    #[test]
    fn test_selection_follows_record_across_resort() {
        let mut app = app_with_rows();
        app.select_next(); // Birch

        app.set_rows(vec![
            row(2, "Birch", Some(0), false),
            row(1, "Atlas", Some(1), false),
            row(3, "Cedar", None, false),
        ]);

        assert_eq!(app.selected, 0);
        assert_eq!(app.selected_row().unwrap().label, "Birch");
    }

    #[test]
    fn test_selection_wraps() {
        let mut app = app_with_rows();
        app.select_prev();
        assert_eq!(app.selected, 2);
        app.select_next();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn test_notifications_are_bounded() {
        let mut app = App::default();
        for n in 0..5 {
            app.notify(Notification::error(format!("failure {n}")));
        }
        assert_eq!(app.notifications.len(), NOTIFICATION_LIMIT);
        assert_eq!(app.latest_notification().unwrap().text, "failure 4");
    }

    #[test]
    fn test_success_outcome_is_announced() {
        let mut app = app_with_rows();
        app.record_outcome(&RecordId::Int(1), &MutationOutcome::Reconciled);
        app.record_outcome(&RecordId::Int(1), &MutationOutcome::Superseded);

        assert_eq!(app.notifications.len(), 1);
        assert_eq!(app.latest_notification().unwrap().text, "Order of \"Atlas\" updated");
    }
}
