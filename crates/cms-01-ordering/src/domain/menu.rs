//! # Header Menu Editor
//!
//! Menu items live inside the `header_settings` row. Unlike table records
//! they are kept densely numbered: every removal or move renumbers the
//! items `1..=n` in list order.

use shared_types::MenuItem;

/// Direction of a one-step move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Editable header menu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuEditor {
    items: Vec<MenuItem>,
}

impl MenuEditor {
    /// Start editing `items`, shown in ascending `order`.
    pub fn new(mut items: Vec<MenuItem>) -> Self {
        items.sort_by_key(|item| item.order);
        Self { items }
    }

    /// Menu used when no header settings have been saved yet.
    pub fn default_menu() -> Vec<MenuItem> {
        vec![
            MenuItem::new("1", "/projects", "WORK", 1),
            MenuItem::new("2", "/about", "ABOUT", 2),
            MenuItem::new("3", "/blog", "NEWS", 3),
            MenuItem::new("4", "/careers", "CAREERS", 4),
        ]
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<MenuItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an item at `len + 1`.
    pub fn add(&mut self, id: impl Into<String>, href: impl Into<String>, label: impl Into<String>) {
        let order = self.items.len() as i64 + 1;
        self.items.push(MenuItem::new(id, href, label, order));
    }

    /// Remove the item at `index` and renumber the rest.
    pub fn remove(&mut self, index: usize) -> Option<MenuItem> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        self.renumber();
        Some(removed)
    }

    /// Swap the item at `index` with its neighbour. No-op at the edges.
    ///
    /// Returns whether anything moved.
    pub fn move_item(&mut self, index: usize, direction: MoveDirection) -> bool {
        let target = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < self.items.len() => index + 1,
            _ => return false,
        };
        if index >= self.items.len() {
            return false;
        }

        self.items.swap(index, target);
        self.renumber();
        true
    }

    pub fn move_up(&mut self, index: usize) -> bool {
        self.move_item(index, MoveDirection::Up)
    }

    pub fn move_down(&mut self, index: usize) -> bool {
        self.move_item(index, MoveDirection::Down)
    }

    pub fn set_label(&mut self, index: usize, label: impl Into<String>) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                item.label = label.into();
                true
            }
            None => false,
        }
    }

    pub fn set_href(&mut self, index: usize, href: impl Into<String>) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                item.href = href.into();
                true
            }
            None => false,
        }
    }

    fn renumber(&mut self) {
        for (position, item) in self.items.iter_mut().enumerate() {
            item.order = position as i64 + 1;
        }
    }
}
