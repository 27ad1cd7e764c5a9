// Recent words list state.
// Mirrors the service's live history view with keyboard selection.

use ratatui::widgets::ListState;

use crate::word::WordRecord;

/// Selectable list of recently looked-up words.
#[derive(Debug, Default)]
pub struct HistoryState {
    pub items: Vec<WordRecord>,
    pub list_state: ListState,
}

impl HistoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list, keeping the selection in range.
    pub fn set_items(&mut self, items: Vec<WordRecord>) {
        self.items = items;
        if self.items.is_empty() {
            self.list_state.select(None);
        } else {
            let i = self
                .list_state
                .selected()
                .unwrap_or(0)
                .min(self.items.len() - 1);
            self.list_state.select(Some(i));
        }
    }

    /// Get the currently selected word.
    pub fn selected(&self) -> Option<&WordRecord> {
        self.list_state.selected().and_then(|i| self.items.get(i))
    }

    /// Select the next item in the list.
    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i >= self.items.len() - 1 => i,
            Some(i) => i + 1,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Select the previous item in the list.
    pub fn select_prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}
