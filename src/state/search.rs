// Search panel state.
// Tracks the query input and the loading state of the current lookup.

use crate::service::Resolution;
use crate::word::WordRecord;

/// Loading state for async data.
#[derive(Debug, Clone, Default)]
pub enum LoadingState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadingState<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadingState::Loaded(_))
    }
}

#[cfg(test)]
impl<T> LoadingState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// State for the search input and result panel.
#[derive(Debug, Default)]
pub struct SearchState {
    /// Text typed into the search box.
    pub input: String,
    /// Result of the last lookup.
    pub result: LoadingState<WordRecord>,
    /// Vertical scroll offset for the definition panel.
    pub scroll_y: u16,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
    }

    /// Validate the input before a lookup is issued.
    /// A blank query shows an error and returns `None`.
    pub fn take_query(&mut self) -> Option<String> {
        if self.input.trim().is_empty() {
            self.result = LoadingState::Error("Please enter a word".to_string());
            return None;
        }
        Some(self.input.trim().to_string())
    }

    /// Fold one lookup step into the panel state.
    pub fn apply(&mut self, step: Resolution) {
        self.result = match step {
            Resolution::Loading => LoadingState::Loading,
            Resolution::Success(record) => LoadingState::Loaded(record),
            Resolution::Error(e) => LoadingState::Error(e.to_string()),
        };
        self.scroll_y = 0;
    }

    /// Dismiss an error, keeping any other state.
    pub fn clear_error(&mut self) -> bool {
        if matches!(self.result, LoadingState::Error(_)) {
            self.result = LoadingState::Idle;
            true
        } else {
            false
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_y = self.scroll_y.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.result.is_loaded() {
            self.scroll_y = self.scroll_y.saturating_add(1);
        }
    }
}
