// State management module.
// Holds the search panel and recent history state driven by the event loop.

pub mod history;
pub mod search;

pub use history::HistoryState;
pub use search::{LoadingState, SearchState};
