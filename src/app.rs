// App state and main event loop.
// Routes keyboard input to lookups and history actions, and pumps service results into state.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use tokio::runtime::Handle;
use tokio::sync::{mpsc, watch};
use tracing::debug;

use crate::service::{Resolution, ResolutionService};
use crate::state::{HistoryState, SearchState};
use crate::ui;
use crate::word::WordRecord;

/// Panel receiving keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Search,
    History,
}

impl Focus {
    pub fn toggle(&self) -> Self {
        match self {
            Focus::Search => Focus::History,
            Focus::History => Focus::Search,
        }
    }
}

/// Main application state.
pub struct App {
    /// Panel with keyboard focus.
    pub focus: Focus,
    pub search: SearchState,
    pub history: HistoryState,
    /// Last background failure (delete/clear), shown in the status bar.
    pub status_message: Option<String>,
    pub show_help: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
    service: ResolutionService,
    runtime: Handle,
    pending: Option<mpsc::UnboundedReceiver<Resolution>>,
    recent: watch::Receiver<Vec<WordRecord>>,
    failures_tx: mpsc::UnboundedSender<String>,
    failures_rx: mpsc::UnboundedReceiver<String>,
}

impl App {
    pub fn new(service: ResolutionService, runtime: Handle) -> Self {
        let mut recent = service.recent_words();
        let mut history = HistoryState::new();
        history.set_items(recent.borrow_and_update().clone());
        let (failures_tx, failures_rx) = mpsc::unbounded_channel();

        Self {
            focus: Focus::default(),
            search: SearchState::new(),
            history,
            status_message: None,
            show_help: false,
            should_quit: false,
            service,
            runtime,
            pending: None,
            recent,
            failures_tx,
            failures_rx,
        }
    }

    /// Main event loop.
    pub fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        while !self.should_quit {
            self.pump();
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.handle_events()?;
        }
        Ok(())
    }

    /// Drain lookup results, history updates, and background failures.
    pub fn pump(&mut self) {
        if let Some(rx) = self.pending.as_mut() {
            loop {
                match rx.try_recv() {
                    Ok(step) => {
                        let terminal = step.is_terminal();
                        self.search.apply(step);
                        if terminal {
                            self.pending = None;
                            break;
                        }
                    }
                    Err(mpsc::error::TryRecvError::Empty) => break,
                    Err(mpsc::error::TryRecvError::Disconnected) => {
                        self.pending = None;
                        break;
                    }
                }
            }
        }

        if self.recent.has_changed().unwrap_or(false) {
            let words = self.recent.borrow_and_update().clone();
            self.history.set_items(words);
        }

        while let Ok(message) = self.failures_rx.try_recv() {
            self.status_message = Some(message);
        }
    }

    /// Whether a lookup is still in flight.
    pub fn is_searching(&self) -> bool {
        self.pending.is_some()
    }

    /// Handle keyboard and other events.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1)) {
                self.show_help = false;
            }
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::BackTab => self.focus = self.focus.toggle(),
            KeyCode::F(1) => self.show_help = true,
            KeyCode::Esc => {
                if !self.search.clear_error() {
                    self.status_message = None;
                }
            }
            _ => match self.focus {
                Focus::Search => self.handle_search_key(key),
                Focus::History => self.handle_history_key(key),
            },
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_search(),
            KeyCode::Backspace => self.search.pop_char(),
            KeyCode::Up => self.search.scroll_up(),
            KeyCode::Down => self.search.scroll_down(),
            KeyCode::Char(c) => self.search.push_char(c),
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Up | KeyCode::Char('k') => self.history.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.history.select_next(),
            KeyCode::Enter => {
                if let Some(word) = self.history.selected().map(|w| w.headword.clone()) {
                    self.search.input = word;
                    self.submit_search();
                }
            }
            KeyCode::Delete | KeyCode::Char('d') => {
                if let Some(word) = self.history.selected().map(|w| w.headword.clone()) {
                    self.delete_word(word);
                }
            }
            KeyCode::Char('C') => self.clear_history(),
            _ => {}
        }
    }

    /// Start a lookup for the current input. Blank input never reaches the service.
    pub fn submit_search(&mut self) {
        let Some(query) = self.search.take_query() else {
            return;
        };
        debug!(%query, "submitting search");

        let _guard = self.runtime.enter();
        self.pending = Some(self.service.resolve(&query));
    }

    fn delete_word(&mut self, word: String) {
        let service = self.service.clone();
        let failures = self.failures_tx.clone();
        self.runtime.spawn(async move {
            if let Err(e) = service.delete_word(&word).await {
                let _ = failures.send(format!("Could not delete {}: {}", word, e));
            }
        });
    }

    fn clear_history(&mut self) {
        let service = self.service.clone();
        let failures = self.failures_tx.clone();
        self.runtime.spawn(async move {
            if let Err(e) = service.clear_history().await {
                let _ = failures.send(format!("Could not clear history: {}", e));
            }
        });
    }
}
