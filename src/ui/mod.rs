// UI module for rendering the TUI.
// Contains the search bar, definition panel, recent words list, and help overlay.

mod definition;
mod list;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Focus};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_search_bar(frame, app, chunks[0]);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(chunks[1]);

    definition::render_definition(frame, &app.search, content[0]);
    let history_focused = app.focus == Focus::History;
    list::render_history(frame, &mut app.history, history_focused, content[1]);

    draw_status_bar(frame, app, chunks[2]);

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Draw the search input.
fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::Search;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![
        Span::styled("Word: ", Style::default().fg(Color::DarkGray)),
        Span::raw(app.search.input.as_str()),
    ];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }

    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" pocketdict ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
    );
    frame.render_widget(input, area);
}

/// Draw the status bar with keybinding hints.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(message) = &app.status_message {
        let status = Paragraph::new(format!(" {}", message)).style(Style::default().fg(Color::Red));
        frame.render_widget(status, area);
        return;
    }

    let mut hints = match app.focus {
        Focus::Search => vec![
            Span::raw(" ↵ "),
            Span::styled("Search", Style::default().fg(Color::DarkGray)),
            Span::raw("  ↑↓ "),
            Span::styled("Scroll", Style::default().fg(Color::DarkGray)),
            Span::raw("  Tab "),
            Span::styled("History", Style::default().fg(Color::DarkGray)),
            Span::raw("  F1 "),
            Span::styled("Help", Style::default().fg(Color::DarkGray)),
            Span::raw("  ^C "),
            Span::styled("Quit", Style::default().fg(Color::DarkGray)),
        ],
        Focus::History => vec![
            Span::raw(" ↑↓ "),
            Span::styled("Navigate", Style::default().fg(Color::DarkGray)),
            Span::raw("  ↵ "),
            Span::styled("Look up", Style::default().fg(Color::DarkGray)),
            Span::raw("  d "),
            Span::styled("Delete", Style::default().fg(Color::DarkGray)),
            Span::raw("  C "),
            Span::styled("Clear", Style::default().fg(Color::DarkGray)),
            Span::raw("  Tab "),
            Span::styled("Search", Style::default().fg(Color::DarkGray)),
            Span::raw("  ? "),
            Span::styled("Help", Style::default().fg(Color::DarkGray)),
            Span::raw("  q "),
            Span::styled("Quit", Style::default().fg(Color::DarkGray)),
        ],
    };

    if app.is_searching() {
        hints.push(Span::styled("  searching…", Style::default().fg(Color::Yellow)));
    }

    let status = Paragraph::new(Line::from(hints));
    frame.render_widget(status, area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Create a centered popup
    let popup_width = 52;
    let popup_height = 22;
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(
        popup_x,
        popup_y,
        popup_width.min(area.width),
        popup_height.min(area.height),
    );

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let help_text = help_lines();

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}

/// Help overlay contents, grouped by the focus each key works in.
fn help_lines() -> Vec<Line<'static>> {
    let key = |k: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(k, Style::default().fg(Color::Cyan)),
            Span::raw(desc),
        ])
    };
    let heading = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        ))
    };

    vec![
        heading("Anywhere"),
        key("  Tab           ", "Switch search / history"),
        key("  F1            ", "Show/hide this help"),
        key("  Esc           ", "Dismiss error"),
        key("  Ctrl-C        ", "Quit"),
        Line::from(""),
        heading("Search box"),
        key("  Enter         ", "Look up word"),
        key("  ↑/↓           ", "Scroll definition"),
        Line::from(""),
        heading("History list"),
        key("  ↑/↓ or k/j    ", "Navigate"),
        key("  Enter         ", "Look up selected word"),
        key("  d or Del      ", "Delete selected word"),
        key("  C             ", "Clear all history"),
        key("  ?             ", "Show help"),
        key("  q             ", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("F1", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]),
    ]
}
