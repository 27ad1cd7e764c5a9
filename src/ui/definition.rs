// Definition panel rendering.
// Lays out a word record as styled lines: headword, phonetic, meanings, and examples.

use ratatui::{prelude::*, widgets::*};

use crate::state::{LoadingState, SearchState};
use crate::word::WordRecord;

use super::list::{format_relative_time, render_empty, render_error, render_loading};

/// Build the styled lines for a record.
pub fn definition_lines(record: &WordRecord) -> Vec<Line<'_>> {
    let mut lines = Vec::new();

    let mut title = vec![Span::styled(
        record.headword.as_str(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(phonetic) = &record.phonetic {
        title.push(Span::styled(
            format!("  {}", phonetic),
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines.push(Line::from(title));

    if let Some(origin) = &record.origin {
        lines.push(Line::from(vec![
            Span::styled("Origin: ", Style::default().fg(Color::DarkGray)),
            Span::raw(origin.as_str()),
        ]));
    }

    for meaning in &record.meanings {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            meaning.part_of_speech.as_str(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::ITALIC),
        )));

        for (i, definition) in meaning.definitions.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {}. ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::raw(definition.text.as_str()),
            ]));
            if let Some(example) = &definition.example {
                lines.push(Line::from(Span::styled(
                    format!("     \"{}\"", example),
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )));
            }
        }

        if !meaning.synonyms.is_empty() {
            lines.push(word_list_line("Synonyms", &meaning.synonyms, Color::Green));
        }
        if !meaning.antonyms.is_empty() {
            lines.push(word_list_line("Antonyms", &meaning.antonyms, Color::Red));
        }
    }

    lines
}

fn word_list_line<'a>(label: &'a str, words: &[String], color: Color) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {}: ", label), Style::default().fg(Color::DarkGray)),
        Span::styled(words.join(", "), Style::default().fg(color)),
    ])
}

/// Render the result panel for the current search state.
pub fn render_definition(frame: &mut Frame, search: &SearchState, area: Rect) {
    match &search.result {
        LoadingState::Idle => render_empty(frame, area, "Type a word and press Enter"),
        LoadingState::Loading => render_loading(frame, area, "Looking up"),
        LoadingState::Error(e) => render_error(frame, area, e),
        LoadingState::Loaded(record) => {
            let title = match &record.cached_at {
                Some(at) => format!(
                    " Definition [{} senses, cached {}] ",
                    record.definition_count(),
                    format_relative_time(at)
                ),
                None => format!(" Definition [{} senses] ", record.definition_count()),
            };

            let paragraph = Paragraph::new(definition_lines(record))
                .block(Block::default().borders(Borders::ALL).title(title))
                .wrap(Wrap { trim: false })
                .scroll((search.scroll_y, 0));
            frame.render_widget(paragraph, area);
        }
    }
}
