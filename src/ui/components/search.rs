use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::state::AppState;
use crate::store::MusicStore;

use super::super::theme::*;

pub fn render_search(f: &mut Frame, area: Rect, state: &AppState, store: &MusicStore) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search input
            Constraint::Min(0),    // results
        ])
        .split(area);

    let input_focused = state.search.input_active;
    let cursor = if input_focused && (state.tick / 5) % 2 == 0 { "│" } else { "" };
    let input_block = Block::default()
        .title(Span::styled(" 󰍉 Search ", title_style()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style(input_focused))
        .style(normal_style().bg(SURFACE));

    let input_text = Paragraph::new(Line::from(vec![
        Span::styled(" ", muted_style()),
        Span::styled(state.search.query.clone(), accent_style()),
        Span::styled(cursor, moon_style()),
    ]))
    .block(input_block);
    f.render_widget(input_text, chunks[0]);

    let results = store.search_results();
    if results.is_empty() {
        let placeholder = if state.search.in_flight {
            "  Searching..."
        } else if state.search.query.is_empty() {
            "  Press [s] to search, type a query, then Enter..."
        } else {
            "  No results found."
        };
        let para = Paragraph::new(Line::from(Span::styled(placeholder, muted_style()))).block(
            Block::default()
                .title(Span::styled(" Results ", dim_style()))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style(false))
                .style(normal_style().bg(BG)),
        );
        f.render_widget(para, chunks[1]);
        return;
    }

    let selected = state.search.selected;
    let items: Vec<ListItem> = results
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let is_sel = i == selected;
            let num = format!("{:>3}. ", i + 1);
            let heart = if track.liked { "❤ " } else { "  " };

            let line = if is_sel {
                Line::from(vec![
                    Span::styled("▶ ", playing_style()),
                    Span::styled(heart, gold_style()),
                    Span::styled(track.title.clone(), selected_style()),
                    Span::styled(" — ", muted_style()),
                    Span::styled(track.artist.clone(), dim_style()),
                    Span::styled(format!("  {}", track.duration_formatted()), muted_style()),
                ])
            } else {
                Line::from(vec![
                    Span::styled(num, muted_style()),
                    Span::styled(heart, gold_style()),
                    Span::styled(track.title.clone(), normal_style()),
                    Span::styled(" — ", muted_style()),
                    Span::styled(track.artist.clone(), dim_style()),
                    Span::styled(
                        format!("  {}  {}", track.album, track.duration_formatted()),
                        muted_style(),
                    ),
                ])
            };

            if is_sel {
                ListItem::new(line).style(selected_style())
            } else {
                ListItem::new(line)
            }
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(Span::styled(
                    format!(" Results ({}) ", results.len()),
                    title_style(),
                ))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style(!input_focused))
                .style(normal_style().bg(BG)),
        )
        .highlight_style(selected_style());

    f.render_widget(list, chunks[1]);
}
