use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::app::state::AppState;
use crate::store::MusicStore;

use super::super::theme::*;

pub fn render_library(f: &mut Frame, area: Rect, state: &AppState, store: &MusicStore) {
    let favorites = store.favorites();

    if favorites.is_empty() {
        let para = Paragraph::new(Line::from(Span::styled(
            "  No favorites yet. Press [l] on any track to keep it here.",
            muted_style(),
        )))
        .block(make_block(" ❤  Favorites ", false));
        f.render_widget(para, area);
        return;
    }

    let selected = state.library.selected;
    let rows: Vec<Row> = favorites
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let is_sel = i == selected;
            let num = if is_sel { "▶".to_string() } else { format!("{:>3}", i + 1) };
            let style = if is_sel { selected_style() } else { normal_style() };
            Row::new(vec![
                Cell::from(num).style(if is_sel { playing_style() } else { muted_style() }),
                Cell::from(track.title.clone()).style(style),
                Cell::from(track.artist.clone()).style(dim_style()),
                Cell::from(track.album.clone()).style(muted_style()),
                Cell::from(track.duration_formatted()).style(muted_style()),
            ])
            .style(style)
        })
        .collect();

    let header = Row::new(vec![
        Cell::from(" # ").style(header_style()),
        Cell::from("Title").style(header_style()),
        Cell::from("Artist").style(header_style()),
        Cell::from("Album").style(header_style()),
        Cell::from("Dur").style(header_style()),
    ])
    .height(1);

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Percentage(30),
            Constraint::Percentage(25),
            Constraint::Percentage(30),
            Constraint::Length(7),
        ],
    )
    .header(header)
    .block(make_block(
        &format!(" ❤  Favorites ({}) ", favorites.len()),
        true,
    ))
    .row_highlight_style(selected_style());

    f.render_widget(table, area);
}

fn make_block(title: &str, focused: bool) -> Block<'static> {
    Block::default()
        .title(Span::styled(title.to_string(), title_style()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style(focused))
        .style(normal_style().bg(BG))
}
