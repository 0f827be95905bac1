use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::state::AppState;
use crate::store::MusicStore;

use super::super::theme::*;

pub fn render_home(f: &mut Frame, area: Rect, state: &AppState, store: &MusicStore) {
    if store.is_loading() && store.mood_blocks().is_empty() {
        let para = Paragraph::new(Line::from(Span::styled(
            "  ⠋ Gathering tonight's moods...",
            dim_style(),
        )))
        .block(make_block(" 🌙 Moods ", true));
        f.render_widget(para, area);
        return;
    }

    if store.mood_blocks().is_empty() {
        let para = Paragraph::new(Line::from(Span::styled(
            "  Nothing here — press [m] to refresh the mood blocks.",
            muted_style(),
        )))
        .block(make_block(" 🌙 Moods ", false));
        f.render_widget(para, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(0)])
        .split(area);

    render_blocks(f, chunks[0], state, store);
    render_block_tracks(f, chunks[1], state, store);
}

fn render_blocks(f: &mut Frame, area: Rect, state: &AppState, store: &MusicStore) {
    let items: Vec<ListItem> = store
        .mood_blocks()
        .iter()
        .enumerate()
        .map(|(i, block)| {
            let is_sel = i == state.home.selected_block;
            let line = Line::from(vec![
                Span::styled(if is_sel { "▸ " } else { "  " }, accent_style()),
                Span::styled(
                    format!("{}", block.mood),
                    if is_sel { selected_style() } else { normal_style() },
                ),
                Span::styled(format!("  ({})", block.tracks.len()), muted_style()),
            ]);
            if is_sel {
                ListItem::new(line).style(selected_style())
            } else {
                ListItem::new(line)
            }
        })
        .collect();

    let list = List::new(items).block(make_block(" 🌙 Moods ", !state.home.in_tracks));
    f.render_widget(list, area);
}

fn render_block_tracks(f: &mut Frame, area: Rect, state: &AppState, store: &MusicStore) {
    let Some(block) = store.mood_blocks().get(state.home.selected_block) else {
        return;
    };

    if block.tracks.is_empty() {
        let para = Paragraph::new(Line::from(Span::styled(
            "  Nothing matched this mood right now.",
            muted_style(),
        )))
        .block(make_block(&format!(" {} ", block.title), false));
        f.render_widget(para, area);
        return;
    }

    let items: Vec<ListItem> = block
        .tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let is_sel = state.home.in_tracks && i == state.home.selected_track;
            let heart = if track.liked { "❤ " } else { "  " };
            let line = Line::from(vec![
                Span::styled(if is_sel { "▶ " } else { "  " }, playing_style()),
                Span::styled(heart, gold_style()),
                Span::styled(
                    track.title.clone(),
                    if is_sel { selected_style() } else { normal_style() },
                ),
                Span::styled(" — ", muted_style()),
                Span::styled(track.artist.clone(), dim_style()),
                Span::styled(format!("  {}", track.duration_formatted()), muted_style()),
            ]);
            if is_sel {
                ListItem::new(line).style(selected_style())
            } else {
                ListItem::new(line)
            }
        })
        .collect();

    let list = List::new(items).block(make_block(
        &format!(" {} ({}) ", block.title, block.tracks.len()),
        state.home.in_tracks,
    ));
    f.render_widget(list, area);
}

fn make_block(title: &str, focused: bool) -> Block<'static> {
    Block::default()
        .title(Span::styled(title.to_string(), title_style()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style(focused))
        .style(normal_style().bg(BG))
}
