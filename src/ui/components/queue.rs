use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::state::AppState;
use crate::store::MusicStore;

use super::super::theme::*;

pub fn render_queue(f: &mut Frame, area: Rect, state: &AppState, store: &MusicStore) {
    let queue = store.queue();

    if queue.is_empty() {
        let para = Paragraph::new(Line::from(Span::styled(
            "  The queue is empty. Play something from Home or Search.",
            muted_style(),
        )))
        .block(make_block(" 󰐑 Up next ", false));
        f.render_widget(para, area);
        return;
    }

    let playing_at = store.position();
    let items: Vec<ListItem> = queue
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let is_sel = i == state.queue.selected;
            let is_now = i == playing_at;
            let marker = if is_now { "♪ " } else { "  " };
            let heart = if track.liked { "❤ " } else { "  " };
            let title_style = if is_now {
                playing_style()
            } else if is_sel {
                selected_style()
            } else {
                normal_style()
            };
            let line = Line::from(vec![
                Span::styled(marker, playing_style()),
                Span::styled(format!("{:>3}. ", i + 1), muted_style()),
                Span::styled(heart, gold_style()),
                Span::styled(track.title.clone(), title_style),
                Span::styled(" — ", muted_style()),
                Span::styled(track.artist.clone(), dim_style()),
            ]);
            if is_sel {
                ListItem::new(line).style(selected_style())
            } else {
                ListItem::new(line)
            }
        })
        .collect();

    let list = List::new(items).block(make_block(
        &format!(" 󰐑 Up next ({} of {}) ", playing_at + 1, queue.len()),
        true,
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
