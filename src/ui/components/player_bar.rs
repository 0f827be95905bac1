use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph},
    Frame,
};

use crate::app::state::AppState;
use crate::store::MusicStore;

use super::super::theme::*;

pub fn render_player_bar(f: &mut Frame, area: Rect, state: &AppState, store: &MusicStore) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style(store.is_playing()))
        .style(normal_style().bg(SURFACE));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(track) = store.current() else {
        let para = Paragraph::new(Line::from(Span::styled(
            "  Nothing playing — pick a mood and press Enter.",
            muted_style(),
        )));
        f.render_widget(para, inner);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // title line
            Constraint::Length(1), // pulse
            Constraint::Length(1), // progress
            Constraint::Min(0),
        ])
        .split(inner);

    // ── Title line ───────────────────────────────────────────────────────
    let status = if store.is_playing() { "▶" } else { "⏸" };
    let heart = if track.liked { " ❤" } else { "" };
    let max_title = (chunks[0].width as usize).saturating_sub(30).max(10);
    let title = state.marquee_title(&track.title, max_title);
    let via = if track.video_id.is_some() { "  ·  ▷ video" } else { "" };
    let line = Line::from(vec![
        Span::styled(format!(" {status} "), playing_style()),
        Span::styled(title, moon_style()),
        Span::styled(heart, gold_style()),
        Span::styled(" — ", muted_style()),
        Span::styled(track.artist.clone(), dim_style()),
        Span::styled(via, muted_style()),
    ]);
    f.render_widget(Paragraph::new(line), chunks[0]);

    // ── Pulse bars ───────────────────────────────────────────────────────
    let glyphs = [" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];
    let pulse: String = state
        .pulse
        .iter()
        .map(|&b| glyphs[(b as usize).min(8)])
        .collect();
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(format!(" {pulse}"), accent_style()))),
        chunks[1],
    );

    // ── Progress ─────────────────────────────────────────────────────────
    let progress = store.progress_secs();
    let ratio = if track.duration_secs > 0 {
        (progress as f64 / track.duration_secs as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let label = format!(
        "{}:{:02} / {}",
        progress / 60,
        progress % 60,
        track.duration_formatted()
    );
    let gauge = Gauge::default()
        .gauge_style(accent_style().bg(SURFACE_SEL))
        .ratio(ratio)
        .label(Span::styled(label, normal_style()));
    f.render_widget(gauge, chunks[2]);
}
