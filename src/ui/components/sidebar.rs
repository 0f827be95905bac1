use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::state::{ActiveScreen, AppState};
use crate::store::MusicStore;

use super::super::theme::*;

pub fn render_sidebar(f: &mut Frame, area: Rect, state: &AppState, store: &MusicStore) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // logo
            Constraint::Length(7), // nav
            Constraint::Min(0),    // mood banner
        ])
        .split(area);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled(" 🌙 ", gold_style()),
        Span::styled("luna", moon_style()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style(false))
            .style(normal_style().bg(SURFACE)),
    );
    f.render_widget(logo, chunks[0]);

    let nav_items: [(&str, &str, ActiveScreen); 4] = [
        ("1", "Home", ActiveScreen::Home),
        ("2", "Search", ActiveScreen::Search),
        ("3", "Favorites", ActiveScreen::Library),
        ("4", "Queue", ActiveScreen::Queue),
    ];
    let nav_lines: Vec<Line> = nav_items
        .into_iter()
        .map(|(key, label, screen)| {
            let active = state.active_screen == screen;
            let marker = if active { "▸ " } else { "  " };
            Line::from(vec![
                Span::styled(marker, accent_style()),
                Span::styled(format!("[{key}] "), muted_style()),
                Span::styled(
                    label,
                    if active { selected_style() } else { dim_style() },
                ),
            ])
        })
        .collect();

    let nav = Paragraph::new(nav_lines).block(
        Block::default()
            .title(Span::styled(" Navigate ", title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style(false))
            .style(normal_style().bg(BG)),
    );
    f.render_widget(nav, chunks[1]);

    // Mood banner: why luna is suggesting what it suggests.
    let banner = &state.banner;
    let mut lines = vec![
        Line::from(Span::raw("")),
        Line::from(Span::styled(format!("  {}", banner.mood), moon_style())),
        Line::from(Span::raw("")),
    ];
    if !banner.summary.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", banner.summary),
            dim_style(),
        )));
    }
    if !banner.city.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {} · {}", banner.city, banner.time_label),
            muted_style(),
        )));
    } else if !banner.time_label.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", banner.time_label),
            muted_style(),
        )));
    }
    lines.push(Line::from(Span::raw("")));
    lines.push(Line::from(Span::styled(
        format!("  ❤ {} favorites", store.favorites().len()),
        gold_style(),
    )));
    lines.push(Line::from(Span::raw("")));
    lines.push(Line::from(Span::styled("  [?] help", muted_style())));

    let mood = Paragraph::new(lines).block(
        Block::default()
            .title(Span::styled(" Tonight's mood ", title_style()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style(false))
            .style(normal_style().bg(BG)),
    );
    f.render_widget(mood, chunks[2]);
}
