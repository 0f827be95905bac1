use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use super::super::{centered_rect, theme::*};

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 70, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .title(Span::styled(" 🌙 luna — keys ", title_style()))
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(border_style(true))
        .style(normal_style().bg(SURFACE));
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let keys: [(&str, &str); 16] = [
        ("1-4", "switch screen (home / search / favorites / queue)"),
        ("s", "open search input"),
        ("Enter", "play selection / enter mood block"),
        ("↑↓ j k", "move selection"),
        ("←→ h", "leave / enter mood tracks"),
        ("Space", "play / pause"),
        ("n", "next track"),
        ("p", "previous track"),
        ("l", "like / unlike"),
        ("f", "seek forward 10s"),
        ("r", "seek back 10s"),
        ("m", "refresh mood blocks"),
        ("Esc b", "back"),
        ("?", "toggle this help"),
        ("q", "quit"),
        ("", ""),
    ];

    let lines: Vec<Line> = keys
        .into_iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!("  {key:>8}  "), accent_style()),
                Span::styled(what, dim_style()),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}
