pub mod components;
pub mod theme;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use unicode_width::UnicodeWidthStr;

use crate::app::state::{ActiveScreen, AppState};
use crate::store::MusicStore;

use self::components::{
    help::render_help,
    home::render_home,
    library::render_library,
    player_bar::render_player_bar,
    queue::render_queue,
    search::render_search,
    sidebar::render_sidebar,
};
use self::theme::*;

/// Root render function — called every frame.
pub fn render(f: &mut Frame, state: &AppState, store: &MusicStore) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // top: sidebar + main
            Constraint::Length(6), // bottom: player bar
        ])
        .split(size);

    let top_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(26), // sidebar
            Constraint::Min(0),     // main content
        ])
        .split(main_chunks[0]);

    render_sidebar(f, top_chunks[0], state, store);

    match &state.active_screen {
        ActiveScreen::Home => render_home(f, top_chunks[1], state, store),
        ActiveScreen::Search => render_search(f, top_chunks[1], state, store),
        ActiveScreen::Library => render_library(f, top_chunks[1], state, store),
        ActiveScreen::Queue => render_queue(f, top_chunks[1], state, store),
    }

    render_player_bar(f, main_chunks[1], state, store);

    if state.show_help {
        render_help(f, size);
    }

    if let Some(ref notif) = state.notification {
        render_notification(f, size, notif.is_error, &notif.message);
    }
}

// Sized by display columns, not bytes: multibyte messages would
// otherwise get an oversized toast.
fn toast_width(message: &str) -> u16 {
    message.width().min(60) as u16 + 4
}

fn render_notification(f: &mut Frame, area: Rect, is_error: bool, message: &str) {
    let toast_width = toast_width(message);
    let toast_area = Rect {
        x: area.width.saturating_sub(toast_width + 2),
        y: area.height.saturating_sub(9),
        width: toast_width,
        height: 3,
    };

    f.render_widget(Clear, toast_area);

    let style = if is_error { error_style() } else { playing_style() };
    let icon = if is_error { "✖ " } else { "✔ " };

    let para = Paragraph::new(Line::from(vec![
        Span::styled(icon, style),
        Span::styled(message.to_string(), style),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(style),
    )
    .alignment(Alignment::Left);

    f.render_widget(para, toast_area);
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}

#[cfg(test)]
mod tests {
    use super::toast_width;

    #[test]
    fn toast_width_counts_columns_not_bytes() {
        // Same column count, very different byte lengths.
        let ascii = "Added to favorites: Song";
        let accented = "Added to favorites: Sóng";
        assert_eq!(toast_width(ascii), toast_width(accented));

        let hearted = "❤ Added to favorites: Song";
        let byte_sized = hearted.len().min(60) as u16 + 4;
        assert!(
            toast_width(hearted) < byte_sized,
            "multibyte message must not be sized by its byte length"
        );
    }

    #[test]
    fn toast_width_caps_long_messages() {
        let long = "x".repeat(200);
        assert_eq!(toast_width(&long), 64);
    }
}
