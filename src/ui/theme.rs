use ratatui::style::{Color, Modifier, Style};

// ─── Lunar palette ───────────────────────────────────────────────────────────
pub const BG:          Color = Color::Rgb(10,  12,  24);
pub const SURFACE:     Color = Color::Rgb(20,  24,  44);
pub const SURFACE_SEL: Color = Color::Rgb(36,  42,  78);

pub const PRIMARY:     Color = Color::Rgb(138, 128, 245); // moonlit lavender
pub const ACCENT:      Color = Color::Rgb(125, 211, 252); // pale sky
pub const MOON:        Color = Color::Rgb(226, 232, 255); // moon silver
pub const PLAYING:     Color = Color::Rgb(52,  211, 153); // aurora green
pub const GOLD:        Color = Color::Rgb(250, 204, 21);  // liked

pub const TEXT:        Color = Color::Rgb(214, 218, 240);
pub const TEXT_DIM:    Color = Color::Rgb(130, 136, 168);
pub const TEXT_MUTED:  Color = Color::Rgb(76,  80,  110);

pub const BORDER:         Color = Color::Rgb(44,  48,  88);
pub const BORDER_FOCUSED: Color = PRIMARY;

pub const ERROR:       Color = Color::Rgb(251, 113, 133);

// ─── Styles ──────────────────────────────────────────────────────────────────
pub fn title_style() -> Style {
    Style::default().fg(PRIMARY).add_modifier(Modifier::BOLD)
}

pub fn accent_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn moon_style() -> Style {
    Style::default().fg(MOON).add_modifier(Modifier::BOLD)
}

pub fn selected_style() -> Style {
    Style::default()
        .bg(SURFACE_SEL)
        .fg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn normal_style() -> Style {
    Style::default().fg(TEXT)
}

pub fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn muted_style() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(BORDER_FOCUSED)
    } else {
        Style::default().fg(BORDER)
    }
}

pub fn playing_style() -> Style {
    Style::default().fg(PLAYING).add_modifier(Modifier::BOLD)
}

pub fn gold_style() -> Style {
    Style::default().fg(GOLD)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR).add_modifier(Modifier::BOLD)
}

pub fn header_style() -> Style {
    Style::default()
        .fg(BG)
        .bg(PRIMARY)
        .add_modifier(Modifier::BOLD)
}
