use crate::engine::geometry::{ACCENT_COUNT, Emphasis};
use tui::style::{Color, Modifier, Style};

/// Round accents, earliest round first: blue, indigo, purple, pink, amber, orange.
pub const ROUND_ACCENTS: [Color; ACCENT_COUNT] = [
    Color::Rgb(0x44, 0x75, 0xC2),
    Color::Rgb(0x63, 0x66, 0xF1),
    Color::Rgb(0x8B, 0x5C, 0xF6),
    Color::Rgb(0xEC, 0x48, 0x99),
    Color::Rgb(0xF5, 0x9E, 0x0B),
    Color::Rgb(0xF9, 0x73, 0x16),
];

pub const CONNECTOR: Color = Color::Rgb(0x94, 0xA3, 0xB8);
pub const CONNECTOR_HIGHLIGHT: Color = Color::Rgb(0x44, 0x75, 0xC2);
pub const GOLD: Color = Color::Rgb(0xFF, 0xD7, 0x00);
pub const THIRD_PLACE: Color = Color::Rgb(0xF9, 0x73, 0x16);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tint {
    Player,
    Placeholder,
    Status,
    Score,
    LeadingScore,
    Pulse,
    Highlight,
    Dim,
}

pub fn accent(index: usize) -> Color {
    ROUND_ACCENTS[index.min(ACCENT_COUNT - 1)]
}

/// Border color for a match box. Emphasis wins over the round accent.
pub fn border_color(accent_index: usize, emphasis: Emphasis) -> Color {
    match emphasis {
        Emphasis::Final => GOLD,
        Emphasis::ThirdPlace => THIRD_PLACE,
        Emphasis::Standard => accent(accent_index),
    }
}

pub fn connector_color(highlighted: bool) -> Color {
    if highlighted { CONNECTOR_HIGHLIGHT } else { CONNECTOR }
}

pub fn resolve(tint: Tint) -> Style {
    match tint {
        Tint::Player => Style::default().fg(Color::White),
        Tint::Placeholder | Tint::Dim => Style::default().fg(Color::Indexed(240)),
        Tint::Status => Style::default().fg(Color::Gray),
        Tint::Score => Style::default().fg(Color::Gray),
        Tint::LeadingScore => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        Tint::Pulse => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        Tint::Highlight => Style::default()
            .fg(CONNECTOR_HIGHLIGHT)
            .add_modifier(Modifier::BOLD),
    }
}
