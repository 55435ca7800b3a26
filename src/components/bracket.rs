use courtside_api::{Bracket, Match, MatchId};
use std::collections::HashMap;
use std::time::Instant;
use tui::buffer::Buffer;
use tui::layout::Rect;
use tui::style::{Color, Modifier, Style};
use tui::symbols::Marker;
use tui::text::Line;
use tui::widgets::canvas::{Canvas, Line as CanvasLine};
use tui::widgets::{Tabs, Widget};

use crate::components::theme::{self, Tint};
use crate::engine::geometry::{BoxRect, CONTAINER_HEIGHT, DesktopLayout, MATCH_HEIGHT};
use crate::engine::graph::Highlight;
use crate::engine::mobile::MobileLayout;
use crate::state::app_state::HitBox;
use crate::state::scores::{LiveScores, MatchDisplay, ScoreCell};

// ---------------------------------------------------------------------------
// Layout constants
// ---------------------------------------------------------------------------

/// Rows per match card: player 1, status line, player 2.
pub const CARD_HEIGHT: u16 = 3;

/// Narrowest card that still fits a name and a couple of sets.
pub const MIN_CARD_WIDTH: u16 = 16;

/// Width of one set score cell, including its leading space.
const SCORE_CELL_WIDTH: usize = 3;

/// Rows taken by the round headings above the desktop columns.
const HEADER_ROWS: u16 = 1;

/// Samples per connector curve when rasterizing.
const CURVE_SEGMENTS: usize = 16;

// ---------------------------------------------------------------------------
// Card data
// ---------------------------------------------------------------------------

/// Everything a card needs besides geometry: names and metadata from the
/// bracket, live cells and pulse state from the score poller.
pub struct CardSource<'a> {
    matches: HashMap<&'a MatchId, &'a Match>,
    scores: &'a LiveScores,
    now: Instant,
}

struct Card<'a> {
    player1: Option<&'a str>,
    player2: Option<&'a str>,
    display: Option<&'a MatchDisplay>,
    status: String,
    pulsing: bool,
}

impl<'a> CardSource<'a> {
    pub fn new(bracket: &'a Bracket, scores: &'a LiveScores, now: Instant) -> Self {
        let matches = bracket
            .rounds
            .iter()
            .flat_map(|r| r.matches.iter())
            .map(|m| (&m.id, m))
            .collect();
        Self { matches, scores, now }
    }

    fn card(&self, id: &MatchId) -> Card<'a> {
        let m = self.matches.get(id).copied();
        let display = self.scores.display(id);
        Card {
            player1: m.and_then(|m| m.player1.as_deref()),
            player2: m.and_then(|m| m.player2.as_deref()),
            display,
            status: status_line(m, display),
            pulsing: self.scores.is_pulsing(id, self.now),
        }
    }
}

/// Status text, else the scheduled time, followed by the court.
fn status_line(m: Option<&Match>, display: Option<&MatchDisplay>) -> String {
    let first = display
        .and_then(|d| d.status.clone())
        .or_else(|| m.and_then(|m| m.scheduled_time).map(|t| t.format("%b %d %H:%M").to_string()));
    let court = m.and_then(|m| m.court.clone());
    match (first, court) {
        (Some(a), Some(b)) => format!("{a} · {b}"),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => String::new(),
    }
}

#[derive(Debug, Clone, Copy)]
struct CardLook {
    accent: Color,
    highlighted: bool,
    selected: bool,
}

// ---------------------------------------------------------------------------
// Projection: abstract layout units to terminal cells
// ---------------------------------------------------------------------------

/// Maps layout units onto a terminal area. Scales to fit when it can and
/// scrolls when cards would otherwise become unreadably small.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub area: Rect,
    pub x_scale: f64,
    pub y_scale: f64,
    pub x_offset: f64,
    pub y_offset: f64,
}

impl Projection {
    /// `area` is the body below the round headings. `focus` is kept in view.
    pub fn fit(layout: &DesktopLayout, area: Rect, focus: Option<&BoxRect>) -> Self {
        let column_width = layout.columns.first().map(|c| c.width).unwrap_or(1.0).max(1.0);
        let width = layout.width.max(1.0);
        let x_scale = (f64::from(area.width) / width).max(f64::from(MIN_CARD_WIDTH) / column_width);
        let y_scale = (f64::from(area.height) / CONTAINER_HEIGHT)
            .max(f64::from(CARD_HEIGHT) / MATCH_HEIGHT);

        let mut projection = Self { area, x_scale, y_scale, x_offset: 0.0, y_offset: 0.0 };
        if let Some(focus) = focus {
            projection.x_offset = scroll_to(
                focus.x,
                focus.x + focus.width,
                f64::from(area.width) / x_scale,
                width,
            );
            projection.y_offset = scroll_to(
                focus.center_y() - 2.0 / y_scale,
                focus.center_y() + 2.0 / y_scale,
                f64::from(area.height) / y_scale,
                CONTAINER_HEIGHT,
            );
        }
        projection
    }

    pub fn column(&self, x: f64) -> i32 {
        ((x - self.x_offset) * self.x_scale).round() as i32 + i32::from(self.area.x)
    }

    pub fn row(&self, y: f64) -> i32 {
        ((y - self.y_offset) * self.y_scale).round() as i32 + i32::from(self.area.y)
    }

    /// Unclipped card position as (x, y, width). Cards are always three rows
    /// tall, centered on the box's vertical center.
    fn card_origin(&self, rect: &BoxRect) -> (i32, i32, u16) {
        let left = self.column(rect.x);
        let right = self.column(rect.x + rect.width);
        let width = u16::try_from((right - left).max(1)).unwrap_or(u16::MAX);
        (left, self.row(rect.center_y()) - 1, width)
    }

    /// Visible part of a card, if any.
    pub fn card_area(&self, rect: &BoxRect) -> Option<Rect> {
        let (x, y, width) = self.card_origin(rect);
        clip(self.area, x, y, width, CARD_HEIGHT)
    }

    /// Visible viewport in layout units as ([x_min, x_max], [y_min, y_max]).
    fn visible_units(&self) -> ([f64; 2], [f64; 2]) {
        let w = f64::from(self.area.width) / self.x_scale;
        let h = f64::from(self.area.height) / self.y_scale;
        ([self.x_offset, self.x_offset + w], [self.y_offset, self.y_offset + h])
    }
}

/// Smallest offset change that puts `[lo, hi]` inside a `view`-sized window
/// over `0..total`.
fn scroll_to(lo: f64, hi: f64, view: f64, total: f64) -> f64 {
    let max_offset = (total - view).max(0.0);
    let offset = if hi > view { hi - view } else { 0.0 };
    let offset = if lo < offset { lo } else { offset };
    offset.clamp(0.0, max_offset)
}

fn clip(area: Rect, x: i32, y: i32, width: u16, height: u16) -> Option<Rect> {
    let x0 = x.max(i32::from(area.x));
    let y0 = y.max(i32::from(area.y));
    let x1 = (x + i32::from(width)).min(i32::from(area.right()));
    let y1 = (y + i32::from(height)).min(i32::from(area.bottom()));
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(Rect::new(x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16))
}

// ---------------------------------------------------------------------------
// DesktopBracketView widget
// ---------------------------------------------------------------------------

/// Side-by-side round columns with curved connectors between them.
pub struct DesktopBracketView<'a> {
    pub layout: &'a DesktopLayout,
    pub highlight: &'a Highlight,
    pub selected: Option<&'a MatchId>,
    pub cards: &'a CardSource<'a>,
}

impl<'a> DesktopBracketView<'a> {
    pub fn projection(&self, area: Rect) -> Projection {
        let body = Rect {
            y: area.y.saturating_add(HEADER_ROWS),
            height: area.height.saturating_sub(HEADER_ROWS),
            ..area
        };
        let focus = self.selected.and_then(|id| self.layout.find(id)).map(|m| &m.rect);
        Projection::fit(self.layout, body, focus)
    }

    /// Screen areas of every visible card, for pointer hit-testing.
    pub fn hit_boxes(&self, area: Rect) -> Vec<HitBox> {
        let projection = self.projection(area);
        self.layout
            .matches
            .iter()
            .filter_map(|m| {
                projection.card_area(&m.rect).map(|area| HitBox { area, id: m.id.clone() })
            })
            .collect()
    }
}

impl<'a> Widget for DesktopBracketView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < MIN_CARD_WIDTH || area.height < HEADER_ROWS + CARD_HEIGHT {
            return;
        }
        let projection = self.projection(area);

        // Pass 1: connectors underneath everything else.
        let ([x0, x1], [y0, y1]) = projection.visible_units();
        let connectors = &self.layout.connectors;
        let highlight = self.highlight;
        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([x0, x1])
            // Canvas y grows upwards; layout y grows downwards.
            .y_bounds([-y1, -y0])
            .paint(|ctx| {
                for lit in [false, true] {
                    if lit && highlight.is_empty() {
                        break;
                    }
                    for (index, connector) in connectors.iter().enumerate() {
                        if highlight.contains_connector(index) != lit {
                            continue;
                        }
                        let color = theme::connector_color(lit);
                        for pair in connector.sample(CURVE_SEGMENTS).windows(2) {
                            ctx.draw(&CanvasLine::new(pair[0].x, -pair[0].y, pair[1].x, -pair[1].y, color));
                        }
                    }
                    ctx.layer();
                }
            })
            .render(projection.area, buf);

        // Pass 2: round headings.
        for column in &self.layout.columns {
            let x = projection.column(column.x);
            let width = projection.column(column.x + column.width) - x;
            let label: String = column.label.chars().take(width.max(0) as usize).collect();
            let pad = (width - label.chars().count() as i32).max(0) / 2;
            let style = Style::default()
                .fg(theme::accent(column.index))
                .add_modifier(Modifier::BOLD);
            put_str(buf, area, x + pad, i32::from(area.y), &label, style);
        }

        // Pass 3: match cards.
        for m in &self.layout.matches {
            let (x, y, width) = projection.card_origin(&m.rect);
            let look = CardLook {
                accent: theme::border_color(m.accent, m.emphasis),
                highlighted: self.highlight.contains_match(&m.id),
                selected: self.selected == Some(&m.id),
            };
            draw_card(buf, projection.area, x, y, width, &self.cards.card(&m.id), look);
        }
    }
}

// ---------------------------------------------------------------------------
// MobileRoundView widget
// ---------------------------------------------------------------------------

/// One round at a time under a tab strip, with match numbers and
/// progression arrows instead of connectors.
pub struct MobileRoundView<'a> {
    pub layout: &'a MobileLayout,
    pub selected: Option<usize>,
    pub cards: &'a CardSource<'a>,
}

/// Card plus its number line and a blank spacer.
const MOBILE_ENTRY_HEIGHT: u16 = CARD_HEIGHT + 2;

impl<'a> Widget for MobileRoundView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < MIN_CARD_WIDTH || area.height < 2 + MOBILE_ENTRY_HEIGHT {
            return;
        }

        let titles: Vec<Line> = self.layout.tabs.iter().map(|t| Line::from(t.as_str())).collect();
        Tabs::new(titles)
            .select(self.layout.active_tab)
            .style(theme::resolve(Tint::Status))
            .highlight_style(theme::resolve(Tint::Highlight).add_modifier(Modifier::UNDERLINED))
            .render(Rect { height: 1, ..area }, buf);

        let body = Rect {
            y: area.y + 2,
            height: area.height - 2,
            ..area
        };
        let Some(round) = self.layout.visible_round() else {
            return;
        };

        let per_page = usize::from((body.height / MOBILE_ENTRY_HEIGHT).max(1));
        let first = self
            .selected
            .map(|s| (s + 1).saturating_sub(per_page))
            .unwrap_or(0);

        let accent = theme::accent(self.layout.active_tab);
        for (slot, m) in round.matches.iter().skip(first).take(per_page).enumerate() {
            let y = i32::from(body.y) + (slot as i32) * i32::from(MOBILE_ENTRY_HEIGHT);
            let selected = self.selected == Some(m.number - 1);

            let number_style = Style::default().fg(accent).add_modifier(Modifier::BOLD);
            put_str(buf, body, i32::from(body.x), y, &format!("Match {}", m.number), number_style);
            if let Some(next) = m.progression {
                let arrow = format!("{next}→");
                let x = i32::from(body.right()) - arrow.chars().count() as i32;
                put_str(buf, body, x, y, &arrow, theme::resolve(Tint::Dim));
            }

            let look = CardLook { accent, highlighted: false, selected };
            draw_card(buf, body, i32::from(body.x), y + 1, body.width, &self.cards.card(&m.id), look);
        }
    }
}

// ---------------------------------------------------------------------------
// Shared drawing helpers
// ---------------------------------------------------------------------------

/// Draw a 3-row card at (x, y), clipped to `clip`:
///
/// ```text
/// ▌A. Smith        6  3
/// ▌In progress · Court 3
/// ▌B. Jones        4  6
/// ```
fn draw_card(buf: &mut Buffer, clip: Rect, x: i32, y: i32, width: u16, card: &Card, look: CardLook) {
    let bar_style = if card.pulsing {
        theme::resolve(Tint::Pulse)
    } else if look.highlighted {
        Style::default().fg(theme::CONNECTOR_HIGHLIGHT)
    } else {
        Style::default().fg(look.accent)
    };
    let name_style = if look.highlighted || look.selected {
        theme::resolve(Tint::Highlight)
    } else {
        theme::resolve(Tint::Player)
    };
    let name_style = if look.selected {
        name_style.add_modifier(Modifier::REVERSED)
    } else {
        name_style
    };

    let inner = usize::from(width.saturating_sub(1));
    let empty = MatchDisplay::default();
    let display = card.display.unwrap_or(&empty);

    let rows: [(i32, Option<&str>, &[ScoreCell]); 2] =
        [(y, card.player1, &display.player1), (y + 2, card.player2, &display.player2)];

    for (row, name, cells) in rows {
        put_str(buf, clip, x, row, "▌", bar_style);
        let score_width = cells.len() * SCORE_CELL_WIDTH;
        let name_width = inner.saturating_sub(score_width + 1);
        let (text, style) = match name {
            Some(n) => (n, name_style),
            None => ("TBD", theme::resolve(Tint::Placeholder)),
        };
        let text: String = text.chars().take(name_width).collect();
        put_str(buf, clip, x + 1, row, &format!("{text:<name_width$}"), style);

        let mut cx = x + 1 + (inner.saturating_sub(score_width)) as i32;
        for cell in cells {
            let style = if cell.leading {
                theme::resolve(Tint::LeadingScore)
            } else {
                theme::resolve(Tint::Score)
            };
            put_str(buf, clip, cx, row, &format!("{:>3}", cell.value), style);
            cx += SCORE_CELL_WIDTH as i32;
        }
    }

    put_str(buf, clip, x, y + 1, "▌", bar_style);
    let status: String = card.status.chars().take(inner).collect();
    let status_style = if card.pulsing { theme::resolve(Tint::Pulse) } else { theme::resolve(Tint::Status) };
    put_str(buf, clip, x + 1, y + 1, &status, status_style);
}

/// Char-by-char write that tolerates negative and off-screen coordinates.
fn put_str(buf: &mut Buffer, clip: Rect, x: i32, y: i32, text: &str, style: Style) {
    if y < i32::from(clip.y) || y >= i32::from(clip.bottom()) {
        return;
    }
    for (i, ch) in text.chars().enumerate() {
        let cx = x + i as i32;
        if cx < i32::from(clip.x) {
            continue;
        }
        if cx >= i32::from(clip.right()) {
            break;
        }
        put_char(buf, cx as u16, y as u16, ch, style);
    }
}

fn put_char(buf: &mut Buffer, x: u16, y: u16, ch: char, style: Style) {
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_char(ch);
        cell.set_style(style);
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{BracketLayoutEngine, RoundInput};
    use courtside_api::{Round, ScoreRecord, SetScore};

    fn bracket() -> Bracket {
        let m = |id: &str, p1: Option<&str>, p2: Option<&str>| Match {
            id: MatchId::from(id),
            player1: p1.map(str::to_string),
            player2: p2.map(str::to_string),
            court: Some("Court 2".into()),
            ..Match::default()
        };
        Bracket {
            tournament_id: Some("9".into()),
            name: "Club Open".into(),
            rounds: vec![
                Round {
                    label: Some("Semifinals".into()),
                    matches: vec![
                        m("s1", Some("Avery"), Some("Blake")),
                        m("s2", Some("Casey"), Some("Devon")),
                    ],
                },
                Round { label: Some("Final".into()), matches: vec![m("f", None, None)] },
            ],
        }
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right())
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    fn screen(buf: &Buffer) -> String {
        (buf.area.y..buf.area.bottom()).map(|y| row_text(buf, y) + "\n").collect()
    }

    #[test]
    fn scroll_to_keeps_range_visible() {
        assert_eq!(scroll_to(10.0, 20.0, 100.0, 500.0), 0.0);
        assert_eq!(scroll_to(150.0, 180.0, 100.0, 500.0), 80.0);
        assert_eq!(scroll_to(450.0, 520.0, 100.0, 500.0), 400.0);
    }

    #[test]
    fn clip_trims_to_area() {
        let area = Rect::new(2, 2, 10, 5);
        assert_eq!(clip(area, 0, 1, 6, 3), Some(Rect::new(2, 2, 4, 2)));
        assert_eq!(clip(area, 20, 3, 4, 3), None);
        assert_eq!(clip(area, -10, 3, 4, 3), None);
    }

    #[test]
    fn projection_fits_wide_areas_and_scrolls_narrow_ones() {
        let engine = BracketLayoutEngine::new(&bracket(), 1200);
        let layout = engine.desktop().unwrap();
        let wide = Projection::fit(layout, Rect::new(0, 0, 150, 40), None);
        assert_eq!(wide.column(layout.width), 150);
        assert_eq!(wide.row(CONTAINER_HEIGHT), 40);

        let narrow_layout = crate::engine::geometry::desktop_layout(
            &(0..6)
                .map(|r| RoundInput { label: None, matches: vec![MatchId::new(format!("m{r}"))] })
                .collect::<Vec<_>>(),
            600.0,
        );
        let last = &narrow_layout.matches[5].rect;
        let narrow = Projection::fit(&narrow_layout, Rect::new(0, 0, 40, 20), Some(last));
        assert!(narrow.x_offset > 0.0, "scrolled right to the focused column");
        let area = narrow.card_area(last).unwrap();
        assert!(area.width >= MIN_CARD_WIDTH - 1);
    }

    #[test]
    fn desktop_view_draws_headings_cards_and_scores() {
        let bracket = bracket();
        let engine = BracketLayoutEngine::new(&bracket, 1200);
        let mut scores = LiveScores::for_bracket(&bracket);
        let now = Instant::now();
        scores.apply(
            vec![ScoreRecord { match_id: MatchId::from("s1"), scores: vec![SetScore::new(6, 4)] }],
            now,
        );
        let cards = CardSource::new(&bracket, &scores, now);
        let highlight = Highlight::default();
        let view = DesktopBracketView {
            layout: engine.desktop().unwrap(),
            highlight: &highlight,
            selected: None,
            cards: &cards,
        };

        let area = Rect::new(0, 0, 100, 30);
        let hits = view.hit_boxes(area);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf);
        let text = screen(&buf);

        assert!(text.contains("Semifinals"));
        assert!(text.contains("Final"));
        assert!(text.contains("Avery"));
        assert!(text.contains("Devon"));
        assert!(text.contains("TBD"), "missing players render as TBD");
        assert!(text.contains("In progress · Court 2"));
        assert_eq!(hits.len(), 3);

        let s1 = hits.iter().find(|h| h.id == MatchId::from("s1")).unwrap();
        let first_row: String = (s1.area.x..s1.area.right())
            .filter_map(|x| buf.cell((x, s1.area.y)).map(|c| c.symbol().to_string()))
            .collect();
        assert!(first_row.contains("Avery"));
        assert!(first_row.trim_end().ends_with('6'), "score sits at the card's right edge");
    }

    #[test]
    fn pulsing_card_keeps_the_leading_side_visible() {
        let bracket = bracket();
        let engine = BracketLayoutEngine::new(&bracket, 1200);
        let mut scores = LiveScores::for_bracket(&bracket);
        let now = Instant::now();
        scores.apply(
            vec![ScoreRecord { match_id: MatchId::from("s1"), scores: vec![SetScore::new(6, 4)] }],
            now,
        );
        let cards = CardSource::new(&bracket, &scores, now);
        let highlight = Highlight::default();
        let view = DesktopBracketView {
            layout: engine.desktop().unwrap(),
            highlight: &highlight,
            selected: None,
            cards: &cards,
        };

        let area = Rect::new(0, 0, 100, 30);
        let hits = view.hit_boxes(area);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf);

        let s1 = hits.iter().find(|h| h.id == MatchId::from("s1")).unwrap();
        let last_digit = |y: u16| {
            (s1.area.x..s1.area.right())
                .rev()
                .filter_map(|x| buf.cell((x, y)))
                .find(|c| !c.symbol().is_empty() && c.symbol().chars().all(|ch| ch.is_ascii_digit()))
                .cloned()
                .unwrap()
        };
        let leading = last_digit(s1.area.y);
        let trailing = last_digit(s1.area.y + 2);
        assert_eq!(leading.symbol(), "6");
        assert_eq!(trailing.symbol(), "4");
        assert_eq!(leading.fg, Color::Green);
        assert_ne!(leading.fg, trailing.fg, "leading side stays highlighted while pulsing");

        let bar = buf.cell((s1.area.x, s1.area.y)).unwrap();
        assert_eq!(bar.symbol(), "▌");
        assert_eq!(bar.fg, Color::Yellow, "pulse shows on the accent bar");
    }

    #[test]
    fn desktop_view_draws_connectors_between_columns() {
        let bracket = bracket();
        let engine = BracketLayoutEngine::new(&bracket, 1200);
        let scores = LiveScores::for_bracket(&bracket);
        let cards = CardSource::new(&bracket, &scores, Instant::now());
        let highlight = Highlight::default();
        let view = DesktopBracketView {
            layout: engine.desktop().unwrap(),
            highlight: &highlight,
            selected: None,
            cards: &cards,
        };
        let area = Rect::new(0, 0, 100, 30);
        let projection = view.projection(area);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf);

        let gap_column = projection.column(engine.desktop().unwrap().columns[1].x) - 1;
        let painted = (area.y..area.bottom()).any(|y| {
            buf.cell((gap_column as u16, y))
                .is_some_and(|c| c.symbol() != " " && c.fg == theme::CONNECTOR)
        });
        assert!(painted, "expected connector cells in the column gap");
    }

    #[test]
    fn mobile_view_shows_tabs_numbers_and_progression() {
        let bracket = bracket();
        let engine = BracketLayoutEngine::new(&bracket, 400);
        let scores = LiveScores::for_bracket(&bracket);
        let cards = CardSource::new(&bracket, &scores, Instant::now());
        let view = MobileRoundView { layout: engine.mobile().unwrap(), selected: None, cards: &cards };

        let area = Rect::new(0, 0, 40, 20);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf);
        let text = screen(&buf);

        assert!(row_text(&buf, 0).contains("Semifinals"));
        assert!(row_text(&buf, 0).contains("Final"));
        assert!(text.contains("Match 1"));
        assert!(text.contains("Match 2"));
        assert!(text.contains("2→"), "second source match advances");
        assert!(text.contains("Casey"));
    }

    #[test]
    fn mobile_final_round_has_no_arrow() {
        let bracket = bracket();
        let mut engine = BracketLayoutEngine::new(&bracket, 400);
        engine.select_tab(1);
        let scores = LiveScores::for_bracket(&bracket);
        let cards = CardSource::new(&bracket, &scores, Instant::now());
        let view = MobileRoundView { layout: engine.mobile().unwrap(), selected: None, cards: &cards };

        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        view.render(area, &mut buf);
        let text = screen(&buf);
        assert!(text.contains("Match 1"));
        assert!(!text.contains('→'));
    }

    #[test]
    fn status_falls_back_to_schedule() {
        let when = chrono::DateTime::parse_from_rfc3339("2026-04-02T15:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        let m = Match { scheduled_time: Some(when), court: Some("Court 1".into()), ..Match::default() };
        assert_eq!(status_line(Some(&m), None), "Apr 02 15:00 · Court 1");
        assert_eq!(status_line(None, None), "");
    }
}
