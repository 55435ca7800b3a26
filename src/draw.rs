use chrono::Utc;
use log::error;
use std::time::Instant;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::widgets::{Block, BorderType, Borders, Paragraph};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::App;
use crate::components::bracket::{CardSource, DesktopBracketView, MobileRoundView};
use crate::components::theme;
use crate::engine::LayoutModel;
use crate::state::app_state::HitBox;
use crate::ui::layout::LayoutAreas;

const DESKTOP_KEYS: &str = "Keys: h/l=round  j/k=match  Esc=clear  r=refresh  f=full  \"=logs  q=quit";
const MOBILE_KEYS: &str = "Keys: h/l or 1-9=tab  j/k=match  r=refresh  f=full  \"=logs  q=quit";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 5 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);
    let now = Instant::now();

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_header(f, layout.header, app, now);
        }

        let hits = draw_bracket(f, layout.main, app, now);
        app.state.hit_boxes = hits;

        if app.state.show_logs {
            draw_logs(f, layout.logs);
        }
    });

    if let Err(e) = result {
        error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_header(f: &mut Frame, header: [Rect; 2], app: &App, now: Instant) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let title = match (&app.state.bracket, app.view_mode()) {
        (Some(bracket), Some(mode)) if !bracket.name.is_empty() => {
            format!("{}  ({})", bracket.name, mode.label())
        }
        (Some(_), Some(mode)) => format!("courtside  ({})", mode.label()),
        _ => "courtside".to_string(),
    };
    f.render_widget(
        Paragraph::new(title)
            .style(style.add_modifier(Modifier::BOLD))
            .block(
                Block::default()
                    .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                    .border_type(border_type),
            ),
        header[0],
    );

    let scores = &app.state.scores;
    let mut status = scores
        .last_updated_text(Utc::now())
        .map(|text| format!("Last updated: {text}"))
        .unwrap_or_default();
    if scores.is_refreshing(now) {
        status = format!("↻ refreshing  {status}");
    }
    f.render_widget(
        Paragraph::new(format!("{status} "))
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                    .border_type(border_type),
            )
            .style(style),
        header[1],
    );
}

/// Draws the bracket and returns the screen areas of every visible match.
fn draw_bracket(f: &mut Frame, area: Rect, app: &App, now: Instant) -> Vec<HitBox> {
    let block = default_border(Color::White).title(" Bracket ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let (Some(bracket), Some(engine)) = (&app.state.bracket, &app.state.engine) else {
        let msg = if app.settings.bracket_path.is_some() {
            "Loading bracket..."
        } else {
            "No bracket snapshot. Set COURTSIDE_BRACKET_JSON to a snapshot file."
        };
        f.render_widget(
            Paragraph::new(msg)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            inner,
        );
        return Vec::new();
    };

    let [content, key_legend] =
        Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(inner);
    let cards = CardSource::new(bracket, &app.state.scores, now);

    let (hits, keys) = match engine.model() {
        LayoutModel::Desktop(layout) => {
            let view = DesktopBracketView {
                layout,
                highlight: engine.highlight(),
                selected: engine.hovered(),
                cards: &cards,
            };
            let hits = view.hit_boxes(content);
            f.render_widget(view, content);
            (hits, DESKTOP_KEYS)
        }
        LayoutModel::Mobile(layout) => {
            let selected = app
                .state
                .selection
                .filter(|s| s.round == layout.active_tab)
                .map(|s| s.index);
            f.render_widget(MobileRoundView { layout, selected, cards: &cards }, content);
            (Vec::new(), MOBILE_KEYS)
        }
    };

    if bracket.match_count() == 0 {
        f.render_widget(
            Paragraph::new("Bracket has no matches")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center),
            content,
        );
    }

    f.render_widget(
        Paragraph::new(keys).style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );
    hits
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(theme::CONNECTOR_HIGHLIGHT));
    f.render_widget(logs, area);
}
