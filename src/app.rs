use crate::engine::{BracketLayoutEngine, ResizeOutcome, ViewMode};
use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, Selection};
use crate::state::scores::LiveScores;
use chrono::{DateTime, Utc};
use courtside_api::{Bracket, MatchId, ScoreRecord};
use log::{debug, info};
use std::time::Instant;

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings, terminal_size: (u16, u16)) -> Self {
        let app = Self { state: AppState::new(terminal_size), settings };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    pub fn viewport_px(&self) -> u32 {
        self.settings.viewport_px(self.state.terminal_size.0)
    }

    pub fn view_mode(&self) -> Option<ViewMode> {
        self.state.engine.as_ref().map(BracketLayoutEngine::mode)
    }

    // -----------------------------------------------------------------------
    // Network response handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_bracket_loaded(&mut self, bracket: Bracket) {
        let engine = BracketLayoutEngine::new(&bracket, self.viewport_px());
        info!("bracket laid out in {} mode", engine.mode().label());
        self.state.scores = LiveScores::for_bracket(&bracket);
        self.state.engine = Some(engine);
        self.state.bracket = Some(bracket);
        self.state.selection = None;
        self.state.hit_boxes.clear();
    }

    /// Returns the number of matches that changed.
    pub fn on_scores_fetched(
        &mut self,
        records: Vec<ScoreRecord>,
        now: Instant,
        fetched_at: DateTime<Utc>,
    ) -> usize {
        let changed = self.state.scores.apply(records, now);
        self.state.scores.mark_updated(fetched_at);
        if !changed.is_empty() {
            debug!("scores changed for {} matches", changed.len());
        }
        changed.len()
    }

    // -----------------------------------------------------------------------
    // Viewport
    // -----------------------------------------------------------------------

    /// Record the new terminal size. `None` when no bracket is laid out yet.
    pub fn on_resize(&mut self, columns: u16, rows: u16) -> Option<ResizeOutcome> {
        self.state.terminal_size = (columns, rows);
        let width = self.viewport_px();
        let engine = self.state.engine.as_mut()?;
        let outcome = engine.on_resize(width);
        if outcome == ResizeOutcome::Reinitialized {
            info!("view mode switched to {}", engine.mode().label());
            self.state.selection = None;
            self.state.hit_boxes.clear();
        }
        Some(outcome)
    }

    pub fn relayout(&mut self) {
        if let Some(engine) = self.state.engine.as_mut() {
            engine.relayout();
        }
    }

    /// Expire finished pulses. True if the screen needs a redraw.
    pub fn on_tick(&mut self, now: Instant) -> bool {
        self.state.scores.expire_pulses(now)
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    pub fn next_round(&mut self) {
        match self.view_mode() {
            Some(ViewMode::Mobile) => self.step_tab(1),
            Some(ViewMode::Desktop) => self.step_round(1),
            None => {}
        }
    }

    pub fn prev_round(&mut self) {
        match self.view_mode() {
            Some(ViewMode::Mobile) => self.step_tab(-1),
            Some(ViewMode::Desktop) => self.step_round(-1),
            None => {}
        }
    }

    pub fn match_down(&mut self) {
        self.step_match(1);
    }

    pub fn match_up(&mut self) {
        self.step_match(-1);
    }

    /// Mobile only. `index` is zero-based.
    pub fn select_tab(&mut self, index: usize) {
        let Some(engine) = self.state.engine.as_mut() else {
            return;
        };
        if engine.select_tab(index) {
            self.state.selection = None;
        }
    }

    fn step_tab(&mut self, delta: isize) {
        let Some(active) = self.state.engine.as_ref().and_then(BracketLayoutEngine::active_tab) else {
            return;
        };
        if let Some(next) = active.checked_add_signed(delta) {
            self.select_tab(next);
        }
    }

    /// Moving right follows the winner into the match it feeds; moving left
    /// goes to the first feeder.
    fn step_round(&mut self, delta: isize) {
        let Some(engine) = self.state.engine.as_ref() else {
            return;
        };
        let rounds = engine.rounds();
        let current = self.state.selection.unwrap_or_default();
        let target = match self.state.selection {
            None => Some(Selection::default()),
            Some(_) => current.round.checked_add_signed(delta).map(|round| Selection {
                round,
                index: if delta > 0 { current.index / 2 } else { current.index * 2 },
            }),
        };
        let Some(mut target) = target else {
            return;
        };
        let Some(len) = rounds.get(target.round).map(|r| r.matches.len()) else {
            return;
        };
        if len == 0 {
            return;
        }
        target.index = target.index.min(len - 1);
        self.select(target);
    }

    fn step_match(&mut self, delta: isize) {
        let Some(engine) = self.state.engine.as_ref() else {
            return;
        };
        let round = match engine.mode() {
            ViewMode::Mobile => engine.active_tab().unwrap_or(0),
            ViewMode::Desktop => self.state.selection.map(|s| s.round).unwrap_or(0),
        };
        let len = engine.rounds().get(round).map(|r| r.matches.len()).unwrap_or(0);
        if len == 0 {
            return;
        }
        let index = match self.state.selection {
            Some(s) if s.round == round => s.index.saturating_add_signed(delta).min(len - 1),
            _ => 0,
        };
        self.select(Selection { round, index });
    }

    fn select(&mut self, selection: Selection) {
        self.state.selection = Some(selection);
        let Some(id) = self.state.selected_match().cloned() else {
            return;
        };
        if let Some(engine) = self.state.engine.as_mut() {
            engine.hover(&id);
        }
    }

    // -----------------------------------------------------------------------
    // Hover
    // -----------------------------------------------------------------------

    /// Hover whatever match box is under the pointer. Returns true when the
    /// hovered match changed.
    pub fn hover_at(&mut self, column: u16, row: u16) -> bool {
        let target: Option<MatchId> = self.state.hit_test(column, row).cloned();
        let Some(engine) = self.state.engine.as_mut() else {
            return false;
        };
        if engine.hovered() == target.as_ref() {
            return false;
        }
        match target {
            Some(id) => {
                engine.hover(&id);
                if let Some(found) = engine.desktop().and_then(|d| d.find(&id)) {
                    self.state.selection = Some(Selection { round: found.round, index: found.index });
                }
            }
            None => engine.leave(),
        }
        true
    }

    pub fn clear_hover(&mut self) {
        if let Some(engine) = self.state.engine.as_mut() {
            engine.leave();
        }
        if self.view_mode() == Some(ViewMode::Desktop) {
            self.state.selection = None;
        }
    }

    // -----------------------------------------------------------------------
    // Misc
    // -----------------------------------------------------------------------

    pub fn begin_manual_refresh(&mut self, now: Instant) {
        self.state.scores.begin_refresh(now);
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_state::HitBox;
    use courtside_api::{Match, Round, SetScore};
    use tui::layout::Rect;

    fn bracket() -> Bracket {
        let round = |label: &str, ids: &[&str]| Round {
            label: Some(label.to_string()),
            matches: ids
                .iter()
                .map(|id| Match { id: MatchId::from(*id), ..Match::default() })
                .collect(),
        };
        Bracket {
            tournament_id: Some("1".into()),
            name: "Open".into(),
            rounds: vec![
                round("Final", &["f"]),
                round("Quarterfinals", &["q1", "q2", "q3", "q4"]),
                round("Semifinals", &["s1", "s2"]),
            ],
        }
    }

    fn app(columns: u16) -> App {
        let mut app = App::new(AppSettings::default(), (columns, 40));
        app.on_bracket_loaded(bracket());
        app
    }

    #[test]
    fn bracket_load_picks_mode_from_terminal_width() {
        assert_eq!(app(160).view_mode(), Some(ViewMode::Desktop));
        assert_eq!(app(80).view_mode(), Some(ViewMode::Mobile));
    }

    #[test]
    fn keyboard_navigation_follows_the_bracket() {
        let mut app = app(160);
        app.next_round();
        assert_eq!(app.state.selection, Some(Selection { round: 0, index: 0 }));
        app.match_down();
        app.match_down();
        app.match_down();
        assert_eq!(app.state.selected_match(), Some(&MatchId::from("q4")));
        app.match_down();
        assert_eq!(app.state.selected_match(), Some(&MatchId::from("q4")), "clamped");

        app.next_round();
        assert_eq!(app.state.selected_match(), Some(&MatchId::from("s2")));
        let engine = app.state.engine.as_ref().unwrap();
        assert!(engine.highlight().contains_match(&MatchId::from("q3")));
        assert!(engine.highlight().contains_match(&MatchId::from("f")));

        app.prev_round();
        assert_eq!(app.state.selected_match(), Some(&MatchId::from("q3")));

        app.clear_hover();
        assert!(app.state.engine.as_ref().unwrap().highlight().is_empty());
        assert!(app.state.selection.is_none());
    }

    #[test]
    fn mobile_navigation_switches_tabs() {
        let mut app = app(80);
        app.next_round();
        app.next_round();
        assert_eq!(app.state.engine.as_ref().unwrap().active_tab(), Some(2));
        app.next_round();
        assert_eq!(app.state.engine.as_ref().unwrap().active_tab(), Some(2));
        app.select_tab(0);
        app.prev_round();
        assert_eq!(app.state.engine.as_ref().unwrap().active_tab(), Some(0));
        app.match_down();
        assert_eq!(app.state.selected_match(), Some(&MatchId::from("q1")));
        assert!(app.state.engine.as_ref().unwrap().highlight().is_empty());
    }

    #[test]
    fn pointer_hover_uses_hit_boxes() {
        let mut app = app(160);
        app.state.hit_boxes = vec![HitBox { area: Rect::new(0, 0, 20, 3), id: MatchId::from("q2") }];
        assert!(app.hover_at(5, 1));
        assert!(!app.hover_at(6, 1), "same match, no change");
        assert_eq!(app.state.selected_match(), Some(&MatchId::from("q2")));
        assert!(app.hover_at(50, 20));
        assert!(app.state.engine.as_ref().unwrap().hovered().is_none());
    }

    #[test]
    fn resize_across_breakpoint_reinitializes() {
        let mut app = app(160);
        app.next_round();
        assert_eq!(app.on_resize(150, 40), Some(ResizeOutcome::RelayoutPending));
        assert_eq!(app.on_resize(90, 40), Some(ResizeOutcome::Reinitialized));
        assert_eq!(app.view_mode(), Some(ViewMode::Mobile));
        assert!(app.state.selection.is_none());
    }

    #[test]
    fn resize_before_load_is_recorded() {
        let mut app = App::new(AppSettings::default(), (100, 30));
        assert_eq!(app.on_resize(70, 20), None);
        assert_eq!(app.state.terminal_size, (70, 20));
    }

    #[test]
    fn score_updates_patch_only_changed_matches() {
        let mut app = app(160);
        let now = Instant::now();
        let record = |id: &str, a, b| ScoreRecord {
            match_id: MatchId::from(id),
            scores: vec![SetScore::new(a, b)],
        };
        let fetched_at = Utc::now();
        assert_eq!(app.on_scores_fetched(vec![record("q1", 3, 5), record("zz", 1, 1)], now, fetched_at), 1);
        assert_eq!(app.on_scores_fetched(vec![record("q1", 3, 5)], now, fetched_at), 0);
        assert_eq!(app.state.scores.last_updated_text(fetched_at).as_deref(), Some("Just now"));
    }
}
