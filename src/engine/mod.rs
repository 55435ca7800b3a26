//! Bracket layout engine.
//!
//! Turns ordered rounds of match ids into an abstract [`LayoutModel`]:
//! positioned match boxes plus connector curves on desktop, a tabbed stack
//! of rounds on mobile. Renderers consume the model; nothing here touches
//! the terminal.

pub mod geometry;
pub mod graph;
pub mod mobile;
pub mod order;

use courtside_api::{Bracket, MatchId};
use serde::Serialize;
use std::collections::HashMap;

use geometry::DesktopLayout;
use graph::{ConnectorGraph, Highlight};
use mobile::MobileLayout;

/// Viewports narrower than this use the stacked mobile presentation.
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

#[derive(Debug, Clone)]
pub struct RoundInput {
    pub label: Option<String>,
    pub matches: Vec<MatchId>,
}

impl RoundInput {
    /// Rounds in snapshot order.
    pub fn from_bracket(bracket: &Bracket) -> Vec<Self> {
        bracket
            .rounds
            .iter()
            .map(|r| RoundInput {
                label: r.label.clone(),
                matches: r.matches.iter().map(|m| m.id.clone()).collect(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Desktop,
    Mobile,
}

impl ViewMode {
    pub fn for_width(width_px: u32) -> Self {
        if width_px < MOBILE_BREAKPOINT_PX {
            ViewMode::Mobile
        } else {
            ViewMode::Desktop
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Desktop => "desktop",
            ViewMode::Mobile => "mobile",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LayoutModel {
    Desktop(DesktopLayout),
    Mobile(MobileLayout),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// The view mode flipped and the layout was rebuilt from scratch.
    Reinitialized,
    /// Same mode; call [`BracketLayoutEngine::relayout`] once resizing settles.
    RelayoutPending,
}

pub struct BracketLayoutEngine {
    rounds: Vec<RoundInput>,
    source_order: HashMap<MatchId, usize>,
    viewport_width: u32,
    mode: ViewMode,
    model: LayoutModel,
    graph: ConnectorGraph,
    hovered: Option<MatchId>,
    highlight: Highlight,
}

impl BracketLayoutEngine {
    pub fn new(bracket: &Bracket, viewport_width: u32) -> Self {
        Self::from_rounds(RoundInput::from_bracket(bracket), viewport_width)
    }

    /// `rounds` in source order; canonical round ordering happens here, once.
    pub fn from_rounds(rounds: Vec<RoundInput>, viewport_width: u32) -> Self {
        let source_order = rounds
            .iter()
            .flat_map(|r| r.matches.iter())
            .enumerate()
            .map(|(pos, id)| (id.clone(), pos))
            .collect();
        let rounds = order::order_rounds(rounds);
        let mode = ViewMode::for_width(viewport_width);
        let model = build_model(&rounds, &source_order, mode, viewport_width);
        let graph = connector_graph(&model);

        Self {
            rounds,
            source_order,
            viewport_width,
            mode,
            model,
            graph,
            hovered: None,
            highlight: Highlight::default(),
        }
    }

    pub fn rounds(&self) -> &[RoundInput] {
        &self.rounds
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn model(&self) -> &LayoutModel {
        &self.model
    }

    pub fn desktop(&self) -> Option<&DesktopLayout> {
        match &self.model {
            LayoutModel::Desktop(d) => Some(d),
            LayoutModel::Mobile(_) => None,
        }
    }

    pub fn mobile(&self) -> Option<&MobileLayout> {
        match &self.model {
            LayoutModel::Mobile(m) => Some(m),
            LayoutModel::Desktop(_) => None,
        }
    }

    pub fn hovered(&self) -> Option<&MatchId> {
        self.hovered.as_ref()
    }

    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    /// Record a new viewport width. A mode flip discards every computed
    /// piece of layout and rebuilds immediately; otherwise the caller
    /// debounces and then calls [`relayout`](Self::relayout).
    pub fn on_resize(&mut self, width_px: u32) -> ResizeOutcome {
        self.viewport_width = width_px;
        let mode = ViewMode::for_width(width_px);
        if mode != self.mode {
            self.mode = mode;
            self.reinitialize();
            ResizeOutcome::Reinitialized
        } else {
            ResizeOutcome::RelayoutPending
        }
    }

    /// Recompute positions and connectors for the current width. Mobile
    /// layouts do not depend on width, so they keep their active tab.
    pub fn relayout(&mut self) {
        if self.mode == ViewMode::Mobile {
            return;
        }
        self.model = build_model(&self.rounds, &self.source_order, self.mode, self.viewport_width);
        self.graph = connector_graph(&self.model);
        self.refresh_highlight();
    }

    fn reinitialize(&mut self) {
        self.hovered = None;
        self.highlight = Highlight::default();
        self.model = build_model(&self.rounds, &self.source_order, self.mode, self.viewport_width);
        self.graph = connector_graph(&self.model);
    }

    /// Highlight `id` and its whole path. Ignored on mobile and for ids with
    /// no box in the current layout.
    pub fn hover(&mut self, id: &MatchId) {
        if self.hovered.as_ref() == Some(id) {
            return;
        }
        self.leave();
        let Some(desktop) = self.desktop() else {
            return;
        };
        if desktop.find(id).is_none() {
            return;
        }
        self.hovered = Some(id.clone());
        self.refresh_highlight();
    }

    pub fn leave(&mut self) {
        self.hovered = None;
        self.highlight = Highlight::default();
    }

    fn refresh_highlight(&mut self) {
        let lit = self
            .hovered
            .as_ref()
            .filter(|id| self.desktop().is_some_and(|d| d.find(id).is_some()))
            .map(|id| self.graph.path_through(id));
        match lit {
            Some(highlight) => self.highlight = highlight,
            None => self.leave(),
        }
    }

    pub fn active_tab(&self) -> Option<usize> {
        self.mobile().map(|m| m.active_tab)
    }

    pub fn select_tab(&mut self, index: usize) -> bool {
        match &mut self.model {
            LayoutModel::Mobile(m) => m.select_tab(index),
            LayoutModel::Desktop(_) => false,
        }
    }
}

fn build_model(
    rounds: &[RoundInput],
    source_order: &HashMap<MatchId, usize>,
    mode: ViewMode,
    viewport_width: u32,
) -> LayoutModel {
    match mode {
        ViewMode::Desktop => {
            LayoutModel::Desktop(geometry::desktop_layout(rounds, f64::from(viewport_width)))
        }
        ViewMode::Mobile => LayoutModel::Mobile(mobile::mobile_layout(rounds, source_order)),
    }
}

fn connector_graph(model: &LayoutModel) -> ConnectorGraph {
    match model {
        LayoutModel::Desktop(d) => ConnectorGraph::from_connectors(&d.connectors),
        LayoutModel::Mobile(_) => ConnectorGraph::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rounds(sizes: &[usize]) -> Vec<RoundInput> {
        sizes
            .iter()
            .enumerate()
            .map(|(r, &n)| RoundInput {
                label: None,
                matches: (0..n).map(|k| MatchId::new(format!("r{r}m{k}"))).collect(),
            })
            .collect()
    }

    #[test]
    fn breakpoint_picks_mode() {
        assert_eq!(ViewMode::for_width(767), ViewMode::Mobile);
        assert_eq!(ViewMode::for_width(768), ViewMode::Desktop);
    }

    #[test]
    fn engine_orders_rounds_once_on_construction() {
        let input = vec![
            RoundInput { label: Some("Final".into()), matches: vec![MatchId::from("f")] },
            RoundInput {
                label: Some("Semifinals".into()),
                matches: vec![MatchId::from("s1"), MatchId::from("s2")],
            },
        ];
        let engine = BracketLayoutEngine::from_rounds(input, 1024);
        let labels: Vec<_> = engine.rounds().iter().map(|r| r.label.as_deref()).collect();
        assert_eq!(labels, vec![Some("Semifinals"), Some("Final")]);
        let desktop = engine.desktop().unwrap();
        assert_eq!(desktop.connectors.len(), 2);
        assert!(desktop.connectors.iter().all(|c| c.to == MatchId::from("f")));
    }

    #[test]
    fn mode_flip_reinitializes_without_leftovers() {
        let mut engine = BracketLayoutEngine::from_rounds(rounds(&[8, 4, 2, 1]), 1024);
        assert_eq!(engine.mode(), ViewMode::Desktop);
        engine.hover(&MatchId::from("r1m0"));
        assert!(!engine.highlight().is_empty());

        assert_eq!(engine.on_resize(600), ResizeOutcome::Reinitialized);
        assert_eq!(engine.mode(), ViewMode::Mobile);
        assert!(engine.desktop().is_none(), "no connectors survive in mobile mode");
        assert!(engine.highlight().is_empty());
        assert!(engine.hovered().is_none());
        assert_eq!(engine.mobile().unwrap().tabs.len(), 4);

        assert!(engine.select_tab(2));
        assert_eq!(engine.on_resize(1280), ResizeOutcome::Reinitialized);
        assert!(engine.mobile().is_none(), "no tabs survive in desktop mode");
        assert_eq!(engine.desktop().unwrap().connectors.len(), 14);
        assert_eq!(engine.active_tab(), None);

        // Back to mobile starts on the first tab again.
        engine.on_resize(500);
        assert_eq!(engine.active_tab(), Some(0));
    }

    #[test]
    fn same_mode_resize_waits_for_relayout() {
        let mut engine = BracketLayoutEngine::from_rounds(rounds(&[4, 2, 1]), 1600);
        let before = engine.desktop().unwrap().columns[1].x;

        assert_eq!(engine.on_resize(900), ResizeOutcome::RelayoutPending);
        assert_eq!(engine.desktop().unwrap().columns[1].x, before);

        engine.relayout();
        let desktop = engine.desktop().unwrap();
        assert!(desktop.columns[1].x < before);
        assert_eq!(desktop.connectors.len(), 6);
        // Connector endpoints follow the new columns.
        let c = &desktop.connectors[0];
        assert_eq!(c.start.x, desktop.columns[0].x + desktop.columns[0].width);
        assert_eq!(c.end.x, desktop.columns[1].x);
    }

    #[test]
    fn relayout_keeps_hover_path() {
        let mut engine = BracketLayoutEngine::from_rounds(rounds(&[4, 2, 1]), 1600);
        engine.hover(&MatchId::from("r0m2"));
        let before = engine.highlight().clone();
        engine.on_resize(1000);
        engine.relayout();
        assert_eq!(engine.highlight(), &before);
        assert_eq!(engine.hovered(), Some(&MatchId::from("r0m2")));
    }

    #[test]
    fn hover_path_and_leave() {
        let mut engine = BracketLayoutEngine::from_rounds(rounds(&[4, 2, 1]), 1024);
        engine.hover(&MatchId::from("r1m1"));
        let h = engine.highlight();
        for id in ["r1m1", "r0m2", "r0m3", "r2m0"] {
            assert!(h.contains_match(&MatchId::from(id)), "{id} should be lit");
        }
        assert!(!h.contains_match(&MatchId::from("r0m0")));
        assert_eq!(h.connectors.len(), 3);

        engine.leave();
        assert!(engine.highlight().is_empty());
    }

    #[test]
    fn hover_is_ignored_on_mobile_and_for_unknown_ids() {
        let mut engine = BracketLayoutEngine::from_rounds(rounds(&[2, 1]), 400);
        engine.hover(&MatchId::from("r0m0"));
        assert!(engine.highlight().is_empty());

        let mut engine = BracketLayoutEngine::from_rounds(rounds(&[2, 1]), 1024);
        engine.hover(&MatchId::from("ghost"));
        assert!(engine.hovered().is_none());
        assert!(!engine.select_tab(0), "desktop has no tabs");
    }

    #[test]
    fn empty_bracket_degrades_to_empty_layout() {
        let engine = BracketLayoutEngine::new(&Bracket::default(), 1024);
        let desktop = engine.desktop().unwrap();
        assert!(desktop.matches.is_empty());
        assert!(desktop.connectors.is_empty());
    }

    #[test]
    fn layout_model_serializes_with_mode_tag() {
        let engine = BracketLayoutEngine::from_rounds(rounds(&[2, 1]), 1024);
        let json = serde_json::to_value(engine.model()).unwrap();
        assert_eq!(json["mode"], "desktop");
        assert_eq!(json["matches"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["connectors"][0]["from"], "r0m0");

        let engine = BracketLayoutEngine::from_rounds(rounds(&[2, 1]), 320);
        let json = serde_json::to_value(engine.model()).unwrap();
        assert_eq!(json["mode"], "mobile");
        assert_eq!(json["tabs"][1], "Round 2");
    }
}
