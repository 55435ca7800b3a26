use crate::engine::BracketLayoutEngine;
use crate::state::scores::LiveScores;
use courtside_api::{Bracket, MatchId};
use tui::layout::Rect;

/// Keyboard cursor over the ordered rounds. Drives hover on desktop.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub round: usize,
    pub index: usize,
}

/// Terminal cells occupied by a drawn match box, refreshed on every draw
/// and used to hit-test mouse movement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitBox {
    pub area: Rect,
    pub id: MatchId,
}

#[derive(Default)]
pub struct AppState {
    pub bracket: Option<Bracket>,
    pub engine: Option<BracketLayoutEngine>,
    pub scores: LiveScores,
    pub selection: Option<Selection>,
    /// Terminal size as (columns, rows).
    pub terminal_size: (u16, u16),
    pub hit_boxes: Vec<HitBox>,
    pub show_logs: bool,
}

impl AppState {
    pub fn new(terminal_size: (u16, u16)) -> Self {
        Self { terminal_size, ..Self::default() }
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<&MatchId> {
        self.hit_boxes
            .iter()
            .find(|hit| hit.area.contains((column, row).into()))
            .map(|hit| &hit.id)
    }

    /// Id under the keyboard cursor, if the cursor points at a real match.
    pub fn selected_match(&self) -> Option<&MatchId> {
        let selection = self.selection?;
        self.engine
            .as_ref()?
            .rounds()
            .get(selection.round)?
            .matches
            .get(selection.index)
    }
}
