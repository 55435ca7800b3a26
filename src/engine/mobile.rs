use courtside_api::MatchId;
use serde::Serialize;
use std::collections::HashMap;

use super::RoundInput;
use super::geometry::bracket_slot;
use super::order::display_label;

/// Stacked presentation: one round visible at a time, switched by tabs.
#[derive(Debug, Clone, Serialize)]
pub struct MobileLayout {
    pub tabs: Vec<String>,
    pub active_tab: usize,
    pub rounds: Vec<MobileRound>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MobileRound {
    pub label: String,
    pub matches: Vec<MobileMatch>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MobileMatch {
    pub id: MatchId,
    /// 1-based position within the round.
    pub number: usize,
    pub bracket_slot: u64,
    /// Forward arrow label: the match's 1-based position in source order.
    /// `None` in the final round, which feeds nothing.
    pub progression: Option<usize>,
}

impl MobileLayout {
    pub fn visible_round(&self) -> Option<&MobileRound> {
        self.rounds.get(self.active_tab)
    }

    /// Returns false when `index` names no tab.
    pub fn select_tab(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() {
            return false;
        }
        self.active_tab = index;
        true
    }
}

/// `source_order` maps each match to its position in the snapshot as loaded,
/// before round ordering.
pub fn mobile_layout(rounds: &[RoundInput], source_order: &HashMap<MatchId, usize>) -> MobileLayout {
    let total_rounds = rounds.len();
    let built: Vec<MobileRound> = rounds
        .iter()
        .enumerate()
        .map(|(round_index, round)| MobileRound {
            label: display_label(round.label.as_deref(), round_index),
            matches: round
                .matches
                .iter()
                .enumerate()
                .map(|(index, id)| MobileMatch {
                    id: id.clone(),
                    number: index + 1,
                    bracket_slot: bracket_slot(round_index, index, total_rounds),
                    progression: (round_index + 1 < total_rounds)
                        .then(|| source_order.get(id).map(|pos| pos + 1))
                        .flatten(),
                })
                .collect(),
        })
        .collect();

    MobileLayout {
        tabs: built.iter().map(|r| r.label.clone()).collect(),
        active_tab: 0,
        rounds: built,
    }
}
