pub mod client;
pub mod wire;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Domain types, independent of the server's JSON shapes
// ---------------------------------------------------------------------------

/// Server-side match identifier. The tournament server emits integer ids,
/// hand-written snapshots often use strings; both normalize to the same text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MatchId(String);

impl MatchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MatchId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Bracket {
    /// Server tournament id used to build the scores endpoint, when known.
    pub tournament_id: Option<String>,
    pub name: String,
    /// Rounds in source order. Canonical ordering is the layout engine's job.
    pub rounds: Vec<Round>,
}

impl Bracket {
    pub fn find_match(&self, id: &MatchId) -> Option<&Match> {
        self.rounds
            .iter()
            .flat_map(|r| r.matches.iter())
            .find(|m| &m.id == id)
    }

    pub fn contains(&self, id: &MatchId) -> bool {
        self.find_match(id).is_some()
    }

    pub fn match_count(&self) -> usize {
        self.rounds.iter().map(|r| r.matches.len()).sum()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Round {
    /// Heading such as "Quarterfinals". Used for ordering and styling only.
    pub label: Option<String>,
    pub matches: Vec<Match>,
}

#[derive(Debug, Clone, Default)]
pub struct Match {
    pub id: MatchId,
    pub player1: Option<String>,
    pub player2: Option<String>,
    pub court: Option<String>,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub completed: bool,
    /// Scores known when the snapshot was taken, in set order.
    pub scores: Vec<SetScore>,
}

impl Match {
    pub fn player1_name(&self) -> &str {
        self.player1.as_deref().unwrap_or("TBD")
    }

    pub fn player2_name(&self) -> &str {
        self.player2.as_deref().unwrap_or("TBD")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SetScore {
    pub player1_score: u16,
    pub player2_score: u16,
}

impl SetScore {
    pub fn new(player1_score: u16, player2_score: u16) -> Self {
        Self { player1_score, player2_score }
    }

    /// Side that is strictly ahead in this set, if any.
    pub fn leader(&self) -> Option<Side> {
        match self.player1_score.cmp(&self.player2_score) {
            std::cmp::Ordering::Greater => Some(Side::Player1),
            std::cmp::Ordering::Less => Some(Side::Player2),
            std::cmp::Ordering::Equal => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Player1,
    Player2,
}

/// One entry of the live scores feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreRecord {
    pub match_id: MatchId,
    pub scores: Vec<SetScore>,
}
