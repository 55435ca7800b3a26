//! Wire types for the tournament server and bracket snapshot files.
//! Scores endpoint: {base}/tournament/api/{tournament_id}/scores
use serde::Deserialize;

/// Ids arrive as integers from the server and as strings from hand-written snapshots.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(i64),
}

impl Default for RawId {
    fn default() -> Self {
        RawId::Text(String::new())
    }
}

impl RawId {
    pub fn into_string(self) -> String {
        match self {
            RawId::Text(s) => s,
            RawId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize, Default, Debug)]
pub struct WireScoreRecord {
    pub match_id: RawId,
    #[serde(default)]
    pub scores: Option<Vec<WireSetScore>>,
}

#[derive(Deserialize, Default, Debug, Clone, Copy)]
pub struct WireSetScore {
    /// Any JSON number; normalised when mapped so one odd cell cannot fail the poll.
    pub player1_score: Option<f64>,
    pub player2_score: Option<f64>,
}

#[derive(Deserialize, Default, Debug)]
pub struct BracketSnapshot {
    pub tournament_id: Option<RawId>,
    pub name: Option<String>,
    #[serde(default)]
    pub rounds: Vec<SnapshotRound>,
}

#[derive(Deserialize, Default, Debug)]
pub struct SnapshotRound {
    pub label: Option<String>,
    #[serde(default)]
    pub matches: Vec<SnapshotMatch>,
}

#[derive(Deserialize, Default, Debug)]
pub struct SnapshotMatch {
    pub id: RawId,
    pub player1: Option<String>,
    pub player2: Option<String>,
    pub court: Option<String>,
    /// RFC 3339; unparseable values are dropped rather than failing the load.
    pub scheduled_time: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub scores: Option<Vec<WireSetScore>>,
}
