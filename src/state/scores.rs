use chrono::{DateTime, Utc};
use courtside_api::{Bracket, MatchId, ScoreRecord, SetScore, Side};
use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

/// How long a changed match stays visually pulsed.
pub const PULSE_DURATION: Duration = Duration::from_secs(3);

/// How long the manual refresh indicator stays up.
pub const REFRESH_INDICATOR_DURATION: Duration = Duration::from_secs(1);

pub const IN_PROGRESS: &str = "In progress";

/// Last-seen scores per match, used only to decide whether a poll changed
/// anything. Replaced entry by entry as records arrive.
#[derive(Debug, Default)]
pub struct ScoreBook {
    last_seen: HashMap<MatchId, Vec<SetScore>>,
}

impl ScoreBook {
    /// True if `id` was never seen, or the set count or any set differs.
    pub fn has_changed(&self, id: &MatchId, scores: &[SetScore]) -> bool {
        self.last_seen.get(id).is_none_or(|prev| prev.as_slice() != scores)
    }

    /// Store `scores` and report whether they differ from the previous entry.
    pub fn observe(&mut self, id: &MatchId, scores: &[SetScore]) -> bool {
        if !self.has_changed(id, scores) {
            return false;
        }
        self.last_seen.insert(id.clone(), scores.to_vec());
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreCell {
    pub value: u16,
    /// This side is strictly ahead in the set.
    pub leading: bool,
}

/// What the renderer shows for one match: one score column per player plus
/// a status line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchDisplay {
    pub player1: Vec<ScoreCell>,
    pub player2: Vec<ScoreCell>,
    pub status: Option<String>,
}

impl MatchDisplay {
    fn from_sets(scores: &[SetScore]) -> Self {
        let cells = |side: Side| {
            scores
                .iter()
                .map(|s| ScoreCell {
                    value: match side {
                        Side::Player1 => s.player1_score,
                        Side::Player2 => s.player2_score,
                    },
                    leading: s.leader() == Some(side),
                })
                .collect()
        };
        Self { player1: cells(Side::Player1), player2: cells(Side::Player2), status: None }
    }
}

#[derive(Debug, Default)]
pub struct LiveScores {
    known: HashSet<MatchId>,
    book: ScoreBook,
    display: HashMap<MatchId, MatchDisplay>,
    pulses: HashMap<MatchId, Instant>,
    refreshing_until: Option<Instant>,
    last_updated: Option<DateTime<Utc>>,
}

impl LiveScores {
    /// Seed the display from the snapshot. Snapshot scores are shown but
    /// not recorded, so the first poll always counts as a change.
    pub fn for_bracket(bracket: &Bracket) -> Self {
        let mut live = Self::default();
        for m in bracket.rounds.iter().flat_map(|r| r.matches.iter()) {
            live.known.insert(m.id.clone());
            let mut display = MatchDisplay::from_sets(&m.scores);
            display.status = if m.completed {
                Some("Completed".to_string())
            } else if !m.scores.is_empty() {
                Some(IN_PROGRESS.to_string())
            } else {
                None
            };
            live.display.insert(m.id.clone(), display);
        }
        live
    }

    /// Patch every match whose scores changed and start its pulse. Records
    /// for matches outside the bracket are dropped. Returns the changed ids
    /// in feed order.
    pub fn apply(&mut self, records: Vec<ScoreRecord>, now: Instant) -> Vec<MatchId> {
        let mut changed = Vec::new();
        for record in records {
            if !self.known.contains(&record.match_id) {
                continue;
            }
            if !self.book.observe(&record.match_id, &record.scores) {
                continue;
            }
            let display = self.display.entry(record.match_id.clone()).or_default();
            let status = display.status.take();
            *display = MatchDisplay::from_sets(&record.scores);
            display.status = if record.scores.is_empty() {
                status
            } else {
                Some(IN_PROGRESS.to_string())
            };
            self.pulses.insert(record.match_id.clone(), now + PULSE_DURATION);
            changed.push(record.match_id);
        }
        changed
    }

    pub fn mark_updated(&mut self, at: DateTime<Utc>) {
        self.last_updated = Some(at);
    }

    /// `Last updated:` text, or `None` before the first successful fetch.
    pub fn last_updated_text(&self, now: DateTime<Utc>) -> Option<String> {
        self.last_updated
            .map(|at| relative_time((now - at).num_seconds()))
    }

    pub fn display(&self, id: &MatchId) -> Option<&MatchDisplay> {
        self.display.get(id)
    }

    pub fn is_pulsing(&self, id: &MatchId, now: Instant) -> bool {
        self.pulses.get(id).is_some_and(|until| *until > now)
    }

    /// Drop finished pulses. Returns true if any were removed.
    pub fn expire_pulses(&mut self, now: Instant) -> bool {
        let before = self.pulses.len();
        self.pulses.retain(|_, until| *until > now);
        self.pulses.len() != before
    }

    pub fn begin_refresh(&mut self, now: Instant) {
        self.refreshing_until = Some(now + REFRESH_INDICATOR_DURATION);
    }

    pub fn is_refreshing(&self, now: Instant) -> bool {
        self.refreshing_until.is_some_and(|until| until > now)
    }
}

/// Human wording for an elapsed time in seconds.
pub fn relative_time(elapsed_secs: i64) -> String {
    let secs = elapsed_secs.max(0);
    match secs {
        0..10 => "Just now".to_string(),
        10..60 => format!("{secs} seconds ago"),
        60..120 => "1 minute ago".to_string(),
        120..3600 => format!("{} minutes ago", secs / 60),
        _ => format!("{} hours ago", secs / 3600),
    }
}
