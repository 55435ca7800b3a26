use crate::wire::{BracketSnapshot, WireScoreRecord, WireSetScore};
use crate::{Bracket, Match, MatchId, Round, ScoreRecord, SetScore};
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::fmt;
use std::path::Path;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Client for the tournament server's live scores API.
#[derive(Debug, Clone)]
pub struct TournamentApi {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl Default for TournamentApi {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(reqwest::Error, String),
    NotFound(String),
    Other(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::NotFound(msg) => write!(f, "Not found: {msg}"),
            ApiError::Other(msg) => write!(f, "Error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl TournamentApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .user_agent("courtside/0.1 (terminal bracket viewer)")
                .build()
                .unwrap_or_default(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn scores_url(&self, tournament_id: &str) -> String {
        format!("{}/tournament/api/{tournament_id}/scores", self.base_url)
    }

    /// Fetch the latest per-set scores for every ongoing match of a tournament.
    pub async fn fetch_scores(&self, tournament_id: &str) -> ApiResult<Vec<ScoreRecord>> {
        let url = self.scores_url(tournament_id);
        let raw: Vec<WireScoreRecord> = self.get(&url).await?;
        Ok(raw.into_iter().map(map_score_record).collect())
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> ApiResult<T> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, url.to_owned()))?;

        // Any non-2xx status is a failed poll; there is no empty-body fallback.
        let response = response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, url.to_owned()))?;

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Parsing(e, url.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Bracket snapshot loading
// ---------------------------------------------------------------------------

/// Load a bracket snapshot from a local JSON file.
pub fn load_bracket(path: &Path) -> ApiResult<Bracket> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ApiError::NotFound(format!("could not read {}: {e}", path.display())))?;
    parse_bracket(&content)
        .map_err(|e| ApiError::Other(format!("invalid bracket json at {}: {e}", path.display())))
}

pub fn parse_bracket(json: &str) -> Result<Bracket, serde_json::Error> {
    let raw: BracketSnapshot = serde_json::from_str(json)?;
    Ok(map_snapshot(raw))
}

// ---------------------------------------------------------------------------
// Mapping: wire types → domain types
// ---------------------------------------------------------------------------

fn map_snapshot(raw: BracketSnapshot) -> Bracket {
    let rounds = raw
        .rounds
        .into_iter()
        .map(|r| Round {
            label: r.label.map(|l| l.trim().to_owned()).filter(|l| !l.is_empty()),
            matches: r
                .matches
                .into_iter()
                .map(|m| Match {
                    id: MatchId::new(m.id.into_string()),
                    player1: m.player1,
                    player2: m.player2,
                    court: m.court,
                    scheduled_time: m.scheduled_time.as_deref().and_then(parse_time),
                    completed: m.completed,
                    scores: map_set_scores(m.scores.unwrap_or_default()),
                })
                .collect(),
        })
        .collect();

    Bracket {
        tournament_id: raw
            .tournament_id
            .map(|id| id.into_string())
            .filter(|id| !id.is_empty()),
        name: raw.name.unwrap_or_else(|| "Tournament".into()),
        rounds,
    }
}

fn map_score_record(raw: WireScoreRecord) -> ScoreRecord {
    ScoreRecord {
        match_id: MatchId::new(raw.match_id.into_string()),
        scores: map_set_scores(raw.scores.unwrap_or_default()),
    }
}

fn map_set_scores(raw: Vec<WireSetScore>) -> Vec<SetScore> {
    raw.into_iter()
        .map(|s| SetScore {
            player1_score: score_value(s.player1_score),
            player2_score: score_value(s.player2_score),
        })
        .collect()
}

/// Round to the nearest point and clamp into range; missing or NaN is 0.
fn score_value(raw: Option<f64>) -> u16 {
    raw.filter(|v| v.is_finite())
        .map(|v| v.round().clamp(0.0, f64::from(u16::MAX)) as u16)
        .unwrap_or_default()
}

fn parse_time(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
