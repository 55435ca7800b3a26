use crate::state::messages::{NetworkRequest, NetworkResponse};
use courtside_api::client::{self, TournamentApi};
use log::{debug, error, info};
use std::path::PathBuf;
use tokio::sync::mpsc;

pub struct NetworkWorker {
    client: TournamentApi,
    /// Scores endpoint key. Filled from the snapshot when not given up front.
    tournament_id: Option<String>,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
}

impl NetworkWorker {
    pub fn new(
        client: TournamentApi,
        tournament_id: Option<String>,
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        Self { client, tournament_id, requests, responses }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            match request {
                NetworkRequest::LoadBracket { path } => {
                    let Some(response) = self.handle_load_bracket(path) else {
                        continue;
                    };
                    if let Err(e) = self.responses.send(response).await {
                        error!("Failed to send network response: {e}");
                        break;
                    }
                }
                NetworkRequest::RefreshScores => self.spawn_score_fetch(),
            }
        }
        debug!("network worker stopped");
    }

    fn handle_load_bracket(&mut self, path: PathBuf) -> Option<NetworkResponse> {
        debug!("loading bracket snapshot from {}", path.display());
        let bracket = match client::load_bracket(&path) {
            Ok(bracket) => bracket,
            Err(e) => {
                error!("failed to load bracket: {e}");
                return None;
            }
        };
        info!(
            "loaded bracket \"{}\": {} rounds, {} matches",
            bracket.name,
            bracket.rounds.len(),
            bracket.match_count()
        );
        if self.tournament_id.is_none() {
            self.tournament_id = bracket.tournament_id.clone();
        }
        Some(NetworkResponse::BracketLoaded { bracket })
    }

    /// Every fetch runs on its own task with no cancellation, so results
    /// reach the main loop in completion order, not request order.
    fn spawn_score_fetch(&self) {
        let Some(tournament_id) = self.tournament_id.clone() else {
            debug!("no tournament id, skipping score fetch");
            return;
        };
        let client = self.client.clone();
        let responses = self.responses.clone();

        tokio::spawn(async move {
            debug!("fetching {}", client.scores_url(&tournament_id));
            match client.fetch_scores(&tournament_id).await {
                Ok(records) => {
                    debug!("received {} score records", records.len());
                    if let Err(e) = responses.send(NetworkResponse::ScoresFetched { records }).await {
                        error!("Failed to send network response: {e}");
                    }
                }
                Err(e) => error!("Error fetching scores: {e}"),
            }
        });
    }
}
