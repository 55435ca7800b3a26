use crate::state::messages::NetworkRequest;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Periodic score poll. Only sends RefreshScores; the bracket snapshot is
/// loaded once on startup.
pub struct PeriodicRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
    period: Duration,
}

impl PeriodicRefresher {
    pub fn new(network_requests: mpsc::Sender<NetworkRequest>, period: Duration) -> Self {
        Self { network_requests, period }
    }

    pub async fn run(self) {
        let mut scores_interval = interval(self.period);
        // Skip the immediate first tick; startup already fetched once.
        scores_interval.tick().await;

        loop {
            scores_interval.tick().await;
            if self.network_requests.send(NetworkRequest::RefreshScores).await.is_err() {
                break;
            }
        }
    }
}
