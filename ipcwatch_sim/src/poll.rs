//! Optional remote stats enrichment.
//!
//! Polls an external JSON endpoint for authoritative stats and, on
//! success, overwrites the locally computed values. Failures are logged
//! and swallowed: the previously displayed values stand, and the next
//! refresh naturally retries. The engine never depends on this.

use std::time::Duration;

use tracing::warn;

use ipcwatch_core::DashboardStats;

/// Blocking poller with a short timeout so a dead endpoint cannot stall
/// the refresh loop.
pub struct StatsPoller {
    client: reqwest::blocking::Client,
    url: String,
}

impl StatsPoller {
    pub fn new(url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(750))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// One poll. `None` means "keep whatever you were displaying".
    pub fn poll(&self) -> Option<DashboardStats> {
        let response = match self.client.get(&self.url).send() {
            Ok(response) => response,
            Err(err) => {
                warn!(url = %self.url, error = %err, "stats fetch failed");
                return None;
            }
        };

        match response.error_for_status().and_then(|r| r.json::<DashboardStats>()) {
            Ok(stats) => Some(stats),
            Err(err) => {
                warn!(url = %self.url, error = %err, "stats payload rejected");
                None
            }
        }
    }
}
