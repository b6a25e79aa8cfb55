use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::KeepAliveConfig;
use crate::core::{AppError, Result};

/// Background job that pings a URL so idle hosting does not put the service to sleep
///
/// Runs on a tokio interval timer. Failed pings are logged and never stop the loop.
pub struct KeepAlivePinger {
    client: Client,
    url: String,
    period: Duration,
}

impl KeepAlivePinger {
    pub fn new(config: &KeepAliveConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
            period: Duration::from_secs(config.interval_secs),
        })
    }

    /// Start the ping loop
    /// This should be spawned as a tokio task in main.rs
    pub async fn start(self: Arc<Self>) {
        info!(
            url = %self.url,
            interval_secs = self.period.as_secs(),
            "Starting keep-alive pinger"
        );

        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; the server is not listening yet
        ticker.tick().await;

        loop {
            ticker.tick().await;

            if let Err(e) = self.ping().await {
                warn!(url = %self.url, error = %e, "Keep-alive ping failed");
            }
        }
    }

    async fn ping(&self) -> Result<()> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(AppError::internal(format!(
                "keep-alive target answered {}",
                status
            )));
        }

        debug!(url = %self.url, status = %status, "Keep-alive ping succeeded");
        Ok(())
    }
}
