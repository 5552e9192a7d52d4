use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::database::user_store::UserStore;
use crate::utils::time;

pub const UNHEALTHY_MESSAGE: &str = "Database connection failed";

#[derive(Clone)]
pub struct HealthService {
    store: Arc<dyn UserStore>,
    timeout: Duration,
}

impl HealthService {
    pub fn new(store: Arc<dyn UserStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Probes the store once. On success returns the time the probe finished.
    pub async fn check(&self) -> Result<DateTime<Utc>, &'static str> {
        match tokio::time::timeout(self.timeout, self.store.ping()).await {
            Ok(Ok(())) => Ok(time::now()),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "health probe failed");
                Err(UNHEALTHY_MESSAGE)
            }
            Err(_) => {
                tracing::warn!(timeout = ?self.timeout, "health probe timed out");
                Err(UNHEALTHY_MESSAGE)
            }
        }
    }
}
