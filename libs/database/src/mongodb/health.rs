use mongodb::{Client, bson::doc};
use std::time::{Duration, Instant};

/// Outcome of one `ping` against the `admin` database
#[derive(Debug, Clone)]
pub struct HealthStatus {
    pub healthy: bool,
    /// Driver error text when the ping failed
    pub message: Option<String>,
    pub latency: Duration,
}

pub async fn check_health_detailed(client: &Client) -> HealthStatus {
    let started = Instant::now();
    let outcome = client.database("admin").run_command(doc! { "ping": 1 }).await;

    HealthStatus {
        healthy: outcome.is_ok(),
        message: outcome.err().map(|e| e.to_string()),
        latency: started.elapsed(),
    }
}
