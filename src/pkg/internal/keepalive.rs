use std::time::Duration;

use crate::conf::settings;

/// Periodically pings our own liveness probe so free-tier hosts don't spin
/// the service down for inactivity. Disabled when the interval is 0.
pub fn spawn() {
    if settings.keepalive_interval_secs == 0 {
        return;
    }
    let url = format!("{}/livez", settings.base_url.trim_end_matches('/'));
    tokio::spawn(async move {
        let client = reqwest::Client::new();
        let mut interval =
            tokio::time::interval(Duration::from_secs(settings.keepalive_interval_secs));
        interval.tick().await;
        loop {
            interval.tick().await;
            tracing::info!("keeping service alive, pinging {}", &url);
            if let Err(e) = client.get(&url).send().await {
                tracing::warn!("keep-alive ping failed: {}", e);
            }
        }
    });
}
