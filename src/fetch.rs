use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::info;

use crate::settings::Settings;

/// GET the status page and return its body as text.
pub async fn fetch_page(settings: &Settings) -> Result<String> {
    let client = reqwest::Client::builder()
        .user_agent(settings.user_agent.as_str())
        .timeout(Duration::from_secs(settings.timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    info!("Fetching status page: {}", settings.url);
    let start = Instant::now();
    let html = client
        .get(&settings.url)
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", settings.url))?
        .error_for_status()?
        .text()
        .await
        .context("Failed to read status page body")?;

    info!(
        bytes = html.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Fetched status page"
    );
    Ok(html)
}

/// Read a previously saved copy of the page.
pub fn read_saved(path: &Path) -> Result<String> {
    info!("Reading saved page: {}", path.display());
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}
