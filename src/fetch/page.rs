use anyhow::{Context, Result};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::info;
use url::Url;

/// Blocking client shared by the single request of a run.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("building HTTP client")
}

/// Fetch the raw markup at `url`. Any transport error or non-2xx status is
/// returned as an error; there is no retry.
pub fn fetch_page(client: &Client, url: &Url) -> Result<String> {
    let resp = client
        .get(url.clone())
        .send()
        .with_context(|| format!("GET {}", url))?
        .error_for_status()
        .with_context(|| format!("GET {}", url))?;
    let body = resp
        .text()
        .with_context(|| format!("reading body from {}", url))?;
    info!(url = %url, bytes = body.len(), "fetched page");
    Ok(body)
}
