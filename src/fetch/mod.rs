mod client;
mod basic;

pub use client::HttpClient;
pub use basic::BasicClient;

use anyhow::Result;
use std::time::Duration;

/// Default per-request timeout for station page fetches.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Fetches a page body as text with a per-request timeout.
///
/// An HTTP error status is not a fetch failure at this layer; an error page
/// simply extracts to an all-absent summary downstream.
pub async fn fetch_text<C: HttpClient>(
    client: &C,
    url: &str,
    timeout: Duration,
) -> Result<String> {
    let mut req = reqwest::Request::new(
        reqwest::Method::GET,
        url.parse()?,
    );
    *req.timeout_mut() = Some(timeout);

    let resp = client.execute(req).await?;
    Ok(resp.text().await?)
}
