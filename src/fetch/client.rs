use async_trait::async_trait;
use reqwest::{Request, Response};

/// Seam for HTTP fetching, so the station loop and the first-date probe can
/// be exercised against a stub client in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
