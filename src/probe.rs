//! First-date discovery for stations whose history does not reach back to
//! the configured start date.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use crate::dates::date_url_iter;
use crate::extract::extract_from_html;
use crate::fetch::{DEFAULT_TIMEOUT, HttpClient, fetch_text};

/// Pluggable strategy for locating the earliest date a station has data.
///
/// Returns `Ok(None)` when no date with data was found; probing problems
/// other than "no data" surface as errors.
#[async_trait]
pub trait FirstDateProbe {
    async fn probe(&self, template: &str, start: NaiveDate) -> Result<Option<NaiveDate>>;
}

/// Forward scan: fetch each day's page from `start` up to a horizon date and
/// return the first one whose extracted summary carries any value. Fetch
/// failures count as "no data" for that day.
pub struct ScanProbe<C> {
    client: C,
    horizon: NaiveDate,
}

impl<C: HttpClient> ScanProbe<C> {
    pub fn new(client: C, horizon: NaiveDate) -> Self {
        Self { client, horizon }
    }
}

#[async_trait]
impl<C: HttpClient> FirstDateProbe for ScanProbe<C> {
    async fn probe(&self, template: &str, start: NaiveDate) -> Result<Option<NaiveDate>> {
        for (date, url) in date_url_iter(template, start, self.horizon) {
            match fetch_text(&self.client, &url, DEFAULT_TIMEOUT).await {
                Ok(body) => {
                    if !extract_from_html(&body).is_empty() {
                        debug!(date = %date, "First date with data found");
                        return Ok(Some(date));
                    }
                    debug!(date = %date, "No data on page, probing next day");
                }
                Err(e) => {
                    debug!(date = %date, error = %e, "Probe fetch failed, trying next day");
                }
            }
        }
        Ok(None)
    }
}
