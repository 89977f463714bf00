use crate::models::UpstreamError;
use anyhow::{Context, Result};
use common::market::{sort_records, PriceRecord};
use reqwest::Client;
use serde::Deserialize;
use std::future::Future;
use tokio::time::Duration;

const BASE_URL: &str = "https://api.data.gov.in/resource";
const RESOURCE_ID: &str = "9ef84268-d588-465a-a308-a864a43d0070";
// 400 rows covers roughly three days of history without leaning on the
// upstream the way a 1000-row pull would.
const ROW_LIMIT: u32 = 400;
const MAX_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(1);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ResourceResponse {
    #[serde(default)]
    records: Vec<PriceRecord>,
}

/// Gateway to the government commodity price dataset. The upstream hangs up
/// or times out often enough that every fetch runs under a bounded retry,
/// and its row order is not guaranteed, so results are re-sorted on every
/// call. Stateless across invocations.
pub struct AgmarknetClient {
    client: Client,
    api_key: String,
}

impl AgmarknetClient {
    pub fn new(api_key: &str) -> Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key: api_key.to_string(),
        })
    }

    pub async fn fetch_prices(
        &self,
        crop: &str,
        location: Option<&str>,
    ) -> Result<Vec<PriceRecord>, UpstreamError> {
        let url = format!("{}/{}", BASE_URL, RESOURCE_ID);
        let limit = ROW_LIMIT.to_string();

        let mut params = vec![
            ("api-key", self.api_key.as_str()),
            ("format", "json"),
            ("limit", limit.as_str()),
            ("filters[commodity]", crop),
        ];
        if let Some(district) = location {
            params.push(("filters[district]", district));
        }

        let mut records = with_retries(MAX_ATTEMPTS, RETRY_DELAY, || {
            self.fetch_once(&url, &params)
        })
        .await?;

        sort_records(&mut records);
        Ok(records)
    }

    async fn fetch_once(&self, url: &str, params: &[(&str, &str)]) -> Result<Vec<PriceRecord>> {
        let response = self
            .client
            .get(url)
            .query(params)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request")?;

        if !response.status().is_success() {
            anyhow::bail!("data.gov.in returned {}", response.status());
        }

        let body: ResourceResponse = response
            .json()
            .await
            .context("Failed to parse price records")?;

        Ok(body.records)
    }
}

/// Runs `attempt` up to `max_attempts` times with a fixed delay between
/// failures. Attempts are strictly sequential; the delay is awaited in full
/// before the next try. After the final failure the caller gets the generic
/// busy error, never the raw upstream message.
pub async fn with_retries<T, F, Fut>(
    max_attempts: u32,
    delay: Duration,
    mut attempt: F,
) -> Result<T, UpstreamError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    for attempt_no in 1..=max_attempts {
        println!("🌾 Attempt {}: fetching mandi prices...", attempt_no);
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                println!("⚠️ Attempt {} failed: {}", attempt_no, e);
                if attempt_no == max_attempts {
                    return Err(UpstreamError::Busy);
                }
                tokio::time::sleep(delay).await;
            }
        }
    }

    Err(UpstreamError::Busy)
}
