use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::github::client::{decode, ensure_success};
use crate::github::rate_limit::RateLimitTracker;

pub struct Paginator<'a> {
    client: &'a Client,
    quota: &'a RateLimitTracker,
}

impl<'a> Paginator<'a> {
    pub fn new(client: &'a Client, quota: &'a RateLimitTracker) -> Self {
        Self { client, quota }
    }

    /// Fetches pages until the listing is exhausted or `max_pages` is hit.
    /// The mirrored quota is checked before every page, so pagination stops
    /// issuing requests the moment the platform reports exhaustion.
    pub async fn fetch_pages<T: DeserializeOwned>(
        &self,
        base_url: &str,
        per_page: u32,
        max_pages: u32,
    ) -> Result<Vec<T>> {
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            self.quota.check().await?;

            let separator = if base_url.contains('?') { "&" } else { "?" };
            let url = format!("{}{}per_page={}&page={}", base_url, separator, per_page, page);

            tracing::debug!("Fetching: {}", url);
            let response = self.client.get(&url).send().await?;
            self.quota.record(&response).await;
            let response = ensure_success(response, self.quota, &url).await?;

            // Check for next page in Link header
            let has_next = response
                .headers()
                .get("link")
                .and_then(|v| v.to_str().ok())
                .map(|v| v.contains("rel=\"next\""))
                .unwrap_or(false);

            let body = response.text().await?;
            let items: Vec<T> = decode(&body, &url)?;
            let items_count = items.len();
            all_items.extend(items);

            if !has_next || items_count < per_page as usize || page >= max_pages {
                break;
            }

            page += 1;
        }

        Ok(all_items)
    }
}
