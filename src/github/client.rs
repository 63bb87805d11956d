use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::github::paginator::Paginator;
use crate::github::rate_limit::RateLimitTracker;
use crate::models::{Event, GitHubUser, Organization, RateLimitSnapshot, Repository};

/// Per-request timeout; anything slower classifies as an upstream failure.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// GitHub serves at most ~300 recent public events (3 pages of 100).
const MAX_EVENT_PAGES: u32 = 3;

/// Language byte counts are fetched for this many repositories per profile.
const MAX_LANGUAGE_REPOS: usize = 20;

/// The fetch seam of the analysis engine. The orchestrator only sees this
/// trait, so tests substitute an offline double for the real client.
#[async_trait]
pub trait PlatformClient: Send + Sync {
    async fn fetch_user(&self, handle: &str) -> Result<GitHubUser>;
    async fn fetch_repositories(&self, handle: &str) -> Result<Vec<Repository>>;
    async fn fetch_events(&self, handle: &str) -> Result<Vec<Event>>;
    async fn fetch_organizations(&self, handle: &str) -> Result<Vec<Organization>>;

    /// Byte counts per language, keyed by repository name.
    async fn fetch_languages(
        &self,
        handle: &str,
        repos: &[Repository],
    ) -> Result<HashMap<String, HashMap<String, u64>>>;

    async fn rate_limit(&self) -> RateLimitSnapshot;
}

pub struct GitHubClient {
    client: Client,
    quota: RateLimitTracker,
    base_url: String,
    concurrency_limit: usize,
    max_repo_pages: u32,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = &config.github_token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("devscope/0.1"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            quota: RateLimitTracker::new(config.github_token.is_some()),
            base_url: "https://api.github.com".to_string(),
            concurrency_limit: config.concurrency_limit,
            max_repo_pages: config.max_repo_pages,
        })
    }
}

#[async_trait]
impl PlatformClient for GitHubClient {
    async fn fetch_user(&self, handle: &str) -> Result<GitHubUser> {
        self.quota.check().await?;
        let url = format!("{}/users/{}", self.base_url, handle);
        tracing::info!("Fetching user: {}", handle);

        let response = self.client.get(&url).send().await?;
        self.quota.record(&response).await;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::UserNotFound(handle.to_string()));
        }
        let response = ensure_success(response, &self.quota, &url).await?;

        let body = response.text().await?;
        decode(&body, &url)
    }

    async fn fetch_repositories(&self, handle: &str) -> Result<Vec<Repository>> {
        let url = format!(
            "{}/users/{}/repos?type=owner&sort=updated",
            self.base_url, handle
        );
        tracing::info!("Fetching repositories for: {}", handle);
        let paginator = Paginator::new(&self.client, &self.quota);
        paginator.fetch_pages(&url, 100, self.max_repo_pages).await
    }

    async fn fetch_events(&self, handle: &str) -> Result<Vec<Event>> {
        let url = format!("{}/users/{}/events/public", self.base_url, handle);
        tracing::info!("Fetching recent events for: {}", handle);
        let paginator = Paginator::new(&self.client, &self.quota);
        paginator.fetch_pages(&url, 100, MAX_EVENT_PAGES).await
    }

    async fn fetch_organizations(&self, handle: &str) -> Result<Vec<Organization>> {
        self.quota.check().await?;
        let url = format!("{}/users/{}/orgs", self.base_url, handle);

        let response = self.client.get(&url).send().await?;
        self.quota.record(&response).await;
        let response = ensure_success(response, &self.quota, &url).await?;

        let body = response.text().await?;
        decode(&body, &url)
    }

    async fn fetch_languages(
        &self,
        handle: &str,
        repos: &[Repository],
    ) -> Result<HashMap<String, HashMap<String, u64>>> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency_limit));
        let mut futures = Vec::new();

        for repo in repos.iter().take(MAX_LANGUAGE_REPOS) {
            let sem = semaphore.clone();
            let name = repo.name.clone();
            let url = format!("{}/repos/{}/{}/languages", self.base_url, handle, name);

            futures.push(async move {
                let _permit = sem
                    .acquire()
                    .await
                    .map_err(|_| Error::Upstream("language fetch cancelled".to_string()))?;

                // Checked per task: once the quota is exhausted the
                // remaining tasks fail here without issuing a request.
                self.quota.check().await?;

                let response = self.client.get(&url).send().await?;
                self.quota.record(&response).await;

                if !response.status().is_success() {
                    if self.quota.check().await.is_err() {
                        return Err(Error::RateLimited {
                            reset_at: self.quota.snapshot().await.reset_at,
                        });
                    }
                    // A repo without readable language data is not fatal.
                    tracing::debug!("No language data for {}: {}", name, response.status());
                    return Ok((name, HashMap::new()));
                }

                let body = response.text().await?;
                let languages: HashMap<String, u64> = decode(&body, &url)?;
                Ok::<_, Error>((name, languages))
            });
        }

        let results = join_all(futures).await;
        let mut by_repo = HashMap::new();
        for result in results {
            let (name, languages) = result?;
            by_repo.insert(name, languages);
        }
        Ok(by_repo)
    }

    async fn rate_limit(&self) -> RateLimitSnapshot {
        self.quota.snapshot().await
    }
}

/// Classifies a non-2xx response: quota exhaustion surfaces as `RateLimited`
/// with the reset time, anything else as `Upstream`.
pub(crate) async fn ensure_success(
    response: Response,
    quota: &RateLimitTracker,
    context: &str,
) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
        quota.check().await?;
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::Upstream(format!(
        "{}: {} - {}",
        context, status, body
    )))
}

/// Single decode point for upstream payloads; shape mismatches are rejected
/// here instead of reaching the extractors.
pub(crate) fn decode<T: DeserializeOwned>(body: &str, context: &str) -> Result<T> {
    serde_json::from_str(body)
        .map_err(|e| Error::MalformedResponse(format!("{}: {}", context, e)))
}
