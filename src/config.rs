use std::env;
use std::net::SocketAddr;

use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// Optional bearer token; without one GitHub enforces a much lower quota.
    pub github_token: Option<String>,
    pub bind_addr: SocketAddr,
    pub cache_ttl_secs: u64,
    pub concurrency_limit: usize,
    pub max_repo_pages: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let github_token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .map_err(|_| Error::Config("BIND_ADDR is not a valid socket address".to_string()))?;

        let cache_ttl_secs = env::var("CACHE_TTL_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600);

        let concurrency_limit = env::var("CONCURRENCY_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(8);

        let max_repo_pages = env::var("MAX_REPO_PAGES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            github_token,
            bind_addr,
            cache_ttl_secs,
            concurrency_limit,
            max_repo_pages,
        })
    }
}
