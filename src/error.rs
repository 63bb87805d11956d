use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid query: {0}")]
    InvalidInput(String),

    #[error("GitHub user not found: {0}")]
    UserNotFound(String),

    #[error("GitHub rate limit exhausted{}", reset_hint(.reset_at))]
    RateLimited { reset_at: Option<DateTime<Utc>> },

    #[error("GitHub API error: {0}")]
    Upstream(String),

    #[error("unexpected GitHub response shape: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

fn reset_hint(reset_at: &Option<DateTime<Utc>>) -> String {
    match reset_at {
        Some(at) => format!(", resets at {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => String::new(),
    }
}

impl Error {
    /// User-correctable errors never warrant a retry by the caller.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Error::InvalidInput(_) | Error::UserNotFound(_))
    }
}
