//! Mirror of the quota GitHub reports via `x-ratelimit-*` response headers.
//!
//! The tracker never waits out a reset window; once the platform reports
//! zero remaining requests, callers fail fast with the reset time and leave
//! backoff to the client of the service.

use chrono::{DateTime, TimeZone, Utc};
use reqwest::Response;
use tokio::sync::Mutex;

use crate::error::{Error, Result};
use crate::models::RateLimitSnapshot;

pub struct RateLimitTracker {
    has_token: bool,
    state: Mutex<QuotaState>,
}

#[derive(Default)]
struct QuotaState {
    remaining: Option<u32>,
    limit: Option<u32>,
    reset_at: Option<DateTime<Utc>>,
}

impl RateLimitTracker {
    pub fn new(has_token: bool) -> Self {
        Self {
            has_token,
            state: Mutex::new(QuotaState::default()),
        }
    }

    /// Errors with `RateLimited` once the mirrored quota is exhausted, so no
    /// further upstream calls are issued until the platform's reset time.
    pub async fn check(&self) -> Result<()> {
        let state = self.state.lock().await;
        if state.remaining == Some(0) {
            return Err(Error::RateLimited {
                reset_at: state.reset_at,
            });
        }
        Ok(())
    }

    /// Refreshes the mirror from one response's headers. Responses without
    /// rate-limit headers leave the previous reading untouched.
    pub async fn record(&self, response: &Response) {
        let remaining = header_number(response, "x-ratelimit-remaining");
        let limit = header_number(response, "x-ratelimit-limit");
        let reset = header_number(response, "x-ratelimit-reset");

        let mut state = self.state.lock().await;
        if let Some(remaining) = remaining {
            state.remaining = Some(remaining as u32);
        }
        if let Some(limit) = limit {
            state.limit = Some(limit as u32);
        }
        if let Some(reset) = reset {
            state.reset_at = Utc.timestamp_opt(reset as i64, 0).single();
        }
    }

    pub async fn snapshot(&self) -> RateLimitSnapshot {
        let state = self.state.lock().await;
        RateLimitSnapshot {
            remaining: state.remaining,
            limit: state.limit,
            reset_at: state.reset_at,
            has_token: self.has_token,
        }
    }

    #[cfg(test)]
    pub(crate) async fn set_remaining(&self, remaining: u32, reset_at: Option<DateTime<Utc>>) {
        let mut state = self.state.lock().await;
        state.remaining = Some(remaining);
        state.reset_at = reset_at;
    }
}

fn header_number(response: &Response, name: &str) -> Option<u64> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn exhausted_quota_fails_fast() {
        let tracker = RateLimitTracker::new(false);
        tracker.check().await.unwrap();

        let reset = Utc.timestamp_opt(4_102_444_800, 0).single();
        tracker.set_remaining(0, reset).await;
        match tracker.check().await {
            Err(Error::RateLimited { reset_at }) => assert_eq!(reset_at, reset),
            other => panic!("expected RateLimited, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn snapshot_reports_token_presence() {
        let tracker = RateLimitTracker::new(true);
        let snapshot = tracker.snapshot().await;
        assert!(snapshot.has_token);
        assert_eq!(snapshot.remaining, None);
        assert_eq!(snapshot.limit, None);
    }
}
