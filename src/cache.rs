//! In-memory TTL cache for completed analyses.
//!
//! Keyed by canonical handle, process-lifetime only. Expired entries are
//! collected lazily on read; `clear` drops everything at once. The cache is
//! an owned component injected into the analyzer, never a global.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use crate::models::{CacheStats, ProfileAnalysis};

pub struct AnalysisCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

struct CacheEntry {
    analysis: ProfileAnalysis,
    created_at: DateTime<Utc>,
}

impl AnalysisCache {
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            ttl: Duration::seconds(ttl_secs as i64),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns a clone of the cached analysis if the entry is still within
    /// its TTL; an expired entry is removed and treated as absent.
    pub async fn get(&self, handle: &str) -> Option<ProfileAnalysis> {
        let mut entries = self.entries.lock().await;
        let fresh = entries
            .get(handle)
            .map(|e| Utc::now() - e.created_at < self.ttl)?;
        if !fresh {
            entries.remove(handle);
            return None;
        }
        entries.get(handle).map(|e| e.analysis.clone())
    }

    pub async fn insert(&self, handle: &str, analysis: ProfileAnalysis) {
        let mut entries = self.entries.lock().await;
        entries.insert(
            handle.to_string(),
            CacheEntry {
                analysis,
                created_at: Utc::now(),
            },
        );
    }

    /// Drops every entry, expired or not, and reports how many were removed.
    pub async fn clear(&self) -> usize {
        let mut entries = self.entries.lock().await;
        let cleared = entries.len();
        entries.clear();
        cleared
    }

    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.lock().await;
        let now = Utc::now();
        let valid = entries
            .values()
            .filter(|e| now - e.created_at < self.ttl)
            .count();
        CacheStats {
            valid_entries: valid,
            total_entries: entries.len(),
        }
    }

    #[cfg(test)]
    pub(crate) async fn insert_at(
        &self,
        handle: &str,
        analysis: ProfileAnalysis,
        created_at: DateTime<Utc>,
    ) {
        let mut entries = self.entries.lock().await;
        entries.insert(handle.to_string(), CacheEntry { analysis, created_at });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityPattern, CollaborationStats, ExperienceLevel};

    fn dummy_analysis(username: &str) -> ProfileAnalysis {
        ProfileAnalysis {
            username: username.to_string(),
            name: None,
            avatar_url: String::new(),
            bio: None,
            location: None,
            company: None,
            blog: None,
            twitter: None,
            email: None,
            hireable: None,
            created_at: Utc::now(),
            account_age_years: 0.0,
            profile_url: String::new(),
            languages: Vec::new(),
            primary_language: None,
            top_repos: Vec::new(),
            total_stars: 0,
            total_forks: 0,
            activity: ActivityPattern {
                most_active_day: "Monday".to_string(),
                most_active_hour: 12,
                consistency_score: 0.0,
            },
            collaboration: CollaborationStats {
                public_repos: 0,
                public_gists: 0,
                followers: 0,
                following: 0,
                follower_ratio: 0.0,
                organizations: Vec::new(),
            },
            growth_timeline: Vec::new(),
            overall_score: 0.0,
            experience_level: ExperienceLevel::Junior,
            focus_areas: Vec::new(),
            recruiter_summary: String::new(),
        }
    }

    #[tokio::test]
    async fn fresh_entries_are_returned() {
        let cache = AnalysisCache::new(3600);
        cache.insert("octocat", dummy_analysis("octocat")).await;
        assert!(cache.get("octocat").await.is_some());
        assert!(cache.get("someone-else").await.is_none());
    }

    #[tokio::test]
    async fn expired_entries_read_as_absent() {
        let cache = AnalysisCache::new(3600);
        let stale = Utc::now() - Duration::seconds(3601);
        cache.insert_at("octocat", dummy_analysis("octocat"), stale).await;
        assert!(cache.get("octocat").await.is_none());
        // The lazy sweep removed it entirely.
        assert_eq!(cache.stats().await.total_entries, 0);
    }

    #[tokio::test]
    async fn stats_distinguish_valid_from_total() {
        let cache = AnalysisCache::new(3600);
        cache.insert("fresh", dummy_analysis("fresh")).await;
        let stale = Utc::now() - Duration::seconds(7200);
        cache.insert_at("stale", dummy_analysis("stale"), stale).await;

        let stats = cache.stats().await;
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.valid_entries, 1);
    }

    #[tokio::test]
    async fn clear_reports_removed_count() {
        let cache = AnalysisCache::new(3600);
        cache.insert("a", dummy_analysis("a")).await;
        cache.insert("b", dummy_analysis("b")).await;
        assert_eq!(cache.clear().await, 2);
        assert!(cache.get("a").await.is_none());
        assert_eq!(cache.stats().await.total_entries, 0);
    }
}
