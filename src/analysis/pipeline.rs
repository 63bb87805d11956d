//! Sequences one analysis: normalize, cache lookup, fetch, extract, score,
//! summarize, cache write. Errors propagate unchanged; nothing partial is
//! ever cached or returned.

use std::sync::Arc;

use chrono::{Datelike, Utc};

use crate::cache::AnalysisCache;
use crate::error::Result;
use crate::github::PlatformClient;
use crate::models::{ProfileAnalysis, RateLimitSnapshot};
use crate::query;

use super::{extract, score, summary};

const TOP_REPO_LIMIT: usize = 6;

pub struct ProfileAnalyzer {
    client: Arc<dyn PlatformClient>,
    cache: AnalysisCache,
}

impl ProfileAnalyzer {
    pub fn new(client: Arc<dyn PlatformClient>, cache: AnalysisCache) -> Self {
        Self { client, cache }
    }

    pub fn cache(&self) -> &AnalysisCache {
        &self.cache
    }

    pub async fn rate_limit(&self) -> RateLimitSnapshot {
        self.client.rate_limit().await
    }

    pub async fn analyze(&self, raw_query: &str) -> Result<ProfileAnalysis> {
        let handle = query::resolve_handle(raw_query)?;

        // The only path that skips recomputation: a fresh cached result is
        // returned without touching the platform at all.
        if let Some(hit) = self.cache.get(&handle).await {
            tracing::debug!("Serving {} from cache", handle);
            return Ok(hit);
        }

        tracing::info!("Analyzing profile: {}", handle);
        let user = self.client.fetch_user(&handle).await?;
        let repos = self.client.fetch_repositories(&handle).await?;
        let events = self.client.fetch_events(&handle).await?;
        let orgs = self.client.fetch_organizations(&handle).await?;
        let byte_maps = self.client.fetch_languages(&handle, &repos).await?;
        tracing::info!(
            "Fetched {} repos and {} events for {}",
            repos.len(),
            events.len(),
            handle
        );

        let now = Utc::now();
        let languages = extract::aggregate_languages(&repos, &byte_maps);
        let activity = extract::analyze_activity(&events, now);
        let growth_timeline = extract::build_growth_timeline(&repos, now.year());
        let top_repos = extract::top_repositories(&repos, TOP_REPO_LIMIT);
        let collaboration = extract::collaboration_stats(&user, &orgs);
        let focus_areas = extract::detect_focus_areas(&repos);
        let account_age_years = extract::account_age_years(user.created_at, now);

        let breakdown = score::score_profile(&user, &repos, &languages, &activity, orgs.len());
        let overall_score = breakdown.total();
        let experience_level = score::experience_level(overall_score, account_age_years);

        let total_stars: u64 = repos.iter().map(|r| r.stargazers_count as u64).sum();
        let total_forks: u64 = repos.iter().map(|r| r.forks_count as u64).sum();

        let recruiter_summary = summary::recruiter_summary(
            &user,
            experience_level,
            account_age_years,
            &focus_areas,
            &languages,
            repos.len(),
            total_stars,
            &collaboration,
            &activity,
        );

        let analysis = ProfileAnalysis {
            username: user.login,
            name: user.name,
            avatar_url: user.avatar_url,
            bio: user.bio,
            location: user.location,
            company: user.company,
            blog: user.blog,
            twitter: user.twitter_username,
            email: user.email,
            hireable: user.hireable,
            created_at: user.created_at,
            account_age_years,
            profile_url: user.html_url,
            primary_language: languages.first().map(|l| l.name.clone()),
            languages,
            top_repos,
            total_stars,
            total_forks,
            activity,
            collaboration,
            growth_timeline,
            overall_score,
            experience_level,
            focus_areas,
            recruiter_summary,
        };

        self.cache.insert(&handle, analysis.clone()).await;
        tracing::info!(
            "Analysis complete for {}: score {} ({})",
            handle,
            overall_score,
            experience_level
        );

        Ok(analysis)
    }
}
