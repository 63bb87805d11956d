use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One language's byte-weighted share of everything the account has written.
///
/// Entries for a profile sum to at most 100% and are sorted descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageStat {
    pub name: String,
    pub percentage: f64,
    pub bytes: u64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityPattern {
    pub most_active_day: String,
    /// Hour of day, 0-23 UTC.
    pub most_active_hour: u32,
    /// Share of observed weeks containing at least one event, 0-100.
    pub consistency_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub year: i32,
    pub repos_created: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoHighlight {
    pub name: String,
    pub description: Option<String>,
    pub stars: u32,
    pub forks: u32,
    pub language: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaborationStats {
    pub public_repos: u32,
    pub public_gists: u32,
    pub followers: u32,
    pub following: u32,
    pub follower_ratio: f64,
    pub organizations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    Junior,
    #[serde(rename = "Mid-Level")]
    Mid,
    Senior,
    Expert,
}

impl std::fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExperienceLevel::Junior => write!(f, "Junior"),
            ExperienceLevel::Mid => write!(f, "Mid-Level"),
            ExperienceLevel::Senior => write!(f, "Senior"),
            ExperienceLevel::Expert => write!(f, "Expert"),
        }
    }
}

/// The complete result of analyzing one profile. Built once per query,
/// never mutated afterwards; the cache hands out clones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileAnalysis {
    // Basic info
    pub username: String,
    pub name: Option<String>,
    pub avatar_url: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub blog: Option<String>,
    pub twitter: Option<String>,
    pub email: Option<String>,
    pub hireable: Option<bool>,

    // Account info
    pub created_at: DateTime<Utc>,
    pub account_age_years: f64,
    pub profile_url: String,

    // Technical skills
    pub languages: Vec<LanguageStat>,
    pub primary_language: Option<String>,

    // Top repositories
    pub top_repos: Vec<RepoHighlight>,
    pub total_stars: u64,
    pub total_forks: u64,

    // Activity & collaboration
    pub activity: ActivityPattern,
    pub collaboration: CollaborationStats,
    pub growth_timeline: Vec<GrowthPoint>,

    // Overall assessment
    pub overall_score: f64,
    pub experience_level: ExperienceLevel,
    pub focus_areas: Vec<String>,
    pub recruiter_summary: String,
}

/// Read-only mirror of the quota GitHub reported on the most recent response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitSnapshot {
    pub remaining: Option<u32>,
    pub limit: Option<u32>,
    pub reset_at: Option<DateTime<Utc>>,
    pub has_token: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CacheStats {
    pub valid_entries: usize,
    pub total_entries: usize,
}
