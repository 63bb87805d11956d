//! Composite score and experience tier.
//!
//! Five sub-scores, each clamped to its own cap before summation so no
//! single dimension can exceed its budget; the sum is clamped to [0, 100].

use crate::models::{ActivityPattern, ExperienceLevel, GitHubUser, LanguageStat, Repository};

const REPOSITORY_CAP: f64 = 25.0;
const STAR_CAP: f64 = 25.0;
const DIVERSITY_CAP: f64 = 15.0;
const ACTIVITY_CAP: f64 = 20.0;
const COMMUNITY_CAP: f64 = 15.0;

/// Star totals saturate at 10^4; log scaling keeps one viral repository
/// from dominating the dimension.
const STAR_LOG_CEILING: f64 = 4.0;

#[derive(Debug, Clone, Copy)]
pub struct ScoreBreakdown {
    pub repositories: f64,
    pub stars: f64,
    pub diversity: f64,
    pub activity: f64,
    pub community: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        let sum = self.repositories + self.stars + self.diversity + self.activity + self.community;
        (sum.clamp(0.0, 100.0) * 10.0).round() / 10.0
    }
}

pub fn score_profile(
    user: &GitHubUser,
    repos: &[Repository],
    languages: &[LanguageStat],
    activity: &ActivityPattern,
    organization_count: usize,
) -> ScoreBreakdown {
    ScoreBreakdown {
        repositories: repository_score(repos),
        stars: star_score(repos),
        diversity: diversity_score(languages),
        activity: activity_score(activity),
        community: community_score(user, organization_count),
    }
}

/// Non-fork repository count plus a small bonus for repos that carry a
/// description or topics.
fn repository_score(repos: &[Repository]) -> f64 {
    let originals = repos.iter().filter(|r| !r.fork);
    let mut score: f64 = 0.0;
    for repo in originals {
        score += 1.2;
        if repo.description.is_some() || !repo.topics.is_empty() {
            score += 0.3;
        }
    }
    score.min(REPOSITORY_CAP)
}

fn star_score(repos: &[Repository]) -> f64 {
    let total: u64 = repos.iter().map(|r| r.stargazers_count as u64).sum();
    if total == 0 {
        return 0.0;
    }
    let saturation = ((1.0 + total as f64).log10() / STAR_LOG_CEILING).min(1.0);
    saturation * STAR_CAP
}

/// Counts languages already holding a meaningful (>=1%) share.
fn diversity_score(languages: &[LanguageStat]) -> f64 {
    (languages.len() as f64 * 3.0).min(DIVERSITY_CAP)
}

fn activity_score(activity: &ActivityPattern) -> f64 {
    (activity.consistency_score * 0.2).min(ACTIVITY_CAP)
}

fn community_score(user: &GitHubUser, organization_count: usize) -> f64 {
    (user.followers as f64 / 10.0 + organization_count as f64 * 2.0).min(COMMUNITY_CAP)
}

/// The score band alone picks the level, except Expert also requires an
/// account at least five years old; a 70+ score on a younger account is
/// reported as Senior. Age never promotes above the score band.
pub fn experience_level(overall_score: f64, account_age_years: f64) -> ExperienceLevel {
    if overall_score >= 70.0 {
        if account_age_years >= 5.0 {
            ExperienceLevel::Expert
        } else {
            ExperienceLevel::Senior
        }
    } else if overall_score >= 50.0 {
        ExperienceLevel::Senior
    } else if overall_score >= 30.0 {
        ExperienceLevel::Mid
    } else {
        ExperienceLevel::Junior
    }
}
