//! Pure metric extractors. Every function here is deterministic over its
//! inputs and does no I/O; the orchestrator supplies `now` so results are
//! reproducible in tests.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::models::{
    ActivityPattern, CollaborationStats, Event, GitHubUser, GrowthPoint, LanguageStat,
    Organization, RepoHighlight, Repository,
};
use crate::taxonomy::{language_color, FOCUS_RULES};

/// Languages below this share fold into an implicit "other" bucket.
const MIN_LANGUAGE_SHARE: f64 = 1.0;

/// At most this many languages are listed; the total still reflects all.
const MAX_LANGUAGES: usize = 6;

/// Focus-area tags reported per profile.
const MAX_FOCUS_AREAS: usize = 3;

const SECONDS_PER_WEEK: i64 = 7 * 24 * 3600;

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Aggregates per-repository language byte counts into a byte-weighted
/// distribution. Repositories without byte data fall back to counting each
/// repo's primary language once, so profiles still get a distribution when
/// the language endpoint yielded nothing.
pub fn aggregate_languages(
    repos: &[Repository],
    byte_maps: &HashMap<String, HashMap<String, u64>>,
) -> Vec<LanguageStat> {
    let mut totals: HashMap<String, u64> = HashMap::new();

    for repo in repos {
        if let Some(languages) = byte_maps.get(&repo.name) {
            for (language, bytes) in languages {
                *totals.entry(language.clone()).or_insert(0) += bytes;
            }
        }
    }

    if totals.is_empty() {
        for repo in repos {
            if let Some(language) = &repo.language {
                *totals.entry(language.clone()).or_insert(0) += 1;
            }
        }
    }

    let grand_total: u64 = totals.values().sum();
    if grand_total == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(String, u64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    ranked
        .into_iter()
        .filter_map(|(name, bytes)| {
            // Floored to one decimal so the displayed percentages can never
            // sum past 100.
            let percentage = floor1(bytes as f64 / grand_total as f64 * 100.0);
            if percentage < MIN_LANGUAGE_SHARE {
                return None;
            }
            let color = language_color(&name).to_string();
            Some(LanguageStat {
                name,
                percentage,
                bytes,
                color,
            })
        })
        .take(MAX_LANGUAGES)
        .collect()
}

/// Buckets event timestamps by weekday and hour-of-day; the mode of each
/// bucketing is the most active day/hour. Consistency is the share of weeks
/// between the earliest observed event and `now` that contain at least one
/// event, scaled to 0-100.
pub fn analyze_activity(events: &[Event], now: DateTime<Utc>) -> ActivityPattern {
    if events.is_empty() {
        return ActivityPattern {
            most_active_day: "Monday".to_string(),
            most_active_hour: 12,
            consistency_score: 0.0,
        };
    }

    let mut day_counts = [0u32; 7];
    let mut hour_counts = [0u32; 24];
    let mut active_weeks = HashSet::new();
    let mut earliest_week = i64::MAX;

    for event in events {
        day_counts[event.created_at.weekday().num_days_from_monday() as usize] += 1;
        hour_counts[event.created_at.hour() as usize] += 1;

        let week = event.created_at.timestamp().div_euclid(SECONDS_PER_WEEK);
        active_weeks.insert(week);
        earliest_week = earliest_week.min(week);
    }

    let most_active_day = DAY_NAMES[mode_index(&day_counts)].to_string();
    let most_active_hour = mode_index(&hour_counts) as u32;

    let current_week = now.timestamp().div_euclid(SECONDS_PER_WEEK);
    let window_weeks = (current_week - earliest_week + 1).max(1);
    let consistency = (active_weeks.len() as f64 / window_weeks as f64 * 100.0).min(100.0);

    ActivityPattern {
        most_active_day,
        most_active_hour,
        consistency_score: round1(consistency),
    }
}

/// First maximum wins, so ties resolve deterministically toward the earlier
/// bucket.
fn mode_index(counts: &[u32]) -> usize {
    counts
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Repositories created per year, ascending, with one zero-filled entry for
/// every year from the first repository to `current_year` inclusive.
pub fn build_growth_timeline(repos: &[Repository], current_year: i32) -> Vec<GrowthPoint> {
    if repos.is_empty() {
        return Vec::new();
    }

    let mut by_year: BTreeMap<i32, u32> = BTreeMap::new();
    for repo in repos {
        *by_year.entry(repo.created_at.year()).or_insert(0) += 1;
    }

    let first_year = *by_year.keys().next().unwrap_or(&current_year);
    let last_year = current_year.max(*by_year.keys().last().unwrap_or(&current_year));

    (first_year..=last_year)
        .map(|year| GrowthPoint {
            year,
            repos_created: by_year.get(&year).copied().unwrap_or(0),
        })
        .collect()
}

/// Ranks original (non-fork, non-archived) repositories by stars, then
/// forks, then push recency, capped at `limit`.
pub fn top_repositories(repos: &[Repository], limit: usize) -> Vec<RepoHighlight> {
    let mut originals: Vec<&Repository> =
        repos.iter().filter(|r| !r.fork && !r.archived).collect();

    originals.sort_by(|a, b| {
        b.stargazers_count
            .cmp(&a.stargazers_count)
            .then_with(|| b.forks_count.cmp(&a.forks_count))
            .then_with(|| b.pushed_at.cmp(&a.pushed_at))
    });

    originals
        .into_iter()
        .take(limit)
        .map(|repo| RepoHighlight {
            name: repo.name.clone(),
            description: repo.description.clone(),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            language: repo.language.clone(),
            url: repo.html_url.clone(),
        })
        .collect()
}

/// Applies the focus-area rule table; categories with enough matching
/// repositories are reported by descending match count.
pub fn detect_focus_areas(repos: &[Repository]) -> Vec<String> {
    let mut tagged: Vec<(&str, usize)> = FOCUS_RULES
        .iter()
        .filter_map(|rule| {
            let matches = repos.iter().filter(|r| rule.matches(r)).count();
            (matches >= rule.min_matches).then_some((rule.tag, matches))
        })
        .collect();

    tagged.sort_by(|a, b| b.1.cmp(&a.1));

    tagged
        .into_iter()
        .take(MAX_FOCUS_AREAS)
        .map(|(tag, _)| tag.to_string())
        .collect()
}

pub fn collaboration_stats(user: &GitHubUser, orgs: &[Organization]) -> CollaborationStats {
    let follower_ratio = user.followers as f64 / user.following.max(1) as f64;
    CollaborationStats {
        public_repos: user.public_repos,
        public_gists: user.public_gists,
        followers: user.followers,
        following: user.following,
        follower_ratio: round2(follower_ratio),
        organizations: orgs.iter().map(|o| o.login.clone()).collect(),
    }
}

pub fn account_age_years(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let age_days = (now - created_at).num_days().max(0) as f64;
    round1(age_days / 365.25)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn floor1(value: f64) -> f64 {
    (value * 10.0).floor() / 10.0
}
