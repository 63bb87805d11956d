//! Recruiter-facing summary text. Purely template-driven: identical inputs
//! always produce identical output.

use crate::models::{
    ActivityPattern, CollaborationStats, ExperienceLevel, GitHubUser, LanguageStat,
};

pub fn recruiter_summary(
    user: &GitHubUser,
    level: ExperienceLevel,
    account_age_years: f64,
    focus_areas: &[String],
    languages: &[LanguageStat],
    repo_count: usize,
    total_stars: u64,
    collaboration: &CollaborationStats,
    activity: &ActivityPattern,
) -> String {
    let name = user.name.as_deref().unwrap_or(&user.login);
    let mut summary = String::new();

    summary.push_str(&format!(
        "{} is a {}-level developer",
        name,
        level.to_string().to_lowercase()
    ));
    if account_age_years >= 1.0 {
        summary.push_str(&format!(" with {:.0}+ years on GitHub", account_age_years));
    }
    if !focus_areas.is_empty() {
        let shown = focus_areas.iter().take(2).cloned().collect::<Vec<_>>();
        summary.push_str(&format!(", focusing on {}", shown.join(", ")));
    }
    summary.push_str(". ");

    if !languages.is_empty() {
        let top: Vec<&str> = languages.iter().take(3).map(|l| l.name.as_str()).collect();
        summary.push_str(&format!("Primary expertise in {}. ", top.join(", ")));
    }

    if total_stars > 0 {
        summary.push_str(&format!(
            "Has earned {} stars across {} public repositories. ",
            total_stars, repo_count
        ));
    }

    if collaboration.followers >= 10 {
        summary.push_str(&format!(
            "Active community member with {} followers",
            collaboration.followers
        ));
        if !collaboration.organizations.is_empty() {
            summary.push_str(&format!(
                " and contributions to {} organizations",
                collaboration.organizations.len()
            ));
        }
        summary.push_str(". ");
    }

    summary.push_str(&format!("Most active on {}s", activity.most_active_day));
    summary.push_str(match activity.most_active_hour {
        0..=11 => " (morning coder).",
        12..=17 => " (afternoon coder).",
        _ => " (evening coder).",
    });

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn user(name: Option<&str>) -> GitHubUser {
        GitHubUser {
            login: "octocat".to_string(),
            id: 1,
            name: name.map(String::from),
            email: None,
            avatar_url: String::new(),
            html_url: String::new(),
            bio: None,
            company: None,
            location: None,
            blog: None,
            twitter_username: None,
            hireable: None,
            public_repos: 8,
            public_gists: 0,
            followers: 120,
            following: 10,
            created_at: Utc.with_ymd_and_hms(2015, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn fixture() -> (CollaborationStats, ActivityPattern, Vec<LanguageStat>) {
        let collaboration = CollaborationStats {
            public_repos: 8,
            public_gists: 0,
            followers: 120,
            following: 10,
            follower_ratio: 12.0,
            organizations: vec!["rust-lang".to_string()],
        };
        let activity = ActivityPattern {
            most_active_day: "Tuesday".to_string(),
            most_active_hour: 21,
            consistency_score: 80.0,
        };
        let languages = vec![LanguageStat {
            name: "Rust".to_string(),
            percentage: 88.0,
            bytes: 1000,
            color: "#dea584".to_string(),
        }];
        (collaboration, activity, languages)
    }

    #[test]
    fn summary_is_deterministic() {
        let (collab, activity, languages) = fixture();
        let focus = vec!["Systems Programming".to_string()];

        let a = recruiter_summary(
            &user(Some("Ferris")),
            ExperienceLevel::Senior,
            9.0,
            &focus,
            &languages,
            8,
            300,
            &collab,
            &activity,
        );
        let b = recruiter_summary(
            &user(Some("Ferris")),
            ExperienceLevel::Senior,
            9.0,
            &focus,
            &languages,
            8,
            300,
            &collab,
            &activity,
        );

        assert_eq!(a, b);
        assert!(a.starts_with("Ferris is a senior-level developer"));
        assert!(a.contains("9+ years on GitHub"));
        assert!(a.contains("focusing on Systems Programming"));
        assert!(a.contains("Primary expertise in Rust"));
        assert!(a.contains("300 stars across 8 public repositories"));
        assert!(a.contains("120 followers and contributions to 1 organizations"));
        assert!(a.ends_with("Most active on Tuesdays (evening coder)."));
    }

    #[test]
    fn empty_profile_still_gets_a_summary() {
        let activity = ActivityPattern {
            most_active_day: "Monday".to_string(),
            most_active_hour: 12,
            consistency_score: 0.0,
        };
        let collab = CollaborationStats {
            public_repos: 0,
            public_gists: 0,
            followers: 0,
            following: 0,
            follower_ratio: 0.0,
            organizations: Vec::new(),
        };

        let text = recruiter_summary(
            &user(None),
            ExperienceLevel::Junior,
            0.2,
            &[],
            &[],
            0,
            0,
            &collab,
            &activity,
        );

        assert!(text.starts_with("octocat is a junior-level developer. "));
        assert!(text.contains("Most active on Mondays (afternoon coder)."));
    }
}
