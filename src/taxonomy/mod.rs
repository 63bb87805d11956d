//! Fixed vocabulary the extractors match repository metadata against.

pub mod colors;

pub use colors::language_color;

use crate::models::Repository;

/// One focus-area category: a tag plus the language/topic keywords that
/// signal it. A category applies to a profile only when at least
/// `min_matches` repositories match, so a single experiment does not tag
/// an account.
pub struct FocusRule {
    pub tag: &'static str,
    pub keywords: &'static [&'static str],
    pub min_matches: usize,
}

impl FocusRule {
    /// A repository matches when its primary language or any of its topics
    /// appears in the keyword set (case-insensitive).
    pub fn matches(&self, repo: &Repository) -> bool {
        if let Some(lang) = &repo.language {
            if self.contains(lang) {
                return true;
            }
        }
        repo.topics.iter().any(|t| self.contains(t))
    }

    fn contains(&self, word: &str) -> bool {
        let lower = word.to_lowercase();
        self.keywords.iter().any(|k| *k == lower)
    }
}

pub const FOCUS_RULES: &[FocusRule] = &[
    FocusRule {
        tag: "Web Development",
        keywords: &[
            "javascript", "typescript", "html", "css", "vue", "react", "angular", "svelte",
            "php", "frontend", "webapp", "website", "nextjs",
        ],
        min_matches: 2,
    },
    FocusRule {
        tag: "Data Science",
        keywords: &[
            "python", "r", "jupyter notebook", "jupyter", "data-science", "machine-learning",
            "deep-learning", "pandas", "numpy",
        ],
        min_matches: 2,
    },
    FocusRule {
        tag: "Mobile Development",
        keywords: &[
            "swift", "kotlin", "dart", "java", "android", "ios", "flutter", "react-native",
        ],
        min_matches: 2,
    },
    FocusRule {
        tag: "Systems Programming",
        keywords: &[
            "c", "c++", "rust", "go", "zig", "systems", "embedded", "kernel", "compiler",
        ],
        min_matches: 2,
    },
    FocusRule {
        tag: "DevOps",
        keywords: &[
            "shell", "dockerfile", "hcl", "docker", "kubernetes", "terraform", "ansible",
            "ci-cd", "infrastructure",
        ],
        min_matches: 2,
    },
    FocusRule {
        tag: "Backend Development",
        keywords: &[
            "java", "python", "go", "ruby", "php", "c#", "api", "server", "backend",
            "microservices", "database",
        ],
        min_matches: 2,
    },
    FocusRule {
        tag: "Game Development",
        keywords: &[
            "c++", "c#", "gdscript", "game", "godot", "unity", "unreal", "gamedev",
        ],
        min_matches: 2,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn repo(language: Option<&str>, topics: &[&str]) -> Repository {
        Repository {
            name: "r".to_string(),
            description: None,
            language: language.map(String::from),
            html_url: "https://github.com/x/r".to_string(),
            stargazers_count: 0,
            forks_count: 0,
            created_at: Utc::now(),
            pushed_at: None,
            topics: topics.iter().map(|s| s.to_string()).collect(),
            fork: false,
            archived: false,
        }
    }

    #[test]
    fn matches_on_language_or_topic() {
        let rule = &FOCUS_RULES[0]; // Web Development
        assert!(rule.matches(&repo(Some("TypeScript"), &[])));
        assert!(rule.matches(&repo(Some("Rust"), &["frontend"])));
        assert!(!rule.matches(&repo(Some("Rust"), &["cli"])));
    }
}
