//! Turns a free-form query into a canonical GitHub login.
//!
//! Accepted shapes: a bare login, a `github.com/<login>` profile URL, or an
//! email address whose local part is tried as a candidate login. Resolution
//! is a pure string transform; no network calls are made here.

use crate::error::{Error, Result};

/// GitHub logins are at most 39 characters.
const MAX_HANDLE_LEN: usize = 39;

/// Upper bound on raw query size before any parsing is attempted.
const MAX_QUERY_LEN: usize = 256;

pub fn resolve_handle(query: &str) -> Result<String> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("query is empty".to_string()));
    }
    if trimmed.len() > MAX_QUERY_LEN {
        return Err(Error::InvalidInput(format!(
            "query exceeds {} characters",
            MAX_QUERY_LEN
        )));
    }

    let candidate = if let Some(login) = profile_url_login(trimmed) {
        login
    } else if let Some((local, domain)) = trimmed.split_once('@') {
        // Email fallback: the local part is tried as a login.
        if local.is_empty() || domain.is_empty() {
            return Err(Error::InvalidInput(format!("not a usable email: {}", trimmed)));
        }
        local
    } else {
        trimmed
    };

    let handle = candidate.trim().to_ascii_lowercase();
    validate_handle(&handle)?;
    Ok(handle)
}

/// Extracts the first path segment of a `github.com` profile URL.
/// Scheme and a leading `www.` are optional. Returns `None` for anything
/// that is not a GitHub URL, leaving rejection to handle validation.
fn profile_url_login(query: &str) -> Option<&str> {
    let rest = query
        .strip_prefix("https://")
        .or_else(|| query.strip_prefix("http://"))
        .unwrap_or(query);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    let path = rest.strip_prefix("github.com/")?;
    path.split(['/', '?', '#']).next().filter(|s| !s.is_empty())
}

fn validate_handle(handle: &str) -> Result<()> {
    if handle.is_empty() {
        return Err(Error::InvalidInput("no login found in query".to_string()));
    }
    if handle.len() > MAX_HANDLE_LEN {
        return Err(Error::InvalidInput(format!(
            "login exceeds {} characters: {}",
            MAX_HANDLE_LEN, handle
        )));
    }
    if handle.starts_with('-') || handle.ends_with('-') || handle.contains("--") {
        return Err(Error::InvalidInput(format!("not a valid login: {}", handle)));
    }
    // Anything outside the login alphabet also covers path traversal and
    // protocol injection ('/', '\', '.', ':', quotes, whitespace).
    if !handle.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(Error::InvalidInput(format!(
            "login contains invalid characters: {}",
            handle
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bare_login() {
        assert_eq!(resolve_handle("Torvalds").unwrap(), "torvalds");
        assert_eq!(resolve_handle("  octo-cat  ").unwrap(), "octo-cat");
    }

    #[test]
    fn accepts_profile_urls() {
        assert_eq!(resolve_handle("https://github.com/Torvalds").unwrap(), "torvalds");
        assert_eq!(resolve_handle("http://www.github.com/rust-lang/").unwrap(), "rust-lang");
        assert_eq!(resolve_handle("github.com/octocat?tab=repos").unwrap(), "octocat");
    }

    #[test]
    fn email_local_part_is_tried_as_login() {
        assert_eq!(resolve_handle("Octocat@example.com").unwrap(), "octocat");
    }

    #[test]
    fn rejects_empty_and_overlong() {
        assert!(matches!(resolve_handle(""), Err(Error::InvalidInput(_))));
        assert!(matches!(resolve_handle("   "), Err(Error::InvalidInput(_))));
        let long = "a".repeat(40);
        assert!(matches!(resolve_handle(&long), Err(Error::InvalidInput(_))));
        let huge = "a".repeat(300);
        assert!(matches!(resolve_handle(&huge), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn rejects_injection_attempts() {
        assert!(matches!(resolve_handle("\"; DROP"), Err(Error::InvalidInput(_))));
        assert!(matches!(resolve_handle("../../etc/passwd"), Err(Error::InvalidInput(_))));
        assert!(matches!(resolve_handle("javascript:alert(1)"), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn rejects_non_github_urls() {
        assert!(matches!(
            resolve_handle("https://gitlab.com/someone"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_malformed_logins() {
        assert!(matches!(resolve_handle("-leading"), Err(Error::InvalidInput(_))));
        assert!(matches!(resolve_handle("trailing-"), Err(Error::InvalidInput(_))));
        assert!(matches!(resolve_handle("dou--ble"), Err(Error::InvalidInput(_))));
    }
}
