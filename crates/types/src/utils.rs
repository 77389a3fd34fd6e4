//! Utility functions and helpers

/// Sanitize string for logging (remove sensitive data)
pub fn sanitize_for_logging(s: &str) -> String {
    let len = s.chars().count();
    if len <= 10 {
        return s.to_string();
    }

    // URLs keep their scheme and host, nothing after
    if let Some((scheme, rest)) = s.split_once("://") {
        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        let host = host.rsplit('@').next().unwrap_or_default();
        return format!("{}://{}/...", scheme, host);
    }

    let head: String = s.chars().take(6).collect();
    format!("{}...", head)
}

/// Split a comma-separated list without trimming or dropping empty tokens
pub fn split_csv(s: &str) -> Vec<&str> {
    s.split(',').collect()
}
