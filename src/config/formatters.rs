use chrono::{DateTime, Utc};

/// Map arbitrary title text to a lowercase, hyphen-delimited, ASCII alphanumeric slug
///
/// Every run of non-alphanumeric characters collapses to one hyphen; no leading or trailing hyphen.
///
/// ```
/// use chat_reader::config::slugify;
///
/// assert_eq!(slugify("Chat-2024-01-15"), "chat-2024-01-15");
/// assert_eq!(slugify("  Fix the  Docker build!  "), "fix-the-docker-build");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// `YYYY-MM-DD` calendar date (UTC)
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The formatting helpers threaded through normalization and rendering
#[derive(Debug, Clone, Copy)]
pub struct Formatters {
    pub filename: fn(&str) -> String,
    pub date: fn(&DateTime<Utc>) -> String,
}

impl Default for Formatters {
    fn default() -> Self {
        Self { filename: slugify, date: format_date }
    }
}
