//! Text helpers shared by listing and detail views.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

/// Average reading speed used for reading-time estimates.
pub const WORDS_PER_MINUTE: usize = 225;

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern is valid"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Remove markup from an HTML fragment and collapse whitespace.
pub fn strip_html(html: &str) -> String {
    let without_tags = TAG.replace_all(html, " ");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    WHITESPACE.replace_all(decoded.trim(), " ").into_owned()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Estimated minutes to read an HTML body: `ceil(words / 225)`.
pub fn reading_time_minutes(html: &str) -> u32 {
    let words = word_count(&strip_html(html));
    words.div_ceil(WORDS_PER_MINUTE) as u32
}

/// Shorten `text` to at most `max_chars` characters, appending `...` when cut.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim_end())
}

pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Long-form date, e.g. `January 5, 2026`.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Lowercase slug with single dashes between words.
///
/// Letters and digits from any script are kept, so `Новини` slugs to `новини`.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;

    for c in input.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else if matches!(c, '\'' | '\u{2019}' | '\u{02BC}') {
            // "Editor's Picks" -> "editors-picks"
            continue;
        } else {
            pending_dash = true;
        }
    }

    slug
}
