//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ----------------------------------------------------------------------
// Admin session
// ----------------------------------------------------------------------

/// Request to open an admin session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub pin: String,
}

/// Response containing an admin access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

// ----------------------------------------------------------------------
// Listing and search
// ----------------------------------------------------------------------

/// Query string for `GET /api/posts`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// Query string for `GET /api/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// One page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
}

/// Card-sized view of a post for listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub image: Option<String>,
    pub category: String,
    pub category_slug: String,
    pub tags: Vec<String>,
    pub author: String,
    pub published_date: DateTime<Utc>,
    /// e.g. "January 5, 2026"
    pub formatted_date: String,
    pub reading_time_minutes: u32,
    pub comment_count: usize,
    pub reaction_count: i64,
}

// ----------------------------------------------------------------------
// Visitor actions
// ----------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionRequest {
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRequest {
    pub option_index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageRequest {
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageResponse {
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarksResponse {
    pub post_ids: Vec<Uuid>,
}

/// Whether a popup is currently suppressed for the visitor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopupStatus {
    pub name: String,
    pub dismissed: bool,
    pub dismissed_at: Option<DateTime<Utc>>,
}

// ----------------------------------------------------------------------
// Admin inbox
// ----------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageReplyRequest {
    pub reply: String,
}

// ----------------------------------------------------------------------
// Seed import function
// ----------------------------------------------------------------------

/// Body of `POST /api/functions/import-initial-posts`.
///
/// Posts stay untyped here so a malformed entry can be reported by index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportPostsRequest {
    #[serde(default)]
    pub pin: String,
    #[serde(default)]
    pub posts: Vec<serde_json::Value>,
}

/// `{ "success": true, ... }` or `{ "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImportResponse {
    Success {
        success: bool,
        posts: usize,
        comments: usize,
    },
    Failure {
        error: String,
    },
}

impl ImportResponse {
    pub fn success(posts: usize, comments: usize) -> Self {
        Self::Success {
            success: true,
            posts,
            comments,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::Failure {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_response_shapes() {
        let ok = serde_json::to_value(ImportResponse::success(2, 5)).unwrap();
        assert_eq!(
            ok,
            serde_json::json!({"success": true, "posts": 2, "comments": 5})
        );

        let failed = serde_json::to_value(ImportResponse::error("Invalid PIN")).unwrap();
        assert_eq!(failed, serde_json::json!({"error": "Invalid PIN"}));
    }

    #[test]
    fn test_list_query_defaults() {
        let query: ListQuery = serde_json::from_str("{}").unwrap();
        assert!(query.q.is_none());
        assert!(query.page.is_none());
    }
}
