//! Per-visitor convenience state: bookmarks, language, reaction and vote
//! flags, popup dismissals.
//!
//! None of this is content. It lives in the cache, keyed by an anonymous
//! visitor id, and losing it only means a visitor sees a popup again. Every
//! entry expires: popups after the suppression window, everything else after
//! the retention period, so abandoned visitor ids do not pile up.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::domain::ReactionKind;
use crate::error::DomainError;
use crate::ports::{Cache, CacheError};

pub const DEFAULT_LANGUAGE: &str = "en";

pub struct VisitorState {
    cache: Arc<dyn Cache>,
    popup_suppression: Duration,
    retention: Duration,
}

fn key(visitor: Uuid, suffix: &str) -> String {
    format!("visitor:{}:{}", visitor, suffix)
}

impl VisitorState {
    /// `popup_suppression` is how long a dismissed popup stays hidden;
    /// `retention` is how long any other visitor entry outlives its last write.
    pub fn new(cache: Arc<dyn Cache>, popup_suppression: Duration, retention: Duration) -> Self {
        Self {
            cache,
            popup_suppression,
            retention,
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.cache.get(key).await?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding unreadable visitor state");
                None
            }
        }
    }

    async fn write_json<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> Result<(), DomainError> {
        let raw =
            serde_json::to_string(value).map_err(|e| CacheError::Serialization(e.to_string()))?;
        self.cache.set(key, &raw, Some(ttl)).await?;
        Ok(())
    }

    // Bookmarks

    pub async fn bookmarks(&self, visitor: Uuid) -> Vec<Uuid> {
        self.read_json(&key(visitor, "bookmarks"))
            .await
            .unwrap_or_default()
    }

    /// Bookmark a post; bookmarking twice is a no-op.
    pub async fn add_bookmark(&self, visitor: Uuid, post_id: Uuid) -> Result<Vec<Uuid>, DomainError> {
        let mut bookmarks = self.bookmarks(visitor).await;
        if !bookmarks.contains(&post_id) {
            bookmarks.push(post_id);
            self.write_json(&key(visitor, "bookmarks"), &bookmarks, self.retention)
                .await?;
        }
        Ok(bookmarks)
    }

    pub async fn remove_bookmark(
        &self,
        visitor: Uuid,
        post_id: Uuid,
    ) -> Result<Vec<Uuid>, DomainError> {
        let mut bookmarks = self.bookmarks(visitor).await;
        let before = bookmarks.len();
        bookmarks.retain(|id| *id != post_id);
        if bookmarks.len() != before {
            self.write_json(&key(visitor, "bookmarks"), &bookmarks, self.retention)
                .await?;
        }
        Ok(bookmarks)
    }

    // Language

    pub async fn language(&self, visitor: Uuid) -> String {
        self.cache
            .get(&key(visitor, "language"))
            .await
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
    }

    /// Store a two-letter language code, normalised to lowercase.
    pub async fn set_language(&self, visitor: Uuid, code: &str) -> Result<String, DomainError> {
        let code = code.trim().to_ascii_lowercase();
        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(DomainError::Validation(format!(
                "'{}' is not a two-letter language code",
                code
            )));
        }
        self.cache
            .set(&key(visitor, "language"), &code, Some(self.retention))
            .await?;
        Ok(code)
    }

    // Reactions and votes

    pub async fn has_reacted(&self, visitor: Uuid, post_id: Uuid, kind: ReactionKind) -> bool {
        self.cache
            .exists(&key(visitor, &format!("reaction:{}:{}", post_id, kind)))
            .await
    }

    /// Record that the visitor reacted with `kind`. Returns false when the
    /// flag was already set, in which case nothing changes.
    pub async fn claim_reaction(
        &self,
        visitor: Uuid,
        post_id: Uuid,
        kind: ReactionKind,
    ) -> Result<bool, DomainError> {
        let key = key(visitor, &format!("reaction:{}:{}", post_id, kind));
        Ok(self
            .cache
            .set_if_absent(&key, "1", Some(self.retention))
            .await?)
    }

    /// Undo a claim whose reaction could not be stored.
    pub async fn release_reaction(
        &self,
        visitor: Uuid,
        post_id: Uuid,
        kind: ReactionKind,
    ) -> Result<(), DomainError> {
        self.cache
            .delete(&key(visitor, &format!("reaction:{}:{}", post_id, kind)))
            .await?;
        Ok(())
    }

    /// Reactions this visitor has already left on a post.
    pub async fn reactions_on(&self, visitor: Uuid, post_id: Uuid) -> Vec<ReactionKind> {
        let mut kinds = Vec::new();
        for kind in ReactionKind::ALL {
            if self.has_reacted(visitor, post_id, kind).await {
                kinds.push(kind);
            }
        }
        kinds
    }

    pub async fn has_voted(&self, visitor: Uuid, poll_id: Uuid) -> bool {
        self.cache
            .exists(&key(visitor, &format!("poll:{}", poll_id)))
            .await
    }

    /// Record that the visitor voted in a poll. Returns false when the flag
    /// was already set.
    pub async fn claim_vote(&self, visitor: Uuid, poll_id: Uuid) -> Result<bool, DomainError> {
        Ok(self
            .cache
            .set_if_absent(&key(visitor, &format!("poll:{}", poll_id)), "1", Some(self.retention))
            .await?)
    }

    /// Undo a claim whose vote could not be counted.
    pub async fn release_vote(&self, visitor: Uuid, poll_id: Uuid) -> Result<(), DomainError> {
        self.cache
            .delete(&key(visitor, &format!("poll:{}", poll_id)))
            .await?;
        Ok(())
    }

    // Popups

    /// When the visitor dismissed `popup`, while the dismissal is still in force.
    pub async fn popup_dismissed_at(&self, visitor: Uuid, popup: &str) -> Option<DateTime<Utc>> {
        self.read_json(&key(visitor, &format!("popup:{}", popup)))
            .await
    }

    pub async fn dismiss_popup(
        &self,
        visitor: Uuid,
        popup: &str,
    ) -> Result<DateTime<Utc>, DomainError> {
        let popup = popup.trim();
        if popup.is_empty() {
            return Err(DomainError::Validation("popup name is required".to_string()));
        }
        let now = Utc::now();
        self.write_json(
            &key(visitor, &format!("popup:{}", popup)),
            &now,
            self.popup_suppression,
        )
        .await?;
        Ok(now)
    }
}
