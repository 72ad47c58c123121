//! Bulk import of seed posts.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::comment::{Comment, NewComment};
use super::post::NewPost;
use crate::error::DomainError;

/// Namespace for ids of imported comments, so re-imports hit the same rows.
const IMPORT_NAMESPACE: Uuid = Uuid::from_u128(0x7072_6573_7372_6f6f_6d2d_696d_706f_7274);

/// A post to import together with its existing comment thread.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostImport {
    #[serde(flatten)]
    pub post: NewPost,
    #[serde(default)]
    pub comments: Vec<CommentImport>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentImport {
    pub name: String,
    pub content: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub likes: i32,
    #[serde(default)]
    pub dislikes: i32,
    #[serde(default)]
    pub replies: Vec<CommentImport>,
}

impl PostImport {
    pub fn validate(&self) -> Result<(), DomainError> {
        self.post.validate()?;
        for comment in &self.comments {
            comment.validate()?;
        }
        Ok(())
    }

    /// Flatten the thread into storable comments for the stored post.
    ///
    /// Ids derive from the post slug and thread position. A comment without a
    /// date keeps the one in `stored_dates` for its id, if any, so re-imports
    /// do not move it.
    pub fn comments_for(
        &self,
        post_id: Uuid,
        slug: &str,
        stored_dates: &HashMap<Uuid, DateTime<Utc>>,
    ) -> Vec<Comment> {
        let mut flat = Vec::new();
        for (i, root) in self.comments.iter().enumerate() {
            let root_id = Uuid::new_v5(&IMPORT_NAMESPACE, format!("{}/{}", slug, i).as_bytes());
            flat.push(root.to_comment(root_id, post_id, None, stored_dates));
            for (j, reply) in root.replies.iter().enumerate() {
                let reply_id =
                    Uuid::new_v5(&IMPORT_NAMESPACE, format!("{}/{}/{}", slug, i, j).as_bytes());
                flat.push(reply.to_comment(reply_id, post_id, Some(root_id), stored_dates));
            }
        }
        flat
    }
}

impl CommentImport {
    fn validate(&self) -> Result<(), DomainError> {
        NewComment {
            name: self.name.clone(),
            content: self.content.clone(),
        }
        .validate()?;
        for reply in &self.replies {
            reply.validate()?;
        }
        Ok(())
    }

    fn to_comment(
        &self,
        id: Uuid,
        post_id: Uuid,
        parent_id: Option<Uuid>,
        stored_dates: &HashMap<Uuid, DateTime<Utc>>,
    ) -> Comment {
        Comment {
            id,
            post_id,
            parent_id,
            name: self.name.trim().to_string(),
            content: self.content.trim().to_string(),
            date: self
                .date
                .or_else(|| stored_dates.get(&id).copied())
                .unwrap_or_else(Utc::now),
            likes: self.likes.max(0),
            dislikes: self.dislikes.max(0),
            replies: Vec::new(),
        }
    }
}

/// Outcome of an import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub posts: usize,
    pub comments: usize,
}
