use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Identifiable, require};
use crate::error::DomainError;

/// Reader comment on a post. Replies are comments with a `parent_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub content: String,
    pub date: DateTime<Utc>,
    pub likes: i32,
    pub dislikes: i32,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

impl Comment {
    pub fn new(post_id: Uuid, parent_id: Option<Uuid>, input: NewComment) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            parent_id,
            name: input.name.trim().to_string(),
            content: input.content.trim().to_string(),
            date: Utc::now(),
            likes: 0,
            dislikes: 0,
            replies: Vec::new(),
        }
    }

    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    pub fn apply_vote(&mut self, vote: CommentVote) {
        match vote {
            CommentVote::Like => self.likes += 1,
            CommentVote::Dislike => self.dislikes += 1,
        }
    }

    /// Group a flat list of comments into top-level threads.
    ///
    /// Input order is preserved within each level. Replies whose parent is
    /// missing are promoted to the top level rather than dropped.
    pub fn into_threads(flat: Vec<Comment>) -> Vec<Comment> {
        let (mut roots, replies): (Vec<_>, Vec<_>) =
            flat.into_iter().partition(|c| c.parent_id.is_none());

        for reply in replies {
            let parent = reply.parent_id;
            match roots.iter_mut().find(|r| Some(r.id) == parent) {
                Some(root) => root.replies.push(reply),
                None => roots.push(reply),
            }
        }

        roots
    }
}

impl Identifiable for Comment {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentVote {
    Like,
    Dislike,
}

/// Comment form input, used for both comments and replies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewComment {
    pub name: String,
    pub content: String,
}

impl NewComment {
    pub fn validate(&self) -> Result<(), DomainError> {
        require("name", &self.name)?;
        require("content", &self.content)
    }
}
