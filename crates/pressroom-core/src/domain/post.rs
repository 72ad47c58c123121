use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::comment::Comment;
use super::reaction::ReactionCounts;
use super::text;
use super::{Identifiable, require};
use crate::error::DomainError;

/// Post entity - a published blog article with its comment thread and reactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub image: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    pub author: String,
    pub published_date: DateTime<Utc>,
    /// Top-level comments, each carrying its replies.
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub reactions: ReactionCounts,
}

impl BlogPost {
    /// Create a post from validated input with a fresh id.
    pub fn new(input: NewPost) -> Self {
        let mut post = Self {
            id: Uuid::new_v4(),
            title: String::new(),
            slug: String::new(),
            excerpt: String::new(),
            content: String::new(),
            image: None,
            category: String::new(),
            tags: Vec::new(),
            author: String::new(),
            published_date: Utc::now(),
            comments: Vec::new(),
            reactions: ReactionCounts::default(),
        };
        post.apply(input);
        post
    }

    /// Overwrite the editable fields, keeping id, comments and reactions.
    pub fn apply(&mut self, input: NewPost) {
        self.slug = input.effective_slug();
        self.title = input.title.trim().to_string();
        self.excerpt = input.excerpt.trim().to_string();
        self.content = input.content;
        self.image = input.image.filter(|i| !i.trim().is_empty());
        self.category = input.category.trim().to_string();
        self.tags = input
            .tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        self.author = input.author.trim().to_string();
        if let Some(date) = input.published_date {
            self.published_date = date;
        }
    }

    pub fn category_slug(&self) -> String {
        text::slugify(&self.category)
    }

    pub fn reading_time_minutes(&self) -> u32 {
        text::reading_time_minutes(&self.content)
    }

    /// Number of comments including replies.
    pub fn comment_count(&self) -> usize {
        self.comments.iter().map(|c| 1 + c.replies.len()).sum()
    }

    /// Find a top-level comment or a reply anywhere in the thread.
    pub fn find_comment(&self, id: Uuid) -> Option<&Comment> {
        self.comments.iter().find_map(|c| {
            if c.id == id {
                Some(c)
            } else {
                c.replies.iter().find(|r| r.id == id)
            }
        })
    }
}

impl Identifiable for BlogPost {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Input for creating or replacing a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    #[serde(default)]
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    #[serde(default)]
    pub image: Option<String>,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub author: String,
    #[serde(default)]
    pub published_date: Option<DateTime<Utc>>,
}

impl NewPost {
    pub fn validate(&self) -> Result<(), DomainError> {
        require("title", &self.title)?;
        require("excerpt", &self.excerpt)?;
        require("content", &self.content)?;
        require("category", &self.category)?;
        require("author", &self.author)?;
        if self.effective_slug().is_empty() {
            return Err(DomainError::Validation(
                "slug must contain at least one letter or digit".to_string(),
            ));
        }
        Ok(())
    }

    /// The explicit slug when given, otherwise one derived from the title.
    pub fn effective_slug(&self) -> String {
        if self.slug.trim().is_empty() {
            text::slugify(&self.title)
        } else {
            text::slugify(&self.slug)
        }
    }
}
