//! Post filtering, category summaries and pagination.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::post::BlogPost;
use super::text::slugify;

/// Filters applied to the post listing. Empty fields match everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostQuery {
    pub text: Option<String>,
    pub category_slug: Option<String>,
    pub tag: Option<String>,
}

impl PostQuery {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn category(slug: impl Into<String>) -> Self {
        Self {
            category_slug: Some(slug.into()),
            ..Default::default()
        }
    }

    pub fn matches(&self, post: &BlogPost) -> bool {
        if let Some(text) = non_blank(&self.text) {
            let needle = text.to_lowercase();
            let hit = post.title.to_lowercase().contains(&needle)
                || post.content.to_lowercase().contains(&needle)
                || post.excerpt.to_lowercase().contains(&needle)
                || post.tags.iter().any(|t| t.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if let Some(slug) = non_blank(&self.category_slug) {
            if post.category_slug() != slug {
                return false;
            }
        }

        if let Some(tag) = non_blank(&self.tag) {
            if !post.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                return false;
            }
        }

        true
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub const DEFAULT_PER_PAGE: usize = 9;
    pub const MAX_PER_PAGE: usize = 50;

    pub fn new(page: Option<usize>, per_page: Option<usize>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page
                .unwrap_or(Self::DEFAULT_PER_PAGE)
                .clamp(1, Self::MAX_PER_PAGE),
        }
    }

    /// Slice out the requested page, returning it with the total item count.
    pub fn apply<T>(&self, items: Vec<T>) -> (Vec<T>, usize) {
        let total = items.len();
        let start = (self.page - 1).saturating_mul(self.per_page);
        let page = items.into_iter().skip(start).take(self.per_page).collect();
        (page, total)
    }

    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.per_page)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// A category with the number of posts filed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub name: String,
    pub slug: String,
    pub count: usize,
}

pub fn category_summaries(posts: &[BlogPost]) -> Vec<CategorySummary> {
    let mut summaries: Vec<CategorySummary> = Vec::new();
    for post in posts {
        let slug = post.category_slug();
        match summaries.iter_mut().find(|s| s.slug == slug) {
            Some(summary) => summary.count += 1,
            None => summaries.push(CategorySummary {
                name: post.category.clone(),
                slug,
                count: 1,
            }),
        }
    }
    summaries.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    summaries
}

/// Posts related to `post_id`: same category ranks above shared tags.
///
/// `posts` is expected newest first; ties keep that order.
pub fn related_posts(posts: &[BlogPost], post_id: Uuid, limit: usize) -> Vec<BlogPost> {
    let Some(target) = posts.iter().find(|p| p.id == post_id) else {
        return Vec::new();
    };
    let category = slugify(&target.category);

    let mut scored: Vec<(usize, &BlogPost)> = posts
        .iter()
        .filter(|p| p.id != post_id)
        .filter_map(|p| {
            let mut score = 0;
            if p.category_slug() == category {
                score += 2;
            }
            if p
                .tags
                .iter()
                .any(|t| target.tags.iter().any(|tt| tt.eq_ignore_ascii_case(t)))
            {
                score += 1;
            }
            (score > 0).then_some((score, p))
        })
        .collect();

    // Stable sort keeps the newest-first order inside each score.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored
        .into_iter()
        .take(limit)
        .map(|(_, p)| p.clone())
        .collect()
}
