//! Response shapes built from domain entities.

use serde::Serialize;

use pressroom_core::domain::text::format_date;
use pressroom_core::domain::{BlogPost, Pagination, Poll, ReactionKind};
use pressroom_shared::dto::{Page, PostSummary};

pub fn summarize(post: &BlogPost) -> PostSummary {
    PostSummary {
        id: post.id,
        title: post.title.clone(),
        slug: post.slug.clone(),
        excerpt: post.excerpt.clone(),
        image: post.image.clone(),
        category: post.category.clone(),
        category_slug: post.category_slug(),
        tags: post.tags.clone(),
        author: post.author.clone(),
        published_date: post.published_date,
        formatted_date: format_date(&post.published_date),
        reading_time_minutes: post.reading_time_minutes(),
        comment_count: post.comment_count(),
        reaction_count: post.reactions.total(),
    }
}

/// Paginate posts into summaries.
pub fn page_of(posts: Vec<BlogPost>, pagination: Pagination) -> Page<PostSummary> {
    let (items, total) = pagination.apply(posts);
    Page {
        items: items.iter().map(summarize).collect(),
        page: pagination.page,
        per_page: pagination.per_page,
        total,
        total_pages: pagination.total_pages(total),
    }
}

/// A full post with derived display fields.
#[derive(Debug, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: BlogPost,
    pub category_slug: String,
    pub formatted_date: String,
    pub reading_time_minutes: u32,
    pub comment_count: usize,
    /// Reactions the requesting visitor already left.
    pub my_reactions: Vec<ReactionKind>,
    pub bookmarked: bool,
}

impl PostDetail {
    pub fn new(post: BlogPost, my_reactions: Vec<ReactionKind>, bookmarked: bool) -> Self {
        Self {
            category_slug: post.category_slug(),
            formatted_date: format_date(&post.published_date),
            reading_time_minutes: post.reading_time_minutes(),
            comment_count: post.comment_count(),
            post,
            my_reactions,
            bookmarked,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PollView {
    #[serde(flatten)]
    pub poll: Poll,
    pub total_votes: i64,
    pub percentages: Vec<u32>,
    pub has_voted: bool,
}

impl PollView {
    pub fn new(poll: Poll, has_voted: bool) -> Self {
        Self {
            total_votes: poll.total_votes(),
            percentages: poll.percentages(),
            poll,
            has_voted,
        }
    }
}
