//! Domain entities - the core business objects.

mod comment;
mod import;
mod message;
mod podcast;
mod poll;
mod post;
mod reaction;
pub mod search;
pub mod text;

use uuid::Uuid;

use crate::error::DomainError;

pub use comment::{Comment, CommentVote, NewComment};
pub use import::{CommentImport, ImportSummary, PostImport};
pub use message::{Message, NewMessage};
pub use podcast::{EpisodeTimestamp, NewPodcast, PodcastComment, PodcastEpisode};
pub use poll::{NewPoll, Poll, PollOption};
pub use post::{BlogPost, NewPost};
pub use reaction::{ReactionCounts, ReactionKind};
pub use search::{CategorySummary, Pagination, PostQuery};

/// Entities stored under a UUID primary key.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Reject a required form field that is empty or whitespace.
pub(crate) fn require(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
