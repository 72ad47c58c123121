use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    BlogPost, Comment, CommentVote, Message, PodcastComment, PodcastEpisode, Poll, ReactionCounts,
    ReactionKind,
};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Post repository. Loaded posts carry no comments or reactions.
#[async_trait]
pub trait PostRepository: BaseRepository<BlogPost, Uuid> {
    /// All posts, newest first.
    async fn list_all(&self) -> Result<Vec<BlogPost>, RepoError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, RepoError>;

    /// Insert, or overwrite the post that already owns `post.slug`.
    ///
    /// On overwrite the stored id is kept; the returned post carries it.
    async fn upsert_by_slug(&self, post: BlogPost) -> Result<BlogPost, RepoError>;
}

/// Post comments, stored flat with replies pointing at their parent.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments and replies of one post, oldest first.
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError>;

    /// Returns the number of rows removed.
    async fn delete_for_post(&self, post_id: Uuid) -> Result<u64, RepoError>;

    /// Add one like or dislike in place and return the stored comment.
    async fn increment_vote(&self, id: Uuid, vote: CommentVote) -> Result<Comment, RepoError>;
}

/// Reaction counters, one row per post.
#[async_trait]
pub trait ReactionRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<(Uuid, ReactionCounts)>, RepoError>;

    async fn find_for_post(&self, post_id: Uuid) -> Result<ReactionCounts, RepoError>;

    /// Add one reaction and return the updated counters.
    async fn increment(&self, post_id: Uuid, kind: ReactionKind)
    -> Result<ReactionCounts, RepoError>;

    async fn delete_for_post(&self, post_id: Uuid) -> Result<(), RepoError>;
}

#[async_trait]
pub trait PodcastRepository: BaseRepository<PodcastEpisode, Uuid> {
    /// All episodes, highest episode number first.
    async fn list_all(&self) -> Result<Vec<PodcastEpisode>, RepoError>;
}

#[async_trait]
pub trait PodcastCommentRepository: BaseRepository<PodcastComment, Uuid> {
    /// Comments of one episode, oldest first.
    async fn list_for_episode(&self, episode_id: Uuid) -> Result<Vec<PodcastComment>, RepoError>;

    async fn delete_for_episode(&self, episode_id: Uuid) -> Result<u64, RepoError>;
}

#[async_trait]
pub trait PollRepository: BaseRepository<Poll, Uuid> {
    /// All polls, newest first.
    async fn list_all(&self) -> Result<Vec<Poll>, RepoError>;

    /// Add one vote to an option in place and return the stored poll.
    async fn increment_vote(&self, id: Uuid, option_index: usize) -> Result<Poll, RepoError>;
}

#[async_trait]
pub trait MessageRepository: BaseRepository<Message, Uuid> {
    /// All messages, newest first.
    async fn list_all(&self) -> Result<Vec<Message>, RepoError>;
}

/// Storage for the admin PIN hash.
#[async_trait]
pub trait AdminAuthRepository: Send + Sync {
    async fn pin_hash(&self) -> Result<Option<String>, RepoError>;

    async fn set_pin_hash(&self, hash: &str) -> Result<(), RepoError>;
}
