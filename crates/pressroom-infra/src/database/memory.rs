//! In-memory repositories - used when no database is configured, and in tests.
//!
//! Note: Data is lost on process restart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use pressroom_core::domain::{
    BlogPost, Comment, CommentVote, Identifiable, Message, PodcastComment, PodcastEpisode, Poll,
    ReactionCounts, ReactionKind,
};
use pressroom_core::error::RepoError;
use pressroom_core::services::ContentRepositories;
use pressroom_core::ports::{
    AdminAuthRepository, BaseRepository, CommentRepository, MessageRepository,
    PodcastCommentRepository, PodcastRepository, PollRepository, PostRepository,
    ReactionRepository,
};

/// A full set of content repositories that live only in this process.
pub fn in_memory_repositories() -> ContentRepositories {
    ContentRepositories {
        posts: Arc::new(InMemoryRepository::<BlogPost>::new()),
        comments: Arc::new(InMemoryRepository::<Comment>::new()),
        reactions: Arc::new(InMemoryReactionRepository::new()),
        podcasts: Arc::new(InMemoryRepository::<PodcastEpisode>::new()),
        podcast_comments: Arc::new(InMemoryRepository::<PodcastComment>::new()),
        polls: Arc::new(InMemoryRepository::<Poll>::new()),
        messages: Arc::new(InMemoryRepository::<Message>::new()),
    }
}

/// Generic in-memory table keyed by entity id.
pub struct InMemoryRepository<T> {
    rows: RwLock<HashMap<Uuid, T>>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> InMemoryRepository<T> {
    /// Rows matching `keep`, ordered by `cmp`.
    async fn select<F, C>(&self, keep: F, cmp: C) -> Vec<T>
    where
        F: Fn(&T) -> bool,
        C: FnMut(&T, &T) -> std::cmp::Ordering,
    {
        let rows = self.rows.read().await;
        let mut selected: Vec<T> = rows.values().filter(|r| keep(r)).cloned().collect();
        selected.sort_by(cmp);
        selected
    }

    async fn delete_where<F>(&self, matches: F) -> u64
    where
        F: Fn(&T) -> bool,
    {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|_, row| !matches(row));
        (before - rows.len()) as u64
    }
}

#[async_trait]
impl<T> BaseRepository<T, Uuid> for InMemoryRepository<T>
where
    T: Identifiable + Clone + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn save(&self, entity: T) -> Result<T, RepoError> {
        self.rows.write().await.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.rows.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryRepository<BlogPost> {
    async fn list_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        Ok(self
            .select(|_| true, |a, b| b.published_date.cmp(&a.published_date))
            .await)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, RepoError> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|p| p.slug == slug)
            .cloned())
    }

    async fn upsert_by_slug(&self, mut post: BlogPost) -> Result<BlogPost, RepoError> {
        let mut rows = self.rows.write().await;
        if let Some(existing) = rows.values().find(|p| p.slug == post.slug) {
            post.id = existing.id;
        }
        post.comments.clear();
        post.reactions = ReactionCounts::default();
        rows.insert(post.id, post.clone());
        Ok(post)
    }
}

#[async_trait]
impl CommentRepository for InMemoryRepository<Comment> {
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        Ok(self
            .select(|c| c.post_id == post_id, |a, b| a.date.cmp(&b.date))
            .await)
    }

    async fn delete_for_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        Ok(self.delete_where(|c| c.post_id == post_id).await)
    }

    async fn increment_vote(&self, id: Uuid, vote: CommentVote) -> Result<Comment, RepoError> {
        let mut rows = self.rows.write().await;
        let comment = rows.get_mut(&id).ok_or(RepoError::NotFound)?;
        comment.apply_vote(vote);
        Ok(comment.clone())
    }
}

#[async_trait]
impl PodcastRepository for InMemoryRepository<PodcastEpisode> {
    async fn list_all(&self) -> Result<Vec<PodcastEpisode>, RepoError> {
        Ok(self
            .select(|_| true, |a, b| b.episode_number.cmp(&a.episode_number))
            .await)
    }
}

#[async_trait]
impl PodcastCommentRepository for InMemoryRepository<PodcastComment> {
    async fn list_for_episode(&self, episode_id: Uuid) -> Result<Vec<PodcastComment>, RepoError> {
        Ok(self
            .select(|c| c.episode_id == episode_id, |a, b| a.date.cmp(&b.date))
            .await)
    }

    async fn delete_for_episode(&self, episode_id: Uuid) -> Result<u64, RepoError> {
        Ok(self.delete_where(|c| c.episode_id == episode_id).await)
    }
}

#[async_trait]
impl PollRepository for InMemoryRepository<Poll> {
    async fn list_all(&self) -> Result<Vec<Poll>, RepoError> {
        Ok(self
            .select(|_| true, |a, b| b.created_at.cmp(&a.created_at))
            .await)
    }

    async fn increment_vote(&self, id: Uuid, option_index: usize) -> Result<Poll, RepoError> {
        let mut rows = self.rows.write().await;
        let poll = rows.get_mut(&id).ok_or(RepoError::NotFound)?;
        if !poll.add_vote(option_index) {
            return Err(RepoError::Constraint(format!(
                "poll has no option {}",
                option_index
            )));
        }
        Ok(poll.clone())
    }
}

#[async_trait]
impl MessageRepository for InMemoryRepository<Message> {
    async fn list_all(&self) -> Result<Vec<Message>, RepoError> {
        Ok(self
            .select(|_| true, |a, b| b.created_at.cmp(&a.created_at))
            .await)
    }
}

/// In-memory reaction counters.
#[derive(Default)]
pub struct InMemoryReactionRepository {
    counts: RwLock<HashMap<Uuid, ReactionCounts>>,
}

impl InMemoryReactionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReactionRepository for InMemoryReactionRepository {
    async fn list_all(&self) -> Result<Vec<(Uuid, ReactionCounts)>, RepoError> {
        Ok(self
            .counts
            .read()
            .await
            .iter()
            .map(|(id, counts)| (*id, *counts))
            .collect())
    }

    async fn find_for_post(&self, post_id: Uuid) -> Result<ReactionCounts, RepoError> {
        Ok(self
            .counts
            .read()
            .await
            .get(&post_id)
            .copied()
            .unwrap_or_default())
    }

    async fn increment(
        &self,
        post_id: Uuid,
        kind: ReactionKind,
    ) -> Result<ReactionCounts, RepoError> {
        let mut counts = self.counts.write().await;
        let entry = counts.entry(post_id).or_default();
        entry.increment(kind);
        Ok(*entry)
    }

    async fn delete_for_post(&self, post_id: Uuid) -> Result<(), RepoError> {
        self.counts.write().await.remove(&post_id);
        Ok(())
    }
}

/// In-memory admin PIN hash.
#[derive(Default)]
pub struct InMemoryAdminAuthRepository {
    hash: RwLock<Option<String>>,
}

impl InMemoryAdminAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdminAuthRepository for InMemoryAdminAuthRepository {
    async fn pin_hash(&self) -> Result<Option<String>, RepoError> {
        Ok(self.hash.read().await.clone())
    }

    async fn set_pin_hash(&self, hash: &str) -> Result<(), RepoError> {
        *self.hash.write().await = Some(hash.to_string());
        Ok(())
    }
}
