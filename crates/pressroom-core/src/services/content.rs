//! Content store - the in-memory snapshot of site content.
//!
//! Reads are served from a snapshot built from the repositories. Every
//! mutation writes to the repository first and only splices the stored result
//! into the snapshot once that call succeeds; a failed call is logged and
//! returned to the caller with the snapshot untouched.
//!
//! Posts (with their comment threads and reactions) are loaded eagerly on the
//! first read. Podcasts and polls are fetched lazily on first use and dropped
//! again on every full reload. Contact messages are never cached.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::search::{category_summaries, related_posts};
use crate::domain::{
    BlogPost, CategorySummary, Comment, CommentVote, ImportSummary, Message, NewComment,
    NewMessage, NewPodcast, NewPoll, NewPost, PodcastComment, PodcastEpisode, Poll, PostImport,
    PostQuery, ReactionCounts, ReactionKind,
};
use crate::error::{DomainError, RepoError};
use crate::ports::{
    CommentRepository, MessageRepository, PodcastCommentRepository, PodcastRepository,
    PollRepository, PostRepository, ReactionRepository,
};

/// The repositories the content store reads from and writes to.
#[derive(Clone)]
pub struct ContentRepositories {
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub reactions: Arc<dyn ReactionRepository>,
    pub podcasts: Arc<dyn PodcastRepository>,
    pub podcast_comments: Arc<dyn PodcastCommentRepository>,
    pub polls: Arc<dyn PollRepository>,
    pub messages: Arc<dyn MessageRepository>,
}

#[derive(Default)]
struct Snapshot {
    loaded_at: Option<DateTime<Utc>>,
    /// Newest first.
    posts: Vec<BlogPost>,
    /// Highest episode number first; `None` until first requested.
    podcasts: Option<Vec<PodcastEpisode>>,
    /// Newest first; `None` until first requested.
    polls: Option<Vec<Poll>>,
}

/// Where a comment sits inside the post snapshot.
#[derive(Debug, Clone, Copy)]
struct CommentLocation {
    post_id: Uuid,
    root_id: Uuid,
    is_reply: bool,
}

/// Counts for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentStats {
    pub posts: usize,
    pub comments: usize,
    pub reactions: i64,
    pub podcasts: usize,
    pub polls: usize,
    pub active_polls: usize,
    pub messages: usize,
    pub unread_messages: usize,
}

pub struct ContentStore {
    repos: ContentRepositories,
    snapshot: RwLock<Snapshot>,
}

/// Log a failed repository call and lift it into a domain error.
fn logged<T>(operation: &'static str, result: Result<T, RepoError>) -> Result<T, DomainError> {
    result.map_err(|e| {
        match &e {
            RepoError::NotFound => tracing::warn!(operation, "Content store target missing"),
            _ => tracing::error!(operation, error = %e, "Content store call failed"),
        }
        DomainError::from(e)
    })
}

fn sort_posts(posts: &mut [BlogPost]) {
    posts.sort_by(|a, b| b.published_date.cmp(&a.published_date));
}

fn sort_podcasts(episodes: &mut [PodcastEpisode]) {
    episodes.sort_by(|a, b| b.episode_number.cmp(&a.episode_number));
}

impl ContentStore {
    pub fn new(repos: ContentRepositories) -> Self {
        Self {
            repos,
            snapshot: RwLock::new(Snapshot::default()),
        }
    }

    // ------------------------------------------------------------------
    // Loading
    // ------------------------------------------------------------------

    /// Rebuild the post snapshot from the repositories.
    ///
    /// Fetches posts, then the comments of each post one by one. Podcasts and
    /// polls are dropped and fetched again on next use. Returns the number of
    /// posts loaded.
    pub async fn load(&self) -> Result<usize, DomainError> {
        let mut posts = logged("list posts", self.repos.posts.list_all().await)?;
        let reactions: HashMap<Uuid, ReactionCounts> =
            logged("list reactions", self.repos.reactions.list_all().await)?
                .into_iter()
                .collect();

        for post in &mut posts {
            let comments = logged(
                "list comments",
                self.repos.comments.list_for_post(post.id).await,
            )?;
            post.comments = Comment::into_threads(comments);
            post.reactions = reactions.get(&post.id).copied().unwrap_or_default();
        }
        sort_posts(&mut posts);

        let count = posts.len();
        let mut snapshot = self.snapshot.write().await;
        *snapshot = Snapshot {
            loaded_at: Some(Utc::now()),
            posts,
            podcasts: None,
            polls: None,
        };

        tracing::info!(posts = count, "Content snapshot loaded");
        Ok(count)
    }

    /// When the post snapshot was last rebuilt, if ever.
    pub async fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot.read().await.loaded_at
    }

    async fn ensure_loaded(&self) -> Result<(), DomainError> {
        if self.snapshot.read().await.loaded_at.is_some() {
            return Ok(());
        }
        self.load().await.map(|_| ())
    }

    // ------------------------------------------------------------------
    // Posts
    // ------------------------------------------------------------------

    /// All posts, newest first.
    pub async fn posts(&self) -> Result<Vec<BlogPost>, DomainError> {
        self.ensure_loaded().await?;
        Ok(self.snapshot.read().await.posts.clone())
    }

    pub async fn post(&self, id: Uuid) -> Result<BlogPost, DomainError> {
        self.ensure_loaded().await?;
        self.snapshot
            .read()
            .await
            .posts
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| DomainError::not_found("post", id))
    }

    pub async fn post_by_slug(&self, slug: &str) -> Result<BlogPost, DomainError> {
        self.ensure_loaded().await?;
        self.snapshot
            .read()
            .await
            .posts
            .iter()
            .find(|p| p.slug == slug)
            .cloned()
            .ok_or_else(|| DomainError::not_found("post", slug))
    }

    /// Posts matching `query`, newest first.
    pub async fn search(&self, query: &PostQuery) -> Result<Vec<BlogPost>, DomainError> {
        self.ensure_loaded().await?;
        Ok(self
            .snapshot
            .read()
            .await
            .posts
            .iter()
            .filter(|p| query.matches(p))
            .cloned()
            .collect())
    }

    pub async fn categories(&self) -> Result<Vec<CategorySummary>, DomainError> {
        self.ensure_loaded().await?;
        Ok(category_summaries(&self.snapshot.read().await.posts))
    }

    pub async fn related_posts(
        &self,
        post_id: Uuid,
        limit: usize,
    ) -> Result<Vec<BlogPost>, DomainError> {
        self.ensure_loaded().await?;
        let snapshot = self.snapshot.read().await;
        if !snapshot.posts.iter().any(|p| p.id == post_id) {
            return Err(DomainError::not_found("post", post_id));
        }
        Ok(related_posts(&snapshot.posts, post_id, limit))
    }

    pub async fn add_post(&self, input: NewPost) -> Result<BlogPost, DomainError> {
        input.validate()?;
        self.ensure_loaded().await?;
        self.check_slug_free(&input.effective_slug(), None).await?;

        let saved = logged("save post", self.repos.posts.save(BlogPost::new(input)).await)?;

        let mut snapshot = self.snapshot.write().await;
        snapshot.posts.push(saved.clone());
        sort_posts(&mut snapshot.posts);
        tracing::info!(post_id = %saved.id, slug = %saved.slug, "Post created");
        Ok(saved)
    }

    /// Replace a post's editable fields. Comments and reactions are kept.
    pub async fn update_post(&self, id: Uuid, input: NewPost) -> Result<BlogPost, DomainError> {
        input.validate()?;
        let mut post = self.post(id).await?;
        self.check_slug_free(&input.effective_slug(), Some(id)).await?;

        post.apply(input);
        let comments = std::mem::take(&mut post.comments);
        let reactions = post.reactions;
        let mut saved = logged("save post", self.repos.posts.save(post).await)?;
        saved.comments = comments;
        saved.reactions = reactions;

        let mut snapshot = self.snapshot.write().await;
        if let Some(existing) = snapshot.posts.iter_mut().find(|p| p.id == id) {
            *existing = saved.clone();
        }
        sort_posts(&mut snapshot.posts);
        Ok(saved)
    }

    /// Delete a post along with its comments and reaction counters.
    pub async fn delete_post(&self, id: Uuid) -> Result<(), DomainError> {
        self.post(id).await?;

        logged(
            "delete post comments",
            self.repos.comments.delete_for_post(id).await,
        )?;
        logged(
            "delete post reactions",
            self.repos.reactions.delete_for_post(id).await,
        )?;
        logged("delete post", self.repos.posts.delete(id).await)?;

        self.snapshot.write().await.posts.retain(|p| p.id != id);
        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    async fn check_slug_free(&self, slug: &str, except: Option<Uuid>) -> Result<(), DomainError> {
        let taken = self
            .snapshot
            .read()
            .await
            .posts
            .iter()
            .any(|p| p.slug == slug && Some(p.id) != except);
        if taken {
            return Err(DomainError::Duplicate(format!(
                "a post with slug '{}' already exists",
                slug
            )));
        }
        Ok(())
    }

    /// Apply `f` to a post in the snapshot, if it is still there.
    async fn splice_post<F>(&self, post_id: Uuid, f: F)
    where
        F: FnOnce(&mut BlogPost),
    {
        let mut snapshot = self.snapshot.write().await;
        if let Some(post) = snapshot.posts.iter_mut().find(|p| p.id == post_id) {
            f(post);
        }
    }

    // ------------------------------------------------------------------
    // Comments and replies
    // ------------------------------------------------------------------

    pub async fn add_comment(
        &self,
        post_id: Uuid,
        input: NewComment,
    ) -> Result<Comment, DomainError> {
        input.validate()?;
        self.post(post_id).await?;

        let comment = Comment::new(post_id, None, input);
        let saved = logged("save comment", self.repos.comments.save(comment).await)?;

        let spliced = saved.clone();
        self.splice_post(post_id, move |post| post.comments.push(spliced))
            .await;
        Ok(saved)
    }

    /// Reply to a comment. Replying to a reply attaches to its thread root.
    pub async fn add_reply(
        &self,
        comment_id: Uuid,
        input: NewComment,
    ) -> Result<Comment, DomainError> {
        input.validate()?;
        let location = self.locate_comment(comment_id).await?;

        let reply = Comment::new(location.post_id, Some(location.root_id), input);
        let saved = logged("save reply", self.repos.comments.save(reply).await)?;

        let spliced = saved.clone();
        self.splice_post(location.post_id, move |post| {
            if let Some(root) = post.comments.iter_mut().find(|c| c.id == location.root_id) {
                root.replies.push(spliced);
            }
        })
        .await;
        Ok(saved)
    }

    /// Delete a comment or reply. Deleting a comment removes its replies first.
    pub async fn delete_comment(&self, comment_id: Uuid) -> Result<(), DomainError> {
        let location = self.locate_comment(comment_id).await?;
        if location.is_reply {
            return self.remove_reply(location, comment_id).await;
        }

        let reply_ids: Vec<Uuid> = self
            .post(location.post_id)
            .await?
            .find_comment(comment_id)
            .map(|c| c.replies.iter().map(|r| r.id).collect())
            .unwrap_or_default();
        for reply_id in reply_ids {
            logged("delete reply", self.repos.comments.delete(reply_id).await)?;
        }
        logged("delete comment", self.repos.comments.delete(comment_id).await)?;

        self.splice_post(location.post_id, |post| {
            post.comments.retain(|c| c.id != comment_id)
        })
        .await;
        Ok(())
    }

    /// Delete `reply_id`, which must be a reply in the thread of `parent_id`.
    pub async fn delete_reply(&self, parent_id: Uuid, reply_id: Uuid) -> Result<(), DomainError> {
        let location = self.locate_comment(reply_id).await?;
        if !location.is_reply || location.root_id != parent_id {
            return Err(DomainError::not_found("reply", reply_id));
        }
        self.remove_reply(location, reply_id).await
    }

    async fn remove_reply(&self, location: CommentLocation, reply_id: Uuid) -> Result<(), DomainError> {
        logged("delete reply", self.repos.comments.delete(reply_id).await)?;
        self.splice_post(location.post_id, |post| {
            if let Some(root) = post.comments.iter_mut().find(|c| c.id == location.root_id) {
                root.replies.retain(|r| r.id != reply_id);
            }
        })
        .await;
        Ok(())
    }

    /// Like or dislike a comment or reply; returns the updated comment.
    pub async fn rate_comment(
        &self,
        comment_id: Uuid,
        vote: CommentVote,
    ) -> Result<Comment, DomainError> {
        let location = self.locate_comment(comment_id).await?;
        let mut saved = logged(
            "increment comment vote",
            self.repos.comments.increment_vote(comment_id, vote).await,
        )?;
        saved.replies = self
            .post(location.post_id)
            .await?
            .find_comment(comment_id)
            .map(|c| c.replies.clone())
            .unwrap_or_default();

        let (likes, dislikes) = (saved.likes, saved.dislikes);
        self.splice_post(location.post_id, move |post| {
            for root in &mut post.comments {
                let target = if root.id == comment_id {
                    Some(root)
                } else {
                    root.replies.iter_mut().find(|r| r.id == comment_id)
                };
                // Counters only grow; a slower concurrent vote must not roll them back.
                if let Some(target) = target {
                    target.likes = target.likes.max(likes);
                    target.dislikes = target.dislikes.max(dislikes);
                    break;
                }
            }
        })
        .await;
        Ok(saved)
    }

    async fn locate_comment(&self, comment_id: Uuid) -> Result<CommentLocation, DomainError> {
        self.ensure_loaded().await?;
        let snapshot = self.snapshot.read().await;
        for post in &snapshot.posts {
            for root in &post.comments {
                if root.id == comment_id {
                    return Ok(CommentLocation {
                        post_id: post.id,
                        root_id: root.id,
                        is_reply: false,
                    });
                }
                if root.replies.iter().any(|r| r.id == comment_id) {
                    return Ok(CommentLocation {
                        post_id: post.id,
                        root_id: root.id,
                        is_reply: true,
                    });
                }
            }
        }
        Err(DomainError::not_found("comment", comment_id))
    }

    // ------------------------------------------------------------------
    // Reactions
    // ------------------------------------------------------------------

    pub async fn react(
        &self,
        post_id: Uuid,
        kind: ReactionKind,
    ) -> Result<ReactionCounts, DomainError> {
        self.post(post_id).await?;
        let counts = logged(
            "increment reaction",
            self.repos.reactions.increment(post_id, kind).await,
        )?;
        self.splice_post(post_id, |post| post.reactions.merge_max(counts))
            .await;
        Ok(counts)
    }

    // ------------------------------------------------------------------
    // Podcasts
    // ------------------------------------------------------------------

    async fn ensure_podcasts(&self) -> Result<(), DomainError> {
        if self.snapshot.read().await.podcasts.is_some() {
            return Ok(());
        }

        let mut episodes = logged("list podcasts", self.repos.podcasts.list_all().await)?;
        for episode in &mut episodes {
            episode.comments = logged(
                "list podcast comments",
                self.repos.podcast_comments.list_for_episode(episode.id).await,
            )?;
        }
        sort_podcasts(&mut episodes);

        tracing::debug!(episodes = episodes.len(), "Podcasts loaded");
        self.snapshot.write().await.podcasts = Some(episodes);
        Ok(())
    }

    /// All episodes, highest episode number first.
    pub async fn podcasts(&self) -> Result<Vec<PodcastEpisode>, DomainError> {
        self.ensure_podcasts().await?;
        Ok(self
            .snapshot
            .read()
            .await
            .podcasts
            .clone()
            .unwrap_or_default())
    }

    pub async fn podcast(&self, id: Uuid) -> Result<PodcastEpisode, DomainError> {
        self.podcasts()
            .await?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| DomainError::not_found("podcast", id))
    }

    pub async fn add_podcast(&self, input: NewPodcast) -> Result<PodcastEpisode, DomainError> {
        input.validate()?;
        self.check_episode_number_free(input.episode_number, None)
            .await?;

        let saved = logged(
            "save podcast",
            self.repos.podcasts.save(PodcastEpisode::new(input)).await,
        )?;

        self.splice_podcasts(|episodes| {
            episodes.push(saved.clone());
            sort_podcasts(episodes);
        })
        .await;
        tracing::info!(podcast_id = %saved.id, episode = saved.episode_number, "Podcast created");
        Ok(saved)
    }

    pub async fn update_podcast(
        &self,
        id: Uuid,
        input: NewPodcast,
    ) -> Result<PodcastEpisode, DomainError> {
        input.validate()?;
        let mut episode = self.podcast(id).await?;
        self.check_episode_number_free(input.episode_number, Some(id))
            .await?;

        episode.apply(input);
        let comments = std::mem::take(&mut episode.comments);
        let mut saved = logged("save podcast", self.repos.podcasts.save(episode).await)?;
        saved.comments = comments;

        self.splice_podcasts(|episodes| {
            if let Some(existing) = episodes.iter_mut().find(|e| e.id == id) {
                *existing = saved.clone();
            }
            sort_podcasts(episodes);
        })
        .await;
        Ok(saved)
    }

    pub async fn delete_podcast(&self, id: Uuid) -> Result<(), DomainError> {
        self.podcast(id).await?;

        logged(
            "delete podcast comments",
            self.repos.podcast_comments.delete_for_episode(id).await,
        )?;
        logged("delete podcast", self.repos.podcasts.delete(id).await)?;

        self.splice_podcasts(|episodes| episodes.retain(|e| e.id != id))
            .await;
        Ok(())
    }

    pub async fn add_podcast_comment(
        &self,
        episode_id: Uuid,
        input: NewComment,
    ) -> Result<PodcastComment, DomainError> {
        input.validate()?;
        self.podcast(episode_id).await?;

        let comment = PodcastComment::new(episode_id, &input.name, &input.content);
        let saved = logged(
            "save podcast comment",
            self.repos.podcast_comments.save(comment).await,
        )?;

        self.splice_podcasts(|episodes| {
            if let Some(episode) = episodes.iter_mut().find(|e| e.id == episode_id) {
                episode.comments.push(saved.clone());
            }
        })
        .await;
        Ok(saved)
    }

    pub async fn delete_podcast_comment(&self, comment_id: Uuid) -> Result<(), DomainError> {
        let owner = self
            .podcasts()
            .await?
            .into_iter()
            .find(|e| e.comments.iter().any(|c| c.id == comment_id))
            .map(|e| e.id)
            .ok_or_else(|| DomainError::not_found("podcast comment", comment_id))?;

        logged(
            "delete podcast comment",
            self.repos.podcast_comments.delete(comment_id).await,
        )?;

        self.splice_podcasts(|episodes| {
            if let Some(episode) = episodes.iter_mut().find(|e| e.id == owner) {
                episode.comments.retain(|c| c.id != comment_id);
            }
        })
        .await;
        Ok(())
    }

    async fn check_episode_number_free(
        &self,
        number: i32,
        except: Option<Uuid>,
    ) -> Result<(), DomainError> {
        let taken = self
            .podcasts()
            .await?
            .iter()
            .any(|e| e.episode_number == number && Some(e.id) != except);
        if taken {
            return Err(DomainError::Duplicate(format!(
                "episode {} already exists",
                number
            )));
        }
        Ok(())
    }

    async fn splice_podcasts<F>(&self, f: F)
    where
        F: FnOnce(&mut Vec<PodcastEpisode>),
    {
        if let Some(episodes) = self.snapshot.write().await.podcasts.as_mut() {
            f(episodes);
        }
    }

    // ------------------------------------------------------------------
    // Polls
    // ------------------------------------------------------------------

    async fn ensure_polls(&self) -> Result<(), DomainError> {
        if self.snapshot.read().await.polls.is_some() {
            return Ok(());
        }
        let polls = logged("list polls", self.repos.polls.list_all().await)?;
        self.snapshot.write().await.polls = Some(polls);
        Ok(())
    }

    /// All polls, newest first.
    pub async fn polls(&self) -> Result<Vec<Poll>, DomainError> {
        self.ensure_polls().await?;
        Ok(self.snapshot.read().await.polls.clone().unwrap_or_default())
    }

    pub async fn active_polls(&self, now: DateTime<Utc>) -> Result<Vec<Poll>, DomainError> {
        Ok(self
            .polls()
            .await?
            .into_iter()
            .filter(|p| p.is_active(now))
            .collect())
    }

    pub async fn poll(&self, id: Uuid) -> Result<Poll, DomainError> {
        self.polls()
            .await?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or_else(|| DomainError::not_found("poll", id))
    }

    pub async fn create_poll(&self, input: NewPoll) -> Result<Poll, DomainError> {
        input.validate(Utc::now())?;
        self.ensure_polls().await?;

        let saved = logged("save poll", self.repos.polls.save(Poll::new(input)).await)?;

        self.splice_polls(|polls| polls.insert(0, saved.clone()))
            .await;
        Ok(saved)
    }

    /// Count one vote for `option_index`. Closed polls and unknown options are refused.
    pub async fn vote_poll(&self, id: Uuid, option_index: usize) -> Result<Poll, DomainError> {
        self.poll(id).await?.check_vote(option_index, Utc::now())?;

        let saved = logged(
            "increment poll vote",
            self.repos.polls.increment_vote(id, option_index).await,
        )?;

        self.splice_polls(|polls| {
            if let Some(existing) = polls.iter_mut().find(|p| p.id == id) {
                for (current, stored) in existing.options.iter_mut().zip(&saved.options) {
                    current.votes = current.votes.max(stored.votes);
                }
            }
        })
        .await;
        Ok(saved)
    }

    pub async fn delete_poll(&self, id: Uuid) -> Result<(), DomainError> {
        self.poll(id).await?;
        logged("delete poll", self.repos.polls.delete(id).await)?;
        self.splice_polls(|polls| polls.retain(|p| p.id != id)).await;
        Ok(())
    }

    async fn splice_polls<F>(&self, f: F)
    where
        F: FnOnce(&mut Vec<Poll>),
    {
        if let Some(polls) = self.snapshot.write().await.polls.as_mut() {
            f(polls);
        }
    }

    // ------------------------------------------------------------------
    // Contact messages
    // ------------------------------------------------------------------

    pub async fn submit_message(&self, input: NewMessage) -> Result<Message, DomainError> {
        input.validate()?;
        let saved = logged(
            "save message",
            self.repos.messages.save(Message::new(input)).await,
        )?;
        tracing::info!(message_id = %saved.id, "Contact message received");
        Ok(saved)
    }

    /// All messages, newest first.
    pub async fn messages(&self) -> Result<Vec<Message>, DomainError> {
        logged("list messages", self.repos.messages.list_all().await)
    }

    async fn message(&self, id: Uuid) -> Result<Message, DomainError> {
        logged("find message", self.repos.messages.find_by_id(id).await)?
            .ok_or_else(|| DomainError::not_found("message", id))
    }

    pub async fn mark_message_read(&self, id: Uuid) -> Result<Message, DomainError> {
        let mut message = self.message(id).await?;
        if message.read {
            return Ok(message);
        }
        message.read = true;
        logged("save message", self.repos.messages.save(message).await)
    }

    pub async fn reply_to_message(&self, id: Uuid, reply: &str) -> Result<Message, DomainError> {
        let mut message = self.message(id).await?;
        message.answer(reply)?;
        logged("save message reply", self.repos.messages.save(message).await)
    }

    pub async fn delete_message(&self, id: Uuid) -> Result<(), DomainError> {
        logged("delete message", self.repos.messages.delete(id).await)
    }

    // ------------------------------------------------------------------
    // Bulk import and stats
    // ------------------------------------------------------------------

    /// Upsert posts by slug together with their comment threads, then reload.
    ///
    /// Every entry is validated before anything is written. Imported comments
    /// get ids derived from the post slug, so running the same import twice
    /// updates rows instead of duplicating them.
    pub async fn import_posts(&self, imports: Vec<PostImport>) -> Result<ImportSummary, DomainError> {
        for import in &imports {
            import.validate()?;
        }

        let mut summary = ImportSummary::default();
        for import in imports {
            let mut post = BlogPost::new(import.post.clone());

            // Undated entries keep the dates already stored for them.
            let existing = logged("find post", self.repos.posts.find_by_slug(&post.slug).await)?;
            let mut stored_dates = HashMap::new();
            if let Some(existing) = &existing {
                if import.post.published_date.is_none() {
                    post.published_date = existing.published_date;
                }
                stored_dates = logged(
                    "list comments",
                    self.repos.comments.list_for_post(existing.id).await,
                )?
                .into_iter()
                .map(|c| (c.id, c.date))
                .collect();
            }

            let stored = logged("upsert post", self.repos.posts.upsert_by_slug(post).await)?;

            for comment in import.comments_for(stored.id, &stored.slug, &stored_dates) {
                logged("save imported comment", self.repos.comments.save(comment).await)?;
                summary.comments += 1;
            }
            summary.posts += 1;
        }

        self.load().await?;
        tracing::info!(
            posts = summary.posts,
            comments = summary.comments,
            "Posts imported"
        );
        Ok(summary)
    }

    pub async fn stats(&self, now: DateTime<Utc>) -> Result<ContentStats, DomainError> {
        let posts = self.posts().await?;
        let podcasts = self.podcasts().await?;
        let polls = self.polls().await?;
        let messages = self.messages().await?;

        Ok(ContentStats {
            posts: posts.len(),
            comments: posts.iter().map(BlogPost::comment_count).sum(),
            reactions: posts.iter().map(|p| p.reactions.total()).sum(),
            podcasts: podcasts.len(),
            polls: polls.len(),
            active_polls: polls.iter().filter(|p| p.is_active(now)).count(),
            messages: messages.len(),
            unread_messages: messages.iter().filter(|m| !m.read).count(),
        })
    }
}
