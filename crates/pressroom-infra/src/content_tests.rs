//! Content store and visitor state exercised against the in-memory adapters.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use pressroom_core::domain::{
    Comment, CommentImport, CommentVote, NewComment, NewMessage, NewPodcast, NewPoll, NewPost,
    Poll, PostImport, PostQuery, ReactionKind,
};
use pressroom_core::error::RepoError;
use pressroom_core::ports::{BaseRepository, Cache, CommentRepository, PollRepository};
use pressroom_core::services::{ContentStore, VisitorState};
use pressroom_core::DomainError;

use crate::cache::InMemoryCache;
use crate::database::{InMemoryRepository, in_memory_repositories};

fn new_post(title: &str, category: &str, days_ago: i64) -> NewPost {
    NewPost {
        title: title.to_string(),
        excerpt: format!("About {}", title),
        content: format!("<p>{} body text</p>", title),
        category: category.to_string(),
        tags: vec!["rust".to_string()],
        author: "Dana".to_string(),
        published_date: Some(Utc::now() - Duration::days(days_ago)),
        ..Default::default()
    }
}

fn comment(name: &str) -> NewComment {
    NewComment {
        name: name.to_string(),
        content: format!("{} says hi", name),
    }
}

fn store() -> ContentStore {
    ContentStore::new(in_memory_repositories())
}

/// Comment table whose writes always fail.
#[derive(Default)]
struct OfflineComments {
    inner: InMemoryRepository<Comment>,
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for OfflineComments {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        self.inner.find_by_id(id).await
    }

    async fn save(&self, _entity: Comment) -> Result<Comment, RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }

    async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }
}

#[async_trait]
impl CommentRepository for OfflineComments {
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        self.inner.list_for_post(post_id).await
    }

    async fn delete_for_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        self.inner.delete_for_post(post_id).await
    }

    async fn increment_vote(&self, _id: Uuid, _vote: CommentVote) -> Result<Comment, RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }
}

/// Poll table that yields to the scheduler before every call, so concurrent
/// votes interleave.
#[derive(Default)]
struct YieldingPolls {
    inner: InMemoryRepository<Poll>,
}

#[async_trait]
impl BaseRepository<Poll, Uuid> for YieldingPolls {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Poll>, RepoError> {
        tokio::task::yield_now().await;
        self.inner.find_by_id(id).await
    }

    async fn save(&self, entity: Poll) -> Result<Poll, RepoError> {
        tokio::task::yield_now().await;
        self.inner.save(entity).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.inner.delete(id).await
    }
}

#[async_trait]
impl PollRepository for YieldingPolls {
    async fn list_all(&self) -> Result<Vec<Poll>, RepoError> {
        self.inner.list_all().await
    }

    async fn increment_vote(&self, id: Uuid, option_index: usize) -> Result<Poll, RepoError> {
        tokio::task::yield_now().await;
        self.inner.increment_vote(id, option_index).await
    }
}

#[tokio::test]
async fn test_first_read_loads_snapshot() {
    let repos = in_memory_repositories();
    repos
        .posts
        .save(pressroom_core::domain::BlogPost::new(new_post("Seeded", "News", 1)))
        .await
        .unwrap();

    let store = ContentStore::new(repos);
    assert!(store.loaded_at().await.is_none());

    let posts = store.posts().await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].slug, "seeded");
    assert!(store.loaded_at().await.is_some());
}

#[tokio::test]
async fn test_posts_newest_first_and_slug_lookup() {
    let store = store();
    store.add_post(new_post("Older", "News", 5)).await.unwrap();
    store.add_post(new_post("Newer", "News", 1)).await.unwrap();

    let titles: Vec<_> = store
        .posts()
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["Newer", "Older"]);

    let post = store.post_by_slug("older").await.unwrap();
    assert_eq!(post.title, "Older");
    assert!(matches!(
        store.post_by_slug("missing").await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_duplicate_slug_rejected() {
    let store = store();
    store.add_post(new_post("Hello World", "News", 1)).await.unwrap();

    let result = store.add_post(new_post("Hello, World!", "News", 1)).await;
    assert!(matches!(result, Err(DomainError::Duplicate(_))));
    assert_eq!(store.posts().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_post_keeps_comments() {
    let store = store();
    let post = store.add_post(new_post("Draft", "News", 1)).await.unwrap();
    store.add_comment(post.id, comment("Sam")).await.unwrap();

    let mut edit = new_post("Final", "Engineering", 1);
    edit.slug = "final-cut".to_string();
    let updated = store.update_post(post.id, edit).await.unwrap();

    assert_eq!(updated.id, post.id);
    assert_eq!(updated.slug, "final-cut");
    assert_eq!(updated.comments.len(), 1);
    assert_eq!(store.post_by_slug("final-cut").await.unwrap().comment_count(), 1);
}

#[tokio::test]
async fn test_search_and_categories() {
    let store = store();
    store.add_post(new_post("Async Rust", "Engineering", 2)).await.unwrap();
    store.add_post(new_post("Team Offsite", "Company News", 1)).await.unwrap();

    let hits = store.search(&PostQuery::text("ASYNC")).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Async Rust");

    let news = store
        .search(&PostQuery::category("company-news"))
        .await
        .unwrap();
    assert_eq!(news.len(), 1);

    let categories = store.categories().await.unwrap();
    let names: Vec<_> = categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Company News", "Engineering"]);
}

#[tokio::test]
async fn test_comment_thread_and_votes() {
    let store = store();
    let post = store.add_post(new_post("Threads", "News", 1)).await.unwrap();

    let root = store.add_comment(post.id, comment("Sam")).await.unwrap();
    let reply = store.add_reply(root.id, comment("Dana")).await.unwrap();
    // Replying to a reply lands on the same thread.
    let nested = store.add_reply(reply.id, comment("Lee")).await.unwrap();
    assert_eq!(nested.parent_id, Some(root.id));

    store.rate_comment(reply.id, CommentVote::Like).await.unwrap();
    let rated = store.rate_comment(root.id, CommentVote::Dislike).await.unwrap();
    assert_eq!(rated.dislikes, 1);
    assert_eq!(rated.replies.len(), 2);

    let post = store.post(post.id).await.unwrap();
    assert_eq!(post.comments.len(), 1);
    assert_eq!(post.comment_count(), 3);
    assert_eq!(post.find_comment(reply.id).unwrap().likes, 1);
}

#[tokio::test]
async fn test_concurrent_comment_likes_all_count() {
    let store = store();
    let post = store.add_post(new_post("Popular", "News", 1)).await.unwrap();
    let root = store.add_comment(post.id, comment("Sam")).await.unwrap();

    let (a, b, c) = tokio::join!(
        store.rate_comment(root.id, CommentVote::Like),
        store.rate_comment(root.id, CommentVote::Like),
        store.rate_comment(root.id, CommentVote::Like)
    );
    a.unwrap();
    b.unwrap();
    c.unwrap();

    let post = store.post(post.id).await.unwrap();
    assert_eq!(post.find_comment(root.id).unwrap().likes, 3);
}

#[tokio::test]
async fn test_delete_reply_and_comment() {
    let store = store();
    let post = store.add_post(new_post("Cleanup", "News", 1)).await.unwrap();
    let root = store.add_comment(post.id, comment("Sam")).await.unwrap();
    let reply = store.add_reply(root.id, comment("Dana")).await.unwrap();

    let wrong_parent = store.delete_reply(Uuid::new_v4(), reply.id).await;
    assert!(matches!(wrong_parent, Err(DomainError::NotFound { .. })));

    store.delete_reply(root.id, reply.id).await.unwrap();
    assert_eq!(store.post(post.id).await.unwrap().comment_count(), 1);

    store.add_reply(root.id, comment("Lee")).await.unwrap();
    store.delete_comment(root.id).await.unwrap();
    assert_eq!(store.post(post.id).await.unwrap().comment_count(), 0);

    // The snapshot agrees with storage after a reload.
    store.load().await.unwrap();
    assert_eq!(store.post(post.id).await.unwrap().comment_count(), 0);
}

#[tokio::test]
async fn test_failed_write_leaves_snapshot_untouched() {
    let mut repos = in_memory_repositories();
    repos.comments = Arc::new(OfflineComments::default());
    let store = ContentStore::new(repos);
    let post = store.add_post(new_post("Fragile", "News", 1)).await.unwrap();

    let result = store.add_comment(post.id, comment("Sam")).await;

    assert!(matches!(
        result,
        Err(DomainError::Repository(RepoError::Connection(_)))
    ));
    assert_eq!(store.post(post.id).await.unwrap().comment_count(), 0);
}

#[tokio::test]
async fn test_reactions_counted_and_reloaded() {
    let store = store();
    let post = store.add_post(new_post("Cheers", "News", 1)).await.unwrap();

    store.react(post.id, ReactionKind::Clap).await.unwrap();
    let counts = store.react(post.id, ReactionKind::Clap).await.unwrap();
    assert_eq!(counts.clap, 2);

    store.load().await.unwrap();
    assert_eq!(store.post(post.id).await.unwrap().reactions.clap, 2);

    assert!(matches!(
        store.react(Uuid::new_v4(), ReactionKind::Like).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_delete_post_removes_dependents() {
    let repos = in_memory_repositories();
    let comments = repos.comments.clone();
    let store = ContentStore::new(repos);
    let post = store.add_post(new_post("Gone", "News", 1)).await.unwrap();
    store.add_comment(post.id, comment("Sam")).await.unwrap();

    store.delete_post(post.id).await.unwrap();

    assert!(store.posts().await.unwrap().is_empty());
    assert!(comments.list_for_post(post.id).await.unwrap().is_empty());
}

fn new_podcast(number: i32) -> NewPodcast {
    NewPodcast {
        title: format!("Episode {}", number),
        description: "Talk".to_string(),
        audio_url: format!("https://cdn.example.com/{}.mp3", number),
        episode_number: number,
        duration: "42:00".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_podcasts_ordered_and_commented() {
    let store = store();
    store.add_podcast(new_podcast(1)).await.unwrap();
    let second = store.add_podcast(new_podcast(2)).await.unwrap();

    let numbers: Vec<_> = store
        .podcasts()
        .await
        .unwrap()
        .iter()
        .map(|e| e.episode_number)
        .collect();
    assert_eq!(numbers, vec![2, 1]);

    let duplicate = store.add_podcast(new_podcast(2)).await;
    assert!(matches!(duplicate, Err(DomainError::Duplicate(_))));

    let remark = store
        .add_podcast_comment(second.id, comment("Sam"))
        .await
        .unwrap();
    assert_eq!(store.podcast(second.id).await.unwrap().comments.len(), 1);

    store.delete_podcast_comment(remark.id).await.unwrap();
    assert!(store.podcast(second.id).await.unwrap().comments.is_empty());

    store.delete_podcast(second.id).await.unwrap();
    assert_eq!(store.podcasts().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_poll_voting() {
    let store = store();
    let poll = store
        .create_poll(NewPoll {
            question: "Tabs or spaces?".to_string(),
            options: vec!["Tabs".to_string(), "Spaces".to_string()],
            end_date: Some(Utc::now() + Duration::days(7)),
        })
        .await
        .unwrap();

    let voted = store.vote_poll(poll.id, 1).await.unwrap();
    assert_eq!(voted.options[1].votes, 1);
    assert!(matches!(
        store.vote_poll(poll.id, 5).await,
        Err(DomainError::Validation(_))
    ));

    assert_eq!(store.active_polls(Utc::now()).await.unwrap().len(), 1);
    assert!(
        store
            .active_polls(Utc::now() + Duration::days(8))
            .await
            .unwrap()
            .is_empty()
    );

    store.delete_poll(poll.id).await.unwrap();
    assert!(store.polls().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_concurrent_votes_are_all_counted() {
    let mut repos = in_memory_repositories();
    let polls = Arc::new(YieldingPolls::default());
    repos.polls = polls.clone();
    let store = ContentStore::new(repos);

    let poll = store
        .create_poll(NewPoll {
            question: "Coffee or tea?".to_string(),
            options: vec!["Coffee".to_string(), "Tea".to_string()],
            end_date: None,
        })
        .await
        .unwrap();

    let (first, second) = tokio::join!(store.vote_poll(poll.id, 0), store.vote_poll(poll.id, 0));
    first.unwrap();
    second.unwrap();

    let stored = polls.find_by_id(poll.id).await.unwrap().unwrap();
    assert_eq!(stored.options[0].votes, 2);
    assert_eq!(store.poll(poll.id).await.unwrap().options[0].votes, 2);
}

#[tokio::test]
async fn test_message_lifecycle_and_stats() {
    let store = store();
    let message = store
        .submit_message(NewMessage {
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            subject: None,
            content: "Hello there".to_string(),
        })
        .await
        .unwrap();
    assert!(!message.read);

    let stats = store.stats(Utc::now()).await.unwrap();
    assert_eq!(stats.messages, 1);
    assert_eq!(stats.unread_messages, 1);

    let replied = store
        .reply_to_message(message.id, "Thanks for writing")
        .await
        .unwrap();
    assert!(replied.read);
    assert_eq!(replied.reply.as_deref(), Some("Thanks for writing"));
    assert_eq!(store.stats(Utc::now()).await.unwrap().unread_messages, 0);

    store.delete_message(message.id).await.unwrap();
    assert!(matches!(
        store.mark_message_read(message.id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_import_is_idempotent() {
    let store = store();
    let import = PostImport {
        post: new_post("Imported Post", "News", 3),
        comments: vec![CommentImport {
            name: "Sam".to_string(),
            content: "First!".to_string(),
            likes: 4,
            replies: vec![CommentImport {
                name: "Dana".to_string(),
                content: "Second".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }],
    };

    let summary = store.import_posts(vec![import.clone()]).await.unwrap();
    assert_eq!(summary.posts, 1);
    assert_eq!(summary.comments, 2);

    store.import_posts(vec![import]).await.unwrap();
    let posts = store.posts().await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].comment_count(), 2);
    assert_eq!(posts[0].comments[0].likes, 4);
}

#[tokio::test]
async fn test_reimport_keeps_stored_dates() {
    let store = store();
    let mut undated = new_post("Undated Import", "News", 0);
    undated.published_date = None;
    let import = PostImport {
        post: undated,
        comments: vec![CommentImport {
            name: "Sam".to_string(),
            content: "Hello".to_string(),
            ..Default::default()
        }],
    };

    store.import_posts(vec![import.clone()]).await.unwrap();
    let first = store.post_by_slug("undated-import").await.unwrap();

    tokio::time::sleep(StdDuration::from_millis(20)).await;
    store.import_posts(vec![import]).await.unwrap();
    let second = store.post_by_slug("undated-import").await.unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.published_date, first.published_date);
    assert_eq!(second.comments[0].date, first.comments[0].date);
}

#[tokio::test]
async fn test_import_validates_before_writing() {
    let store = store();
    let mut bad = new_post("", "News", 1);
    bad.slug = "no-title".to_string();

    let result = store
        .import_posts(vec![
            PostImport {
                post: new_post("Good", "News", 1),
                comments: vec![],
            },
            PostImport {
                post: bad,
                comments: vec![],
            },
        ])
        .await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert!(store.posts().await.unwrap().is_empty());
}

fn visitor_state() -> VisitorState {
    VisitorState::new(
        Arc::new(InMemoryCache::new()),
        StdDuration::from_secs(3600),
        StdDuration::from_secs(3600),
    )
}

#[tokio::test]
async fn test_visitor_bookmarks() {
    let state = visitor_state();
    let visitor = Uuid::new_v4();
    let post = Uuid::new_v4();

    state.add_bookmark(visitor, post).await.unwrap();
    let bookmarks = state.add_bookmark(visitor, post).await.unwrap();
    assert_eq!(bookmarks, vec![post]);
    assert!(state.bookmarks(Uuid::new_v4()).await.is_empty());

    assert!(state.remove_bookmark(visitor, post).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_visitor_language() {
    let state = visitor_state();
    let visitor = Uuid::new_v4();

    assert_eq!(state.language(visitor).await, "en");
    assert_eq!(state.set_language(visitor, " FR ").await.unwrap(), "fr");
    assert_eq!(state.language(visitor).await, "fr");
    assert!(matches!(
        state.set_language(visitor, "french").await,
        Err(DomainError::Validation(_))
    ));
}

#[tokio::test]
async fn test_visitor_reaction_and_vote_flags() {
    let state = visitor_state();
    let visitor = Uuid::new_v4();
    let post = Uuid::new_v4();
    let poll = Uuid::new_v4();

    assert!(
        state
            .claim_reaction(visitor, post, ReactionKind::Love)
            .await
            .unwrap()
    );
    assert!(
        !state
            .claim_reaction(visitor, post, ReactionKind::Love)
            .await
            .unwrap()
    );
    assert!(state.has_reacted(visitor, post, ReactionKind::Love).await);
    assert!(!state.has_reacted(visitor, post, ReactionKind::Like).await);
    assert_eq!(
        state.reactions_on(visitor, post).await,
        vec![ReactionKind::Love]
    );

    assert!(!state.has_voted(visitor, poll).await);
    assert!(state.claim_vote(visitor, poll).await.unwrap());
    assert!(state.has_voted(visitor, poll).await);

    state.release_vote(visitor, poll).await.unwrap();
    assert!(!state.has_voted(visitor, poll).await);
}

#[tokio::test]
async fn test_parallel_vote_claims_have_one_winner() {
    let state = visitor_state();
    let visitor = Uuid::new_v4();
    let poll = Uuid::new_v4();

    let (a, b) = tokio::join!(state.claim_vote(visitor, poll), state.claim_vote(visitor, poll));
    assert!(a.unwrap() ^ b.unwrap());
}

#[tokio::test]
async fn test_visitor_entries_expire_after_retention() {
    let cache = Arc::new(InMemoryCache::new());
    let state = VisitorState::new(
        cache.clone(),
        StdDuration::from_secs(3600),
        StdDuration::from_millis(50),
    );
    let visitor = Uuid::new_v4();

    state.add_bookmark(visitor, Uuid::new_v4()).await.unwrap();
    state.set_language(visitor, "de").await.unwrap();
    state
        .claim_reaction(visitor, Uuid::new_v4(), ReactionKind::Clap)
        .await
        .unwrap();
    state.claim_vote(visitor, Uuid::new_v4()).await.unwrap();
    assert_eq!(cache.len().await, 4);

    tokio::time::sleep(StdDuration::from_millis(80)).await;
    assert_eq!(cache.purge_expired().await, 4);
    assert_eq!(cache.len().await, 0);
    assert!(state.bookmarks(visitor).await.is_empty());
    assert_eq!(state.language(visitor).await, "en");
}

#[tokio::test]
async fn test_popup_dismissal_expires() {
    let state = VisitorState::new(
        Arc::new(InMemoryCache::new()),
        StdDuration::from_millis(50),
        StdDuration::from_secs(3600),
    );
    let visitor = Uuid::new_v4();

    assert!(state.popup_dismissed_at(visitor, "newsletter").await.is_none());
    let at = state.dismiss_popup(visitor, "newsletter").await.unwrap();
    assert_eq!(
        state.popup_dismissed_at(visitor, "newsletter").await,
        Some(at)
    );

    tokio::time::sleep(StdDuration::from_millis(80)).await;
    assert!(state.popup_dismissed_at(visitor, "newsletter").await.is_none());
}
