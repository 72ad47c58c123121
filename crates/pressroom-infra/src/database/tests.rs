use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use crate::database::entity::{comment, poll, post, reaction};
use crate::database::postgres_repo::{
    PostgresCommentRepository, PostgresPollRepository, PostgresPostRepository,
    PostgresReactionRepository,
};
use pressroom_core::domain::{BlogPost, CommentVote, ReactionKind};
use pressroom_core::error::RepoError;
use pressroom_core::ports::{
    BaseRepository, CommentRepository, PollRepository, PostRepository, ReactionRepository,
};

fn post_model(id: Uuid, slug: &str) -> post::Model {
    post::Model {
        id,
        title: "Test Post".to_owned(),
        slug: slug.to_owned(),
        excerpt: "Excerpt".to_owned(),
        content: "<p>Content</p>".to_owned(),
        image: None,
        category: "Engineering Notes".to_owned(),
        tags: serde_json::json!(["rust", "web"]),
        author: "Dana".to_owned(),
        published_date: Utc::now().into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(post_id, "test-post")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<BlogPost> = repo.find_by_id(post_id).await.unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.tags, vec!["rust".to_string(), "web".to_string()]);
    assert_eq!(post.category_slug(), "engineering-notes");
    assert!(post.comments.is_empty());
}

#[tokio::test]
async fn test_malformed_tags_fall_back_to_empty() {
    let mut model = post_model(Uuid::new_v4(), "bad-tags");
    model.tags = serde_json::json!({"not": "a list"});

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let posts = PostgresPostRepository::new(db).list_all().await.unwrap();
    assert_eq!(posts.len(), 1);
    assert!(posts[0].tags.is_empty());
}

#[tokio::test]
async fn test_find_by_slug_missing() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    assert!(repo.find_by_slug("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_comments_for_post() {
    let post_id = Uuid::new_v4();
    let root_id = Uuid::new_v4();
    let now = Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            comment::Model {
                id: root_id,
                post_id,
                parent_id: None,
                name: "Sam".to_owned(),
                content: "Great read".to_owned(),
                date: now.into(),
                likes: 2,
                dislikes: 0,
            },
            comment::Model {
                id: Uuid::new_v4(),
                post_id,
                parent_id: Some(root_id),
                name: "Dana".to_owned(),
                content: "Thanks!".to_owned(),
                date: now.into(),
                likes: 0,
                dislikes: 0,
            },
        ]])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);
    let comments = repo.list_for_post(post_id).await.unwrap();

    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].likes, 2);
    assert_eq!(comments[1].parent_id, Some(root_id));
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let result = BaseRepository::<BlogPost, Uuid>::delete(&repo, Uuid::new_v4()).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_increment_existing_reaction_row() {
    let post_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results(vec![vec![reaction::Model {
            post_id,
            like_count: 4,
            love_count: 1,
            clap_count: 0,
        }]])
        .into_connection();

    let repo = PostgresReactionRepository::new(db);
    let counts = repo.increment(post_id, ReactionKind::Like).await.unwrap();

    assert_eq!(counts.like, 4);
    assert_eq!(counts.total(), 5);
}

#[tokio::test]
async fn test_comment_like_updates_in_place() {
    let id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results(vec![vec![comment::Model {
            id,
            post_id: Uuid::new_v4(),
            parent_id: None,
            name: "Sam".to_owned(),
            content: "Nice".to_owned(),
            date: Utc::now().into(),
            likes: 7,
            dislikes: 1,
        }]])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);
    let comment = repo.increment_vote(id, CommentVote::Like).await.unwrap();

    assert_eq!(comment.likes, 7);
    assert_eq!(comment.dislikes, 1);
}

#[tokio::test]
async fn test_comment_vote_on_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresCommentRepository::new(db);
    let result = repo.increment_vote(Uuid::new_v4(), CommentVote::Dislike).await;

    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_poll_vote_updates_in_place() {
    let id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results(vec![vec![poll::Model {
            id,
            question: "Tabs or spaces?".to_owned(),
            options: serde_json::json!([
                {"text": "Tabs", "votes": 3},
                {"text": "Spaces", "votes": 5}
            ]),
            end_date: None,
            created_at: Utc::now().into(),
        }]])
        .into_connection();

    let repo = PostgresPollRepository::new(db);
    let poll = repo.increment_vote(id, 1).await.unwrap();

    assert_eq!(poll.options[1].votes, 5);
    assert_eq!(poll.total_votes(), 8);
}
