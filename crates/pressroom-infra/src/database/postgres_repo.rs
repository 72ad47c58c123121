//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder, Set, Value,
};
use uuid::Uuid;

use pressroom_core::domain::{
    BlogPost, Comment, CommentVote, Message, PodcastComment, PodcastEpisode, Poll, ReactionCounts,
    ReactionKind,
};
use pressroom_core::error::RepoError;
use pressroom_core::ports::{
    AdminAuthRepository, BaseRepository, CommentRepository, MessageRepository,
    PodcastCommentRepository, PodcastRepository, PollRepository, PostRepository,
    ReactionRepository,
};

use super::entity::admin_auth::{self, Entity as AdminAuthEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::message::{self, Entity as MessageEntity};
use super::entity::podcast::{self, Entity as PodcastEntity};
use super::entity::podcast_comment::{self, Entity as PodcastCommentEntity};
use super::entity::poll::{self, Entity as PollEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::reaction::{self, Entity as ReactionEntity};
use super::postgres_base::{PostgresBaseRepository, query_error, write_error};

pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;
pub type PostgresPodcastRepository = PostgresBaseRepository<PodcastEntity>;
pub type PostgresPodcastCommentRepository = PostgresBaseRepository<PodcastCommentEntity>;
pub type PostgresPollRepository = PostgresBaseRepository<PollEntity>;
pub type PostgresMessageRepository = PostgresBaseRepository<MessageEntity>;

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        let result = PostEntity::find()
            .order_by_desc(post::Column::PublishedDate)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, RepoError> {
        tracing::debug!(slug, "Finding post by slug");

        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into))
    }

    async fn upsert_by_slug(&self, mut post: BlogPost) -> Result<BlogPost, RepoError> {
        if let Some(existing) = self.find_by_slug(&post.slug).await? {
            post.id = existing.id;
        }
        BaseRepository::<BlogPost, Uuid>::save(self, post).await
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn list_for_post(&self, post_id: Uuid) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::Date)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn delete_for_post(&self, post_id: Uuid) -> Result<u64, RepoError> {
        let result = CommentEntity::delete_many()
            .filter(comment::Column::PostId.eq(post_id))
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected)
    }

    async fn increment_vote(&self, id: Uuid, vote: CommentVote) -> Result<Comment, RepoError> {
        let column = match vote {
            CommentVote::Like => comment::Column::Likes,
            CommentVote::Dislike => comment::Column::Dislikes,
        };

        let updated = CommentEntity::update_many()
            .col_expr(column, Expr::col(column).add(1))
            .filter(comment::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(query_error)?;
        if updated.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        BaseRepository::<Comment, Uuid>::find_by_id(self, id)
            .await?
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PodcastRepository for PostgresPodcastRepository {
    async fn list_all(&self) -> Result<Vec<PodcastEpisode>, RepoError> {
        let result = PodcastEntity::find()
            .order_by_desc(podcast::Column::EpisodeNumber)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PodcastCommentRepository for PostgresPodcastCommentRepository {
    async fn list_for_episode(&self, episode_id: Uuid) -> Result<Vec<PodcastComment>, RepoError> {
        let result = PodcastCommentEntity::find()
            .filter(podcast_comment::Column::EpisodeId.eq(episode_id))
            .order_by_asc(podcast_comment::Column::Date)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn delete_for_episode(&self, episode_id: Uuid) -> Result<u64, RepoError> {
        let result = PodcastCommentEntity::delete_many()
            .filter(podcast_comment::Column::EpisodeId.eq(episode_id))
            .exec(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.rows_affected)
    }
}

#[async_trait]
impl PollRepository for PostgresPollRepository {
    async fn list_all(&self) -> Result<Vec<Poll>, RepoError> {
        let result = PollEntity::find()
            .order_by_desc(poll::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn increment_vote(&self, id: Uuid, option_index: usize) -> Result<Poll, RepoError> {
        let index = i32::try_from(option_index)
            .map_err(|_| RepoError::Constraint(format!("poll has no option {}", option_index)))?;

        // Bump the counter inside the JSON array in a single statement.
        let updated = PollEntity::update_many()
            .col_expr(
                poll::Column::Options,
                Expr::cust_with_values(
                    "jsonb_set(options, ARRAY[($1)::text, 'votes'], \
                     to_jsonb(COALESCE((options -> ($1)::int ->> 'votes')::bigint, 0) + 1))",
                    [Value::from(index)],
                ),
            )
            .filter(poll::Column::Id.eq(id))
            .filter(Expr::cust_with_values(
                "jsonb_array_length(options) > $1",
                [Value::from(index)],
            ))
            .exec(&self.db)
            .await
            .map_err(query_error)?;
        if updated.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        BaseRepository::<Poll, Uuid>::find_by_id(self, id)
            .await?
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn list_all(&self) -> Result<Vec<Message>, RepoError> {
        let result = MessageEntity::find()
            .order_by_desc(message::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

/// PostgreSQL reaction counters.
pub struct PostgresReactionRepository {
    db: DbConn,
}

impl PostgresReactionRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn reaction_column(kind: ReactionKind) -> reaction::Column {
    match kind {
        ReactionKind::Like => reaction::Column::LikeCount,
        ReactionKind::Love => reaction::Column::LoveCount,
        ReactionKind::Clap => reaction::Column::ClapCount,
    }
}

#[async_trait]
impl ReactionRepository for PostgresReactionRepository {
    async fn list_all(&self) -> Result<Vec<(Uuid, ReactionCounts)>, RepoError> {
        let result = ReactionEntity::find()
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(|m| (m.post_id, m.into())).collect())
    }

    async fn find_for_post(&self, post_id: Uuid) -> Result<ReactionCounts, RepoError> {
        let result = ReactionEntity::find_by_id(post_id)
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(Into::into).unwrap_or_default())
    }

    async fn increment(
        &self,
        post_id: Uuid,
        kind: ReactionKind,
    ) -> Result<ReactionCounts, RepoError> {
        let column = reaction_column(kind);
        let mut first = ReactionCounts::default();
        first.increment(kind);

        // Insert the row or bump the counter in place, so concurrent first
        // reactions on a post neither collide nor get lost.
        ReactionEntity::insert(reaction::ActiveModel {
            post_id: Set(post_id),
            like_count: Set(first.like),
            love_count: Set(first.love),
            clap_count: Set(first.clap),
        })
        .on_conflict(
            OnConflict::column(reaction::Column::PostId)
                .value(column, Expr::col((ReactionEntity, column)).add(1))
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .map_err(write_error)?;

        self.find_for_post(post_id).await
    }

    async fn delete_for_post(&self, post_id: Uuid) -> Result<(), RepoError> {
        ReactionEntity::delete_by_id(post_id)
            .exec(&self.db)
            .await
            .map_err(query_error)?;
        Ok(())
    }
}

/// PostgreSQL admin PIN storage. The table holds a single row with id 1.
pub struct PostgresAdminAuthRepository {
    db: DbConn,
}

impl PostgresAdminAuthRepository {
    const ROW_ID: i32 = 1;

    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AdminAuthRepository for PostgresAdminAuthRepository {
    async fn pin_hash(&self) -> Result<Option<String>, RepoError> {
        let result = AdminAuthEntity::find_by_id(Self::ROW_ID)
            .one(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.map(|row| row.pin_hash))
    }

    async fn set_pin_hash(&self, hash: &str) -> Result<(), RepoError> {
        let row = admin_auth::ActiveModel {
            id: Set(Self::ROW_ID),
            pin_hash: Set(hash.to_string()),
            updated_at: Set(Utc::now().into()),
        };

        let exists = AdminAuthEntity::find_by_id(Self::ROW_ID)
            .one(&self.db)
            .await
            .map_err(query_error)?
            .is_some();

        if exists {
            row.update(&self.db).await.map_err(write_error)?;
        } else {
            row.insert(&self.db).await.map_err(write_error)?;
        }
        tracing::info!("Admin PIN hash updated");
        Ok(())
    }
}
