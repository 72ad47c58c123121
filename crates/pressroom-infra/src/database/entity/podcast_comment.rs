//! Podcast comment entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use pressroom_core::domain::PodcastComment;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "podcast_comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub episode_id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::podcast::Entity",
        from = "Column::EpisodeId",
        to = "super::podcast::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Podcast,
}

impl Related<super::podcast::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Podcast.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PodcastComment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            episode_id: model.episode_id,
            name: model.name,
            content: model.content,
            date: model.date.into(),
        }
    }
}

impl From<PodcastComment> for ActiveModel {
    fn from(comment: PodcastComment) -> Self {
        Self {
            id: Set(comment.id),
            episode_id: Set(comment.episode_id),
            name: Set(comment.name),
            content: Set(comment.content),
            date: Set(comment.date.into()),
        }
    }
}
