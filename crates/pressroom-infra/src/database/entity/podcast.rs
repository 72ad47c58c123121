//! Podcast episode entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use pressroom_core::domain::PodcastEpisode;

use super::{from_json, to_json};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "podcasts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub audio_url: String,
    #[sea_orm(unique)]
    pub episode_number: i32,
    pub duration: String,
    pub guests: Json,
    pub timestamps: Json,
    pub image: Option<String>,
    pub published_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::podcast_comment::Entity")]
    PodcastComment,
}

impl Related<super::podcast_comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PodcastComment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PodcastEpisode {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            audio_url: model.audio_url,
            episode_number: model.episode_number,
            duration: model.duration,
            guests: from_json(model.guests),
            timestamps: from_json(model.timestamps),
            image: model.image,
            published_date: model.published_date.into(),
            comments: Vec::new(),
        }
    }
}

impl From<PodcastEpisode> for ActiveModel {
    fn from(episode: PodcastEpisode) -> Self {
        Self {
            id: Set(episode.id),
            title: Set(episode.title),
            description: Set(episode.description),
            audio_url: Set(episode.audio_url),
            episode_number: Set(episode.episode_number),
            duration: Set(episode.duration),
            guests: Set(to_json(&episode.guests)),
            timestamps: Set(to_json(&episode.timestamps)),
            image: Set(episode.image),
            published_date: Set(episode.published_date.into()),
        }
    }
}
