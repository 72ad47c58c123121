//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use pressroom_core::domain::{BlogPost, ReactionCounts};

use super::{from_json, to_json};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub excerpt: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub image: Option<String>,
    pub category: String,
    pub tags: Json,
    pub author: String,
    pub published_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::comment::Entity")]
    Comment,
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to domain post. Comments and reactions live
/// in their own tables and start empty.
impl From<Model> for BlogPost {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            slug: model.slug,
            excerpt: model.excerpt,
            content: model.content,
            image: model.image,
            category: model.category,
            tags: from_json(model.tags),
            author: model.author,
            published_date: model.published_date.into(),
            comments: Vec::new(),
            reactions: ReactionCounts::default(),
        }
    }
}

/// Conversion from domain post to SeaORM ActiveModel.
impl From<BlogPost> for ActiveModel {
    fn from(post: BlogPost) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            slug: Set(post.slug),
            excerpt: Set(post.excerpt),
            content: Set(post.content),
            image: Set(post.image),
            category: Set(post.category),
            tags: Set(to_json(&post.tags)),
            author: Set(post.author),
            published_date: Set(post.published_date.into()),
        }
    }
}
