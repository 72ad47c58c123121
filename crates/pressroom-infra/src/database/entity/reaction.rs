//! Reaction counters, one row per post.

use sea_orm::entity::prelude::*;

use pressroom_core::domain::ReactionCounts;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub post_id: Uuid,
    pub like_count: i64,
    pub love_count: i64,
    pub clap_count: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ReactionCounts {
    fn from(model: Model) -> Self {
        Self {
            like: model.like_count,
            love: model.love_count,
            clap: model.clap_count,
        }
    }
}
