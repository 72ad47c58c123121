//! Comment entity for SeaORM. Replies share the table and point at their parent.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use pressroom_core::domain::Comment;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub post_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub date: DateTimeWithTimeZone,
    pub likes: i32,
    pub dislikes: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Comment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            post_id: model.post_id,
            parent_id: model.parent_id,
            name: model.name,
            content: model.content,
            date: model.date.into(),
            likes: model.likes,
            dislikes: model.dislikes,
            replies: Vec::new(),
        }
    }
}

impl From<Comment> for ActiveModel {
    fn from(comment: Comment) -> Self {
        Self {
            id: Set(comment.id),
            post_id: Set(comment.post_id),
            parent_id: Set(comment.parent_id),
            name: Set(comment.name),
            content: Set(comment.content),
            date: Set(comment.date.into()),
            likes: Set(comment.likes),
            dislikes: Set(comment.dislikes),
        }
    }
}
