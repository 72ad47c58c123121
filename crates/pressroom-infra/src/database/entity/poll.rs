//! Poll entity for SeaORM. Options and their counts are one JSON column.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use pressroom_core::domain::Poll;

use super::{from_json, to_json};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "polls")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub question: String,
    pub options: Json,
    pub end_date: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Poll {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            question: model.question,
            options: from_json(model.options),
            end_date: model.end_date.map(Into::into),
            created_at: model.created_at.into(),
        }
    }
}

impl From<Poll> for ActiveModel {
    fn from(poll: Poll) -> Self {
        Self {
            id: Set(poll.id),
            question: Set(poll.question),
            options: Set(to_json(&poll.options)),
            end_date: Set(poll.end_date.map(Into::into)),
            created_at: Set(poll.created_at.into()),
        }
    }
}
