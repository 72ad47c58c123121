//! Contact message entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use pressroom_core::domain::Message;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "messages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: DateTimeWithTimeZone,
    pub read: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub reply: Option<String>,
    pub replied_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Message {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
            subject: model.subject,
            content: model.content,
            created_at: model.created_at.into(),
            read: model.read,
            reply: model.reply,
            replied_at: model.replied_at.map(Into::into),
        }
    }
}

impl From<Message> for ActiveModel {
    fn from(message: Message) -> Self {
        Self {
            id: Set(message.id),
            name: Set(message.name),
            email: Set(message.email),
            subject: Set(message.subject),
            content: Set(message.content),
            created_at: Set(message.created_at.into()),
            read: Set(message.read),
            reply: Set(message.reply),
            replied_at: Set(message.replied_at.map(Into::into)),
        }
    }
}
