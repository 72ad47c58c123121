//! SeaORM entities, one module per table.

pub mod admin_auth;
pub mod comment;
pub mod message;
pub mod podcast;
pub mod podcast_comment;
pub mod poll;
pub mod post;
pub mod reaction;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Decode a JSON column, falling back to the empty value on malformed data.
pub(crate) fn from_json<T: DeserializeOwned + Default>(value: sea_orm::prelude::Json) -> T {
    serde_json::from_value(value).unwrap_or_default()
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> sea_orm::prelude::Json {
    serde_json::to_value(value).unwrap_or(serde_json::Value::Null)
}
