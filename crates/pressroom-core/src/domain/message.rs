use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Identifiable, require};
use crate::error::DomainError;

/// Contact-form submission, optionally answered by an admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
    pub reply: Option<String>,
    pub replied_at: Option<DateTime<Utc>>,
}

impl Message {
    pub fn new(input: NewMessage) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            subject: input
                .subject
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            content: input.content.trim().to_string(),
            created_at: Utc::now(),
            read: false,
            reply: None,
            replied_at: None,
        }
    }

    /// Answering a message also marks it read.
    pub fn answer(&mut self, reply: &str) -> Result<(), DomainError> {
        require("reply", reply)?;
        self.reply = Some(reply.trim().to_string());
        self.replied_at = Some(Utc::now());
        self.read = true;
        Ok(())
    }
}

impl Identifiable for Message {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewMessage {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    pub content: String,
}

impl NewMessage {
    pub fn validate(&self) -> Result<(), DomainError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("content", &self.content)?;
        if !self.email.contains('@') {
            return Err(DomainError::Validation("email is not valid".to_string()));
        }
        Ok(())
    }
}
