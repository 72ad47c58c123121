use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Identifiable, require};
use crate::error::DomainError;

/// A published podcast episode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodcastEpisode {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub audio_url: String,
    pub episode_number: i32,
    /// Display duration such as `42:17`.
    pub duration: String,
    pub guests: Vec<String>,
    pub timestamps: Vec<EpisodeTimestamp>,
    pub image: Option<String>,
    pub published_date: DateTime<Utc>,
    #[serde(default)]
    pub comments: Vec<PodcastComment>,
}

/// Chapter marker inside an episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeTimestamp {
    pub time: String,
    pub label: String,
}

impl PodcastEpisode {
    pub fn new(input: NewPodcast) -> Self {
        let mut episode = Self {
            id: Uuid::new_v4(),
            title: String::new(),
            description: String::new(),
            audio_url: String::new(),
            episode_number: 0,
            duration: String::new(),
            guests: Vec::new(),
            timestamps: Vec::new(),
            image: None,
            published_date: Utc::now(),
            comments: Vec::new(),
        };
        episode.apply(input);
        episode
    }

    pub fn apply(&mut self, input: NewPodcast) {
        self.title = input.title.trim().to_string();
        self.description = input.description.trim().to_string();
        self.audio_url = input.audio_url.trim().to_string();
        self.episode_number = input.episode_number;
        self.duration = input.duration.trim().to_string();
        self.guests = input
            .guests
            .into_iter()
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty())
            .collect();
        self.timestamps = input.timestamps;
        self.image = input.image.filter(|i| !i.trim().is_empty());
        if let Some(date) = input.published_date {
            self.published_date = date;
        }
    }
}

impl Identifiable for PodcastEpisode {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPodcast {
    pub title: String,
    pub description: String,
    pub audio_url: String,
    pub episode_number: i32,
    pub duration: String,
    #[serde(default)]
    pub guests: Vec<String>,
    #[serde(default)]
    pub timestamps: Vec<EpisodeTimestamp>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub published_date: Option<DateTime<Utc>>,
}

impl NewPodcast {
    pub fn validate(&self) -> Result<(), DomainError> {
        require("title", &self.title)?;
        require("description", &self.description)?;
        require("audio_url", &self.audio_url)?;
        require("duration", &self.duration)?;
        if self.episode_number <= 0 {
            return Err(DomainError::Validation(
                "episode_number must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Listener comment on an episode. Podcast comments have no replies or votes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodcastComment {
    pub id: Uuid,
    pub episode_id: Uuid,
    pub name: String,
    pub content: String,
    pub date: DateTime<Utc>,
}

impl PodcastComment {
    pub fn new(episode_id: Uuid, name: &str, content: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            episode_id,
            name: name.trim().to_string(),
            content: content.trim().to_string(),
            date: Utc::now(),
        }
    }
}

impl Identifiable for PodcastComment {
    fn id(&self) -> Uuid {
        self.id
    }
}
