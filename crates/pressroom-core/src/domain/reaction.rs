use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The reactions a reader can leave on a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Love,
    Clap,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 3] = [ReactionKind::Like, ReactionKind::Love, ReactionKind::Clap];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Love => "love",
            ReactionKind::Clap => "clap",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "like" => Ok(ReactionKind::Like),
            "love" => Ok(ReactionKind::Love),
            "clap" => Ok(ReactionKind::Clap),
            other => Err(DomainError::Validation(format!(
                "unknown reaction '{}', expected like, love or clap",
                other
            ))),
        }
    }
}

/// Per-post reaction counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionCounts {
    pub like: i64,
    pub love: i64,
    pub clap: i64,
}

impl ReactionCounts {
    pub fn get(&self, kind: ReactionKind) -> i64 {
        match kind {
            ReactionKind::Like => self.like,
            ReactionKind::Love => self.love,
            ReactionKind::Clap => self.clap,
        }
    }

    pub fn increment(&mut self, kind: ReactionKind) {
        match kind {
            ReactionKind::Like => self.like += 1,
            ReactionKind::Love => self.love += 1,
            ReactionKind::Clap => self.clap += 1,
        }
    }

    pub fn total(&self) -> i64 {
        self.like + self.love + self.clap
    }

    /// Keep the larger of each counter.
    pub fn merge_max(&mut self, other: ReactionCounts) {
        self.like = self.like.max(other.like);
        self.love = self.love.max(other.love);
        self.clap = self.clap.max(other.clap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind() {
        assert_eq!("Love".parse::<ReactionKind>().unwrap(), ReactionKind::Love);
        assert!("wow".parse::<ReactionKind>().is_err());
    }

    #[test]
    fn test_increment_and_total() {
        let mut counts = ReactionCounts::default();
        counts.increment(ReactionKind::Clap);
        counts.increment(ReactionKind::Clap);
        counts.increment(ReactionKind::Like);
        assert_eq!(counts.get(ReactionKind::Clap), 2);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_merge_max_never_lowers_counts() {
        let mut current = ReactionCounts { like: 3, love: 0, clap: 1 };
        current.merge_max(ReactionCounts { like: 2, love: 1, clap: 1 });
        assert_eq!(current, ReactionCounts { like: 3, love: 1, clap: 1 });
    }
}
