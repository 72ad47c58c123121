use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Identifiable, require};
use crate::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poll {
    pub id: Uuid,
    pub question: String,
    pub options: Vec<PollOption>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub text: String,
    pub votes: i64,
}

impl Poll {
    pub fn new(input: NewPoll) -> Self {
        Self {
            id: Uuid::new_v4(),
            question: input.question.trim().to_string(),
            options: input
                .options
                .into_iter()
                .map(|text| PollOption {
                    text: text.trim().to_string(),
                    votes: 0,
                })
                .collect(),
            end_date: input.end_date,
            created_at: Utc::now(),
        }
    }

    /// A poll accepts votes until its end date, or forever without one.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.end_date.is_none_or(|end| now < end)
    }

    pub fn total_votes(&self) -> i64 {
        self.options.iter().map(|o| o.votes).sum()
    }

    /// Whole-number share of the vote for each option, in option order.
    pub fn percentages(&self) -> Vec<u32> {
        let total = self.total_votes();
        self.options
            .iter()
            .map(|o| {
                if total == 0 {
                    0
                } else {
                    ((o.votes as f64 / total as f64) * 100.0).round() as u32
                }
            })
            .collect()
    }

    /// Refuse votes on closed polls and unknown options.
    pub fn check_vote(&self, option_index: usize, now: DateTime<Utc>) -> Result<(), DomainError> {
        if !self.is_active(now) {
            return Err(DomainError::Validation("poll has ended".to_string()));
        }
        if option_index >= self.options.len() {
            return Err(DomainError::Validation(format!(
                "poll has no option {}",
                option_index
            )));
        }
        Ok(())
    }

    /// Add one vote to `option_index`. Returns false when there is no such option.
    pub fn add_vote(&mut self, option_index: usize) -> bool {
        match self.options.get_mut(option_index) {
            Some(option) => {
                option.votes += 1;
                true
            }
            None => false,
        }
    }
}

impl Identifiable for Poll {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPoll {
    pub question: String,
    pub options: Vec<String>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

impl NewPoll {
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), DomainError> {
        require("question", &self.question)?;
        if self.options.len() < 2 {
            return Err(DomainError::Validation(
                "a poll needs at least two options".to_string(),
            ));
        }
        for option in &self.options {
            require("option", option)?;
        }
        if self.end_date.is_some_and(|end| end <= now) {
            return Err(DomainError::Validation(
                "end_date must be in the future".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn poll(end_date: Option<DateTime<Utc>>) -> Poll {
        Poll::new(NewPoll {
            question: "Tabs or spaces?".to_string(),
            options: vec!["Tabs".to_string(), "Spaces".to_string()],
            end_date,
        })
    }

    #[test]
    fn test_add_vote() {
        let mut poll = poll(None);
        assert!(poll.add_vote(1));
        assert!(poll.add_vote(1));
        assert!(poll.add_vote(0));
        assert_eq!(poll.total_votes(), 3);
        assert_eq!(poll.percentages(), vec![33, 67]);
        assert!(!poll.add_vote(2));
        assert!(poll.check_vote(2, Utc::now()).is_err());
        assert!(poll.check_vote(1, Utc::now()).is_ok());
    }

    #[test]
    fn test_closed_poll_rejects_votes() {
        let now = Utc::now();
        let mut poll = poll(Some(now - Duration::hours(1)));
        assert!(!poll.is_active(now));
        assert!(poll.check_vote(0, now).is_err());
    }

    #[test]
    fn test_validate() {
        let now = Utc::now();
        let single = NewPoll {
            question: "Q".to_string(),
            options: vec!["only".to_string()],
            end_date: None,
        };
        assert!(single.validate(now).is_err());

        let blank_option = NewPoll {
            question: "Q".to_string(),
            options: vec!["a".to_string(), "".to_string()],
            end_date: None,
        };
        assert!(blank_option.validate(now).is_err());

        let past = NewPoll {
            question: "Q".to_string(),
            options: vec!["a".to_string(), "b".to_string()],
            end_date: Some(now - Duration::days(1)),
        };
        assert!(past.validate(now).is_err());
    }

    #[test]
    fn test_percentages_without_votes() {
        assert_eq!(poll(None).percentages(), vec![0, 0]);
    }
}
