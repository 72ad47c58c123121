//! Services - orchestration on top of the ports.

mod content;
mod visitor;

pub use content::{ContentRepositories, ContentStats, ContentStore};
pub use visitor::{DEFAULT_LANGUAGE, VisitorState};
