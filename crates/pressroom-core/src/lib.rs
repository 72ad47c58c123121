//! # Pressroom Core
//!
//! The domain layer of the Pressroom content service.
//! Entities, text helpers, the ports infrastructure must implement, and the
//! services that sit between the HTTP layer and the content store.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
pub use services::{ContentStore, VisitorState};
