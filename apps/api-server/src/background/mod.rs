//! Background jobs.

mod scheduler;

pub use scheduler::{Scheduler, start_background_jobs};
