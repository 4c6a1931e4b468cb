//! Background Tasks Module
//!
//! Periodic maintenance tasks that run alongside the cache.

mod prune;

pub use prune::spawn_prune_task;
