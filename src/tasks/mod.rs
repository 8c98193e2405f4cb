//! Background Tasks Module
//!
//! # Tasks
//! - TTL Cleanup: Purges expired suggestion lists at the configured interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
