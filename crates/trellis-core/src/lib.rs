//! Core logic for trellis: the compatibility and care-window evaluators,
//! catalog fetch/sync, the placement service, and the snapshot watcher.
//!
//! The two evaluators ([`compat::partition`] and [`schedule::is_upcoming`])
//! are pure functions over value data. Everything async in this crate is
//! delivery plumbing around them: fetching snapshots, running transactions,
//! polling for changes.

pub mod catalog;
pub mod compat;
pub mod garden;
pub mod schedule;
pub mod watch;
