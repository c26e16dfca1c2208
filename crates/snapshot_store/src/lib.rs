//! Flat key/value snapshots persisted as pretty-printed JSON.
//!
//! Built for watchers that run, compare the world against what they saw
//! last time, and exit. State is small, human-inspectable, and loaded
//! whole.

mod error;
mod store;

pub use error::SnapshotStoreError;
pub use store::{Snapshot, SnapshotStore};
