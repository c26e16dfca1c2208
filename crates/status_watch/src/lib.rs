//! Availability watcher for Tagstore deployments.
//!
//! Each run probes the production and sandbox instances, compares what it
//! saw against the previous run's snapshot, and posts status transitions
//! to a configured feed. Designed to be driven by cron; a run does its
//! checks and exits.
//!
//! ## Configuration
//!
//! The config is a JSON file, read from `$STATUS_WATCH_CONFIG` when set
//! and from `~/.status-watch.json` otherwise:
//!
//! ```json
//! {
//!   "feed": {
//!     "endpoint": "https://feed.example/api/statuses/update.json",
//!     "username": "tagstore-status",
//!     "password": "hunter2"
//!   },
//!   "snapshot_file": "/var/lib/status-watch/snapshot.json",
//!   "log_file": "/var/log/status-watch.log",
//!   "instances": {
//!     "production": "https://api.tagstore.io",
//!     "sandbox": "https://sandbox.tagstore.io"
//!   }
//! }
//! ```
//!
//! Contract notes:
//! - `feed`, `snapshot_file` and `log_file` are required.
//! - `instances` is optional; omitted entries fall back to the public
//!   deployments.
//! - Unknown JSON fields are rejected.

pub mod checks;
pub mod config;
pub mod error;
pub mod feed;
pub mod watch;

pub use checks::{CheckOutcome, Instance};
pub use config::{FeedConfig, InstanceOverrides, WatchConfig};
pub use error::WatchError;
pub use feed::{HttpFeed, StatusFeed};
pub use watch::{apply_reports, built_in_checks, run_checks, CheckDefinition, CheckReport};
