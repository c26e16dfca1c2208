use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::SnapshotStoreError;

/// The persisted key/value state, one string per key.
///
/// A `BTreeMap` keeps the file diff-stable: saving the same state twice
/// produces identical bytes.
pub type Snapshot = BTreeMap<String, String>;

/// A snapshot file on disk.
///
/// Load reads the whole state; save rewrites it. There is no appending
/// and no locking, matching the single-writer cron-style usage this
/// exists for.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot, treating a missing file as empty state.
    ///
    /// The first run of a watcher has no history yet; that must not be
    /// an error.
    pub fn load(&self) -> Result<Snapshot, SnapshotStoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(source) if source.kind() == ErrorKind::NotFound => {
                return Ok(Snapshot::new());
            }
            Err(source) => {
                return Err(SnapshotStoreError::io(
                    "reading snapshot file",
                    &self.path,
                    source,
                ));
            }
        };

        serde_json::from_str(&contents)
            .map_err(|source| SnapshotStoreError::parse(&self.path, source))
    }

    /// Replace the snapshot file with the given state.
    ///
    /// Parent directories are created as needed, so a fresh machine can
    /// run the watcher without setup.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| {
                    SnapshotStoreError::io("creating snapshot directory", &self.path, source)
                })?;
            }
        }

        let contents = serde_json::to_vec_pretty(snapshot)
            .map_err(|source| SnapshotStoreError::serialize(&self.path, source))?;
        fs::write(&self.path, contents)
            .map_err(|source| SnapshotStoreError::io("writing snapshot file", &self.path, source))
    }
}
