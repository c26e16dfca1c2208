//! Slash-separated resource paths.
//!
//! Namespaces and tags are addressed by paths such as `alice/books/rating`.
//! The empty string names the root namespace, so joining a child onto the
//! root yields the bare child name rather than a leading slash.

/// Join a child name onto a parent path.
#[must_use]
pub fn path_child(path: &str, child: &str) -> String {
    if path.is_empty() {
        child.to_owned()
    } else {
        format!("{path}/{child}")
    }
}

/// Split a path into its parent and final segment.
///
/// Returns `None` for a path without a separator, where no parent exists.
#[must_use]
pub fn path_split(path: &str) -> Option<(&str, &str)> {
    path.rsplit_once('/')
}
