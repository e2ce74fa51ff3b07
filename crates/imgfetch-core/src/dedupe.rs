//! Session duplicate set.

use std::collections::HashSet;

/// Content digests of images saved during one run.
///
/// Starts empty, grows by one entry per saved image, and is never persisted.
#[derive(Debug, Default, Clone)]
pub struct SeenHashes {
    hashes: HashSet<String>,
}

impl SeenHashes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, hash: &str) -> bool {
        self.hashes.contains(hash)
    }

    /// Records `hash`. Returns false if it was already present.
    pub fn insert(&mut self, hash: impl Into<String>) -> bool {
        self.hashes.insert(hash.into())
    }

    /// Forgets `hash` (used when the write that followed `insert` failed).
    pub fn remove(&mut self, hash: &str) -> bool {
        self.hashes.remove(hash)
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}
