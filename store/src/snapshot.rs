//! Snapshot boundary: the typed records delivered by the upstream loader.

use crate::error::StoreError;
use ces_types::{Comment, Mission, Proposal, Rating, Reaction, User};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The six entity collections of one platform snapshot, as delivered upstream.
///
/// Reactions, upvotes and downvotes are already merged into one collection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub missions: Vec<Mission>,
    pub proposals: Vec<Proposal>,
    pub ratings: Vec<Rating>,
    pub comments: Vec<Comment>,
    pub reactions: Vec<Reaction>,
}

impl Snapshot {
    /// Parse a snapshot from its JSON encoding.
    pub fn from_json_str(s: &str) -> Result<Self, StoreError> {
        serde_json::from_str(s).map_err(|e| StoreError::Parse(e.to_string()))
    }

    /// Encode the snapshot as pretty JSON.
    pub fn to_json_string(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(self).map_err(|e| StoreError::Parse(e.to_string()))
    }
}

/// Anything that can deliver a snapshot: a file on disk, an upstream
/// extraction step, or an in-memory fixture in tests.
pub trait SnapshotSource {
    fn load_snapshot(&self) -> Result<Snapshot, StoreError>;
}

impl SnapshotSource for Snapshot {
    fn load_snapshot(&self) -> Result<Snapshot, StoreError> {
        Ok(self.clone())
    }
}

/// A snapshot stored as a JSON file.
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for JsonFileSource {
    fn load_snapshot(&self) -> Result<Snapshot, StoreError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        Snapshot::from_json_str(&content)
    }
}
