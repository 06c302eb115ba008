use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::model::FormatStyle;

/// Default number of rendered papers kept in the recent list.
pub const DEFAULT_HISTORY_CAPACITY: usize = 10;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("failed to access history file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("history file '{path}' is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// One rendered paper kept for the "recent samples" view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: Uuid,
    pub title: String,
    pub style: FormatStyle,
    pub markup: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryRecord {
    /// Create a record stamped with a fresh id and the current time.
    /// An empty title is stored as "Untitled Paper".
    pub fn new(title: &str, style: FormatStyle, markup: String) -> Self {
        let title = title.trim();
        Self {
            id: Uuid::new_v4(),
            title: if title.is_empty() {
                "Untitled Paper".to_string()
            } else {
                title.to_string()
            },
            style,
            markup,
            timestamp: Utc::now(),
        }
    }
}

/// Sink for rendered papers.
pub trait HistoryStore {
    fn append(&mut self, record: HistoryRecord);
}

/// Bounded most-recent-first list of rendered papers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentHistory {
    capacity: usize,
    records: VecDeque<HistoryRecord>,
}

impl Default for RecentHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl RecentHistory {
    /// A capacity of zero is treated as one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.front()
    }

    pub fn get(&self, id: Uuid) -> Option<&HistoryRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn remove(&mut self, id: Uuid) -> Option<HistoryRecord> {
        let pos = self.records.iter().position(|r| r.id == id)?;
        self.records.remove(pos)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Change the capacity, dropping the oldest records if needed.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.records.truncate(self.capacity);
    }
}

impl HistoryStore for RecentHistory {
    fn append(&mut self, record: HistoryRecord) {
        self.records.push_front(record);
        self.records.truncate(self.capacity);
    }
}

/// Default history location: `<cache_dir>/paperstyle/history.json`.
pub fn default_history_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("paperstyle").join("history.json"))
}

/// [`RecentHistory`] persisted as a JSON file.
///
/// Every `append` rewrites the file. A write failure is logged and the
/// in-memory list stays authoritative.
#[derive(Debug)]
pub struct JsonHistoryFile {
    path: PathBuf,
    history: RecentHistory,
}

impl JsonHistoryFile {
    /// Open the history at `path`. A missing file yields an empty history.
    pub fn open(path: impl Into<PathBuf>, capacity: usize) -> Result<Self, HistoryError> {
        let path = path.into();
        let mut history = match std::fs::read_to_string(&path) {
            Ok(content) => {
                serde_json::from_str::<RecentHistory>(&content).map_err(|source| {
                    HistoryError::Json {
                        path: path.clone(),
                        source,
                    }
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                RecentHistory::with_capacity(capacity)
            }
            Err(source) => return Err(HistoryError::Io { path, source }),
        };
        history.set_capacity(capacity);
        Ok(Self { path, history })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn history(&self) -> &RecentHistory {
        &self.history
    }

    pub fn clear(&mut self) -> Result<(), HistoryError> {
        self.history.clear();
        self.save()
    }

    pub fn save(&self) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| HistoryError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(&self.history).map_err(|source| {
            HistoryError::Json {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, json).map_err(|source| HistoryError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl HistoryStore for JsonHistoryFile {
    fn append(&mut self, record: HistoryRecord) {
        self.history.append(record);
        if let Err(e) = self.save() {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to persist history");
        }
    }
}
