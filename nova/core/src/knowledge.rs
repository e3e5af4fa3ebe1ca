//! Knowledge Source Library
//!
//! Client-side list of the documents and websites fed into the backend's
//! vector index, with their indexing status. Actual ingestion is the
//! backend's job; this tracks what the knowledge page displays.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of source a knowledge item is
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Uploaded document
    Document,
    /// Crawled website
    Website,
}

/// Indexing lifecycle of a knowledge item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexStatus {
    /// Fully indexed and queryable
    Indexed,
    /// Indexed, but the source changed since
    Stale,
    /// Ingestion in progress
    Processing,
}

/// One knowledge source
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KnowledgeItem {
    /// Unique id
    pub id: String,
    /// Display title (file name or URL)
    pub title: String,
    /// Source kind
    pub kind: SourceKind,
    /// Current indexing status
    pub status: IndexStatus,
    /// When the source was added
    pub created_at: DateTime<Utc>,
    /// When the source was last indexed, if ever
    pub last_indexed: Option<DateTime<Utc>>,
}

impl KnowledgeItem {
    /// Create a freshly added source, not yet indexed
    pub fn new(title: impl Into<String>, kind: SourceKind) -> Self {
        Self {
            id: format!("src_{}", uuid::Uuid::new_v4()),
            title: title.into(),
            kind,
            status: IndexStatus::Processing,
            created_at: Utc::now(),
            last_indexed: None,
        }
    }
}

/// The knowledge source list
#[derive(Clone, Debug, Default)]
pub struct KnowledgeLibrary {
    items: Vec<KnowledgeItem>,
}

impl KnowledgeLibrary {
    /// Create an empty library
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All items, newest first
    #[must_use]
    pub fn items(&self) -> &[KnowledgeItem] {
        &self.items
    }

    /// Add a website source at the front of the list.
    ///
    /// Blank URLs are rejected with `None`.
    pub fn add_website(&mut self, url: &str) -> Option<&KnowledgeItem> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }
        self.items
            .insert(0, KnowledgeItem::new(url, SourceKind::Website));
        self.items.first()
    }

    /// Queue an item for re-indexing; no-op for unknown ids
    pub fn start_reindex(&mut self, id: &str) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.status = IndexStatus::Processing;
        }
    }

    /// Record that indexing finished; no-op for unknown ids
    pub fn mark_indexed(&mut self, id: &str) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.status = IndexStatus::Indexed;
            item.last_indexed = Some(Utc::now());
        }
    }

    /// Remove an item; `false` when the id is unknown
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }
}
