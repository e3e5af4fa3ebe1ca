//! Memory Log
//!
//! Client-side view over what the assistant remembers about the user.
//! The authoritative store lives in the backend; this is the browsable,
//! searchable copy behind the memory page. Filtering combines a free-text
//! query with tag selection.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// How a memory was captured
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryKind {
    /// Free-form note
    Text,
    /// Image-derived memory
    Image,
    /// Extracted from a conversation
    Conversation,
}

/// One remembered fact
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Memory {
    /// Unique id
    pub id: String,
    /// Short display title
    pub title: String,
    /// The remembered content
    pub content: String,
    /// How the memory was captured
    pub kind: MemoryKind,
    /// Free-form tags for filtering
    pub tags: Vec<String>,
    /// When the memory was recorded
    pub created_at: DateTime<Utc>,
}

impl Memory {
    /// Create a memory recorded now
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        kind: MemoryKind,
        tags: Vec<String>,
    ) -> Self {
        Self {
            id: format!("mem_{}", uuid::Uuid::new_v4()),
            title: title.into(),
            content: content.into(),
            kind,
            tags,
            created_at: Utc::now(),
        }
    }

    fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.content.to_lowercase().contains(&query)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&query))
    }

    fn has_all_tags(&self, selected: &[String]) -> bool {
        selected.iter().all(|tag| self.tags.contains(tag))
    }
}

/// The browsable memory log
#[derive(Clone, Debug, Default)]
pub struct MemoryLog {
    memories: Vec<Memory>,
}

impl MemoryLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log seeded with the sample entries the memory page ships with
    #[must_use]
    pub fn with_samples() -> Self {
        let tags = |list: &[&str]| list.iter().map(ToString::to_string).collect::<Vec<_>>();
        let dated = |mut memory: Memory, year, month, day| {
            memory.created_at = Utc
                .with_ymd_and_hms(year, month, day, 0, 0, 0)
                .single()
                .unwrap_or_else(Utc::now);
            memory
        };
        Self {
            memories: vec![
                dated(
                    Memory::new(
                        "Favorite programming languages",
                        "User mentioned they prefer TypeScript over JavaScript for large projects",
                        MemoryKind::Conversation,
                        tags(&["programming", "preferences", "work"]),
                    ),
                    2024,
                    10,
                    15,
                ),
                dated(
                    Memory::new(
                        "Travel preferences",
                        "User enjoys beach destinations and prefers warm climates for vacations",
                        MemoryKind::Text,
                        tags(&["travel", "preferences", "personal"]),
                    ),
                    2024,
                    10,
                    10,
                ),
                dated(
                    Memory::new(
                        "Learning goals",
                        "User wants to learn machine learning and AI development in the next 6 months",
                        MemoryKind::Conversation,
                        tags(&["learning", "goals", "career"]),
                    ),
                    2024,
                    10,
                    5,
                ),
            ],
        }
    }

    /// All memories, newest first
    #[must_use]
    pub fn memories(&self) -> &[Memory] {
        &self.memories
    }

    /// Record a memory at the front of the log
    pub fn add(&mut self, memory: Memory) {
        self.memories.insert(0, memory);
    }

    /// Remove a memory by id; `false` when the id is unknown
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.memories.len();
        self.memories.retain(|m| m.id != id);
        self.memories.len() != before
    }

    /// Every tag in use, sorted and deduplicated
    #[must_use]
    pub fn all_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = self
            .memories
            .iter()
            .flat_map(|m| m.tags.iter().cloned())
            .collect();
        tags.sort();
        tags.dedup();
        tags
    }

    /// Memories matching a free-text query and carrying every selected tag
    #[must_use]
    pub fn search(&self, query: &str, selected_tags: &[String]) -> Vec<&Memory> {
        self.memories
            .iter()
            .filter(|m| m.matches_query(query) && m.has_all_tags(selected_tags))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn tagged(title: &str, tags: &[&str]) -> Memory {
        Memory::new(
            title,
            format!("{title} content"),
            MemoryKind::Text,
            tags.iter().map(ToString::to_string).collect(),
        )
    }

    #[test]
    fn test_all_tags_sorted_unique() {
        let mut log = MemoryLog::new();
        log.add(tagged("a", &["work", "ideas"]));
        log.add(tagged("b", &["ideas", "personal"]));

        assert_eq!(log.all_tags(), vec!["ideas", "personal", "work"]);
    }

    #[test]
    fn test_search_matches_title_content_and_tags() {
        let mut log = MemoryLog::new();
        log.add(tagged("Coffee order", &["food"]));
        log.add(tagged("Project deadline", &["work"]));

        assert_eq!(log.search("coffee", &[]).len(), 1);
        assert_eq!(log.search("DEADLINE", &[]).len(), 1);
        assert_eq!(log.search("work", &[]).len(), 1);
        assert_eq!(log.search("", &[]).len(), 2);
        assert_eq!(log.search("nothing", &[]).len(), 0);
    }

    #[test]
    fn test_search_requires_every_selected_tag() {
        let mut log = MemoryLog::new();
        log.add(tagged("a", &["work", "ideas"]));
        log.add(tagged("b", &["work"]));

        let selected = vec!["work".to_string(), "ideas".to_string()];
        let hits = log.search("", &selected);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "a");
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut log = MemoryLog::with_samples();
        let before = log.memories().len();
        assert!(!log.remove("mem_bogus"));
        assert_eq!(log.memories().len(), before);
    }
}
