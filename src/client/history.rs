//! The bounded, newest-first list of recently sent queries.

use serde::{Deserialize, Serialize};

use super::model::SavedQuery;
use super::storage::KeyValueStore;
use super::ClientError;

pub const MAX_RECENT_QUERIES: usize = 10;

/// Storage key holding the serialized list.
pub const RECENT_QUERIES_KEY: &str = "recentQueries";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecentQueries {
    entries: Vec<SavedQuery>,
}

impl RecentQueries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the list from `store`. A blob that does not decode is logged and
    /// replaced by an empty list.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self, ClientError> {
        let Some(blob) = store.get(RECENT_QUERIES_KEY)? else {
            return Ok(Self::new());
        };

        match serde_json::from_str::<Vec<SavedQuery>>(&blob) {
            Ok(mut entries) => {
                entries.truncate(MAX_RECENT_QUERIES);
                Ok(Self { entries })
            }
            Err(e) => {
                tracing::warn!("Failed to parse saved queries: {}", e);
                Ok(Self::new())
            }
        }
    }

    pub fn persist(&self, store: &dyn KeyValueStore) -> Result<(), ClientError> {
        let blob = serde_json::to_string(&self.entries)?;
        store.set(RECENT_QUERIES_KEY, &blob)?;
        Ok(())
    }

    /// Puts `query` at the front, dropping any entry with the same URL and
    /// method and evicting past the cap.
    pub fn record(&mut self, query: SavedQuery) {
        self.entries.retain(|q| !q.same_target(&query));
        self.entries.insert(0, query);
        self.entries.truncate(MAX_RECENT_QUERIES);
    }

    /// Removes the entry with `id`, returning whether one existed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|q| q.id != id);
        self.entries.len() != before
    }

    pub fn find(&self, id: &str) -> Option<&SavedQuery> {
        self.entries.iter().find(|q| q.id == id)
    }

    /// An id derived from `timestamp` that no current entry uses.
    pub fn next_id(&self, timestamp: i64) -> String {
        let mut candidate = timestamp;
        while self.find(&candidate.to_string()).is_some() {
            candidate += 1;
        }
        candidate.to_string()
    }

    pub fn entries(&self) -> &[SavedQuery] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::model::{DraftRequest, HttpMethod};
    use crate::client::storage::MemoryStore;

    fn query(id: i64, method: HttpMethod, url: &str, body: &str) -> SavedQuery {
        let draft = DraftRequest {
            method,
            url: url.to_string(),
            body: body.to_string(),
            ..Default::default()
        };
        SavedQuery::snapshot(&draft, id.to_string(), id)
    }

    #[test]
    fn test_record_dedupes_by_url_and_method() {
        let mut recent = RecentQueries::new();
        recent.record(query(1, HttpMethod::Post, "https://a.test", "{\"v\":1}"));
        recent.record(query(2, HttpMethod::Get, "https://a.test", ""));
        recent.record(query(3, HttpMethod::Post, "https://a.test", "{\"v\":2}"));

        let entries = recent.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "3");
        assert_eq!(entries[0].body, "{\"v\":2}");
        assert_eq!(entries[1].id, "2");
        assert_eq!(
            entries
                .iter()
                .filter(|q| q.url == "https://a.test" && q.method == HttpMethod::Post)
                .count(),
            1
        );
    }

    #[test]
    fn test_cap_evicts_oldest() {
        let mut recent = RecentQueries::new();
        for i in 0..11 {
            recent.record(query(i, HttpMethod::Get, &format!("https://a.test/{i}"), ""));
        }
        assert_eq!(recent.len(), MAX_RECENT_QUERIES);
        assert_eq!(recent.entries()[0].url, "https://a.test/10");
        assert!(recent.entries().iter().all(|q| q.url != "https://a.test/0"));
    }

    #[test]
    fn test_remove_and_next_id() {
        let mut recent = RecentQueries::new();
        recent.record(query(100, HttpMethod::Get, "https://a.test", ""));
        assert_eq!(recent.next_id(100), "101");
        assert_eq!(recent.next_id(50), "50");

        assert!(recent.remove("100"));
        assert!(!recent.remove("100"));
        assert!(recent.is_empty());
    }

    #[test]
    fn test_persist_and_load() {
        let store = MemoryStore::new();
        let mut recent = RecentQueries::new();
        recent.record(query(1, HttpMethod::Delete, "https://a.test/1", ""));
        recent.persist(&store).unwrap();

        let blob = store.get(RECENT_QUERIES_KEY).unwrap().unwrap();
        assert!(blob.starts_with('['));
        assert!(blob.contains("\"method\":\"DELETE\""));

        assert_eq!(RecentQueries::load(&store).unwrap(), recent);
    }

    #[test]
    fn test_corrupt_blob_loads_empty() {
        let store = MemoryStore::new();
        store.set(RECENT_QUERIES_KEY, "{not a list").unwrap();
        assert!(RecentQueries::load(&store).unwrap().is_empty());
        assert!(RecentQueries::load(&MemoryStore::new()).unwrap().is_empty());
    }
}
