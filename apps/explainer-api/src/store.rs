//! In-memory document store
//!
//! Holds each uploaded document together with its analysis. Entries expire
//! after a fixed TTL and the store never holds more than `capacity`
//! documents: inserting into a full store evicts the oldest upload.
//! Nothing is persisted.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use shared_types::{Analysis, Document};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// A document and its analysis as kept by the store. Never mutated.
#[derive(Debug)]
pub struct StoredDocument {
    pub document: Document,
    pub analysis: Analysis,
    pub uploaded_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl StoredDocument {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

struct Entry {
    sequence: u64,
    stored: Arc<StoredDocument>,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<String, Entry>,
    next_sequence: u64,
}

/// Shared handle to the store; clones refer to the same documents
#[derive(Clone)]
pub struct DocumentStore {
    inner: Arc<RwLock<Inner>>,
    ttl: Option<chrono::Duration>,
    capacity: usize,
}

impl DocumentStore {
    /// `ttl` of `None` keeps documents until evicted for capacity.
    /// A `capacity` of zero is treated as one.
    pub fn new(ttl: Option<Duration>, capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            ttl: ttl.and_then(|d| chrono::Duration::from_std(d).ok()),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub async fn insert(&self, document: Document, analysis: Analysis) -> Arc<StoredDocument> {
        self.insert_at(document, analysis, Utc::now()).await
    }

    pub async fn insert_at(
        &self,
        document: Document,
        analysis: Analysis,
        now: DateTime<Utc>,
    ) -> Arc<StoredDocument> {
        let stored = Arc::new(StoredDocument {
            document,
            analysis,
            uploaded_at: now,
            expires_at: self.ttl.map(|ttl| now + ttl),
        });
        let id = stored.document.id.clone();

        let mut inner = self.inner.write().await;
        inner.entries.retain(|_, entry| !entry.stored.is_expired(now));

        while inner.entries.len() >= self.capacity && !inner.entries.contains_key(&id) {
            let oldest = inner
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.sequence)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    inner.entries.remove(&key);
                    info!(document_id = %key, "evicted oldest document, store at capacity");
                }
                None => break,
            }
        }

        let sequence = inner.next_sequence;
        inner.next_sequence += 1;
        inner.entries.insert(
            id,
            Entry {
                sequence,
                stored: stored.clone(),
            },
        );

        stored
    }

    pub async fn get(&self, id: &str) -> Option<Arc<StoredDocument>> {
        self.get_at(id, Utc::now()).await
    }

    /// Expired entries are reported as absent even before the sweeper runs
    pub async fn get_at(&self, id: &str, now: DateTime<Utc>) -> Option<Arc<StoredDocument>> {
        let inner = self.inner.read().await;
        inner
            .entries
            .get(id)
            .filter(|entry| !entry.stored.is_expired(now))
            .map(|entry| entry.stored.clone())
    }

    /// Number of live documents
    pub async fn len(&self) -> usize {
        let now = Utc::now();
        let inner = self.inner.read().await;
        inner
            .entries
            .values()
            .filter(|entry| !entry.stored.is_expired(now))
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drop expired documents, returning how many were removed
    pub async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut inner = self.inner.write().await;
        let before = inner.entries.len();
        inner.entries.retain(|_, entry| !entry.stored.is_expired(now));
        before - inner.entries.len()
    }

    /// Periodically purge expired documents until the runtime shuts down
    pub fn spawn_sweeper(&self, every: Duration) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = store.purge_expired(Utc::now()).await;
                if removed > 0 {
                    info!(removed, "swept expired documents");
                } else {
                    debug!("sweep found no expired documents");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str) -> Document {
        Document::new(
            id.to_string(),
            format!("{id}.pdf"),
            "Tenant shall pay rent on the first day of each month.".to_string(),
            1,
            1024,
            "ab".repeat(32),
        )
    }

    fn analysis() -> Analysis {
        Analysis {
            summary: "A lease.".to_string(),
            key_clauses: vec![],
            obligations: vec![],
            risks: vec![],
            unusual_terms: vec![],
        }
    }

    #[tokio::test]
    async fn test_insert_then_get() {
        let store = DocumentStore::new(None, 10);
        store.insert(doc("doc_a"), analysis()).await;

        let stored = store.get("doc_a").await.unwrap();
        assert_eq!(stored.document.filename, "doc_a.pdf");
        assert!(stored.expires_at.is_none());
        assert!(store.get("doc_b").await.is_none());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_expired_document_is_not_found() {
        let store = DocumentStore::new(Some(Duration::from_secs(60)), 10);
        let t0 = Utc::now();
        store.insert_at(doc("doc_a"), analysis(), t0).await;

        assert!(store.get_at("doc_a", t0 + chrono::Duration::seconds(59)).await.is_some());
        assert!(store.get_at("doc_a", t0 + chrono::Duration::seconds(60)).await.is_none());
    }

    #[tokio::test]
    async fn test_purge_removes_only_expired() {
        let store = DocumentStore::new(Some(Duration::from_secs(60)), 10);
        let t0 = Utc::now();
        store.insert_at(doc("old"), analysis(), t0).await;
        store
            .insert_at(doc("new"), analysis(), t0 + chrono::Duration::seconds(30))
            .await;

        let removed = store.purge_expired(t0 + chrono::Duration::seconds(61)).await;
        assert_eq!(removed, 1);
        assert!(store
            .get_at("new", t0 + chrono::Duration::seconds(61))
            .await
            .is_some());
    }

    #[tokio::test]
    async fn test_full_store_evicts_oldest_first() {
        let store = DocumentStore::new(None, 2);
        let t0 = Utc::now();
        store.insert_at(doc("first"), analysis(), t0).await;
        store.insert_at(doc("second"), analysis(), t0).await;
        store.insert_at(doc("third"), analysis(), t0).await;

        assert!(store.get("first").await.is_none());
        assert!(store.get("second").await.is_some());
        assert!(store.get("third").await.is_some());
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_expired_entries_make_room_before_eviction() {
        let store = DocumentStore::new(Some(Duration::from_secs(10)), 2);
        let t0 = Utc::now();
        store.insert_at(doc("stale"), analysis(), t0).await;
        store
            .insert_at(doc("fresh"), analysis(), t0 + chrono::Duration::seconds(8))
            .await;
        store
            .insert_at(doc("newest"), analysis(), t0 + chrono::Duration::seconds(12))
            .await;

        let later = t0 + chrono::Duration::seconds(12);
        assert!(store.get_at("fresh", later).await.is_some());
        assert!(store.get_at("newest", later).await.is_some());
    }

    #[tokio::test]
    async fn test_zero_capacity_holds_one() {
        let store = DocumentStore::new(None, 0);
        assert_eq!(store.capacity(), 1);
        store.insert(doc("a"), analysis()).await;
        store.insert(doc("b"), analysis()).await;
        assert!(store.get("a").await.is_none());
        assert!(store.get("b").await.is_some());
    }

    #[tokio::test]
    async fn test_sweeper_purges_in_background() {
        let store = DocumentStore::new(Some(Duration::from_millis(1)), 10);
        store
            .insert_at(doc("a"), analysis(), Utc::now() - chrono::Duration::seconds(5))
            .await;

        let handle = store.spawn_sweeper(Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(store.inner.read().await.entries.len(), 0);
        handle.abort();
    }
}
