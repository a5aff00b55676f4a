use crate::error::{DashboardError, Result};
use futures::channel::mpsc::{self, UnboundedSender};
use futures::stream::BoxStream;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Mutex;

/// A full document snapshot: opaque record key -> raw record object.
pub type RawRecordMap = Map<String, Value>;

/// The key-value document store the engine ingests from. Subscriptions
/// deliver full snapshots; each one completely replaces the previous record
/// set. An empty or absent document reads as zero records, not an error.
pub trait RecordStore {
    fn read_once(&self, path: &str) -> Result<RawRecordMap>;

    fn subscribe(&self, path: &str) -> BoxStream<'static, RawRecordMap>;
}

#[derive(Default)]
struct MemoryStoreInner {
    documents: HashMap<String, RawRecordMap>,
    watchers: HashMap<String, Vec<UnboundedSender<RawRecordMap>>>,
}

/// In-memory store used by tests and demos. `write` replaces a document and
/// pushes the new snapshot to every live subscriber; subscribers also
/// receive the current snapshot immediately on subscribe.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryStoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write(&self, path: &str, records: RawRecordMap) {
        let mut inner = self.inner.lock().unwrap();
        inner.documents.insert(path.to_string(), records.clone());

        if let Some(watchers) = inner.watchers.get_mut(path) {
            watchers.retain(|sender| sender.unbounded_send(records.clone()).is_ok());
        }
    }
}

impl RecordStore for MemoryStore {
    fn read_once(&self, path: &str) -> Result<RawRecordMap> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.documents.get(path).cloned().unwrap_or_default())
    }

    fn subscribe(&self, path: &str) -> BoxStream<'static, RawRecordMap> {
        let (sender, receiver) = mpsc::unbounded();
        let mut inner = self.inner.lock().unwrap();

        let current = inner.documents.get(path).cloned().unwrap_or_default();
        let _ = sender.unbounded_send(current);

        inner
            .watchers
            .entry(path.to_string())
            .or_default()
            .push(sender);

        Box::pin(receiver)
    }
}

/// Convenience constructor for store failures surfaced by adapters.
pub fn store_error(path: &str, details: impl Into<String>) -> DashboardError {
    DashboardError::Store {
        path: path.to_string(),
        details: details.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use serde_json::json;

    fn one_record_map(note: &str) -> RawRecordMap {
        let mut map = Map::new();
        map.insert("k1".to_string(), json!({ "Note": note }));
        map
    }

    #[test]
    fn test_read_once_missing_path_is_empty_not_error() {
        let store = MemoryStore::new();
        let map = store.read_once("expenses").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_write_then_read() {
        let store = MemoryStore::new();
        store.write("expenses", one_record_map("hello"));

        let map = store.read_once("expenses").unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["k1"]["Note"], "hello");
    }

    #[test]
    fn test_subscribe_receives_current_then_updates() {
        let store = MemoryStore::new();
        store.write("expenses", one_record_map("first"));

        let mut stream = store.subscribe("expenses");

        let initial = futures::executor::block_on(stream.next()).unwrap();
        assert_eq!(initial["k1"]["Note"], "first");

        store.write("expenses", one_record_map("second"));
        let update = futures::executor::block_on(stream.next()).unwrap();
        assert_eq!(update["k1"]["Note"], "second");
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let store = MemoryStore::new();
        let stream = store.subscribe("expenses");
        drop(stream);

        // next write must not fail or leak the dead sender
        store.write("expenses", one_record_map("x"));
        assert_eq!(store.inner.lock().unwrap().watchers["expenses"].len(), 0);
    }
}
