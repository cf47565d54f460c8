//! Local JSON document store.
//!
//! Each collection is one `<name>.json` file holding an object that maps generated
//! ids to documents, in insertion order. Writes replace the file via a temporary
//! sibling and a rename.

use std::fs;
use std::path::{Path, PathBuf};

use branch_engine::listing::DisplayOrdered;
use branch_engine::menu::Categorized;
use branch_engine::{Dated, Event, EventSink};
use chrono::NaiveDateTime;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

pub const EVENTS: &str = "events";
pub const MENU_ITEMS: &str = "menu_items";
pub const EXECUTIVES: &str = "executives";
pub const ANNOUNCEMENTS: &str = "announcements";
pub const ROOMS: &str = "rooms";
pub const POSTERS: &str = "event_posters";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed document in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not encode document: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A stored document with its generated identifier.
#[derive(Debug, Clone)]
pub struct Record<T> {
    pub id: String,
    pub doc: T,
}

impl<T: Dated> Dated for Record<T> {
    fn occurs_at(&self) -> NaiveDateTime {
        self.doc.occurs_at()
    }
}

impl<T: DisplayOrdered> DisplayOrdered for Record<T> {
    fn display_order(&self) -> u32 {
        self.doc.display_order()
    }
}

impl<T: Categorized> Categorized for Record<T> {
    fn category(&self) -> &str {
        self.doc.category()
    }
}

impl<T> AsRef<T> for Record<T> {
    fn as_ref(&self) -> &T {
        &self.doc
    }
}

#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StoreError::Io {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{}.json", collection))
    }

    fn read_collection(&self, collection: &str) -> Result<Map<String, Value>, StoreError> {
        let path = self.collection_path(collection);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_str(&raw).map_err(|source| StoreError::Json { path, source })
    }

    fn write_collection(
        &self,
        collection: &str,
        docs: &Map<String, Value>,
    ) -> Result<(), StoreError> {
        let path = self.collection_path(collection);
        let tmp = path.with_extension("json.tmp");
        let body = serde_json::to_string_pretty(docs)?;

        fs::write(&tmp, body).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        if let Err(source) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::Io { path, source });
        }
        Ok(())
    }

    /// Insert one document under a fresh id.
    pub fn insert<T: Serialize>(&self, collection: &str, doc: &T) -> Result<String, StoreError> {
        let mut ids = self.insert_batch(collection, std::slice::from_ref(doc))?;
        Ok(ids.remove(0))
    }

    /// Insert several documents in a single write.
    pub fn insert_batch<T: Serialize>(
        &self,
        collection: &str,
        docs: &[T],
    ) -> Result<Vec<String>, StoreError> {
        let mut existing = self.read_collection(collection)?;
        let mut ids = Vec::with_capacity(docs.len());
        for doc in docs {
            let id = Uuid::new_v4().to_string();
            existing.insert(id.clone(), serde_json::to_value(doc)?);
            ids.push(id);
        }
        self.write_collection(collection, &existing)?;
        info!(collection, count = ids.len(), "documents inserted");
        Ok(ids)
    }

    /// Every document in `collection`, in insertion order.
    pub fn list<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<Record<T>>, StoreError> {
        let path = self.collection_path(collection);
        self.read_collection(collection)?
            .into_iter()
            .map(|(id, value)| {
                serde_json::from_value(value)
                    .map(|doc| Record { id, doc })
                    .map_err(|source| StoreError::Json {
                        path: path.clone(),
                        source,
                    })
            })
            .collect()
    }

    /// The document stored under `id`, if any.
    pub fn get<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, StoreError> {
        let path = self.collection_path(collection);
        self.read_collection(collection)?
            .shift_remove(id)
            .map(|value| {
                serde_json::from_value(value).map_err(|source| StoreError::Json { path, source })
            })
            .transpose()
    }

    /// Replace the document under `id` in place. Returns whether it existed.
    pub fn update<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        doc: &T,
    ) -> Result<bool, StoreError> {
        let mut existing = self.read_collection(collection)?;
        let Some(slot) = existing.get_mut(id) else {
            debug!(collection, id, "update of unknown id");
            return Ok(false);
        };
        *slot = serde_json::to_value(doc)?;
        self.write_collection(collection, &existing)?;
        info!(collection, id, "document updated");
        Ok(true)
    }

    /// Number of documents in `collection`.
    pub fn count(&self, collection: &str) -> Result<usize, StoreError> {
        Ok(self.read_collection(collection)?.len())
    }

    /// Remove a document. Returns whether it existed.
    pub fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let mut existing = self.read_collection(collection)?;
        if existing.shift_remove(id).is_none() {
            debug!(collection, id, "delete of unknown id");
            return Ok(false);
        }
        self.write_collection(collection, &existing)?;
        info!(collection, id, "document deleted");
        Ok(true)
    }
}

impl EventSink for DocumentStore {
    type Error = StoreError;

    fn create(&mut self, event: &Event) -> Result<String, StoreError> {
        self.insert(EVENTS, event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        text: String,
    }

    fn scratch(name: &str) -> DocumentStore {
        let dir = std::env::temp_dir().join(format!("branch-store-{}-{}", name, Uuid::new_v4()));
        DocumentStore::open(dir).unwrap()
    }

    fn note(text: &str) -> Note {
        Note {
            text: text.to_string(),
        }
    }

    #[test]
    fn missing_collection_is_empty() {
        let store = scratch("empty");
        assert!(store.list::<Note>("notes").unwrap().is_empty());
        assert_eq!(store.count("notes").unwrap(), 0);
    }

    #[test]
    fn insert_then_list_keeps_order() {
        let store = scratch("order");
        let first = store.insert("notes", &note("first")).unwrap();
        let rest = store
            .insert_batch("notes", &[note("second"), note("third")])
            .unwrap();

        let records = store.list::<Note>("notes").unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec![first.as_str(), rest[0].as_str(), rest[1].as_str()]);
        assert_eq!(records[2].doc, note("third"));
    }

    #[test]
    fn delete_reports_existence() {
        let store = scratch("delete");
        let id = store.insert("notes", &note("gone")).unwrap();
        assert!(store.delete("notes", &id).unwrap());
        assert!(!store.delete("notes", &id).unwrap());
        assert_eq!(store.count("notes").unwrap(), 0);
    }

    #[test]
    fn update_replaces_in_place() {
        let store = scratch("update");
        let first = store.insert("notes", &note("first")).unwrap();
        let second = store.insert("notes", &note("second")).unwrap();

        assert!(store.update("notes", &first, &note("edited")).unwrap());
        assert!(!store.update("notes", "missing", &note("nope")).unwrap());

        let records = store.list::<Note>("notes").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, first);
        assert_eq!(records[0].doc, note("edited"));
        assert_eq!(records[1].id, second);
        assert_eq!(store.get::<Note>("notes", &second).unwrap(), Some(note("second")));
        assert_eq!(store.get::<Note>("notes", "missing").unwrap(), None);
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let store = scratch("rename");
        // A directory in the collection's place makes the rename fail.
        fs::create_dir_all(store.root().join("notes.json").join("blocker")).unwrap();

        let result = store.write_collection("notes", &Map::new());
        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert!(!store.root().join("notes.json.tmp").exists());
    }

    #[test]
    fn corrupt_collection_is_an_error() {
        let store = scratch("corrupt");
        fs::write(store.root().join("notes.json"), "{not json").unwrap();
        assert!(matches!(
            store.list::<Note>("notes"),
            Err(StoreError::Json { .. })
        ));
    }

    #[test]
    fn event_sink_writes_event_documents() {
        let mut store = scratch("sink");
        let events = branch_engine::EventDraft {
            title: "Bingo".to_string(),
            date: "2024-03-06".to_string(),
            start_time: "19:00".to_string(),
            description: "Wednesday bingo".to_string(),
            ..Default::default()
        }
        .to_events()
        .unwrap();

        let ids = branch_engine::publish(&mut store, &events).unwrap();
        let stored = store.list::<Event>(EVENTS).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, ids[0]);
        assert_eq!(stored[0].doc, events[0]);
    }
}
