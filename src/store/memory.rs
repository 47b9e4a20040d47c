//! Store en memoria
//!
//! Implementación en proceso de `RealtimeStore` con la misma semántica que
//! el backend hosteado: sentinels de timestamp resueltos al escribir,
//! escrituras multi-path atómicas y suscripciones que entregan un snapshot
//! inicial y uno por cada cambio. Es el fake que usan los tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Map, Value};
use tokio::sync::{mpsc, Mutex};
use uuid::Uuid;

use super::client::{RealtimeStore, Snapshot, StoreError, Subscription};
use super::tree;

const CHANNEL_CAPACITY: usize = 64;

struct Watcher {
    path: String,
    tx: mpsc::Sender<Snapshot>,
}

struct Inner {
    root: Value,
    watchers: Vec<Watcher>,
}

/// Store jerárquico en memoria
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                root: Value::Null,
                watchers: Vec::new(),
            })),
        }
    }
}

impl Inner {
    fn snapshot_at(&self, path: &str) -> Snapshot {
        tree::get_path(&self.root, path).and_then(tree::prune)
    }

    /// Notificar a cada watcher cuyo scope se superpone con alguno de los
    /// paths mutados. Los receivers cerrados se descartan.
    fn notify(&mut self, changed: &[String]) {
        let root = &self.root;
        self.watchers.retain(|watcher| {
            let affected = changed
                .iter()
                .any(|path| tree::overlaps(&watcher.path, path));
            if !affected {
                return !watcher.tx.is_closed();
            }
            let snapshot = tree::get_path(root, &watcher.path).and_then(tree::prune);
            match watcher.tx.try_send(snapshot) {
                Ok(()) => true,
                Err(mpsc::error::TrySendError::Full(_)) => true,
                Err(mpsc::error::TrySendError::Closed(_)) => false,
            }
        });
    }
}

/// Reemplazar los sentinels `{".sv": "timestamp"}` por el reloj actual,
/// como hace el backend al aplicar la escritura
fn resolve_timestamps(value: &mut Value, now_ms: i64) {
    match value {
        Value::Object(map) => {
            let is_sentinel =
                map.len() == 1 && map.get(".sv").map(|v| v == "timestamp").unwrap_or(false);
            if is_sentinel {
                *value = json!(now_ms);
                return;
            }
            for child in map.values_mut() {
                resolve_timestamps(child, now_ms);
            }
        }
        Value::Array(items) => {
            for child in items {
                resolve_timestamps(child, now_ms);
            }
        }
        _ => {}
    }
}

#[async_trait]
impl RealtimeStore for MemoryStore {
    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.snapshot_at(path))
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        let mut value = value;
        resolve_timestamps(&mut value, Utc::now().timestamp_millis());

        let mut inner = self.inner.lock().await;
        tree::set_path(&mut inner.root, path, value);
        inner.notify(&[path.to_string()]);
        Ok(())
    }

    async fn update(&self, path: &str, fields: Map<String, Value>) -> Result<(), StoreError> {
        let mut fields = fields;
        let now_ms = Utc::now().timestamp_millis();
        for value in fields.values_mut() {
            resolve_timestamps(value, now_ms);
        }

        let mut inner = self.inner.lock().await;
        tree::merge_path(&mut inner.root, path, &fields);
        inner.notify(&[path.to_string()]);
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        tree::remove_path(&mut inner.root, path);
        inner.notify(&[path.to_string()]);
        Ok(())
    }

    async fn multi_update(
        &self,
        ops: BTreeMap<String, Option<Value>>,
    ) -> Result<(), StoreError> {
        let now_ms = Utc::now().timestamp_millis();
        let mut inner = self.inner.lock().await;

        // todas las operaciones bajo el mismo lock: o entran todas o ninguna
        let changed: Vec<String> = ops.keys().cloned().collect();
        for (path, value) in ops {
            match value {
                Some(mut value) => {
                    resolve_timestamps(&mut value, now_ms);
                    tree::set_path(&mut inner.root, &path, value);
                }
                None => tree::remove_path(&mut inner.root, &path),
            }
        }
        inner.notify(&changed);
        Ok(())
    }

    async fn subscribe(&self, path: &str) -> Result<Subscription, StoreError> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let mut inner = self.inner.lock().await;

        // snapshot inicial inmediato, como onValue
        let initial = inner.snapshot_at(path);
        let _ = tx.try_send(initial);

        inner.watchers.push(Watcher {
            path: path.to_string(),
            tx,
        });
        Ok(Subscription::new(rx))
    }

    fn generate_id(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }

    fn server_timestamp(&self) -> Value {
        json!({ ".sv": "timestamp" })
    }
}
