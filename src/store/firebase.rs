//! Cliente REST del Realtime Database
//!
//! Habla el protocolo REST del backend hosteado: `GET/PUT/PATCH/DELETE`
//! sobre `{path}.json`, un `PATCH` contra la raíz para escrituras
//! multi-path atómicas, y streaming SSE (`text/event-stream`) para las
//! suscripciones vivas.

use std::collections::BTreeMap;

use async_trait::async_trait;
use futures::StreamExt;
use rand::Rng;
use reqwest::Client;
use serde_json::{json, Map, Value};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::client::{RealtimeStore, Snapshot, StoreError, Subscription};
use super::tree;

/// Alfabeto de las claves push, ordenado para que las claves generadas
/// conserven el orden cronológico
const PUSH_CHARS: &[u8; 64] =
    b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

const SSE_CHANNEL_CAPACITY: usize = 32;

/// Cliente del store en tiempo real
#[derive(Clone)]
pub struct FirebaseClient {
    http: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl FirebaseClient {
    pub fn new(base_url: String, auth_token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
        }
    }

    /// URL REST para un path lógico; la raíz es `{base}/.json`
    fn url_for(&self, path: &str) -> String {
        let encoded = tree::split_path(path)
            .into_iter()
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        let mut url = format!("{}/{}.json", self.base_url, encoded);
        if let Some(token) = &self.auth_token {
            url.push_str("?auth=");
            url.push_str(token);
        }
        url
    }

    async fn read_body(response: reqwest::Response) -> Result<Value, StoreError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        if !status.is_success() {
            return Err(StoreError::Backend(format!("{}: {}", status, body)));
        }
        serde_json::from_str(&body).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl RealtimeStore for FirebaseClient {
    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let response = self
            .http
            .get(self.url_for(path))
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        let value = Self::read_body(response).await?;
        debug!("GET {} -> {}", path, if value.is_null() { "null" } else { "ok" });
        Ok(tree::prune(&value))
    }

    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError> {
        let response = self
            .http
            .put(self.url_for(path))
            .json(&value)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        Self::read_body(response).await?;
        Ok(())
    }

    async fn update(&self, path: &str, fields: Map<String, Value>) -> Result<(), StoreError> {
        let response = self
            .http
            .patch(self.url_for(path))
            .json(&Value::Object(fields))
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        Self::read_body(response).await?;
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), StoreError> {
        let response = self
            .http
            .delete(self.url_for(path))
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        Self::read_body(response).await?;
        Ok(())
    }

    async fn multi_update(
        &self,
        ops: BTreeMap<String, Option<Value>>,
    ) -> Result<(), StoreError> {
        // un PATCH con paths profundos contra la raíz es atómico en el
        // backend: o entran todas las escrituras o ninguna
        let mut body = Map::new();
        for (path, value) in ops {
            body.insert(path, value.unwrap_or(Value::Null));
        }
        let response = self
            .http
            .patch(self.url_for(""))
            .json(&Value::Object(body))
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        Self::read_body(response).await?;
        Ok(())
    }

    async fn subscribe(&self, path: &str) -> Result<Subscription, StoreError> {
        let (tx, rx) = mpsc::channel(SSE_CHANNEL_CAPACITY);
        let http = self.http.clone();
        let url = self.url_for(path);
        let path = path.to_string();
        let task = tokio::spawn(async move {
            if let Err(e) = stream_events(http, &url, tx).await {
                warn!("Suscripción a '{}' terminada con error: {}", path, e);
            }
        });
        Ok(Subscription::with_task(rx, task))
    }

    fn generate_id(&self) -> String {
        push_id()
    }

    fn server_timestamp(&self) -> Value {
        json!({ ".sv": "timestamp" })
    }
}

/// Clave push: 8 caracteres de timestamp en base 64 + 12 aleatorios,
/// el esquema de claves hijas del backend
fn push_id() -> String {
    let mut now = chrono::Utc::now().timestamp_millis();
    let mut id = [0u8; 20];
    for slot in id[..8].iter_mut().rev() {
        *slot = PUSH_CHARS[(now % 64) as usize];
        now /= 64;
    }
    let mut rng = rand::thread_rng();
    for slot in id[8..].iter_mut() {
        *slot = PUSH_CHARS[rng.gen_range(0..64)];
    }
    String::from_utf8_lossy(&id).into_owned()
}

/// Consumir el stream SSE del path y entregar un snapshot completo por
/// cada evento `put`/`patch`. Termina cuando el receptor se suelta.
async fn stream_events(
    http: Client,
    url: &str,
    tx: mpsc::Sender<Snapshot>,
) -> Result<(), StoreError> {
    let response = http
        .get(url)
        .header("Accept", "text/event-stream")
        .send()
        .await
        .map_err(|e| StoreError::Network(e.to_string()))?;
    if !response.status().is_success() {
        return Err(StoreError::Backend(format!(
            "stream rejected: {}",
            response.status()
        )));
    }

    let mut snapshot = Value::Null;
    let mut event = String::new();
    let mut data = String::new();
    let mut buffer = String::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| StoreError::Network(e.to_string()))?;
        buffer.push_str(&String::from_utf8_lossy(&chunk));

        while let Some(newline) = buffer.find('\n') {
            let line = buffer[..newline].trim_end_matches('\r').to_string();
            buffer.drain(..=newline);

            if line.is_empty() {
                // línea en blanco: fin del evento acumulado
                if apply_event(&mut snapshot, &event, &data)
                    && tx.send(tree::prune(&snapshot)).await.is_err()
                {
                    return Ok(());
                }
                event.clear();
                data.clear();
            } else if let Some(rest) = line.strip_prefix("event:") {
                event = rest.trim().to_string();
            } else if let Some(rest) = line.strip_prefix("data:") {
                data = rest.trim().to_string();
            }
        }
    }
    Ok(())
}

/// Plegar un evento del stream en el snapshot local. Devuelve true si el
/// snapshot cambió y hay que reenviarlo.
fn apply_event(snapshot: &mut Value, event: &str, data: &str) -> bool {
    match event {
        "put" | "patch" => {}
        // keep-alive, cancel, auth_revoked
        _ => return false,
    }

    let Ok(payload) = serde_json::from_str::<Value>(data) else {
        return false;
    };
    let path = payload
        .get("path")
        .and_then(Value::as_str)
        .unwrap_or("/")
        .to_string();
    let value = payload.get("data").cloned().unwrap_or(Value::Null);

    if event == "put" {
        tree::set_path(snapshot, &path, value);
        return true;
    }
    match value {
        Value::Object(fields) => {
            tree::merge_path(snapshot, &path, &fields);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_ids_use_the_expected_shape() {
        let id = push_id();
        assert_eq!(id.len(), 20);
        assert!(id.bytes().all(|b| PUSH_CHARS.contains(&b)));

        let other = push_id();
        assert_ne!(id, other);
    }

    #[test]
    fn url_encodes_path_segments() {
        let client = FirebaseClient::new(
            "https://demo.firebaseio.example".to_string(),
            Some("secreto".to_string()),
        );
        assert_eq!(
            client.url_for("passengers/p1"),
            "https://demo.firebaseio.example/passengers/p1.json?auth=secreto"
        );
        assert_eq!(
            client.url_for(""),
            "https://demo.firebaseio.example/.json?auth=secreto"
        );
    }

    #[test]
    fn put_events_replace_the_snapshot_path() {
        let mut snapshot = Value::Null;
        let changed = apply_event(
            &mut snapshot,
            "put",
            r#"{"path": "/", "data": {"t1": {"active": true}}}"#,
        );
        assert!(changed);
        assert_eq!(snapshot["t1"]["active"], true);

        apply_event(&mut snapshot, "put", r#"{"path": "/t1", "data": null}"#);
        assert_eq!(tree::prune(&snapshot), None);
    }

    #[test]
    fn patch_events_merge_fields() {
        let mut snapshot = serde_json::json!({"t1": {"active": true, "from": "A"}});
        let changed = apply_event(
            &mut snapshot,
            "patch",
            r#"{"path": "/t1", "data": {"active": false}}"#,
        );
        assert!(changed);
        assert_eq!(snapshot["t1"]["active"], false);
        assert_eq!(snapshot["t1"]["from"], "A");
    }

    #[test]
    fn keep_alive_events_are_ignored() {
        let mut snapshot = Value::Null;
        assert!(!apply_event(&mut snapshot, "keep-alive", "null"));
        assert!(!apply_event(&mut snapshot, "cancel", "null"));
    }
}
