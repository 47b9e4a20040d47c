//! Abstracción del store jerárquico en tiempo real
//!
//! Las capacidades son las del backend hosteado: lecturas puntuales,
//! escrituras puntuales y multi-path, merges de campos, borrados,
//! timestamps de servidor, claves únicas generadas y suscripciones vivas.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Errores del store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend rejected the operation: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Snapshot entregado por una suscripción. `None` significa que el path
/// no existe (o quedó vacío).
pub type Snapshot = Option<Value>;

/// Suscripción viva a un path del store.
///
/// Entrega un snapshot inicial y uno nuevo por cada cambio posterior.
/// Soltarla cancela la entrega: las vistas deben soltar su suscripción al
/// cambiar de scope para no recibir entregas duplicadas.
pub struct Subscription {
    rx: mpsc::Receiver<Snapshot>,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Suscripción alimentada directamente por el store (sin tarea propia)
    pub fn new(rx: mpsc::Receiver<Snapshot>) -> Self {
        Self { rx, task: None }
    }

    /// Suscripción alimentada por una tarea productora que se aborta al
    /// soltar la suscripción
    pub fn with_task(rx: mpsc::Receiver<Snapshot>, task: JoinHandle<()>) -> Self {
        Self {
            rx,
            task: Some(task),
        }
    }

    /// Esperar el siguiente snapshot. `None` cuando la suscripción terminó.
    pub async fn recv(&mut self) -> Option<Snapshot> {
        self.rx.recv().await
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Operaciones del store jerárquico en tiempo real
#[async_trait]
pub trait RealtimeStore: Send + Sync {
    /// Lectura puntual; `None` si el path no existe
    async fn get(&self, path: &str) -> Result<Option<Value>, StoreError>;

    /// Escritura puntual: reemplaza el valor completo del path
    async fn set(&self, path: &str, value: Value) -> Result<(), StoreError>;

    /// Merge de campos sobre el path (los campos no mencionados se conservan)
    async fn update(&self, path: &str, fields: Map<String, Value>) -> Result<(), StoreError>;

    /// Borrado puntual
    async fn remove(&self, path: &str) -> Result<(), StoreError>;

    /// Escritura atómica multi-path relativa a la raíz. `None` borra el
    /// path. Todas las operaciones se aplican juntas o ninguna.
    async fn multi_update(
        &self,
        ops: BTreeMap<String, Option<Value>>,
    ) -> Result<(), StoreError>;

    /// Suscripción viva al path
    async fn subscribe(&self, path: &str) -> Result<Subscription, StoreError>;

    /// Clave única para un hijo nuevo, generada del lado del cliente
    fn generate_id(&self) -> String;

    /// Sentinel que el backend reemplaza por su timestamp al escribir
    fn server_timestamp(&self) -> Value;
}
