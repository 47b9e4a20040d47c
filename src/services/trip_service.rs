//! Directorio de rutas
//!
//! Solo lectura: las rutas se siembran de forma externa. El directorio
//! filtra las activas, computa el label de cada una y las publica como
//! lista ordenada de opciones seleccionables.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::dto::trip_dto::TripOptionResponse;
use crate::models::Trip;
use crate::store::{paths, RealtimeStore, Snapshot};
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::normalize_text;

pub struct TripService {
    store: Arc<dyn RealtimeStore>,
}

impl TripService {
    pub fn new(store: Arc<dyn RealtimeStore>) -> Self {
        Self { store }
    }

    /// Opciones de ruta activas, con label computado y ordenadas por label
    pub async fn list_active(&self) -> Result<Vec<TripOptionResponse>, AppError> {
        let snapshot = self.store.get(paths::TRIPS).await?;
        Ok(options_from_snapshot(snapshot))
    }

    pub async fn get(&self, id: &str) -> Result<Trip, AppError> {
        let value = self
            .store
            .get(&paths::trip(id))
            .await?
            .ok_or_else(|| not_found_error("Ruta", id))?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Directorio reactivo: mantiene una suscripción viva a `trips` y
/// republica la lista de opciones por un canal watch, de modo que
/// cualquier cantidad de vistas pueda observarla.
pub struct TripDirectory {
    options: watch::Receiver<Vec<TripOptionResponse>>,
    task: JoinHandle<()>,
}

impl TripDirectory {
    pub async fn new(store: Arc<dyn RealtimeStore>) -> Result<Self, AppError> {
        let mut subscription = store.subscribe(paths::TRIPS).await?;

        // el directorio nace con el snapshot inicial ya aplicado
        let initial = subscription.recv().await.flatten();
        let (tx, rx) = watch::channel(options_from_snapshot(initial));

        let task = tokio::spawn(async move {
            while let Some(snapshot) = subscription.recv().await {
                if tx.send(options_from_snapshot(snapshot)).is_err() {
                    break;
                }
            }
        });

        Ok(Self { options: rx, task })
    }

    /// Lista de opciones vigente
    pub fn options(&self) -> Vec<TripOptionResponse> {
        self.options.borrow().clone()
    }

    /// Observador para vistas que quieran reaccionar a cambios
    pub fn watch(&self) -> watch::Receiver<Vec<TripOptionResponse>> {
        self.options.clone()
    }
}

impl Drop for TripDirectory {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Filtrar activas, computar labels y ordenar
fn options_from_snapshot(snapshot: Snapshot) -> Vec<TripOptionResponse> {
    let Some(Value::Object(entries)) = snapshot else {
        return Vec::new();
    };

    let mut options: Vec<TripOptionResponse> = entries
        .into_iter()
        .filter_map(|(id, value)| match serde_json::from_value::<Trip>(value) {
            Ok(trip) if trip.active => Some(TripOptionResponse {
                label: trip.display_label(&id),
                id,
            }),
            Ok(_) => None,
            Err(e) => {
                warn!("Ruta '{}' con forma inesperada, ignorada: {}", id, e);
                None
            }
        })
        .collect();

    options.sort_by_key(|option| normalize_text(&option.label));
    options
}
