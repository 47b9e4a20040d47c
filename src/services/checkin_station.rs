//! Estado reactivo de la estación de registro
//!
//! Cada instancia es el estado de una vista: cache de pasajeros y lista de
//! asistencia del día, rehidratados por las suscripciones del store. Nada
//! vive en estado global de módulo, así pueden convivir varias estaciones
//! independientes y los tests inyectan su propio store.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::info;

use crate::models::Passenger;
use crate::services::checkin_service::{entries_from_snapshot, AttendanceEntry};
use crate::services::roster_service::passenger_map;
use crate::store::{paths, RealtimeStore};
use crate::utils::errors::AppError;
use crate::utils::validation::local_day_key;

pub struct CheckinStation {
    store: Arc<dyn RealtimeStore>,
    day: String,
    selected_trip: Option<String>,
    passengers: Arc<RwLock<HashMap<String, Passenger>>>,
    entries: Arc<RwLock<Vec<AttendanceEntry>>>,
    passengers_task: JoinHandle<()>,
    attendance_task: Option<JoinHandle<()>>,
}

impl CheckinStation {
    /// Estación para el día de hoy (fecha local)
    pub async fn new(store: Arc<dyn RealtimeStore>) -> Result<Self, AppError> {
        Self::for_day(store, local_day_key()).await
    }

    pub async fn for_day(
        store: Arc<dyn RealtimeStore>,
        day: String,
    ) -> Result<Self, AppError> {
        // cache de pasajeros para pintar nombres en la lista; el snapshot
        // inicial se consume acá para que la estación nazca hidratada
        let passengers = Arc::new(RwLock::new(HashMap::new()));
        let mut subscription = store.subscribe(paths::PASSENGERS).await?;
        if let Some(snapshot) = subscription.recv().await {
            *passengers.write().await = passenger_map(snapshot);
        }
        let cache = passengers.clone();
        let passengers_task = tokio::spawn(async move {
            while let Some(snapshot) = subscription.recv().await {
                *cache.write().await = passenger_map(snapshot);
            }
        });

        let mut station = Self {
            store,
            day,
            selected_trip: None,
            passengers,
            entries: Arc::new(RwLock::new(Vec::new())),
            passengers_task,
            attendance_task: None,
        };
        station.resubscribe().await?;
        Ok(station)
    }

    /// Cambiar la ruta seleccionada. Libera la suscripción de asistencia
    /// anterior y abre una nueva en el scope (día, ruta): a lo sumo una
    /// suscripción de asistencia viva por estación.
    pub async fn select_trip(&mut self, trip_id: Option<String>) -> Result<(), AppError> {
        info!(
            "Estación {}: ruta seleccionada -> {}",
            self.day,
            trip_id.as_deref().unwrap_or("(ninguna)")
        );
        self.selected_trip = trip_id;
        self.resubscribe().await
    }

    async fn resubscribe(&mut self) -> Result<(), AppError> {
        if let Some(task) = self.attendance_task.take() {
            task.abort();
        }

        let scope = paths::attendance_scope(&self.day, self.selected_trip.as_deref());
        let mut subscription = self.store.subscribe(&scope).await?;

        // snapshot inicial del scope nuevo, antes de soltar el control
        if let Some(snapshot) = subscription.recv().await {
            let joined = {
                let cache = self.passengers.read().await;
                entries_from_snapshot(snapshot, &cache)
            };
            *self.entries.write().await = joined;
        }

        let entries = self.entries.clone();
        let passengers = self.passengers.clone();

        self.attendance_task = Some(tokio::spawn(async move {
            while let Some(snapshot) = subscription.recv().await {
                let joined = {
                    let cache = passengers.read().await;
                    entries_from_snapshot(snapshot, &cache)
                };
                *entries.write().await = joined;
            }
        }));
        Ok(())
    }

    /// Lista de asistencia vigente, ya ordenada descendente por timestamp
    pub async fn entries(&self) -> Vec<AttendanceEntry> {
        self.entries.read().await.clone()
    }

    pub fn day(&self) -> &str {
        &self.day
    }

    pub fn selected_trip(&self) -> Option<&str> {
        self.selected_trip.as_deref()
    }
}

impl Drop for CheckinStation {
    fn drop(&mut self) {
        self.passengers_task.abort();
        if let Some(task) = self.attendance_task.take() {
            task.abort();
        }
    }
}
