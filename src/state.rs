//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::config::environment::EnvironmentConfig;
use crate::services::checkin_station::CheckinStation;
use crate::store::RealtimeStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RealtimeStore>,
    pub config: EnvironmentConfig,
    /// Estación de registro compartida por los endpoints de check-in
    pub station: Arc<Mutex<CheckinStation>>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RealtimeStore>,
        config: EnvironmentConfig,
        station: CheckinStation,
    ) -> Self {
        Self {
            store,
            config,
            station: Arc::new(Mutex::new(station)),
        }
    }
}
