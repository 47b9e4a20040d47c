//! Controller del directorio de rutas

use std::sync::Arc;

use crate::dto::trip_dto::TripOptionResponse;
use crate::services::trip_service::TripService;
use crate::store::RealtimeStore;
use crate::utils::errors::AppError;

pub struct TripController {
    service: TripService,
}

impl TripController {
    pub fn new(store: Arc<dyn RealtimeStore>) -> Self {
        Self {
            service: TripService::new(store),
        }
    }

    /// Opciones de ruta activas para los selectores
    pub async fn list(&self) -> Result<Vec<TripOptionResponse>, AppError> {
        self.service.list_active().await
    }
}
