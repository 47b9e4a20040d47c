//! Controller de la estación de registro

use std::sync::Arc;

use crate::dto::checkin_dto::{CheckinRequest, CheckinResponse};
use crate::dto::ApiResponse;
use crate::services::checkin_service::{preview_of, AttendanceEntry, CheckinService};
use crate::services::trip_service::TripService;
use crate::store::RealtimeStore;
use crate::utils::errors::AppError;
use crate::utils::validation::parse_day_key;

pub struct CheckinController {
    service: CheckinService,
    trips: TripService,
}

impl CheckinController {
    pub fn new(store: Arc<dyn RealtimeStore>) -> Self {
        Self {
            service: CheckinService::new(store.clone()),
            trips: TripService::new(store),
        }
    }

    pub async fn register(
        &self,
        request: CheckinRequest,
    ) -> Result<ApiResponse<CheckinResponse>, AppError> {
        let outcome = self
            .service
            .register(&request.code, request.direction, request.trip_id)
            .await?;

        let message = format!(
            "Registrado: {} ({})",
            outcome.passenger.data.name, outcome.direction
        );
        Ok(ApiResponse::success_with_message(
            CheckinResponse {
                record_id: outcome.record_id,
                day: outcome.day,
                direction: outcome.direction,
                trip_id: outcome.trip_id,
                passenger: preview_of(&outcome.passenger),
            },
            message,
        ))
    }

    /// Validar una ruta antes de seleccionarla en la estación
    pub async fn ensure_trip_exists(&self, trip_id: &str) -> Result<(), AppError> {
        self.trips.get(trip_id).await.map(|_| ())
    }

    /// Consulta puntual de asistencia para un día arbitrario
    pub async fn attendance_for_day(
        &self,
        day: &str,
        trip_id: Option<&str>,
    ) -> Result<Vec<AttendanceEntry>, AppError> {
        parse_day_key(day)
            .map_err(|_| AppError::Validation("Día inválido: usa YYYY-MM-DD.".to_string()))?;
        self.service.attendance_entries(day, trip_id).await
    }
}
