//! Controller del roster de pasajeros

use std::sync::Arc;

use crate::dto::passenger_dto::{
    CreatePassengerRequest, ListPassengersQuery, PassengerResponse, UpdatePassengerRequest,
};
use crate::dto::ApiResponse;
use crate::services::roster_service::{PassengerDraft, PassengerRecord, RosterService};
use crate::store::RealtimeStore;
use crate::utils::errors::AppError;

pub struct PassengerController {
    service: RosterService,
}

impl PassengerController {
    pub fn new(store: Arc<dyn RealtimeStore>) -> Self {
        Self {
            service: RosterService::new(store),
        }
    }

    pub async fn list(
        &self,
        query: ListPassengersQuery,
    ) -> Result<Vec<PassengerResponse>, AppError> {
        let records = self
            .service
            .list(query.q.as_deref(), query.filter)
            .await?;
        Ok(records.into_iter().map(to_response).collect())
    }

    pub async fn get(&self, id: &str) -> Result<PassengerResponse, AppError> {
        Ok(to_response(self.service.get(id).await?))
    }

    pub async fn create(
        &self,
        request: CreatePassengerRequest,
    ) -> Result<ApiResponse<PassengerResponse>, AppError> {
        let record = self
            .service
            .create(PassengerDraft {
                name: request.name,
                doc: request.doc,
                code: request.code,
                photo_url: request.photo_url,
                active: request.active,
                default_trip: request.default_trip,
            })
            .await?;
        Ok(ApiResponse::success_with_message(
            to_response(record),
            "Pasajero creado exitosamente".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdatePassengerRequest,
    ) -> Result<ApiResponse<PassengerResponse>, AppError> {
        let record = self
            .service
            .update(
                id,
                PassengerDraft {
                    name: request.name,
                    doc: request.doc,
                    code: request.code,
                    photo_url: request.photo_url,
                    active: request.active,
                    default_trip: request.default_trip,
                },
            )
            .await?;
        Ok(ApiResponse::success_with_message(
            to_response(record),
            "Pasajero actualizado exitosamente".to_string(),
        ))
    }

    pub async fn toggle_active(
        &self,
        id: &str,
    ) -> Result<ApiResponse<PassengerResponse>, AppError> {
        let record = self.service.toggle_active(id).await?;
        let message = if record.data.active {
            "Pasajero activado".to_string()
        } else {
            "Pasajero desactivado".to_string()
        };
        Ok(ApiResponse::success_with_message(to_response(record), message))
    }

    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.service.delete(id).await
    }
}

fn to_response(record: PassengerRecord) -> PassengerResponse {
    PassengerResponse {
        id: record.id,
        photo_url: record.data.avatar_url(),
        name: record.data.name,
        doc: record.data.doc,
        code: record.data.code,
        active: record.data.active,
        default_trip: record.data.default_trip,
        created_at: record.data.created_at,
    }
}
