//! Rutas del roster de pasajeros

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};

use crate::controllers::passenger_controller::PassengerController;
use crate::dto::passenger_dto::{
    CreatePassengerRequest, ListPassengersQuery, PassengerResponse, UpdatePassengerRequest,
};
use crate::dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_passenger_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_passenger))
        .route("/", get(list_passengers))
        .route("/:id", get(get_passenger))
        .route("/:id", put(update_passenger))
        .route("/:id", delete(delete_passenger))
        .route("/:id/toggle", post(toggle_passenger))
}

async fn list_passengers(
    State(state): State<AppState>,
    Query(query): Query<ListPassengersQuery>,
) -> Result<Json<Vec<PassengerResponse>>, AppError> {
    let controller = PassengerController::new(state.store.clone());
    Ok(Json(controller.list(query).await?))
}

async fn get_passenger(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PassengerResponse>, AppError> {
    let controller = PassengerController::new(state.store.clone());
    Ok(Json(controller.get(&id).await?))
}

async fn create_passenger(
    State(state): State<AppState>,
    Json(request): Json<CreatePassengerRequest>,
) -> Result<Json<ApiResponse<PassengerResponse>>, AppError> {
    let controller = PassengerController::new(state.store.clone());
    Ok(Json(controller.create(request).await?))
}

async fn update_passenger(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdatePassengerRequest>,
) -> Result<Json<ApiResponse<PassengerResponse>>, AppError> {
    let controller = PassengerController::new(state.store.clone());
    Ok(Json(controller.update(&id, request).await?))
}

async fn toggle_passenger(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PassengerResponse>>, AppError> {
    let controller = PassengerController::new(state.store.clone());
    Ok(Json(controller.toggle_active(&id).await?))
}

async fn delete_passenger(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = PassengerController::new(state.store.clone());
    controller.delete(&id).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Pasajero eliminado exitosamente"
    })))
}
