//! Rutas del directorio de rutas

use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::trip_controller::TripController;
use crate::dto::trip_dto::TripOptionResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_trip_router() -> Router<AppState> {
    Router::new().route("/", get(list_trips))
}

async fn list_trips(
    State(state): State<AppState>,
) -> Result<Json<Vec<TripOptionResponse>>, AppError> {
    let controller = TripController::new(state.store.clone());
    Ok(Json(controller.list().await?))
}
