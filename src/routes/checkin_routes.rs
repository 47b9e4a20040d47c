//! Rutas de la estación de registro

use axum::{
    extract::{Path, Query, State},
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::checkin_controller::CheckinController;
use crate::dto::checkin_dto::{AttendanceQuery, CheckinRequest, CheckinResponse, SelectTripRequest};
use crate::dto::ApiResponse;
use crate::services::checkin_service::AttendanceEntry;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_checkin_router() -> Router<AppState> {
    Router::new()
        .route("/", post(register_checkin))
        .route("/trip", put(select_trip))
        .route("/attendance", get(live_attendance))
        .route("/attendance/:day", get(attendance_for_day))
}

async fn register_checkin(
    State(state): State<AppState>,
    Json(request): Json<CheckinRequest>,
) -> Result<Json<ApiResponse<CheckinResponse>>, AppError> {
    let controller = CheckinController::new(state.store.clone());
    Ok(Json(controller.register(request).await?))
}

/// Cambiar la ruta de la estación compartida; la lista en vivo pasa a
/// observar el scope nuevo
async fn select_trip(
    State(state): State<AppState>,
    Json(request): Json<SelectTripRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if let Some(trip_id) = &request.trip_id {
        let controller = CheckinController::new(state.store.clone());
        controller.ensure_trip_exists(trip_id).await?;
    }

    let mut station = state.station.lock().await;
    station.select_trip(request.trip_id.clone()).await?;
    Ok(Json(serde_json::json!({
        "success": true,
        "trip_id": request.trip_id,
    })))
}

/// Lista en vivo de la estación (día actual, ruta seleccionada)
async fn live_attendance(
    State(state): State<AppState>,
) -> Result<Json<Vec<AttendanceEntry>>, AppError> {
    let station = state.station.lock().await;
    Ok(Json(station.entries().await))
}

async fn attendance_for_day(
    State(state): State<AppState>,
    Path(day): Path<String>,
    Query(query): Query<AttendanceQuery>,
) -> Result<Json<Vec<AttendanceEntry>>, AppError> {
    let controller = CheckinController::new(state.store.clone());
    Ok(Json(
        controller
            .attendance_for_day(&day, query.trip_id.as_deref())
            .await?,
    ))
}
