//! Rutas de la API
//!
//! Este módulo arma el router principal a partir de los routers por
//! recurso.

pub mod checkin_routes;
pub mod passenger_routes;
pub mod trip_routes;

use axum::{response::Json, routing::get, Router};
use serde_json::json;

use crate::state::AppState;

/// Crear el router principal de la API
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/passenger", passenger_routes::create_passenger_router())
        .nest("/api/trip", trip_routes::create_trip_router())
        .nest("/api/checkin", checkin_routes::create_checkin_router())
}

/// Health check simple
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "service": "transport-attendance",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
