//! DTOs de la estación de registro

use serde::{Deserialize, Serialize};

use crate::models::Direction;

// Request de registro de asistencia
#[derive(Debug, Clone, Deserialize)]
pub struct CheckinRequest {
    pub code: String,
    /// Dirección elegida por el operador; la ruta puede forzar otra
    #[serde(default)]
    pub direction: Option<Direction>,
    /// Ruta seleccionada; sin ruta se usa la variante simple por día
    #[serde(default)]
    pub trip_id: Option<String>,
}

// Preview del pasajero resuelto por código
#[derive(Debug, Serialize, Deserialize)]
pub struct PassengerPreview {
    pub id: String,
    pub name: String,
    pub code: String,
    pub doc: String,
    pub active: bool,
    pub photo_url: String,
}

// Response de un registro exitoso
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckinResponse {
    pub record_id: String,
    pub day: String,
    pub direction: Direction,
    pub trip_id: Option<String>,
    pub passenger: PassengerPreview,
}

// Request para cambiar la ruta de la estación
#[derive(Debug, Deserialize)]
pub struct SelectTripRequest {
    #[serde(default)]
    pub trip_id: Option<String>,
}

// Query params de consultas puntuales de asistencia
#[derive(Debug, Default, Deserialize)]
pub struct AttendanceQuery {
    #[serde(default)]
    pub trip_id: Option<String>,
}
