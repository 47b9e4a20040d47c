//! DTOs del roster de pasajeros

use serde::{Deserialize, Serialize};

// Request para crear un pasajero
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePassengerRequest {
    pub name: String,
    pub doc: String,
    pub code: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub default_trip: Option<String>,
}

fn default_active() -> bool {
    true
}

// Request para actualizar un pasajero: el formulario envía el estado
// completo, como en el modal de edición
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePassengerRequest {
    pub name: String,
    pub doc: String,
    pub code: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub active: bool,
    #[serde(default)]
    pub default_trip: Option<String>,
}

/// Filtro de actividad del listado
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveFilter {
    #[default]
    All,
    Active,
    Inactive,
}

// Query params del listado
#[derive(Debug, Default, Deserialize)]
pub struct ListPassengersQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub filter: ActiveFilter,
}

// Response de pasajero
#[derive(Debug, Serialize, Deserialize)]
pub struct PassengerResponse {
    pub id: String,
    pub name: String,
    pub doc: String,
    pub code: String,
    /// URL de foto ya resuelta (avatar por defecto si no hay foto)
    pub photo_url: String,
    pub active: bool,
    pub default_trip: Option<String>,
    pub created_at: Option<i64>,
}
