//! DTOs del directorio de rutas

use serde::{Deserialize, Serialize};

// Opción seleccionable de ruta activa
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TripOptionResponse {
    pub id: String,
    pub label: String,
}
