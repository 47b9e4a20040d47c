//! Paths lógicos del store
//!
//! Este módulo centraliza la construcción de los paths que usa el sistema.

/// Colección de pasajeros
pub const PASSENGERS: &str = "passengers";

/// Colección de rutas
pub const TRIPS: &str = "trips";

pub fn passenger(id: &str) -> String {
    format!("passengers/{}", id)
}

/// Índice secundario código → id de pasajero. El código ya debe venir
/// normalizado a mayúsculas.
pub fn code(code: &str) -> String {
    format!("codes/{}", code)
}

pub fn trip(id: &str) -> String {
    format!("trips/{}", id)
}

/// Scope de asistencia de un día: `attendance/{día}` o, en la variante con
/// ruta, `attendance/{día}/{ruta}`
pub fn attendance_scope(day: &str, trip_id: Option<&str>) -> String {
    match trip_id {
        Some(trip_id) => format!("attendance/{}/{}", day, trip_id),
        None => format!("attendance/{}", day),
    }
}

pub fn attendance_record(scope: &str, record_id: &str) -> String {
    format!("{}/{}", scope, record_id)
}
