//! Servicios del sistema
//!
//! Este módulo contiene la lógica de negocio de los tres componentes:
//! roster de pasajeros, directorio de rutas y estación de registro.

pub mod checkin_service;
pub mod checkin_station;
pub mod roster_service;
pub mod trip_service;

pub use checkin_service::CheckinService;
pub use checkin_station::CheckinStation;
pub use roster_service::RosterService;
pub use trip_service::{TripDirectory, TripService};
