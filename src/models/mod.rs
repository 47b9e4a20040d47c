//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que mapean exactamente
//! a los documentos del store (nombres de campo en camelCase).

pub mod attendance;
pub mod passenger;
pub mod trip;

pub use attendance::{AttendanceRecord, Direction};
pub use passenger::Passenger;
pub use trip::Trip;
