//! Modelo de registro de asistencia

use std::fmt;

use serde::{Deserialize, Serialize};

/// Dirección de embarque
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "IDA")]
    Ida,
    #[serde(rename = "VUELTA")]
    Vuelta,
}

impl Direction {
    /// Interpretar un texto de dirección ("IDA"/"VUELTA", sin distinguir
    /// mayúsculas). Cualquier otro texto no es una dirección.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "IDA" => Some(Direction::Ida),
            "VUELTA" => Some(Direction::Vuelta),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ida => "IDA",
            Direction::Vuelta => "VUELTA",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registro de asistencia en `attendance/{día}/.../{recordId}`.
///
/// Inmutable una vez escrito: este sistema nunca lo actualiza ni lo borra.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub passenger_id: String,
    /// Snapshot del código al momento del escaneo
    pub code: String,
    pub direction: Direction,
    /// Timestamp asignado por el servidor (milisegundos epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}
