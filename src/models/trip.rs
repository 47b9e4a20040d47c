//! Modelo de ruta (trip)

use serde::{Deserialize, Serialize};

use super::attendance::Direction;

/// Ruta tal como vive en `trips/{id}`. Las rutas se siembran de forma
/// externa; este sistema nunca las escribe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Texto libre; por convención "IDA" o "VUELTA"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction_hint: Option<String>,
    #[serde(default)]
    pub active: bool,
}

impl Trip {
    /// Label para mostrar: `directionHint · from → to` cuando los tres
    /// están presentes, si no el label almacenado, si no el fallback (id).
    pub fn display_label(&self, fallback: &str) -> String {
        let dir = self.direction_hint.as_deref().unwrap_or("").trim();
        let from = self.from.as_deref().unwrap_or("").trim();
        let to = self.to.as_deref().unwrap_or("").trim();

        if !dir.is_empty() && !from.is_empty() && !to.is_empty() {
            return format!("{} · {} → {}", dir, from, to);
        }

        match self.label.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => label.to_string(),
            _ => fallback.trim().to_string(),
        }
    }

    /// Dirección forzada por la ruta cuando el hint es reconocible.
    /// Manda sobre el selector del operador.
    pub fn forced_direction(&self) -> Option<Direction> {
        self.direction_hint.as_deref().and_then(Direction::parse)
    }
}
