//! Modelo de pasajero

use serde::{Deserialize, Serialize};

/// URL de avatar por defecto cuando el pasajero no tiene foto
pub const DEFAULT_AVATAR_URL: &str = "https://i.pravatar.cc/150?img=1";

/// Registro de pasajero tal como vive en `passengers/{id}`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Passenger {
    pub name: String,
    pub doc: String,
    /// Código único de embarque, siempre almacenado en mayúsculas
    pub code: String,
    #[serde(rename = "photoURL", default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_trip: Option<String>,
    /// Timestamp asignado por el servidor al crear (milisegundos epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl Passenger {
    /// URL de foto para mostrar, con fallback al avatar por defecto
    pub fn avatar_url(&self) -> String {
        avatar_url(self.photo_url.as_deref())
    }
}

/// Resolver una URL de foto opcional al avatar efectivo
pub fn avatar_url(photo_url: Option<&str>) -> String {
    match photo_url {
        Some(url) if !url.trim().is_empty() => url.trim().to_string(),
        _ => DEFAULT_AVATAR_URL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_photo_falls_back_to_default_avatar() {
        assert_eq!(avatar_url(None), DEFAULT_AVATAR_URL);
        assert_eq!(avatar_url(Some("   ")), DEFAULT_AVATAR_URL);
        assert_eq!(
            avatar_url(Some(" https://fotos.example/ana.jpg ")),
            "https://fotos.example/ana.jpg"
        );
    }

    #[test]
    fn wire_field_names_are_camel_case() {
        let passenger = Passenger {
            name: "Ana Ruiz".to_string(),
            doc: "123".to_string(),
            code: "AR01".to_string(),
            photo_url: Some("https://fotos.example/ana.jpg".to_string()),
            active: true,
            default_trip: Some("t1".to_string()),
            created_at: Some(1_700_000_000_000),
        };
        let value = serde_json::to_value(&passenger).unwrap();
        assert!(value.get("photoURL").is_some());
        assert!(value.get("defaultTrip").is_some());
        assert!(value.get("createdAt").is_some());
    }
}
