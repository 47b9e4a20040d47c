//! DTOs de la API
//!
//! Requests y responses HTTP. Los nombres de campo de la API son
//! snake_case; los nombres camelCase viven solo en los modelos del store.

pub mod checkin_dto;
pub mod passenger_dto;
pub mod trip_dto;

use serde::{Deserialize, Serialize};

/// Envelope estándar de respuesta de la API
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            message: Some(message),
            data: None,
        }
    }
}
