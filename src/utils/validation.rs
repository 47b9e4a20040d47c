//! Utilidades de validación y normalización de texto
//!
//! Este módulo contiene funciones helper para validación de datos
//! y la normalización usada por las búsquedas del roster.

use chrono::{Local, NaiveDate};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};
use validator::ValidationError;

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("field".into(), &field);
        return Err(error);
    }
    Ok(())
}

/// Validar el formato de un código de pasajero.
///
/// Los códigos viajan como claves del store, así que el charset se limita
/// a letras, dígitos, guion y guion bajo.
pub fn validate_code(value: &str) -> Result<(), ValidationError> {
    let code = value.trim();
    let valid = !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        let mut error = ValidationError::new("code");
        error.add_param("value".into(), &code.to_string());
        return Err(error);
    }
    Ok(())
}

/// Forma almacenada de un código: recortado y en mayúsculas
pub fn normalize_code(value: &str) -> String {
    value.trim().to_uppercase()
}

/// Normalizar texto para búsquedas: minúsculas y sin diacríticos
pub fn normalize_text(value: &str) -> String {
    value
        .trim()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Clave de día para particionar asistencia: fecha calendario LOCAL,
/// no UTC, con formato YYYY-MM-DD
pub fn local_day_key() -> String {
    day_key(Local::now().date_naive())
}

/// Clave de día para una fecha concreta
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Validar y convertir una clave de día recibida por la API
pub fn parse_day_key(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        let mut error = ValidationError::new("day");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}
