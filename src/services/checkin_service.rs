//! Estación de registro
//!
//! Flujo de un intento de registro: resolver el código contra el índice,
//! mostrar el preview, frenar pasajeros inactivos y recién entonces
//! escribir el registro de asistencia bajo el scope (día, ruta).

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::dto::checkin_dto::PassengerPreview;
use crate::models::{passenger::avatar_url, AttendanceRecord, Direction, Passenger};
use crate::services::roster_service::{passenger_map, PassengerRecord};
use crate::services::trip_service::TripService;
use crate::store::{paths, RealtimeStore, Snapshot};
use crate::utils::errors::AppError;
use crate::utils::validation::{day_key, local_day_key, normalize_code};

/// Resultado de un registro exitoso
#[derive(Debug)]
pub struct CheckinOutcome {
    pub record_id: String,
    pub day: String,
    pub direction: Direction,
    /// Ruta efectiva (puede diferir de la seleccionada si el pasajero
    /// tiene ruta por defecto)
    pub trip_id: Option<String>,
    pub passenger: PassengerRecord,
}

/// Entrada de la lista de asistencia, ya cruzada contra el cache de
/// pasajeros para nombre y foto
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AttendanceEntry {
    pub record_id: String,
    pub passenger_id: String,
    pub name: String,
    pub photo_url: String,
    pub code: String,
    pub direction: Direction,
    pub timestamp: Option<i64>,
}

pub struct CheckinService {
    store: Arc<dyn RealtimeStore>,
}

impl CheckinService {
    pub fn new(store: Arc<dyn RealtimeStore>) -> Self {
        Self { store }
    }

    /// Resolver un código escaneado/tipeado al pasajero que lo posee.
    /// Una entrada de índice colgante (apunta a un pasajero que ya no
    /// existe) cuenta como no encontrado.
    pub async fn resolve_code(&self, code: &str) -> Result<PassengerRecord, AppError> {
        let code = normalize_code(code);
        if code.is_empty() {
            return Err(AppError::Validation("Ingresa un código.".to_string()));
        }

        let not_found = || AppError::NotFound("Código no encontrado.".to_string());

        let Some(Value::String(passenger_id)) = self.store.get(&paths::code(&code)).await?
        else {
            return Err(not_found());
        };

        let Some(value) = self.store.get(&paths::passenger(&passenger_id)).await? else {
            return Err(not_found());
        };
        let data: Passenger = serde_json::from_value(value)?;
        Ok(PassengerRecord {
            id: passenger_id,
            data,
        })
    }

    /// Registrar asistencia con la fecha local actual
    pub async fn register(
        &self,
        code: &str,
        direction: Option<Direction>,
        selected_trip: Option<String>,
    ) -> Result<CheckinOutcome, AppError> {
        self.register_with_day(local_day_key(), code, direction, selected_trip)
            .await
    }

    /// Registrar asistencia en un día concreto
    pub async fn register_on(
        &self,
        day: NaiveDate,
        code: &str,
        direction: Option<Direction>,
        selected_trip: Option<String>,
    ) -> Result<CheckinOutcome, AppError> {
        self.register_with_day(day_key(day), code, direction, selected_trip)
            .await
    }

    async fn register_with_day(
        &self,
        day: String,
        code: &str,
        direction: Option<Direction>,
        selected_trip: Option<String>,
    ) -> Result<CheckinOutcome, AppError> {
        let passenger = self.resolve_code(code).await?;

        // variante con ruta: si el pasajero tiene ruta por defecto y no es
        // la seleccionada, la estación cambia sola a esa ruta
        let mut trip_id = selected_trip;
        if trip_id.is_some() {
            if let Some(default_trip) = &passenger.data.default_trip {
                if trip_id.as_deref() != Some(default_trip.as_str()) {
                    info!(
                        "Cambio automático a la ruta por defecto '{}' de {}",
                        default_trip, passenger.data.name
                    );
                    trip_id = Some(default_trip.clone());
                }
            }
        }

        // un pasajero inactivo nunca genera registro; el preview se
        // devuelve igual para que la vista lo siga mostrando
        if !passenger.data.active {
            return Err(AppError::InactivePassenger {
                name: passenger.data.name.clone(),
                preview: json!(preview_of(&passenger)),
            });
        }

        // dirección efectiva: el hint de la ruta manda sobre el selector
        let trip = match &trip_id {
            Some(id) => Some(TripService::new(self.store.clone()).get(id).await?),
            None => None,
        };
        let direction = trip
            .as_ref()
            .and_then(|t| t.forced_direction())
            .or(direction)
            .ok_or_else(|| AppError::Validation("Selecciona una dirección.".to_string()))?;

        let record = AttendanceRecord {
            passenger_id: passenger.id.clone(),
            code: passenger.data.code.clone(),
            direction,
            timestamp: None,
        };
        let mut value = serde_json::to_value(&record)?;
        if let Value::Object(map) = &mut value {
            map.insert("timestamp".to_string(), self.store.server_timestamp());
        }

        let scope = paths::attendance_scope(&day, trip_id.as_deref());
        let record_id = self.store.generate_id();
        self.store
            .set(&paths::attendance_record(&scope, &record_id), value)
            .await?;

        info!(
            "Registrado: {} ({}) en {}",
            passenger.data.name, direction, scope
        );
        Ok(CheckinOutcome {
            record_id,
            day,
            direction,
            trip_id,
            passenger,
        })
    }

    /// Consulta puntual de la asistencia de un día (y ruta), cruzada
    /// contra los pasajeros para nombre y foto
    pub async fn attendance_entries(
        &self,
        day: &str,
        trip_id: Option<&str>,
    ) -> Result<Vec<AttendanceEntry>, AppError> {
        let scope = paths::attendance_scope(day, trip_id);
        let records = self.store.get(&scope).await?;
        let passengers = passenger_map(self.store.get(paths::PASSENGERS).await?);
        Ok(entries_from_snapshot(records, &passengers))
    }
}

/// Preview que ve el operador al resolver un código
pub fn preview_of(record: &PassengerRecord) -> PassengerPreview {
    PassengerPreview {
        id: record.id.clone(),
        name: record.data.name.clone(),
        code: record.data.code.clone(),
        doc: record.data.doc.clone(),
        active: record.data.active,
        photo_url: record.data.avatar_url(),
    }
}

/// Cruzar un snapshot de registros contra el cache de pasajeros y ordenar
/// descendente por timestamp
pub(crate) fn entries_from_snapshot(
    snapshot: Snapshot,
    passengers: &HashMap<String, Passenger>,
) -> Vec<AttendanceEntry> {
    let Some(Value::Object(records)) = snapshot else {
        return Vec::new();
    };

    let mut entries: Vec<AttendanceEntry> = records
        .into_iter()
        .filter_map(|(record_id, value)| {
            let record: AttendanceRecord = serde_json::from_value(value).ok()?;
            let passenger = passengers.get(&record.passenger_id);
            Some(AttendanceEntry {
                record_id,
                name: passenger
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| "(Sin nombre)".to_string()),
                photo_url: avatar_url(passenger.and_then(|p| p.photo_url.as_deref())),
                passenger_id: record.passenger_id,
                code: record.code,
                direction: record.direction,
                timestamp: record.timestamp,
            })
        })
        .collect();

    entries.sort_by_key(|entry| std::cmp::Reverse(entry.timestamp.unwrap_or(0)));
    entries
}
