//! Roster de pasajeros
//!
//! CRUD sobre los registros de pasajero y mantenimiento del índice
//! denormalizado código → id. Toda escritura que toca el índice va en una
//! sola operación multi-path atómica del store: nunca queda visible un
//! estado con el registro sin índice o viceversa.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::dto::passenger_dto::ActiveFilter;
use crate::models::Passenger;
use crate::store::{paths, RealtimeStore, Snapshot};
use crate::utils::errors::{code_conflict_error, not_found_error, AppError};
use crate::utils::validation::{
    normalize_code, normalize_text, validate_code, validate_not_empty,
};

/// Pasajero almacenado, con su id
#[derive(Debug, Clone, PartialEq)]
pub struct PassengerRecord {
    pub id: String,
    pub data: Passenger,
}

/// Datos de formulario para crear o actualizar un pasajero
#[derive(Debug, Clone)]
pub struct PassengerDraft {
    pub name: String,
    pub doc: String,
    pub code: String,
    pub photo_url: Option<String>,
    pub active: bool,
    pub default_trip: Option<String>,
}

pub struct RosterService {
    store: Arc<dyn RealtimeStore>,
}

impl RosterService {
    pub fn new(store: Arc<dyn RealtimeStore>) -> Self {
        Self { store }
    }

    /// Listado con búsqueda y filtro de actividad, ordenado por nombre.
    /// La búsqueda es un substring sin mayúsculas ni diacríticos sobre
    /// nombre, documento y código.
    pub async fn list(
        &self,
        query: Option<&str>,
        filter: ActiveFilter,
    ) -> Result<Vec<PassengerRecord>, AppError> {
        let snapshot = self.store.get(paths::PASSENGERS).await?;
        let normalized_query = query.map(normalize_text).unwrap_or_default();

        let mut rows: Vec<PassengerRecord> = passenger_map(snapshot)
            .into_iter()
            .map(|(id, data)| PassengerRecord { id, data })
            .filter(|record| match filter {
                ActiveFilter::All => true,
                ActiveFilter::Active => record.data.active,
                ActiveFilter::Inactive => !record.data.active,
            })
            .filter(|record| {
                if normalized_query.is_empty() {
                    return true;
                }
                let haystack = normalize_text(&format!(
                    "{} {} {}",
                    record.data.name, record.data.doc, record.data.code
                ));
                haystack.contains(&normalized_query)
            })
            .collect();

        rows.sort_by_key(|record| normalize_text(&record.data.name));
        Ok(rows)
    }

    pub async fn get(&self, id: &str) -> Result<PassengerRecord, AppError> {
        let value = self
            .store
            .get(&paths::passenger(id))
            .await?
            .ok_or_else(|| not_found_error("Pasajero", id))?;
        let data: Passenger = serde_json::from_value(value)?;
        Ok(PassengerRecord {
            id: id.to_string(),
            data,
        })
    }

    /// Alta de pasajero: valida, chequea conflicto de código y escribe el
    /// registro junto con su entrada de índice en una sola operación.
    pub async fn create(&self, draft: PassengerDraft) -> Result<PassengerRecord, AppError> {
        let code = validate_draft(&draft)?;
        self.check_code_conflict(&code, None).await?;

        let id = self.store.generate_id();
        let passenger = draft_to_passenger(&draft, &code);

        let mut value = serde_json::to_value(&passenger)?;
        if let Value::Object(map) = &mut value {
            map.insert("createdAt".to_string(), self.store.server_timestamp());
        }

        let mut ops = BTreeMap::new();
        ops.insert(paths::passenger(&id), Some(value));
        ops.insert(paths::code(&code), Some(json!(id)));
        self.store.multi_update(ops).await?;

        info!("Pasajero creado: {} (código {})", passenger.name, code);
        self.get(&id).await
    }

    /// Edición de pasajero. Si el código cambió, la entrada vieja del
    /// índice se borra y la nueva se escribe en la misma operación que los
    /// campos del registro; `createdAt` se conserva.
    pub async fn update(
        &self,
        id: &str,
        draft: PassengerDraft,
    ) -> Result<PassengerRecord, AppError> {
        let current = self.get(id).await?;
        let code = validate_draft(&draft)?;
        self.check_code_conflict(&code, Some(id)).await?;

        let base = paths::passenger(id);
        let mut ops: BTreeMap<String, Option<Value>> = BTreeMap::new();
        ops.insert(format!("{}/name", base), Some(json!(draft.name.trim())));
        ops.insert(format!("{}/doc", base), Some(json!(draft.doc.trim())));
        ops.insert(format!("{}/code", base), Some(json!(code)));
        ops.insert(format!("{}/active", base), Some(json!(draft.active)));
        ops.insert(
            format!("{}/photoURL", base),
            trimmed_or_none(draft.photo_url.as_deref()).map(|url| json!(url)),
        );
        ops.insert(
            format!("{}/defaultTrip", base),
            trimmed_or_none(draft.default_trip.as_deref()).map(|trip| json!(trip)),
        );

        let old_code = normalize_code(&current.data.code);
        if old_code != code {
            if !old_code.is_empty() {
                ops.insert(paths::code(&old_code), None);
            }
            ops.insert(paths::code(&code), Some(json!(id)));
        }
        self.store.multi_update(ops).await?;

        info!("Pasajero actualizado: {} (código {})", draft.name.trim(), code);
        self.get(id).await
    }

    /// Cambia solo el flag de actividad
    pub async fn toggle_active(&self, id: &str) -> Result<PassengerRecord, AppError> {
        let current = self.get(id).await?;
        let mut fields = serde_json::Map::new();
        fields.insert("active".to_string(), json!(!current.data.active));
        self.store.update(&paths::passenger(id), fields).await?;
        self.get(id).await
    }

    /// Baja de pasajero: borra el registro y su entrada de índice juntos
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let current = self.get(id).await?;

        let mut ops: BTreeMap<String, Option<Value>> = BTreeMap::new();
        let code = normalize_code(&current.data.code);
        if !code.is_empty() {
            ops.insert(paths::code(&code), None);
        }
        ops.insert(paths::passenger(id), None);
        self.store.multi_update(ops).await?;

        info!("Pasajero eliminado: {}", current.data.name);
        Ok(())
    }

    /// CodeConflict si el código ya apunta a otro pasajero. `own_id`
    /// excluye al propio registro en ediciones.
    async fn check_code_conflict(
        &self,
        code: &str,
        own_id: Option<&str>,
    ) -> Result<(), AppError> {
        let owner = self.store.get(&paths::code(code)).await?;
        if let Some(Value::String(owner_id)) = owner {
            if own_id != Some(owner_id.as_str()) {
                return Err(code_conflict_error(code));
            }
        }
        Ok(())
    }
}

/// Parsear el snapshot de `passengers` a un mapa id → pasajero.
/// Las entradas con forma inesperada se descartan con un warning.
pub(crate) fn passenger_map(snapshot: Snapshot) -> HashMap<String, Passenger> {
    let Some(Value::Object(entries)) = snapshot else {
        return HashMap::new();
    };
    entries
        .into_iter()
        .filter_map(|(id, value)| match serde_json::from_value(value) {
            Ok(passenger) => Some((id, passenger)),
            Err(e) => {
                warn!("Pasajero '{}' con forma inesperada, ignorado: {}", id, e);
                None
            }
        })
        .collect()
}

fn validate_draft(draft: &PassengerDraft) -> Result<String, AppError> {
    let code = normalize_code(&draft.code);
    let complete = validate_not_empty(&draft.name, "name").is_ok()
        && validate_not_empty(&draft.doc, "doc").is_ok()
        && validate_not_empty(&code, "code").is_ok();
    if !complete {
        return Err(AppError::Validation(
            "Completa nombre, documento y código.".to_string(),
        ));
    }
    validate_code(&code).map_err(|_| {
        AppError::Validation("Código inválido: usa solo letras y números.".to_string())
    })?;
    Ok(code)
}

fn draft_to_passenger(draft: &PassengerDraft, code: &str) -> Passenger {
    Passenger {
        name: draft.name.trim().to_string(),
        doc: draft.doc.trim().to_string(),
        code: code.to_string(),
        photo_url: trimmed_or_none(draft.photo_url.as_deref()).map(str::to_string),
        active: draft.active,
        default_trip: trimmed_or_none(draft.default_trip.as_deref()).map(str::to_string),
        created_at: None,
    }
}

fn trimmed_or_none(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
