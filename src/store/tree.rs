//! Operaciones sobre el árbol JSON del store
//!
//! Helpers compartidos por el store en memoria y por el plegado de eventos
//! del stream del backend. Siguen la semántica del store hosteado: null y
//! los objetos vacíos no existen.

use serde_json::{Map, Value};

/// Segmentos no vacíos de un path `a/b/c`
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Leer el nodo en `path`, si existe
pub fn get_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut node = root;
    for segment in split_path(path) {
        node = node.as_object()?.get(segment)?;
    }
    Some(node)
}

/// Reemplazar el valor en `path`, creando los objetos intermedios.
/// Un valor null borra el nodo.
pub fn set_path(root: &mut Value, path: &str, value: Value) {
    let segments = split_path(path);
    if segments.is_empty() {
        *root = value;
        return;
    }
    set_segments(root, &segments, value);
}

fn set_segments(node: &mut Value, segments: &[&str], value: Value) {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    let Value::Object(map) = node else { return };

    if segments.len() == 1 {
        if value.is_null() {
            map.remove(segments[0]);
        } else {
            map.insert(segments[0].to_string(), value);
        }
        return;
    }

    let child = map
        .entry(segments[0].to_string())
        .or_insert(Value::Null);
    set_segments(child, &segments[1..], value);
}

/// Merge de campos sobre el objeto en `path`. Un campo null lo borra.
pub fn merge_path(root: &mut Value, path: &str, fields: &Map<String, Value>) {
    for (key, value) in fields {
        let child_path = if path.is_empty() {
            key.clone()
        } else {
            format!("{}/{}", path, key)
        };
        set_path(root, &child_path, value.clone());
    }
}

/// Borrar el nodo en `path`
pub fn remove_path(root: &mut Value, path: &str) {
    set_path(root, path, Value::Null);
}

/// Copia del valor sin nulls ni objetos vacíos; `None` si no queda nada
pub fn prune(value: &Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::Object(map) => {
            let pruned: Map<String, Value> = map
                .iter()
                .filter_map(|(k, v)| prune(v).map(|v| (k.clone(), v)))
                .collect();
            if pruned.is_empty() {
                None
            } else {
                Some(Value::Object(pruned))
            }
        }
        other => Some(other.clone()),
    }
}

/// Dos paths se afectan mutuamente si uno es prefijo del otro
/// (por segmentos completos)
pub fn overlaps(a: &str, b: &str) -> bool {
    let a = split_path(a);
    let b = split_path(b);
    let common = a.len().min(b.len());
    a[..common] == b[..common]
}
