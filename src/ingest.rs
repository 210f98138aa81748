//! Lenient conversion of catalog API payloads into [`Record`]s.
//!
//! The backend returns plants in several shapes: a bare array, an object with
//! a `plantas` list, or the `{ "success": true, "data": ... }` envelope. Field
//! names follow the database columns (`nombre`, `origen`,
//! `calificacion_promedio`, ...) and numbers frequently arrive as strings.
//! Everything is read through `serde_json::Value` so that one odd record
//! never aborts the batch.

use crate::error::IngestError;
use crate::types::{clamp_rating, Record, RecordId};
use serde_json::{Map, Value};

const COMMON_NAME_KEYS: &[&str] = &["nombre_comun", "nombre", "commonName", "common_name"];
const SCIENTIFIC_NAME_KEYS: &[&str] = &["nombre_cientifico", "scientificName", "scientific_name"];
const DESCRIPTION_KEYS: &[&str] = &["descripcion", "description"];
const CATEGORY_KEYS: &[&str] = &["categoria", "category"];
const BENEFIT_KEYS: &[&str] = &["beneficios", "benefits"];
const RATING_KEYS: &[&str] = &["rating", "calificacion_promedio"];
const POPULARITY_KEYS: &[&str] = &["popularidad", "visualizaciones", "popularity"];
const REGION_KEYS: &[&str] = &["region", "origen"];

/// Parse a catalog payload into records.
///
/// Entries that are not JSON objects are skipped with a warning. Entries
/// without a usable `id` receive one above the largest explicit id.
/// If that range is exhausted they are skipped.
pub fn records_from_json(json: &str) -> Result<Vec<Record>, IngestError> {
  let value: Value = serde_json::from_str(json)?;
  records_from_value(&value)
}

/// Same as [`records_from_json`] for an already parsed document.
pub fn records_from_value(value: &Value) -> Result<Vec<Record>, IngestError> {
  let entries = record_list(value)?;

  // `None` once the id space above the largest explicit id is exhausted
  let mut next_id = match entries
    .iter()
    .filter_map(|entry| entry.get("id").and_then(as_id))
    .max()
  {
    Some(max) => max.checked_add(1),
    None => Some(1),
  };

  let mut records = Vec::with_capacity(entries.len());
  for (position, entry) in entries.iter().enumerate() {
    let Some(object) = entry.as_object() else {
      tracing::warn!(position, "skipping catalog entry that is not an object");
      continue;
    };

    let id = match object.get("id").and_then(as_id) {
      Some(id) => id,
      None => {
        let Some(id) = next_id else {
          tracing::warn!(position, "skipping catalog entry without id, no free id left");
          continue;
        };
        next_id = id.checked_add(1);
        tracing::debug!(position, id, "catalog entry without id, assigned one");
        id
      }
    };

    records.push(record_from_object(id, object));
  }

  tracing::debug!(count = records.len(), "ingested catalog records");
  Ok(records)
}

/// Locate the list of records inside any of the accepted envelopes.
fn record_list(value: &Value) -> Result<&Vec<Value>, IngestError> {
  match value {
    Value::Array(list) => Ok(list),
    Value::Object(object) => {
      if let Some(Value::Array(list)) = object.get("plantas") {
        return Ok(list);
      }
      if let Some(data) = object.get("data") {
        return record_list(data);
      }
      Err(IngestError::UnexpectedShape(
        "object has neither `plantas` nor `data`".to_string(),
      ))
    }
    other => Err(IngestError::UnexpectedShape(format!(
      "expected an array or object, found {}",
      json_kind(other)
    ))),
  }
}

fn record_from_object(id: RecordId, object: &Map<String, Value>) -> Record {
  Record {
    id,
    common_name: first_string(object, COMMON_NAME_KEYS),
    scientific_name: first_string(object, SCIENTIFIC_NAME_KEYS),
    description: first_string(object, DESCRIPTION_KEYS),
    category: first_string(object, CATEGORY_KEYS),
    benefits: first_value(object, BENEFIT_KEYS)
      .map(string_list)
      .unwrap_or_default(),
    rating: first_value(object, RATING_KEYS)
      .and_then(as_f64)
      .map_or(0.0, |rating| clamp_rating(rating as f32)),
    popularity: first_value(object, POPULARITY_KEYS)
      .and_then(as_f64)
      .map_or(0, |popularity| popularity.max(0.0).min(u32::MAX as f64) as u32),
    region: first_string(object, REGION_KEYS),
  }
}

/// First key that holds a non-null, non-empty value.
fn first_value<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
  keys.iter().filter_map(|key| object.get(*key)).find(|value| match value {
    Value::Null => false,
    Value::String(s) => !s.is_empty(),
    _ => true,
  })
}

fn first_string(object: &Map<String, Value>, keys: &[&str]) -> String {
  first_value(object, keys).and_then(as_string).unwrap_or_default()
}

fn as_string(value: &Value) -> Option<String> {
  match value {
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    _ => None,
  }
}

fn as_f64(value: &Value) -> Option<f64> {
  let number = match value {
    Value::Number(n) => n.as_f64(),
    Value::String(s) => s.trim().parse::<f64>().ok(),
    _ => None,
  };
  number.filter(|n| n.is_finite())
}

fn as_id(value: &Value) -> Option<RecordId> {
  match value {
    Value::Number(n) => n.as_u64(),
    Value::String(s) => s.trim().parse().ok(),
    _ => None,
  }
}

/// Benefits arrive as an array, as an object whose values are the benefits,
/// or as a JSON-encoded string of either.
fn string_list(value: &Value) -> Vec<String> {
  match value {
    Value::Array(items) => items.iter().filter_map(as_string).collect(),
    Value::Object(map) => map.values().filter_map(as_string).collect(),
    Value::String(s) => match serde_json::from_str::<Value>(s) {
      Ok(inner @ (Value::Array(_) | Value::Object(_))) => string_list(&inner),
      _ => vec![s.clone()],
    },
    _ => Vec::new(),
  }
}

fn json_kind(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "a boolean",
    Value::Number(_) => "a number",
    Value::String(_) => "a string",
    Value::Array(_) => "an array",
    Value::Object(_) => "an object",
  }
}
