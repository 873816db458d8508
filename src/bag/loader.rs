//! The module-loading boundary for requiring bags.

use crate::errors::BilboError;
use crate::stuff::{value, Object, Producer, Value};
use std::sync::Arc;

/// Synchronously loads a producer addressable by a location string.
///
/// The location is the plain concatenation of a requiring bag's root and
/// the missed key; how it maps onto an actual resource is up to the
/// implementation.
pub trait Loader: Send + Sync {
    /// Loads the producer stored at `location`.
    fn load(&self, location: &str) -> Result<Producer, BilboError>;
}

/// Loads `<location>.json` from the filesystem and converts the document
/// into a producer.
///
/// Objects become delegate objects field by field, so a document may carry
/// the usual storage marker; any other document becomes an opaque value.
pub struct JsonFileLoader;

impl Loader for JsonFileLoader {
    fn load(&self, location: &str) -> Result<Producer, BilboError> {
        let path = format!("{}.json", location);
        let data = std::fs::read(&path).map_err(|e| BilboError::Load {
            code: "BILBO_LOAD_IO_FAILURE".to_string(),
            message: format!("{}: {}", path, e),
        })?;
        let document: serde_json::Value =
            serde_json::from_slice(&data).map_err(|e| BilboError::Load {
                code: "BILBO_LOAD_PARSE_FAILURE".to_string(),
                message: format!("{}: {}", path, e),
            })?;
        log::debug!("loaded '{}'", path);
        Ok(producer_from_json(document))
    }
}

/// Converts a JSON document into a producer.
pub fn producer_from_json(document: serde_json::Value) -> Producer {
    match document {
        serde_json::Value::Object(fields) => Producer::Object(object_from_fields(fields)),
        other => Producer::Value(value_from_json(other)),
    }
}

fn object_from_fields(fields: serde_json::Map<String, serde_json::Value>) -> Arc<Object> {
    let object = Object::empty();
    for (field, item) in fields {
        object.set(field, value_from_json(item));
    }
    object
}

fn value_from_json(item: serde_json::Value) -> Value {
    match item {
        serde_json::Value::Null => value(()),
        serde_json::Value::Bool(flag) => value(flag),
        serde_json::Value::Number(number) => match number.as_i64() {
            Some(integer) => value(integer),
            None => value(number.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(text) => value(text),
        serde_json::Value::Array(items) => value(
            items
                .into_iter()
                .map(value_from_json)
                .collect::<Vec<Value>>(),
        ),
        serde_json::Value::Object(fields) => {
            let nested: Value = object_from_fields(fields);
            nested
        }
    }
}
