use serde_json::{Map, Value};
use std::path::Path;

use orgbot_core::data_loader::read_json;
use orgbot_core::error::{Error, Result};

/// Immutable nested key/value facts loaded from `structured_data.json`.
///
/// Lookups take dotted paths (`"servicio_cliente.telefono"`). Missing keys,
/// non-object intermediates and empty strings all read as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FactTable {
    root: Map<String, Value>,
}

impl FactTable {
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(Error::Operation(format!(
                "fact table must be a JSON object, found {}",
                kind(&other)
            ))),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| Error::Operation(format!("invalid fact table: {e}")))?;
        Self::from_value(value)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_value(read_json(path)?)
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut keys = path.split('.');
        let mut cur = self.root.get(keys.next()?)?;
        for key in keys {
            cur = cur.as_object()?.get(key)?;
        }
        Some(cur)
    }

    /// Non-empty string at `path`.
    pub fn text(&self, path: &str) -> Option<&str> {
        self.get(path)?.as_str().map(str::trim).filter(|s| !s.is_empty())
    }

    /// First non-empty string along a fallback chain of paths.
    pub fn first_text(&self, paths: &[&str]) -> Option<&str> {
        paths.iter().find_map(|p| self.text(p))
    }

    /// Object records of the list at `path`; anything else reads as empty.
    pub fn records(&self, path: &str) -> Vec<&Map<String, Value>> {
        self.get(path)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_object).collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
