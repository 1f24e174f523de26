/*
[INPUT]:  Positional JSON arguments passed to a bound operation
[OUTPUT]: Decoded operation parameters or InvalidArgument errors
[POS]:    Resources layer - argument decoding for dynamic dispatch
[UPDATE]: When operations accept new argument shapes
*/

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http::{FloatError, Result};

/// Positional arguments of a dynamically invoked operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args(Vec<Value>);

impl Args {
    pub fn new(values: impl IntoIterator<Item = Value>) -> Self {
        Self(values.into_iter().collect())
    }

    /// Argument at `index`; missing and `null` are both absent
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index).filter(|value| !value.is_null())
    }

    pub fn required(&self, index: usize, name: &str) -> Result<&Value> {
        self.get(index)
            .ok_or_else(|| FloatError::InvalidArgument(format!("missing argument `{name}`")))
    }

    /// Request body at `index`, `{}` when absent
    pub fn body(&self, index: usize) -> Value {
        self.get(index)
            .cloned()
            .unwrap_or_else(|| Value::Object(serde_json::Map::new()))
    }

    pub fn decode<T: DeserializeOwned>(&self, index: usize, name: &str) -> Result<T> {
        let value = self.required(index, name)?.clone();
        serde_json::from_value(value)
            .map_err(|e| FloatError::InvalidArgument(format!("argument `{name}`: {e}")))
    }

    /// Identifier given either as a string or as an object with an `id` field
    pub fn id(&self, index: usize, name: &str) -> Result<String> {
        let value = self.required(index, name)?;
        let id = match value {
            Value::String(id) => Some(id.clone()),
            Value::Object(map) => match map.get("id") {
                Some(Value::String(id)) => Some(id.clone()),
                Some(Value::Number(id)) => Some(id.to_string()),
                _ => None,
            },
            _ => None,
        };
        id.ok_or_else(|| FloatError::InvalidArgument(format!("argument `{name}` has no id")))
    }
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}
