//! Response envelopes. The same logical endpoint answers with different shapes depending
//! on the deployment, so list payloads go through [`ListEnvelope`].

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::{Error, Result};

/// The three list shapes seen in the wild, in the order they are tried.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEnvelope<T> {
    /// `[ ... ]`
    Bare(Vec<T>),
    /// `{ "data": [ ... ] }`
    Data(Vec<T>),
    /// `{ "data": { "<entity>": [ ... ] } }`
    Nested(Vec<T>),
}

impl<T: DeserializeOwned> ListEnvelope<T> {
    /// Tries each known shape in priority order; the first one holding an array wins.
    pub fn decode(payload: Value, entity: &str) -> Result<ListEnvelope<T>> {
        if let Some(items) = Self::bare(&payload) {
            return Ok(ListEnvelope::Bare(items?));
        }
        if let Some(items) = Self::data(&payload) {
            return Ok(ListEnvelope::Data(items?));
        }
        if let Some(items) = Self::nested(&payload, entity) {
            return Ok(ListEnvelope::Nested(items?));
        }
        Err(Error::Decode(format!(
            "no `{entity}` list found in response envelope"
        )))
    }

    fn bare(payload: &Value) -> Option<Result<Vec<T>>> {
        payload.as_array().map(|_| decode_items(payload))
    }

    fn data(payload: &Value) -> Option<Result<Vec<T>>> {
        let data = payload.get("data")?;
        data.as_array().map(|_| decode_items(data))
    }

    fn nested(payload: &Value, entity: &str) -> Option<Result<Vec<T>>> {
        let nested = payload.get("data")?.get(entity)?;
        nested.as_array().map(|_| decode_items(nested))
    }
}

impl<T> ListEnvelope<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Data(items) | Self::Nested(items) => items,
        }
    }
}

fn decode_items<T: DeserializeOwned>(value: &Value) -> Result<Vec<T>> {
    Ok(serde_json::from_value(value.clone())?)
}

/// Single objects come either bare or wrapped in `data`.
pub fn decode_object<T: DeserializeOwned>(payload: Value) -> Result<T> {
    if let Some(inner) = payload.get("data").filter(|d| d.is_object()) {
        match serde_json::from_value(inner.clone()) {
            Ok(decoded) => return Ok(decoded),
            Err(e) => warn!("`data` object did not decode ({e}), trying the outer body"),
        }
    }
    Ok(serde_json::from_value(payload)?)
}

/// Extracts a server-provided `message` (or `error`) from an error body.
pub fn server_message(payload: &Value) -> Option<String> {
    ["message", "error", "msg"]
        .iter()
        .find_map(|key| payload.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// Mutation acknowledgement, e.g. `{ "status": "success", "message": "News created" }`.
/// `status` is a string on some deployments and a number on others.
#[derive(Debug, Serialize, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub status: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}
