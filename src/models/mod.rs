use serde::{de, Deserialize, Deserializer};
use serde_json::{Map, Value};

pub mod ads;
pub mod app_version;
pub mod dashboard;
pub mod news_post;
pub mod response;
pub mod users;

/// Accepts ids sent as strings or numbers.
pub(crate) fn string_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    id_text(&value).map_err(de::Error::custom)
}

fn id_text(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(format!("unsupported id value: {other}")),
    }
}

/// Strings that may arrive as numbers or `{ "name": ... }` objects.
fn lenient_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Object(map) => map
            .get("value")
            .or_else(|| map.get("name"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}

/// A raw API record whose fields go by several names depending on the deployment.
///
/// Records regularly carry more than one of those names at once (`createdBy` next to a
/// populated `user`, `_id` next to `id`), so each field takes the first candidate that
/// holds a usable value instead of failing on the duplicate.
pub(crate) struct Record<'a>(pub(crate) &'a Map<String, Value>);

impl<'a> Record<'a> {
    pub(crate) fn first(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .filter_map(|key| self.0.get(*key))
            .find(|value| match value {
                Value::Null => false,
                Value::String(s) => !s.trim().is_empty(),
                _ => true,
            })
    }

    pub(crate) fn id(&self, keys: &[&str]) -> Result<String, String> {
        match self.first(keys) {
            Some(value) => id_text(value),
            None => Err(format!("missing field `{}`", keys.first().unwrap_or(&"id"))),
        }
    }

    pub(crate) fn text(&self, keys: &[&str]) -> String {
        self.first(keys).map(lenient_text).unwrap_or_default()
    }

    pub(crate) fn opt_text(&self, keys: &[&str]) -> Option<String> {
        Some(self.text(keys)).filter(|s| !s.is_empty())
    }

    pub(crate) fn flag(&self, keys: &[&str]) -> Option<bool> {
        match self.first(keys)? {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_i64().map(|n| n != 0),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}
