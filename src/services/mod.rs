use serde_json::Value;

use crate::models::response::Response;

pub mod ads;
pub mod app_version;
pub mod auth;
pub mod dashboard;
pub mod moderation;
pub mod posts;
pub mod upload;
pub mod user;

/// The server's own success text when it sends one, otherwise `fallback`.
pub(crate) fn success_message(body: Value, fallback: &str) -> String {
    serde_json::from_value::<Response>(body)
        .ok()
        .and_then(|r| r.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
