use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::instrument;

use super::ApiRepo;
use crate::{models::users::LoginUserDto, Error, Result};

#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Returns the bearer token issued by the server.
    async fn login(&self, credentials: &LoginUserDto) -> Result<String>;
    async fn logout(&self) -> Result<()>;
}

#[async_trait]
impl AuthRepository for ApiRepo {
    #[instrument(skip_all, fields(email = %credentials.email))]
    async fn login(&self, credentials: &LoginUserDto) -> Result<String> {
        let request = self
            .request(Method::POST, "/api/auth/login")
            .json(credentials);
        let body = self.send(request).await?;
        extract_token(&body)
            .ok_or_else(|| Error::Decode("login response did not contain a token".to_string()))
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<()> {
        let request = self.authorized(Method::POST, "/api/auth/logout")?;
        self.send(request).await?;
        Ok(())
    }
}

/// `{ data: { token } }`, falling back to a top-level `token`.
fn extract_token(body: &Value) -> Option<String> {
    body.get("data")
        .and_then(|d| d.get("token"))
        .or_else(|| body.get("token"))
        .and_then(Value::as_str)
        .filter(|t| !t.trim().is_empty())
        .map(str::to_string)
}
