use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::instrument;

use super::{encode_id, multipart_form, ApiRepo};
use crate::{
    forms::CreateUserPayload,
    models::{response::ListEnvelope, users::User},
    Result,
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_users(&self) -> Result<Vec<User>>;
    async fn create_user(&self, payload: CreateUserPayload) -> Result<Value>;
    async fn delete_user(&self, user_id: &str) -> Result<()>;
}

#[async_trait]
impl UserRepository for ApiRepo {
    #[instrument(skip(self))]
    async fn get_users(&self) -> Result<Vec<User>> {
        let request = self.authorized(Method::GET, "/api/dashboard/users")?;
        let body = self.send(request).await?;
        Ok(ListEnvelope::decode(body, "users")?.into_items())
    }

    #[instrument(skip_all)]
    async fn create_user(&self, payload: CreateUserPayload) -> Result<Value> {
        let request = self.authorized(Method::POST, "/api/dashboard/users")?;
        let request = match payload {
            CreateUserPayload::Json(dto) => request.json(&dto),
            CreateUserPayload::Multipart(payload) => request.multipart(multipart_form(payload)?),
        };
        self.send(request).await
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, user_id: &str) -> Result<()> {
        let path = format!("/api/dashboard/users/{}", encode_id(user_id));
        let request = self.authorized(Method::DELETE, &path)?;
        self.send(request).await?;
        Ok(())
    }
}
