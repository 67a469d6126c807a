use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::instrument;

use super::ApiRepo;
use crate::{
    models::{
        app_version::{AppVersion, CreateAppVersionDto},
        response::ListEnvelope,
    },
    Result,
};

#[async_trait]
pub trait AppVersionRepository: Send + Sync {
    async fn get_app_versions(&self) -> Result<Vec<AppVersion>>;
    async fn create_app_version(&self, version: &CreateAppVersionDto) -> Result<Value>;
}

#[async_trait]
impl AppVersionRepository for ApiRepo {
    #[instrument(skip(self))]
    async fn get_app_versions(&self) -> Result<Vec<AppVersion>> {
        let request = self.authorized(Method::GET, "/api/app-versions")?;
        let body = self.send(request).await?;
        Ok(ListEnvelope::decode(body, "versions")?.into_items())
    }

    #[instrument(skip(self))]
    async fn create_app_version(&self, version: &CreateAppVersionDto) -> Result<Value> {
        let request = self
            .authorized(Method::POST, "/api/app-versions")?
            .json(version);
        self.send(request).await
    }
}
