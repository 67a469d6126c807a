use std::sync::Arc;

use tracing::info;
use validator::Validate;

use super::success_message;
use crate::{
    models::app_version::{AppVersion, CreateAppVersionDto},
    repositories::app_version_repo::AppVersionRepository,
    Error, Result,
};

#[derive(Clone)]
pub struct AppVersionService {
    repo: Arc<dyn AppVersionRepository>,
}

impl AppVersionService {
    pub fn new(repo: Arc<dyn AppVersionRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_app_versions(&self) -> Result<Vec<AppVersion>> {
        self.repo.get_app_versions().await
    }

    pub async fn publish(&self, version: CreateAppVersionDto) -> Result<String> {
        version.validate()?;
        if !version.has_valid_version() {
            return Err(Error::Validation(
                "Version must look like 1.2.3".to_string(),
            ));
        }
        let body = self.repo.create_app_version(&version).await?;
        info!("Published app version {}", version.version);
        Ok(success_message(body, "App version published"))
    }
}
