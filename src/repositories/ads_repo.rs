use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::instrument;

use super::{multipart_form, ApiRepo};
use crate::{
    forms::MultipartPayload,
    models::{ads::Ad, response::ListEnvelope},
    Result,
};

#[async_trait]
pub trait AdsRepository: Send + Sync {
    async fn get_ads(&self) -> Result<Vec<Ad>>;
    async fn upload_ad(&self, payload: MultipartPayload) -> Result<Value>;
}

#[async_trait]
impl AdsRepository for ApiRepo {
    #[instrument(skip(self))]
    async fn get_ads(&self) -> Result<Vec<Ad>> {
        let request = self.authorized(Method::GET, "/api/ads")?;
        let body = self.send(request).await?;
        Ok(ListEnvelope::decode(body, "ads")?.into_items())
    }

    #[instrument(skip_all)]
    async fn upload_ad(&self, payload: MultipartPayload) -> Result<Value> {
        let request = self
            .authorized(Method::POST, "/api/ads")?
            .multipart(multipart_form(payload)?);
        self.send(request).await
    }
}
