use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::instrument;

use super::{encode_id, multipart_form, ApiRepo};
use crate::{
    forms::{MultipartPayload, UpdatePayload},
    models::{
        news_post::{Post, PostStatus, StatusUpdateDto},
        response::{decode_object, ListEnvelope},
    },
    Result,
};

#[async_trait]
pub trait NewsPostsRepository: Sync + Send {
    async fn create_news_post(&self, payload: MultipartPayload) -> Result<Value>;
    async fn update_news_post(&self, post_id: &str, payload: UpdatePayload) -> Result<Value>;
    async fn get_news_post(&self, post_id: &str) -> Result<Post>;
    async fn get_public_news(&self) -> Result<Vec<Post>>;
    async fn update_status(&self, post_id: &str, status: PostStatus) -> Result<Value>;
}

#[async_trait]
impl NewsPostsRepository for ApiRepo {
    #[instrument(skip_all)]
    async fn create_news_post(&self, payload: MultipartPayload) -> Result<Value> {
        let request = self
            .authorized(Method::POST, "/api/news/admin/create")?
            .multipart(multipart_form(payload)?);
        self.send(request).await
    }

    #[instrument(skip(self, payload))]
    async fn update_news_post(&self, post_id: &str, payload: UpdatePayload) -> Result<Value> {
        let path = format!("/api/news/re-edit/{}", encode_id(post_id));
        let request = self.authorized(Method::PUT, &path)?;
        let request = match payload {
            UpdatePayload::Json(dto) => request.json(&dto),
            UpdatePayload::Multipart(payload) => request.multipart(multipart_form(payload)?),
        };
        self.send(request).await
    }

    #[instrument(skip(self))]
    async fn get_news_post(&self, post_id: &str) -> Result<Post> {
        let path = format!("/api/news/public/{}", encode_id(post_id));
        let body = self.send(self.maybe_authorized(Method::GET, &path)).await?;
        let inner = body
            .get("data")
            .and_then(|d| d.get("news").or_else(|| d.get("post")))
            .filter(|v| v.is_object())
            .cloned();
        decode_object(inner.unwrap_or(body))
    }

    #[instrument(skip(self))]
    async fn get_public_news(&self) -> Result<Vec<Post>> {
        let body = self
            .send(self.maybe_authorized(Method::GET, "/api/news/public"))
            .await?;
        Ok(ListEnvelope::decode(body, "news")?.into_items())
    }

    #[instrument(skip(self))]
    async fn update_status(&self, post_id: &str, status: PostStatus) -> Result<Value> {
        let path = format!("/api/news/admin/news/status/{}", encode_id(post_id));
        let request = self
            .authorized(Method::PUT, &path)?
            .json(&StatusUpdateDto { status });
        self.send(request).await
    }
}
