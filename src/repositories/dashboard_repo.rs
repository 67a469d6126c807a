use async_trait::async_trait;
use reqwest::Method;
use tracing::instrument;

use super::ApiRepo;
use crate::{
    models::{
        dashboard::DashboardStats,
        news_post::Post,
        response::{decode_object, ListEnvelope},
    },
    Result,
};

#[async_trait]
pub trait DashboardRepository: Send + Sync {
    async fn stats(&self) -> Result<DashboardStats>;
    async fn pending_posts(&self) -> Result<Vec<Post>>;
    async fn rejected_news(&self) -> Result<Vec<Post>>;
}

#[async_trait]
impl DashboardRepository for ApiRepo {
    #[instrument(skip(self))]
    async fn stats(&self) -> Result<DashboardStats> {
        let request = self.authorized(Method::GET, "/api/dashboard/stats")?;
        let body = self.send(request).await?;
        decode_object(body)
    }

    #[instrument(skip(self))]
    async fn pending_posts(&self) -> Result<Vec<Post>> {
        let request = self.authorized(Method::GET, "/api/dashboard/pending-posts")?;
        let body = self.send(request).await?;
        Ok(ListEnvelope::decode(body, "posts")?.into_items())
    }

    #[instrument(skip(self))]
    async fn rejected_news(&self) -> Result<Vec<Post>> {
        let request = self.authorized(Method::GET, "/api/dashboard/rejected-news")?;
        let body = self.send(request).await?;
        Ok(ListEnvelope::decode(body, "news")?.into_items())
    }
}
