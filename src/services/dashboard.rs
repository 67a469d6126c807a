use std::{cmp::Reverse, sync::Arc};

use crate::{
    models::{dashboard::DashboardStats, news_post::Post},
    repositories::dashboard_repo::DashboardRepository,
    Result,
};

pub const RECENT_PENDING_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub stats: DashboardStats,
    pub recent_pending: Vec<Post>,
}

#[derive(Clone)]
pub struct DashboardService {
    repo: Arc<dyn DashboardRepository>,
}

impl DashboardService {
    pub fn new(repo: Arc<dyn DashboardRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_summary(&self) -> Result<DashboardSummary> {
        let (stats, pending) = tokio::try_join!(self.repo.stats(), self.repo.pending_posts())?;
        Ok(DashboardSummary {
            stats,
            recent_pending: most_recent(pending, RECENT_PENDING_LIMIT),
        })
    }

    pub async fn get_pending_posts(&self) -> Result<Vec<Post>> {
        self.repo.pending_posts().await
    }

    pub async fn get_rejected_posts(&self) -> Result<Vec<Post>> {
        self.repo.rejected_news().await
    }
}

/// Newest first; posts without a parseable timestamp keep their server order at the end.
fn most_recent(mut posts: Vec<Post>, limit: usize) -> Vec<Post> {
    posts.sort_by_key(|p| Reverse(p.created_at()));
    posts.truncate(limit);
    posts
}
