use tracing::warn;

use super::Notice;
use crate::{
    models::news_post::{Post, PostStatus},
    routes::Route,
    services::{dashboard::DashboardService, moderation::ModerationService},
    Result,
};

/// Pending queue with approve/reject actions. Every successful action re-fetches the queue.
pub struct PendingView {
    dashboard: DashboardService,
    moderation: ModerationService,
    posts: Vec<Post>,
    notice: Option<Notice>,
}

impl PendingView {
    pub fn new(dashboard: DashboardService, moderation: ModerationService) -> Self {
        Self {
            dashboard,
            moderation,
            posts: Vec::new(),
            notice: None,
        }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Whether the action controls for `post_id` should be disabled.
    pub fn is_busy(&self, post_id: &str) -> bool {
        self.moderation.is_in_flight(post_id)
    }

    pub fn edit_route(&self, post_id: &str) -> Route {
        Route::EditPost(post_id.to_string())
    }

    pub async fn refresh(&mut self) -> Result<&[Post]> {
        match self.dashboard.get_pending_posts().await {
            Ok(posts) => {
                self.posts = posts;
                Ok(&self.posts)
            }
            Err(err) => {
                self.notice = Some(Notice::from(&err));
                Err(err)
            }
        }
    }

    pub async fn approve(&mut self, post_id: &str) -> Result<Notice> {
        let known = self.known_status(post_id);
        let outcome = self.moderation.approve(post_id, known).await;
        self.after_action(post_id, outcome).await
    }

    pub async fn reject(&mut self, post_id: &str) -> Result<Notice> {
        let known = self.known_status(post_id);
        let outcome = self.moderation.reject(post_id, known).await;
        self.after_action(post_id, outcome).await
    }

    fn known_status(&self, post_id: &str) -> Option<PostStatus> {
        self.posts
            .iter()
            .find(|p| p.id == post_id)
            .and_then(|p| p.status)
    }

    async fn after_action(&mut self, post_id: &str, outcome: Result<String>) -> Result<Notice> {
        let message = match outcome {
            Ok(message) => message,
            Err(err) => {
                self.notice = Some(Notice::from(&err));
                return Err(err);
            }
        };

        let refreshed = self.refresh().await.map(|_| ());
        if let Err(err) = refreshed {
            warn!("Refetch after moderation failed: {}", err);
            self.posts.retain(|p| p.id != post_id);
        }
        let notice = Notice::success(message);
        self.notice = Some(notice.clone());
        Ok(notice)
    }
}
