use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use tracing::info;

use super::success_message;
use crate::{
    models::news_post::PostStatus, repositories::news_post_repo::NewsPostsRepository, Error,
    Result,
};

/// Approve/reject actions. At most one action per post is outstanding at a time.
#[derive(Clone)]
pub struct ModerationService {
    repo: Arc<dyn NewsPostsRepository>,
    in_flight: Arc<Mutex<HashSet<String>>>,
}

struct InFlight {
    ids: Arc<Mutex<HashSet<String>>>,
    post_id: String,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if let Ok(mut ids) = self.ids.lock() {
            ids.remove(&self.post_id);
        }
    }
}

impl ModerationService {
    pub fn new(repo: Arc<dyn NewsPostsRepository>) -> Self {
        Self {
            repo,
            in_flight: Arc::default(),
        }
    }

    pub async fn approve(&self, post_id: &str, known: Option<PostStatus>) -> Result<String> {
        self.set_status(post_id, known, PostStatus::Approved).await
    }

    pub async fn reject(&self, post_id: &str, known: Option<PostStatus>) -> Result<String> {
        self.set_status(post_id, known, PostStatus::Rejected).await
    }

    pub fn is_in_flight(&self, post_id: &str) -> bool {
        self.in_flight
            .lock()
            .map(|ids| ids.contains(post_id))
            .unwrap_or(false)
    }

    /// `known` is the status the caller last saw for the post, if any.
    async fn set_status(
        &self,
        post_id: &str,
        known: Option<PostStatus>,
        next: PostStatus,
    ) -> Result<String> {
        if let Some(current) = known {
            if !current.can_transition_to(next) {
                return Err(Error::InvalidTransition {
                    from: current.to_string(),
                    to: next.to_string(),
                });
            }
        }

        let _guard = self.acquire(post_id)?;
        let body = self.repo.update_status(post_id, next).await?;
        info!("Post {} marked {}", post_id, next);
        Ok(success_message(body, &format!("News {next} successfully")))
    }

    fn acquire(&self, post_id: &str) -> Result<InFlight> {
        let mut ids = self
            .in_flight
            .lock()
            .map_err(|_| Error::RequestInFlight(post_id.to_string()))?;
        if !ids.insert(post_id.to_string()) {
            return Err(Error::RequestInFlight(post_id.to_string()));
        }
        Ok(InFlight {
            ids: self.in_flight.clone(),
            post_id: post_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use super::*;
    use crate::{
        forms::{MultipartPayload, UpdatePayload},
        models::news_post::Post,
    };

    #[derive(Default)]
    struct SlowStatus {
        calls: Mutex<Vec<(String, PostStatus)>>,
    }

    #[async_trait]
    impl NewsPostsRepository for SlowStatus {
        async fn create_news_post(&self, _: MultipartPayload) -> Result<Value> {
            unreachable!()
        }
        async fn update_news_post(&self, _: &str, _: UpdatePayload) -> Result<Value> {
            unreachable!()
        }
        async fn get_news_post(&self, _: &str) -> Result<Post> {
            unreachable!()
        }
        async fn get_public_news(&self) -> Result<Vec<Post>> {
            unreachable!()
        }
        async fn update_status(&self, post_id: &str, status: PostStatus) -> Result<Value> {
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.calls
                .lock()
                .unwrap()
                .push((post_id.to_string(), status));
            Ok(json!({ "message": "Status updated" }))
        }
    }

    #[tokio::test]
    async fn second_click_while_outstanding_is_refused() {
        let repo = Arc::new(SlowStatus::default());
        let moderation = ModerationService::new(repo.clone());

        let (first, second) = tokio::join!(
            moderation.approve("42", None),
            moderation.approve("42", None)
        );
        assert_eq!(first.unwrap(), "Status updated");
        assert!(matches!(second, Err(Error::RequestInFlight(_))));
        assert_eq!(repo.calls.lock().unwrap().len(), 1);
        assert!(!moderation.is_in_flight("42"));

        moderation.approve("42", None).await.unwrap();
        assert_eq!(repo.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn non_pending_posts_cannot_be_moderated() {
        let repo = Arc::new(SlowStatus::default());
        let moderation = ModerationService::new(repo.clone());

        let err = moderation
            .reject("7", Some(PostStatus::Approved))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { .. }));
        assert!(repo.calls.lock().unwrap().is_empty());

        moderation.reject("7", Some(PostStatus::Pending)).await.unwrap();
        assert_eq!(
            repo.calls.lock().unwrap()[0],
            ("7".to_string(), PostStatus::Rejected)
        );
    }
}
