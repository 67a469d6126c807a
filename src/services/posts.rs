use std::sync::Arc;

use tracing::info;

use super::success_message;
use crate::{
    forms::{EditForm, PostForm},
    media::PreviewRegistry,
    models::news_post::{Post, PostStatus},
    repositories::news_post_repo::NewsPostsRepository,
    Result,
};

#[derive(Clone)]
pub struct NewsPostsService {
    repo: Arc<dyn NewsPostsRepository>,
    previews: PreviewRegistry,
}

impl NewsPostsService {
    pub fn new(repo: Arc<dyn NewsPostsRepository>, previews: PreviewRegistry) -> Self {
        Self { repo, previews }
    }

    pub fn previews(&self) -> &PreviewRegistry {
        &self.previews
    }

    pub fn standard_form(&self) -> PostForm {
        PostForm::standard(self.previews.clone())
    }

    pub fn video_form(&self) -> PostForm {
        PostForm::video(self.previews.clone())
    }

    /// Submits the form and resets it on success. A failed submission leaves it untouched.
    pub async fn create_news_post(&self, form: &mut PostForm) -> Result<String> {
        let payload = form.to_payload()?;
        let body = self.repo.create_news_post(payload).await?;
        info!("{} post submitted for review", form.kind().as_str());
        form.reset();
        Ok(success_message(body, "News submitted for review"))
    }

    pub async fn get_news_post(&self, post_id: &str) -> Result<Post> {
        self.repo.get_news_post(post_id).await
    }

    /// Fetches the post and pre-fills an edit form from it.
    pub async fn edit_form(&self, post_id: &str) -> Result<EditForm> {
        let post = self.repo.get_news_post(post_id).await?;
        Ok(EditForm::from_post(&post, self.previews.clone()))
    }

    pub async fn update_news_post(&self, form: &EditForm) -> Result<String> {
        let payload = form.to_payload()?;
        let body = self.repo.update_news_post(form.post_id(), payload).await?;
        info!("Post {} updated", form.post_id());
        Ok(success_message(body, "News updated successfully"))
    }

    /// Public listing; entries whose status is known and not approved are dropped.
    pub async fn get_approved_posts(&self) -> Result<Vec<Post>> {
        let posts = self.repo.get_public_news().await?;
        Ok(posts
            .into_iter()
            .filter(|p| p.status.map_or(true, |s| s == PostStatus::Approved))
            .collect())
    }
}
