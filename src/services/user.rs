use std::sync::Arc;

use tracing::info;

use super::success_message;
use crate::{
    forms::UserForm, models::users::User, repositories::user_repo::UserRepository, Error, Result,
};

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_users(&self) -> Result<Vec<User>> {
        self.repo.get_users().await
    }

    /// Creates the account and clears the form on success.
    pub async fn create_user(&self, form: &mut UserForm) -> Result<String> {
        let payload = form.to_payload()?;
        let body = self.repo.create_user(payload).await?;
        info!("Created {} account", form.role());
        form.reset();
        Ok(success_message(body, "User created successfully"))
    }

    pub async fn delete_user(&self, user_id: &str) -> Result<()> {
        if user_id.trim().is_empty() {
            return Err(Error::Validation("User id is required".to_string()));
        }
        self.repo.delete_user(user_id).await?;
        info!("Deleted user {}", user_id);
        Ok(())
    }
}
