use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use crate::{
    models::users::LoginUserDto, repositories::auth_repo::AuthRepository, session::Session,
    Result,
};

#[derive(Clone)]
pub struct AuthService {
    repo: Arc<dyn AuthRepository>,
    session: Session,
}

impl AuthService {
    pub fn new(repo: Arc<dyn AuthRepository>, session: Session) -> Self {
        Self { repo, session }
    }

    /// Validates the credentials locally, then stores the issued token.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let credentials = LoginUserDto {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        credentials.validate()?;

        let token = self.repo.login(&credentials).await?;
        self.session.sign_in(&token)?;
        info!("Logged in as {}", credentials.email);
        Ok(())
    }

    /// The server call is best-effort; the local token is cleared regardless.
    pub async fn logout(&self) -> Result<()> {
        if self.session.is_authenticated() {
            if let Err(err) = self.repo.logout().await {
                warn!("Logout request failed, clearing token anyway: {}", err);
            }
        }
        self.session.sign_out()
    }
}
