use tracing::warn;

use super::Notice;
use crate::{models::users::User, services::user::UserService, Result};

pub struct UsersView {
    service: UserService,
    users: Vec<User>,
    notice: Option<Notice>,
}

impl UsersView {
    pub fn new(service: UserService) -> Self {
        Self {
            service,
            users: Vec::new(),
            notice: None,
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub async fn refresh(&mut self) -> Result<&[User]> {
        match self.service.get_users().await {
            Ok(users) => {
                self.users = users;
                Ok(&self.users)
            }
            Err(err) => {
                self.notice = Some(Notice::from(&err));
                Err(err)
            }
        }
    }

    pub async fn delete(&mut self, user_id: &str) -> Result<Notice> {
        if let Err(err) = self.service.delete_user(user_id).await {
            self.notice = Some(Notice::from(&err));
            return Err(err);
        }
        let refreshed = self.refresh().await.map(|_| ());
        if let Err(err) = refreshed {
            warn!("Refetch after delete failed: {}", err);
            self.users.retain(|u| u.id != user_id);
        }
        let notice = Notice::success("User deleted successfully");
        self.notice = Some(notice.clone());
        Ok(notice)
    }
}
