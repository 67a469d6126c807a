//! Screen state for the list pages: the fetched rows plus the last transient notice.

use std::fmt;

use crate::Error;

pub mod dashboard;
pub mod pending;
pub mod posts;
pub mod users;

pub use dashboard::DashboardView;
pub use pending::PendingView;
pub use posts::{PostListView, PostSource};
pub use users::UsersView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// A transient message shown after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

impl From<&Error> for Notice {
    fn from(err: &Error) -> Self {
        Notice::error(err.user_message())
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            NoticeKind::Success => write!(f, "✔ {}", self.message),
            NoticeKind::Error => write!(f, "✘ {}", self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;
    use crate::errors::{FILE_TOO_LARGE, PERMISSION_DENIED};

    #[test]
    fn errors_become_user_facing_notices() {
        let notice = Notice::from(&Error::from_status(StatusCode::FORBIDDEN, None));
        assert!(notice.is_error());
        assert_eq!(notice.message, PERMISSION_DENIED);

        let notice = Notice::from(&Error::from_status(StatusCode::PAYLOAD_TOO_LARGE, None));
        assert_eq!(notice.message, FILE_TOO_LARGE);

        let notice = Notice::from(&Error::Validation("Headline is required".into()));
        assert_eq!(notice.to_string(), "✘ Headline is required");
    }
}
