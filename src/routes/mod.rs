use std::fmt;

use crate::session::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    CreatePost,
    CreateVideoPost,
    PendingPosts,
    RejectedPosts,
    ApprovedPosts,
    EditPost(String),
    Users,
    CreateUser,
    Ads,
    AppVersions,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::CreatePost => "/posts/create".to_string(),
            Self::CreateVideoPost => "/posts/create-video".to_string(),
            Self::PendingPosts => "/posts/pending".to_string(),
            Self::RejectedPosts => "/posts/rejected".to_string(),
            Self::ApprovedPosts => "/posts/approved".to_string(),
            Self::EditPost(id) => format!("/posts/edit/{}", urlencoding::encode(id)),
            Self::Users => "/users".to_string(),
            Self::CreateUser => "/users/create".to_string(),
            Self::Ads => "/ads".to_string(),
            Self::AppVersions => "/app-versions".to_string(),
        }
    }

    /// Returns `None` for paths the dashboard does not serve.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.trim().trim_end_matches('/');
        let route = match path {
            "/login" => Self::Login,
            "" | "/" | "/dashboard" => Self::Dashboard,
            "/posts/create" => Self::CreatePost,
            "/posts/create-video" => Self::CreateVideoPost,
            "/posts/pending" => Self::PendingPosts,
            "/posts/rejected" => Self::RejectedPosts,
            "/posts/approved" => Self::ApprovedPosts,
            "/users" => Self::Users,
            "/users/create" => Self::CreateUser,
            "/ads" => Self::Ads,
            "/app-versions" => Self::AppVersions,
            other => {
                let id = other.strip_prefix("/posts/edit/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                let id = urlencoding::decode(id).ok()?.into_owned();
                Self::EditPost(id)
            }
        };
        Some(route)
    }

    pub fn is_public(&self) -> bool {
        matches!(self, Self::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Allow(Route),
    Redirect(Route),
}

impl Navigation {
    pub fn target(&self) -> &Route {
        match self {
            Self::Allow(route) | Self::Redirect(route) => route,
        }
    }
}

/// Decides where a navigation lands based only on whether a token is stored.
pub fn guard(route: Route, session: &Session) -> Navigation {
    let authenticated = session.is_authenticated();
    match (route.is_public(), authenticated) {
        (true, true) => Navigation::Redirect(Route::Dashboard),
        (false, false) => Navigation::Redirect(Route::Login),
        _ => Navigation::Allow(route),
    }
}

/// Resolves a raw path; unknown paths fall through to the landing screen for the session.
pub fn navigate(path: &str, session: &Session) -> Navigation {
    match Route::parse(path) {
        Some(route) => guard(route, session),
        None if session.is_authenticated() => Navigation::Redirect(Route::Dashboard),
        None => Navigation::Redirect(Route::Login),
    }
}
