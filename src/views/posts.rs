use super::Notice;
use crate::{
    models::news_post::Post,
    routes::Route,
    services::{dashboard::DashboardService, posts::NewsPostsService},
    Result,
};

/// Where a read-only post list comes from.
#[derive(Clone)]
pub enum PostSource {
    Rejected(DashboardService),
    Approved(NewsPostsService),
}

/// Rejected and approved lists. Rows can only be opened for editing.
pub struct PostListView {
    source: PostSource,
    posts: Vec<Post>,
    notice: Option<Notice>,
}

impl PostListView {
    pub fn new(source: PostSource) -> Self {
        Self {
            source,
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

    pub fn edit_route(&self, post_id: &str) -> Route {
        Route::EditPost(post_id.to_string())
    }

    pub async fn refresh(&mut self) -> Result<&[Post]> {
        let fetched = match &self.source {
            PostSource::Rejected(dashboard) => dashboard.get_rejected_posts().await,
            PostSource::Approved(posts) => posts.get_approved_posts().await,
        };
        match fetched {
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
}
