use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    National,
    International,
    Sports,
    Entertainment,
    Trending,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::National,
        Category::International,
        Category::Sports,
        Category::Entertainment,
        Category::Trending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::National => "national",
            Self::International => "international",
            Self::Sports => "sports",
            Self::Entertainment => "entertainment",
            Self::Trending => "trending",
        }
    }

    /// Entertainment posts are never published as video.
    pub fn allows_video(&self) -> bool {
        !matches!(self, Self::Entertainment)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Standard,
    Video,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Video => "video",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Pending,
    Approved,
    Rejected,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Only a pending post can be moderated, and only to a final state.
    pub fn can_transition_to(&self, next: PostStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(format!("unknown post status {other:?}")),
        }
    }
}

/// A news post as returned by any of the listing or detail endpoints.
///
/// Field names differ between deployments, so each field is read from the first of its
/// known names that carries a value. Category/state/district are kept raw for the
/// normalizer.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", try_from = "Map<String, Value>")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub state: String,
    pub district: String,
    pub content_type: Option<String>,
    pub featured_image: Option<String>,
    pub youtube_url: Option<String>,
    pub video_path: Option<String>,
    pub is_video: Option<bool>,
    pub status: Option<PostStatus>,
    pub author: Option<Value>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl TryFrom<Map<String, Value>> for Post {
    type Error = String;

    fn try_from(raw: Map<String, Value>) -> Result<Self, Self::Error> {
        let record = Record(&raw);
        Ok(Self {
            id: record.id(&["id", "_id"])?,
            title: record.text(&["title", "headline", "heading"]),
            content: record.text(&["content", "description", "body"]),
            category: record.text(&["category", "categoryName"]),
            state: record.text(&["state", "stateName"]),
            district: record.text(&["district", "districtName"]),
            content_type: record.opt_text(&["contentType", "content_type", "type", "postType"]),
            featured_image: record.opt_text(&[
                "featuredImage",
                "featured_image",
                "image",
                "imageUrl",
            ]),
            youtube_url: record.opt_text(&["youtubeUrl", "youtube_url", "youtubeLink"]),
            video_path: record.opt_text(&["videoPath", "video_path", "videoUrl", "video_url"]),
            is_video: record.flag(&["isVideo", "is_video", "hasVideo"]),
            status: record
                .opt_text(&["status"])
                .and_then(|s| s.parse().ok()),
            // A populated user object names the author; `createdBy` is often a bare id.
            author: record.first(&["author", "user", "createdBy"]).cloned(),
            created_at: record.opt_text(&["createdAt", "created_at"]),
            updated_at: record.opt_text(&["updatedAt", "updated_at"]),
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl Post {
    pub fn featured_image(&self) -> Option<&str> {
        non_empty(&self.featured_image)
    }

    pub fn youtube_url(&self) -> Option<&str> {
        non_empty(&self.youtube_url)
    }

    pub fn video_path(&self) -> Option<&str> {
        non_empty(&self.video_path)
    }

    /// Any hint from the stored record that this is a video post.
    pub fn has_video_signals(&self) -> bool {
        self.is_video.unwrap_or(false)
            || self
                .content_type
                .as_deref()
                .is_some_and(|t| t.trim().eq_ignore_ascii_case("video"))
            || self.youtube_url().is_some()
            || self.video_path().is_some()
    }

    pub fn author_name(&self) -> Option<String> {
        match self.author.as_ref()? {
            Value::String(name) => Some(name.clone()),
            Value::Object(map) => ["name", "fullName", "username", "email"]
                .iter()
                .find_map(|key| map.get(*key).and_then(Value::as_str))
                .map(str::to_string),
            _ => None,
        }
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
            .as_deref()
            .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Body of `PUT /api/news/admin/news/status/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatusUpdateDto {
    pub status: PostStatus,
}

/// JSON body of `PUT /api/news/re-edit/{id}` when no new file is attached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNewsPostDto {
    pub title: String,
    pub content: String,
    pub category: Category,
    pub state: String,
    pub district: String,
    pub content_type: ContentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube_url: Option<String>,
}
