use super::{is_blank_html, require, MultipartPayload};
use crate::{
    media::{
        is_youtube_url, validate_video_file, MediaFile, PreviewRegistry, PreviewSlot,
        FEATURED_IMAGE,
    },
    models::news_post::{Category, ContentType, Post, UpdateNewsPostDto},
    normalize::{self, Region},
    Error, Result,
};

/// Body for `PUT /api/news/re-edit/{id}`: JSON unless a new file is attached.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdatePayload {
    Json(UpdateNewsPostDto),
    Multipart(MultipartPayload),
}

/// Edit form pre-filled from a fetched post.
///
/// The featured image and the YouTube URL are read-only once the stored post has them.
#[derive(Debug)]
pub struct EditForm {
    post_id: String,
    title: String,
    content: String,
    category: Option<Category>,
    region: Region,
    content_type: ContentType,
    video_detected: bool,
    existing_image: Option<String>,
    existing_youtube_url: Option<String>,
    existing_video_path: Option<String>,
    youtube_url: String,
    new_image: Option<MediaFile>,
    new_video: Option<MediaFile>,
    image_preview: PreviewSlot,
    video_preview: PreviewSlot,
}

impl EditForm {
    pub fn from_post(post: &Post, previews: PreviewRegistry) -> Self {
        let category = normalize::normalize_category(&post.category);
        let video_detected = post.has_video_signals();
        let kind = normalize::resolve_content_type(category, video_detected);
        let existing_youtube_url = post.youtube_url().map(str::to_string);

        Self {
            post_id: post.id.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
            category,
            region: Region::from_raw(&post.state, &post.district),
            content_type: kind.content_type,
            video_detected,
            existing_image: post.featured_image().map(str::to_string),
            youtube_url: existing_youtube_url.clone().unwrap_or_default(),
            existing_youtube_url,
            existing_video_path: post.video_path().map(str::to_string),
            new_image: None,
            new_video: None,
            image_preview: PreviewSlot::new(previews.clone()),
            video_preview: PreviewSlot::new(previews),
        }
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn state(&self) -> &'static str {
        self.region.state()
    }

    pub fn district(&self) -> Option<&'static str> {
        self.region.district()
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn shows_video_fields(&self) -> bool {
        self.content_type == ContentType::Video
    }

    pub fn image_locked(&self) -> bool {
        self.existing_image.is_some()
    }

    pub fn youtube_locked(&self) -> bool {
        self.existing_youtube_url.is_some()
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    pub fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
    }

    /// Re-applies the entertainment rule: switching to it drops every video field.
    pub fn set_category(&mut self, raw: &str) -> Option<Category> {
        self.category = normalize::normalize_category(raw);
        let kind = normalize::resolve_content_type(self.category, self.video_detected);
        self.content_type = kind.content_type;
        if !kind.show_video_fields {
            self.new_video = None;
            self.video_preview.clear();
        }
        self.category
    }

    pub fn set_state(&mut self, raw: &str) {
        self.region.set_state(raw);
    }

    pub fn set_district(&mut self, raw: &str) -> Option<&'static str> {
        self.region.set_district(raw)
    }

    pub fn set_image(&mut self, file: MediaFile) -> Result<&str> {
        if self.image_locked() {
            return Err(Error::Validation(
                "Featured image cannot be changed once set".to_string(),
            ));
        }
        if !file.is_image() {
            return Err(Error::Validation(
                "Featured image must be an image file".to_string(),
            ));
        }
        self.new_image = Some(file);
        Ok(match &self.new_image {
            Some(file) => self.image_preview.show(file),
            None => "",
        })
    }

    pub fn set_youtube_url(&mut self, url: &str) -> Result<()> {
        if self.youtube_locked() {
            return Err(Error::Validation(
                "YouTube URL cannot be changed once set".to_string(),
            ));
        }
        self.youtube_url = url.trim().to_string();
        if !self.youtube_url.is_empty() {
            self.new_video = None;
            self.video_preview.clear();
        }
        Ok(())
    }

    /// A new upload replaces any stored video file. Not allowed for YouTube-sourced posts.
    pub fn set_video_file(&mut self, file: MediaFile) -> Result<&str> {
        if !self.shows_video_fields() {
            return Err(Error::Validation(
                "This post is not a video post".to_string(),
            ));
        }
        if self.youtube_locked() {
            return Err(Error::Validation(
                "YouTube URL cannot be changed once set".to_string(),
            ));
        }
        self.youtube_url.clear();
        self.new_video = Some(file);
        Ok(match &self.new_video {
            Some(file) => self.video_preview.show(file),
            None => "",
        })
    }

    pub fn validate(&self) -> Result<()> {
        require(&self.title, "Headline is required")?;
        if self.category.is_none() {
            return Err(Error::Validation("Category is required".to_string()));
        }
        if self.region.district().is_none() {
            return Err(Error::Validation("District is required".to_string()));
        }
        if is_blank_html(&self.content) {
            return Err(Error::Validation("Content is required".to_string()));
        }
        if !self.shows_video_fields() {
            return Ok(());
        }

        // A stored upload counts as the file side: a post keeps exactly one video source.
        let has_url = !self.youtube_url.is_empty();
        let has_file = self.new_video.is_some() || self.existing_video_path.is_some();
        match (has_url, has_file) {
            (false, false) => Err(Error::Validation(
                "Please provide a YouTube URL or upload a video file".to_string(),
            )),
            (true, true) => Err(Error::Validation(
                "Provide either a YouTube URL or a video file, not both".to_string(),
            )),
            (true, _) if !is_youtube_url(&self.youtube_url) => Err(Error::Validation(
                "Please enter a valid YouTube URL".to_string(),
            )),
            _ => match &self.new_video {
                Some(file) => validate_video_file(file),
                None => Ok(()),
            },
        }
    }

    pub fn to_payload(&self) -> Result<UpdatePayload> {
        self.validate()?;
        let (Some(category), Some(district)) = (self.category, self.region.district()) else {
            return Err(Error::Validation("Form is incomplete".to_string()));
        };

        let video = self.shows_video_fields();
        let youtube_url = (video && !self.youtube_url.is_empty()).then(|| self.youtube_url.clone());

        if self.new_video.is_none() && self.new_image.is_none() {
            return Ok(UpdatePayload::Json(UpdateNewsPostDto {
                title: self.title.trim().to_string(),
                content: self.content.clone(),
                category,
                state: self.region.state().to_string(),
                district: district.to_string(),
                content_type: self.content_type,
                youtube_url,
            }));
        }

        let mut payload = MultipartPayload::default()
            .text("title", self.title.trim())
            .text("category", category.as_str())
            .text("state", self.region.state())
            .text("district", district)
            .text("content", self.content.as_str())
            .text("contentType", self.content_type.as_str());
        if let Some(url) = youtube_url {
            payload = payload.text("youtubeUrl", url);
        }
        if let Some(image) = &self.new_image {
            payload = payload.file("featuredImage", FEATURED_IMAGE.prepare(image.clone())?);
        }
        if let (true, Some(file)) = (video, &self.new_video) {
            payload = payload.file("video", file.clone());
        }
        Ok(UpdatePayload::Multipart(payload))
    }
}
