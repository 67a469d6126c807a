use tracing::debug;

use super::{is_blank_html, require, MultipartPayload};
use crate::{
    media::{
        is_youtube_url, validate_video_file, ImagePolicy, MediaFile, PreviewRegistry,
        PreviewSlot, FEATURED_IMAGE,
    },
    models::news_post::{Category, ContentType},
    normalize::{self, lookup},
    Error, Result,
};

/// Where a video post's footage comes from. Exactly one source can be held at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    YouTube(String),
    Upload(MediaFile),
}

/// Creation form shared by the standard and the video post screens.
#[derive(Debug)]
pub struct PostForm {
    kind: ContentType,
    headline: String,
    category: Option<Category>,
    state: Option<&'static str>,
    district: Option<&'static str>,
    content: String,
    image: Option<MediaFile>,
    youtube_url: String,
    video_file: Option<MediaFile>,
    image_preview: PreviewSlot,
    video_preview: PreviewSlot,
    image_policy: ImagePolicy,
}

impl PostForm {
    pub fn standard(previews: PreviewRegistry) -> Self {
        Self::new(ContentType::Standard, previews)
    }

    pub fn video(previews: PreviewRegistry) -> Self {
        Self::new(ContentType::Video, previews)
    }

    fn new(kind: ContentType, previews: PreviewRegistry) -> Self {
        Self {
            kind,
            headline: String::new(),
            category: None,
            state: None,
            district: None,
            content: String::new(),
            image: None,
            youtube_url: String::new(),
            video_file: None,
            image_preview: PreviewSlot::new(previews.clone()),
            video_preview: PreviewSlot::new(previews),
            image_policy: FEATURED_IMAGE,
        }
    }

    pub fn with_image_policy(mut self, policy: ImagePolicy) -> Self {
        self.image_policy = policy;
        self
    }

    pub fn kind(&self) -> ContentType {
        self.kind
    }

    pub fn set_headline(&mut self, headline: &str) {
        self.headline = headline.to_string();
    }

    pub fn set_content(&mut self, content: &str) {
        self.content = content.to_string();
    }

    /// Accepts option values and free text alike; unrecognised text leaves the control empty.
    pub fn set_category(&mut self, raw: &str) -> Option<Category> {
        self.category = normalize::normalize_category(raw);
        self.category
    }

    /// Any state change clears the district.
    pub fn set_state(&mut self, raw: &str) -> Result<&'static str> {
        self.district = None;
        let state = normalize::match_state(raw)
            .ok_or_else(|| Error::Validation(format!("Unknown state: {raw}")))?;
        self.state = Some(state.value);
        Ok(state.value)
    }

    pub fn set_district(&mut self, raw: &str) -> Result<&'static str> {
        let state = self
            .state
            .ok_or_else(|| Error::Validation("Please select a state first".to_string()))?;
        self.district = normalize::normalize_district(state, raw);
        self.district.ok_or_else(|| {
            Error::Validation(format!("{raw} is not a district of the selected state"))
        })
    }

    pub fn district_options(&self) -> &'static [lookup::DistrictOption] {
        self.state.map(lookup::districts_of).unwrap_or(&[])
    }

    pub fn set_image(&mut self, file: MediaFile) -> Result<&str> {
        if !file.is_image() {
            return Err(Error::Validation(
                "Featured image must be an image file".to_string(),
            ));
        }
        self.image = Some(file);
        Ok(self.show_image_preview())
    }

    fn show_image_preview(&mut self) -> &str {
        match &self.image {
            Some(file) => self.image_preview.show(file),
            None => "",
        }
    }

    pub fn remove_image(&mut self) {
        self.image = None;
        self.image_preview.clear();
    }

    /// Typing a URL drops any selected file.
    pub fn set_youtube_url(&mut self, url: &str) {
        self.youtube_url = url.trim().to_string();
        if !self.youtube_url.is_empty() && self.video_file.take().is_some() {
            debug!("YouTube URL entered, dropping selected video file");
            self.video_preview.clear();
        }
    }

    /// Selecting a file empties the URL field.
    pub fn set_video_file(&mut self, file: MediaFile) -> &str {
        self.youtube_url.clear();
        self.video_file = Some(file);
        match &self.video_file {
            Some(file) => self.video_preview.show(file),
            None => "",
        }
    }

    pub fn video_source(&self) -> Option<VideoSource> {
        match (&self.video_file, self.youtube_url.is_empty()) {
            (Some(file), true) => Some(VideoSource::Upload(file.clone())),
            (None, false) => Some(VideoSource::YouTube(self.youtube_url.clone())),
            _ => None,
        }
    }

    pub fn youtube_url(&self) -> &str {
        &self.youtube_url
    }

    pub fn image_preview(&self) -> Option<&str> {
        self.image_preview.url()
    }

    pub fn video_preview(&self) -> Option<&str> {
        self.video_preview.url()
    }

    /// Required fields, then video source presence, URL pattern, file size/type.
    pub fn validate(&self) -> Result<()> {
        require(&self.headline, "Headline is required")?;
        let category = self
            .category
            .ok_or_else(|| Error::Validation("Category is required".to_string()))?;
        if self.state.is_none() {
            return Err(Error::Validation("State is required".to_string()));
        }
        if self.district.is_none() {
            return Err(Error::Validation("District is required".to_string()));
        }
        if is_blank_html(&self.content) {
            return Err(Error::Validation("Content is required".to_string()));
        }

        if self.kind == ContentType::Standard {
            return Ok(());
        }

        if !category.allows_video() {
            return Err(Error::Validation(
                "Entertainment news is published as a standard post".to_string(),
            ));
        }
        let has_url = !self.youtube_url.is_empty();
        match (has_url, &self.video_file) {
            (false, None) => Err(Error::Validation(
                "Please provide a YouTube URL or upload a video file".to_string(),
            )),
            (true, Some(_)) => Err(Error::Validation(
                "Provide either a YouTube URL or a video file, not both".to_string(),
            )),
            (true, None) if !is_youtube_url(&self.youtube_url) => Err(Error::Validation(
                "Please enter a valid YouTube URL".to_string(),
            )),
            (true, None) => Ok(()),
            (false, Some(file)) => validate_video_file(file),
        }
    }

    /// Validates and builds the multipart body; oversized images are resampled here.
    pub fn to_payload(&self) -> Result<MultipartPayload> {
        self.validate()?;

        let (Some(category), Some(state), Some(district)) =
            (self.category, self.state, self.district)
        else {
            return Err(Error::Validation("Form is incomplete".to_string()));
        };

        let mut payload = MultipartPayload::default()
            .text("title", self.headline.trim())
            .text("category", category.as_str())
            .text("state", state)
            .text("district", district)
            .text("content", self.content.as_str())
            .text("contentType", self.kind.as_str());

        match self.kind {
            ContentType::Standard => {
                if let Some(image) = &self.image {
                    payload = payload.file("featuredImage", self.image_policy.prepare(image.clone())?);
                }
            }
            ContentType::Video => match self.video_source() {
                Some(VideoSource::YouTube(url)) => payload = payload.text("youtubeUrl", url),
                Some(VideoSource::Upload(file)) => payload = payload.file("video", file),
                None => {
                    return Err(Error::Validation(
                        "Please provide a YouTube URL or upload a video file".to_string(),
                    ))
                }
            },
        }

        Ok(payload)
    }

    /// Back to empty values after a successful submission; previews are released.
    pub fn reset(&mut self) {
        self.headline.clear();
        self.category = None;
        self.state = None;
        self.district = None;
        self.content.clear();
        self.image = None;
        self.youtube_url.clear();
        self.video_file = None;
        self.image_preview.clear();
        self.video_preview.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.headline.is_empty()
            && self.category.is_none()
            && self.state.is_none()
            && self.district.is_none()
            && self.content.is_empty()
            && self.image.is_none()
            && self.youtube_url.is_empty()
            && self.video_file.is_none()
    }
}
