use std::path::Path;

use crate::Result;

pub mod compress;
pub mod preview;
pub mod video;

pub use compress::{ImagePolicy, FEATURED_IMAGE, PROFILE_PICTURE};
pub use preview::{ObjectUrl, PreviewRegistry, PreviewSlot};
pub use video::{is_youtube_url, validate_video_file, MAX_VIDEO_BYTES};

/// A file picked by the operator, held in memory until it is uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Reads a file from disk, deriving its MIME type from the extension.
    pub async fn from_path(path: &Path) -> Result<MediaFile> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = mime_for(&file_name).to_string();
        Ok(MediaFile::new(file_name, content_type, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

pub fn mime_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        _ => "application/octet-stream",
    }
}
