use once_cell::sync::Lazy;
use regex::Regex;

use super::MediaFile;
use crate::{Error, Result};

pub const MAX_VIDEO_BYTES: usize = 50 * 1024 * 1024;
pub const ACCEPTED_VIDEO_TYPE: &str = "video/mp4";

static YOUTUBE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^https?://(?:(?:www|m)\.)?(?:youtube\.com/(?:watch\?(?:.*&)?v=|shorts/|embed/|live/)|youtu\.be/)[A-Za-z0-9_-]{6,}",
    )
    .expect("static youtube pattern compiles")
});

pub fn is_youtube_url(url: &str) -> bool {
    YOUTUBE_URL.is_match(url.trim())
}

/// Size first, then type; both are checked before anything touches the network.
pub fn validate_video_file(file: &MediaFile) -> Result<()> {
    if file.len() > MAX_VIDEO_BYTES {
        return Err(Error::Validation(format!(
            "Video file is too large ({:.1} MB). The limit is 50 MB.",
            file.len() as f64 / (1024.0 * 1024.0)
        )));
    }
    if !file.content_type.eq_ignore_ascii_case(ACCEPTED_VIDEO_TYPE) {
        return Err(Error::Validation(
            "Only MP4 video files are supported.".to_string(),
        ));
    }
    Ok(())
}
