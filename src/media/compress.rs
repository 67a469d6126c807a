//! Client-side resample of oversized images before upload.

use std::io::Cursor;

use image::{codecs::jpeg::JpegEncoder, imageops::FilterType, DynamicImage, GenericImageView};
use tracing::{debug, info};

use super::MediaFile;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePolicy {
    /// Files at or below this size are uploaded untouched.
    pub threshold_bytes: usize,
    pub max_dimension: u32,
    pub jpeg_quality: u8,
}

pub const FEATURED_IMAGE: ImagePolicy = ImagePolicy {
    threshold_bytes: 1024 * 1024,
    max_dimension: 1200,
    jpeg_quality: 70,
};

pub const PROFILE_PICTURE: ImagePolicy = ImagePolicy {
    threshold_bytes: 5 * 1024 * 1024,
    max_dimension: 1200,
    jpeg_quality: 70,
};

impl ImagePolicy {
    pub fn needs_resample(&self, file: &MediaFile) -> bool {
        file.len() > self.threshold_bytes
    }

    /// Returns the file unchanged when it is small enough, otherwise a resampled JPEG.
    pub fn prepare(&self, file: MediaFile) -> Result<MediaFile> {
        if !self.needs_resample(&file) {
            debug!(
                "Image {} is {} bytes, uploading as is",
                file.file_name,
                file.len()
            );
            return Ok(file);
        }
        let original = file.len();
        let resampled = self.resample(&file)?;
        info!(
            "Resampled {} from {} to {} bytes",
            file.file_name,
            original,
            resampled.len()
        );
        Ok(resampled)
    }

    /// Bounds the image to `max_dimension` on both axes and re-encodes it as JPEG.
    pub fn resample(&self, file: &MediaFile) -> Result<MediaFile> {
        let img = image::load_from_memory(&file.bytes)?;
        let img = fit_within(&img, self.max_dimension);
        let (width, height) = img.dimensions();

        let rgb = img.to_rgb8();
        let mut buf = Cursor::new(Vec::new());
        {
            let mut encoder = JpegEncoder::new_with_quality(&mut buf, self.jpeg_quality);
            encoder.encode(rgb.as_raw(), width, height, image::ExtendedColorType::Rgb8)?;
        }

        Ok(MediaFile::new(
            jpeg_name(&file.file_name),
            "image/jpeg",
            buf.into_inner(),
        ))
    }
}

/// Preserves aspect ratio and never upscales.
fn fit_within(img: &DynamicImage, max: u32) -> DynamicImage {
    let (width, height) = img.dimensions();
    if width <= max && height <= max {
        return img.clone();
    }
    img.resize(max, max, FilterType::Lanczos3)
}

fn jpeg_name(file_name: &str) -> String {
    let stem = match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    };
    format!("{stem}.jpg")
}
