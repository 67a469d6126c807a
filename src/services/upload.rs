use std::sync::Arc;

use tracing::info;

use crate::{
    media::{MediaFile, FEATURED_IMAGE},
    repositories::upload_repo::UploadRepository,
    Error, Result,
};

/// Images embedded in rich-text content.
#[derive(Clone)]
pub struct UploadService {
    repo: Arc<dyn UploadRepository>,
}

impl UploadService {
    pub fn new(repo: Arc<dyn UploadRepository>) -> Self {
        Self { repo }
    }

    /// Oversized images are resampled with the featured image policy before upload.
    pub async fn upload_image(&self, image: MediaFile) -> Result<String> {
        if !image.is_image() {
            return Err(Error::Validation("Only image files can be embedded".to_string()));
        }
        let url = self.repo.upload_image(FEATURED_IMAGE.prepare(image)?).await?;
        info!("Embedded image uploaded to {}", url);
        Ok(url)
    }
}
