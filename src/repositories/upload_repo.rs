use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use tracing::instrument;

use super::{multipart_form, ApiRepo};
use crate::{forms::MultipartPayload, media::MediaFile, Error, Result};

#[async_trait]
pub trait UploadRepository: Send + Sync {
    /// Uploads an image embedded in rich-text content and returns its public URL.
    async fn upload_image(&self, image: MediaFile) -> Result<String>;
}

#[async_trait]
impl UploadRepository for ApiRepo {
    #[instrument(skip_all, fields(file = %image.file_name))]
    async fn upload_image(&self, image: MediaFile) -> Result<String> {
        let form = multipart_form(MultipartPayload::default().file("image", image))?;
        let request = self.authorized(Method::POST, "/api/upload")?.multipart(form);
        let body = self.send(request).await?;
        uploaded_url(&body)
            .ok_or_else(|| Error::Decode("upload response did not contain a URL".to_string()))
    }
}

fn uploaded_url(body: &Value) -> Option<String> {
    let candidates = [
        body.get("url"),
        body.get("data").and_then(|d| d.get("url")),
        body.get("imageUrl"),
        body.get("location"),
        body.get("data").filter(|d| d.is_string()),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(Value::as_str)
        .map(str::to_string)
}
