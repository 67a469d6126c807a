use validator::Validate;

use super::MultipartPayload;
use crate::{
    media::MediaFile,
    models::ads::{AdRedirectDto, AdSlot},
    Error, Result,
};

/// Upload for a single fixed ad slot. Each slot is submitted on its own.
#[derive(Debug, Clone)]
pub struct AdUploadForm {
    pub slot: AdSlot,
    pub image: Option<MediaFile>,
    pub redirect_url: String,
}

impl AdUploadForm {
    pub fn new(slot: AdSlot) -> Self {
        Self {
            slot,
            image: None,
            redirect_url: String::new(),
        }
    }

    pub fn to_payload(&self) -> Result<MultipartPayload> {
        let image = self
            .image
            .clone()
            .ok_or_else(|| Error::Validation(format!("Please choose an image for {}", self.slot)))?;
        if !image.is_image() {
            return Err(Error::Validation("Ad creative must be an image file".to_string()));
        }
        let redirect = AdRedirectDto {
            redirect_url: self.redirect_url.trim().to_string(),
        };
        redirect.validate()?;

        Ok(MultipartPayload::default()
            .file("image", image)
            .text("platform", self.slot.platform_str())
            .text("type", self.slot.type_str())
            .text("redirectUrl", redirect.redirect_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_slot_fields() {
        let mut form = AdUploadForm::new(AdSlot::MobilePopover);
        form.image = Some(MediaFile::new("ad.jpg", "image/jpeg", vec![1, 2]));
        form.redirect_url = "https://sponsor.example.com/offer".into();

        let payload = form.to_payload().unwrap();
        assert_eq!(payload.field("platform"), Some("mobile"));
        assert_eq!(payload.field("type"), Some("popover"));
        assert_eq!(payload.field("redirectUrl"), Some("https://sponsor.example.com/offer"));
        assert!(payload.file_part("image").is_some());
    }

    #[test]
    fn requires_image_and_valid_url() {
        let mut form = AdUploadForm::new(AdSlot::WebBanner);
        form.redirect_url = "https://example.com".into();
        assert!(form.to_payload().is_err());

        form.image = Some(MediaFile::new("ad.jpg", "image/jpeg", vec![1]));
        form.redirect_url = "not a url".into();
        assert_eq!(
            form.to_payload().unwrap_err().user_message(),
            "Redirect URL must be a valid URL"
        );
    }
}
