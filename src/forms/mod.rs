use crate::media::MediaFile;

pub mod ad_form;
pub mod edit_form;
pub mod post_form;
pub mod user_form;

pub use ad_form::AdUploadForm;
pub use edit_form::{EditForm, UpdatePayload};
pub use post_form::{PostForm, VideoSource};
pub use user_form::{CreateUserPayload, UserForm};

/// Scalar fields plus binary parts, in submission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultipartPayload {
    pub fields: Vec<(String, String)>,
    pub files: Vec<(String, MediaFile)>,
}

impl MultipartPayload {
    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_string(), value.into()));
        self
    }

    pub fn file(mut self, name: &str, file: MediaFile) -> Self {
        self.files.push((name.to_string(), file));
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn file_part(&self, name: &str) -> Option<&MediaFile> {
        self.files
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, file)| file)
    }
}

pub(crate) fn require(value: &str, message: &str) -> crate::Result<()> {
    if value.trim().is_empty() {
        return Err(crate::Error::Validation(message.to_string()));
    }
    Ok(())
}

/// Rich-text editors emit `<p><br></p>` for an empty document.
pub(crate) fn is_blank_html(content: &str) -> bool {
    let lower = content.to_lowercase();
    if ["<img", "<iframe", "<video"].iter().any(|tag| lower.contains(tag)) {
        return false;
    }
    let mut text = String::with_capacity(content.len());
    let mut in_tag = false;
    for c in content.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.replace("&nbsp;", " ").trim().is_empty()
}
