use serde::{Deserialize, Serialize};
use validator::Validate;

use super::string_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppPlatform {
    Android,
    Ios,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppVersion {
    #[serde(default, alias = "_id", deserialize_with = "string_id")]
    pub id: String,
    pub platform: AppPlatform,
    pub version: String,
    #[serde(default, alias = "force_update")]
    pub force_update: bool,
    #[serde(default, alias = "release_notes")]
    pub release_notes: Option<String>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppVersionDto {
    pub platform: AppPlatform,
    #[validate(length(min = 1, message = "Version is required"))]
    pub version: String,
    pub force_update: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 2000, message = "Release notes are too long"))]
    pub release_notes: Option<String>,
}

impl CreateAppVersionDto {
    /// Dotted numeric versions only, e.g. `2.4.1`.
    pub fn has_valid_version(&self) -> bool {
        let parts: Vec<&str> = self.version.trim().split('.').collect();
        !parts.is_empty()
            && parts.len() <= 4
            && parts
                .iter()
                .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(version: &str) -> CreateAppVersionDto {
        CreateAppVersionDto {
            platform: AppPlatform::Android,
            version: version.into(),
            force_update: false,
            release_notes: None,
        }
    }

    #[test]
    fn version_format() {
        assert!(dto("2.4.1").has_valid_version());
        assert!(dto("10").has_valid_version());
        assert!(!dto("2..1").has_valid_version());
        assert!(!dto("v2").has_valid_version());
    }

    #[test]
    fn camel_case_body() {
        let body = serde_json::to_value(dto("1.0.0")).unwrap();
        assert_eq!(body["forceUpdate"], false);
        assert!(body.get("releaseNotes").is_none());
    }
}
