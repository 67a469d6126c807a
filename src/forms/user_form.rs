use validator::Validate;

use super::MultipartPayload;
use crate::{
    media::{ImagePolicy, MediaFile, PROFILE_PICTURE},
    models::users::{CreateUserDto, UserRole},
    normalize::{lookup, match_state, normalize_district},
    Error, Result,
};

#[derive(Debug, Clone, PartialEq)]
pub enum CreateUserPayload {
    Json(CreateUserDto),
    /// Used only when a profile picture is attached.
    Multipart(MultipartPayload),
}

/// Account creation form. State and district only exist while the role is journalist.
#[derive(Debug, Clone)]
pub struct UserForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    role: UserRole,
    state: Option<&'static str>,
    district: Option<&'static str>,
    profile_picture: Option<MediaFile>,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            email: String::new(),
            password: String::new(),
            role: UserRole::Editor,
            state: None,
            district: None,
            profile_picture: None,
        }
    }
}

impl UserForm {
    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn shows_region_fields(&self) -> bool {
        self.role.requires_region()
    }

    pub fn set_role(&mut self, role: UserRole) {
        self.role = role;
        if !role.requires_region() {
            self.state = None;
            self.district = None;
        }
    }

    pub fn set_state(&mut self, raw: &str) -> Result<()> {
        if !self.shows_region_fields() {
            return Err(Error::Validation(
                "Only journalists are assigned a state".to_string(),
            ));
        }
        self.district = None;
        self.state = Some(
            match_state(raw)
                .ok_or_else(|| Error::Validation(format!("Unknown state: {raw}")))?
                .value,
        );
        Ok(())
    }

    pub fn set_district(&mut self, raw: &str) -> Result<()> {
        let state = self
            .state
            .ok_or_else(|| Error::Validation("Please select a state first".to_string()))?;
        self.district = Some(normalize_district(state, raw).ok_or_else(|| {
            Error::Validation(format!("{raw} is not a district of the selected state"))
        })?);
        Ok(())
    }

    pub fn district_options(&self) -> &'static [lookup::DistrictOption] {
        self.state.map(lookup::districts_of).unwrap_or(&[])
    }

    /// Pictures over the profile threshold are resampled rather than refused.
    pub fn set_profile_picture(&mut self, file: MediaFile) -> Result<()> {
        if !file.is_image() {
            return Err(Error::Validation(
                "Profile picture must be an image file".to_string(),
            ));
        }
        self.profile_picture = Some(file);
        Ok(())
    }

    pub fn profile_picture(&self, policy: ImagePolicy) -> Result<Option<MediaFile>> {
        self.profile_picture
            .clone()
            .map(|file| policy.prepare(file))
            .transpose()
    }

    pub fn prepared_profile_picture(&self) -> Result<Option<MediaFile>> {
        self.profile_picture(PROFILE_PICTURE)
    }

    pub fn to_dto(&self) -> Result<CreateUserDto> {
        let (state, district) = if self.role.requires_region() {
            let state = self
                .state
                .ok_or_else(|| Error::Validation("State is required for journalists".to_string()))?;
            let district = self.district.ok_or_else(|| {
                Error::Validation("District is required for journalists".to_string())
            })?;
            (Some(state.to_string()), Some(district.to_string()))
        } else {
            (None, None)
        };

        let dto = CreateUserDto {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            role: self.role,
            state,
            district,
        };
        dto.validate()?;
        Ok(dto)
    }

    pub fn to_payload(&self) -> Result<CreateUserPayload> {
        let dto = self.to_dto()?;
        let Some(picture) = self.prepared_profile_picture()? else {
            return Ok(CreateUserPayload::Json(dto));
        };

        let mut payload = MultipartPayload::default()
            .text("name", dto.name)
            .text("phone", dto.phone)
            .text("email", dto.email)
            .text("password", dto.password)
            .text("role", dto.role.to_str());
        if let (Some(state), Some(district)) = (dto.state, dto.district) {
            payload = payload.text("state", state).text("district", district);
        }
        Ok(CreateUserPayload::Multipart(
            payload.file("profilePicture", picture),
        ))
    }

    pub fn reset(&mut self) {
        *self = UserForm::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> UserForm {
        UserForm {
            name: "Asha Kumari".into(),
            phone: "9876543210".into(),
            email: "asha@example.com".into(),
            password: "secret1".into(),
            ..UserForm::default()
        }
    }

    #[test]
    fn editor_has_no_region() {
        let mut form = base();
        assert!(form.set_state("bihar").is_err());
        let dto = form.to_dto().unwrap();
        assert_eq!(dto.role, UserRole::Editor);
        assert_eq!(dto.state, None);
    }

    #[test]
    fn journalist_requires_region() {
        let mut form = base();
        form.set_role(UserRole::Journalist);
        assert_eq!(
            form.to_dto().unwrap_err().user_message(),
            "State is required for journalists"
        );
        form.set_state("Bihar").unwrap();
        form.set_district("Siwan").unwrap();
        let dto = form.to_dto().unwrap();
        assert_eq!(dto.state.as_deref(), Some("bihar"));
        assert_eq!(dto.district.as_deref(), Some("siwan"));
    }

    #[test]
    fn switching_back_to_editor_clears_region() {
        let mut form = base();
        form.set_role(UserRole::Journalist);
        form.set_state("jharkhand").unwrap();
        form.set_district("ranchi").unwrap();
        form.set_role(UserRole::Editor);
        assert!(form.district_options().is_empty());
        assert_eq!(form.to_dto().unwrap().district, None);
    }

    #[test]
    fn picture_switches_to_multipart() {
        let mut form = base();
        assert!(matches!(form.to_payload().unwrap(), CreateUserPayload::Json(_)));

        form.set_profile_picture(MediaFile::new("me.png", "image/png", vec![1; 16]))
            .unwrap();
        match form.to_payload().unwrap() {
            CreateUserPayload::Multipart(payload) => {
                assert_eq!(payload.field("role"), Some("editor"));
                assert_eq!(payload.field("state"), None);
                assert_eq!(payload.file_part("profilePicture").unwrap().len(), 16);
            }
            other => panic!("expected multipart, got {other:?}"),
        }
    }

    fn noisy_png(width: u32, height: u32) -> MediaFile {
        let mut seed = 0x2545_f491_u32;
        let img = image::RgbImage::from_fn(width, height, |_, _| {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let [r, g, b, _] = seed.to_le_bytes();
            image::Rgb([r, g, b])
        });
        let mut buf = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        MediaFile::new("portrait.png", "image/png", buf.into_inner())
    }

    #[test]
    fn oversized_picture_is_resampled_not_rejected() {
        let picture = noisy_png(1500, 1300);
        assert!(picture.len() > PROFILE_PICTURE.threshold_bytes);

        let mut form = base();
        form.set_profile_picture(picture).unwrap();
        let CreateUserPayload::Multipart(payload) = form.to_payload().unwrap() else {
            panic!("expected multipart payload");
        };

        let part = payload.file_part("profilePicture").unwrap();
        assert_eq!(part.content_type, "image/jpeg");
        assert_eq!(part.file_name, "portrait.jpg");
        let decoded = image::load_from_memory(&part.bytes).unwrap();
        assert!(decoded.width() <= 1200 && decoded.height() <= 1200);
        assert_eq!(decoded.width(), 1200);
    }

    #[test]
    fn field_rules_come_from_validator() {
        let mut form = base();
        form.email = "not-an-email".into();
        assert_eq!(form.to_dto().unwrap_err().user_message(), "Email is invalid");
    }
}
