//! `newsdesk <command> [key=value ...]` parsing and the argument-to-form glue.

use std::{collections::BTreeMap, fmt, path::Path, str::FromStr};

use crate::{
    forms::{AdUploadForm, EditForm, PostForm, UserForm},
    media::MediaFile,
    models::{
        ads::AdSlot,
        app_version::{AppPlatform, CreateAppVersionDto},
        users::UserRole,
    },
    routes::Route,
    Error, Result,
};

pub const USAGE: &str = "\
usage: newsdesk <command> [key=value ...]

  login email= password=        store a session token
  logout                        clear the session token
  dashboard                     counts and recent pending posts
  pending | rejected | approved list posts
  approve id= | reject id=      moderate a pending post
  post title= category= state= district= content= [image=]
  video-post title= category= state= district= content= (youtube= | video=)
  edit id= [title= category= state= district= content= image= youtube= video=]
  users | create-user name= phone= email= password= role= [state= district= picture=]
  delete-user id=
  ads | upload-ad slot= image= redirect=
  versions | publish-version platform= version= [force=true] [notes=]
  upload-image file=";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Login,
    Logout,
    Dashboard,
    Pending,
    Rejected,
    Approved,
    Approve,
    Reject,
    Post,
    VideoPost,
    Edit,
    Users,
    CreateUser,
    DeleteUser,
    Ads,
    UploadAd,
    Versions,
    PublishVersion,
    UploadImage,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Logout => "logout",
            Self::Dashboard => "dashboard",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
            Self::Approved => "approved",
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::Post => "post",
            Self::VideoPost => "video-post",
            Self::Edit => "edit",
            Self::Users => "users",
            Self::CreateUser => "create-user",
            Self::DeleteUser => "delete-user",
            Self::Ads => "ads",
            Self::UploadAd => "upload-ad",
            Self::Versions => "versions",
            Self::PublishVersion => "publish-version",
            Self::UploadImage => "upload-image",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let command = match s.trim() {
            "login" => Self::Login,
            "logout" => Self::Logout,
            "dashboard" => Self::Dashboard,
            "pending" => Self::Pending,
            "rejected" => Self::Rejected,
            "approved" => Self::Approved,
            "approve" => Self::Approve,
            "reject" => Self::Reject,
            "post" => Self::Post,
            "video-post" => Self::VideoPost,
            "edit" => Self::Edit,
            "users" => Self::Users,
            "create-user" => Self::CreateUser,
            "delete-user" => Self::DeleteUser,
            "ads" => Self::Ads,
            "upload-ad" => Self::UploadAd,
            "versions" => Self::Versions,
            "publish-version" => Self::PublishVersion,
            "upload-image" => Self::UploadImage,
            other => return Err(Error::Validation(format!("Unknown command: {other}"))),
        };
        Ok(command)
    }
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    args: BTreeMap<String, String>,
}

impl Invocation {
    /// `args` excludes the program name.
    pub fn parse<I, S>(args: I) -> Result<Invocation>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut args = args.into_iter();
        let command = args
            .next()
            .ok_or_else(|| Error::Validation(USAGE.to_string()))?
            .as_ref()
            .parse::<Command>()?;

        let mut pairs = BTreeMap::new();
        for arg in args {
            let arg = arg.as_ref();
            let (key, value) = arg.split_once('=').ok_or_else(|| {
                Error::Validation(format!("Expected key=value, got {arg:?}"))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(Error::Validation(format!("Missing key in {arg:?}")));
            }
            pairs.insert(key.to_string(), value.to_string());
        }

        Ok(Invocation {
            command,
            args: pairs,
        })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.args.get(key).map(String::as_str)
    }

    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::Validation(format!("{} requires {key}=", self.command)))
    }

    /// Screen the command acts on; the Session Guard decides whether it may run.
    pub fn route(&self) -> Result<Route> {
        let route = match self.command {
            Command::Login => Route::Login,
            Command::Logout | Command::Dashboard => Route::Dashboard,
            Command::Pending | Command::Approve | Command::Reject => Route::PendingPosts,
            Command::Rejected => Route::RejectedPosts,
            Command::Approved => Route::ApprovedPosts,
            Command::Post | Command::UploadImage => Route::CreatePost,
            Command::VideoPost => Route::CreateVideoPost,
            Command::Edit => Route::EditPost(self.require("id")?.to_string()),
            Command::Users | Command::DeleteUser => Route::Users,
            Command::CreateUser => Route::CreateUser,
            Command::Ads | Command::UploadAd => Route::Ads,
            Command::Versions | Command::PublishVersion => Route::AppVersions,
        };
        Ok(route)
    }

    async fn file(&self, key: &str) -> Result<Option<MediaFile>> {
        match self.get(key).filter(|v| !v.trim().is_empty()) {
            Some(path) => Ok(Some(MediaFile::from_path(Path::new(path)).await?)),
            None => Ok(None),
        }
    }

    /// Fills a creation form. Files are read from disk here.
    pub async fn fill_post_form(&self, form: &mut PostForm) -> Result<()> {
        form.set_headline(self.get("title").unwrap_or_default());
        form.set_content(self.get("content").unwrap_or_default());
        if let Some(category) = self.get("category") {
            form.set_category(category);
        }
        if let Some(state) = self.get("state") {
            form.set_state(state)?;
        }
        if let Some(district) = self.get("district") {
            form.set_district(district)?;
        }
        if let Some(image) = self.file("image").await? {
            form.set_image(image)?;
        }
        if let Some(url) = self.get("youtube") {
            form.set_youtube_url(url);
        }
        if let Some(video) = self.file("video").await? {
            form.set_video_file(video);
        }
        Ok(())
    }

    /// Applies only the keys present; everything else keeps the fetched value.
    pub async fn fill_edit_form(&self, form: &mut EditForm) -> Result<()> {
        if let Some(title) = self.get("title") {
            form.set_title(title);
        }
        if let Some(content) = self.get("content") {
            form.set_content(content);
        }
        if let Some(category) = self.get("category") {
            form.set_category(category);
        }
        if let Some(state) = self.get("state") {
            form.set_state(state);
        }
        if let Some(district) = self.get("district") {
            form.set_district(district);
        }
        if let Some(image) = self.file("image").await? {
            form.set_image(image)?;
        }
        if let Some(url) = self.get("youtube") {
            form.set_youtube_url(url)?;
        }
        if let Some(video) = self.file("video").await? {
            form.set_video_file(video)?;
        }
        Ok(())
    }

    pub async fn user_form(&self) -> Result<UserForm> {
        let role: UserRole = self
            .require("role")?
            .parse()
            .map_err(Error::Validation)?;
        let mut form = UserForm::default();
        form.name = self.get("name").unwrap_or_default().to_string();
        form.phone = self.get("phone").unwrap_or_default().to_string();
        form.email = self.get("email").unwrap_or_default().to_string();
        form.password = self.get("password").unwrap_or_default().to_string();
        form.set_role(role);
        if role.requires_region() {
            form.set_state(self.require("state")?)?;
            form.set_district(self.require("district")?)?;
        }
        if let Some(picture) = self.file("picture").await? {
            form.set_profile_picture(picture)?;
        }
        Ok(form)
    }

    pub async fn ad_form(&self) -> Result<AdUploadForm> {
        let slot: AdSlot = self
            .require("slot")?
            .parse()
            .map_err(Error::Validation)?;
        let mut form = AdUploadForm::new(slot);
        form.image = self.file("image").await?;
        form.redirect_url = self.get("redirect").unwrap_or_default().to_string();
        Ok(form)
    }

    pub fn app_version(&self) -> Result<CreateAppVersionDto> {
        let platform = match self.require("platform")?.trim().to_lowercase().as_str() {
            "android" => AppPlatform::Android,
            "ios" => AppPlatform::Ios,
            other => {
                return Err(Error::Validation(format!(
                    "Platform must be android or ios, got {other}"
                )))
            }
        };
        let force_update = match self.get("force").map(str::trim) {
            None | Some("") | Some("false") | Some("no") => false,
            Some("true") | Some("yes") => true,
            Some(other) => {
                return Err(Error::Validation(format!(
                    "force must be true or false, got {other}"
                )))
            }
        };
        Ok(CreateAppVersionDto {
            platform,
            version: self.get("version").unwrap_or_default().trim().to_string(),
            force_update,
            release_notes: self
                .get("notes")
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{media::PreviewRegistry, models::news_post::ContentType};

    #[test]
    fn parses_command_and_pairs() {
        let inv = Invocation::parse(["approve", "id=42"]).unwrap();
        assert_eq!(inv.command, Command::Approve);
        assert_eq!(inv.get("id"), Some("42"));
        assert_eq!(inv.route().unwrap(), Route::PendingPosts);

        let inv = Invocation::parse(["post", "content=<p>a=b</p>"]).unwrap();
        assert_eq!(inv.get("content"), Some("<p>a=b</p>"));
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(Invocation::parse(Vec::<String>::new()).is_err());
        assert!(Invocation::parse(["publish"]).is_err());
        assert!(Invocation::parse(["approve", "42"]).is_err());
        assert!(Invocation::parse(["approve", "=42"]).is_err());

        let inv = Invocation::parse(["edit"]).unwrap();
        assert_eq!(
            inv.route().unwrap_err().user_message(),
            "edit requires id="
        );
    }

    #[test]
    fn every_command_maps_to_a_route() {
        for name in [
            "login", "logout", "dashboard", "pending", "rejected", "approved", "approve",
            "reject", "post", "video-post", "users", "create-user", "delete-user", "ads",
            "upload-ad", "versions", "publish-version", "upload-image",
        ] {
            let inv = Invocation::parse([name]).unwrap();
            assert_eq!(inv.command.as_str(), name);
            let route = inv.route().unwrap();
            assert_eq!(route.is_public(), name == "login", "{name}");
        }
    }

    #[tokio::test]
    async fn fills_a_video_form_from_args() {
        let inv = Invocation::parse([
            "video-post",
            "title=Match highlights",
            "category=खेल",
            "state=Bihar",
            "district=Patna",
            "content=<p>Final over</p>",
            "youtube=https://www.youtube.com/watch?v=dQw4w9WgXcQ",
        ])
        .unwrap();
        let mut form = PostForm::video(PreviewRegistry::new());
        inv.fill_post_form(&mut form).await.unwrap();

        let payload = form.to_payload().unwrap();
        assert_eq!(payload.field("category"), Some("sports"));
        assert_eq!(payload.field("contentType"), Some(ContentType::Video.as_str()));
        assert_eq!(
            payload.field("youtubeUrl"),
            Some("https://www.youtube.com/watch?v=dQw4w9WgXcQ")
        );
    }

    #[tokio::test]
    async fn journalist_needs_a_region() {
        let inv = Invocation::parse([
            "create-user",
            "name=Ravi",
            "phone=9876543210",
            "email=ravi@example.com",
            "password=secret1",
            "role=journalist",
        ])
        .unwrap();
        assert_eq!(
            inv.user_form().await.unwrap_err().user_message(),
            "create-user requires state="
        );
    }

    #[test]
    fn app_version_flags() {
        let inv = Invocation::parse([
            "publish-version",
            "platform=iOS",
            "version=2.4.1",
            "force=true",
        ])
        .unwrap();
        let dto = inv.app_version().unwrap();
        assert_eq!(dto.platform, AppPlatform::Ios);
        assert!(dto.force_update);
        assert_eq!(dto.release_notes, None);

        let inv = Invocation::parse(["publish-version", "platform=web"]).unwrap();
        assert!(inv.app_version().is_err());
    }
}
