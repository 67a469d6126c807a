use std::fmt;

use reqwest::StatusCode;
use tracing::error;

pub type Result<T> = core::result::Result<T, Error>;

pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";
pub const CONNECTIVITY_FAILURE: &str =
    "Unable to reach the server. Please check your internet connection and try again.";
pub const PERMISSION_DENIED: &str = "You do not have permission to perform this action. \
     Your account role may not allow it; please contact an administrator if you believe this is a mistake.";
pub const FILE_TOO_LARGE: &str =
    "The file is too large for the server to accept. Please choose a smaller file.";
pub const LOGIN_REQUIRED: &str = "You are not logged in. Please log in to continue.";
pub const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";

#[derive(Debug)]
pub enum Error {
    /// Rejected before any network call.
    Validation(String),
    NotAuthenticated,
    SessionExpired,
    Forbidden(Option<String>),
    PayloadTooLarge,
    Network(reqwest::Error),
    Api {
        status: StatusCode,
        message: Option<String>,
    },
    Decode(String),
    Io(std::io::Error),
    Image(image::ImageError),
    Config(String),
    RequestInFlight(String),
    InvalidTransition {
        from: String,
        to: String,
    },
}

impl Error {
    /// Text shown to the operator in a transient notice.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::NotAuthenticated => LOGIN_REQUIRED.to_string(),
            Self::SessionExpired => SESSION_EXPIRED.to_string(),
            Self::Forbidden(_) => PERMISSION_DENIED.to_string(),
            Self::PayloadTooLarge => FILE_TOO_LARGE.to_string(),
            Self::Network(_) => CONNECTIVITY_FAILURE.to_string(),
            Self::Api { message, .. } => message
                .as_deref()
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(GENERIC_FAILURE)
                .to_string(),
            Self::RequestInFlight(_) => {
                "This action is already in progress. Please wait.".to_string()
            }
            Self::InvalidTransition { from, to } => {
                format!("A {from} post cannot be marked as {to}.")
            }
            Self::Decode(_) | Self::Io(_) | Self::Image(_) | Self::Config(_) => {
                GENERIC_FAILURE.to_string()
            }
        }
    }

    /// Maps a non-success HTTP status and the server-provided message onto the taxonomy.
    pub fn from_status(status: StatusCode, message: Option<String>) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => Self::SessionExpired,
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            StatusCode::PAYLOAD_TOO_LARGE => Self::PayloadTooLarge,
            _ => Self::Api { status, message },
        }
    }

    pub fn requires_login(&self) -> bool {
        matches!(self, Self::NotAuthenticated | Self::SessionExpired)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "validation failed: {msg}"),
            Self::NotAuthenticated => write!(f, "no session token stored"),
            Self::SessionExpired => write!(f, "server rejected the session token (401)"),
            Self::Forbidden(msg) => {
                write!(f, "forbidden (403): {}", msg.as_deref().unwrap_or("-"))
            }
            Self::PayloadTooLarge => write!(f, "payload too large (413)"),
            Self::Network(err) => write!(f, "network error: {err}"),
            Self::Api { status, message } => write!(
                f,
                "api error {status}: {}",
                message.as_deref().unwrap_or("-")
            ),
            Self::Decode(msg) => write!(f, "unexpected response: {msg}"),
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Image(err) => write!(f, "image error: {err}"),
            Self::Config(msg) => write!(f, "configuration error: {msg}"),
            Self::RequestInFlight(id) => write!(f, "request already in flight for {id}"),
            Self::InvalidTransition { from, to } => {
                write!(f, "invalid status transition {from} -> {to}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Network(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Image(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        error!("Request failed: {:?}", err);
        Self::Network(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        error!("Failed to decode response: {}", err);
        Self::Decode(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        error!("IO error: {:?}", err);
        Self::Io(err)
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        error!("Image processing failed: {}", err);
        Self::Image(err)
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        let message = err
            .field_errors()
            .into_iter()
            .flat_map(|(_, errors)| errors.iter())
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .next()
            .unwrap_or_else(|| err.to_string());
        Self::Validation(message)
    }
}
