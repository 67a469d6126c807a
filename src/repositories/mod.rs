use reqwest::{
    multipart::{Form, Part},
    Client, Method, RequestBuilder, StatusCode,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    config::Config, forms::MultipartPayload, models::response::server_message,
    session::Session, Error, Result,
};

pub mod ads_repo;
pub mod app_version_repo;
pub mod auth_repo;
pub mod dashboard_repo;
pub mod news_post_repo;
pub mod upload_repo;
pub mod user_repo;

/// Gateway to the remote news API. Every repository trait is implemented on it.
#[derive(Clone)]
pub struct ApiRepo {
    client: Client,
    base_url: String,
    session: Session,
}

impl ApiRepo {
    pub fn new(config: &Config, session: Session) -> Result<Self> {
        let client = Client::builder().timeout(config.http_timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url(),
            session,
        })
    }

    pub fn with_client(client: Client, base_url: &str, session: Session) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        debug!("{} {}", method, url);
        self.client.request(method, url)
    }

    /// Bearer-authenticated request; fails locally when no token is stored.
    fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        self.session.authorize(self.request(method, path))
    }

    /// Attaches the token when there is one; used by the public endpoints.
    fn maybe_authorized(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self.request(method, path);
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Sends the request and maps the outcome onto the error taxonomy.
    ///
    /// A 401 clears the stored token before the error is returned.
    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            if body.trim().is_empty() {
                return Ok(Value::Null);
            }
            return Ok(serde_json::from_str(&body)?);
        }

        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .as_ref()
            .and_then(server_message)
            .or_else(|| {
                let text = body.trim();
                (!text.is_empty() && !text.starts_with('<') && text.len() < 300)
                    .then(|| text.to_string())
            });

        match status {
            StatusCode::UNAUTHORIZED => self.session.expire(),
            StatusCode::FORBIDDEN => warn!("Request forbidden: {:?}", message),
            _ => warn!("Request failed with {}: {:?}", status, message),
        }

        Err(Error::from_status(status, message))
    }
}

pub(crate) fn multipart_form(payload: MultipartPayload) -> Result<Form> {
    let mut form = Form::new();
    for (name, value) in payload.fields {
        form = form.text(name, value);
    }
    for (name, file) in payload.files {
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        form = form.part(name, part);
    }
    Ok(form)
}

pub(crate) fn encode_id(id: &str) -> String {
    urlencoding::encode(id.trim()).into_owned()
}
