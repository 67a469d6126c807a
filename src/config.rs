use std::{env, path::PathBuf, time::Duration};

use url::Url;

use crate::{Error, Result};

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_TOKEN_PATH: &str = ".newsdesk/token";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub token_path: PathBuf,
    pub http_timeout: Duration,
}

impl Config {
    /// Reads `.env` (when present) and the process environment.
    ///
    /// The API host baked in at build time through `NEWSDESK_API_URL` is used when the
    /// variable is not set at runtime.
    pub fn init() -> Result<Config> {
        dotenv::dotenv().ok();

        let api_url = env::var("NEWSDESK_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| {
                option_env!("NEWSDESK_API_URL")
                    .unwrap_or(DEFAULT_API_URL)
                    .to_string()
            });

        let token_path = env::var("NEWSDESK_TOKEN_PATH")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TOKEN_PATH.to_string());

        let timeout = match env::var("NEWSDESK_HTTP_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!("NEWSDESK_HTTP_TIMEOUT_SECS is not a number: {raw}"))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Config::new(&api_url, token_path, Duration::from_secs(timeout))
    }

    pub fn new(api_url: &str, token_path: impl Into<PathBuf>, http_timeout: Duration) -> Result<Config> {
        let api_url = Url::parse(api_url.trim())
            .map_err(|e| Error::Config(format!("invalid API url {api_url:?}: {e}")))?;

        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "API url must be http or https, got {}",
                api_url.scheme()
            )));
        }

        Ok(Config {
            api_url,
            token_path: token_path.into(),
            http_timeout,
        })
    }

    /// Base URL without a trailing slash, ready for `format!("{base}/api/...")`.
    pub fn base_url(&self) -> String {
        self.api_url.as_str().trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_drops_trailing_slash() {
        let config = Config::new("https://api.example.com/", "token", Duration::from_secs(5)).unwrap();
        assert_eq!(config.base_url(), "https://api.example.com");
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = Config::new("ftp://example.com", "token", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn rejects_garbage_url() {
        assert!(Config::new("not a url", "token", Duration::from_secs(5)).is_err());
    }
}
