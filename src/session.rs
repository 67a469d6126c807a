use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use reqwest::{header, RequestBuilder};
use tracing::{debug, info, warn};

use crate::{Error, Result};

/// Persistence for the single bearer token the dashboard keeps between runs.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>>;
    fn save(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, token.trim())?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.token.lock().map(|t| t.clone()).unwrap_or_default())
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
        Ok(())
    }
}

/// Explicit session handle injected into every API-calling component.
///
/// The token is re-read from the store on every call, so a logout performed by another
/// holder of the same store is observed on the next request.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileTokenStore::new(path)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryTokenStore::default()))
    }

    pub fn token(&self) -> Option<String> {
        match self.store.load() {
            Ok(token) => token,
            Err(err) => {
                warn!("Could not read stored token, treating as logged out: {}", err);
                None
            }
        }
    }

    /// Presence check only; the token is never verified with the server here.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn sign_in(&self, token: &str) -> Result<()> {
        let token = token.trim();
        if token.is_empty() {
            return Err(Error::Decode("login response carried an empty token".into()));
        }
        self.store.save(token)?;
        info!("Session token stored");
        Ok(())
    }

    pub fn sign_out(&self) -> Result<()> {
        self.store.clear()?;
        info!("Session token cleared");
        Ok(())
    }

    /// Called when the server answers 401.
    pub fn expire(&self) {
        warn!("Server rejected the session token, clearing it");
        if let Err(err) = self.store.clear() {
            warn!("Failed to clear rejected token: {}", err);
        }
    }

    /// Attaches `Authorization: Bearer <token>`; fails before any network call without one.
    pub fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.token().ok_or(Error::NotAuthenticated)?;
        debug!("Attaching bearer token to request");
        Ok(request.header(header::AUTHORIZATION, format!("Bearer {token}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested/token"));

        assert_eq!(store.load().unwrap(), None);
        store.save("abc123\n").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc123"));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn blank_token_file_means_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token");
        fs::write(&path, "   \n").unwrap();
        let session = Session::from_file(&path);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn authorize_without_token_fails_locally() {
        let session = Session::in_memory();
        let request = reqwest::Client::new().get("http://localhost/api/dashboard/stats");
        assert!(matches!(
            session.authorize(request),
            Err(Error::NotAuthenticated)
        ));
    }

    #[test]
    fn authorize_sets_bearer_header() {
        let session = Session::new(Arc::new(MemoryTokenStore::with_token("tok")));
        let request = session
            .authorize(reqwest::Client::new().get("http://localhost/x"))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            request.headers().get(header::AUTHORIZATION).unwrap(),
            "Bearer tok"
        );
    }

    #[test]
    fn clones_share_the_same_store() {
        let session = Session::in_memory();
        let other = session.clone();
        session.sign_in("tok").unwrap();
        assert!(other.is_authenticated());
        other.expire();
        assert!(!session.is_authenticated());
    }
}
