//! Preview handles for selected files. A handle stays registered exactly as long as the
//! owning form holds it; replacing the file or dropping the form releases it.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use tracing::debug;
use uuid::Uuid;

use super::MediaFile;

#[derive(Debug, Clone)]
struct PreviewEntry {
    file_name: String,
    size: usize,
}

#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    live: Arc<Mutex<HashMap<String, PreviewEntry>>>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, file: &MediaFile) -> ObjectUrl {
        let url = format!("blob:newsdesk/{}", Uuid::now_v7());
        if let Ok(mut live) = self.live.lock() {
            live.insert(
                url.clone(),
                PreviewEntry {
                    file_name: file.file_name.clone(),
                    size: file.len(),
                },
            );
        }
        debug!("Created preview {} for {}", url, file.file_name);
        ObjectUrl {
            url,
            registry: self.clone(),
        }
    }

    pub fn live_count(&self) -> usize {
        self.live.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_live(&self, url: &str) -> bool {
        self.live.lock().map(|l| l.contains_key(url)).unwrap_or(false)
    }

    /// File name and size behind a live preview.
    pub fn describe(&self, url: &str) -> Option<(String, usize)> {
        let live = self.live.lock().ok()?;
        live.get(url).map(|e| (e.file_name.clone(), e.size))
    }

    fn release(&self, url: &str) {
        if let Ok(mut live) = self.live.lock() {
            if live.remove(url).is_some() {
                debug!("Released preview {}", url);
            }
        }
    }
}

/// Released from its registry on drop.
#[derive(Debug)]
pub struct ObjectUrl {
    url: String,
    registry: PreviewRegistry,
}

impl ObjectUrl {
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for ObjectUrl {
    fn drop(&mut self) {
        self.registry.release(&self.url);
    }
}

/// The single preview a form field can show.
#[derive(Debug, Default)]
pub struct PreviewSlot {
    registry: PreviewRegistry,
    current: Option<ObjectUrl>,
}

impl PreviewSlot {
    pub fn new(registry: PreviewRegistry) -> Self {
        Self {
            registry,
            current: None,
        }
    }

    pub fn show(&mut self, file: &MediaFile) -> &str {
        self.current = Some(self.registry.create(file));
        self.current.as_ref().map(ObjectUrl::as_str).unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn url(&self) -> Option<&str> {
        self.current.as_ref().map(ObjectUrl::as_str)
    }
}
