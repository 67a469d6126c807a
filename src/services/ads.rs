use std::sync::Arc;

use tracing::info;

use super::success_message;
use crate::{
    forms::AdUploadForm,
    models::ads::{Ad, AdSlot},
    repositories::ads_repo::AdsRepository,
    Result,
};

#[derive(Clone)]
pub struct AdsService {
    repo: Arc<dyn AdsRepository>,
}

impl AdsService {
    pub fn new(repo: Arc<dyn AdsRepository>) -> Self {
        Self { repo }
    }

    /// The four fixed slots in display order, each with its current ad when one exists.
    /// Ads that do not map onto a known slot are ignored; the latest entry per slot wins.
    pub async fn get_slots(&self) -> Result<Vec<(AdSlot, Option<Ad>)>> {
        let ads = self.repo.get_ads().await?;
        Ok(AdSlot::ALL
            .iter()
            .map(|slot| {
                let current = ads.iter().rev().find(|ad| ad.slot() == Some(*slot)).cloned();
                (*slot, current)
            })
            .collect())
    }

    /// Uploads a single slot; other slots are unaffected.
    pub async fn upload(&self, form: &AdUploadForm) -> Result<String> {
        let payload = form.to_payload()?;
        let body = self.repo.upload_ad(payload).await?;
        info!("Ad uploaded for slot {}", form.slot);
        Ok(success_message(body, &format!("{} ad uploaded", form.slot)))
    }
}
