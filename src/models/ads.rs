use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::string_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdPlatform {
    Mobile,
    Web,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdType {
    Card,
    Popover,
    Banner,
    Side,
}

/// One of the four fixed placements. Other platform/type pairs do not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdSlot {
    MobileCard,
    MobilePopover,
    WebBanner,
    WebSide,
}

impl AdSlot {
    pub const ALL: [AdSlot; 4] = [
        AdSlot::MobileCard,
        AdSlot::MobilePopover,
        AdSlot::WebBanner,
        AdSlot::WebSide,
    ];

    pub fn platform(&self) -> AdPlatform {
        match self {
            Self::MobileCard | Self::MobilePopover => AdPlatform::Mobile,
            Self::WebBanner | Self::WebSide => AdPlatform::Web,
        }
    }

    pub fn ad_type(&self) -> AdType {
        match self {
            Self::MobileCard => AdType::Card,
            Self::MobilePopover => AdType::Popover,
            Self::WebBanner => AdType::Banner,
            Self::WebSide => AdType::Side,
        }
    }

    pub fn from_parts(platform: AdPlatform, ad_type: AdType) -> Option<AdSlot> {
        AdSlot::ALL
            .into_iter()
            .find(|slot| slot.platform() == platform && slot.ad_type() == ad_type)
    }

    pub fn platform_str(&self) -> &'static str {
        match self.platform() {
            AdPlatform::Mobile => "mobile",
            AdPlatform::Web => "web",
        }
    }

    pub fn type_str(&self) -> &'static str {
        match self.ad_type() {
            AdType::Card => "card",
            AdType::Popover => "popover",
            AdType::Banner => "banner",
            AdType::Side => "side",
        }
    }
}

impl fmt::Display for AdSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.platform_str(), self.type_str())
    }
}

impl FromStr for AdSlot {
    type Err = String;

    /// Accepts `mobile/card`, `mobile-card` or `mobile_card`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], "/");
        AdSlot::ALL
            .into_iter()
            .find(|slot| slot.to_string() == normalized)
            .ok_or_else(|| format!("unknown ad slot {s:?}"))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    #[serde(default, alias = "_id", deserialize_with = "string_id")]
    pub id: String,
    pub platform: AdPlatform,
    #[serde(rename = "type")]
    pub ad_type: AdType,
    #[serde(default, alias = "imageUrl", alias = "imagePath")]
    pub image: Option<String>,
    #[serde(default, alias = "redirect_url", alias = "link")]
    pub redirect_url: Option<String>,
}

impl Ad {
    pub fn slot(&self) -> Option<AdSlot> {
        AdSlot::from_parts(self.platform, self.ad_type)
    }
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdRedirectDto {
    #[validate(url(message = "Redirect URL must be a valid URL"))]
    pub redirect_url: String,
}
