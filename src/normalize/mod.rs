//! Reconciles free-text category/state/district values returned by the API with the
//! option values the forms bind to.
//!
//! Every function here is pure and independent of any form type.

pub mod lookup;

use crate::models::news_post::{Category, ContentType};

pub use lookup::{DistrictOption, StateOption, DEFAULT_STATE, STATES};

// `international` must be tried before `national`: the former contains the latter.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::International,
        &["international", "world", "अंतरराष्ट्रीय", "अंतर्राष्ट्रीय", "विदेश"],
    ),
    (Category::National, &["national", "राष्ट्रीय", "देश"]),
    (Category::Sports, &["sport", "खेल"]),
    (Category::Entertainment, &["entertainment", "bollywood", "मनोरंजन"]),
    (Category::Trending, &["trending", "viral", "ट्रेंडिंग"]),
];

fn clean(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Latin keywords must start a word (`transport` is not sports); Devanagari ones match anywhere.
fn has_keyword(value: &str, keyword: &str) -> bool {
    if !keyword.is_ascii() {
        return value.contains(keyword);
    }
    value.match_indices(keyword).any(|(at, _)| {
        value[..at]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric())
    })
}

pub fn normalize_category(raw: &str) -> Option<Category> {
    let value = clean(raw);
    if value.is_empty() {
        return None;
    }
    if let Some(exact) = Category::ALL.iter().find(|c| c.as_str() == value) {
        return Some(*exact);
    }
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| has_keyword(&value, k)))
        .map(|(category, _)| *category)
}

/// Matches a raw state against option values, then bilingual labels.
pub fn match_state(raw: &str) -> Option<&'static StateOption> {
    let value = clean(raw);
    if value.is_empty() {
        return None;
    }
    if let Some(exact) = lookup::state(&value) {
        return Some(exact);
    }
    let slug = value.replace([' ', '_'], "-");
    if let Some(exact) = lookup::state(&slug) {
        return Some(exact);
    }
    STATES
        .iter()
        .find(|s| label_matches(s.label, &value))
}

/// State value for a form control; unknown input falls back to [`DEFAULT_STATE`].
pub fn normalize_state(raw: &str) -> &'static str {
    match_state(raw).map(|s| s.value).unwrap_or(DEFAULT_STATE)
}

/// District value valid for `state`, or `None` (the control is cleared).
pub fn normalize_district(state: &str, raw: &str) -> Option<&'static str> {
    let value = clean(raw);
    if value.is_empty() {
        return None;
    }
    let districts = lookup::districts_of(state);
    let slug = value.replace([' ', '_'], "-");
    districts
        .iter()
        .find(|d| d.value == value || d.value == slug)
        .or_else(|| districts.iter().find(|d| label_matches(d.label, &value)))
        .map(|d| d.value)
}

/// Case-insensitive substring match against either half of a `"हिन्दी | English"` label.
fn label_matches(label: &str, value: &str) -> bool {
    let label = label.to_lowercase();
    if label.contains(value) {
        return true;
    }
    label
        .split('|')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .any(|part| value.contains(part))
}

/// A state/district pair that can only hold a district belonging to the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    state: &'static str,
    district: Option<&'static str>,
}

impl Default for Region {
    fn default() -> Self {
        Self {
            state: DEFAULT_STATE,
            district: None,
        }
    }
}

impl Region {
    /// Normalizes both values; the district is validated against the resolved state.
    pub fn from_raw(state: &str, district: &str) -> Self {
        let state = normalize_state(state);
        Self {
            state,
            district: normalize_district(state, district),
        }
    }

    pub fn state(&self) -> &'static str {
        self.state
    }

    pub fn district(&self) -> Option<&'static str> {
        self.district
    }

    /// Changing state always clears the district, even when the state is unchanged.
    pub fn set_state(&mut self, raw: &str) {
        self.state = normalize_state(raw);
        self.district = None;
    }

    /// Returns the accepted district; values foreign to the current state clear it.
    pub fn set_district(&mut self, raw: &str) -> Option<&'static str> {
        self.district = normalize_district(self.state, raw);
        self.district
    }

    pub fn district_options(&self) -> &'static [DistrictOption] {
        lookup::districts_of(self.state)
    }
}

/// Video presentation resolved for the edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaKind {
    pub content_type: ContentType,
    pub show_video_fields: bool,
}

/// Entertainment always resolves to a standard post, whatever video flags were detected.
pub fn resolve_content_type(category: Option<Category>, video_detected: bool) -> MediaKind {
    if category == Some(Category::Entertainment) || !video_detected {
        return MediaKind {
            content_type: ContentType::Standard,
            show_video_fields: false,
        };
    }
    MediaKind {
        content_type: ContentType::Video,
        show_video_fields: true,
    }
}
