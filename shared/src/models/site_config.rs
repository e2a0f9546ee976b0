//! Site Configuration Model (flyers and hero slides)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Promotional banner. Images live in external storage; only URLs are kept.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Flyer {
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub link: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroSlide {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub image_url: String,
    pub cta_label: Option<String>,
    pub cta_link: Option<String>,
}

/// Singleton document in `siteConfig`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    pub banners: Vec<Flyer>,
    pub hero_slides: Vec<HeroSlide>,
    pub updated_at: Option<DateTime<Utc>>,
}
