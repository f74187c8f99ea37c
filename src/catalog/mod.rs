//! Catalog content and search
//!
//! Typed records for everything the nursery site shows, the store they are
//! fetched from, and the plant search built on top of them.

pub mod fuzzy;
pub mod search;
pub mod store;

// Re-export main types
pub use search::{
    autocomplete, search, search_plants, DEFAULT_AUTOCOMPLETE_LIMIT, DEFAULT_FUZZY_THRESHOLD,
};
pub use store::{CatalogSnapshot, CatalogStore, InMemoryCatalog};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Anything the plant search can match against
pub trait CatalogEntry {
    fn name(&self) -> &str;

    fn species(&self) -> Option<&str> {
        None
    }

    fn description(&self) -> Option<&str> {
        None
    }
}

/// Stock status shown on a plant card
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Availability {
    #[default]
    Available,
    #[serde(rename = "Out")]
    OutOfStock,
    #[serde(rename = "Coming")]
    ComingSoon,
}

impl Availability {
    pub fn label(&self) -> &'static str {
        match self {
            Availability::Available => "Available",
            Availability::OutOfStock => "Out of Stock",
            Availability::ComingSoon => "Coming Soon",
        }
    }
}

/// A plant in the nursery catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plant {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub availability: Availability,
    /// Image URL
    #[serde(default)]
    pub image: Option<String>,
    /// Uploaded MP4 URL
    #[serde(default)]
    pub video: Option<String>,
    /// YouTube link, used when there is no uploaded video
    #[serde(default)]
    pub youtube_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

impl Plant {
    /// Create a plant with only a name set
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            species: None,
            description: None,
            price: None,
            availability: Availability::default(),
            image: None,
            video: None,
            youtube_url: None,
            is_featured: false,
            created_at: Utc::now(),
        }
    }

    pub fn with_species(mut self, species: impl Into<String>) -> Self {
        self.species = Some(species.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_youtube_url(mut self, url: impl Into<String>) -> Self {
        self.youtube_url = Some(url.into());
        self
    }

    pub fn with_video(mut self, url: impl Into<String>) -> Self {
        self.video = Some(url.into());
        self
    }

    pub fn featured(mut self) -> Self {
        self.is_featured = true;
        self
    }

    /// Whether an uploaded video is attached
    pub fn has_video(&self) -> bool {
        self.video.as_deref().is_some_and(|v| !v.is_empty())
    }
}

impl CatalogEntry for Plant {
    fn name(&self) -> &str {
        &self.name
    }

    fn species(&self) -> Option<&str> {
        self.species.as_deref()
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Where a video appears on the site
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VideoType {
    Intro,
    Regular,
    Short,
}

/// A YouTube video curated by the site admin
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Video {
    pub id: i64,
    pub title: String,
    pub video_type: VideoType,
    #[serde(default)]
    pub youtube_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeroSection {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub banner_image: String,
    #[serde(default = "default_cta_text")]
    pub cta_text: String,
    #[serde(default)]
    pub cta_link: Option<String>,
}

fn default_cta_text() -> String {
    "Visit Us".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct About {
    pub story: String,
    #[serde(default)]
    pub mission: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CareTip {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Nursery contact details shown in every page footer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactInfo {
    pub phone1: String,
    #[serde(default)]
    pub phone2: Option<String>,
    pub email: String,
    pub address: String,
    #[serde(default = "default_delivery_note")]
    pub delivery_note: String,
    #[serde(default)]
    pub map_embed_link: Option<String>,
    #[serde(default)]
    pub facebook_url: Option<String>,
    #[serde(default)]
    pub twitter_url: Option<String>,
    #[serde(default)]
    pub youtube_url: Option<String>,
    #[serde(default)]
    pub instagram_url: Option<String>,
}

fn default_delivery_note() -> String {
    "Delivery available on call 📦".to_string()
}

/// A message left through the contact form
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

/// Product brochure, as a PDF and/or a Heyzine flipbook link
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Brochure {
    pub title: String,
    #[serde(default)]
    pub pdf_file: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub heyzine_link: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub pdf: Option<String>,
    pub created_at: DateTime<Utc>,
}
