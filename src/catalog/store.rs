//! Catalog storage abstraction and the in-memory catalog
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::search::matches_exact;
use super::{
    About, Article, Brochure, CareTip, ContactInfo, ContactMessage, HeroSection, Plant, Video,
};
use crate::error::{NurseryError, Result};

/// Source of catalog content.
///
/// Collections come back in storage order; singleton sections return the
/// first record, if any.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Every plant
    async fn plants(&self) -> Result<Vec<Plant>>;

    /// Plants whose name, species or description contains `query`,
    /// ignoring case
    async fn plants_matching(&self, query: &str) -> Result<Vec<Plant>>;

    async fn videos(&self) -> Result<Vec<Video>>;

    async fn care_tips(&self) -> Result<Vec<CareTip>>;

    /// Articles, newest first
    async fn articles(&self) -> Result<Vec<Article>>;

    async fn hero(&self) -> Result<Option<HeroSection>>;

    async fn about(&self) -> Result<Option<About>>;

    async fn contact_info(&self) -> Result<Option<ContactInfo>>;

    async fn brochure(&self) -> Result<Option<Brochure>>;

    /// Keep a message submitted through the contact form
    async fn record_contact_message(&self, message: ContactMessage) -> Result<()>;
}

/// Full catalog contents, as stored in a catalog JSON file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub hero: Option<HeroSection>,
    #[serde(default)]
    pub about: Option<About>,
    #[serde(default)]
    pub contact_info: Option<ContactInfo>,
    #[serde(default)]
    pub brochure: Option<Brochure>,
    #[serde(default)]
    pub plants: Vec<Plant>,
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(default)]
    pub care_tips: Vec<CareTip>,
    #[serde(default)]
    pub articles: Vec<Article>,
    #[serde(default)]
    pub contact_messages: Vec<ContactMessage>,
}

impl CatalogSnapshot {
    /// Reject snapshots with duplicate plant or video ids
    pub fn validate(&self) -> Result<()> {
        let mut plant_ids: Vec<i64> = self.plants.iter().map(|p| p.id).collect();
        plant_ids.sort_unstable();
        if let Some(pair) = plant_ids.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(NurseryError::Catalog(format!("duplicate plant id {}", pair[0])));
        }

        let mut video_ids: Vec<i64> = self.videos.iter().map(|v| v.id).collect();
        video_ids.sort_unstable();
        if let Some(pair) = video_ids.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(NurseryError::Catalog(format!("duplicate video id {}", pair[0])));
        }

        Ok(())
    }
}

/// Catalog held entirely in memory.
///
/// Contact messages recorded here are kept only for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    snapshot: Arc<RwLock<CatalogSnapshot>>,
}

impl InMemoryCatalog {
    /// Wrap an existing snapshot
    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        Self {
            snapshot: Arc::new(RwLock::new(snapshot)),
        }
    }

    /// Load a catalog JSON file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).await?;
        let snapshot: CatalogSnapshot = serde_json::from_str(&content)?;
        snapshot.validate()?;

        info!(
            "📚 Loaded catalog from {}: {} plants, {} videos, {} articles",
            path.as_ref().display(),
            snapshot.plants.len(),
            snapshot.videos.len(),
            snapshot.articles.len()
        );
        Ok(Self::from_snapshot(snapshot))
    }

    /// Messages recorded so far, oldest first
    pub async fn contact_messages(&self) -> Vec<ContactMessage> {
        self.snapshot.read().await.contact_messages.clone()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn plants(&self) -> Result<Vec<Plant>> {
        Ok(self.snapshot.read().await.plants.clone())
    }

    async fn plants_matching(&self, query: &str) -> Result<Vec<Plant>> {
        let query_lower = query.to_lowercase();
        let snapshot = self.snapshot.read().await;

        Ok(snapshot
            .plants
            .iter()
            .filter(|plant| matches_exact(*plant, &query_lower))
            .cloned()
            .collect())
    }

    async fn videos(&self) -> Result<Vec<Video>> {
        Ok(self.snapshot.read().await.videos.clone())
    }

    async fn care_tips(&self) -> Result<Vec<CareTip>> {
        Ok(self.snapshot.read().await.care_tips.clone())
    }

    async fn articles(&self) -> Result<Vec<Article>> {
        let mut articles = self.snapshot.read().await.articles.clone();
        articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(articles)
    }

    async fn hero(&self) -> Result<Option<HeroSection>> {
        Ok(self.snapshot.read().await.hero.clone())
    }

    async fn about(&self) -> Result<Option<About>> {
        Ok(self.snapshot.read().await.about.clone())
    }

    async fn contact_info(&self) -> Result<Option<ContactInfo>> {
        Ok(self.snapshot.read().await.contact_info.clone())
    }

    async fn brochure(&self) -> Result<Option<Brochure>> {
        Ok(self.snapshot.read().await.brochure.clone())
    }

    async fn record_contact_message(&self, message: ContactMessage) -> Result<()> {
        debug!("Recording contact message from {}", message.email);
        self.snapshot.write().await.contact_messages.push(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn article(id: i64, day: u32) -> Article {
        Article {
            id,
            title: format!("Article {}", id),
            description: None,
            image: None,
            pdf: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_plants_matching_uses_substring_predicate() {
        let catalog = InMemoryCatalog::from_snapshot(CatalogSnapshot {
            plants: vec![
                Plant::new(1, "Snake Plant"),
                Plant::new(2, "Fern").with_species("Nephrolepis"),
                Plant::new(3, "Money Plant"),
            ],
            ..Default::default()
        });

        let matched = tokio_test::block_on(catalog.plants_matching("PLANT")).unwrap();
        let ids: Vec<i64> = matched.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let by_species = tokio_test::block_on(catalog.plants_matching("nephro")).unwrap();
        assert_eq!(by_species.len(), 1);
        assert_eq!(by_species[0].name, "Fern");
    }

    #[test]
    fn test_articles_newest_first() {
        let catalog = InMemoryCatalog::from_snapshot(CatalogSnapshot {
            articles: vec![article(1, 2), article(2, 20), article(3, 11)],
            ..Default::default()
        });

        let articles = tokio_test::block_on(catalog.articles()).unwrap();
        let ids: Vec<i64> = articles.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let snapshot = CatalogSnapshot {
            plants: vec![Plant::new(7, "Fern"), Plant::new(7, "Ivy")],
            ..Default::default()
        };
        assert!(matches!(snapshot.validate(), Err(NurseryError::Catalog(_))));
    }

    #[tokio::test]
    async fn test_record_contact_message() {
        let catalog = InMemoryCatalog::default();
        catalog
            .record_contact_message(ContactMessage {
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
                message: "Do you deliver?".to_string(),
                submitted_at: Utc::now(),
            })
            .await
            .unwrap();

        let messages = catalog.contact_messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].name, "Ana");
    }
}
