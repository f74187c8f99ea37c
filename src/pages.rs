//! Page view-models
//!
//! Each public page of the site is assembled here from catalog content, with
//! YouTube links already resolved to embed and thumbnail URLs.

use chrono::{Datelike, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::catalog::{
    autocomplete, search_plants, About, Article, Brochure, CareTip, CatalogStore, ContactInfo,
    HeroSection, Plant, Video, VideoType,
};
use crate::config::{Config, PageConfig, SearchConfig};
use crate::error::Result;
use crate::youtube::{build_embed_url, extract_video_id, thumbnail_url, EmbedOptions};

/// Media shown on a featured plant card
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "url", rename_all = "snake_case")]
pub enum PlantMedia {
    /// Uploaded MP4, played directly
    Upload(String),
    /// YouTube embed URL
    #[serde(rename = "youtube")]
    YouTube(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct PlantCard {
    #[serde(flatten)]
    pub plant: Plant,
    pub media: Option<PlantMedia>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlantListing {
    #[serde(flatten)]
    pub plant: Plant,
    pub embed_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoCard {
    #[serde(flatten)]
    pub video: Video,
    pub embed_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl VideoCard {
    /// Card with an embed URL (when the link resolves) and no thumbnail
    fn embedded(video: Video, options: &EmbedOptions) -> Self {
        let embed_url = video
            .youtube_url
            .as_deref()
            .and_then(extract_video_id)
            .map(|id| build_embed_url(&id, options));

        Self {
            video,
            embed_url,
            thumbnail_url: None,
        }
    }

    /// Card with embed and thumbnail URLs, or `None` if the link does not resolve
    fn with_thumbnail(video: Video, options: &EmbedOptions) -> Option<Self> {
        let id = video.youtube_url.as_deref().and_then(extract_video_id)?;

        Some(Self {
            embed_url: Some(build_embed_url(&id, options)),
            thumbnail_url: Some(thumbnail_url(&id)),
            video,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub hero: Option<HeroSection>,
    pub featured_plants: Vec<PlantCard>,
    pub about: Option<About>,
    pub care_tips: Vec<CareTip>,
    pub intro_video: Option<VideoCard>,
    pub other_videos: Vec<VideoCard>,
    pub latest_short: Option<VideoCard>,
    pub brochure: Option<Brochure>,
    pub contact_info: Option<ContactInfo>,
    pub articles: Vec<Article>,
    pub current_year: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShortsPage {
    pub short_videos: Vec<VideoCard>,
    pub contact_info: Option<ContactInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideosPage {
    pub videos: Vec<VideoCard>,
    pub contact_info: Option<ContactInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlantsPage {
    pub query: Option<String>,
    pub plants: Vec<PlantListing>,
    pub contact_info: Option<ContactInfo>,
}

/// Featured media: an uploaded video wins over a YouTube link
pub fn plant_media(plant: &Plant) -> Option<PlantMedia> {
    if plant.has_video() {
        return plant.video.clone().map(PlantMedia::Upload);
    }

    plant
        .youtube_url
        .as_deref()
        .and_then(extract_video_id)
        .map(|id| PlantMedia::YouTube(build_embed_url(&id, &background_loop())))
}

/// Muted autoplay on loop, used for decorative video backgrounds
fn background_loop() -> EmbedOptions {
    EmbedOptions::new().autoplay(true).looping(true)
}

/// Newest first, ties broken by highest id
fn sort_newest(videos: &mut [Video]) {
    videos.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
}

fn of_type(videos: Vec<Video>, video_type: VideoType) -> Vec<Video> {
    videos.into_iter().filter(|v| v.video_type == video_type).collect()
}

/// Assembles page view-models from a catalog store
#[derive(Debug, Clone)]
pub struct PageBuilder<S> {
    store: S,
    pages: PageConfig,
    search: SearchConfig,
}

impl<S: CatalogStore> PageBuilder<S> {
    pub fn new(store: S, config: &Config) -> Self {
        Self {
            store,
            pages: config.pages.clone(),
            search: config.search.clone(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn intro_options(&self) -> EmbedOptions {
        EmbedOptions {
            start: self.pages.intro_start,
            end: self.pages.intro_end,
            autoplay: true,
            loop_playback: false,
        }
    }

    /// Home page
    pub async fn home(&self) -> Result<HomePage> {
        let featured_plants: Vec<PlantCard> = self
            .store
            .plants()
            .await?
            .into_iter()
            .filter(|p| p.is_featured)
            .take(self.pages.featured_plant_limit)
            .map(|plant| PlantCard {
                media: plant_media(&plant),
                plant,
            })
            .collect();

        let mut care_tips = self.store.care_tips().await?;
        care_tips.truncate(self.pages.care_tip_limit);

        let mut videos = self.store.videos().await?;
        videos.sort_by(|a, b| b.id.cmp(&a.id));

        let intro = videos.iter().find(|v| v.video_type == VideoType::Intro).cloned();
        let intro_id = intro.as_ref().map(|v| v.id);
        let intro_video = intro.map(|v| VideoCard::embedded(v, &self.intro_options()));

        let other_videos: Vec<VideoCard> = videos
            .iter()
            .filter(|v| v.video_type == VideoType::Regular && Some(v.id) != intro_id)
            .cloned()
            .map(|v| VideoCard::embedded(v, &EmbedOptions::new()))
            .collect();

        let mut shorts = of_type(videos, VideoType::Short);
        sort_newest(&mut shorts);
        let latest_short = shorts.into_iter().next().map(|short| {
            VideoCard::with_thumbnail(short.clone(), &background_loop()).unwrap_or(VideoCard {
                video: short,
                embed_url: None,
                thumbnail_url: None,
            })
        });

        info!(
            "🏡 Home page: {} featured plants, {} other videos",
            featured_plants.len(),
            other_videos.len()
        );

        Ok(HomePage {
            hero: self.store.hero().await?,
            featured_plants,
            about: self.store.about().await?,
            care_tips,
            intro_video,
            other_videos,
            latest_short,
            brochure: self.store.brochure().await?,
            contact_info: self.store.contact_info().await?,
            articles: self.store.articles().await?,
            current_year: Utc::now().year(),
        })
    }

    /// Shorts page; shorts without a resolvable link are left out
    pub async fn shorts(&self) -> Result<ShortsPage> {
        let mut shorts = of_type(self.store.videos().await?, VideoType::Short);
        sort_newest(&mut shorts);

        let total = shorts.len();
        let loop_only = EmbedOptions::new().looping(true);
        let short_videos: Vec<VideoCard> = shorts
            .into_iter()
            .filter_map(|v| VideoCard::with_thumbnail(v, &loop_only))
            .collect();

        if short_videos.len() < total {
            debug!("Skipped {} shorts without a usable link", total - short_videos.len());
        }

        Ok(ShortsPage {
            short_videos,
            contact_info: self.store.contact_info().await?,
        })
    }

    /// All regular videos, newest first
    pub async fn all_videos(&self) -> Result<VideosPage> {
        let mut regular = of_type(self.store.videos().await?, VideoType::Regular);
        sort_newest(&mut regular);

        let videos = regular
            .into_iter()
            .map(|v| VideoCard::embedded(v, &EmbedOptions::new()))
            .collect();

        Ok(VideosPage {
            videos,
            contact_info: self.store.contact_info().await?,
        })
    }

    /// Plant list, filtered by `query` when one is given
    pub async fn plants(&self, query: Option<&str>) -> Result<PlantsPage> {
        let query = query.filter(|q| !q.is_empty());
        let found = search_plants(&self.store, query.unwrap_or(""), self.search.fuzzy_threshold).await?;

        let plants = found
            .into_iter()
            .map(|plant| PlantListing {
                embed_url: plant
                    .youtube_url
                    .as_deref()
                    .and_then(extract_video_id)
                    .map(|id| build_embed_url(&id, &background_loop())),
                plant,
            })
            .collect();

        Ok(PlantsPage {
            query: query.map(str::to_string),
            plants,
            contact_info: self.store.contact_info().await?,
        })
    }

    /// Plant name suggestions for a partially typed term
    pub async fn autocomplete(&self, term: &str) -> Result<Vec<String>> {
        if term.is_empty() {
            return Ok(Vec::new());
        }
        let plants = self.store.plants().await?;
        Ok(autocomplete(term, &plants, self.search.autocomplete_limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogSnapshot, InMemoryCatalog};
    use chrono::TimeZone;

    fn video(id: i64, video_type: VideoType, url: Option<&str>, day: u32) -> Video {
        Video {
            id,
            title: format!("Video {}", id),
            video_type,
            youtube_url: url.map(str::to_string),
            description: None,
            created_at: Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap(),
        }
    }

    fn builder(snapshot: CatalogSnapshot) -> PageBuilder<InMemoryCatalog> {
        PageBuilder::new(InMemoryCatalog::from_snapshot(snapshot), &Config::default())
    }

    #[test]
    fn test_plant_media_prefers_upload() {
        let both = Plant::new(1, "Fern")
            .with_video("/media/fern.mp4")
            .with_youtube_url("https://youtu.be/abc123");
        assert_eq!(plant_media(&both), Some(PlantMedia::Upload("/media/fern.mp4".to_string())));

        let youtube = Plant::new(2, "Ivy").with_youtube_url("https://youtu.be/abc123");
        assert_eq!(
            plant_media(&youtube),
            Some(PlantMedia::YouTube(
                "https://www.youtube.com/embed/abc123?autoplay=1&mute=1&loop=1&playlist=abc123"
                    .to_string()
            ))
        );

        let broken = Plant::new(3, "Moss").with_youtube_url("https://example.com/moss");
        assert_eq!(plant_media(&broken), None);
        assert_eq!(plant_media(&Plant::new(4, "Cactus")), None);
    }

    #[tokio::test]
    async fn test_home_featured_limit() {
        let plants = (1..=8)
            .map(|i| {
                let plant = Plant::new(i, format!("Plant {}", i));
                if i != 2 { plant.featured() } else { plant }
            })
            .collect();
        let pages = builder(CatalogSnapshot {
            plants,
            ..Default::default()
        });

        let home = pages.home().await.unwrap();
        let ids: Vec<i64> = home.featured_plants.iter().map(|c| c.plant.id).collect();
        assert_eq!(ids, vec![1, 3, 4, 5, 6, 7]);
    }

    #[tokio::test]
    async fn test_home_videos() {
        let pages = builder(CatalogSnapshot {
            videos: vec![
                video(1, VideoType::Intro, Some("https://www.youtube.com/watch?v=old"), 1),
                video(2, VideoType::Intro, Some("https://www.youtube.com/watch?v=intro"), 2),
                video(3, VideoType::Regular, Some("https://youtu.be/reg3"), 3),
                video(4, VideoType::Regular, None, 4),
                video(5, VideoType::Short, Some("https://www.youtube.com/shorts/s5"), 9),
                video(6, VideoType::Short, Some("https://www.youtube.com/shorts/s6"), 5),
            ],
            ..Default::default()
        });

        let home = pages.home().await.unwrap();

        let intro = home.intro_video.unwrap();
        assert_eq!(intro.video.id, 2);
        assert_eq!(
            intro.embed_url.as_deref(),
            Some("https://www.youtube.com/embed/intro?autoplay=1&mute=1&start=80&end=160")
        );

        let others: Vec<i64> = home.other_videos.iter().map(|c| c.video.id).collect();
        assert_eq!(others, vec![4, 3]);
        assert_eq!(home.other_videos[0].embed_url, None);
        assert_eq!(
            home.other_videos[1].embed_url.as_deref(),
            Some("https://www.youtube.com/embed/reg3")
        );

        let short = home.latest_short.unwrap();
        assert_eq!(short.video.id, 5);
        assert_eq!(
            short.thumbnail_url.as_deref(),
            Some("https://img.youtube.com/vi/s5/hqdefault.jpg")
        );
        assert_eq!(
            short.embed_url.as_deref(),
            Some("https://www.youtube.com/embed/s5?autoplay=1&mute=1&loop=1&playlist=s5")
        );
    }

    #[tokio::test]
    async fn test_latest_short_without_link_is_kept_bare() {
        let pages = builder(CatalogSnapshot {
            videos: vec![video(1, VideoType::Short, Some("https://vimeo.com/1"), 1)],
            ..Default::default()
        });

        let short = pages.home().await.unwrap().latest_short.unwrap();
        assert_eq!(short.embed_url, None);
        assert_eq!(short.thumbnail_url, None);
    }

    #[tokio::test]
    async fn test_shorts_page_order_and_filtering() {
        let pages = builder(CatalogSnapshot {
            videos: vec![
                video(1, VideoType::Short, Some("https://www.youtube.com/shorts/a1"), 3),
                video(2, VideoType::Short, None, 9),
                video(3, VideoType::Short, Some("https://youtu.be/c3"), 3),
                video(4, VideoType::Regular, Some("https://youtu.be/r4"), 9),
                video(5, VideoType::Short, Some("https://example.com/e5"), 8),
            ],
            ..Default::default()
        });

        let shorts = pages.shorts().await.unwrap();
        let ids: Vec<i64> = shorts.short_videos.iter().map(|c| c.video.id).collect();
        // Same day: higher id first
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(
            shorts.short_videos[0].embed_url.as_deref(),
            Some("https://www.youtube.com/embed/c3?loop=1&playlist=c3")
        );
    }

    #[tokio::test]
    async fn test_all_videos_page() {
        let pages = builder(CatalogSnapshot {
            videos: vec![
                video(1, VideoType::Regular, Some("https://youtu.be/v1"), 1),
                video(2, VideoType::Regular, Some("https://youtu.be/v2"), 7),
                video(3, VideoType::Short, Some("https://youtu.be/v3"), 9),
            ],
            ..Default::default()
        });

        let page = pages.all_videos().await.unwrap();
        let ids: Vec<i64> = page.videos.iter().map(|c| c.video.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert!(page.videos.iter().all(|c| c.thumbnail_url.is_none()));
    }

    #[tokio::test]
    async fn test_plants_page_embeds() {
        let pages = builder(CatalogSnapshot {
            plants: vec![
                Plant::new(1, "Snake Plant").with_youtube_url("https://youtu.be/snake1"),
                Plant::new(2, "Aloe Vera"),
            ],
            ..Default::default()
        });

        let page = pages.plants(Some("snake")).await.unwrap();
        assert_eq!(page.query.as_deref(), Some("snake"));
        assert_eq!(page.plants.len(), 1);
        assert_eq!(
            page.plants[0].embed_url.as_deref(),
            Some("https://www.youtube.com/embed/snake1?autoplay=1&mute=1&loop=1&playlist=snake1")
        );

        let everything = pages.plants(Some("")).await.unwrap();
        assert_eq!(everything.query, None);
        assert_eq!(everything.plants.len(), 2);
        assert_eq!(everything.plants[1].embed_url, None);
    }

    #[tokio::test]
    async fn test_autocomplete_limit_from_config() {
        let config = crate::config::ConfigBuilder::new().with_autocomplete_limit(2).build();
        let plants = (1..=5).map(|i| Plant::new(i, format!("Palm {}", i))).collect();
        let pages = PageBuilder::new(
            InMemoryCatalog::from_snapshot(CatalogSnapshot {
                plants,
                ..Default::default()
            }),
            &config,
        );

        assert_eq!(pages.autocomplete("pa").await.unwrap(), vec!["Palm 1", "Palm 2"]);
        assert!(pages.autocomplete("").await.unwrap().is_empty());
    }
}
