//! YouTube URL resolution
//!
//! Turns the links content editors paste (watch pages, shorts, youtu.be short
//! links) into a video id, and builds player embed URLs from that id.
//! Every function here is total: malformed input resolves to `None`.

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

const EMBED_BASE: &str = "https://www.youtube.com/embed";
const THUMBNAIL_BASE: &str = "https://img.youtube.com/vi";

/// Playback modifiers appended to an embed URL
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedOptions {
    /// Start offset in seconds
    pub start: Option<u32>,
    /// End offset in seconds
    pub end: Option<u32>,
    /// Autoplay (always muted)
    pub autoplay: bool,
    /// Loop the single video
    #[serde(rename = "loop")]
    pub loop_playback: bool,
}

impl EmbedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_start(mut self, seconds: u32) -> Self {
        self.start = Some(seconds);
        self
    }

    pub fn with_end(mut self, seconds: u32) -> Self {
        self.end = Some(seconds);
        self
    }

    pub fn autoplay(mut self, enable: bool) -> Self {
        self.autoplay = enable;
        self
    }

    pub fn looping(mut self, enable: bool) -> Self {
        self.loop_playback = enable;
        self
    }

    /// Query parameters in embed order
    fn query_params(&self, video_id: &str) -> Vec<String> {
        let mut params = Vec::new();

        // Browsers refuse unmuted autoplay.
        if self.autoplay {
            params.push("autoplay=1".to_string());
            params.push("mute=1".to_string());
        }
        // A single video only loops when it is also its own playlist.
        if self.loop_playback {
            params.push("loop=1".to_string());
            params.push(format!("playlist={}", video_id));
        }
        if let Some(start) = self.start {
            params.push(format!("start={}", start));
        }
        if let Some(end) = self.end {
            params.push(format!("end={}", end));
        }

        params
    }
}

/// A video link plus how it should be played
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoReference {
    pub url: Option<String>,
    #[serde(flatten)]
    pub options: EmbedOptions,
}

/// Video id and embed URL derived from a [`VideoReference`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedEmbed {
    pub video_id: Option<String>,
    pub embed_url: Option<String>,
}

impl VideoReference {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            options: EmbedOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EmbedOptions) -> Self {
        self.options = options;
        self
    }

    /// Resolve the link into an id and embed URL
    pub fn resolve(&self) -> ResolvedEmbed {
        let video_id = self.url.as_deref().and_then(extract_video_id);
        let embed_url = video_id
            .as_deref()
            .map(|id| build_embed_url(id, &self.options));

        ResolvedEmbed { video_id, embed_url }
    }
}

/// Host families that carry video ids
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum YouTubeHost {
    /// youtube.com and its subdomains
    Main,
    /// youtu.be short links
    Short,
}

fn classify_host(host: &str) -> Option<YouTubeHost> {
    let host = host.to_ascii_lowercase();

    if host == "youtube.com" || host.ends_with(".youtube.com") {
        Some(YouTubeHost::Main)
    } else if host == "youtu.be" || host.ends_with(".youtu.be") {
        Some(YouTubeHost::Short)
    } else {
        None
    }
}

/// Extract the video id from a YouTube URL.
///
/// Accepts `youtube.com/watch?v=ID`, `youtube.com/shorts/ID` and
/// `youtu.be/ID`, on any subdomain of either host.
pub fn extract_video_id(raw_url: &str) -> Option<String> {
    let trimmed = raw_url.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Ok(url) = Url::parse(trimmed) else {
        debug!("Unparseable video URL: {}", trimmed);
        return None;
    };

    let video_id = match classify_host(url.host_str()?)? {
        YouTubeHost::Main => {
            let path = url.path();
            if path == "/watch" {
                url.query_pairs()
                    .find_map(|(key, value)| (key == "v").then(|| value.into_owned()))
            } else if let Some(rest) = path.strip_prefix("/shorts/") {
                rest.split('/').next().map(str::to_string)
            } else {
                None
            }
        }
        YouTubeHost::Short => Some(url.path().trim_start_matches('/').to_string()),
    };

    video_id.filter(|id| !id.is_empty())
}

/// Build an embed URL for `raw_url`, or `None` when no id can be resolved
pub fn generate_embed_url(raw_url: &str, options: &EmbedOptions) -> Option<String> {
    extract_video_id(raw_url).map(|id| build_embed_url(&id, options))
}

/// Embed URL for an already-resolved video id
pub fn build_embed_url(video_id: &str, options: &EmbedOptions) -> String {
    let params = options.query_params(video_id);

    if params.is_empty() {
        format!("{}/{}", EMBED_BASE, video_id)
    } else {
        format!("{}/{}?{}", EMBED_BASE, video_id, params.join("&"))
    }
}

/// High-quality thumbnail image for a video id
pub fn thumbnail_url(video_id: &str) -> String {
    format!("{}/{}/hqdefault.jpg", THUMBNAIL_BASE, video_id)
}
