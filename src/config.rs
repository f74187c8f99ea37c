use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::catalog::{DEFAULT_AUTOCOMPLETE_LIMIT, DEFAULT_FUZZY_THRESHOLD};
use crate::error::{NurseryError, Result};

/// Configuration for the nursery site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where catalog content comes from
    pub catalog: CatalogConfig,

    /// Plant search settings
    pub search: SearchConfig,

    /// Page assembly settings
    pub pages: PageConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to the catalog JSON file
    pub catalog_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Fuzzy fallback keeps names scoring strictly above this (0-100)
    pub fuzzy_threshold: u8,

    /// Maximum autocomplete suggestions
    pub autocomplete_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Featured plants shown on the home page
    pub featured_plant_limit: usize,

    /// Care tips shown on the home page
    pub care_tip_limit: usize,

    /// Intro video start offset in seconds
    pub intro_start: Option<u32>,

    /// Intro video end offset in seconds
    pub intro_end: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level for the nursery_site target
    pub log_level: String,
}

impl Config {
    /// Load configuration from the first config file found, falling back to
    /// defaults with environment overrides
    pub fn load() -> Result<Self> {
        let config_paths = ["nursery-site.toml", "config/nursery-site.toml"];

        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                match toml::from_str(&config_str) {
                    Ok(config) => {
                        tracing::info!("📄 Loaded configuration from: {}", path);
                        return Ok(config);
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config file {}: {}", path, e);
                    }
                }
            }
        }

        Self::from_env()
    }

    /// Load configuration from a specific TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config_str = std::fs::read_to_string(path.as_ref())?;
        let config: Config = toml::from_str(&config_str)?;
        tracing::info!("📄 Loaded configuration from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Defaults with environment variable overrides
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(catalog_file) = std::env::var("NURSERY_SITE_CATALOG") {
            config.catalog.catalog_file = PathBuf::from(catalog_file);
        }

        if let Ok(threshold) = std::env::var("NURSERY_SITE_FUZZY_THRESHOLD") {
            config.search.fuzzy_threshold = threshold.parse().map_err(|_| {
                NurseryError::Config(format!("NURSERY_SITE_FUZZY_THRESHOLD is not 0-255: {}", threshold))
            })?;
        }

        if let Ok(log_level) = std::env::var("NURSERY_SITE_LOG_LEVEL") {
            config.logging.log_level = log_level;
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_str = toml::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), config_str)?;
        tracing::info!("💾 Configuration saved to: {}", path.as_ref().display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.search.fuzzy_threshold > 100 {
            return Err(NurseryError::Config(
                "fuzzy_threshold must be between 0 and 100".to_string(),
            ));
        }

        if self.search.autocomplete_limit == 0 {
            return Err(NurseryError::Config(
                "autocomplete_limit must be greater than 0".to_string(),
            ));
        }

        if self.pages.featured_plant_limit == 0 {
            return Err(NurseryError::Config(
                "featured_plant_limit must be greater than 0".to_string(),
            ));
        }

        if let (Some(start), Some(end)) = (self.pages.intro_start, self.pages.intro_end) {
            if end <= start {
                return Err(NurseryError::Config(format!(
                    "intro_end ({}) must be after intro_start ({})",
                    end, start
                )));
            }
        }

        tracing::debug!("Configuration validation passed");
        Ok(())
    }

    /// Get runtime configuration summary
    pub fn summary(&self) -> String {
        format!(
            "Nursery Site Configuration:\n\
            - Catalog File: {}\n\
            - Fuzzy Threshold: {}\n\
            - Autocomplete Limit: {}\n\
            - Featured Plants: {}\n\
            - Intro Trim: {:?}..{:?}\n\
            - Log Level: {}",
            self.catalog.catalog_file.display(),
            self.search.fuzzy_threshold,
            self.search.autocomplete_limit,
            self.pages.featured_plant_limit,
            self.pages.intro_start,
            self.pages.intro_end,
            self.logging.log_level
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig {
                catalog_file: PathBuf::from("catalog.json"),
            },
            search: SearchConfig {
                fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
                autocomplete_limit: DEFAULT_AUTOCOMPLETE_LIMIT,
            },
            pages: PageConfig::default(),
            logging: LoggingConfig {
                log_level: "info".to_string(),
            },
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            featured_plant_limit: 6,
            care_tip_limit: 3,
            intro_start: Some(80),
            intro_end: Some(160),
        }
    }
}

/// Configuration builder for programmatic config creation
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn with_catalog_file(mut self, path: PathBuf) -> Self {
        self.config.catalog.catalog_file = path;
        self
    }

    pub fn with_fuzzy_threshold(mut self, threshold: u8) -> Self {
        self.config.search.fuzzy_threshold = threshold;
        self
    }

    pub fn with_autocomplete_limit(mut self, limit: usize) -> Self {
        self.config.search.autocomplete_limit = limit;
        self
    }

    pub fn with_featured_plant_limit(mut self, limit: usize) -> Self {
        self.config.pages.featured_plant_limit = limit;
        self
    }

    pub fn with_intro_trim(mut self, start: Option<u32>, end: Option<u32>) -> Self {
        self.config.pages.intro_start = start;
        self.config.pages.intro_end = end;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.config.logging.log_level = level.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
