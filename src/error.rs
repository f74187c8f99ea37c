//! Error types for the nursery site core

/// Result type for nursery site operations
pub type Result<T> = std::result::Result<T, NurseryError>;

/// Error types for nursery site operations
#[derive(thiserror::Error, Debug)]
pub enum NurseryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse config: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),
}
