//! Nursery Site - Rust Implementation
//!
//! Presentation-side core of a plant nursery website: YouTube link resolution,
//! two-tier plant search, and assembly of the public page view-models.

pub mod catalog;
pub mod config;
pub mod contact;
pub mod error;
pub mod pages;
pub mod youtube;

// Re-export main types for easy access
pub use crate::catalog::{search, CatalogEntry, CatalogStore, InMemoryCatalog, Plant, Video, VideoType};
pub use crate::config::{Config, ConfigBuilder};
pub use crate::contact::{submit_contact, ContactForm};
pub use crate::error::{NurseryError, Result};
pub use crate::pages::PageBuilder;
pub use crate::youtube::{extract_video_id, generate_embed_url, EmbedOptions, ResolvedEmbed, VideoReference};
