use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};

use nursery_site::pages::PageBuilder;
use nursery_site::youtube::{extract_video_id, generate_embed_url, EmbedOptions};
use nursery_site::{Config, InMemoryCatalog};

fn cli() -> Command {
    Command::new("Nursery Site")
        .version(env!("CARGO_PKG_VERSION"))
        .author("TigreRoll")
        .about("Catalog search and YouTube embeds for the nursery website")
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file (TOML)")
                .global(true),
        )
        .arg(
            Arg::new("catalog")
                .long("catalog")
                .value_name("FILE")
                .help("Catalog JSON file, overrides the configured one")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("video-id")
                .about("Print the video id of a YouTube URL")
                .arg(Arg::new("url").required(true)),
        )
        .subcommand(
            Command::new("embed")
                .about("Print the embed URL for a YouTube URL")
                .arg(Arg::new("url").required(true))
                .arg(
                    Arg::new("start")
                        .long("start")
                        .value_name("SECONDS")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new("end")
                        .long("end")
                        .value_name("SECONDS")
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(Arg::new("autoplay").long("autoplay").action(ArgAction::SetTrue))
                .arg(Arg::new("loop").long("loop").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("search")
                .about("Search plants by name, species or description")
                .arg(Arg::new("query").default_value("")),
        )
        .subcommand(
            Command::new("autocomplete")
                .about("Suggest plant names starting with a term")
                .arg(Arg::new("term").required(true)),
        )
        .subcommand(
            Command::new("page")
                .about("Print a page view-model as JSON")
                .arg(
                    Arg::new("name")
                        .required(true)
                        .value_parser(["home", "shorts", "videos", "plants"]),
                )
                .arg(
                    Arg::new("query")
                        .short('q')
                        .long("query")
                        .value_name("QUERY")
                        .help("Plant search query (plants page)"),
                ),
        )
}

fn load_config(matches: &ArgMatches) -> Result<Config> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => Config::from_file(path).with_context(|| format!("loading {}", path))?,
        None => Config::load().unwrap_or_else(|e| {
            warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }),
    };

    if let Some(catalog) = matches.get_one::<String>("catalog") {
        config.catalog.catalog_file = PathBuf::from(catalog);
    }

    config.validate()?;
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn open_pages(config: &Config) -> Result<PageBuilder<InMemoryCatalog>> {
    let catalog = InMemoryCatalog::from_file(&config.catalog.catalog_file)
        .await
        .with_context(|| format!("loading catalog {}", config.catalog.catalog_file.display()))?;
    Ok(PageBuilder::new(catalog, config))
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();

    // Config is read before logging starts; its own messages are not shown.
    let config = load_config(&matches)?;
    let filter = if matches.get_flag("verbose") {
        "nursery_site=debug,warn".to_string()
    } else {
        format!("nursery_site={},warn", config.logging.log_level)
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("🌱 Nursery site starting");
    tracing::debug!("{}", config.summary());

    match matches.subcommand() {
        Some(("video-id", sub)) => {
            let url = sub.get_one::<String>("url").map(String::as_str).unwrap_or_default();
            match extract_video_id(url) {
                Some(id) => println!("{}", id),
                None => warn!("No video id found in: {}", url),
            }
        }
        Some(("embed", sub)) => {
            let url = sub.get_one::<String>("url").map(String::as_str).unwrap_or_default();
            let options = EmbedOptions {
                start: sub.get_one::<u32>("start").copied(),
                end: sub.get_one::<u32>("end").copied(),
                autoplay: sub.get_flag("autoplay"),
                loop_playback: sub.get_flag("loop"),
            };
            match generate_embed_url(url, &options) {
                Some(embed) => println!("{}", embed),
                None => warn!("Cannot build an embed URL for: {}", url),
            }
        }
        Some(("search", sub)) => {
            let query = sub.get_one::<String>("query").map(String::as_str).unwrap_or_default();
            let pages = open_pages(&config).await?;
            let page = pages.plants(Some(query)).await?;
            let names: Vec<&str> = page.plants.iter().map(|p| p.plant.name.as_str()).collect();
            info!("🔍 {} plants matched '{}'", names.len(), query);
            print_json(&names)?;
        }
        Some(("autocomplete", sub)) => {
            let term = sub.get_one::<String>("term").map(String::as_str).unwrap_or_default();
            let pages = open_pages(&config).await?;
            print_json(&pages.autocomplete(term).await?)?;
        }
        Some(("page", sub)) => {
            let pages = open_pages(&config).await?;
            let query = sub.get_one::<String>("query").map(String::as_str);
            match sub.get_one::<String>("name").map(String::as_str) {
                Some("home") => print_json(&pages.home().await?)?,
                Some("shorts") => print_json(&pages.shorts().await?)?,
                Some("videos") => print_json(&pages.all_videos().await?)?,
                Some("plants") => print_json(&pages.plants(query).await?)?,
                other => anyhow::bail!("unknown page: {:?}", other),
            }
        }
        _ => unreachable!("subcommand_required is set"),
    }

    Ok(())
}
