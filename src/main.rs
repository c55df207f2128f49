use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use imgdisp::application::PopulateGalleryUseCase;
use imgdisp::application::dto::GallerySummary;
use imgdisp::infrastructure::{
    AppConfig, CliArgs, HttpFetcher, ImageLoader, LocalStore, StorageManager, build_reachability,
};
use imgdisp::presentation::{LayoutEvent, SpritePresenter};

const GALLERY_CONTAINER: &str = "gallery";

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}

fn load_config() -> Result<AppConfig> {
    let args = CliArgs::parse();
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

async fn create_gallery(config: &AppConfig) -> Result<PopulateGalleryUseCase> {
    let store = match &config.data_dir {
        Some(dir) => LocalStore::new(dir.clone()).await?,
        None => LocalStore::default_location().await?,
    }
    .with_key_mode(config.cache_key);
    info!(root = %store.root().display(), key_mode = %store.key_mode(), "Local store ready");

    let fetcher = HttpFetcher::new(&config.fetch.to_fetcher_config())?;
    let reachability = build_reachability(
        config.reachability.mode,
        &config.reachability.probe_url,
        config.reachability.probe_timeout(),
    )?;

    let (layout_tx, mut layout_rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        while let Some(LayoutEvent::Rebuild { parent, unit }) = layout_rx.recv().await {
            debug!(unit = %unit, parent = ?parent, "Layout rebuild requested");
        }
    });

    let loader = ImageLoader::new(
        Arc::new(store),
        Arc::new(fetcher),
        reachability,
        Arc::new(SpritePresenter::new(layout_tx)),
    );

    Ok(PopulateGalleryUseCase::new(
        loader,
        config.display.rect(),
        GALLERY_CONTAINER,
    ))
}

fn print_summary(urls: &[String], default_url: &str, summary: &GallerySummary) {
    for (i, report) in summary.units.iter().enumerate() {
        let url = urls.get(i).map_or(default_url, String::as_str);
        match (&report.source, &report.sprite_size, &report.error) {
            (Some(source), Some(size), _) => {
                println!("ok    {url} ({source}, {}x{})", size.width, size.height);
            }
            (_, _, Some(error)) => println!("fail  {url}: {error}"),
            _ => println!("skip  {url}"),
        }
    }
    println!(
        "{} presented, {} failed",
        summary.presented(),
        summary.failed()
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = load_config()?;
    init_logging(&config)?;

    info!(version = imgdisp::VERSION, "Starting {}", imgdisp::NAME);

    let gallery = create_gallery(&config).await?;
    let summary = gallery
        .execute_and_join(&config.urls, &config.default_url)
        .await;
    print_summary(&config.urls, &config.default_url, &summary);

    Ok(())
}
