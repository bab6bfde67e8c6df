use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

use dub_scraper::app::expand_seasons_use_case::ExpandSeasonsUseCase;
use dub_scraper::app::extract_labels_use_case::ExtractLabelsUseCase;
use dub_scraper::app::ports::{HttpClientPort, ProgressPort};
use dub_scraper::config::{self, Config};
use dub_scraper::export::{self, ExportFormat};
use dub_scraper::infra::console_progress::ConsoleProgress;
use dub_scraper::infra::http_client::{build_client, ReqwestHttp};
use dub_scraper::infra::imdb_catalog::ImdbSuggestCatalog;
use dub_scraper::infra::tmdb_catalog::TmdbCatalog;
use dub_scraper::logging;
use dub_scraper::parser::table::{reconstruct, TableOptions};
use dub_scraper::pipeline::Pipeline;

#[derive(Parser)]
#[command(name = "dub_scraper")]
#[command(about = "Dubbing wiki show scraper with IMDb/TMDb season expansion")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to a TOML config file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the page, expand every show into seasons and export the table
    Run {
        /// Wiki page listing the shows
        #[arg(long)]
        url: String,
        /// Only process this many table rows
        #[arg(long)]
        max_items: Option<NonZeroUsize>,
        /// Where to write the exports (overrides output.dir)
        #[arg(long)]
        output_dir: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = ExportFormat::Both)]
        format: ExportFormat,
    },
    /// Only rebuild the show table and print it; no catalog lookups
    Table {
        #[arg(long)]
        url: String,
        #[arg(long)]
        max_items: Option<NonZeroUsize>,
    },
}

async fn run(
    config: Config,
    url: &str,
    max_items: Option<NonZeroUsize>,
    output_dir: Option<PathBuf>,
    format: ExportFormat,
) -> anyhow::Result<()> {
    let api_key = config::tmdb_api_key()?;

    let client = build_client(&config.http).context("Failed to build HTTP client")?;
    let progress: Arc<dyn ProgressPort> = Arc::new(ConsoleProgress::new());
    let http: Arc<dyn HttpClientPort> = Arc::new(ReqwestHttp::new(client.clone()));
    let titles = Arc::new(ImdbSuggestCatalog::new(client.clone(), config.imdb.suggestion_url.clone()));
    let seasons = Arc::new(
        TmdbCatalog::new(client, config.tmdb.base_url.clone(), api_key)
            .with_language(config.tmdb.language.clone()),
    );

    let expander = ExpandSeasonsUseCase::new(
        ExtractLabelsUseCase::new(http.clone(), progress.clone()),
        config.detail.clone(),
        titles,
        seasons,
        progress.clone(),
    );
    let pipeline = Pipeline::new(http, expander, progress, config.source.clone());

    println!("🚀 Processing {}", url);
    let result = pipeline
        .run(url, max_items)
        .await
        .with_context(|| format!("Failed to process {}", url))?;

    if result.records.is_empty() {
        bail!("No usable output: no shows could be read from {}", url);
    }

    let dir = output_dir.unwrap_or_else(|| PathBuf::from(&config.output.dir));
    let written = export::write_exports(&result.records, &config.output, format, &dir)
        .context("Failed to write exports")?;

    println!("\n📊 Results for {}:", result.source_url);
    println!("   Shows processed: {}", result.shows_processed);
    println!("   Rows exported: {}", result.records.len());
    println!("   Fallback rows: {}", result.fallback_rows());
    println!("   Ghost rows skipped: {}", result.ghost_rows);
    for path in &written {
        println!("   Output file: {}", path.display());
    }

    if !result.errors.is_empty() {
        warn!("{} shows could not be expanded", result.errors.len());
        println!("\n⚠️  Errors encountered:");
        for (show, message) in result.errors.iter() {
            println!("   - {}: {}", show, message);
        }
    }
    println!("✅ Done");
    Ok(())
}

async fn preview_table(config: Config, url: &str, max_items: Option<NonZeroUsize>) -> anyhow::Result<()> {
    let client = build_client(&config.http).context("Failed to build HTTP client")?;
    let page = ReqwestHttp::new(client)
        .get(url)
        .await
        .with_context(|| format!("Failed to fetch {}", url))?;

    let options = TableOptions::from_config(&config.source, max_items);
    let table = reconstruct(&page.text(), url, &options)?;
    let shows = table.shows();
    if shows.is_empty() {
        bail!("No usable output: no shows could be read from {}", url);
    }

    info!("{} rows, {} shows", table.rows.len(), shows.len());
    for show in &shows {
        println!(
            "📺 {} | {} | {} | {}",
            show.name,
            show.studio.as_deref().unwrap_or("-"),
            show.url.as_deref().unwrap_or("-"),
            show.cast_list()
        );
    }
    println!("\n{} shows, {} rows, {} ghost rows skipped", shows.len(), table.rows.len(), table.ghost_rows);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _log_guard = logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let outcome = match cli.command {
        Commands::Run {
            url,
            max_items,
            output_dir,
            format,
        } => run(config, &url, max_items, output_dir, format).await,
        Commands::Table { url, max_items } => preview_table(config, &url, max_items).await,
    };

    if let Err(e) = &outcome {
        error!("{:#}", e);
        println!("❌ {:#}", e);
    }
    outcome
}
