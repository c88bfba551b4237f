mod extract;
mod fetcher;
mod pipeline;
mod record;
mod report;
mod settings;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use extract::{Extractor, Selectors};
use fetcher::HttpFetcher;
use settings::Settings;

#[derive(Parser)]
#[command(name = "barcode_scraper", about = "Product barcode, name and price scraper")]
struct Cli {
    /// Config file (default: ./barcodes.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every configured URL and write both reports (default)
    Run {
        /// Scrape these URLs instead of the configured list
        #[arg(short, long = "url")]
        urls: Vec<String>,
    },
    /// Run the extractors against a saved HTML page
    Extract {
        /// Path to the HTML file
        file: PathBuf,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    let selectors =
        Selectors::compile(&settings.selectors).context("Invalid selector in settings")?;
    let extractor = Extractor::new(selectors);

    match cli.command.unwrap_or(Commands::Run { urls: Vec::new() }) {
        Commands::Run { urls } => {
            if !urls.is_empty() {
                settings.urls = urls;
            }
            run(&settings, &extractor)?;
        }
        Commands::Extract { file } => {
            let html = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let record = extractor.extract(&file.display().to_string(), &html);
            println!("Product Name: {}", record.product_name);
            println!("Price:        {}", record.price);
            println!("Barcode:      {}", record.barcode);
        }
    }

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }
    Ok(())
}

fn run(settings: &Settings, extractor: &Extractor) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::new(
        &settings.user_agent,
        settings.timeout_secs.map(Duration::from_secs),
    )
    .context("Failed to create HTTP client")?;

    info!(urls = settings.urls.len(), "Starting scrape");
    println!("INFO: scraping {} URLs...", settings.urls.len());

    let pb = ProgressBar::new(settings.urls.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let mut stdout = std::io::stdout();
    let results = pipeline::run(&fetcher, extractor, &settings.urls, &pb, &mut stdout);
    pb.finish_and_clear();

    let s = results.summary();
    println!(
        "INFO: {} records ({} complete, {} partial, {} request errors)",
        results.len(),
        s.complete,
        s.partial,
        s.request_errors
    );

    let outcome = report::write_all(&results, &settings.output);
    for (label, written) in [("text", &outcome.text), ("spreadsheet", &outcome.xlsx)] {
        match written {
            Ok(path) => println!("INFO: {} report saved to {}", label, path.display()),
            Err(e) => println!("ERROR: {} report not saved: {}", label, e),
        }
    }
    if !outcome.all_ok() {
        warn!("At least one report could not be written");
    }
    Ok(())
}
