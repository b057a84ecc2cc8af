mod collect;
mod context;
mod report;
mod sites;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "metalprice")]
#[command(about = "Scrap-metal buy-price collector")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape every vendor and write records and the price matrix as JSON
    Collect {
        /// Restrict the run to vendors whose name contains this text
        #[arg(long)]
        site: Option<String>,

        /// Keep raw material names instead of mapping them to target items
        #[arg(long)]
        no_filter: bool,

        /// Output directory (defaults to METALPRICE_OUTPUT_DIR)
        #[arg(long)]
        output: Option<PathBuf>,

        /// List the vendors that would be scraped without fetching anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Show how each scraped material name maps onto the target items
    Report {
        /// Restrict the report to vendors whose name contains this text
        #[arg(long)]
        site: Option<String>,
    },
    /// List configured vendors
    Sites,
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = metalprice_core::load_app_config().context("failed to load configuration")?;
    init_tracing(&config.log_level);

    match cli.command {
        Some(Commands::Collect {
            site,
            no_filter,
            output,
            dry_run,
        }) => {
            let options = collect::CollectOptions {
                site_filter: site,
                filter_items: config.filter_target_items && !no_filter,
                output_dir: output.unwrap_or_else(|| config.output_dir.clone()),
                dry_run,
            };
            collect::run_collect(&config, &options).await?;
        }
        Some(Commands::Report { site }) => report::run_report(&config, site.as_deref()).await?,
        Some(Commands::Sites) => sites::run_sites(&config)?,
        None => println!("metalprice: no command given; see `metalprice --help`"),
    }

    Ok(())
}
