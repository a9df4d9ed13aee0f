use clap::{Parser, Subcommand};
use props_scraper::config::Config;
use props_scraper::infra::{fetcher_for, publisher_for};
use props_scraper::logging;
use props_scraper::telemetry;
use props_scraper::pipeline::{ProjectionPipeline, ProjectionRunReport, TablePipeline, TableRunReport};
use std::path::PathBuf;
use tracing::{error, warn};

#[derive(Parser)]
#[command(name = "props_scraper")]
#[command(about = "Player prop odds scraper feeding a shared sheet")]
#[command(version)]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Read sources from saved snapshots in this directory instead of the network
    #[arg(long, global = true)]
    snapshot_dir: Option<PathBuf>,

    /// Print the resulting tables instead of publishing them
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape the per-prop odds tables and replace the odds sheet
    Tables,
    /// Pull the projections API and replace the projections sheet
    Projections,
    /// Run both pipelines sequentially
    Run,
}

async fn run_tables(config: &Config, dry_run: bool) -> anyhow::Result<()> {
    let fetcher = fetcher_for(&config.fetch)?;
    let publisher = publisher_for(&config.tables.output, dry_run)?;
    let pipeline = TablePipeline::from_config(&config.tables)?;

    let report = pipeline.run(&config.tables.sources, fetcher.as_ref(), publisher.as_ref()).await?;
    print_table_report(&report);
    Ok(())
}

async fn run_projections(config: &Config, dry_run: bool) -> anyhow::Result<()> {
    let fetcher = fetcher_for(&config.fetch)?;
    let publisher = publisher_for(&config.projections.output, dry_run)?;
    let pipeline = ProjectionPipeline::from_config(&config.projections);

    let report = pipeline.run(fetcher.as_ref(), publisher.as_ref()).await?;
    print_projection_report(&report);
    Ok(())
}

fn print_table_report(report: &TableRunReport) {
    eprintln!("\n📊 Table pipeline results:");
    eprintln!("   Sources used: {}/{}", report.sources_used.len(), report.sources_total);
    eprintln!("   Rows merged: {}", report.rows_merged);
    eprintln!("   Rows dropped (no away side): {}", report.rows_dropped);
    eprintln!("   Rows published: {} -> {}", report.rows_published, report.destination);
    if report.compound_fallback {
        eprintln!("   ⚠️  Compound column chosen by fallback: {:?}", report.compound_columns);
    }
    if !report.sources_skipped.is_empty() {
        eprintln!("\n⚠️  Skipped sources:");
        for skipped in &report.sources_skipped {
            eprintln!("   - {}: {}", skipped.source_id, skipped.reason);
        }
    }
}

fn print_projection_report(report: &ProjectionRunReport) {
    eprintln!("\n📊 Projections pipeline results:");
    eprintln!("   Players indexed: {}", report.players_indexed);
    eprintln!("   Projections: {} ({} without a known player)", report.projections_total, report.unknown_players);
    eprintln!("   Rows published: {} -> {}", report.rows_published, report.destination);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let _log_guard = logging::init_logging();
    let metrics = match telemetry::init_metrics() {
        Ok(handle) => Some(handle),
        Err(e) => {
            warn!("Continuing without metrics: {}", e);
            None
        }
    };

    let cli = Cli::parse();
    let mut config = Config::load(&cli.config)?;
    if let Some(dir) = cli.snapshot_dir {
        config.fetch.snapshot_dir = Some(dir);
    }

    let outcome = run_command(&cli.command, &config, cli.dry_run).await;

    if let (Some(handle), Some(path)) = (&metrics, &config.metrics.textfile) {
        if let Err(e) = telemetry::write_textfile(handle, path).await {
            warn!("Failed to write metrics to {}: {}", path.display(), e);
        }
    }

    outcome?;
    eprintln!("🎉 Done");
    Ok(())
}

async fn run_command(command: &Commands, config: &Config, dry_run: bool) -> anyhow::Result<()> {
    match command {
        Commands::Tables => {
            eprintln!("🔄 Running table pipeline...");
            run_tables(config, dry_run).await?;
        }
        Commands::Projections => {
            eprintln!("🔄 Running projections pipeline...");
            run_projections(config, dry_run).await?;
        }
        Commands::Run => {
            eprintln!("🚀 Running both pipelines...");
            let tables = run_tables(config, dry_run).await;
            if let Err(e) = &tables {
                error!("Table pipeline failed: {}", e);
                eprintln!("❌ Table pipeline failed: {}", e);
            }
            let projections = run_projections(config, dry_run).await;
            if let Err(e) = &projections {
                error!("Projections pipeline failed: {}", e);
                eprintln!("❌ Projections pipeline failed: {}", e);
            }
            tables?;
            projections?;
        }
    }
    Ok(())
}
