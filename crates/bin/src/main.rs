//! Hobart CLI binary.
//!
//! Command-line interface for market breadth analysis: fetch closes for
//! a universe, compute the share of symbols above their moving averages,
//! and print or export the report.

mod integration;

use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use hobart_breadth::{BreadthConfig, StockUniverse, compute_breadth_with_diagnostics};
use hobart_data::{YahooCloseProvider, price_store_from_frame};
use hobart_output::{BreadthDashboard, ExportFormat, Exporter};
use indicatif::{ProgressBar, ProgressStyle};
use integration::cache_manager;
use integration::data_pipeline::{FetchConfig, fetch_universe_closes, print_cache_info};
use integration::universe_csv::load_universe_csv;
use std::path::PathBuf;
use std::process;
use std::time::Duration as StdDuration;

#[derive(Parser)]
#[command(name = "hobart")]
#[command(about = "Hobart: market breadth above moving averages", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute breadth above moving averages for a universe
    Breadth {
        /// Universe CSV file with a symbol,sector header
        #[arg(long)]
        universe: PathBuf,

        /// Calendar days of history to fetch
        #[arg(long, default_value = "400")]
        days: i64,

        /// Moving average windows in trading days
        #[arg(long, value_delimiter = ',', default_values_t = [20usize, 50, 200])]
        windows: Vec<usize>,

        /// Minimum observations a symbol needs to be included
        #[arg(long, default_value = "150")]
        min_history: usize,

        /// Disable caching (always fetch fresh data)
        #[arg(long)]
        no_cache: bool,

        /// Force refresh cached data
        #[arg(long)]
        refresh: bool,

        /// Export the report to a .csv or .json file
        #[arg(long)]
        export: Option<PathBuf>,

        /// Print the report as Markdown instead of an ASCII table
        #[arg(long)]
        markdown: bool,
    },

    /// Inspect a universe file
    Universe {
        /// Universe CSV file with a symbol,sector header
        #[arg(long)]
        file: PathBuf,

        /// List sectors with constituent counts
        #[arg(long)]
        list_sectors: bool,

        /// List symbols in one sector
        #[arg(long)]
        sector: Option<String>,
    },

    /// Manage the local close cache
    Cache {
        /// Show cache location and statistics
        #[arg(long)]
        info: bool,

        /// Delete all cached data
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Breadth {
            universe,
            days,
            windows,
            min_history,
            no_cache,
            refresh,
            export,
            markdown,
        } => {
            let fetch_config = FetchConfig {
                use_cache: !no_cache,
                force_refresh: refresh,
            };
            let breadth_config = BreadthConfig::new(windows, min_history);
            run_breadth(
                &universe,
                days,
                breadth_config,
                fetch_config,
                export.as_deref(),
                markdown,
            )
            .await?;
        }
        Commands::Universe {
            file,
            list_sectors,
            sector,
        } => {
            inspect_universe(&file, list_sectors, sector.as_deref())?;
        }
        Commands::Cache { info, clear } => {
            cache_command(info, clear)?;
        }
    }

    Ok(())
}

async fn run_breadth(
    universe_path: &std::path::Path,
    days: i64,
    breadth_config: BreadthConfig,
    fetch_config: FetchConfig,
    export: Option<&std::path::Path>,
    markdown: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    // Fail fast on a bad window set before touching the network.
    breadth_config.validate()?;

    let entries = load_universe_csv(universe_path)?;
    let (universe, diagnostics) = StockUniverse::from_entries(entries);
    if universe.is_empty() {
        return Err("Universe file contains no valid entries".into());
    }

    println!("Universe: {} symbols, {} sectors", universe.len(), universe.sectors().len());
    if diagnostics.dropped() > 0 {
        println!(
            "  Dropped {} invalid and {} duplicate entries",
            diagnostics.invalid_entries, diagnostics.duplicate_symbols
        );
    }

    if fetch_config.use_cache {
        print_cache_info();
        if fetch_config.force_refresh {
            println!("  Mode: Force refresh (re-fetching all data)");
        }
    } else {
        println!("  Cache: Disabled");
    }
    println!();

    let provider = YahooCloseProvider::new()?;
    let end = Utc::now();
    let start = end - Duration::days(days);

    // Progress bar for the fetch, the slow step
    let pb = ProgressBar::new(universe.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template")
            .progress_chars("█▓░"),
    );
    pb.enable_steady_tick(StdDuration::from_millis(100));
    pb.set_message("Fetching close prices...");

    let fetched =
        match fetch_universe_closes(&provider, &universe, start, end, &fetch_config, Some(&pb))
            .await
        {
            Ok(f) => {
                pb.finish_with_message(format!("Fetched {} rows", f.frame.height()));
                f
            }
            Err(e) => {
                pb.finish_with_message("Failed!");
                return Err(format!("Failed to fetch close prices: {}", e).into());
            }
        };

    if !fetched.failures.is_empty() {
        eprintln!(
            "Warning: no data for {} symbol(s): {}",
            fetched.failures.len(),
            fetched.failures.join(", ")
        );
    }

    let prices = price_store_from_frame(&fetched.frame)?;
    let report = compute_breadth_with_diagnostics(&universe, &prices, &breadth_config, diagnostics)?;

    println!();
    let dashboard = BreadthDashboard::new(&report);
    if markdown {
        println!("{}", dashboard.to_markdown());
    } else {
        println!("{}", dashboard.to_ascii_table());
    }

    if !report.diagnostics.excluded_symbols.is_empty() {
        eprintln!(
            "Warning: excluded {} symbol(s) with insufficient history: {}",
            report.diagnostics.excluded_symbols.len(),
            report.diagnostics.excluded_symbols.join(", ")
        );
    }

    if let Some(path) = export {
        let format = ExportFormat::from_path(path)
            .ok_or_else(|| format!("Unsupported export extension: {}", path.display()))?;
        Exporter.export(&report, path, format)?;
        println!("Exported report to {}", path.display());
    }

    Ok(())
}

fn inspect_universe(
    path: &std::path::Path,
    list_sectors: bool,
    sector: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let entries = load_universe_csv(path)?;
    let (universe, diagnostics) = StockUniverse::from_entries(entries);

    if let Some(name) = sector {
        let symbols = universe.symbols_in_sector(name);
        if symbols.is_empty() {
            return Err(format!("Unknown sector: {}", name).into());
        }
        println!("Sector: {}", name);
        println!("Constituents: {}\n", symbols.len());
        for symbol in symbols {
            println!("  {}", symbol);
        }
    } else if list_sectors {
        println!("Sectors:");
        for (sector, count) in universe.sector_counts() {
            println!("  {:30} {:3} symbols", sector, count);
        }
    } else {
        println!("Universe file: {}", path.display());
        println!("  Valid constituents: {}", universe.len());
        println!("  Sectors: {}", universe.sectors().len());
        println!("  Invalid entries dropped: {}", diagnostics.invalid_entries);
        println!("  Duplicate symbols dropped: {}", diagnostics.duplicate_symbols);
    }

    Ok(())
}

fn cache_command(info: bool, clear: bool) -> Result<(), Box<dyn std::error::Error>> {
    if clear {
        let cache = cache_manager::open_cache()?;
        cache.clear()?;
        println!("Cache cleared.");
        return Ok(());
    }

    if info {
        print_cache_info();
    } else {
        println!("Use --info to show cache statistics or --clear to delete cached data.");
    }

    Ok(())
}
