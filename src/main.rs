//! gfharvest - crawl a storage namespace and record an inventory.
//!
//! Usage:
//!   gfharvest [OPTIONS] <ROOT>
//!
//! Every entry under ROOT is listed with its stat metadata (and a checksum
//! when `--checksum-alg` is given). A progress line per entry goes to
//! stdout, and the full harvest is saved as
//! `dcache_files_<tag>.json` in the output directory.

use std::io::{self, Write};
use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tracing_subscriber::EnvFilter;

use gfharvest_core::{CrawlConfig, DEFAULT_MAX_DEPTH};
use gfharvest_crawl::{Crawler, LOCAL_ALGORITHMS, LocalStorage};
use gfharvest_report::{HarvestReport, write_report};

#[derive(Parser)]
#[command(
    name = "gfharvest",
    version,
    about = "Crawl a storage namespace and record a file inventory",
    long_about = "gfharvest walks every directory under ROOT, recording stat metadata \
                  and optional checksums for each entry.\n\n\
                  Listing failures are reported inline and never stop the crawl. \
                  The harvest is written as JSON when the crawl finishes."
)]
struct Cli {
    /// Root path or file:// URL to crawl
    root: String,

    /// Long listing format in the progress stream
    #[arg(short, long)]
    long: bool,

    /// Maximum recursive level
    #[arg(short = 'm', long = "max", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: u32,

    /// Checksum algorithm, e.g. SHA256 (omit or "none" to disable)
    #[arg(short = 'c', long = "checksum-alg")]
    checksum_alg: Option<String>,

    /// Give up on a directory after N read errors in a row (0 = never, the default)
    #[arg(long, value_name = "N", default_value_t = 0)]
    max_read_errors: u32,

    /// Directory the harvest report is written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Do not write a harvest report
    #[arg(long)]
    no_report: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = CrawlConfig::builder()
        .long_format(cli.long)
        .max_depth(cli.max_depth)
        .checksum_algorithm(cli.checksum_alg.as_deref())
        .max_consecutive_read_errors((cli.max_read_errors > 0).then_some(cli.max_read_errors))
        .build()
        .context("Invalid crawl configuration")?;

    if let Some(algorithm) = config.checksum_algorithm() {
        if !LOCAL_ALGORITHMS.iter().any(|a| a.eq_ignore_ascii_case(algorithm)) {
            tracing::warn!(
                algorithm,
                supported = ?LOCAL_ALGORITHMS,
                "checksum algorithm not supported locally, entries will have no checksums"
            );
        }
    }

    let crawler = Crawler::new(LocalStorage::new(), config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let harvest = crawler.crawl(&cli.root, &mut out);
    out.flush().context("Failed to flush progress output")?;
    let finished = Utc::now();

    let report = HarvestReport::new(cli.root.clone(), harvest, finished);
    print_summary(&report);

    if !cli.no_report {
        let path = write_report(&cli.output_dir, &report).context("Failed to write harvest report")?;
        eprintln!("Harvest saved to {}", path.display());
    }

    Ok(())
}

fn setup_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("gfharvest=info,gfharvest_crawl=info,gfharvest_report=info,warn"),
        _ => EnvFilter::new("gfharvest=debug,gfharvest_crawl=debug,gfharvest_report=debug,warn"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Print a short crawl summary to stderr.
fn print_summary(report: &HarvestReport) {
    let harvest = &report.harvest;

    eprintln!();
    eprintln!("{}", "─".repeat(60));
    eprintln!(
        " {} - {}",
        report.url,
        humansize::format_size(harvest.size_so_far(), humansize::BINARY)
    );
    let checksummed = harvest.files().iter().filter(|f| f.has_checksums()).count();
    eprintln!(
        " {} entries ({} with checksums), {} directories listed",
        harvest.file_count(),
        checksummed,
        harvest.errors().len()
    );
    eprintln!(" Crawled in {:.2}s", report.elapsed_seconds);
    eprintln!("{}", "─".repeat(60));

    if harvest.has_warnings() {
        eprintln!("{} failure(s) during crawl", harvest.warnings().len());
    }
}
