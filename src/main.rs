use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use waitwatch::preview::{self, DEFAULT_PREVIEW_ROWS};
use waitwatch::{
    logging, Collector, CollectorConfig, HttpSource, Overrides, Preset, RunReport, SystemClock,
    XlsxSink,
};

#[derive(Parser, Debug)]
#[command(name = "waitwatch")]
#[command(about = "Collect hospital ER wait times on a schedule into a spreadsheet")]
struct Args {
    /// Path to a configuration file (TOML, JSON or YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Endpoint returning a JSON object of hospital name to wait time
    #[arg(short, long)]
    url: Option<String>,

    /// Spreadsheet to write (rewritten after every successful cycle)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Total collection time (e.g., "72h", "90m")
    #[arg(short, long)]
    duration: Option<String>,

    /// Time between collections (e.g., "30m", "300s")
    #[arg(short, long)]
    interval: Option<String>,

    /// Per-request timeout (e.g., "10s")
    #[arg(long)]
    timeout: Option<String>,

    /// Quick demonstration: two snapshots five minutes apart
    #[arg(long)]
    demo: bool,

    /// Rows to print after the run (0 disables the preview)
    #[arg(long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    preview: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn preset(&self) -> Preset {
        if self.demo {
            Preset::Demo
        } else {
            Preset::Full
        }
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            url: self.url.clone(),
            output: self.output.clone(),
            duration: self.duration.clone(),
            interval: self.interval.clone(),
            timeout: self.timeout.clone(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose)?;

    let overrides = args.overrides();
    let config = CollectorConfig::load(args.config.as_deref(), args.preset(), &overrides)
        .context("invalid configuration")?;

    // One thread: cycles run strictly in sequence and nothing else runs during the sleep.
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let report = rt.block_on(collect(&config))?;

    if let Some(table) = preview::render(&report.dataset, args.preview) {
        println!("\nSample data preview:");
        print!("{}", table);
    }

    Ok(())
}

/// Run the collector against the configured endpoint and spreadsheet
async fn collect(config: &CollectorConfig) -> Result<RunReport> {
    let source = HttpSource::builder()
        .endpoint(&config.url)
        .timeout(config.timeout)
        .build()?;
    let sink = XlsxSink::new(&config.output);

    let report = Collector::new(config.schedule(), source, sink, SystemClock)
        .run()
        .await
        .with_context(|| format!("failed to save data to {}", config.output.display()))?;

    Ok(report)
}
