use crate::api;
use crate::config::ProbeConfig;
use crate::log::ActivityLogger;
use crate::tools::report::OutputFormat;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "skuprobe",
    version,
    about = "Walk a product code range and flag delisted or hidden catalog items"
)]
pub struct Cli {
    /// First product code: a prefix followed by the numeric suffix (e.g. ru98000)
    start: String,

    /// Number of consecutive codes to check
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    range: u64,

    /// Width of the zero-padded numeric suffix
    #[arg(long)]
    width: Option<usize>,

    /// Per-request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Pause between codes in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// JSON file overriding URL templates and markers
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Also append the activity log to ~/.skuprobe/activity.log
    #[arg(long)]
    activity_log: bool,
}

impl Cli {
    /// Config file (or defaults) with command line overrides applied.
    pub fn probe_config(&self) -> crate::Result<ProbeConfig> {
        let mut cfg = match &self.config {
            Some(path) => ProbeConfig::load(path)?,
            None => ProbeConfig::default(),
        };
        if let Some(width) = self.width {
            cfg.code_width = width;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            cfg.timeout_ms = timeout_ms;
        }
        if let Some(delay_ms) = self.delay_ms {
            cfg.delay_ms = delay_ms;
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_args(cli)
}

// Exposed function for delegation from other front ends

pub fn run_with_args(cli: Cli) -> anyhow::Result<()> {
    let config = cli.probe_config().context("invalid configuration")?;
    let logger = if cli.activity_log {
        ActivityLogger::with_activity_file().context("failed to open activity log")?
    } else {
        ActivityLogger::stderr()
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create async runtime")?;

    let stdout = std::io::stdout();
    runtime.block_on(api::probe_range(
        &cli.start,
        cli.range,
        &config,
        &logger,
        stdout.lock(),
        cli.format,
    ))?;
    Ok(())
}
