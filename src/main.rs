mod models;
mod service;
mod utils;

use crate::models::config::{setup_config, Config};
use crate::models::error::SelectError;
use crate::models::run_mode::RunMode;
use crate::service::copy::copy_files;
use crate::service::select::last_n_full_backups;
use crate::utils::progress::{create_copy_progress_bar, format_bytes};
use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dup-select")]
#[command(about = "Returns the files of the last n full duplicity backups", long_about = None)]
struct Cli {
    /// Directory to scan
    directory: PathBuf,

    /// Number of full backups [default: 2]
    #[arg(long = "nr")]
    nr: Option<usize>,

    #[arg(short = 'c', long = "config", env = "DUPSELECT_CONFIG")]
    config_file: Option<String>,

    /// Copy the selected files into this directory
    #[arg(short = 'd', long = "destination")]
    destination: Option<PathBuf>,

    /// Only log what the copy would do
    #[arg(long = "dry-run")]
    dry_run: bool,

    #[arg(long = "overwrite")]
    overwrite: bool,

    #[arg(
        short = 'l',
        long = "log-level",
        default_value = "warn",
        env = "LOG_LEVEL"
    )]
    log_level: String,

    #[arg(short = 'q', long = "quiet")]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let log_level = match args.log_level.to_lowercase().as_str() {
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => log::LevelFilter::Warn,
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp_secs()
        .init();

    let config = load_config(&args)?;

    let nr_full = args.nr.unwrap_or(config.nr_full);
    let mut selected = last_n_full_backups(&args.directory, nr_full)
        .with_context(|| format!("Failed to select backups in {}", args.directory.display()))?;
    selected.sort();

    for name in &selected {
        println!("{}", name);
    }

    let destination = args
        .destination
        .clone()
        .or_else(|| config.destination.as_ref().map(PathBuf::from));
    let run_mode = RunMode::from_flags(destination.is_some(), args.dry_run);

    match destination {
        Some(destination) if run_mode.wants_copy() => run_copy(
            &args,
            &config,
            &destination,
            &selected,
            run_mode,
        ),
        _ => Ok(()),
    }
}

/// Checks the scanned directory first so a bad path is reported even when
/// the config file is broken too
fn load_config(args: &Cli) -> Result<Config> {
    if !args.directory.is_dir() {
        return Err(SelectError::InvalidDirectory {
            path: args.directory.clone(),
        }
        .into());
    }

    let config: Config =
        setup_config(args.config_file.as_deref()).context("Failed to load configuration")?;
    debug!("Loaded config: {:?}", &config);
    Ok(config)
}

fn run_copy(
    args: &Cli,
    config: &Config,
    destination: &Path,
    selected: &[String],
    run_mode: RunMode,
) -> Result<()> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.max_threads)
        .build_global()
        .map_err(SelectError::from)
        .context("Failed to build thread pool")?;

    let progress = if args.quiet {
        None
    } else {
        Some(create_copy_progress_bar(
            selected.len() as u64,
            &format!("{}Copying to {}", run_mode.progress_prefix(), destination.display()),
        ))
    };

    let summary = copy_files(
        &args.directory,
        destination,
        selected,
        run_mode,
        args.overwrite || config.overwrite_existing,
        progress.as_ref(),
    )
    .with_context(|| format!("Failed to copy backups to {}", destination.display()))?;

    if let Some(progress) = progress {
        progress.finish_and_clear();
    }

    if run_mode.is_dry_run() {
        info!(
            "DRY RUN completed - {} files would be considered, nothing was copied",
            selected.len()
        );
    } else {
        info!(
            "Copied {} files ({}), skipped {}",
            summary.copied,
            format_bytes(summary.bytes),
            summary.skipped
        );
    }
    Ok(())
}
