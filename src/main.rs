// Entry point for the image compressor CLI.
// The library in lib.rs holds everything except argument parsing and output.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use image_compressor_lib::commands::{DEFAULT_SAVE_STAGGER, save_all, select_paths};
use image_compressor_lib::core::{AcceptPolicy, DEFAULT_MAX_DIMENSION, ProgressType};
use image_compressor_lib::processing::{BatchConfig, BatchSummary};
use image_compressor_lib::utils::format_file_size;
use image_compressor_lib::{JsonFileStore, OutputImage, Session, TargetFormat};

#[derive(Parser, Debug)]
#[command(name = "image-compressor", version)]
#[command(about = "Resize and re-encode images to shrink them")]
struct Cli {
    /// Settings file holding the persisted quality and format
    #[arg(long, global = true, default_value = ".image-compressor.json")]
    settings: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compress images and write `compressed_<name>` copies.
    Compress(CompressArgs),
    /// Show, and optionally update, the persisted settings.
    Settings(SettingsArgs),
}

#[derive(Args, Debug)]
struct SettingOverrides {
    /// Quality 0-100 (saved for later runs)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
    quality: Option<u8>,

    /// Output MIME type, e.g. image/webp, or "original" (saved for later runs)
    #[arg(short, long)]
    format: Option<TargetFormat>,
}

#[derive(Parser, Debug)]
struct CompressArgs {
    /// Images to compress
    #[arg(required = true)]
    files: Vec<PathBuf>,

    #[command(flatten)]
    overrides: SettingOverrides,

    /// Longest output side in pixels
    #[arg(long, default_value_t = DEFAULT_MAX_DIMENSION)]
    max_dimension: u32,

    /// Skip inputs larger than this many MiB
    #[arg(long, default_value_t = 10)]
    max_size_mb: u64,

    /// Directory for the compressed copies
    #[arg(short, long, default_value = "compressed")]
    out_dir: PathBuf,

    /// Give up on a single image after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Pause between saved files, in milliseconds
    #[arg(long, default_value_t = DEFAULT_SAVE_STAGGER.as_millis() as u64)]
    stagger_ms: u64,
}

#[derive(Parser, Debug)]
struct SettingsArgs {
    #[command(flatten)]
    overrides: SettingOverrides,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();
    let store = JsonFileStore::open(&cli.settings)
        .with_context(|| format!("opening settings at {}", cli.settings.display()))?;

    match cli.cmd {
        Command::Compress(args) => {
            let mut session = Session::new(store)
                .with_policy(AcceptPolicy {
                    max_size_bytes: mib_to_bytes(args.max_size_mb),
                    ..AcceptPolicy::default()
                })
                .with_batch_config(BatchConfig { item_timeout: args.timeout_secs.map(Duration::from_secs) })
                .with_max_dimension(args.max_dimension);
            compress(&mut session, args).await
        }
        Command::Settings(args) => {
            let mut session = Session::new(store);
            apply_overrides(&mut session, &args.overrides)?;
            let settings = session.settings();
            println!("quality: {}", settings.quality);
            println!("format:  {}", settings.format);
            Ok(())
        }
    }
}

fn mib_to_bytes(mib: u64) -> u64 {
    mib.saturating_mul(1024 * 1024)
}

fn apply_overrides(session: &mut Session<JsonFileStore>, overrides: &SettingOverrides) -> Result<()> {
    if let Some(quality) = overrides.quality {
        session.set_quality(quality).context("saving quality")?;
    }
    if let Some(format) = overrides.format {
        session.set_format(format).context("saving format")?;
    }
    Ok(())
}

async fn compress(session: &mut Session<JsonFileStore>, args: CompressArgs) -> Result<()> {
    apply_overrides(session, &args.overrides)?;

    let outcome = select_paths(session, args.files.as_slice()).await;
    for rejection in &outcome.rejected {
        eprintln!("skipped {}: {}", rejection.candidate.name, rejection.reason);
    }
    if session.selection().is_empty() {
        anyhow::bail!("no images to compress");
    }

    let items = session
        .compress_all(None, |progress| {
            if progress.progress_type != ProgressType::Start {
                info!("{} ({}/{})", progress.status, progress.completed_tasks, progress.total_tasks);
            }
        })
        .await?;

    for item in &items {
        match &item.result {
            Ok(output) => println!(
                "{}: {} -> {} ({}%), {}x{}",
                item.input.name,
                format_file_size(output.original_size_bytes),
                format_file_size(output.compressed_size_bytes),
                output.reduction_percent,
                output.width,
                output.height
            ),
            Err(e) => println!("{}: failed: {}", item.input.name, e),
        }
    }

    let outputs: Vec<&OutputImage> = items.iter().filter_map(|item| item.result.as_ref().ok()).collect();
    for saved in save_all(&outputs, &args.out_dir, Duration::from_millis(args.stagger_ms)).await {
        if let Err(e) = saved {
            eprintln!("save failed: {e}");
        }
    }

    let summary = BatchSummary::from_items(&items);
    println!(
        "{} of {} compressed, {} total ({}% smaller), saved to {}",
        summary.succeeded,
        summary.total,
        format_file_size(summary.compressed_bytes),
        summary.reduction_percent,
        args.out_dir.display()
    );
    Ok(())
}
