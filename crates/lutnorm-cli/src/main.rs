//! lutnorm - black/white level correction for DDS color LUTs
//!
//! Rewrites tiled 3D LUT textures so black maps to true black and white to
//! true white, keeping each entry's hue.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser};
use std::path::PathBuf;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

mod commands;

#[derive(Parser)]
#[command(name = "lutnorm")]
#[command(author, version, about = "Normalize black and white levels of DDS color LUTs")]
#[command(long_about = "
Corrects tiled 3D LUT textures (DDS, R8G8B8A8_UNORM) whose black level sits
above zero or whose white level falls short of one. Hue is kept; only
lightness and chroma are remapped.

Files that need no correction, use another pixel format, or are on the skip
list (lgt_lut_ui_negative_curve.dds, photomode_*, qc_*) are left alone.

Examples:
  lutnorm --in luts --out fixed          # Correct a directory
  lutnorm --in a.dds --out a_fixed.dds   # Correct one file
  lutnorm --docs                         # Correct the game's LUT folder in place
  lutnorm --in luts --out fixed -n -v    # Report only, with details
")]
struct Cli {
    #[command(flatten)]
    patch: PatchArgs,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, default_value = "0")]
    threads: usize,
}

#[derive(Args)]
struct PatchArgs {
    /// Input file or directory
    #[arg(long = "in", value_name = "PATH", required_unless_present = "docs")]
    input: Option<PathBuf>,

    /// Output file or directory
    #[arg(long = "out", value_name = "PATH", required_unless_present = "docs")]
    output: Option<PathBuf>,

    /// Use the game's LUT folder under Documents as both input and output
    #[arg(long, conflicts_with_all = ["input", "output"])]
    docs: bool,

    /// Correct in memory and report, but write nothing
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Print one JSON record per processed file
    #[arg(long)]
    json: bool,
}

/// Installs the global subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let fmt_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    commands::patch::run(cli.patch)
}
