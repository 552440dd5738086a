use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use kibitz_core::{Position, STARTING_FEN};
use kibitz_explain::{Adjustments, ExplainConfig, GridMode, explain};
use kibitz_model::{Device, Network, Topology};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Explain a position evaluation square by square.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Serialized model parameters
    #[arg(long, default_value = "models/eval_net.bin")]
    weights: PathBuf,

    /// Position to analyze
    #[arg(long, default_value = STARTING_FEN)]
    fen: String,

    /// Processing device: auto, cpu or accelerator
    #[arg(long, default_value_t = Device::Auto)]
    device: Device,

    /// Compute and print the effect of removing each non-king piece
    #[arg(long)]
    with_delta: bool,

    /// First trunk hidden size
    #[arg(long, default_value_t = 512)]
    h1: usize,

    /// Second trunk hidden size
    #[arg(long, default_value_t = 256)]
    h2: usize,

    /// Third trunk hidden size
    #[arg(long, default_value_t = 128)]
    h3: usize,

    /// Hidden size of the global head
    #[arg(long, default_value_t = 128)]
    h_global: usize,

    /// Dropout rate the model was trained with; must be in [0, 1)
    #[arg(long, default_value_t = 0.1)]
    dropout: f32,

    /// Divide each attribution by its piece's nominal value
    #[arg(long)]
    normalize: bool,

    /// Multiply each attribution by its piece's nominal value
    #[arg(long)]
    scale_piece: bool,

    /// Nominal value overrides, e.g. "P:1,N:3.2"
    #[arg(long, default_value = "")]
    piece_nominals: String,

    /// Print a bordered grid with pieces and values
    #[arg(long)]
    fancy: bool,

    /// Values shown in the bordered grid: contrib or delta
    #[arg(long, default_value_t = GridMode::Contribution)]
    grid_mode: GridMode,
}

impl Args {
    fn topology(&self) -> Topology {
        Topology {
            h1: self.h1,
            h2: self.h2,
            h3: self.h3,
            h_global: self.h_global,
            dropout: self.dropout,
        }
    }

    fn explain_config(&self) -> ExplainConfig {
        ExplainConfig {
            adjustments: Adjustments {
                normalize: self.normalize,
                scale_piece: self.scale_piece,
            },
            piece_values: self.piece_nominals.clone(),
            with_delta: self.with_delta,
            fancy: self.fancy,
            grid_mode: self.grid_mode,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let position: Position = args
        .fen
        .parse()
        .with_context(|| format!("invalid FEN \"{}\"", args.fen))?;

    let device = args.device.resolve()?;
    info!(%device, "using device");

    let network = Network::load(&args.weights, args.topology())
        .with_context(|| format!("failed to load weights from {}", args.weights.display()))?;

    let report = explain(&network, &position, &args.explain_config())?;
    print!("{report}");
    Ok(())
}
