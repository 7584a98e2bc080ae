//! Command-line interface for the terminal puzzle.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tile_puzzle::{Mode, PuzzleConfig};

#[derive(Parser, Debug)]
#[command(name = "tile-puzzle")]
#[command(version, about = "Slide or swap tiles until the picture is whole again")]
pub struct Args {
    /// TOML file with default settings
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Tiles per row and column
    #[arg(short, long)]
    pub size: Option<usize>,

    /// Move discipline
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Only tiles next to the blank may move
    #[arg(long)]
    pub no_line_slides: bool,

    /// Random seed for reproducible shuffles
    #[arg(long)]
    pub seed: Option<u64>,

    /// Shuffle, solve and replay the solution instead of playing
    #[arg(long)]
    pub demo: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Slide tiles into the blank
    Sliding,
    /// Swap any two tiles
    Swap,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Sliding => Mode::Sliding,
            ModeArg::Swap => Mode::Swap,
        }
    }
}

impl Args {
    /// Config file values overridden by command-line flags.
    pub fn puzzle_config(&self) -> Result<PuzzleConfig> {
        let mut config = match &self.config {
            Some(path) => PuzzleConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => PuzzleConfig::default(),
        };

        if let Some(size) = self.size {
            config.grid_size = size;
        }
        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        if self.no_line_slides || config.mode == Mode::Swap {
            config.line_slides = false;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }

        config.validate()?;
        Ok(config)
    }
}
