//! Game configuration, loadable from a TOML file.

use crate::error::{ConfigError, PuzzleError};
use crate::puzzle::Mode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Smallest playable grid.
pub const MIN_GRID_SIZE: usize = 2;

/// Largest accepted `shuffle_factor`.
pub const MAX_SHUFFLE_FACTOR: usize = 1000;

/// Settings for one play session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PuzzleConfig {
    /// Tiles per row and column.
    pub grid_size: usize,
    /// Move discipline.
    pub mode: Mode,
    /// Whether a click may slide a whole run of tiles toward the blank.
    pub line_slides: bool,
    /// Random shuffle moves per slot in sliding mode.
    pub shuffle_factor: usize,
    /// Fixed RNG seed for reproducible shuffles.
    pub seed: Option<u64>,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            grid_size: 3,
            mode: Mode::Sliding,
            line_slides: true,
            shuffle_factor: 12,
            seed: None,
        }
    }
}

impl PuzzleConfig {
    /// Sliding-mode config with the given grid size.
    pub fn sliding(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Self::default()
        }
    }

    /// Free-swap config with the given grid size.
    pub fn swap(grid_size: usize) -> Self {
        Self {
            grid_size,
            mode: Mode::Swap,
            line_slides: false,
            ..Self::default()
        }
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the grid size and that the mode parameters agree.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        validate_grid_size(self.grid_size)?;
        self.validate_mode()
    }

    /// Checks the mode parameters alone.
    pub(crate) fn validate_mode(&self) -> Result<(), PuzzleError> {
        if self.mode == Mode::Swap && self.line_slides {
            return Err(PuzzleError::config("line slides need a blank; swap mode has none"));
        }
        if !(1..=MAX_SHUFFLE_FACTOR).contains(&self.shuffle_factor) {
            return Err(PuzzleError::config(format!(
                "shuffle_factor must be between 1 and {MAX_SHUFFLE_FACTOR}, got {}",
                self.shuffle_factor
            )));
        }
        Ok(())
    }

    /// Loads configuration from TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(grid_size = config.grid_size, mode = %config.mode, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

pub(crate) fn validate_grid_size(grid_size: usize) -> Result<(), PuzzleError> {
    if grid_size < MIN_GRID_SIZE {
        return Err(PuzzleError::config(format!(
            "grid size must be at least {MIN_GRID_SIZE}, got {grid_size}"
        )));
    }
    Ok(())
}
