//! # Tile puzzle engine
//!
//! Slices a picture into a square grid of tiles, shuffles them and lets a
//! player restore it, either by sliding tiles into a blank or by swapping any
//! two tiles. Rendering is left to the caller: it reads the [`Board`] and
//! forwards clicks and key presses to the [`PuzzleEngine`].
//!
//! ```rust
//! use tile_puzzle::{MoveOutcome, PuzzleConfig, PuzzleEngine};
//!
//! let mut engine = PuzzleEngine::new(&PuzzleConfig::sliding(3).with_seed(42)).unwrap();
//! engine.initialize(3).unwrap();
//! assert!(engine.is_solved());
//!
//! // Slot 7 sits next to the blank in slot 8.
//! assert_eq!(engine.attempt_move(7).unwrap(), MoveOutcome::Accepted);
//! assert_eq!(engine.move_count(), 1);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod puzzle;
pub mod solver;
pub mod tile;

pub use board::Board;
pub use config::PuzzleConfig;
pub use error::{ConfigError, PuzzleError, SolveError};
pub use puzzle::{Direction, Mode, MoveOutcome, Phase, PuzzleEngine};
pub use tile::{Crop, Tile};
