//! The puzzle engine: board ownership, move legality, move execution and win
//! detection for both the blank-sliding and the free-swap discipline.

use crate::board::Board;
use crate::config::{validate_grid_size, PuzzleConfig};
use crate::error::PuzzleError;
use crate::solver;
use derive_more::Display;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

/// How tiles may move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One slot is blank; tiles next to it (or in line with it) slide into it.
    #[default]
    #[display("sliding")]
    Sliding,
    /// No blank; any two tiles may trade places.
    #[display("swap")]
    Swap,
}

/// Direction a tile travels when it slides into the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Left,
    Down,
    Right,
}

impl Direction {
    /// Every direction, in search order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Offset from the blank to the tile that moves in this direction.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Direction::Up => (1, 0),
            Direction::Left => (0, 1),
            Direction::Down => (-1, 0),
            Direction::Right => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// What became of a move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The board changed and the move counter went up by one.
    Accepted,
    /// Swap mode: the slot is now the pending selection.
    Selected,
    /// Swap mode: the pending selection was clicked again and dropped.
    Cleared,
    /// Illegal move; nothing changed.
    Rejected,
}

impl MoveOutcome {
    /// Whether the board changed.
    pub fn is_accepted(self) -> bool {
        self == MoveOutcome::Accepted
    }
}

/// Lifecycle of a play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No board yet.
    Unconfigured,
    /// Moves are accepted.
    InPlay,
    /// A move completed the picture; moves are rejected until the next shuffle.
    Solved,
}

/// Owns the board and every rule that changes it.
///
/// Collaborators read the board through [`PuzzleEngine::board`] and mutate it only
/// through the move methods.
#[derive(Debug, Clone)]
pub struct PuzzleEngine {
    mode: Mode,
    line_slides: bool,
    shuffle_factor: usize,
    board: Option<Board>,
    blank: Option<usize>,
    selected: Option<usize>,
    moves: u32,
    phase: Phase,
    rng: SmallRng,
}

impl PuzzleEngine {
    /// Creates an engine with no board. Grid size is taken by [`initialize`](Self::initialize).
    #[instrument(skip(config), fields(mode = %config.mode))]
    pub fn new(config: &PuzzleConfig) -> Result<Self, PuzzleError> {
        config.validate_mode()?;
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        Ok(Self {
            mode: config.mode,
            line_slides: config.line_slides,
            shuffle_factor: config.shuffle_factor,
            board: None,
            blank: None,
            selected: None,
            moves: 0,
            phase: Phase::Unconfigured,
            rng,
        })
    }

    /// Creates, initializes and shuffles an engine in one go.
    pub fn start(config: &PuzzleConfig) -> Result<Self, PuzzleError> {
        config.validate()?;
        let mut engine = Self::new(config)?;
        engine.initialize(config.grid_size)?;
        engine.shuffle()?;
        Ok(engine)
    }

    /// Creates an engine in play from an explicit arrangement of home indices
    /// (`None` marks the blank in sliding mode).
    ///
    /// Sliding arrangements must be reachable from the solved state.
    pub fn from_arrangement(
        config: &PuzzleConfig,
        grid_size: usize,
        ids: &[Option<usize>],
    ) -> Result<Self, PuzzleError> {
        validate_grid_size(grid_size)?;
        let mut engine = Self::new(config)?;
        let board = Board::from_ids(grid_size, ids, engine.mode == Mode::Sliding)?;
        if !solver::is_solvable(&board) {
            return Err(PuzzleError::config(
                "arrangement cannot be reached from the solved state",
            ));
        }

        engine.blank = board.blank();
        engine.board = Some(board);
        engine.phase = Phase::InPlay;
        Ok(engine)
    }

    /// Builds the solved arrangement for a `grid_size`×`grid_size` grid and
    /// zeroes the move counter. On error the previous state is kept.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn initialize(&mut self, grid_size: usize) -> Result<(), PuzzleError> {
        validate_grid_size(grid_size)?;

        let board = Board::solved(grid_size, self.mode == Mode::Sliding);
        self.blank = board.blank();
        self.board = Some(board);
        self.selected = None;
        self.moves = 0;
        self.phase = Phase::InPlay;
        debug!(grid_size, "Board initialized");
        Ok(())
    }

    /// Randomizes the board into an unsolved, reachable arrangement and zeroes
    /// the move counter.
    #[instrument(skip(self), fields(mode = %self.mode))]
    pub fn shuffle(&mut self) -> Result<(), PuzzleError> {
        let board = self.board.as_mut().ok_or(PuzzleError::NotInitialized)?;

        match self.mode {
            Mode::Sliding => {
                let steps = self.shuffle_factor.saturating_mul(board.len());
                scramble_by_slides(board, &mut self.rng, steps);
                // A single slide away from solved is never solved.
                while board.is_solved() {
                    scramble_by_slides(board, &mut self.rng, 1);
                }
            }
            Mode::Swap => loop {
                board.cells_mut().shuffle(&mut self.rng);
                if !board.is_solved() {
                    break;
                }
            },
        }

        self.blank = board.blank();
        self.selected = None;
        self.moves = 0;
        self.phase = Phase::InPlay;
        debug!(misplaced = board.misplaced(), "Board shuffled");
        Ok(())
    }

    /// Starts a new round at the current grid size.
    pub fn reset(&mut self) -> Result<(), PuzzleError> {
        let size = self
            .board
            .as_ref()
            .map(Board::size)
            .ok_or(PuzzleError::NotInitialized)?;
        self.initialize(size)?;
        self.shuffle()
    }

    /// Slots a move may currently be applied to, in ascending order.
    ///
    /// Sliding mode: tiles next to the blank, plus every tile in the blank's row
    /// and column when line slides are on. Swap mode: every slot. Empty before
    /// initialization and once solved.
    pub fn legal_targets(&self) -> Vec<usize> {
        let Some(board) = &self.board else {
            return Vec::new();
        };
        if self.phase == Phase::Solved {
            return Vec::new();
        }

        match (self.mode, self.blank) {
            (Mode::Swap, _) => (0..board.len()).collect(),
            (Mode::Sliding, None) => Vec::new(),
            (Mode::Sliding, Some(blank)) => {
                let mut targets: Vec<usize> = if self.line_slides {
                    let (row, col) = board.row_col(blank);
                    (0..board.len())
                        .filter(|&slot| slot != blank)
                        .filter(|&slot| {
                            let (r, c) = board.row_col(slot);
                            r == row || c == col
                        })
                        .collect()
                } else {
                    board.neighbors(blank).collect()
                };
                targets.sort_unstable();
                targets
            }
        }
    }

    /// Applies a click on `slot`.
    ///
    /// Sliding mode slides the clicked tile (and any tiles between it and the
    /// blank) toward the blank. Swap mode selects the slot, or swaps it with the
    /// pending selection, or drops the selection if the same slot is clicked
    /// twice.
    #[instrument(skip(self), fields(mode = %self.mode, moves = self.moves))]
    pub fn attempt_move(&mut self, slot: usize) -> Result<MoveOutcome, PuzzleError> {
        let board = self.board.as_ref().ok_or(PuzzleError::NotInitialized)?;
        board.check_slot(slot)?;

        if self.phase == Phase::Solved {
            trace!("Move after solve rejected");
            return Ok(MoveOutcome::Rejected);
        }

        match self.mode {
            Mode::Sliding => Ok(self.slide(slot)),
            Mode::Swap => Ok(self.select(slot)),
        }
    }

    /// Swaps two slots directly in swap mode.
    #[instrument(skip(self), fields(moves = self.moves))]
    pub fn attempt_swap(&mut self, a: usize, b: usize) -> Result<MoveOutcome, PuzzleError> {
        let board = self.board.as_mut().ok_or(PuzzleError::NotInitialized)?;
        if self.mode != Mode::Swap {
            return Err(PuzzleError::WrongMode { mode: self.mode });
        }
        board.check_slot(a)?;
        board.check_slot(b)?;

        if self.phase == Phase::Solved {
            return Ok(MoveOutcome::Rejected);
        }
        self.selected = None;
        if a == b {
            return Ok(MoveOutcome::Cleared);
        }

        board.swap(a, b);
        self.record_move();
        Ok(MoveOutcome::Accepted)
    }

    /// Slides the tile next to the blank in direction `dir` into the blank.
    /// Keyboard input; always rejected in swap mode.
    #[instrument(skip(self))]
    pub fn move_direction(&mut self, dir: Direction) -> Result<MoveOutcome, PuzzleError> {
        let board = self.board.as_ref().ok_or(PuzzleError::NotInitialized)?;

        let source = match (self.mode, self.blank) {
            (Mode::Sliding, Some(blank)) => board.offset(blank, dir.as_offset()),
            _ => None,
        };
        match source {
            Some(slot) => self.attempt_move(slot),
            None => {
                trace!("No tile to slide");
                Ok(MoveOutcome::Rejected)
            }
        }
    }

    /// Next slide of a shortest solution, or `None` if the board is solved.
    #[instrument(skip(self))]
    pub fn hint(&self) -> Result<Option<Direction>, PuzzleError> {
        let board = self.board.as_ref().ok_or(PuzzleError::NotInitialized)?;
        if self.mode != Mode::Sliding {
            return Err(PuzzleError::WrongMode { mode: self.mode });
        }
        if board.is_solved() {
            return Ok(None);
        }

        let path = solver::solve(board, solver::DEFAULT_NODE_LIMIT)?;
        Ok(path.first().copied())
    }

    /// True iff every tile is home (and the blank, if any, is in the last slot).
    pub fn is_solved(&self) -> bool {
        self.board.as_ref().is_some_and(Board::is_solved)
    }

    /// Accepted moves since the last initialize or shuffle.
    pub fn move_count(&self) -> u32 {
        self.moves
    }

    /// Read-only view of the arrangement.
    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn line_slides(&self) -> bool {
        self.line_slides
    }

    /// Grid width, once initialized.
    pub fn grid_size(&self) -> Option<usize> {
        self.board.as_ref().map(Board::size)
    }

    /// Slot holding the blank, in sliding mode.
    pub fn blank(&self) -> Option<usize> {
        self.blank
    }

    /// Pending swap-mode selection.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Number of picture tiles on the board.
    pub fn tile_count(&self) -> usize {
        self.board
            .as_ref()
            .map_or(0, |board| board.cells().iter().flatten().count())
    }

    fn slide(&mut self, slot: usize) -> MoveOutcome {
        let Some(blank) = self.blank else {
            return MoveOutcome::Rejected;
        };
        if !self.legal_targets().contains(&slot) {
            debug!(slot, blank, "Slide rejected");
            return MoveOutcome::Rejected;
        }
        let Some(board) = self.board.as_mut() else {
            return MoveOutcome::Rejected;
        };

        board.shift_line(slot, blank);
        self.blank = Some(slot);
        trace!(slot, blank, "Slide accepted");
        self.record_move();
        MoveOutcome::Accepted
    }

    fn select(&mut self, slot: usize) -> MoveOutcome {
        match self.selected {
            None => {
                self.selected = Some(slot);
                MoveOutcome::Selected
            }
            Some(pending) if pending == slot => {
                self.selected = None;
                MoveOutcome::Cleared
            }
            Some(pending) => {
                let Some(board) = self.board.as_mut() else {
                    return MoveOutcome::Rejected;
                };
                board.swap(pending, slot);
                self.selected = None;
                trace!(a = pending, b = slot, "Swap accepted");
                self.record_move();
                MoveOutcome::Accepted
            }
        }
    }

    fn record_move(&mut self) {
        self.moves += 1;
        if self.is_solved() {
            self.phase = Phase::Solved;
            info!(moves = self.moves, "Puzzle solved");
        }
    }
}

/// Random walk of the blank from its current slot, never stepping straight
/// back when another neighbour is available.
fn scramble_by_slides(board: &mut Board, rng: &mut SmallRng, steps: usize) {
    let Some(mut blank) = board.blank() else {
        return;
    };
    let mut previous = None;

    for _ in 0..steps {
        let mut options: Vec<usize> = board
            .neighbors(blank)
            .filter(|&slot| Some(slot) != previous)
            .collect();
        if options.is_empty() {
            options = board.neighbors(blank).collect();
        }
        let Some(&pick) = options.choose(rng) else {
            break;
        };

        board.swap(blank, pick);
        previous = Some(blank);
        blank = pick;
    }
}
