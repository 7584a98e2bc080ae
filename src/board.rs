//! Flat, row-major board of tiles with an optional blank.

use crate::config::validate_grid_size;
use crate::error::PuzzleError;
use crate::tile::Tile;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The arrangement of tiles on a `size`×`size` grid.
///
/// `cells[slot]` holds the tile currently in `slot`, or `None` for the blank.
/// Every tile appears exactly once; boards with a blank have exactly one and
/// its home is the last slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Tile>>,
}

impl Board {
    /// Builds the solved arrangement. With a blank, the last slot is empty.
    ///
    /// `size` must already be validated.
    pub(crate) fn solved(size: usize, with_blank: bool) -> Self {
        let len = size * size;
        let cells = (0..len)
            .map(|slot| {
                if with_blank && slot == len - 1 {
                    None // The empty space
                } else {
                    Some(Tile::new(slot))
                }
            })
            .collect();

        Self { size, cells }
    }

    /// Builds a board from home indices per slot, checking that it holds every
    /// tile exactly once (plus one blank when `with_blank` is set).
    pub fn from_ids(
        size: usize,
        ids: &[Option<usize>],
        with_blank: bool,
    ) -> Result<Self, PuzzleError> {
        validate_grid_size(size)?;
        let len = size * size;
        if ids.len() != len {
            return Err(PuzzleError::config(format!(
                "expected {len} slots for a {size}x{size} grid, got {}",
                ids.len()
            )));
        }

        let tiles = if with_blank { len - 1 } else { len };
        let mut seen = vec![false; tiles];
        let mut blanks = 0;
        for id in ids {
            match *id {
                None => blanks += 1,
                Some(home) if home >= tiles => {
                    return Err(PuzzleError::config(format!(
                        "tile {home} does not exist on a board of {tiles} tiles"
                    )));
                }
                Some(home) if seen[home] => {
                    return Err(PuzzleError::config(format!("tile {home} appears twice")));
                }
                Some(home) => seen[home] = true,
            }
        }

        let expected_blanks = usize::from(with_blank);
        if blanks != expected_blanks {
            return Err(PuzzleError::config(format!(
                "expected {expected_blanks} blank slot(s), found {blanks}"
            )));
        }

        Ok(Self {
            size,
            cells: ids.iter().map(|id| id.map(Tile::new)).collect(),
        })
    }

    /// Width (and height) of the grid.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the board has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All slots in row-major order.
    pub fn cells(&self) -> &[Option<Tile>] {
        &self.cells
    }

    /// Home index per slot, `None` for the blank.
    pub fn ids(&self) -> Vec<Option<usize>> {
        self.cells.iter().map(|cell| cell.map(|t| t.home())).collect()
    }

    /// The tile in `slot`, or `None` for the blank or a slot off the board.
    pub fn tile_at(&self, slot: usize) -> Option<Tile> {
        self.cells.get(slot).copied().flatten()
    }

    /// Whether `slot` holds the blank.
    pub fn is_blank(&self, slot: usize) -> bool {
        matches!(self.cells.get(slot), Some(None))
    }

    /// The slot currently holding the blank, if the board has one.
    pub fn blank(&self) -> Option<usize> {
        self.cells.iter().position(Option::is_none)
    }

    /// Fails with `InvalidArgument` when `slot` is off the board.
    pub fn check_slot(&self, slot: usize) -> Result<(), PuzzleError> {
        if slot < self.len() {
            Ok(())
        } else {
            Err(PuzzleError::InvalidArgument {
                slot,
                len: self.len(),
            })
        }
    }

    /// Row and column of `slot`.
    pub fn row_col(&self, slot: usize) -> (usize, usize) {
        (slot / self.size, slot % self.size)
    }

    /// The slot `(dr, dc)` away from `slot`, if it is on the board.
    pub fn offset(&self, slot: usize, (dr, dc): (isize, isize)) -> Option<usize> {
        let (row, col) = self.row_col(slot);
        let new_row = row as isize + dr;
        let new_col = col as isize + dc;
        let size = self.size as isize;

        if new_row >= 0 && new_row < size && new_col >= 0 && new_col < size {
            Some(new_row as usize * self.size + new_col as usize)
        } else {
            None
        }
    }

    /// Orthogonal neighbours of `slot`.
    pub fn neighbors(&self, slot: usize) -> impl Iterator<Item = usize> + '_ {
        [(-1, 0), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(move |delta| self.offset(slot, delta))
    }

    /// True when every tile sits in its home slot and any blank is in the last slot.
    pub fn is_solved(&self) -> bool {
        let last = self.len().saturating_sub(1);
        self.cells.iter().enumerate().all(|(slot, cell)| match cell {
            Some(tile) => tile.home() == slot,
            None => slot == last,
        })
    }

    /// Number of slots whose contents differ from the solved arrangement.
    pub fn misplaced(&self) -> usize {
        let last = self.len().saturating_sub(1);
        self.cells
            .iter()
            .enumerate()
            .filter(|(slot, cell)| match cell {
                Some(tile) => tile.home() != *slot,
                None => *slot != last,
            })
            .count()
    }

    pub(crate) fn swap(&mut self, a: usize, b: usize) {
        self.cells.swap(a, b);
    }

    /// Shifts every cell between `from` and the blank at `blank` one step toward
    /// the blank. `from` and `blank` share a row or a column; `from` ends up blank.
    pub(crate) fn shift_line(&mut self, from: usize, blank: usize) {
        let step = if from < blank {
            self.step_between(from, blank)
        } else {
            -self.step_between(blank, from)
        };

        let mut cur = blank as isize;
        while cur != from as isize {
            let next = cur - step;
            self.cells[cur as usize] = self.cells[next as usize];
            cur = next;
        }
        self.cells[from] = None;
    }

    fn step_between(&self, low: usize, high: usize) -> isize {
        if self.row_col(low).0 == self.row_col(high).0 {
            1
        } else {
            self.size as isize
        }
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Option<Tile>] {
        &mut self.cells
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.len().to_string().len();
        for row in self.cells.chunks(self.size.max(1)) {
            for cell in row {
                match cell {
                    Some(tile) => write!(f, "{:>width$} ", tile.home() + 1)?,
                    None => write!(f, "{:>width$} ", ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
