//! Solvability check and an IDA* solver for boards with a blank.

use crate::board::Board;
use crate::error::SolveError;
use crate::puzzle::Direction;
use tracing::{debug, instrument};

/// Node budget used for hints.
pub const DEFAULT_NODE_LIMIT: usize = 2_000_000;

/// Whether `board` can be reached from the solved arrangement by sliding.
///
/// Boards without a blank are free-swap boards; every permutation is reachable.
pub fn is_solvable(board: &Board) -> bool {
    let Some(blank) = board.blank() else {
        return true;
    };
    let inversions = count_inversions(board);
    let (blank_row, _) = board.row_col(blank);

    if board.size() % 2 == 1 {
        // Odd width: solvable if inversions count is even
        inversions % 2 == 0
    } else {
        // Even width: solvable if (inversions + blank row) is odd
        (inversions + blank_row) % 2 == 1
    }
}

fn count_inversions(board: &Board) -> usize {
    let homes: Vec<usize> = board.cells().iter().flatten().map(|t| t.home()).collect();
    homes
        .iter()
        .enumerate()
        .map(|(i, &home)| homes[i + 1..].iter().filter(|&&next| next < home).count())
        .sum()
}

/// Finds a shortest sequence of slides that solves `board`.
///
/// Gives up with [`SolveError::LimitExceeded`] after expanding `node_limit` nodes.
#[instrument(skip(board), fields(size = board.size()))]
pub fn solve(board: &Board, node_limit: usize) -> Result<Vec<Direction>, SolveError> {
    let blank = board.blank().ok_or(SolveError::NoBlank)?;
    if !is_solvable(board) {
        return Err(SolveError::Unsolvable);
    }

    let mut search = Search {
        board: board.clone(),
        blank,
        path: Vec::new(),
        expanded: 0,
        limit: node_limit,
    };
    let mut bound = heuristic(board);

    loop {
        match search.descend(0, bound, None)? {
            Bound::Found => {
                debug!(moves = search.path.len(), expanded = search.expanded, "Solved");
                return Ok(search.path);
            }
            Bound::Exceeded(usize::MAX) => return Err(SolveError::Unsolvable),
            Bound::Exceeded(next) => bound = next,
        }
    }
}

enum Bound {
    Found,
    Exceeded(usize),
}

struct Search {
    board: Board,
    blank: usize,
    path: Vec<Direction>,
    expanded: usize,
    limit: usize,
}

impl Search {
    fn descend(
        &mut self,
        g: usize,
        bound: usize,
        last: Option<Direction>,
    ) -> Result<Bound, SolveError> {
        let f = g + heuristic(&self.board);
        if f > bound {
            return Ok(Bound::Exceeded(f));
        }
        if self.board.is_solved() {
            return Ok(Bound::Found);
        }

        self.expanded += 1;
        if self.expanded > self.limit {
            return Err(SolveError::LimitExceeded { limit: self.limit });
        }

        let mut min = usize::MAX;
        for dir in Direction::ALL {
            if last == Some(dir.opposite()) {
                continue;
            }
            let Some(tile) = self.board.offset(self.blank, dir.as_offset()) else {
                continue;
            };

            let blank = self.blank;
            self.board.swap(blank, tile);
            self.blank = tile;
            self.path.push(dir);

            match self.descend(g + 1, bound, Some(dir))? {
                Bound::Found => return Ok(Bound::Found),
                Bound::Exceeded(t) => min = min.min(t),
            }

            self.path.pop();
            self.board.swap(blank, tile);
            self.blank = blank;
        }

        Ok(Bound::Exceeded(min))
    }
}

/// Manhattan distance plus two moves per tile that must leave its line.
pub fn heuristic(board: &Board) -> usize {
    manhattan_distance(board) + 2 * linear_conflicts(board)
}

fn manhattan_distance(board: &Board) -> usize {
    board
        .cells()
        .iter()
        .enumerate()
        .filter_map(|(slot, cell)| cell.map(|tile| (slot, tile)))
        .map(|(slot, tile)| {
            let (row, col) = board.row_col(slot);
            let (home_row, home_col) = tile.home_row_col(board.size());
            row.abs_diff(home_row) + col.abs_diff(home_col)
        })
        .sum()
}

fn linear_conflicts(board: &Board) -> usize {
    let size = board.size();
    let mut conflicts = 0;

    for line in 0..size {
        // Row conflicts
        let in_row: Vec<usize> = (0..size)
            .filter_map(|col| board.tile_at(line * size + col))
            .filter(|tile| tile.home_row_col(size).0 == line)
            .map(|tile| tile.home())
            .collect();
        conflicts += in_row.len() - longest_increasing(&in_row);

        // Column conflicts
        let in_col: Vec<usize> = (0..size)
            .filter_map(|row| board.tile_at(row * size + line))
            .filter(|tile| tile.home_row_col(size).1 == line)
            .map(|tile| tile.home())
            .collect();
        conflicts += in_col.len() - longest_increasing(&in_col);
    }

    conflicts
}

fn longest_increasing(values: &[usize]) -> usize {
    let mut best = vec![1; values.len()];
    for i in 0..values.len() {
        for j in 0..i {
            if values[j] < values[i] {
                best[i] = best[i].max(best[j] + 1);
            }
        }
    }
    best.into_iter().max().unwrap_or(0)
}
