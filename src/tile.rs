//! Tiles and the image crop each one shows.

use serde::{Deserialize, Serialize};

/// A piece of the picture. Its identity is the slot it occupies when solved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tile {
    home: usize,
}

impl Tile {
    /// Creates the tile whose solved slot is `home`.
    pub fn new(home: usize) -> Self {
        Self { home }
    }

    /// The slot this tile occupies in the solved arrangement.
    pub fn home(&self) -> usize {
        self.home
    }

    /// Row and column of the home slot on a `size`-wide grid.
    pub fn home_row_col(&self, size: usize) -> (usize, usize) {
        (self.home / size, self.home % size)
    }

    /// The part of the source image this tile shows on a `size`×`size` grid.
    ///
    /// For display only. Solved detection compares home indices, never crops.
    pub fn crop(&self, size: usize) -> Crop {
        let (row, col) = self.home_row_col(size);
        let side = 1.0 / size as f64;
        Crop {
            x: col as f64 * side,
            y: row as f64 * side,
            width: side,
            height: side,
        }
    }
}

/// Rectangle of the source image, in fractions of its width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Crop {
    /// CSS-style `background-position` percentages for a `size`×`size` sprite sheet.
    ///
    /// A single-column sheet has nowhere to move, so it sits at `(0, 0)`.
    pub fn background_position(&self, size: usize) -> (f64, f64) {
        if size < 2 {
            return (0.0, 0.0);
        }
        let steps = (size - 1) as f64;
        let col = (self.x * size as f64).round();
        let row = (self.y * size as f64).round();
        (col / steps * 100.0, row / steps * 100.0)
    }
}
