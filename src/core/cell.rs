//! Grid cell
//!
//! A single character cell in the screen grid. Cells remember the position
//! they were last written at; the grid slot stays authoritative, the stored
//! coordinates exist for inspection and debugging.

/// A single cell in the screen grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The character displayed in this cell
    pub ch: char,
    /// Column this cell was last written at
    pub x: usize,
    /// Row this cell was last written at
    pub y: usize,
}

impl Cell {
    /// Create a cell holding `ch` at the given position
    pub fn new(ch: char, x: usize, y: usize) -> Self {
        Self { ch, x, y }
    }

    /// Create a blank (space) cell at the given position
    pub fn blank(x: usize, y: usize) -> Self {
        Self::new(' ', x, y)
    }

    /// Check if this cell holds a space
    pub fn is_blank(&self) -> bool {
        self.ch == ' '
    }
}
