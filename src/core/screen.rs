//! Screen grid implementation
//!
//! The screen is a rectangle of character cells with a logical size and a
//! separately tracked storage capacity. Shrinking is cheap: storage is kept
//! and only the logical size changes, so growing back inside capacity never
//! reallocates. Cells outside the logical rectangle are unreachable through
//! the public API and every cell the rectangle newly exposes starts blank.
//!
//! Rendering produces one deterministic frame: a home-cursor escape followed
//! by the rows of the logical rectangle joined with CRLF.

use thiserror::Error;

use super::cell::Cell;

/// Escape sequence that moves the cursor to the top-left corner, emitted
/// before every rendered frame.
pub const CURSOR_HOME: &str = "\x1b[0;0H";

/// Error type for screen operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScreenError {
    /// The targeted cell lies outside the logical screen rectangle
    #[error("Cell ({x}, {y}) is out of bounds")]
    OutOfBounds { x: usize, y: usize },
}

/// A 2-D grid of character cells
#[derive(Debug, Clone)]
pub struct Screen {
    /// Logical width in columns
    width: usize,
    /// Logical height in rows
    height: usize,
    /// Allocated width in columns (never shrinks)
    cap_width: usize,
    /// Allocated height in rows (never shrinks)
    cap_height: usize,
    /// Cell storage, `cap_height` rows of `cap_width` cells each
    cells: Vec<Vec<Cell>>,
}

impl Screen {
    /// Create a new screen with every cell blank
    pub fn new(width: usize, height: usize) -> Self {
        let cells = (0..height)
            .map(|y| (0..width).map(|x| Cell::blank(x, y)).collect())
            .collect();

        Self {
            width,
            height,
            cap_width: width,
            cap_height: height,
            cells,
        }
    }

    /// Get the logical width in columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the logical height in rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the allocated storage size as (columns, rows)
    pub fn capacity(&self) -> (usize, usize) {
        (self.cap_width, self.cap_height)
    }

    /// Get the cell at the given position, or `None` outside the logical
    /// rectangle
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(&self.cells[y][x])
    }

    /// Place a character at the given position
    ///
    /// Fails without mutating anything when the position lies outside the
    /// logical rectangle.
    pub fn set_cell(&mut self, x: usize, y: usize, ch: char) -> Result<(), ScreenError> {
        if x >= self.width || y >= self.height {
            return Err(ScreenError::OutOfBounds { x, y });
        }
        self.cells[y][x] = Cell::new(ch, x, y);
        Ok(())
    }

    /// Write `text` left to right along `row`, starting at column `col`
    ///
    /// A negative `col` drops that many leading characters and starts at
    /// column 0. Writing stops silently at the first cell outside the
    /// screen, so text overflowing the right edge is truncated and an
    /// out-of-range `row` draws nothing.
    pub fn set_row(&mut self, col: isize, row: usize, text: &str) {
        let (mut x, chars) = match clip_negative(col, text) {
            Some(clipped) => clipped,
            None => return,
        };

        for ch in chars {
            if self.set_cell(x, row, ch).is_err() {
                return;
            }
            x += 1;
        }
    }

    /// Write `text` top to bottom along column `col`, starting at `row`
    ///
    /// The vertical mirror of [`set_row`](Self::set_row): a negative `row`
    /// drops that many leading characters and starts at row 0, and writing
    /// stops silently at the first cell outside the screen.
    pub fn set_col(&mut self, col: usize, row: isize, text: &str) {
        let (mut y, chars) = match clip_negative(row, text) {
            Some(clipped) => clipped,
            None => return,
        };

        for ch in chars {
            if self.set_cell(col, y, ch).is_err() {
                return;
            }
            y += 1;
        }
    }

    /// Set the logical size to exactly `width` x `height`
    ///
    /// Storage grows when the request exceeds capacity and is otherwise
    /// reused. Cells still inside the new rectangle keep their content;
    /// cells the rectangle newly exposes become blank. Shrinking only
    /// changes the logical size, so it never touches cell content.
    pub fn resize(&mut self, width: usize, height: usize) {
        // Grow column storage across every stored row.
        if width > self.cap_width {
            for (y, row) in self.cells.iter_mut().enumerate() {
                for x in self.cap_width..width {
                    row.push(Cell::blank(x, y));
                }
            }
            self.cap_width = width;
        }

        // Grow row storage.
        if height > self.cap_height {
            for y in self.cap_height..height {
                let row = (0..self.cap_width).map(|x| Cell::blank(x, y)).collect();
                self.cells.push(row);
            }
            self.cap_height = height;
        }

        // Blank the cells the new rectangle exposes. Columns first, on rows
        // that stay visible; then full rows below the old height. Rows
        // between the new and old height need nothing now: a later height
        // grow blanks them across the full width.
        if width > self.width {
            for y in 0..self.height.min(height) {
                for x in self.width..width {
                    self.cells[y][x] = Cell::blank(x, y);
                }
            }
        }
        if height > self.height {
            for y in self.height..height {
                for x in 0..width {
                    self.cells[y][x] = Cell::blank(x, y);
                }
            }
        }

        self.width = width;
        self.height = height;
    }

    /// Reset every cell inside the logical rectangle to blank
    pub fn clear(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                self.cells[y][x] = Cell::blank(x, y);
            }
        }
    }

    /// Render the logical rectangle as one frame
    ///
    /// The frame is [`CURSOR_HOME`] followed by the rows joined with
    /// `"\r\n"`, with no trailing separator. Characters are emitted as
    /// stored, one cell per character.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(CURSOR_HOME.len() + self.height * (self.width + 2));
        out.push_str(CURSOR_HOME);

        for y in 0..self.height {
            if y > 0 {
                out.push_str("\r\n");
            }
            for x in 0..self.width {
                out.push(self.cells[y][x].ch);
            }
        }

        out
    }
}

/// Apply a possibly negative start offset to `text`
///
/// Returns the first on-screen coordinate and the characters left to write,
/// or `None` when the offset clips the entire string.
fn clip_negative(start: isize, text: &str) -> Option<(usize, std::str::Chars<'_>)> {
    let mut chars = text.chars();

    if start >= 0 {
        return Some((start as usize, chars));
    }

    let dropped = start.unsigned_abs();
    chars.nth(dropped - 1)?;
    Some((0, chars))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any in-bounds write reads back and lands at the right offset of
        /// the rendered frame.
        #[test]
        fn in_bounds_write_reads_back(
            w in 1..32usize,
            h in 1..16usize,
            x in 0..32usize,
            y in 0..16usize,
            ch in proptest::char::range('!', '~'),
        ) {
            let x = x % w;
            let y = y % h;
            let mut screen = Screen::new(w, h);
            prop_assert!(screen.set_cell(x, y, ch).is_ok());
            prop_assert_eq!(screen.cell(x, y).map(|c| c.ch), Some(ch));

            let rendered = screen.render();
            let body = &rendered[CURSOR_HOME.len()..];
            let row: Vec<char> = body
                .split("\r\n")
                .nth(y)
                .expect("row present")
                .chars()
                .collect();
            prop_assert_eq!(row[x], ch);
        }

        /// Rendered frames always hold `height` rows of `width` characters.
        #[test]
        fn render_shape_matches_dimensions(
            w in 0..48usize,
            h in 1..24usize,
        ) {
            let screen = Screen::new(w, h);
            let rendered = screen.render();
            prop_assert!(rendered.starts_with(CURSOR_HOME));

            let rows: Vec<&str> = rendered[CURSOR_HOME.len()..].split("\r\n").collect();
            prop_assert_eq!(rows.len(), h);
            for row in rows {
                prop_assert_eq!(row.chars().count(), w);
            }
        }

        /// Out-of-bounds writes never change the frame.
        #[test]
        fn out_of_bounds_write_never_mutates(
            w in 1..16usize,
            h in 1..16usize,
            beyond_x in 0..8usize,
            beyond_y in 0..8usize,
        ) {
            let mut screen = Screen::new(w, h);
            let before = screen.render();
            prop_assert!(screen.set_cell(w + beyond_x, 0, 'x').is_err());
            prop_assert!(screen.set_cell(0, h + beyond_y, 'x').is_err());
            prop_assert_eq!(screen.render(), before);
        }

        /// Growing keeps every previously visible cell in place.
        #[test]
        fn resize_grow_preserves_visible_cells(
            w in 1..16usize,
            h in 1..8usize,
            extra_w in 0..16usize,
            extra_h in 0..8usize,
        ) {
            let mut screen = Screen::new(w, h);
            for y in 0..h {
                for x in 0..w {
                    let ch = char::from(b'a' + ((x + y) % 26) as u8);
                    screen.set_cell(x, y, ch).expect("in bounds");
                }
            }

            screen.resize(w + extra_w, h + extra_h);

            for y in 0..h {
                for x in 0..w {
                    let expected = char::from(b'a' + ((x + y) % 26) as u8);
                    prop_assert_eq!(screen.cell(x, y).map(|c| c.ch), Some(expected));
                }
            }
        }

        /// Capacity only ever grows, whatever the resize sequence.
        #[test]
        fn capacity_never_shrinks(
            sizes in prop::collection::vec((0..32usize, 0..16usize), 1..12),
        ) {
            let mut screen = Screen::new(4, 4);
            let mut max_seen = screen.capacity();
            for (w, h) in sizes {
                screen.resize(w, h);
                let (cw, ch) = screen.capacity();
                prop_assert!(cw >= max_seen.0 && ch >= max_seen.1);
                prop_assert!(cw >= screen.width() && ch >= screen.height());
                max_seen = (cw, ch);
            }
        }
    }
}
