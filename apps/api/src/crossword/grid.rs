//! Grid & Letter Index: the mutable board state owned by one generation attempt.
//!
//! The grid is a flat `rows × cols` arena of cells. The letter index maps each letter
//! to every cell currently holding it, tagged with the orientation of the word that put
//! it there. Both are only mutated through `placement::Layout`, which keeps them in sync.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Marker used for empty cells in the serialized grid.
pub const EMPTY_MARKER: char = ' ';

// ────────────────────────────────────────────────────────────────────────────
// Orientation
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Across,
    Down,
}

impl Orientation {
    pub fn from_vertical(vertical: bool) -> Self {
        if vertical {
            Orientation::Down
        } else {
            Orientation::Across
        }
    }

    pub fn is_vertical(self) -> bool {
        self == Orientation::Down
    }

    pub fn perpendicular(self) -> Self {
        match self {
            Orientation::Across => Orientation::Down,
            Orientation::Down => Orientation::Across,
        }
    }

    /// `(row_step, col_step)` for walking one letter along a word.
    pub fn step(self) -> (usize, usize) {
        match self {
            Orientation::Across => (0, 1),
            Orientation::Down => (1, 0),
        }
    }

    /// Cell of the `offset`-th letter of a word starting at `(row, col)`.
    pub fn cell_at(self, row: usize, col: usize, offset: usize) -> (usize, usize) {
        let (dr, dc) = self.step();
        (row + dr * offset, col + dc * offset)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Placed words
// ────────────────────────────────────────────────────────────────────────────

/// One word placed on the grid. `text` is already normalized (trimmed, uppercased).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordSlot {
    pub text: String,
    pub clue: Option<String>,
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

impl WordSlot {
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Every `(row, col, letter)` the word occupies, in reading order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        self.text.chars().enumerate().map(move |(i, letter)| {
            let (r, c) = self.orientation.cell_at(self.row, self.col, i);
            (r, c, letter)
        })
    }

    pub fn covers(&self, row: usize, col: usize) -> bool {
        let len = self.len();
        match self.orientation {
            Orientation::Across => row == self.row && col >= self.col && col < self.col + len,
            Orientation::Down => col == self.col && row >= self.row && row < self.row + len,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Grid
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<char>>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Builds a grid from its serialized row form. Ragged rows are padded with empty cells.
    pub fn from_rows(rows: &[Vec<char>], empty: char) -> Self {
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut grid = Grid::new(rows.len(), cols);
        for (r, row) in rows.iter().enumerate() {
            for (c, &ch) in row.iter().enumerate() {
                if ch != empty {
                    grid.set(r, c, ch);
                }
            }
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }

    /// Letter at `(row, col)`; `None` when the cell is empty or out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        self.index(row, col).and_then(|i| self.cells[i])
    }

    pub fn occupied(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some()
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, letter: char) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = Some(letter);
        }
    }

    pub(crate) fn clear_cell(&mut self, row: usize, col: usize) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = None;
        }
    }

    pub fn reset(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Number of occupied orthogonal neighbors of `(row, col)`.
    pub fn occupied_neighbors(&self, row: usize, col: usize) -> usize {
        let mut count = 0;
        if row > 0 && self.occupied(row - 1, col) {
            count += 1;
        }
        if self.occupied(row + 1, col) {
            count += 1;
        }
        if col > 0 && self.occupied(row, col - 1) {
            count += 1;
        }
        if self.occupied(row, col + 1) {
            count += 1;
        }
        count
    }

    /// Serialized form: one `Vec<char>` per row, empty cells as `empty`.
    pub fn to_rows(&self, empty: char) -> Vec<Vec<char>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|cell| cell.unwrap_or(empty)).collect())
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.to_rows(EMPTY_MARKER).iter().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            let line: String = row.iter().collect();
            f.write_str(&line)?;
        }
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Letter index
// ────────────────────────────────────────────────────────────────────────────

/// One occurrence of a letter on the grid. `orientation` is that of the placed word
/// the letter belongs to; a crossing cell therefore appears once per orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
}

#[derive(Debug, Clone, Default)]
pub struct LetterIndex {
    by_letter: HashMap<char, Vec<Occurrence>>,
}

impl LetterIndex {
    pub fn lookup(&self, letter: char) -> &[Occurrence] {
        self.by_letter
            .get(&letter)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Records an occurrence unless the identical record is already present.
    pub fn insert(&mut self, letter: char, occurrence: Occurrence) {
        let records = self.by_letter.entry(letter).or_default();
        if !records.contains(&occurrence) {
            records.push(occurrence);
        }
    }

    pub fn clear(&mut self) {
        self.by_letter.clear();
    }

    /// Discards all records and re-derives them from `slots`.
    pub fn rebuild(&mut self, slots: &[WordSlot]) {
        self.clear();
        for slot in slots {
            for (row, col, letter) in slot.cells() {
                self.insert(
                    letter,
                    Occurrence {
                        row,
                        col,
                        orientation: slot.orientation,
                    },
                );
            }
        }
    }

    pub fn len(&self) -> usize {
        self.by_letter.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
