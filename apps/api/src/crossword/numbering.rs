//! Clue Numbering: derives across/down clue numbers from a finished grid.
//!
//! Cells are scanned row-major. A cell gets the next number when an Across word starts
//! there with nothing to its left, or a Down word starts there with nothing above it.
//! Both entries share the number when both start on the same cell.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::crossword::grid::{Grid, Orientation, WordSlot};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueEntry {
    pub number: u32,
    pub orientation: Orientation,
    pub word: String,
    pub clue: Option<String>,
    pub row: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueNumbering {
    /// Same shape as the grid; `Some(n)` on numbered cells only.
    pub number_grid: Vec<Vec<Option<u32>>>,
    /// Every entry in scan order.
    pub clues: Vec<ClueEntry>,
    pub across: Vec<ClueEntry>,
    pub down: Vec<ClueEntry>,
}

/// Numbers the clues of `words` laid out on `grid`.
pub fn number_clues(grid: &Grid, words: &[WordSlot]) -> ClueNumbering {
    let starts: HashMap<(usize, usize, Orientation), &WordSlot> = words
        .iter()
        .map(|slot| ((slot.row, slot.col, slot.orientation), slot))
        .collect();

    let mut number_grid = vec![vec![None; grid.cols()]; grid.rows()];
    let mut clues = Vec::new();
    let mut next_number = 1;

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            if !grid.occupied(row, col) {
                continue;
            }
            let open_left = col == 0 || !grid.occupied(row, col - 1);
            let open_above = row == 0 || !grid.occupied(row - 1, col);

            let across = open_left
                .then(|| starts.get(&(row, col, Orientation::Across)))
                .flatten();
            let down = open_above
                .then(|| starts.get(&(row, col, Orientation::Down)))
                .flatten();
            if across.is_none() && down.is_none() {
                continue;
            }

            number_grid[row][col] = Some(next_number);
            for slot in [across, down].into_iter().flatten() {
                clues.push(ClueEntry {
                    number: next_number,
                    orientation: slot.orientation,
                    word: slot.text.clone(),
                    clue: slot.clue.clone(),
                    row,
                    col,
                });
            }
            next_number += 1;
        }
    }

    let mut across: Vec<ClueEntry> = clues
        .iter()
        .filter(|c| c.orientation == Orientation::Across)
        .cloned()
        .collect();
    let mut down: Vec<ClueEntry> = clues
        .iter()
        .filter(|c| c.orientation == Orientation::Down)
        .cloned()
        .collect();
    across.sort_by_key(|c| c.number);
    down.sort_by_key(|c| c.number);

    ClueNumbering {
        number_grid,
        clues,
        across,
        down,
    }
}

/// Numbers clues for a serialized grid whose empty cells hold `empty`.
///
/// Ragged rows are padded with empty cells to the widest row, so `number_grid` is
/// always rectangular. Callers that need the input shape preserved reject ragged
/// grids first.
pub fn number_serialized_clues(
    rows: &[Vec<char>],
    words: &[WordSlot],
    empty: char,
) -> ClueNumbering {
    number_clues(&Grid::from_rows(rows, empty), words)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
