//! Placement engine: seeds, adds, and removes words on a `Layout`.
//!
//! A `Layout` owns the grid, the letter index, and the placed-word list of one attempt.
//! `place` is the only write path, so the three always agree. Rejections are plain
//! `false` returns; nothing here fails loudly.

use rand::Rng;

use crate::crossword::candidates::{self, Candidate};
use crate::crossword::grid::{Grid, LetterIndex, Occurrence, Orientation, WordSlot};

/// Probability that the seed word is laid Down.
const SEED_DOWN_PROBABILITY: f64 = 0.75;
/// How many of the best candidates `add_word` chooses among.
const TOP_K: usize = 6;
const WEIGHT_EPSILON: f64 = 1e-6;

/// A normalized input word: trimmed and uppercased, with its letters pre-split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub text: String,
    pub letters: Vec<char>,
    pub clue: Option<String>,
}

impl WordEntry {
    pub fn new(text: &str, clue: Option<&str>) -> Self {
        let text = text.trim().to_uppercase();
        let letters = text.chars().collect();
        Self {
            text,
            letters,
            clue: clue.map(|c| c.trim().to_string()),
        }
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Layout {
    grid: Grid,
    index: LetterIndex,
    slots: Vec<WordSlot>,
}

impl Layout {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            grid: Grid::new(rows, cols),
            index: LetterIndex::default(),
            slots: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn index(&self) -> &LetterIndex {
        &self.index
    }

    pub fn slots(&self) -> &[WordSlot] {
        &self.slots
    }

    /// Clears the board for a fresh attempt.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.index.clear();
        self.slots.clear();
    }

    pub fn contains_word(&self, text: &str) -> bool {
        self.slots.iter().any(|slot| slot.text == text)
    }

    // ────────────────────────────────────────────────────────────────────────
    // Seeding and incremental placement
    // ────────────────────────────────────────────────────────────────────────

    /// Places the seed word on an empty board: centered along its own axis, at a random
    /// offset across it. Prefers Down; falls back to the other orientation when the word
    /// is longer than the preferred axis.
    pub fn first_word<R: Rng + ?Sized>(&mut self, word: &WordEntry, rng: &mut R) -> bool {
        if word.is_empty() {
            return false;
        }
        let preferred = if rng.gen_bool(SEED_DOWN_PROBABILITY) {
            Orientation::Down
        } else {
            Orientation::Across
        };

        for orientation in [preferred, preferred.perpendicular()] {
            if let Some((row, col)) = self.seed_position(word.len(), orientation, rng) {
                return self.place(word, row, col, orientation);
            }
        }
        false
    }

    fn seed_position<R: Rng + ?Sized>(
        &self,
        len: usize,
        orientation: Orientation,
        rng: &mut R,
    ) -> Option<(usize, usize)> {
        let (rows, cols) = (self.grid.rows(), self.grid.cols());
        if rows == 0 || cols == 0 {
            return None;
        }
        match orientation {
            Orientation::Down if len <= rows => Some(((rows - len) / 2, rng.gen_range(0..cols))),
            Orientation::Across if len <= cols => Some((rng.gen_range(0..rows), (cols - len) / 2)),
            _ => None,
        }
    }

    /// Tries to cross `word` into the current board. Chooses among the top candidates,
    /// uniformly when they tie and proportionally to score otherwise.
    pub fn add_word<R: Rng + ?Sized>(&mut self, word: &WordEntry, rng: &mut R) -> bool {
        let Some(found) = candidates::find_candidates(&self.grid, &self.index, &word.letters) else {
            return false;
        };
        let choice = choose_candidate(&found, rng);
        if !candidates::fits(&self.grid, word.len(), choice.row, choice.col, choice.orientation) {
            return false;
        }
        self.place(word, choice.row, choice.col, choice.orientation)
    }

    /// Writes `word` at `(row, col)`. Every target cell must be empty or already hold the
    /// same letter; otherwise nothing is written and `false` is returned.
    pub fn place(
        &mut self,
        word: &WordEntry,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> bool {
        if !candidates::fits(&self.grid, word.len(), row, col, orientation) {
            return false;
        }

        let clashes = word.letters.iter().enumerate().any(|(i, &letter)| {
            let (r, c) = orientation.cell_at(row, col, i);
            matches!(self.grid.get(r, c), Some(existing) if existing != letter)
        });
        if clashes {
            return false;
        }

        for (i, &letter) in word.letters.iter().enumerate() {
            let (r, c) = orientation.cell_at(row, col, i);
            self.grid.set(r, c, letter);
            self.index.insert(
                letter,
                Occurrence {
                    row: r,
                    col: c,
                    orientation,
                },
            );
        }
        self.slots.push(WordSlot {
            text: word.text.clone(),
            clue: word.clue.clone(),
            row,
            col,
            orientation,
        });
        true
    }

    /// True when every pair of side-by-side letters belongs to one word running that way.
    /// Seeding and `add_word` always keep this; removing a word can break it.
    pub fn is_well_formed(&self) -> bool {
        for row in 0..self.grid.rows() {
            for col in 0..self.grid.cols() {
                if !self.grid.occupied(row, col) {
                    continue;
                }
                for orientation in [Orientation::Across, Orientation::Down] {
                    let (nr, nc) = orientation.cell_at(row, col, 1);
                    if !self.grid.occupied(nr, nc) {
                        continue;
                    }
                    let joined = self.slots.iter().any(|slot| {
                        slot.orientation == orientation
                            && slot.covers(row, col)
                            && slot.covers(nr, nc)
                    });
                    if !joined {
                        return false;
                    }
                }
            }
        }
        true
    }

    // ────────────────────────────────────────────────────────────────────────
    // Removal and relaxation
    // ────────────────────────────────────────────────────────────────────────

    /// Removes the placed word at `slot_index`. Cells still covered by a crossing word
    /// keep their letter. The letter index is rebuilt from the remaining words.
    pub fn remove(&mut self, slot_index: usize) -> Option<WordSlot> {
        if slot_index >= self.slots.len() {
            return None;
        }
        let removed = self.slots.remove(slot_index);
        for (row, col, _) in removed.cells() {
            if !self.slots.iter().any(|slot| slot.covers(row, col)) {
                self.grid.clear_cell(row, col);
            }
        }
        self.index.rebuild(&self.slots);
        Some(removed)
    }

    /// Drops `max(1, ⌊placed × drop_fraction⌋)` randomly chosen words to escape a local
    /// maximum. Returns how many were removed.
    pub fn relax<R: Rng + ?Sized>(&mut self, drop_fraction: f64, rng: &mut R) -> usize {
        if self.slots.is_empty() {
            return 0;
        }
        let drop_count = ((self.slots.len() as f64 * drop_fraction.max(0.0)) as usize).max(1);
        let mut removed = 0;
        while removed < drop_count && !self.slots.is_empty() {
            let victim = rng.gen_range(0..self.slots.len());
            if self.remove(victim).is_some() {
                removed += 1;
            }
        }
        removed
    }
}

/// Picks one of the top `TOP_K` candidates (which arrive sorted best first).
/// Uniform when they all tie, otherwise by cumulative-weight inversion on score.
fn choose_candidate<'a, R: Rng + ?Sized>(
    candidates: &'a [Candidate],
    rng: &mut R,
) -> &'a Candidate {
    let top = &candidates[..candidates.len().min(TOP_K)];
    let max = top.iter().map(|c| c.score).max().unwrap_or(0);
    let min = top.iter().map(|c| c.score).min().unwrap_or(0);
    if max == min {
        return &top[rng.gen_range(0..top.len())];
    }

    let total: f64 = top.iter().map(|c| f64::from(c.score)).sum::<f64>() + WEIGHT_EPSILON;
    let mut target = rng.gen::<f64>() * total;
    for candidate in top {
        target -= f64::from(candidate.score);
        if target <= 0.0 {
            return candidate;
        }
    }
    // Only reachable when the draw lands in the epsilon tail.
    &top[top.len() - 1]
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
