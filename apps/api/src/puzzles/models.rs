//! Wire types for the puzzle API. The word record shape `{word, clue, row, col, vertical}`
//! and the grid-of-single-characters shape are what the storage layer persists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::crossword::search::SearchStats;
use crate::crossword::{ClueNumbering, Orientation, WordSlot, EMPTY_MARKER};

// ────────────────────────────────────────────────────────────────────────────
// Shared records
// ────────────────────────────────────────────────────────────────────────────

/// A placed word as persisted: `vertical = true` means Down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub word: String,
    pub clue: Option<String>,
    pub row: usize,
    pub col: usize,
    pub vertical: bool,
}

impl From<&WordSlot> for WordRecord {
    fn from(slot: &WordSlot) -> Self {
        WordRecord {
            word: slot.text.clone(),
            clue: slot.clue.clone(),
            row: slot.row,
            col: slot.col,
            vertical: slot.orientation.is_vertical(),
        }
    }
}

impl From<WordRecord> for WordSlot {
    fn from(record: WordRecord) -> Self {
        WordSlot {
            text: record.word,
            clue: record.clue,
            row: record.row,
            col: record.col,
            orientation: Orientation::from_vertical(record.vertical),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Preview
// ────────────────────────────────────────────────────────────────────────────

/// A (word, clue) pair as submitted by the puzzle editor.
#[derive(Debug, Clone, Deserialize)]
pub struct WordInput {
    #[serde(default)]
    pub word: Option<String>,
    #[serde(default)]
    pub clue: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PreviewRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub words: Vec<WordInput>,
    pub time_budget_secs: Option<f64>,
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub puzzle_id: Uuid,
    pub title: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub size: GridSize,
    /// Rows of single characters; empty cells hold `EMPTY_MARKER`.
    pub grid: Vec<Vec<char>>,
    pub words: Vec<WordRecord>,
    /// Requested words that did not make it onto the grid.
    pub unplaced: Vec<String>,
    pub score: i64,
    pub stats: SearchStats,
    pub numbering: ClueNumbering,
}

// ────────────────────────────────────────────────────────────────────────────
// Numbering
// ────────────────────────────────────────────────────────────────────────────

fn default_empty_marker() -> char {
    EMPTY_MARKER
}

#[derive(Debug, Clone, Deserialize)]
pub struct NumberRequest {
    pub grid: Vec<Vec<char>>,
    pub words: Vec<WordRecord>,
    #[serde(default = "default_empty_marker")]
    pub empty: char,
}
