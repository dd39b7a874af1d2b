//! Search Controller: time-boxed randomized restarts over the placement engine.
//!
//! # Loop
//! Each iteration resets one owned `Layout`, optionally shuffles the word order, seeds
//! with the first word, then makes `passes` greedy passes over the rest. The attempt is
//! scored and snapshotted if it beats the best so far. The loop stops early once the
//! best attempt places every word; otherwise when the time (or iteration) budget runs out.
//!
//! The clock is polled between iterations only, so a run may overshoot its budget by
//! up to one iteration. At least one iteration always runs.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::crossword::grid::{Grid, WordSlot};
use crate::crossword::placement::{Layout, WordEntry};
use crate::crossword::scoring::score_grid;

// ────────────────────────────────────────────────────────────────────────────
// Settings, errors, results
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("time budget must be a non-negative number of seconds that fits a Duration (got {0})")]
    InvalidTimeBudget(f64),
}

/// Tunables for one `generate` call. `Default` matches the production behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSettings {
    /// Only the longest `max_words` words are considered.
    pub max_words: usize,
    /// Greedy passes over the word list per attempt.
    pub passes: usize,
    /// Chance that an attempt shuffles the word order instead of keeping longest-first.
    pub shuffle_probability: f64,
    /// When set, each attempt also drops this fraction of its words and retries them.
    pub relax_fraction: Option<f64>,
    /// Hard cap on iterations, on top of the time budget.
    pub max_iterations: Option<usize>,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_words: 30,
            passes: 2,
            shuffle_probability: 0.5,
            relax_fraction: None,
            max_iterations: None,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    /// The best attempt placed every distinct considered word.
    Converged,
    /// Time or iteration budget ran out first.
    BudgetExhausted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchStats {
    pub iterations: usize,
    pub outcome: SearchOutcome,
    /// Best score after each improvement, in order. Strictly increasing.
    pub improvements: Vec<i64>,
    pub elapsed_ms: u64,
}

/// The best layout found by `generate`.
#[derive(Debug, Clone)]
pub struct GeneratedLayout {
    pub rows: usize,
    pub cols: usize,
    pub grid: Grid,
    pub words: Vec<WordSlot>,
    /// Requested words missing from `words`, including any cut by `max_words`.
    pub unplaced: Vec<String>,
    pub score: i64,
    pub stats: SearchStats,
}

// ────────────────────────────────────────────────────────────────────────────
// Best-result tracking
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct SearchAttempt {
    grid: Grid,
    words: Vec<WordSlot>,
    score: i64,
}

#[derive(Debug, Default)]
struct BestTracker {
    best: Option<SearchAttempt>,
    improvements: Vec<i64>,
}

impl BestTracker {
    /// Snapshots `layout` if it scores strictly higher than the current best.
    fn consider(&mut self, layout: &Layout) -> bool {
        let score = score_grid(layout.grid(), layout.slots().len());
        if self.best.as_ref().is_some_and(|best| score <= best.score) {
            return false;
        }
        debug!(
            "New best attempt: score={score}, words={}\n{}",
            layout.slots().len(),
            layout.grid()
        );
        self.improvements.push(score);
        self.best = Some(SearchAttempt {
            grid: layout.grid().clone(),
            words: layout.slots().to_vec(),
            score,
        });
        true
    }

    fn placed_all(&self, word_count: usize) -> bool {
        self.best
            .as_ref()
            .is_some_and(|best| best.words.len() == word_count)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Lays out `words` on a `rows × cols` grid within `time_budget_secs`.
///
/// Words are normalized (trimmed, uppercased) into a private copy; entries that are
/// empty after trimming are skipped. Words that could not be placed are reported in
/// `unplaced` rather than treated as an error. Repeated words are placed once; the
/// extra copies count as unplaced.
pub fn generate(
    rows: usize,
    cols: usize,
    words: &[(String, Option<String>)],
    time_budget_secs: f64,
    settings: &SearchSettings,
) -> Result<GeneratedLayout, LayoutError> {
    if rows == 0 || cols == 0 {
        return Err(LayoutError::InvalidDimensions { rows, cols });
    }
    let budget = Duration::try_from_secs_f64(time_budget_secs)
        .map_err(|_| LayoutError::InvalidTimeBudget(time_budget_secs))?;

    let requested: Vec<WordEntry> = words
        .iter()
        .map(|(text, clue)| WordEntry::new(text, clue.as_deref()))
        .filter(|entry| !entry.is_empty())
        .collect();

    let mut candidates: Vec<&WordEntry> = requested.iter().collect();
    candidates.sort_by(|a, b| b.len().cmp(&a.len()));
    candidates.truncate(settings.max_words);
    let distinct = candidates
        .iter()
        .map(|entry| entry.text.as_str())
        .collect::<HashSet<_>>()
        .len();

    info!(
        "Generating {rows}x{cols} crossword from {} words \
         ({} considered, budget {time_budget_secs}s)",
        requested.len(),
        candidates.len()
    );

    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let shuffle_probability = if settings.shuffle_probability.is_nan() {
        0.0
    } else {
        settings.shuffle_probability.clamp(0.0, 1.0)
    };
    let started = Instant::now();

    let mut layout = Layout::new(rows, cols);
    let mut tracker = BestTracker::default();
    let mut iterations = 0;

    let outcome = loop {
        layout.reset();
        let mut working = candidates.clone();
        if rng.gen_bool(shuffle_probability) {
            working.shuffle(&mut rng);
        }

        run_attempt(&mut layout, &working, settings, &mut tracker, &mut rng);
        iterations += 1;

        if tracker.placed_all(distinct) {
            break SearchOutcome::Converged;
        }
        let out_of_iterations = settings.max_iterations.is_some_and(|max| iterations >= max);
        if out_of_iterations || started.elapsed() >= budget {
            break SearchOutcome::BudgetExhausted;
        }
    };

    let best = tracker.best.unwrap_or_else(|| SearchAttempt {
        grid: layout.grid().clone(),
        words: layout.slots().to_vec(),
        score: score_grid(layout.grid(), layout.slots().len()),
    });
    let unplaced = unplaced_words(&requested, &best.words);
    let elapsed_ms = started.elapsed().as_millis() as u64;

    info!(
        "Crossword search finished: {:?} after {iterations} iterations in {elapsed_ms}ms, \
         placed {}/{} words (score {})",
        outcome,
        best.words.len(),
        requested.len(),
        best.score
    );

    Ok(GeneratedLayout {
        rows,
        cols,
        grid: best.grid,
        words: best.words,
        unplaced,
        score: best.score,
        stats: SearchStats {
            iterations,
            outcome,
            improvements: tracker.improvements,
            elapsed_ms,
        },
    })
}

/// One restart: seed, greedy passes, optional relaxation. Every finished state is
/// offered to the tracker.
fn run_attempt<R: Rng + ?Sized>(
    layout: &mut Layout,
    working: &[&WordEntry],
    settings: &SearchSettings,
    tracker: &mut BestTracker,
    rng: &mut R,
) {
    if let Some(seed) = working.first() {
        layout.first_word(seed, rng);
        for _ in 0..settings.passes {
            place_remaining(layout, working, rng);
        }
    }
    tracker.consider(layout);

    if let Some(fraction) = settings.relax_fraction {
        if !layout.slots().is_empty() && layout.slots().len() < working.len() {
            let dropped = layout.relax(fraction, rng);
            debug!("Relaxed attempt by dropping {dropped} words");
            place_remaining(layout, working, rng);
            if layout.is_well_formed() {
                tracker.consider(layout);
            }
        }
    }
}

fn place_remaining<R: Rng + ?Sized>(layout: &mut Layout, working: &[&WordEntry], rng: &mut R) {
    for word in working {
        if !layout.contains_word(&word.text) {
            layout.add_word(word, rng);
        }
    }
}

/// Requested words not accounted for by `placed`, preserving request order.
fn unplaced_words(requested: &[WordEntry], placed: &[WordSlot]) -> Vec<String> {
    let mut remaining: HashMap<&str, usize> = HashMap::new();
    for slot in placed {
        *remaining.entry(slot.text.as_str()).or_default() += 1;
    }
    requested
        .iter()
        .filter(|entry| match remaining.get_mut(entry.text.as_str()) {
            Some(count) if *count > 0 => {
                *count -= 1;
                false
            }
            _ => true,
        })
        .map(|entry| entry.text.clone())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
