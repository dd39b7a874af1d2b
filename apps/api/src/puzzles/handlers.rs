//! Axum route handlers for the Puzzle API.

use axum::{extract::State, Json};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::crossword::{
    generate, number_clues, number_serialized_clues, ClueNumbering, WordSlot, EMPTY_MARKER,
};
use crate::errors::AppError;
use crate::puzzles::models::{
    GridSize, NumberRequest, PreviewRequest, PreviewResponse, WordInput, WordRecord,
};
use crate::state::AppState;

const MAX_DIMENSION: usize = 50;
const MAX_TIME_BUDGET_SECS: f64 = 10.0;

/// Keeps entries with both a word and a clue, trimmed. Mirrors the editor's own filter.
fn sanitize_words(words: &[WordInput]) -> Vec<(String, Option<String>)> {
    words
        .iter()
        .filter_map(|input| {
            let word = input.word.as_deref()?.trim();
            let clue = input.clue.as_deref()?.trim();
            (!word.is_empty() && !clue.is_empty())
                .then(|| (word.to_string(), Some(clue.to_string())))
        })
        .collect()
}

fn validate_dimension(name: &str, value: usize) -> Result<usize, AppError> {
    if value == 0 || value > MAX_DIMENSION {
        return Err(AppError::Validation(format!(
            "{name} must be between 1 and {MAX_DIMENSION}"
        )));
    }
    Ok(value)
}

/// The numbering grid mirrors the submitted grid, so every row must be the same width.
fn validate_rectangular(grid: &[Vec<char>]) -> Result<(), AppError> {
    let width = grid.first().map_or(0, Vec::len);
    if let Some(r) = grid.iter().position(|row| row.len() != width) {
        return Err(AppError::Validation(format!(
            "grid row {r} has {} cells, expected {width}",
            grid[r].len()
        )));
    }
    Ok(())
}

/// POST /api/v1/crosswords/preview
///
/// Lays out the submitted words and returns the grid, placed words, and clue numbering.
/// Nothing is persisted; the editor saves the preview it accepts.
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Result<Json<PreviewResponse>, AppError> {
    let words = sanitize_words(&request.words);
    if words.is_empty() {
        return Err(AppError::Validation("No valid words provided".to_string()));
    }

    let rows = validate_dimension("rows", request.rows.unwrap_or(state.config.default_rows))?;
    let cols = validate_dimension("cols", request.cols.unwrap_or(state.config.default_cols))?;
    let budget = request
        .time_budget_secs
        .unwrap_or(state.config.time_budget_secs);
    if !(0.0..=MAX_TIME_BUDGET_SECS).contains(&budget) {
        return Err(AppError::Validation(format!(
            "time_budget_secs must be between 0 and {MAX_TIME_BUDGET_SECS}"
        )));
    }

    let settings = state.search_settings(request.seed);
    let requested = words.len();
    // Layout search is CPU-bound; keep it off the async workers.
    let layout =
        tokio::task::spawn_blocking(move || generate(rows, cols, &words, budget, &settings))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Layout task failed: {e}")))??;

    if !layout.unplaced.is_empty() {
        warn!(
            "{} of {requested} words could not be placed: {:?}",
            layout.unplaced.len(),
            layout.unplaced
        );
    }
    info!(
        "Preview generated: {rows}x{cols}, {} words placed, score {}",
        layout.words.len(),
        layout.score
    );

    let numbering = number_clues(&layout.grid, &layout.words);
    Ok(Json(PreviewResponse {
        puzzle_id: Uuid::new_v4(),
        title: request.title.map(|t| t.trim().to_string()),
        generated_at: Utc::now(),
        size: GridSize {
            rows: layout.rows,
            cols: layout.cols,
        },
        grid: layout.grid.to_rows(EMPTY_MARKER),
        words: layout.words.iter().map(WordRecord::from).collect(),
        unplaced: layout.unplaced,
        score: layout.score,
        stats: layout.stats,
        numbering,
    }))
}

/// POST /api/v1/crosswords/number
///
/// Numbers the clues of a stored grid. Used when a saved puzzle is opened for play.
/// Grids whose rows differ in width are rejected.
pub async fn handle_number(
    Json(request): Json<NumberRequest>,
) -> Result<Json<ClueNumbering>, AppError> {
    validate_rectangular(&request.grid)?;
    let words: Vec<WordSlot> = request.words.into_iter().map(WordSlot::from).collect();
    Ok(Json(number_serialized_clues(
        &request.grid,
        &words,
        request.empty,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(word: Option<&str>, clue: Option<&str>) -> WordInput {
        WordInput {
            word: word.map(str::to_string),
            clue: clue.map(str::to_string),
        }
    }

    #[test]
    fn test_sanitize_drops_blank_entries() {
        let words = sanitize_words(&[
            input(Some(" cat "), Some(" feline ")),
            input(Some("dog"), Some("   ")),
            input(None, Some("orphan clue")),
            input(Some("   "), Some("blank")),
        ]);
        assert_eq!(words, vec![("cat".to_string(), Some("feline".to_string()))]);
    }

    #[test]
    fn test_validate_dimension_bounds() {
        assert!(validate_dimension("rows", 0).is_err());
        assert!(validate_dimension("rows", MAX_DIMENSION + 1).is_err());
        assert_eq!(validate_dimension("rows", 15).unwrap(), 15);
    }

    #[test]
    fn test_validate_rectangular() {
        assert!(validate_rectangular(&[]).is_ok());
        assert!(validate_rectangular(&[vec!['A', ' '], vec![' ', 'B']]).is_ok());
        let err = validate_rectangular(&[vec!['A'], vec![' ', 'B', 'C']]).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("row 1")));
    }
}
