//! Grid Quality Scorer: ranks finished attempts. Never used to reject a placement.

use crate::crossword::grid::Grid;

const CROSSING_CELL: i64 = 3;
const RUN_CELL: i64 = 1;
const ISOLATED_CELL: i64 = -1;
const PER_WORD_BONUS: i64 = 2;

/// Scores a grid: +3 per letter with two or more occupied neighbors, +1 per letter with
/// exactly one, -1 per isolated letter, plus 2 per placed word. Higher is better.
pub fn score_grid(grid: &Grid, placed_words: usize) -> i64 {
    let mut score = 0;
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            if !grid.occupied(row, col) {
                continue;
            }
            score += match grid.occupied_neighbors(row, col) {
                0 => ISOLATED_CELL,
                1 => RUN_CELL,
                _ => CROSSING_CELL,
            };
        }
    }
    score + PER_WORD_BONUS * placed_words as i64
}
