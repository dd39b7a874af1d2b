//! Candidate Finder: proposes crossing placements for a word and scores them.
//!
//! `score_placement` is the only legality check in the generator: a score of 0 means
//! the word may not go there. A legal placement scores `1 + intersections`.

use crate::crossword::grid::{Grid, LetterIndex, Orientation};

/// A placement proposal for one word. Never stored beyond a single `add_word` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub row: usize,
    pub col: usize,
    pub orientation: Orientation,
    pub score: u32,
}

/// True if a word of `len` letters starting at `(row, col)` stays inside the grid.
pub fn fits(grid: &Grid, len: usize, row: usize, col: usize, orientation: Orientation) -> bool {
    if len == 0 {
        return false;
    }
    match orientation {
        Orientation::Across => row < grid.rows() && col + len <= grid.cols(),
        Orientation::Down => col < grid.cols() && row + len <= grid.rows(),
    }
}

/// Scores placing `letters` at `(row, col)` in `orientation`. Returns 0 when illegal:
/// out of bounds, a letter mismatch, an occupied cell directly before or after the word,
/// a new letter touching an occupied cell across the word's axis, or two consecutive
/// shared cells (the word would lie on top of a parallel word).
pub fn score_placement(
    grid: &Grid,
    letters: &[char],
    row: usize,
    col: usize,
    orientation: Orientation,
) -> u32 {
    let len = letters.len();
    if !fits(grid, len, row, col, orientation) {
        return 0;
    }

    let (dr, dc) = orientation.step();
    if let (Some(r), Some(c)) = (row.checked_sub(dr), col.checked_sub(dc)) {
        if grid.occupied(r, c) {
            return 0;
        }
    }
    let (end_r, end_c) = orientation.cell_at(row, col, len);
    if grid.occupied(end_r, end_c) {
        return 0;
    }

    let (pr, pc) = orientation.perpendicular().step();
    let mut score = 1;
    let mut previous_shared = false;
    for (i, &letter) in letters.iter().enumerate() {
        let (r, c) = orientation.cell_at(row, col, i);
        match grid.get(r, c) {
            None => {
                let touches_before = match (r.checked_sub(pr), c.checked_sub(pc)) {
                    (Some(nr), Some(nc)) => grid.occupied(nr, nc),
                    _ => false,
                };
                if touches_before || grid.occupied(r + pr, c + pc) {
                    return 0;
                }
                previous_shared = false;
            }
            Some(existing) if existing == letter => {
                // Two shared cells in a row means running along an existing word.
                if previous_shared {
                    return 0;
                }
                previous_shared = true;
                score += 1;
            }
            Some(_) => return 0,
        }
    }
    score
}

/// Finds every legal crossing placement for `letters`, best first.
///
/// For each letter of the word, every indexed occurrence of that letter yields one
/// proposal: the word laid perpendicular to the occurrence's word so that its `i`-th
/// letter sits on the occurrence. Returns `None` when nothing is legal.
pub fn find_candidates(
    grid: &Grid,
    index: &LetterIndex,
    letters: &[char],
) -> Option<Vec<Candidate>> {
    let len = letters.len();
    let mut candidates = Vec::new();

    for (i, &letter) in letters.iter().enumerate() {
        for occurrence in index.lookup(letter) {
            let orientation = occurrence.orientation.perpendicular();
            let start = match orientation {
                Orientation::Across => (Some(occurrence.row), occurrence.col.checked_sub(i)),
                Orientation::Down => (occurrence.row.checked_sub(i), Some(occurrence.col)),
            };
            let (Some(row), Some(col)) = start else {
                continue;
            };
            if !fits(grid, len, row, col, orientation) {
                continue;
            }

            let score = score_placement(grid, letters, row, col, orientation);
            if score > 0 {
                candidates.push(Candidate {
                    row,
                    col,
                    orientation,
                    score,
                });
            }
        }
    }

    if candidates.is_empty() {
        return None;
    }
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    Some(candidates)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crossword::grid::{Occurrence, WordSlot};

    fn letters(word: &str) -> Vec<char> {
        word.chars().collect()
    }

    /// Writes `word` onto the grid and index without any legality checks.
    fn stamp(
        grid: &mut Grid,
        index: &mut LetterIndex,
        word: &str,
        row: usize,
        col: usize,
        o: Orientation,
    ) {
        let slot = WordSlot {
            text: word.to_string(),
            clue: None,
            row,
            col,
            orientation: o,
        };
        for (r, c, ch) in slot.cells() {
            grid.set(r, c, ch);
            index.insert(
                ch,
                Occurrence {
                    row: r,
                    col: c,
                    orientation: o,
                },
            );
        }
    }

    #[test]
    fn test_fits_checks_axis() {
        let grid = Grid::new(5, 3);
        assert!(fits(&grid, 5, 0, 0, Orientation::Down));
        assert!(!fits(&grid, 5, 0, 0, Orientation::Across));
        assert!(fits(&grid, 3, 4, 0, Orientation::Across));
        assert!(!fits(&grid, 3, 5, 0, Orientation::Across));
        assert!(!fits(&grid, 0, 0, 0, Orientation::Across));
    }

    #[test]
    fn test_crossing_scores_intersection() {
        let mut grid = Grid::new(5, 5);
        let mut index = LetterIndex::default();
        stamp(&mut grid, &mut index, "CAT", 0, 1, Orientation::Down);
        // CAR across through the C at (0, 1)
        assert_eq!(score_placement(&grid, &letters("CAR"), 0, 1, Orientation::Across), 2);
    }

    #[test]
    fn test_mismatch_rejected() {
        let mut grid = Grid::new(5, 5);
        let mut index = LetterIndex::default();
        stamp(&mut grid, &mut index, "CAT", 0, 1, Orientation::Down);
        assert_eq!(score_placement(&grid, &letters("DOG"), 0, 1, Orientation::Across), 0);
    }

    #[test]
    fn test_end_to_end_merge_rejected() {
        let mut grid = Grid::new(5, 7);
        let mut index = LetterIndex::default();
        stamp(&mut grid, &mut index, "CAT", 2, 0, Orientation::Across);
        // Starting right after CAT would read CATDOG.
        assert_eq!(score_placement(&grid, &letters("DOG"), 2, 3, Orientation::Across), 0);
        // Ending right before an occupied cell.
        let mut grid = Grid::new(5, 7);
        stamp(&mut grid, &mut index, "CAT", 2, 4, Orientation::Across);
        assert_eq!(score_placement(&grid, &letters("DOG"), 2, 1, Orientation::Across), 0);
    }

    #[test]
    fn test_overlapping_parallel_word_rejected() {
        let mut grid = Grid::new(5, 7);
        let mut index = LetterIndex::default();
        stamp(&mut grid, &mut index, "CAT", 2, 2, Orientation::Across);
        // SCATS would swallow CAT on the same row.
        assert_eq!(score_placement(&grid, &letters("SCATS"), 2, 1, Orientation::Across), 0);
    }

    #[test]
    fn test_side_by_side_rejected() {
        let mut grid = Grid::new(5, 5);
        let mut index = LetterIndex::default();
        stamp(&mut grid, &mut index, "CAT", 0, 0, Orientation::Down);
        // A parallel Down word in the next column touches every letter.
        assert_eq!(score_placement(&grid, &letters("DOG"), 0, 1, Orientation::Down), 0);
        // A Down word starting right below CAT would extend it.
        assert_eq!(score_placement(&grid, &letters("DOG"), 3, 0, Orientation::Down), 0);
    }

    #[test]
    fn test_candidates_cross_at_shared_letter() {
        let mut grid = Grid::new(5, 5);
        let mut index = LetterIndex::default();
        stamp(&mut grid, &mut index, "CAT", 1, 2, Orientation::Down);

        let candidates = find_candidates(&grid, &index, &letters("ART")).expect("candidates");
        for candidate in &candidates {
            assert_eq!(candidate.orientation, Orientation::Across);
            assert!(candidate.score >= 2);
            let crosses = (0..3).any(|i| {
                let (r, c) = candidate.orientation.cell_at(candidate.row, candidate.col, i);
                grid.get(r, c) == Some(letters("ART")[i])
            });
            assert!(crosses, "{candidate:?} does not cross CAT");
        }
        // A at (2, 2) as ART's first letter, T at (3, 2) as ART's last letter.
        assert!(candidates.contains(&Candidate {
            row: 2,
            col: 2,
            orientation: Orientation::Across,
            score: 2
        }));
        assert!(candidates.contains(&Candidate {
            row: 3,
            col: 0,
            orientation: Orientation::Across,
            score: 2
        }));
    }

    #[test]
    fn test_candidates_sorted_descending() {
        let mut grid = Grid::new(7, 7);
        let mut index = LetterIndex::default();
        stamp(&mut grid, &mut index, "CAT", 1, 1, Orientation::Down);
        stamp(&mut grid, &mut index, "TAR", 1, 3, Orientation::Down);
        // AXA across row 2 can use both A's at once.
        let word = letters("AXA");
        let candidates = find_candidates(&grid, &index, &word).expect("candidates");
        assert_eq!(candidates[0].score, 3, "double crossing should rank first");
        assert!(candidates.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_no_candidates_without_shared_letters() {
        let mut grid = Grid::new(5, 5);
        let mut index = LetterIndex::default();
        stamp(&mut grid, &mut index, "CAT", 0, 0, Orientation::Down);
        assert!(find_candidates(&grid, &index, &letters("DOG")).is_none());
    }

    #[test]
    fn test_candidates_outside_grid_skipped() {
        let mut grid = Grid::new(3, 3);
        let mut index = LetterIndex::default();
        stamp(&mut grid, &mut index, "CAT", 0, 0, Orientation::Down);
        // Every crossing of a 4-letter word overflows a 3-wide grid.
        assert!(find_candidates(&grid, &index, &letters("TACO")).is_none());
    }
}
