// Crossword layout engine: grid model, candidate search, placement, restart search,
// and clue numbering. Synchronous and CPU-bound; async callers must run `generate`
// inside tokio::task::spawn_blocking.

pub mod candidates;
pub mod grid;
pub mod numbering;
pub mod placement;
pub mod scoring;
pub mod search;

// Re-export the public API consumed by the HTTP layer.
pub use grid::{Orientation, WordSlot, EMPTY_MARKER};
pub use numbering::{number_clues, number_serialized_clues, ClueNumbering};
pub use search::{generate, LayoutError, SearchSettings};
