// Puzzle API: preview generation and clue numbering over JSON.
// Persistence, slugs, and rendering live with the callers of this API.

pub mod handlers;
pub mod models;
