// Template matching module
// Wraps imageproc's normalized cross correlation into a single
// best-match-per-frame call.

pub mod matcher;
pub mod types;

pub use matcher::best_match;
pub use types::MatchResult;
