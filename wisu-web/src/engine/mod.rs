//! Pairwise-comparison engine
//!
//! Pure combinatorics and state: pair generation, judged-pair filtering,
//! the per-session vote cursor, and win/loss ranking. Nothing in here
//! touches the database; handlers feed it loaded records.

pub mod cursor;
pub mod pairs;
pub mod ranking;

pub use cursor::{EligibleQuestion, VoteCursor};
pub use pairs::{available_pairs, generate_pairs, judged_keys, PairKey};
pub use ranking::{rank_ideas, IdeaRank};
