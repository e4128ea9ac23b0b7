//! Tournament engine: statistics, prioritization, round generation, scoring.

mod priority;
mod round;
mod scoring;
mod stats;

pub use priority::{prioritize, standings};
pub use round::{current_round_matches, reshuffle_current_round, start_round};
pub use scoring::record_score;
pub use stats::refresh_stats;
