//! Constrained random gift-exchange matching.
//!
//! Given participants and forbidden `(giver, receiver)` pairs, produce a
//! bijection from givers to receivers with no self-assignment and no
//! forbidden pair, or report that none was found.
//!
//! The default strategy restarts a randomized greedy construction up to a
//! fixed attempt budget. It is cheap and adequate for sparse exclusions but
//! can miss solutions under tight rules. [`MatchStrategy::AugmentingPath`]
//! and [`MatchStrategy::GreedyWithFallback`] never do.
//!
//! Runs are stateless: each call builds its own generator from
//! [`MatchConfig::seed`] or takes one through
//! [`MatchRunner::run_with_rng`].

mod augment;
mod config;
mod runner;
mod types;

pub use config::{MatchConfig, MatchStrategy, DEFAULT_MAX_ATTEMPTS, MIN_PARTICIPANTS};
pub use runner::{generate, MatchResult, MatchRunner};
pub use types::{Assignment, Exclusion, MatchOutcome, MatchProblem, NoSolutionReason};
