//! Constrained random gift-exchange ("Secret Santa") matching.
//!
//! An admin assembles a roster of participants, optionally forbids some
//! `giver → receiver` pairings, and generates a random one-to-one
//! assignment in which nobody draws themselves and no forbidden pair
//! appears. Participants later reveal only their own assignment.
//!
//! - **Matcher** ([`matcher`]): the stateless generator. Randomized greedy
//!   construction with a bounded retry budget, plus a complete
//!   augmenting-path strategy that never misses a feasible assignment.
//! - **Roster** ([`roster`]): validated participant and exclusion editing,
//!   and CSV import with optional email columns.
//! - **Store** ([`store`]): the whole-collection persistence capability the
//!   exchange writes results and reveal history to.
//! - **Exchange** ([`exchange`]): orchestration for admin and viewer
//!   front ends, including identity resolution and the reveal log.
//!
//! # Features
//!
//! - `serde`: serialization for public data types.
//! - `parallel`: run greedy attempts on rayon.
//! - `wasm`: `wasm-bindgen` bindings for browser front ends.

pub mod error;
pub mod exchange;
pub mod matcher;
pub mod random;
pub mod roster;
pub mod store;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Result, SantaError};
