//! Complete search: randomized augmenting paths plus swap mixing.
//!
//! # Algorithm
//!
//! 1. Shuffle every giver's list of allowed receivers and the giver order.
//! 2. For each giver, search an augmenting path (Kuhn's algorithm) in the
//!    allowed bipartite graph. If one giver cannot be matched, the maximum
//!    matching is smaller than `n` and no valid assignment set exists.
//! 3. Mix the perfect matching: repeatedly pick two givers and swap their
//!    receivers when both new pairs are allowed.
//!
//! The mixing step only moves between matchings that differ by a receiver
//! swap, so it randomizes the result but does not sample uniformly.
//!
//! # Reference
//!
//! Kuhn, H. W. (1955). "The Hungarian method for the assignment problem",
//! *Naval Research Logistics Quarterly* 2, 83-97.

use rand::seq::SliceRandom;
use rand::Rng;

use super::types::MatchProblem;

/// Finds a valid assignment as `receiver_of[giver]`, or `None` if none exists.
pub(crate) fn perfect_matching<R: Rng>(
    problem: &MatchProblem,
    rng: &mut R,
) -> Option<Vec<usize>> {
    let n = problem.len();

    let adjacency: Vec<Vec<usize>> = (0..n)
        .map(|g| {
            let mut receivers: Vec<usize> = (0..n).filter(|&r| problem.allows(g, r)).collect();
            receivers.shuffle(rng);
            receivers
        })
        .collect();

    // Any giver with no allowed receiver makes the whole problem infeasible.
    if adjacency.iter().any(Vec::is_empty) {
        return None;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);

    let mut giver_of: Vec<Option<usize>> = vec![None; n];
    let mut visited = vec![false; n];
    for &giver in &order {
        visited.iter_mut().for_each(|v| *v = false);
        if !augment(giver, &adjacency, &mut giver_of, &mut visited) {
            return None;
        }
    }

    let mut receiver_of = vec![0; n];
    for (receiver, giver) in giver_of.iter().enumerate() {
        receiver_of[(*giver)?] = receiver;
    }
    Some(receiver_of)
}

fn augment(
    giver: usize,
    adjacency: &[Vec<usize>],
    giver_of: &mut [Option<usize>],
    visited: &mut [bool],
) -> bool {
    for &receiver in &adjacency[giver] {
        if visited[receiver] {
            continue;
        }
        visited[receiver] = true;

        let free = match giver_of[receiver] {
            None => true,
            Some(other) => augment(other, adjacency, giver_of, visited),
        };
        if free {
            giver_of[receiver] = Some(giver);
            return true;
        }
    }
    false
}

/// Applies `sweeps * n` random receiver-swap proposals in place.
///
/// A swap is kept only if both resulting pairs are allowed, so validity
/// is preserved.
pub(crate) fn mix<R: Rng>(
    problem: &MatchProblem,
    receiver_of: &mut [usize],
    sweeps: usize,
    rng: &mut R,
) {
    let n = receiver_of.len();
    if n < 2 {
        return;
    }
    for _ in 0..swap_budget(sweeps, n) {
        let a = rng.random_range(0..n);
        let b = rng.random_range(0..n);
        if a == b {
            continue;
        }
        let (ra, rb) = (receiver_of[a], receiver_of[b]);
        if problem.allows(a, rb) && problem.allows(b, ra) {
            receiver_of.swap(a, b);
        }
    }
}

/// Swaps proposed by `sweeps` sweeps over `n` givers.
fn swap_budget(sweeps: usize, n: usize) -> usize {
    sweeps.saturating_mul(n)
}
