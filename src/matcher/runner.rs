//! Matcher execution.
//!
//! # Algorithm (greedy retry)
//!
//! 1. Build the allowed matrix from the exclusions
//! 2. Up to `max_attempts` times:
//!    a. Shuffle the givers and the receiver pool independently
//!    b. For each giver, collect the pool receivers it may give to
//!    c. Empty candidate set: abandon the attempt
//!    d. Otherwise pick a candidate uniformly and remove it from the pool
//! 3. The first complete attempt is the result; otherwise no solution

use rand::seq::SliceRandom;
use rand::Rng;

use super::augment;
use super::config::{MatchConfig, MatchStrategy, MIN_PARTICIPANTS};
use super::types::{Assignment, Exclusion, MatchOutcome, MatchProblem, NoSolutionReason};
use crate::random::rng_from_seed;

/// Result of a matching run.
#[derive(Debug, Clone)]
pub struct MatchResult {
    /// Assignment set or the reason there is none.
    pub outcome: MatchOutcome,

    /// Greedy attempts consumed (0 for a pure augmenting-path run).
    pub attempts: usize,

    /// Strategy that produced the outcome.
    pub strategy: MatchStrategy,
}

impl MatchResult {
    /// Whether a full assignment set was found.
    pub fn is_matched(&self) -> bool {
        matches!(self.outcome, MatchOutcome::Matched(_))
    }

    /// The assignment set, if any.
    pub fn assignments(&self) -> Option<&[Assignment]> {
        match &self.outcome {
            MatchOutcome::Matched(assignments) => Some(assignments),
            MatchOutcome::NoSolution(_) => None,
        }
    }

    pub fn into_assignments(self) -> Option<Vec<Assignment>> {
        match self.outcome {
            MatchOutcome::Matched(assignments) => Some(assignments),
            MatchOutcome::NoSolution(_) => None,
        }
    }
}

/// Generates a random assignment set with the default configuration.
///
/// Returns `None` when fewer than two distinct participants are given or
/// the exclusions could not be satisfied within the attempt budget.
///
/// # Examples
///
/// ```
/// use u_santa::matcher::{generate, Exclusion};
///
/// let participants = ["Ann", "Bob", "Cid", "Dee"];
/// let exclusions = [Exclusion::new("Ann", "Bob")];
///
/// let assignments = generate(&participants, &exclusions).expect("feasible");
/// assert_eq!(assignments.len(), 4);
/// assert!(assignments.iter().all(|a| a.giver != a.receiver));
/// assert!(!assignments.iter().any(|a| a.giver == "Ann" && a.receiver == "Bob"));
/// ```
pub fn generate<S: AsRef<str>>(
    participants: &[S],
    exclusions: &[Exclusion],
) -> Option<Vec<Assignment>> {
    let problem = MatchProblem::new(participants, exclusions);
    MatchRunner::run(&problem, &MatchConfig::default()).into_assignments()
}

/// Executes the matcher.
pub struct MatchRunner;

impl MatchRunner {
    /// Runs the matcher, seeding from `config.seed`.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    pub fn run(problem: &MatchProblem, config: &MatchConfig) -> MatchResult {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(problem, config, &mut rng)
    }

    /// Runs the matcher with an injected random source.
    ///
    /// `config.seed` is ignored.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid (call [`MatchConfig::validate`]
    /// first to check).
    pub fn run_with_rng<R: Rng>(
        problem: &MatchProblem,
        config: &MatchConfig,
        rng: &mut R,
    ) -> MatchResult {
        config.validate().expect("invalid MatchConfig");

        let result = if problem.len() < MIN_PARTICIPANTS {
            MatchResult {
                outcome: MatchOutcome::NoSolution(NoSolutionReason::InsufficientParticipants),
                attempts: 0,
                strategy: config.strategy,
            }
        } else {
            match config.strategy {
                MatchStrategy::GreedyRetry => greedy(problem, config, rng),
                MatchStrategy::AugmentingPath => augmenting(problem, config, rng, 0),
                MatchStrategy::GreedyWithFallback => {
                    let result = greedy(problem, config, rng);
                    if result.is_matched() {
                        result
                    } else {
                        tracing::debug!(
                            attempts = result.attempts,
                            "greedy budget exhausted, falling back to augmenting paths"
                        );
                        augmenting(problem, config, rng, result.attempts)
                    }
                }
            }
        };

        match &result.outcome {
            MatchOutcome::Matched(_) => tracing::debug!(
                participants = problem.len(),
                attempts = result.attempts,
                strategy = ?result.strategy,
                "assignment set found"
            ),
            MatchOutcome::NoSolution(reason) => tracing::debug!(
                participants = problem.len(),
                attempts = result.attempts,
                ?reason,
                "no assignment set"
            ),
        }
        result
    }
}

fn greedy<R: Rng>(problem: &MatchProblem, config: &MatchConfig, rng: &mut R) -> MatchResult {
    let found = run_attempts(problem, config, rng);
    let (outcome, attempts) = match found {
        Some((attempts, pairs)) => (
            MatchOutcome::Matched(problem.to_assignments(&pairs)),
            attempts,
        ),
        None => (
            MatchOutcome::NoSolution(NoSolutionReason::BudgetExhausted),
            config.max_attempts,
        ),
    };
    MatchResult {
        outcome,
        attempts,
        strategy: MatchStrategy::GreedyRetry,
    }
}

/// Returns the 1-based index of the first successful attempt and its pairs.
fn run_attempts<R: Rng>(
    problem: &MatchProblem,
    config: &MatchConfig,
    rng: &mut R,
) -> Option<(usize, Vec<(usize, usize)>)> {
    #[cfg(feature = "parallel")]
    if config.parallel {
        return run_attempts_parallel(problem, config, rng);
    }

    (1..=config.max_attempts)
        .find_map(|attempt| greedy_attempt(problem, rng).map(|pairs| (attempt, pairs)))
}

/// Draws one seed per attempt up front so the winner depends only on the
/// master generator, not on thread scheduling.
#[cfg(feature = "parallel")]
fn run_attempts_parallel<R: Rng>(
    problem: &MatchProblem,
    config: &MatchConfig,
    rng: &mut R,
) -> Option<(usize, Vec<(usize, usize)>)> {
    use rayon::prelude::*;

    let seeds: Vec<u64> = (0..config.max_attempts).map(|_| rng.random()).collect();
    seeds.par_iter().enumerate().find_map_first(|(i, &seed)| {
        let mut attempt_rng = crate::random::create_rng(seed);
        greedy_attempt(problem, &mut attempt_rng).map(|pairs| (i + 1, pairs))
    })
}

/// One greedy construction without backtracking.
fn greedy_attempt<R: Rng>(problem: &MatchProblem, rng: &mut R) -> Option<Vec<(usize, usize)>> {
    let n = problem.len();
    let mut givers: Vec<usize> = (0..n).collect();
    let mut pool: Vec<usize> = (0..n).collect();
    givers.shuffle(rng);
    pool.shuffle(rng);

    let mut pairs = Vec::with_capacity(n);
    let mut candidates = Vec::with_capacity(n);
    for &giver in &givers {
        candidates.clear();
        candidates.extend(
            pool.iter()
                .enumerate()
                .filter(|&(_, &receiver)| problem.allows(giver, receiver))
                .map(|(slot, _)| slot),
        );
        if candidates.is_empty() {
            return None;
        }
        let slot = candidates[rng.random_range(0..candidates.len())];
        pairs.push((giver, pool.remove(slot)));
    }
    Some(pairs)
}

fn augmenting<R: Rng>(
    problem: &MatchProblem,
    config: &MatchConfig,
    rng: &mut R,
    attempts: usize,
) -> MatchResult {
    let outcome = match augment::perfect_matching(problem, rng) {
        Some(mut receiver_of) => {
            augment::mix(problem, &mut receiver_of, config.mixing_sweeps, rng);
            let pairs: Vec<(usize, usize)> = receiver_of.into_iter().enumerate().collect();
            MatchOutcome::Matched(problem.to_assignments(&pairs))
        }
        None => MatchOutcome::NoSolution(NoSolutionReason::Infeasible),
    };
    MatchResult {
        outcome,
        attempts,
        strategy: MatchStrategy::AugmentingPath,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::DEFAULT_MAX_ATTEMPTS;
    use crate::random::create_rng;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("P{i}")).collect()
    }

    fn seeded(seed: u64) -> MatchConfig {
        MatchConfig::default().with_seed(seed)
    }

    #[test]
    fn test_two_participants_always_swap() {
        let problem = MatchProblem::new(&["A", "B"], &[]);
        for seed in 0..50 {
            let result = MatchRunner::run(&problem, &seeded(seed));
            let mut assignments = result.into_assignments().expect("2-cycle always exists");
            assignments.sort();
            assert_eq!(
                assignments,
                vec![Assignment::new("A", "B"), Assignment::new("B", "A")]
            );
        }
    }

    #[test]
    fn test_two_way_exclusion_never_matches() {
        let problem = MatchProblem::new(
            &["A", "B"],
            &[Exclusion::new("A", "B"), Exclusion::new("B", "A")],
        );
        for seed in 0..50 {
            let result = MatchRunner::run(&problem, &seeded(seed));
            assert_eq!(
                result.outcome,
                MatchOutcome::NoSolution(NoSolutionReason::BudgetExhausted)
            );
            assert_eq!(result.attempts, DEFAULT_MAX_ATTEMPTS);
        }
    }

    #[test]
    fn test_fewer_than_two_is_no_solution() {
        for participants in [vec![], vec!["A"], vec!["A", "A"]] {
            let problem = MatchProblem::new(&participants, &[]);
            let result = MatchRunner::run(&problem, &seeded(1));
            assert_eq!(
                result.outcome,
                MatchOutcome::NoSolution(NoSolutionReason::InsufficientParticipants)
            );
            assert_eq!(result.attempts, 0);
        }
    }

    #[test]
    fn test_three_participants_yield_both_cycles() {
        let problem = MatchProblem::new(&["A", "B", "C"], &[]);
        let forward: HashSet<Assignment> = [
            Assignment::new("A", "B"),
            Assignment::new("B", "C"),
            Assignment::new("C", "A"),
        ]
        .into_iter()
        .collect();
        let backward: HashSet<Assignment> = [
            Assignment::new("A", "C"),
            Assignment::new("C", "B"),
            Assignment::new("B", "A"),
        ]
        .into_iter()
        .collect();

        let mut seen_forward = false;
        let mut seen_backward = false;
        for seed in 0..200 {
            let result = MatchRunner::run(&problem, &seeded(seed));
            let got: HashSet<Assignment> = result
                .into_assignments()
                .expect("3-cycles exist")
                .into_iter()
                .collect();
            if got == forward {
                seen_forward = true;
            } else if got == backward {
                seen_backward = true;
            } else {
                panic!("not a 3-cycle: {got:?}");
            }
        }
        assert!(seen_forward && seen_backward);
    }

    #[test]
    fn test_respects_single_exclusion() {
        let exclusions = [Exclusion::new("A", "B")];
        let problem = MatchProblem::new(&["A", "B", "C", "D"], &exclusions);
        for seed in 0..100 {
            let result = MatchRunner::run(&problem, &seeded(seed));
            let assignments = result.into_assignments().expect("feasible");
            assert!(problem.is_valid(&assignments));
            let a = assignments.iter().find(|a| a.giver == "A").expect("A gives");
            assert_ne!(a.receiver, "B");
        }
    }

    #[test]
    fn test_seed_reproducible() {
        let problem = MatchProblem::new(&names(20), &[Exclusion::new("P0", "P1")]);
        let a = MatchRunner::run(&problem, &seeded(42));
        let b = MatchRunner::run(&problem, &seeded(42));
        assert_eq!(a.outcome, b.outcome);
        assert_eq!(a.attempts, b.attempts);
    }

    #[test]
    fn test_injected_rng_ignores_config_seed() {
        let problem = MatchProblem::new(&names(10), &[]);
        let config = seeded(1);
        let a = MatchRunner::run_with_rng(&problem, &config, &mut create_rng(77));
        let other = config.clone().with_seed(2);
        let b = MatchRunner::run_with_rng(&problem, &other, &mut create_rng(77));
        assert_eq!(a.outcome, b.outcome);
    }

    #[test]
    fn test_fallback_rescues_tight_constraints() {
        // Only the cycle P0→P1→…→P7→P0 is allowed; greedy with a tiny
        // budget is very unlikely to find it, augmenting paths always do.
        let n = 8;
        let participants = names(n);
        let mut exclusions = Vec::new();
        for g in 0..n {
            for r in 0..n {
                if r != g && r != (g + 1) % n {
                    exclusions.push(Exclusion::new(format!("P{g}"), format!("P{r}")));
                }
            }
        }
        let problem = MatchProblem::new(&participants, &exclusions);
        let config = MatchConfig::default()
            .with_max_attempts(1)
            .with_strategy(MatchStrategy::GreedyWithFallback)
            .with_seed(5);

        let result = MatchRunner::run(&problem, &config);
        let assignments = result.assignments().expect("cycle exists");
        assert!(problem.is_valid(assignments));
        assert_eq!(result.attempts, 1);
    }

    #[test]
    fn test_augmenting_proves_infeasible() {
        let problem = MatchProblem::new(
            &["A", "B", "C"],
            &[Exclusion::new("A", "B"), Exclusion::new("A", "C")],
        );
        let config = seeded(3).with_strategy(MatchStrategy::AugmentingPath);
        let result = MatchRunner::run(&problem, &config);
        assert_eq!(
            result.outcome,
            MatchOutcome::NoSolution(NoSolutionReason::Infeasible)
        );
        assert_eq!(result.attempts, 0);
    }

    #[test]
    fn test_generate_contract() {
        let assignments = generate(&["A", "B", "C", "D", "E"], &[]).expect("feasible");
        let problem = MatchProblem::new(&["A", "B", "C", "D", "E"], &[]);
        assert!(problem.is_valid(&assignments));
        assert!(generate(&["solo"], &[]).is_none());
    }

    #[test]
    fn test_generate_calls_are_independent() {
        let participants = ["Ann", "Bob", "Cid", "Dee", "Eve", "Fay"];
        let exclusions = [
            Exclusion::new("Ann", "Bob"),
            Exclusion::new("Bob", "Ann"),
            Exclusion::new("Cid", "Dee"),
        ];
        let problem = MatchProblem::new(&participants, &exclusions);

        let first = generate(&participants, &exclusions).expect("feasible");
        let second = generate(&participants, &exclusions).expect("feasible");
        assert!(problem.is_valid(&first));
        assert!(problem.is_valid(&second));

        let mut distinct = HashSet::new();
        for _ in 0..50 {
            let mut assignments = generate(&participants, &exclusions).expect("feasible");
            assert!(problem.is_valid(&assignments));
            assignments.sort();
            distinct.insert(assignments);
        }
        assert!(distinct.len() > 1, "unseeded runs should vary");
    }

    #[test]
    #[should_panic(expected = "invalid MatchConfig")]
    fn test_zero_budget_greedy_config_panics() {
        let problem = MatchProblem::new(&["A", "B"], &[]);
        let config = MatchConfig {
            max_attempts: 0,
            ..MatchConfig::default()
        };
        MatchRunner::run(&problem, &config);
    }

    #[test]
    fn test_zero_budget_is_fine_for_augmenting() {
        let problem = MatchProblem::new(&["A", "B", "C"], &[]);
        let config = MatchConfig {
            max_attempts: 0,
            strategy: MatchStrategy::AugmentingPath,
            ..MatchConfig::default()
        };
        assert!(MatchRunner::run(&problem, &config).is_matched());
    }

    #[test]
    fn test_empty_exclusions_succeed_up_to_fifty() {
        for n in 2..=50 {
            let problem = MatchProblem::new(&names(n), &[]);
            let result = MatchRunner::run(&problem, &seeded(n as u64));
            let assignments = result.assignments().expect("derangement exists");
            assert!(problem.is_valid(assignments), "invalid result for n = {n}");
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_is_deterministic() {
        let problem = MatchProblem::new(&names(30), &[Exclusion::new("P3", "P4")]);
        let config = seeded(11).with_parallel(true);
        let a = MatchRunner::run(&problem, &config);
        let b = MatchRunner::run(&problem, &config);
        assert_eq!(a.outcome, b.outcome);
        assert!(problem.is_valid(a.assignments().expect("feasible")));
    }

    // ---- Properties ----

    fn sparse_exclusions(n: usize) -> impl Strategy<Value = Vec<(usize, usize)>> {
        proptest::collection::vec((0..n, 0..n), 0..=n / 2)
    }

    fn dense_exclusions(n: usize) -> impl Strategy<Value = Vec<(usize, usize)>> {
        proptest::collection::vec((0..n, 0..n), 0..=n * 2)
    }

    proptest! {
        #[test]
        fn prop_results_are_valid(
            (n, pairs) in (2usize..16).prop_flat_map(|n| (Just(n), sparse_exclusions(n))),
            seed in any::<u64>(),
            strategy in prop_oneof![
                Just(MatchStrategy::GreedyRetry),
                Just(MatchStrategy::AugmentingPath),
                Just(MatchStrategy::GreedyWithFallback),
            ],
        ) {
            let participants = names(n);
            let exclusions: Vec<Exclusion> = pairs
                .iter()
                .map(|&(g, r)| Exclusion::new(format!("P{g}"), format!("P{r}")))
                .collect();
            let problem = MatchProblem::new(&participants, &exclusions);
            let config = MatchConfig::default().with_strategy(strategy).with_seed(seed);

            let result = MatchRunner::run(&problem, &config);
            if let Some(assignments) = result.assignments() {
                prop_assert!(problem.is_valid(assignments));
            }
        }

        #[test]
        fn prop_augmenting_agrees_with_fallback_on_feasibility(
            (n, pairs) in (2usize..9).prop_flat_map(|n| (Just(n), dense_exclusions(n))),
            seed in any::<u64>(),
        ) {
            let participants = names(n);
            let exclusions: Vec<Exclusion> = pairs
                .iter()
                .map(|&(g, r)| Exclusion::new(format!("P{g}"), format!("P{r}")))
                .collect();
            let problem = MatchProblem::new(&participants, &exclusions);

            let complete = MatchRunner::run(
                &problem,
                &MatchConfig::default().with_strategy(MatchStrategy::AugmentingPath).with_seed(seed),
            );
            let fallback = MatchRunner::run(
                &problem,
                &MatchConfig::default()
                    .with_strategy(MatchStrategy::GreedyWithFallback)
                    .with_max_attempts(3)
                    .with_seed(seed),
            );
            prop_assert_eq!(complete.is_matched(), fallback.is_matched());
        }
    }
}
