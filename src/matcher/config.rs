//! Matcher configuration and strategies.

/// Attempt budget of the randomized greedy construction.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// Smallest participant count that admits a gift exchange.
pub const MIN_PARTICIPANTS: usize = 2;

/// How the matcher searches for a valid assignment set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MatchStrategy {
    /// Randomized greedy construction restarted up to `max_attempts` times.
    ///
    /// Each attempt shuffles givers and receivers, then hands each giver a
    /// uniformly random allowed receiver from the remaining pool. A dead end
    /// aborts the attempt; there is no backtracking. Tight exclusion sets can
    /// therefore exhaust the budget even though a solution exists.
    #[default]
    GreedyRetry,

    /// Randomized augmenting-path search followed by receiver-swap mixing.
    ///
    /// Always finds a valid assignment set when one exists, and proves
    /// infeasibility otherwise.
    AugmentingPath,

    /// [`GreedyRetry`](Self::GreedyRetry), falling back to
    /// [`AugmentingPath`](Self::AugmentingPath) when the budget runs out.
    GreedyWithFallback,
}

/// Configuration for the matcher.
///
/// # Examples
///
/// ```
/// use u_santa::matcher::{MatchConfig, MatchStrategy};
///
/// let config = MatchConfig::default()
///     .with_max_attempts(5000)
///     .with_strategy(MatchStrategy::GreedyWithFallback)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Maximum number of greedy attempts before giving up.
    pub max_attempts: usize,

    /// Search strategy.
    pub strategy: MatchStrategy,

    /// Receiver-swap sweeps applied after an augmenting-path match.
    ///
    /// One sweep proposes `n` random swaps. 0 keeps the raw matching.
    pub mixing_sweeps: usize,

    /// Whether to run greedy attempts in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            strategy: MatchStrategy::default(),
            mixing_sweeps: 4,
            parallel: false,
            seed: None,
        }
    }
}

impl MatchConfig {
    /// Sets the greedy attempt budget (at least 1).
    pub fn with_max_attempts(mut self, n: usize) -> Self {
        self.max_attempts = n.max(1);
        self
    }

    pub fn with_strategy(mut self, strategy: MatchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_mixing_sweeps(mut self, sweeps: usize) -> Self {
        self.mixing_sweeps = sweeps;
        self
    }

    /// Enables or disables parallel attempts.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        let uses_greedy = matches!(
            self.strategy,
            MatchStrategy::GreedyRetry | MatchStrategy::GreedyWithFallback
        );
        if uses_greedy && self.max_attempts == 0 {
            return Err("max_attempts must be at least 1".into());
        }
        Ok(())
    }
}
