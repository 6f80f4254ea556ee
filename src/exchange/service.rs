//! Exchange orchestration: roster edits, generation, and private reveals.

use std::io;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;

use super::identity::{self, Identity};
use super::viewer_log::{ViewerLog, ViewerLogEntry};
use crate::error::{Result, SantaError};
use crate::matcher::{
    Assignment, Exclusion, MatchConfig, MatchOutcome, MatchProblem, MatchResult, MatchRunner,
    MIN_PARTICIPANTS,
};
use crate::random::rng_from_seed;
use crate::roster::{parse_participants_csv, ExclusionSet, Roster};
use crate::store::{Collection, MemoryCollection};

/// One gift exchange.
///
/// Admin operations edit the roster and exclusion rules and generate
/// assignments; viewer operations reveal a single participant's own
/// assignment. Any roster or rule change discards stored results, so a
/// stored assignment set always matches the current configuration.
///
/// # Examples
///
/// ```
/// use u_santa::exchange::{Exchange, Identity};
///
/// let mut exchange = Exchange::in_memory();
/// for name in ["Ann", "Bob", "Cid"] {
///     exchange.add_participant(name).unwrap();
/// }
/// exchange.add_exclusion("Ann", "Bob").unwrap();
///
/// let assignments = exchange.generate().unwrap();
/// assert_eq!(assignments.len(), 3);
///
/// let mine = exchange.reveal(&Identity::Name("ann".into())).unwrap().unwrap();
/// assert_eq!(mine.giver, "Ann");
/// assert_eq!(mine.receiver, "Cid");
/// ```
pub struct Exchange {
    roster: Roster,
    exclusions: ExclusionSet,
    config: MatchConfig,
    assignments: Arc<dyn Collection<Assignment>>,
    viewer_log: ViewerLog,
}

impl Exchange {
    /// Creates an exchange over the given stores.
    pub fn new(
        assignments: Arc<dyn Collection<Assignment>>,
        viewer_log: Arc<dyn Collection<ViewerLogEntry>>,
    ) -> Self {
        Self {
            roster: Roster::new(),
            exclusions: ExclusionSet::new(),
            config: MatchConfig::default(),
            assignments,
            viewer_log: ViewerLog::new(viewer_log),
        }
    }

    /// Creates an exchange backed by in-memory stores.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(MemoryCollection::<Assignment>::new()),
            Arc::new(MemoryCollection::<ViewerLogEntry>::new()),
        )
    }

    /// Sets the matcher configuration.
    pub fn with_config(mut self, config: MatchConfig) -> Result<Self> {
        config.validate().map_err(SantaError::Config)?;
        self.config = config;
        Ok(self)
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    // ---- Participants ----

    pub fn add_participant(&mut self, name: &str) -> Result<()> {
        self.roster.add(name)?;
        self.invalidate_results()
    }

    pub fn add_participant_with_email(&mut self, name: &str, email: &str) -> Result<()> {
        self.roster.add_with_email(name, email)?;
        self.invalidate_results()
    }

    /// Removes a participant and every exclusion rule mentioning them.
    pub fn remove_participant(&mut self, name: &str) -> Result<()> {
        self.roster.remove(name)?;
        let dropped = self.exclusions.remove_participant(name);
        tracing::debug!(dropped, "removed exclusion rules of departed participant");
        self.invalidate_results()
    }

    /// Replaces the roster with participants read from CSV.
    ///
    /// Rules that still refer to imported names are kept. Returns the number
    /// of participants imported.
    pub fn import_csv<R: io::Read>(&mut self, reader: R) -> Result<usize> {
        let import = parse_participants_csv(reader)?;
        let count = import.participants.len();
        self.roster.replace_all(import.participants)?;
        self.exclusions.retain_known(&self.roster);
        tracing::info!(
            participants = count,
            with_emails = import.with_emails,
            "imported participants"
        );
        self.invalidate_results()?;
        Ok(count)
    }

    // ---- Exclusions ----

    /// Adds a rule. Returns `false` if it already existed.
    pub fn add_exclusion(&mut self, giver: &str, receiver: &str) -> Result<bool> {
        let added = self.exclusions.add(&self.roster, giver, receiver)?;
        if added {
            self.invalidate_results()?;
        }
        Ok(added)
    }

    pub fn remove_exclusion(&mut self, index: usize) -> Result<Option<Exclusion>> {
        let removed = self.exclusions.remove(index);
        if removed.is_some() {
            self.invalidate_results()?;
        }
        Ok(removed)
    }

    /// Removes the rule for this pair. Returns `false` if there was none.
    pub fn remove_exclusion_rule(&mut self, giver: &str, receiver: &str) -> Result<bool> {
        let removed = self.exclusions.remove_rule(giver, receiver);
        if removed {
            self.invalidate_results()?;
        }
        Ok(removed)
    }

    // ---- Generation ----

    /// Generates and stores a fresh assignment set.
    ///
    /// The previous set and the viewer log are discarded only on success.
    pub fn generate(&self) -> Result<Vec<Assignment>> {
        let mut rng = rng_from_seed(self.config.seed);
        self.generate_with_rng(&mut rng)
    }

    /// Like [`generate`](Self::generate) with an injected random source.
    pub fn generate_with_rng<R: Rng>(&self, rng: &mut R) -> Result<Vec<Assignment>> {
        if self.roster.len() < MIN_PARTICIPANTS {
            return Err(SantaError::InsufficientParticipants {
                required: MIN_PARTICIPANTS,
                actual: self.roster.len(),
            });
        }

        let problem = MatchProblem::new(&self.roster.names(), self.exclusions.as_slice());
        let MatchResult {
            outcome, attempts, ..
        } = MatchRunner::run_with_rng(&problem, &self.config, rng);

        let mut assignments = match outcome {
            MatchOutcome::Matched(assignments) => assignments,
            MatchOutcome::NoSolution(reason) => {
                let blocked = (0..problem.len())
                    .filter(|&giver| problem.degree(giver) == 0)
                    .count();
                tracing::warn!(
                    participants = problem.len(),
                    blocked_givers = blocked,
                    exclusions = self.exclusions.len(),
                    attempts,
                    ?reason,
                    "exclusion rules could not be satisfied"
                );
                return Err(SantaError::InfeasibleConstraints { attempts });
            }
        };
        assignments.sort();

        self.assignments.replace_all(assignments.clone())?;
        self.viewer_log.clear()?;
        tracing::info!(
            participants = assignments.len(),
            attempts,
            "generated assignments"
        );
        Ok(assignments)
    }

    /// Every stored assignment, ordered by giver.
    pub fn assignments(&self) -> Result<Vec<Assignment>> {
        self.assignments.get()
    }

    /// Discards stored assignments and the viewer log.
    pub fn reset(&self) -> Result<()> {
        self.invalidate_results()
    }

    fn invalidate_results(&self) -> Result<()> {
        self.assignments.clear()?;
        self.viewer_log.clear()
    }

    // ---- Viewing ----

    /// Resolves a viewer identity to a participant name.
    pub fn resolve(&self, identity: &Identity) -> Result<String> {
        identity::resolve(&self.roster, identity)
    }

    /// Reveals the caller's own assignment and records the view.
    pub fn reveal(&self, identity: &Identity) -> Result<Option<Assignment>> {
        self.reveal_at(identity, Utc::now())
    }

    /// Like [`reveal`](Self::reveal) with an explicit view time.
    ///
    /// The giver is matched exactly, or ignoring case when that picks out a
    /// single giver. Returns `Ok(None)` when no giver matches.
    pub fn reveal_at(
        &self,
        identity: &Identity,
        viewed_at: DateTime<Utc>,
    ) -> Result<Option<Assignment>> {
        let name = self.resolve(identity)?;
        let assignments = self.assignments.get()?;
        if assignments.is_empty() {
            return Err(SantaError::NoAssignments);
        }

        let Some(mine) = own_assignment(assignments, &name) else {
            tracing::info!(viewer = %name, "no assignment for viewer");
            return Ok(None);
        };

        self.viewer_log.record(ViewerLogEntry {
            name: mine.giver.clone(),
            receiver: mine.receiver.clone(),
            viewed_at,
        })?;
        tracing::info!(viewer = %mine.giver, "assignment revealed");
        Ok(Some(mine))
    }

    /// Reveal history, newest first.
    pub fn viewer_log(&self) -> Result<Vec<ViewerLogEntry>> {
        self.viewer_log.entries()
    }
}

/// Exact giver match first; a case-insensitive match only when unique.
fn own_assignment(mut assignments: Vec<Assignment>, name: &str) -> Option<Assignment> {
    if let Some(i) = assignments.iter().position(|a| a.giver == name) {
        return Some(assignments.swap_remove(i));
    }
    let folded = name.to_lowercase();
    let mut candidates = assignments
        .iter()
        .enumerate()
        .filter(|(_, a)| a.giver.to_lowercase() == folded)
        .map(|(i, _)| i);
    match (candidates.next(), candidates.next()) {
        (Some(i), None) => Some(assignments.swap_remove(i)),
        _ => None,
    }
}
