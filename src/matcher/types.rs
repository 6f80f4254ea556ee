//! Matcher input and output types.

use std::collections::HashMap;

/// A forbidden `(giver, receiver)` pairing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exclusion {
    /// Participant who must not give to `receiver`.
    pub giver: String,
    /// Participant who must not receive from `giver`.
    pub receiver: String,
}

impl Exclusion {
    pub fn new(giver: impl Into<String>, receiver: impl Into<String>) -> Self {
        Self {
            giver: giver.into(),
            receiver: receiver.into(),
        }
    }
}

/// One `giver → receiver` pair of a generated result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    /// Participant who gives the gift.
    pub giver: String,
    /// Participant who receives it.
    pub receiver: String,
}

impl Assignment {
    pub fn new(giver: impl Into<String>, receiver: impl Into<String>) -> Self {
        Self {
            giver: giver.into(),
            receiver: receiver.into(),
        }
    }
}

/// Preprocessed matching input.
///
/// Participants are de-duplicated keeping the first occurrence and
/// addressed by index. Exclusions become an `n × n` allowed matrix whose
/// diagonal is always forbidden. Exclusions naming someone outside the
/// participant list are ignored, and duplicate exclusions collapse.
///
/// # Examples
///
/// ```
/// use u_santa::matcher::{Exclusion, MatchProblem};
///
/// let problem = MatchProblem::new(
///     &["Ann", "Bob", "Cid"],
///     &[Exclusion::new("Ann", "Bob")],
/// );
/// assert_eq!(problem.len(), 3);
/// assert!(!problem.allows(0, 1));
/// assert!(problem.allows(1, 0));
/// assert!(!problem.allows(2, 2));
/// ```
#[derive(Debug, Clone)]
pub struct MatchProblem {
    names: Vec<String>,
    allowed: Vec<bool>,
}

impl MatchProblem {
    /// Builds a problem from participant names and exclusion rules.
    pub fn new<S: AsRef<str>>(participants: &[S], exclusions: &[Exclusion]) -> Self {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(participants.len());
        let mut names = Vec::with_capacity(participants.len());
        for name in participants {
            let name = name.as_ref();
            if !index.contains_key(name) {
                index.insert(name, names.len());
                names.push(name.to_string());
            }
        }

        let n = names.len();
        let mut allowed = vec![true; n * n];
        for i in 0..n {
            allowed[i * n + i] = false;
        }
        for ex in exclusions {
            if let (Some(&g), Some(&r)) = (
                index.get(ex.giver.as_str()),
                index.get(ex.receiver.as_str()),
            ) {
                allowed[g * n + r] = false;
            }
        }

        Self { names, allowed }
    }

    /// Number of distinct participants.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Participant names in index order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether `giver` may give to `receiver` (both are indices).
    pub fn allows(&self, giver: usize, receiver: usize) -> bool {
        self.allowed[giver * self.names.len() + receiver]
    }

    /// Number of receivers open to `giver`.
    pub fn degree(&self, giver: usize) -> usize {
        let n = self.names.len();
        self.allowed[giver * n..(giver + 1) * n]
            .iter()
            .filter(|&&ok| ok)
            .count()
    }

    /// Converts `(giver, receiver)` index pairs into named assignments.
    pub(crate) fn to_assignments(&self, pairs: &[(usize, usize)]) -> Vec<Assignment> {
        pairs
            .iter()
            .map(|&(g, r)| Assignment::new(self.names[g].clone(), self.names[r].clone()))
            .collect()
    }

    /// Checks every result invariant: bijection over the participants,
    /// no self-assignment, and no excluded pair.
    pub fn is_valid(&self, assignments: &[Assignment]) -> bool {
        let n = self.names.len();
        if assignments.len() != n {
            return false;
        }
        let index: HashMap<&str, usize> = self
            .names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        let mut gives = vec![false; n];
        let mut receives = vec![false; n];
        for a in assignments {
            let (Some(&g), Some(&r)) = (
                index.get(a.giver.as_str()),
                index.get(a.receiver.as_str()),
            ) else {
                return false;
            };
            if gives[g] || receives[r] || !self.allows(g, r) {
                return false;
            }
            gives[g] = true;
            receives[r] = true;
        }
        true
    }
}

/// Why a run produced no assignment set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoSolutionReason {
    /// Fewer than two distinct participants.
    InsufficientParticipants,
    /// The randomized attempt budget ran out. A solution may still exist.
    BudgetExhausted,
    /// A complete search proved that no valid assignment exists.
    Infeasible,
}

/// Outcome of a matching run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// A full, valid assignment set.
    Matched(Vec<Assignment>),
    /// No assignment set; never a partial one.
    NoSolution(NoSolutionReason),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_dedups_participants() {
        let problem = MatchProblem::new(&["A", "B", "A", "C"], &[]);
        assert_eq!(problem.names(), &["A", "B", "C"]);
    }

    #[test]
    fn test_problem_ignores_unknown_exclusions() {
        let problem = MatchProblem::new(&["A", "B"], &[Exclusion::new("A", "Z")]);
        assert!(problem.allows(0, 1));
        assert!(problem.allows(1, 0));
    }

    #[test]
    fn test_duplicate_exclusions_collapse() {
        let ex = Exclusion::new("A", "B");
        let problem = MatchProblem::new(&["A", "B", "C"], &[ex.clone(), ex]);
        assert!(!problem.allows(0, 1));
        assert_eq!(problem.degree(0), 1);
    }

    #[test]
    fn test_degree_excludes_self() {
        let problem = MatchProblem::new(&["A", "B", "C", "D"], &[]);
        for g in 0..4 {
            assert_eq!(problem.degree(g), 3);
        }
    }

    #[test]
    fn test_is_valid_rejects_violations() {
        let problem = MatchProblem::new(&["A", "B", "C"], &[Exclusion::new("A", "C")]);

        let good = vec![
            Assignment::new("A", "B"),
            Assignment::new("B", "C"),
            Assignment::new("C", "A"),
        ];
        assert!(problem.is_valid(&good));

        let excluded = vec![
            Assignment::new("A", "C"),
            Assignment::new("C", "B"),
            Assignment::new("B", "A"),
        ];
        assert!(!problem.is_valid(&excluded));

        let self_pair = vec![
            Assignment::new("A", "B"),
            Assignment::new("B", "A"),
            Assignment::new("C", "C"),
        ];
        assert!(!problem.is_valid(&self_pair));

        let repeated_receiver = vec![
            Assignment::new("A", "B"),
            Assignment::new("B", "C"),
            Assignment::new("C", "B"),
        ];
        assert!(!problem.is_valid(&repeated_receiver));

        assert!(!problem.is_valid(&good[..2]));
    }
}
