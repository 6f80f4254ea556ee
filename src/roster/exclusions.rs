//! Exclusion rule editing.

use super::participants::Roster;
use crate::error::{Result, SantaError};
use crate::matcher::Exclusion;

/// Ordered list of exclusion rules without duplicates.
///
/// Rules always reference participants that were on the roster when they
/// were added; [`remove_participant`](Self::remove_participant) and
/// [`retain_known`](Self::retain_known) keep it that way after roster edits.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    rules: Vec<Exclusion>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a "`giver` can't give to `receiver`" rule.
    ///
    /// Returns `Ok(false)` if the rule already exists.
    pub fn add(&mut self, roster: &Roster, giver: &str, receiver: &str) -> Result<bool> {
        for name in [giver, receiver] {
            if !roster.contains(name) {
                return Err(SantaError::UnknownParticipant(name.to_string()));
            }
        }
        if giver == receiver {
            return Err(SantaError::SelfExclusion(giver.to_string()));
        }
        if self.contains(giver, receiver) {
            return Ok(false);
        }
        self.rules.push(Exclusion::new(giver, receiver));
        Ok(true)
    }

    /// Removes the rule at `index`.
    pub fn remove(&mut self, index: usize) -> Option<Exclusion> {
        (index < self.rules.len()).then(|| self.rules.remove(index))
    }

    /// Removes a rule by its pair. Returns whether it existed.
    pub fn remove_rule(&mut self, giver: &str, receiver: &str) -> bool {
        let before = self.rules.len();
        self.rules
            .retain(|e| !(e.giver == giver && e.receiver == receiver));
        self.rules.len() != before
    }

    /// Drops every rule that mentions `name`.
    pub fn remove_participant(&mut self, name: &str) -> usize {
        let before = self.rules.len();
        self.rules.retain(|e| e.giver != name && e.receiver != name);
        before - self.rules.len()
    }

    /// Drops every rule that mentions someone not on `roster`.
    pub fn retain_known(&mut self, roster: &Roster) -> usize {
        let before = self.rules.len();
        self.rules
            .retain(|e| roster.contains(&e.giver) && roster.contains(&e.receiver));
        before - self.rules.len()
    }

    pub fn contains(&self, giver: &str, receiver: &str) -> bool {
        self.rules
            .iter()
            .any(|e| e.giver == giver && e.receiver == receiver)
    }

    pub fn as_slice(&self) -> &[Exclusion] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
