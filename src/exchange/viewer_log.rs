//! Record of who has revealed their assignment, and when.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::store::Collection;

/// One reveal by a participant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewerLogEntry {
    /// Giver who looked.
    pub name: String,
    /// Receiver they saw.
    pub receiver: String,
    pub viewed_at: DateTime<Utc>,
}

/// Keeps at most one entry per name; a newer reveal replaces the older one.
#[derive(Clone)]
pub struct ViewerLog {
    store: Arc<dyn Collection<ViewerLogEntry>>,
}

impl ViewerLog {
    pub fn new(store: Arc<dyn Collection<ViewerLogEntry>>) -> Self {
        Self { store }
    }

    pub fn record(&self, entry: ViewerLogEntry) -> Result<()> {
        let mut entry = Some(entry);
        self.store.update(&mut |entries| {
            if let Some(entry) = entry.take() {
                entries.retain(|e| e.name != entry.name);
                entries.push(entry);
            }
        })
    }

    /// Entries, newest first.
    pub fn entries(&self) -> Result<Vec<ViewerLogEntry>> {
        let mut entries = self.store.get()?;
        entries.sort_by(|a, b| b.viewed_at.cmp(&a.viewed_at));
        Ok(entries)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.clear()
    }
}
