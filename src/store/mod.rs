//! Persistence capability for generated results and the viewer log.
//!
//! The exchange treats storage as a set of named collections supporting
//! three operations: read everything, replace everything, and clear.
//! Implementations must make [`Collection::replace_all`] and
//! [`Collection::update`] appear atomic to readers: a reader sees either the
//! old items or the new ones, never a mix. Concurrent updates must not
//! overwrite each other.

mod memory;

pub use memory::MemoryCollection;

use crate::error::Result;

/// A whole-collection store of `T`.
pub trait Collection<T>: Send + Sync {
    /// Returns every stored item.
    fn get(&self) -> Result<Vec<T>>;

    /// Replaces the stored items with `items`.
    fn replace_all(&self, items: Vec<T>) -> Result<()>;

    /// Applies `edit` to the stored items as one atomic read-modify-write.
    fn update(&self, edit: &mut dyn FnMut(&mut Vec<T>)) -> Result<()>;

    /// Removes every stored item.
    fn clear(&self) -> Result<()>;
}
