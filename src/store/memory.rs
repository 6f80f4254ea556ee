//! In-memory collection.

use std::sync::RwLock;

use super::Collection;
use crate::error::{Result, SantaError};

/// A [`Collection`] held in process memory behind a single lock.
#[derive(Debug)]
pub struct MemoryCollection<T> {
    items: RwLock<Vec<T>>,
}

impl<T> MemoryCollection<T> {
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }
}

impl<T> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<E>(_: E) -> SantaError {
    SantaError::Store("collection lock poisoned".into())
}

impl<T: Clone + Send + Sync> Collection<T> for MemoryCollection<T> {
    fn get(&self) -> Result<Vec<T>> {
        Ok(self.items.read().map_err(poisoned)?.clone())
    }

    fn replace_all(&self, items: Vec<T>) -> Result<()> {
        *self.items.write().map_err(poisoned)? = items;
        Ok(())
    }

    fn update(&self, edit: &mut dyn FnMut(&mut Vec<T>)) -> Result<()> {
        let mut items = self.items.write().map_err(poisoned)?;
        edit(&mut *items);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.items.write().map_err(poisoned)?.clear();
        Ok(())
    }
}
