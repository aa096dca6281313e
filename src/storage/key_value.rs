use std::{
    collections::HashMap,
    ops::{Deref, DerefMut},
};

use anyhow::Result;

/// Interface for abstracting the medium attendance data lives in. Everything the application
/// persists fits under a handful of string keys, so this is deliberately a flat string map.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore {
    /// Returns `None` when nothing was ever stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<T: DerefMut> KeyValueStore for T
where
    T::Target: KeyValueStore,
{
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.deref().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.deref_mut().set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.deref_mut().remove(key)
    }
}

/// Store that forgets everything once dropped. Used by tests and for previews that must not
/// touch the disk.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}
