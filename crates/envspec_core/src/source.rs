//! Input sources that variables are resolved against.
//!
//! An empty string means "absent": a source cannot distinguish a variable
//! that is unset from one that is set to the empty string.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

/// A read-only lookup of raw variable values.
#[cfg_attr(test, mockall::automock)]
pub trait Source: Send + Sync {
    /// Return the raw value of `name`, or an empty string if it is absent.
    fn get(&self, name: &str) -> String;
}

/// Reads values from the process environment.
///
/// Values that are not valid unicode are treated as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Source for ProcessEnv {
    fn get(&self, name: &str) -> String {
        std::env::var(name).unwrap_or_default()
    }
}

/// An in-memory source.
///
/// Clones share the same underlying values, so a test can hand a clone to a
/// variable and keep setting values through the original.
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MapSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, returning the source for chaining.
    pub fn with(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a value.
    pub fn set(&self, name: impl Into<String>, value: impl Into<String>) {
        self.values.write().insert(name.into(), value.into());
    }

    /// Remove a value.
    pub fn remove(&self, name: &str) -> Option<String> {
        self.values.write().remove(name)
    }

    /// Remove all values.
    pub fn clear(&self) {
        self.values.write().clear();
    }
}

impl Source for MapSource {
    fn get(&self, name: &str) -> String {
        self.values.read().get(name).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_source_absent_is_empty() {
        let source = MapSource::new();
        assert_eq!(source.get("MISSING"), "");
    }

    #[test]
    fn test_map_source_clones_share_values() {
        let source = MapSource::new();
        let handle = source.clone();

        source.set("HOST", "localhost");
        assert_eq!(handle.get("HOST"), "localhost");

        source.remove("HOST");
        assert_eq!(handle.get("HOST"), "");
    }

    #[test]
    fn test_process_env() {
        std::env::set_var("ENVSPEC_SOURCE_TEST_PROCESS_ENV", "value");
        assert_eq!(ProcessEnv.get("ENVSPEC_SOURCE_TEST_PROCESS_ENV"), "value");
        assert_eq!(ProcessEnv.get("ENVSPEC_SOURCE_TEST_UNSET"), "");
    }
}
