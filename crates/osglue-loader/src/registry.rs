//! Module registry with identity-preserving dual-name registration.
//!
//! The native layer performs identity-sensitive type dispatch across
//! namespace boundaries, so both top-level names must resolve to the exact
//! same loaded object. The registry stores one shared handle under two
//! lookup keys; it never copies or re-initializes a package.

use crate::error::LoadError;
use crate::package::FlatNamespace;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, OnceLock};

#[derive(Debug, Default)]
pub struct ModuleRegistry {
    entries: BTreeMap<String, Arc<FlatNamespace>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to the package. Re-binding the same object is a no-op;
    /// binding a different object under an occupied name is an error.
    pub fn register(&mut self, name: &str, package: Arc<FlatNamespace>) -> Result<(), LoadError> {
        match self.entries.get(name) {
            Some(existing) if Arc::ptr_eq(existing, &package) => Ok(()),
            Some(_) => Err(LoadError::AlreadyRegistered {
                name: name.to_string(),
            }),
            None => {
                self.entries.insert(name.to_string(), package);
                Ok(())
            }
        }
    }

    /// Bind `alternate` to the identical object already bound to `primary`.
    pub fn register_alias(&mut self, primary: &str, alternate: &str) -> Result<(), LoadError> {
        let package = self
            .entries
            .get(primary)
            .cloned()
            .ok_or_else(|| LoadError::NotRegistered {
                name: primary.to_string(),
            })?;
        self.register(alternate, package)
    }

    pub fn get(&self, name: &str) -> Option<Arc<FlatNamespace>> {
        self.entries.get(name).cloned()
    }

    /// Reference identity of two registered names.
    pub fn same_package(&self, a: &str, b: &str) -> bool {
        match (self.entries.get(a), self.entries.get(b)) {
            (Some(left), Some(right)) => Arc::ptr_eq(left, right),
            _ => false,
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }
}

/// The process-wide registry. Load-time registration mutates process-wide
/// naming state; the load step assumes it is invoked once and never
/// concurrently with itself.
pub fn global() -> &'static Mutex<ModuleRegistry> {
    static GLOBAL: OnceLock<Mutex<ModuleRegistry>> = OnceLock::new();
    GLOBAL.get_or_init(|| Mutex::new(ModuleRegistry::new()))
}
