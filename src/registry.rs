//! Named backoff management utilities.
//!
//! This module introduces a lightweight registry for [`Backoff`] values.
//! Registries can be instantiated locally (requires `alloc`) or accessed via
//! a global registry when the `std` feature is enabled, so an application can
//! organise its retry configurations by name ("api", "workers", ...) in one
//! place.

use crate::Backoff;

#[cfg(any(feature = "std", feature = "alloc"))]
use alloc::string::String;
#[cfg(any(feature = "std", feature = "alloc"))]
use alloc::vec::Vec;

/// In-memory registry for named [`Backoff`] values.
///
/// Lookups are a linear scan over an internal vector, which keeps the
/// implementation `no_std`-friendly (with `alloc`) and is plenty for the
/// handful of configurations a typical application defines.
#[cfg(any(feature = "std", feature = "alloc"))]
#[derive(Debug, Clone, Default)]
pub struct BackoffRegistry {
    entries: Vec<(String, Backoff)>,
}

#[cfg(any(feature = "std", feature = "alloc"))]
impl BackoffRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a backoff under the given name.
    ///
    /// Returns the previously registered backoff if one existed.
    pub fn register(&mut self, name: impl Into<String>, backoff: Backoff) -> Option<Backoff> {
        let name = name.into();
        if let Some((_, existing)) = self
            .entries
            .iter_mut()
            .find(|(existing_name, _)| *existing_name == name)
        {
            let previous = *existing;
            *existing = backoff;
            Some(previous)
        } else {
            self.entries.push((name, backoff));
            None
        }
    }

    /// Retrieve a backoff by name.
    pub fn get(&self, name: &str) -> Option<Backoff> {
        self.entries
            .iter()
            .find(|(existing_name, _)| existing_name == name)
            .map(|(_, backoff)| *backoff)
    }

    /// Remove a backoff by name.
    ///
    /// Returns the removed backoff when it existed.
    pub fn remove(&mut self, name: &str) -> Option<Backoff> {
        if let Some(index) = self
            .entries
            .iter()
            .position(|(existing_name, _)| existing_name == name)
        {
            Some(self.entries.swap_remove(index).1)
        } else {
            None
        }
    }

    /// Return all registered backoffs as `(name, backoff)` tuples.
    pub fn all(&self) -> Vec<(String, Backoff)> {
        self.entries.iter().cloned().collect()
    }

    /// Clear the registry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(feature = "std")]
use std::sync::{OnceLock, RwLock};

#[cfg(feature = "std")]
fn global_registry() -> &'static RwLock<BackoffRegistry> {
    static GLOBAL_BACKOFFS: OnceLock<RwLock<BackoffRegistry>> = OnceLock::new();
    GLOBAL_BACKOFFS.get_or_init(|| RwLock::new(BackoffRegistry::new()))
}

/// Register a backoff in the global registry (requires `std`).
#[cfg(feature = "std")]
pub fn register_global_backoff(name: impl Into<String>, backoff: Backoff) -> Option<Backoff> {
    let mut guard = global_registry()
        .write()
        .expect("resolute global backoff registry poisoned");
    guard.register(name, backoff)
}

/// Fetch a backoff from the global registry (requires `std`).
#[cfg(feature = "std")]
pub fn get_global_backoff(name: &str) -> Option<Backoff> {
    let guard = global_registry()
        .read()
        .expect("resolute global backoff registry poisoned");
    guard.get(name)
}

/// Remove a backoff from the global registry (requires `std`).
#[cfg(feature = "std")]
pub fn remove_global_backoff(name: &str) -> Option<Backoff> {
    let mut guard = global_registry()
        .write()
        .expect("resolute global backoff registry poisoned");
    guard.remove(name)
}

/// List all backoffs from the global registry (requires `std`).
#[cfg(feature = "std")]
pub fn list_global_backoffs() -> Vec<(String, Backoff)> {
    let guard = global_registry()
        .read()
        .expect("resolute global backoff registry poisoned");
    guard.all()
}

/// Clear all entries from the global registry (requires `std`).
#[cfg(feature = "std")]
pub fn clear_global_backoffs() {
    let mut guard = global_registry()
        .write()
        .expect("resolute global backoff registry poisoned");
    guard.clear();
}
