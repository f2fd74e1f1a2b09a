// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process-wide lookup maps with atomic rebuilds.
//!
//! A [`Registry`] holds its map behind an `Arc`. Readers clone the `Arc` and
//! read without holding any lock. [`Registry::rebuild`] builds a fresh map off
//! to the side and swaps it in, so a reader sees either the old map or the new
//! one, never a half-built one.
//!
//! Registries are meant to live in statics and be rebuilt from an external
//! event hook (for example when game data is reloaded):
//!
//! ```
//! use std::sync::LazyLock;
//! use arbor_config::Registry;
//!
//! static GROUPS: LazyLock<Registry<&'static str, u32>> = LazyLock::new(Registry::new);
//!
//! GROUPS.rebuild(|map| {
//!     map.insert("iron_ingot", 3);
//!     map.insert("gold_ingot", 3);
//! });
//! assert_eq!(GROUPS.get(&"iron_ingot"), Some(3));
//! ```

use std::hash::Hash;
use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;

/// A map replaced wholesale on rebuild.
#[derive(Debug)]
pub struct Registry<K, V> {
    current: RwLock<Arc<HashMap<K, V>>>,
}

impl<K: Eq + Hash, V> Default for Registry<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V> Registry<K, V> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(HashMap::new())),
        }
    }

    /// The current map. Later rebuilds do not affect it.
    pub fn snapshot(&self) -> Arc<HashMap<K, V>> {
        Arc::clone(&self.current.read())
    }

    /// Look up one key in the current map.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.current.read().get(key).cloned()
    }

    /// Number of entries in the current map.
    pub fn len(&self) -> usize {
        self.current.read().len()
    }

    /// Whether the current map is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build a fresh map with `build` and swap it in.
    ///
    /// `build` starts from an empty map and runs without any lock held.
    /// Returns the number of entries in the new map.
    pub fn rebuild(&self, build: impl FnOnce(&mut HashMap<K, V>)) -> usize {
        let mut fresh = HashMap::new();
        build(&mut fresh);
        let len = fresh.len();
        *self.current.write() = Arc::new(fresh);
        log::debug!("registry rebuilt with {len} entries");
        len
    }
}
