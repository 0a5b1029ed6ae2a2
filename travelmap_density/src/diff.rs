// Copyright 2025 the Travelmap Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Set difference between two key generations.

use alloc::vec::Vec;
use core::hash::{BuildHasher, Hash};

use hashbrown::HashMap;

/// Keys partitioned into retained, added and removed sets.
///
/// Each list is sorted, so processing a `KeyDiff` never depends on the
/// iteration order of the maps it was computed from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyDiff<K> {
    /// Keys present in both generations.
    pub retained: Vec<K>,
    /// Keys present only in the new generation.
    pub added: Vec<K>,
    /// Keys present only in the old generation.
    pub removed: Vec<K>,
}

impl<K> Default for KeyDiff<K> {
    fn default() -> Self {
        Self {
            retained: Vec::new(),
            added: Vec::new(),
            removed: Vec::new(),
        }
    }
}

impl<K> KeyDiff<K>
where
    K: Clone + Ord + Eq + Hash,
{
    /// Computes the difference between the key sets of `old` and `new`.
    #[must_use]
    pub fn between<A, B, S1, S2>(old: &HashMap<K, A, S1>, new: &HashMap<K, B, S2>) -> Self
    where
        S1: BuildHasher,
        S2: BuildHasher,
    {
        let mut diff = Self::default();
        for key in new.keys() {
            if old.contains_key(key) {
                diff.retained.push(key.clone());
            } else {
                diff.added.push(key.clone());
            }
        }
        diff.removed.extend(
            old.keys()
                .filter(|key| !new.contains_key(*key))
                .cloned(),
        );
        diff.retained.sort_unstable();
        diff.added.sort_unstable();
        diff.removed.sort_unstable();
        diff
    }
}
