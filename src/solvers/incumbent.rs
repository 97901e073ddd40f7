/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The shared best-known clique size.

use std::sync::atomic::{AtomicU32, Ordering};

use crossbeam_utils::CachePadded;

/// The size of the best clique any worker has found so far.
///
/// Workers read this at every branch to prune, and try to raise it whenever
/// they complete a clique. All updates are strictly monotone, so a plain CAS
/// loop suffices; reads are relaxed, because a stale (smaller) value only
/// causes extra work, never a missed solution.
///
/// The winner of an [`update`](Incumbent::update) is responsible for
/// snapshotting the clique members into its thread-local result; the
/// snapshots are reconciled when the locals are merged at join time.
#[derive(Debug, Default)]
pub struct Incumbent {
    value: CachePadded<AtomicU32>,
}

impl Incumbent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current best size; possibly slightly stale.
    #[inline(always)]
    pub fn get(&self) -> u32 {
        self.value.load(Ordering::Relaxed)
    }

    /// Raises the best size to `size`, unless someone got there first.
    ///
    /// Returns true iff this call strictly raised the maximum.
    pub fn update(&self, size: u32) -> bool {
        let mut current = self.value.load(Ordering::Relaxed);
        while size > current {
            match self.value.compare_exchange_weak(
                current,
                size,
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => return true,
                Err(seen) => current = seen,
            }
        }
        false
    }
}
