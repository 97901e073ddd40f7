/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Miscellaneous utilities.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::graphs::graph::Graph;

/// Checks that `members` are pairwise adjacent in `graph`.
pub fn is_clique(graph: &Graph, members: &BTreeSet<u32>) -> bool {
    members.iter().all(|&u| {
        members
            .iter()
            .all(|&v| u == v || graph.adjacent(u as usize, v as usize))
    })
}

/// A watcher thread that raises an abort flag at a deadline.
///
/// The thread parks on a condition variable, so dropping the timer before
/// the deadline cancels it promptly. Nothing else is needed to stop a
/// running solver: the workers poll the flag at every branch, and the
/// work queues quiesce on their own once every worker drains.
#[derive(Debug)]
pub struct AbortTimer {
    cancel: Arc<(Mutex<bool>, Condvar)>,
    handle: Option<JoinHandle<()>>,
}

impl AbortTimer {
    /// Starts a watcher that sets `abort` after `timeout`.
    pub fn start(abort: Arc<AtomicBool>, timeout: Duration) -> Self {
        let cancel = Arc::new((Mutex::new(false), Condvar::new()));
        let watcher_cancel = cancel.clone();
        let handle = std::thread::spawn(move || {
            let deadline = Instant::now() + timeout;
            let (lock, cond) = &*watcher_cancel;
            let mut cancelled = lock.lock().unwrap();
            loop {
                if *cancelled {
                    return;
                }
                let now = Instant::now();
                if now >= deadline {
                    break;
                }
                let (guard, _) = cond.wait_timeout(cancelled, deadline - now).unwrap();
                cancelled = guard;
            }
            abort.store(true, Ordering::SeqCst);
        });
        Self {
            cancel,
            handle: Some(handle),
        }
    }
}

impl Drop for AbortTimer {
    fn drop(&mut self) {
        let (lock, cond) = &*self.cancel;
        *lock.lock().unwrap() = true;
        cond.notify_all();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
