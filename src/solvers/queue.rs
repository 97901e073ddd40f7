/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The subproblem queue.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex};

/// A queue that supports an initial producer, followed by work donation.
///
/// Initially, a producer populates the queue using
/// [`enqueue_blocking`](Queue::enqueue_blocking); this phase is bounded,
/// since the producer may otherwise create millions of items. Once the
/// producer is done, [`initial_producer_done`](Queue::initial_producer_done)
/// is called.
///
/// There is a fixed number of consumers (a constructor parameter). Consumers
/// call [`dequeue_blocking`](Queue::dequeue_blocking), which returns `None`
/// when the consumer should exit.
///
/// Because the workload is irregular, the producer may be done and the queue
/// empty while some consumers still hold a lot of work. In that situation
/// [`want_donations`](Queue::want_donations) turns true, and consumers may
/// hand some of their pending subproblems to the queue using
/// [`enqueue`](Queue::enqueue). An empty queue therefore does not mean that
/// consumers should exit, unless the initial producer is also done and no
/// consumer can possibly donate.
#[derive(Debug)]
pub struct Queue<T> {
    donations_possible: bool,
    state: Mutex<State<T>>,
    cond: Condvar,
    /// Readable without holding the state lock.
    want_donations: AtomicBool,
    producer_claimed: AtomicBool,
}

#[derive(Debug)]
struct State<T> {
    items: VecDeque<T>,
    initial_producer_done: bool,
    /// How many consumers are busy; used to decide whether donations might
    /// still be produced or consumers can exit.
    number_busy: usize,
}

impl<T> Queue<T> {
    /// Creates a queue for a known number of consumers. Donations may be
    /// disabled.
    pub fn new(number_of_dequeuers: usize, donations_possible: bool) -> Self {
        Self {
            donations_possible,
            state: Mutex::new(State {
                items: VecDeque::new(),
                initial_producer_done: false,
                number_busy: number_of_dequeuers,
            }),
            cond: Condvar::new(),
            want_donations: AtomicBool::new(false),
            producer_claimed: AtomicBool::new(false),
        }
    }

    /// Called by the initial producer when producing work.
    ///
    /// Blocks while more than `cap` items are pending, so the queue cannot
    /// grow without bound during the producer phase.
    pub fn enqueue_blocking(&self, item: T, cap: usize) {
        let mut state = self.state.lock().unwrap();
        while state.items.len() > cap {
            state = self.cond.wait(state).unwrap();
        }
        state.items.push_back(item);
        // we are not empty, so we don't want donations
        self.want_donations.store(false, Ordering::SeqCst);
        self.cond.notify_all();
    }

    /// Called by consumers when donating work.
    ///
    /// May be called even if donations are not being requested.
    pub fn enqueue(&self, item: T) {
        let mut state = self.state.lock().unwrap();
        state.items.push_back(item);
        self.want_donations.store(false, Ordering::SeqCst);
        self.cond.notify_all();
    }

    /// Called by consumers waiting for work.
    ///
    /// Blocks until an item is available and returns it; returns `None` when
    /// the consumer should exit. We must not return `None` while the initial
    /// producer is still running, or while any other consumer is busy (it
    /// may donate work); we must return `None` once the producer is done and
    /// every consumer is waiting.
    pub fn dequeue_blocking(&self) -> Option<T> {
        let mut state = self.state.lock().unwrap();
        loop {
            if let Some(item) = state.items.pop_front() {
                if state.initial_producer_done && state.items.is_empty() {
                    // nothing else will come from the producer: ask for
                    // donations
                    self.want_donations.store(true, Ordering::SeqCst);
                }
                // the producer might be waiting for space
                self.cond.notify_all();
                return Some(item);
            }

            // about to block or give up, so no longer busy
            state.number_busy -= 1;

            if state.initial_producer_done
                && (!self.want_donations() || state.number_busy == 0)
            {
                // nothing can possibly be produced any more; others may be
                // waiting for number_busy to reach zero
                self.cond.notify_all();
                return None;
            }

            state = self.cond.wait(state).unwrap();

            // potentially busy again; a spurious wakeup will simply come
            // back around the loop
            state.number_busy += 1;
        }
    }

    /// Must be called once the initial producer is finished.
    pub fn initial_producer_done(&self) {
        let mut state = self.state.lock().unwrap();
        state.initial_producer_done = true;
        // consumers may already have drained the queue
        if state.items.is_empty() {
            self.want_donations.store(true, Ordering::SeqCst);
        }
        drop(state);
        self.cond.notify_all();
    }

    /// If a consumer has an opportunity to donate, should it?
    pub fn want_donations(&self) -> bool {
        // it's fine to see a slightly stale value here
        self.donations_possible && self.want_donations.load(Ordering::Relaxed)
    }

    /// Latches the producer role: true for the first caller only.
    pub fn want_producer(&self) -> bool {
        !self.producer_claimed.swap(true, Ordering::SeqCst)
    }
}
