/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Steal points.

use std::sync::{Condvar, Mutex};

/// A per-worker, per-depth rendezvous for work stealing.
///
/// The owning worker [`publish`](StealPoint::publish)es its current branch
/// position every time it enters a recursion at the point's depth, and
/// [`unpublish`](StealPoint::unpublish_and_keep_going)es it on the way out;
/// publishing resets the stolen mark, so each publication can be stolen at
/// most once. A thief blocks in [`steal`](StealPoint::steal) until a position
/// is available or the point is [`finish`](StealPoint::finish)ed; a
/// successful steal hands the thief the victim's pending sibling branches at
/// that depth, and the victim learns on unpublish that it must bail out of
/// them.
#[derive(Debug, Default)]
pub struct StealPoint {
    state: Mutex<State>,
    cond: Condvar,
}

#[derive(Debug, Default)]
struct State {
    has_data: bool,
    was_stolen: bool,
    is_finished: bool,
    position: Vec<u32>,
}

impl StealPoint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes the owner's current position and wakes waiting thieves.
    ///
    /// No-op once the point is finished.
    pub fn publish(&self, position: &[u32]) {
        let mut state = self.state.lock().unwrap();
        if state.is_finished {
            return;
        }
        state.position.clear();
        state.position.extend_from_slice(position);
        state.has_data = true;
        state.was_stolen = false;
        drop(state);
        self.cond.notify_all();
    }

    /// Blocks until a position is published or the point is finished;
    /// returns a copy of the position, if any, marking it stolen.
    pub fn steal(&self) -> Option<Vec<u32>> {
        let mut state = self.state.lock().unwrap();
        while !state.has_data && !state.is_finished {
            state = self.cond.wait(state).unwrap();
        }
        if !state.is_finished && state.has_data {
            state.was_stolen = true;
            Some(state.position.clone())
        } else {
            None
        }
    }

    /// Withdraws the current publication; returns false iff it was stolen,
    /// in which case the owner must bail out of the published branches.
    pub fn unpublish_and_keep_going(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.is_finished {
            return true;
        }
        state.has_data = false;
        !state.was_stolen
    }

    /// Latches the point closed and wakes all thieves empty-handed.
    pub fn finish(&self) {
        let mut state = self.state.lock().unwrap();
        state.is_finished = true;
        state.has_data = false;
        drop(state);
        self.cond.notify_all();
    }
}
