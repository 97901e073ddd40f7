/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The producer/donation strategy.
//!
//! A producer thread expands the search tree down to `split_depth`, feeding a
//! bounded queue with one subproblem per branch that reaches that depth;
//! workers drain the queue, re-checking each subproblem's bound against the
//! incumbent before expanding it. Once the producer is done and the queue
//! runs dry, workers that still hold large subtrees may donate pending
//! branches back to the queue, so that idle workers pick them up.

use std::sync::atomic::Ordering;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use log::trace;

use super::incumbent::Incumbent;
use super::queue::Queue;
use super::{
    found_possible_new_best, new_frames, Frame, MaxCliqueParams, MaxCliqueResult,
};
use crate::colour::{colour_class_order, ColourOrder, ColourScratch};
use crate::graphs::bit_graph::BitGraph;
use crate::graphs::bit_set::BitSet;

struct QueueItem<const W: usize> {
    c: BitSet<W>,
    c_len: u32,
    p: BitSet<W>,
    /// The bound this subproblem was enqueued under; re-checked on dequeue.
    cn: u32,
    position: Vec<u32>,
}

struct Shared<'a, const W: usize> {
    graph: &'a BitGraph<W>,
    order: &'a [u32],
    params: &'a MaxCliqueParams,
    colour_order: ColourOrder,
    incumbent: Incumbent,
    queue: Queue<QueueItem<W>>,
}

/// Thread-local state of one producer or worker.
struct Ctx {
    result: MaxCliqueResult,
    scratch: ColourScratch,
    last_donation: Instant,
}

impl Ctx {
    fn new() -> Self {
        Self {
            result: MaxCliqueResult::default(),
            scratch: ColourScratch::default(),
            last_donation: Instant::now(),
        }
    }
}

pub(crate) fn max_clique<const W: usize>(
    graph: &BitGraph<W>,
    order: &[u32],
    colour_order: ColourOrder,
    params: &MaxCliqueParams,
) -> MaxCliqueResult {
    let n_threads = params.n_threads.max(1);
    let shared = Shared {
        graph,
        order,
        params,
        colour_order,
        incumbent: Incumbent::new(),
        queue: Queue::new(n_threads, params.work_donation),
    };
    shared.incumbent.update(params.initial_bound);

    let global = Mutex::new(MaxCliqueResult {
        size: params.initial_bound,
        ..MaxCliqueResult::default()
    });

    thread::scope(|s| {
        let shared = &shared;
        let global = &global;

        // populate
        s.spawn(move || {
            let mut ctx = Ctx::new();
            let mut frames = new_frames(graph.size());
            let mut c = BitSet::new();
            let mut p = BitSet::with_first_set(graph.size());
            let mut position = vec![0];

            expand(
                shared, true, false, &mut ctx, &mut c, 0, &mut p, &mut position, &mut frames,
            );

            shared.queue.initial_producer_done();
            global.lock().unwrap().merge(ctx.result);
        });

        // workers
        for _ in 0..n_threads {
            s.spawn(move || {
                let start_time = Instant::now();
                let mut overall_time = Duration::ZERO;
                let mut ctx = Ctx::new();
                let mut frames = new_frames(graph.size());

                while let Some(mut item) = shared.queue.dequeue_blocking() {
                    // someone may have beaten this subproblem's bound since
                    // it was enqueued
                    if item.cn <= shared.incumbent.get() {
                        continue;
                    }
                    expand(
                        shared,
                        false,
                        params.work_donation,
                        &mut ctx,
                        &mut item.c,
                        item.c_len,
                        &mut item.p,
                        &mut item.position,
                        &mut frames,
                    );
                    overall_time = start_time.elapsed();
                }

                let mut global = global.lock().unwrap();
                global.merge(ctx.result);
                global.times.push(overall_time);
            });
        }
    });

    global.into_inner().unwrap()
}

#[allow(clippy::too_many_arguments)]
fn expand<const W: usize>(
    shared: &Shared<W>,
    populate: bool,
    donate: bool,
    ctx: &mut Ctx,
    c: &mut BitSet<W>,
    c_len: u32,
    p: &mut BitSet<W>,
    position: &mut Vec<u32>,
    frames: &mut [Frame<W>],
) {
    ctx.result.nodes += 1;

    let (frame, rest) = frames.split_first_mut().unwrap();
    let m = p.popcount() as usize;
    colour_class_order(
        shared.graph,
        shared.colour_order,
        shared.incumbent.get().saturating_sub(c_len),
        p,
        &mut frame.p_order,
        &mut frame.p_bounds,
        &mut ctx.scratch,
    );

    let mut chose_to_donate = false;

    // branch right to left: highest bound first, earliest prune
    for n in (0..m).rev() {
        *position.last_mut().unwrap() += 1;

        // bound, early exit or timeout?
        let best_anywhere = shared.incumbent.get();
        if c_len + frame.p_bounds[n] <= best_anywhere
            || best_anywhere >= shared.params.stop_after_finding
            || shared.params.abort.load(Ordering::Relaxed)
        {
            return;
        }

        let v = frame.p_order[n] as usize;

        // taking v
        c.set(v);
        frame.new_p = *p;
        shared.graph.intersect_with_row(v, &mut frame.new_p);

        if frame.new_p.is_empty() {
            found_possible_new_best(
                &shared.incumbent,
                c,
                c_len + 1,
                shared.order,
                position,
                shared.params,
                &mut ctx.result,
            );
        } else {
            // recurse, enqueue or donate?
            let mut should_expand = true;

            if populate && c_len + 1 == shared.params.split_depth {
                let mut new_position = position.clone();
                new_position.push(0);
                shared.queue.enqueue_blocking(
                    QueueItem {
                        c: *c,
                        c_len: c_len + 1,
                        p: frame.new_p,
                        cn: c_len + 1 + frame.p_bounds[n],
                        position: new_position,
                    },
                    shared.params.n_threads,
                );
                should_expand = false;
            } else if frame.new_p.popcount() < shared.params.min_donate_size {
                chose_to_donate = false;
            } else if donate
                && (chose_to_donate
                    || (shared.queue.want_donations()
                        && waited_long_enough(shared.params, &mut ctx.last_donation)))
            {
                let mut new_position = position.clone();
                new_position.push(0);
                trace!("donating a branch at position {:?}", new_position);
                shared.queue.enqueue(QueueItem {
                    c: *c,
                    c_len: c_len + 1,
                    p: frame.new_p,
                    cn: c_len + 1 + frame.p_bounds[n],
                    position: new_position,
                });
                // once we start donating from a frame, keep donating its
                // siblings
                chose_to_donate = true;
                ctx.result.donations += 1;
                should_expand = false;
            }

            if should_expand {
                position.push(0);
                expand(
                    shared,
                    populate,
                    donate,
                    ctx,
                    c,
                    c_len + 1,
                    &mut frame.new_p,
                    position,
                    rest,
                );
                position.pop();
            }
        }

        // and now not taking v
        c.unset(v);
        p.unset(v);
    }
}

fn waited_long_enough(params: &MaxCliqueParams, last_donation: &mut Instant) -> bool {
    if params.donation_wait.is_zero() {
        return true;
    }
    if last_donation.elapsed() > params.donation_wait {
        *last_donation = Instant::now();
        true
    } else {
        false
    }
}
