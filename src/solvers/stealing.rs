/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The multi-level work-stealing strategy.
//!
//! There is one queue per depth level. The root level holds a single
//! subproblem; for every later level, the first worker to arrive claims the
//! producer role and refills the queue by stealing from the steal points of
//! the other workers, one level up: a stolen branch position is turned into
//! one offset subproblem per pending sibling, and the victim bails out of
//! those siblings when it unpublishes the point. The last level has no steal
//! points, because by then the remaining work is too small for further
//! splitting to pay off.
//!
//! A subproblem is just an offset vector: at depth `d` the expansion skips
//! `offsets[d]` branches, takes one, and stops.

use std::sync::atomic::Ordering;
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use log::trace;

use super::incumbent::Incumbent;
use super::queue::Queue;
use super::steal::StealPoint;
use super::{
    found_possible_new_best, new_frames, Frame, MaxCliqueParams, MaxCliqueResult,
};
use crate::colour::{colour_class_order, ColourOrder, ColourScratch};
use crate::graphs::bit_graph::BitGraph;
use crate::graphs::bit_set::BitSet;

const NUMBER_OF_DEPTHS: usize = 5;
const NUMBER_OF_STEAL_POINTS: usize = NUMBER_OF_DEPTHS - 1;

struct Subproblem {
    offsets: Vec<u32>,
}

/// The steal points of one worker, one per split depth.
#[derive(Default)]
struct StealPoints {
    points: [StealPoint; NUMBER_OF_STEAL_POINTS],
}

struct Shared<'a, const W: usize> {
    graph: &'a BitGraph<W>,
    order: &'a [u32],
    params: &'a MaxCliqueParams,
    colour_order: ColourOrder,
    incumbent: Incumbent,
    queues: Vec<Queue<Subproblem>>,
    steal_points: Vec<StealPoints>,
}

/// Thread-local state of one worker.
struct Ctx {
    result: MaxCliqueResult,
    scratch: ColourScratch,
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
        queues: (0..NUMBER_OF_DEPTHS)
            .map(|_| Queue::new(n_threads, false))
            .collect(),
        steal_points: (0..n_threads).map(|_| StealPoints::default()).collect(),
    };
    shared.incumbent.update(params.initial_bound);

    // the root level holds the whole tree as a single subproblem
    shared.queues[0].enqueue(Subproblem { offsets: vec![] });
    if shared.queues[0].want_producer() {
        shared.queues[0].initial_producer_done();
    }

    let global = Mutex::new(MaxCliqueResult {
        size: params.initial_bound,
        ..MaxCliqueResult::default()
    });

    thread::scope(|s| {
        let shared = &shared;
        let global = &global;
        for i in 0..n_threads {
            s.spawn(move || worker(shared, global, i, n_threads));
        }
    });

    global.into_inner().unwrap()
}

fn worker<const W: usize>(
    shared: &Shared<W>,
    global: &Mutex<MaxCliqueResult>,
    me: usize,
    n_threads: usize,
) {
    let start_time = Instant::now();
    let mut overall_time = Duration::ZERO;
    let mut ctx = Ctx {
        result: MaxCliqueResult::default(),
        scratch: ColourScratch::default(),
    };
    let mut frames = new_frames(shared.graph.size());

    for depth in 0..NUMBER_OF_DEPTHS {
        if shared.queues[depth].want_producer() {
            if depth > 0 {
                for victim in 0..n_threads {
                    if victim == me {
                        continue;
                    }
                    match shared.steal_points[victim].points[depth - 1].steal() {
                        Some(mut stolen) => {
                            trace!("worker {} stole {:?} from {}", me, stolen, victim);
                            // turn the stolen position into one subproblem
                            // per pending sibling branch
                            stolen.pop();
                            for offset in stolen.iter_mut() {
                                *offset -= 1;
                            }
                            loop {
                                *stolen.last_mut().unwrap() += 1;
                                if *stolen.last().unwrap() as usize >= shared.graph.size() {
                                    break;
                                }
                                shared.queues[depth].enqueue(Subproblem {
                                    offsets: stolen.clone(),
                                });
                            }
                        }
                        None => trace!("worker {} did not steal from {}", me, victim),
                    }
                }
            }
            shared.queues[depth].initial_producer_done();
        }

        while let Some(subproblem) = shared.queues[depth].dequeue_blocking() {
            trace!("worker {} dequeued {:?}", me, subproblem.offsets);

            let mut c = BitSet::new();
            let mut p = BitSet::with_first_set(shared.graph.size());
            let mut position = vec![0];

            expand(
                shared,
                &mut ctx,
                Some(&subproblem.offsets),
                Some(&shared.steal_points[me]),
                &mut c,
                0,
                &mut p,
                &mut position,
                &mut frames,
            );

            // the last time we finished doing useful work
            overall_time = start_time.elapsed();
        }

        if depth < NUMBER_OF_STEAL_POINTS {
            shared.steal_points[me].points[depth].finish();
        }
    }

    let mut global = global.lock().unwrap();
    global.merge(ctx.result);
    global.times.push(overall_time);
}

#[allow(clippy::too_many_arguments)]
fn expand<const W: usize>(
    shared: &Shared<W>,
    ctx: &mut Ctx,
    subproblem: Option<&[u32]>,
    steal_points: Option<&StealPoints>,
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

    // when resuming a subproblem, skip the branches it does not cover, and
    // stop after the one it does
    let (mut skip, mut keep_going) = match subproblem {
        Some(offsets) if (c_len as usize) < offsets.len() => (offsets[c_len as usize], false),
        _ => (0, true),
    };

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

        if skip > 0 {
            skip -= 1;
            p.unset(v);
        } else {
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
                position.push(0);
                keep_going = recurse(
                    shared,
                    ctx,
                    subproblem,
                    steal_points,
                    c,
                    c_len + 1,
                    &mut frame.new_p,
                    position,
                    rest,
                ) && keep_going;
                position.pop();
            }

            // and now not taking v
            c.unset(v);
            p.unset(v);

            if !keep_going {
                break;
            }
        }
    }
}

/// Wraps the recursive call with steal-point publication: the position is
/// published before descending, and withdrawn afterwards; a false return
/// means the pending siblings were stolen and the caller must bail out.
#[allow(clippy::too_many_arguments)]
fn recurse<const W: usize>(
    shared: &Shared<W>,
    ctx: &mut Ctx,
    subproblem: Option<&[u32]>,
    steal_points: Option<&StealPoints>,
    c: &mut BitSet<W>,
    c_len: u32,
    new_p: &mut BitSet<W>,
    position: &mut Vec<u32>,
    frames: &mut [Frame<W>],
) -> bool {
    let point = steal_points
        .filter(|_| (c_len as usize) < NUMBER_OF_STEAL_POINTS)
        .map(|sp| &sp.points[c_len as usize - 1]);

    if let Some(point) = point {
        point.publish(position);
    }

    expand(
        shared,
        ctx,
        subproblem.filter(|offsets| (c_len as usize) < offsets.len()),
        steal_points.filter(|_| (c_len as usize) < NUMBER_OF_STEAL_POINTS),
        c,
        c_len,
        new_p,
        position,
        frames,
    );

    match point {
        Some(point) => point.unpublish_and_keep_going(),
        None => true,
    }
}
