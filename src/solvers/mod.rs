/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Maximum clique solvers.
//!
//! Three threading strategies share the same colour-and-branch kernel:
//!
//! * [`seq`]: single-threaded, with optional domination inference and
//!   enumeration counting;
//! * [`donating`]: a producer thread splits the root of the search tree into
//!   a bounded work queue at a fixed depth, and workers may donate pending
//!   branches back to the queue when it runs dry;
//! * [`stealing`]: a ladder of per-depth queues refilled by stealing
//!   published branch positions from busy workers.
//!
//! [`solve`] is the entry point: it applies the vertex ordering, recodes the
//! graph into bitset form at the smallest width of the compile-time ladder
//! that covers it, and runs the requested strategy.

use std::collections::BTreeSet;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::info;
use thiserror::Error;

use crate::colour::ColourOrder;
use crate::graphs::bit_graph::BitGraph;
use crate::graphs::bit_set::BitSet;
use crate::graphs::graph::Graph;
use crate::orders::OrderFn;

pub mod domination;
pub mod donating;
pub mod incumbent;
pub mod queue;
pub mod seq;
pub mod steal;
pub mod stealing;

pub use domination::Inference;

/// The number of 64-bit words of the widest kernel instantiation.
///
/// Graphs with more than `64 · MAX_GRAPH_WORDS` vertices are rejected with
/// [`GraphTooLarge`].
pub const MAX_GRAPH_WORDS: usize = 32;

/// The graph does not fit the widest bitset kernel this build provides.
#[derive(Error, Debug)]
#[error("graph has {size} vertices, but this build supports fewer than {}", MAX_GRAPH_WORDS * 64)]
pub struct GraphTooLarge {
    pub size: usize,
}

/// A request for an algorithm nobody has heard of.
#[derive(Error, Debug)]
#[error("unknown algorithm {name}: {reason}; choose a strategy among seq, queue, steal, \
         joined by \"-\" with colouring modifiers among defer1, repair, repairsel \
         and (seq only) inference modifiers among dom, lazydom")]
pub struct UnknownAlgorithm {
    pub name: String,
    reason: String,
}

/// The threading strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// One thread, no scheduler.
    Sequential,
    /// A producer thread plus a donation-capable work queue.
    DonationQueue,
    /// Per-depth queues refilled by work stealing.
    StealPoints,
}

/// A fully-specified algorithm variant: threading strategy, colour-class
/// ordering, and domination inference.
///
/// Parsed from strings such as `seq`, `queue-defer1`, `steal-repair-defer1`
/// or `seq-repairsel-lazydom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Algorithm {
    pub strategy: Strategy,
    pub colour_order: ColourOrder,
    pub inference: Inference,
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, UnknownAlgorithm> {
        let unknown = |reason: &str| UnknownAlgorithm {
            name: s.to_owned(),
            reason: reason.to_owned(),
        };

        let mut tokens = s.split('-');
        let strategy = match tokens.next() {
            Some("seq") => Strategy::Sequential,
            Some("queue") => Strategy::DonationQueue,
            Some("steal") => Strategy::StealPoints,
            _ => return Err(unknown("unknown strategy")),
        };

        let mut repair = None;
        let mut defer1 = false;
        let mut inference = Inference::None;
        for token in tokens {
            match token {
                "defer1" if !defer1 => defer1 = true,
                "repair" if repair.is_none() => repair = Some(false),
                "repairsel" if repair.is_none() => repair = Some(true),
                "dom" if inference == Inference::None => {
                    inference = Inference::GlobalDomination
                }
                "lazydom" if inference == Inference::None => {
                    inference = Inference::LazyGlobalDomination
                }
                _ => return Err(unknown("unknown or repeated modifier")),
            }
        }

        if inference != Inference::None && strategy != Strategy::Sequential {
            return Err(unknown("inference is only available sequentially"));
        }

        let colour_order = match (repair, defer1) {
            (None, false) => ColourOrder::Plain,
            (None, true) => ColourOrder::Defer1,
            (Some(false), false) => ColourOrder::RepairAll,
            (Some(false), true) => ColourOrder::RepairAllDefer1,
            (Some(true), false) => ColourOrder::RepairSelected,
            (Some(true), true) => ColourOrder::RepairSelectedDefer1,
        };

        Ok(Algorithm {
            strategy,
            colour_order,
            inference,
        })
    }
}

/// Knobs common to all solvers.
#[derive(Debug, Clone)]
pub struct MaxCliqueParams {
    /// Number of worker threads (parallel strategies only).
    pub n_threads: usize,
    /// Stop as soon as a clique of this size has been found.
    pub stop_after_finding: u32,
    /// Seed the incumbent: only cliques strictly larger are reported.
    pub initial_bound: u32,
    /// The recursion depth at which the producer enqueues instead of
    /// recursing (donation-queue strategy).
    pub split_depth: u32,
    /// Allow workers to donate pending branches when the queue runs dry.
    pub work_donation: bool,
    /// Do not donate branches whose candidate set is smaller than this.
    pub min_donate_size: u32,
    /// Minimum interval between donations from one worker.
    pub donation_wait: Duration,
    /// Count maximum cliques instead of merely finding one (sequential
    /// strategy only).
    pub enumerate: bool,
    /// Log new incumbents as they are found.
    pub print_incumbents: bool,
    /// Shared cancellation flag, polled at every branch.
    pub abort: Arc<AtomicBool>,
}

impl Default for MaxCliqueParams {
    fn default() -> Self {
        Self {
            n_threads: num_cpus::get(),
            stop_after_finding: u32::MAX,
            initial_bound: 0,
            split_depth: 1,
            work_donation: false,
            min_donate_size: 0,
            donation_wait: Duration::ZERO,
            enumerate: false,
            print_incumbents: false,
            abort: Arc::new(AtomicBool::new(false)),
        }
    }
}

/// What a solver returns.
#[derive(Debug, Clone, Default)]
pub struct MaxCliqueResult {
    /// The size of the best clique found.
    pub size: u32,
    /// Its members, as ids of the input graph.
    pub members: BTreeSet<u32>,
    /// Search tree nodes visited.
    pub nodes: u64,
    /// Number of maximum cliques seen (enumeration only).
    pub result_count: u64,
    /// Number of donations performed (donation-queue strategy only).
    pub donations: u64,
    /// Per-worker busy times.
    pub times: Vec<Duration>,
    /// True if the run was cut short; `size` is then a lower bound only.
    pub aborted: bool,
}

impl MaxCliqueResult {
    /// Folds another (typically thread-local) result into this one.
    ///
    /// `size` and `members` are monotone; the counters are additive.
    pub fn merge(&mut self, other: MaxCliqueResult) {
        if other.size > self.size {
            self.size = other.size;
            self.members = other.members;
        }
        self.nodes += other.nodes;
        self.result_count += other.result_count;
        self.donations += other.donations;
        self.times.extend(other.times);
    }
}

/// Solves the maximum clique problem on `graph`.
///
/// The graph is relabelled under `order_fn`, recoded into bitset form at the
/// smallest width covering it, and searched with the requested algorithm
/// variant. Member ids in the result refer to the original labelling.
pub fn solve(
    graph: &Graph,
    algorithm: Algorithm,
    order_fn: OrderFn,
    params: &MaxCliqueParams,
) -> Result<MaxCliqueResult, GraphTooLarge> {
    if graph.size() == 0 {
        return Ok(MaxCliqueResult {
            size: params.initial_bound,
            ..MaxCliqueResult::default()
        });
    }

    // Select the kernel instantiation for the graph size. A graph at an
    // exact 64·W boundary goes to the next tier up.
    let mut result = match graph.size() {
        n if n < 64 => run::<1>(graph, algorithm, order_fn, params),
        n if n < 2 * 64 => run::<2>(graph, algorithm, order_fn, params),
        n if n < 4 * 64 => run::<4>(graph, algorithm, order_fn, params),
        n if n < 8 * 64 => run::<8>(graph, algorithm, order_fn, params),
        n if n < 16 * 64 => run::<16>(graph, algorithm, order_fn, params),
        n if n < 32 * 64 => run::<32>(graph, algorithm, order_fn, params),
        n => return Err(GraphTooLarge { size: n }),
    };

    result.aborted = params.abort.load(Ordering::SeqCst);
    Ok(result)
}

fn run<const W: usize>(
    graph: &Graph,
    algorithm: Algorithm,
    order_fn: OrderFn,
    params: &MaxCliqueParams,
) -> MaxCliqueResult {
    let mut order: Vec<u32> = (0..graph.size() as u32).collect();
    order_fn(graph, &mut order);

    let bit_graph = BitGraph::<W>::from_graph(graph, &order);

    match algorithm.strategy {
        Strategy::Sequential => seq::max_clique(&bit_graph, &order, algorithm, params),
        Strategy::DonationQueue => {
            donating::max_clique(&bit_graph, &order, algorithm.colour_order, params)
        }
        Strategy::StealPoints => {
            stealing::max_clique(&bit_graph, &order, algorithm.colour_order, params)
        }
    }
}

/// Per-depth scratch space of the search kernel.
///
/// One frame per recursion depth, allocated once per worker and reused
/// across subproblems, so that the hot path never touches the allocator.
pub(crate) struct Frame<const W: usize> {
    pub(crate) new_p: BitSet<W>,
    pub(crate) p_order: Vec<u32>,
    pub(crate) p_bounds: Vec<u32>,
}

pub(crate) fn new_frames<const W: usize>(size: usize) -> Vec<Frame<W>> {
    (0..size + 1)
        .map(|_| Frame {
            new_p: BitSet::new(),
            p_order: vec![0; size],
            p_bounds: vec![0; size],
        })
        .collect()
}

/// We've possibly found a new best: raise the incumbent, and if we won the
/// race snapshot the clique into the thread-local result, depermuting the
/// member ids.
pub(crate) fn found_possible_new_best<const W: usize>(
    incumbent: &incumbent::Incumbent,
    c: &BitSet<W>,
    c_len: u32,
    order: &[u32],
    position: &[u32],
    params: &MaxCliqueParams,
    result: &mut MaxCliqueResult,
) {
    if incumbent.update(c_len) {
        result.size = c_len;
        result.members = c.iter().map(|v| order[v]).collect();
        if params.print_incumbents {
            info!("new incumbent of size {} at position {:?}", c_len, position);
        }
    }
}
