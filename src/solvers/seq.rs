/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The sequential solver.
//!
//! One thread, no scheduler hooks: the plain local result doubles as the
//! incumbent. This is the baseline the parallel strategies are checked
//! against, and the only solver supporting domination inference and
//! enumeration counting.

use std::sync::atomic::Ordering;

use log::info;

use super::domination::Dominator;
use super::{new_frames, Algorithm, Frame, MaxCliqueParams, MaxCliqueResult};
use crate::colour::{colour_class_order, ColourOrder, ColourScratch};
use crate::graphs::bit_graph::BitGraph;
use crate::graphs::bit_set::BitSet;

pub(crate) fn max_clique<const W: usize>(
    graph: &BitGraph<W>,
    order: &[u32],
    algorithm: Algorithm,
    params: &MaxCliqueParams,
) -> MaxCliqueResult {
    let mut solver = Seq {
        graph,
        order,
        params,
        colour_order: algorithm.colour_order,
        dominator: Dominator::new(algorithm.inference, graph),
        scratch: ColourScratch::default(),
        position: vec![0],
        result: MaxCliqueResult {
            size: params.initial_bound,
            ..MaxCliqueResult::default()
        },
    };

    let mut frames = new_frames(graph.size());
    let mut c = BitSet::new();
    let mut p = BitSet::with_first_set(graph.size());
    solver.expand(&mut c, 0, &mut p, &mut frames);

    let mut result = solver.result;
    if params.enumerate {
        // the working size was kept one low to keep counting; the members
        // have the real one
        result.size = result.members.len() as u32;
    }
    result
}

struct Seq<'a, const W: usize> {
    graph: &'a BitGraph<W>,
    order: &'a [u32],
    params: &'a MaxCliqueParams,
    colour_order: ColourOrder,
    dominator: Dominator<W>,
    scratch: ColourScratch,
    position: Vec<u32>,
    result: MaxCliqueResult,
}

impl<const W: usize> Seq<'_, W> {
    fn expand(
        &mut self,
        c: &mut BitSet<W>,
        c_len: u32,
        p: &mut BitSet<W>,
        frames: &mut [Frame<W>],
    ) {
        self.result.nodes += 1;

        let (frame, rest) = frames.split_first_mut().unwrap();
        let m = p.popcount() as usize;
        colour_class_order(
            self.graph,
            self.colour_order,
            self.result.size.saturating_sub(c_len),
            p,
            &mut frame.p_order,
            &mut frame.p_bounds,
            &mut self.scratch,
        );

        // branch right to left: highest bound first, earliest prune
        for n in (0..m).rev() {
            *self.position.last_mut().unwrap() += 1;

            // bound, early exit or timeout?
            if c_len + frame.p_bounds[n] <= self.result.size
                || self.result.size >= self.params.stop_after_finding
                || self.params.abort.load(Ordering::Relaxed)
            {
                return;
            }

            let v = frame.p_order[n];

            if self.dominator.skip(v, p) {
                p.unset(v as usize);
                self.dominator.propagate_no(self.graph, v, p);
            } else {
                // taking v
                c.set(v as usize);
                frame.new_p = *p;
                self.graph.intersect_with_row(v as usize, &mut frame.new_p);

                if frame.new_p.is_empty() {
                    self.potential_new_best(c, c_len + 1);
                } else {
                    self.position.push(0);
                    self.expand(c, c_len + 1, &mut frame.new_p, rest);
                    self.position.pop();
                }

                // and now not taking v
                c.unset(v as usize);
                p.unset(v as usize);
                self.dominator.propagate_no(self.graph, v, p);
            }
        }
    }

    fn potential_new_best(&mut self, c: &BitSet<W>, c_len: u32) {
        if c_len > self.result.size {
            if self.params.enumerate {
                self.result.result_count += 1;
                // drop the working size back so further cliques of the same
                // size keep being counted
                self.result.size = c_len - 1;
            } else {
                self.result.size = c_len;
            }
            self.result.members = c.iter().map(|v| self.order[v]).collect();
            if self.params.print_incumbents {
                info!(
                    "new incumbent of size {} at position {:?}",
                    c_len, self.position
                );
            }
        }
    }
}
