/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Domination inference.
//!
//! Vertex `u` is dominated by `v` when `N(u) \ N(v) \ {v}` is empty: any
//! clique through `u` that avoids `v` can be rewritten to go through `v`
//! instead, so once the search has decided about `v` (taken or rejected it),
//! `u` can be dropped from the candidate set of that subtree.

use rayon::prelude::*;

use crate::graphs::bit_graph::BitGraph;
use crate::graphs::bit_set::BitSet;

/// How much domination inference to apply (sequential solver only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Inference {
    /// No inference.
    #[default]
    None,
    /// Precompute the dominated set of every vertex up front.
    GlobalDomination,
    /// Same rule, but rows are computed on first use and memoised; cheaper
    /// when the search only ever branches on a few vertices.
    LazyGlobalDomination,
}

/// The inference state of one solver run.
#[derive(Debug)]
pub(crate) enum Dominator<const W: usize> {
    None,
    Global(Vec<BitSet<W>>),
    Lazy(Vec<Option<BitSet<W>>>),
}

impl<const W: usize> Dominator<W> {
    pub(crate) fn new(inference: Inference, graph: &BitGraph<W>) -> Self {
        match inference {
            Inference::None => Self::None,
            Inference::GlobalDomination => {
                // one column per dominating vertex, each independent of the
                // others
                let rows = (0..graph.size())
                    .into_par_iter()
                    .map(|v| dominated_by(graph, v))
                    .collect();
                Self::Global(rows)
            }
            Inference::LazyGlobalDomination => Self::Lazy(vec![None; graph.size()]),
        }
    }

    /// Should the branch on `v` be skipped because some earlier propagation
    /// already removed it from `p`?
    pub(crate) fn skip(&self, v: u32, p: &BitSet<W>) -> bool {
        match self {
            Self::None => false,
            _ => !p.test(v as usize),
        }
    }

    /// Called right after the branch on `v` has been taken or skipped:
    /// removes the vertices dominated by `v` from `p`.
    pub(crate) fn propagate_no(&mut self, graph: &BitGraph<W>, v: u32, p: &mut BitSet<W>) {
        match self {
            Self::None => {}
            Self::Global(rows) => p.intersect_with_complement(&rows[v as usize]),
            Self::Lazy(rows) => {
                let row = rows[v as usize].get_or_insert_with(|| dominated_by(graph, v as usize));
                p.intersect_with_complement(row);
            }
        }
    }
}

/// Computes the set of vertices dominated by `v`.
fn dominated_by<const W: usize>(graph: &BitGraph<W>, v: usize) -> BitSet<W> {
    let mut result = BitSet::new();
    for u in 0..graph.size() {
        if u == v {
            continue;
        }
        let mut leftover = *graph.row(u);
        leftover.intersect_with_complement(graph.row(v));
        leftover.unset(v);
        if leftover.is_empty() {
            result.set(u);
        }
    }
    result
}
