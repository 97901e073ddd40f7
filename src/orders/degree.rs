/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Degree-based orderings.

use crate::graphs::graph::Graph;

/// Orders vertices by degree, largest first.
///
/// The sort is stable, so ties keep their natural order.
pub fn degree_order(graph: &Graph, order: &mut [u32]) {
    order.sort_by_key(|&v| std::cmp::Reverse(graph.degree(v as usize)));
}

/// Orders vertices by degree, then by the sum of the degrees of their
/// neighbours (the extended degree), largest first.
pub fn exdegree_order(graph: &Graph, order: &mut [u32]) {
    let exdegrees: Vec<usize> = (0..graph.size())
        .map(|v| graph.neighbours(v).map(|w| graph.degree(w)).sum())
        .collect();
    order.sort_by_key(|&v| {
        std::cmp::Reverse((graph.degree(v as usize), exdegrees[v as usize]))
    });
}

/// A dynamic variant of [`exdegree_order`]: vertices are selected one at a
/// time by degree, breaking ties with the extended degree computed over the
/// vertices not yet selected.
pub fn dynexdegree_order(graph: &Graph, order: &mut [u32]) {
    let n = graph.size();
    let mut selected = vec![false; n];
    for position in 0..n {
        let mut best = None;
        for slot in position..n {
            let v = order[slot] as usize;
            let exdegree: usize = graph
                .neighbours(v)
                .filter(|&w| !selected[w])
                .map(|w| graph.degree(w))
                .sum();
            let key = (graph.degree(v), exdegree);
            match best {
                Some((best_key, _)) if best_key >= key => {}
                _ => best = Some((key, slot)),
            }
        }
        let (_, slot) = best.unwrap();
        order.swap(position, slot);
        selected[order[position] as usize] = true;
    }
}
