/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The minimum-width ordering.

use crate::graphs::graph::Graph;

/// Orders vertices by repeatedly removing a vertex of minimum residual
/// degree and placing it last.
///
/// The result is a minimum-width order: every vertex has at most as many
/// neighbours before it as the width of the graph, which keeps the candidate
/// sets small along the leftmost branches of the search.
pub fn min_width_order(graph: &Graph, order: &mut [u32]) {
    let n = graph.size();
    let mut residual_degree: Vec<usize> = (0..n).map(|v| graph.degree(v)).collect();
    let mut remaining = vec![true; n];
    let mut removal = Vec::with_capacity(n);

    for _ in 0..n {
        let v = (0..n)
            .filter(|&v| remaining[v])
            .min_by_key(|&v| residual_degree[v])
            .unwrap();
        remaining[v] = false;
        removal.push(v as u32);
        for w in graph.neighbours(v) {
            if remaining[w] {
                residual_degree[w] -= 1;
            }
        }
    }

    removal.reverse();
    order.copy_from_slice(&removal);
}
