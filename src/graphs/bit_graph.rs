/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Fixed-width adjacency matrices.

use super::bit_set::BitSet;
use super::graph::Graph;

/// An adjacency matrix over at most `64 · W` vertices, stored as one
/// [`BitSet`] row per vertex.
///
/// The graph is undirected: [`add_edge`](BitGraph::add_edge) sets both bits.
/// Self-loops are forbidden; callers strip them on ingestion. The number of
/// vertices is fixed at construction.
#[derive(Debug, Clone)]
pub struct BitGraph<const W: usize> {
    size: usize,
    rows: Vec<BitSet<W>>,
}

impl<const W: usize> BitGraph<W> {
    /// Creates an edgeless graph with `size` vertices.
    pub fn new(size: usize) -> Self {
        debug_assert!(size <= BitSet::<W>::CAPACITY);
        Self {
            size,
            rows: vec![BitSet::new(); size],
        }
    }

    /// Recodes `graph` so that the vertex in position `i` of `order` gets id
    /// `i`.
    ///
    /// The inverse recoding is applied to the members of a clique before they
    /// are reported.
    pub fn from_graph(graph: &Graph, order: &[u32]) -> Self {
        let mut result = Self::new(graph.size());
        for i in 0..graph.size() {
            for j in 0..i {
                if graph.adjacent(order[i] as usize, order[j] as usize) {
                    result.add_edge(i, j);
                }
            }
        }
        result
    }

    /// Returns the number of vertices.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Adds an edge from `a` to `b` (and from `b` to `a`).
    pub fn add_edge(&mut self, a: usize, b: usize) {
        debug_assert!(a != b);
        self.rows[a].set(b);
        self.rows[b].set(a);
    }

    /// Are vertices `a` and `b` adjacent?
    #[inline(always)]
    pub fn adjacent(&self, a: usize, b: usize) -> bool {
        self.rows[a].test(b)
    }

    /// Returns the degree of a vertex.
    #[inline(always)]
    pub fn degree(&self, a: usize) -> u32 {
        self.rows[a].popcount()
    }

    /// Returns the neighbourhood of a vertex as a bitset row.
    #[inline(always)]
    pub fn row(&self, a: usize) -> &BitSet<W> {
        &self.rows[a]
    }

    /// Intersects the supplied bitset with the row of `a`.
    #[inline(always)]
    pub fn intersect_with_row(&self, a: usize, p: &mut BitSet<W>) {
        p.intersect_with(&self.rows[a]);
    }

    /// Intersects the supplied bitset with the complement of the row of `a`.
    #[inline(always)]
    pub fn intersect_with_row_complement(&self, a: usize, p: &mut BitSet<W>) {
        p.intersect_with_complement(&self.rows[a]);
    }
}
