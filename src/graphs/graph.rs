/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The input-boundary graph representation.

use super::bit_set::BITS_PER_WORD;

/// An undirected graph with named vertices, stored as a dense adjacency
/// matrix.
///
/// This is the representation the file parsers produce and the vertex
/// orderings inspect; the solvers recode it into a
/// [`BitGraph`](super::bit_graph::BitGraph) before searching. Vertex names
/// exist only at this boundary: everywhere else a vertex is a small integer.
#[derive(Debug, Clone)]
pub struct Graph {
    size: usize,
    words_per_row: usize,
    adjacency: Vec<u64>,
    names: Vec<String>,
}

impl Graph {
    /// Creates an edgeless graph with `size` vertices, named `1..=size`.
    pub fn new(size: usize) -> Self {
        let words_per_row = size.div_ceil(BITS_PER_WORD).max(1);
        Self {
            size,
            words_per_row,
            adjacency: vec![0; size * words_per_row],
            names: (1..=size).map(|v| v.to_string()).collect(),
        }
    }

    /// Returns the number of vertices.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Adds an edge from `a` to `b` (and from `b` to `a`).
    pub fn add_edge(&mut self, a: usize, b: usize) {
        debug_assert!(a != b && a < self.size && b < self.size);
        self.adjacency[a * self.words_per_row + b / BITS_PER_WORD] |=
            1_u64 << (b % BITS_PER_WORD);
        self.adjacency[b * self.words_per_row + a / BITS_PER_WORD] |=
            1_u64 << (a % BITS_PER_WORD);
    }

    /// Are vertices `a` and `b` adjacent?
    #[inline(always)]
    pub fn adjacent(&self, a: usize, b: usize) -> bool {
        self.adjacency[a * self.words_per_row + b / BITS_PER_WORD]
            & (1_u64 << (b % BITS_PER_WORD))
            != 0
    }

    /// Returns the degree of a vertex.
    pub fn degree(&self, a: usize) -> usize {
        self.adjacency[a * self.words_per_row..(a + 1) * self.words_per_row]
            .iter()
            .map(|w| w.count_ones() as usize)
            .sum()
    }

    /// Iterates over the neighbours of a vertex, in increasing order.
    pub fn neighbours(&self, a: usize) -> impl Iterator<Item = usize> + '_ {
        let row = &self.adjacency[a * self.words_per_row..(a + 1) * self.words_per_row];
        row.iter().enumerate().flat_map(|(i, &word)| {
            let mut word = word;
            std::iter::from_fn(move || {
                if word == 0 {
                    return None;
                }
                let bit = word.trailing_zeros() as usize;
                word &= word - 1;
                Some(i * BITS_PER_WORD + bit)
            })
        })
    }

    /// Returns the name a vertex had in the input.
    pub fn vertex_name(&self, a: usize) -> &str {
        &self.names[a]
    }

    /// Replaces the name of a vertex (used by parsers of named formats).
    pub fn set_vertex_name(&mut self, a: usize, name: String) {
        self.names[a] = name;
    }
}
