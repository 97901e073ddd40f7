/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Random graphs.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::graph::Graph;

/// Provides Erdős–Rényi random graphs.
///
/// The Erdős–Rényi random graph model is a simple model for generating random
/// graphs. It is parameterized by the number of nodes `n` and the probability
/// `p` of an edge between any two nodes. In this implementation, loops are
/// never included.
///
/// The generation is deterministic given the seed, which makes this the
/// workhorse of the cross-solver property tests: the same graph can be
/// rebuilt in every test and solved with every algorithm variant.
#[derive(Debug, Clone)]
pub struct ErdosRenyi {
    n: usize,
    p: f64,
    seed: u64,
}

impl ErdosRenyi {
    /// Creates a new Erdős–Rényi random graph, given the number of nodes, the
    /// probability of an edge between any two nodes, and a seed for the
    /// [pseudorandom number generator](SmallRng).
    pub fn new(n: usize, p: f64, seed: u64) -> Self {
        assert!((0.0..=1.0).contains(&p), "p must be in [0..1]");
        Self { n, p, seed }
    }

    /// Materializes the graph.
    pub fn build(&self) -> Graph {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut graph = Graph::new(self.n);
        for u in 0..self.n {
            for v in u + 1..self.n {
                if rng.random_bool(self.p) {
                    graph.add_edge(u, v);
                }
            }
        }
        graph
    }
}
