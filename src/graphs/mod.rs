/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Graph representations.
//!
//! Two representations coexist: [`Graph`](graph::Graph), a growable adjacency
//! matrix used at the input boundary (it knows the original vertex names), and
//! [`BitGraph`](bit_graph::BitGraph), the fixed-width bitset adjacency matrix
//! the solvers run on, obtained by recoding a [`Graph`](graph::Graph) under a
//! vertex ordering.

pub mod bit_graph;
pub mod bit_set;
pub mod graph;
pub mod random;

pub mod prelude {
    pub use super::bit_graph::*;
    pub use super::bit_set::*;
    pub use super::graph::*;
    pub use super::random::*;
}
