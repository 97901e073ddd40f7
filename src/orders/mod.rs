/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Initial vertex orderings.
//!
//! An ordering function permutes an identity vector of vertex ids in place;
//! the solver then recodes the graph so that the vertex in position `i` gets
//! id `i`. Good orderings put high-connectivity vertices first, which makes
//! the greedy colouring bound tighter near the root of the search tree.
//!
//! The ordering never affects the size of the maximum clique, only the shape
//! of the search tree, which is what the cross-ordering property tests rely
//! on.

use thiserror::Error;

use crate::graphs::graph::Graph;

mod degree;
mod min_width;

pub use degree::{degree_order, dynexdegree_order, exdegree_order};
pub use min_width::min_width_order;

/// An ordering function: permutes `order` (initially the identity) in place.
pub type OrderFn = fn(&Graph, &mut [u32]);

/// The known orderings, by CLI name.
pub const ORDERS: &[(&str, OrderFn)] = &[
    ("none", none_order),
    ("deg", degree_order),
    ("ex", exdegree_order),
    ("dynex", dynexdegree_order),
    ("mw", min_width_order),
];

/// A request for an ordering nobody has heard of.
#[derive(Error, Debug)]
#[error("unknown order {name}, choose from: {}", known_orders())]
pub struct UnknownOrder {
    pub name: String,
}

fn known_orders() -> String {
    ORDERS
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Looks up an ordering function by name.
pub fn order_by_name(name: &str) -> Result<OrderFn, UnknownOrder> {
    ORDERS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, f)| *f)
        .ok_or_else(|| UnknownOrder {
            name: name.to_owned(),
        })
}

/// The natural order: leaves the identity permutation untouched.
pub fn none_order(_graph: &Graph, _order: &mut [u32]) {}

/// Inverts a permutation.
pub fn invert_order(order: &[u32]) -> Vec<u32> {
    let mut inverse = vec![0; order.len()];
    for (i, &v) in order.iter().enumerate() {
        inverse[v as usize] = i as u32;
    }
    inverse
}
