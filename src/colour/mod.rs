/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Greedy colouring bounds.
//!
//! [`colour_class_order`] takes a candidate set `P` and fills two arrays of
//! length `|P|`:
//!
//! * `p_order` is a permutation of `P`;
//! * `p_bounds` is non-decreasing, and for every prefix length `k` the
//!   vertices `p_order[0..k]` can be properly coloured with `p_bounds[k - 1]`
//!   colours (vertices sharing a colour are pairwise non-adjacent).
//!
//! The search kernel consumes the pair right to left: if the current clique
//! `C` can only be extended with vertices from `p_order[0..k]`, then no clique
//! through `C` can beat `|C| + p_bounds[k - 1]`, so a branch whose bound does
//! not exceed the incumbent is pruned together with everything to its left.
//!
//! The [`ColourOrder`] variants reshuffle the order (never the colouring
//! contract) to trade colouring cost against bound tightness.

use crate::graphs::bit_graph::BitGraph;
use crate::graphs::bit_set::BitSet;

/// The available colour-class orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColourOrder {
    /// The base greedy colouring, in first-set-bit order.
    #[default]
    Plain,
    /// Like [`Plain`](ColourOrder::Plain), but singleton colour classes are
    /// pulled out and re-appended at the end with fresh colours, so that they
    /// are branched on first and fail the bound check earliest.
    Defer1,
    /// Greedy colouring with one-step repair: a vertex that would open a new
    /// class may instead displace a single conflicting vertex that fits a
    /// later class.
    RepairAll,
    /// [`RepairAll`](ColourOrder::RepairAll) plus the
    /// [`Defer1`](ColourOrder::Defer1) move.
    RepairAllDefer1,
    /// Repair only once the number of classes exceeds the caller-supplied
    /// `delta`.
    RepairSelected,
    /// [`RepairSelected`](ColourOrder::RepairSelected) plus the
    /// [`Defer1`](ColourOrder::Defer1) move.
    RepairSelectedDefer1,
}

/// Reusable scratch space for [`colour_class_order`].
///
/// The repair variants keep explicit colour classes, and all variants may
/// defer vertices; both need backing storage that would otherwise be
/// reallocated at every call. Each worker thread owns one of these.
#[derive(Debug, Default)]
pub struct ColourScratch {
    classes: Vec<Vec<u32>>,
    defer: Vec<u32>,
}

/// Colours `p`, filling `p_order` and `p_bounds` (both at least `|p|` long).
///
/// `delta` is only consulted by the
/// [`RepairSelected`](ColourOrder::RepairSelected) variants.
pub fn colour_class_order<const W: usize>(
    graph: &BitGraph<W>,
    variant: ColourOrder,
    delta: u32,
    p: &BitSet<W>,
    p_order: &mut [u32],
    p_bounds: &mut [u32],
    scratch: &mut ColourScratch,
) {
    match variant {
        ColourOrder::Plain => greedy(graph, p, p_order, p_bounds, false, scratch),
        ColourOrder::Defer1 => greedy(graph, p, p_order, p_bounds, true, scratch),
        ColourOrder::RepairAll => {
            with_repair(graph, p, p_order, p_bounds, delta, false, false, scratch)
        }
        ColourOrder::RepairAllDefer1 => {
            with_repair(graph, p, p_order, p_bounds, delta, false, true, scratch)
        }
        ColourOrder::RepairSelected => {
            with_repair(graph, p, p_order, p_bounds, delta, true, false, scratch)
        }
        ColourOrder::RepairSelectedDefer1 => {
            with_repair(graph, p, p_order, p_bounds, delta, true, true, scratch)
        }
    }
}

fn greedy<const W: usize>(
    graph: &BitGraph<W>,
    p: &BitSet<W>,
    p_order: &mut [u32],
    p_bounds: &mut [u32],
    defer_singletons: bool,
    scratch: &mut ColourScratch,
) {
    let defer = &mut scratch.defer;
    defer.clear();

    let mut p_left = *p; // not coloured yet
    let mut colour = 0_u32;
    let mut i = 0_usize; // position in p_bounds

    while !p_left.is_empty() {
        colour += 1;
        // vertices that can still be given this colour
        let mut q = p_left;
        let mut number_with_this_colour = 0;
        while let Some(v) = q.first_set_bit() {
            p_left.unset(v);
            q.unset(v);
            // nothing adjacent to v may share its colour
            graph.intersect_with_row_complement(v, &mut q);
            p_order[i] = v as u32;
            p_bounds[i] = colour;
            i += 1;
            number_with_this_colour += 1;
        }
        if defer_singletons && number_with_this_colour == 1 {
            i -= 1;
            colour -= 1;
            defer.push(p_order[i]);
        }
    }

    for &v in defer.iter() {
        colour += 1;
        p_order[i] = v;
        p_bounds[i] = colour;
        i += 1;
    }
}

#[allow(clippy::too_many_arguments)]
fn with_repair<const W: usize>(
    graph: &BitGraph<W>,
    p: &BitSet<W>,
    p_order: &mut [u32],
    p_bounds: &mut [u32],
    delta: u32,
    selective: bool,
    defer_singletons: bool,
    scratch: &mut ColourScratch,
) {
    let ColourScratch { classes, defer } = scratch;
    let mut classes_end = 0_usize;

    let mut p_left = *p; // not coloured yet
    while let Some(v) = p_left.first_set_bit() {
        p_left.unset(v);
        let v = v as u32;

        let mut coloured = false;
        for class in classes[..classes_end].iter_mut() {
            if !conflicts(graph, v, class) {
                class.push(v);
                coloured = true;
                break;
            }
        }

        if !coloured {
            let mut repaired = false;

            if !selective || classes_end as u32 >= delta {
                'repair: for c in 0..classes_end.saturating_sub(1) {
                    // v may evict a vertex of class c only if it conflicts
                    // with that vertex alone
                    let mut n_conflicts = 0;
                    let mut to_move_pos = 0;
                    for (pos, &w) in classes[c].iter().enumerate() {
                        if graph.adjacent(v as usize, w as usize) {
                            to_move_pos = pos;
                            n_conflicts += 1;
                            if n_conflicts > 1 {
                                break;
                            }
                        }
                    }

                    if n_conflicts == 1 {
                        let to_move = classes[c][to_move_pos];
                        for new_c in c + 1..classes_end {
                            if !conflicts(graph, to_move, &classes[new_c]) {
                                classes[new_c].push(to_move);
                                classes[c].remove(to_move_pos);
                                classes[c].push(v);
                                repaired = true;
                                break 'repair;
                            }
                        }
                    }
                }
            }

            if !repaired {
                if classes.len() < classes_end + 1 {
                    classes.push(Vec::new());
                }
                classes[classes_end].clear();
                classes[classes_end].push(v);
                classes_end += 1;
            }
        }
    }

    // empty the classes, in turn, into the result
    defer.clear();
    let mut colour = 0_u32;
    let mut i = 0_usize;
    for class in classes[..classes_end].iter() {
        if defer_singletons && class.len() == 1 {
            defer.push(class[0]);
        } else {
            colour += 1;
            for &w in class {
                p_order[i] = w;
                p_bounds[i] = colour;
                i += 1;
            }
        }
    }

    for &v in defer.iter() {
        colour += 1;
        p_order[i] = v;
        p_bounds[i] = colour;
        i += 1;
    }
}

fn conflicts<const W: usize>(graph: &BitGraph<W>, v: u32, class: &[u32]) -> bool {
    class
        .iter()
        .any(|&w| graph.adjacent(v as usize, w as usize))
}
