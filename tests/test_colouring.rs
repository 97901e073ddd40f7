/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use parclique::colour::{colour_class_order, ColourOrder, ColourScratch};
use parclique::graphs::bit_graph::BitGraph;
use parclique::graphs::bit_set::BitSet;
use parclique::graphs::graph::Graph;
use parclique::graphs::random::ErdosRenyi;

const ALL_VARIANTS: [ColourOrder; 6] = [
    ColourOrder::Plain,
    ColourOrder::Defer1,
    ColourOrder::RepairAll,
    ColourOrder::RepairAllDefer1,
    ColourOrder::RepairSelected,
    ColourOrder::RepairSelectedDefer1,
];

fn to_bit_graph(graph: &Graph) -> BitGraph<1> {
    let order: Vec<u32> = (0..graph.size() as u32).collect();
    BitGraph::from_graph(graph, &order)
}

fn colour(
    graph: &BitGraph<1>,
    variant: ColourOrder,
    delta: u32,
    p: &BitSet<1>,
) -> (Vec<u32>, Vec<u32>) {
    let m = p.popcount() as usize;
    let mut p_order = vec![0; graph.size()];
    let mut p_bounds = vec![0; graph.size()];
    let mut scratch = ColourScratch::default();
    colour_class_order(
        graph,
        variant,
        delta,
        p,
        &mut p_order,
        &mut p_bounds,
        &mut scratch,
    );
    p_order.truncate(m);
    p_bounds.truncate(m);
    (p_order, p_bounds)
}

/// The three contract invariants: `p_order` is a permutation of `p`,
/// `p_bounds` is non-decreasing, and two vertices with the same bound value
/// are non-adjacent (so every prefix is properly colourable within its last
/// bound).
fn check_invariants(graph: &BitGraph<1>, p: &BitSet<1>, p_order: &[u32], p_bounds: &[u32]) {
    let mut seen = BitSet::<1>::new();
    for &v in p_order {
        assert!(p.test(v as usize), "vertex {} not in p", v);
        assert!(!seen.test(v as usize), "vertex {} repeated", v);
        seen.set(v as usize);
    }
    assert_eq!(seen.popcount(), p.popcount());

    for window in p_bounds.windows(2) {
        assert!(window[0] <= window[1], "bounds not monotone: {:?}", p_bounds);
    }

    for i in 0..p_order.len() {
        for j in 0..i {
            if p_bounds[i] == p_bounds[j] {
                assert!(
                    !graph.adjacent(p_order[i] as usize, p_order[j] as usize),
                    "adjacent vertices {} and {} share colour {}",
                    p_order[j],
                    p_order[i],
                    p_bounds[i]
                );
            }
        }
    }
}

#[test]
fn test_triangle_bounds() -> Result<()> {
    let mut graph = Graph::new(3);
    graph.add_edge(0, 1);
    graph.add_edge(0, 2);
    graph.add_edge(1, 2);
    let graph = to_bit_graph(&graph);
    let p = BitSet::with_first_set(3);

    let (p_order, p_bounds) = colour(&graph, ColourOrder::Plain, 0, &p);
    assert_eq!(p_order, vec![0, 1, 2]);
    assert_eq!(p_bounds, vec![1, 2, 3]);
    Ok(())
}

#[test]
fn test_five_cycle_needs_three_colours() -> Result<()> {
    let mut graph = Graph::new(5);
    for i in 0..5 {
        graph.add_edge(i, (i + 1) % 5);
    }
    let graph = to_bit_graph(&graph);
    let p = BitSet::with_first_set(5);

    for variant in ALL_VARIANTS {
        let (p_order, p_bounds) = colour(&graph, variant, 0, &p);
        check_invariants(&graph, &p, &p_order, &p_bounds);
        // an odd cycle is not 2-colourable
        assert!(*p_bounds.last().unwrap() >= 3, "{:?}", variant);
    }
    Ok(())
}

#[test]
fn test_invariants_on_random_graphs() -> Result<()> {
    for seed in 0..10 {
        let graph = to_bit_graph(&ErdosRenyi::new(40, 0.5, seed).build());
        // both the full vertex set and an arbitrary subset
        let mut subset = BitSet::<1>::new();
        for v in (0..40).step_by(3) {
            subset.set(v);
        }
        for p in [BitSet::with_first_set(40), subset] {
            for variant in ALL_VARIANTS {
                for delta in [0, 2, 1000] {
                    let (p_order, p_bounds) = colour(&graph, variant, delta, &p);
                    check_invariants(&graph, &p, &p_order, &p_bounds);
                }
            }
        }
    }
    Ok(())
}

/// With a delta no colouring can reach, the selective repair never fires and
/// the result degenerates to the base greedy colouring.
#[test]
fn test_selective_repair_with_huge_delta_is_plain() -> Result<()> {
    for seed in 0..5 {
        let graph = to_bit_graph(&ErdosRenyi::new(30, 0.5, seed).build());
        let p = BitSet::with_first_set(30);
        assert_eq!(
            colour(&graph, ColourOrder::RepairSelected, 1000, &p),
            colour(&graph, ColourOrder::Plain, 0, &p)
        );
    }
    Ok(())
}

/// The final bound is an upper bound on the clique number of the subgraph
/// induced by `p`.
#[test]
fn test_bound_dominates_clique_number() -> Result<()> {
    use parclique::orders::none_order;
    use parclique::solvers::{solve, Algorithm, MaxCliqueParams};

    for seed in 0..5 {
        let graph = ErdosRenyi::new(40, 0.5, seed).build();
        let omega = solve(
            &graph,
            "seq".parse::<Algorithm>().unwrap(),
            none_order,
            &MaxCliqueParams {
                n_threads: 1,
                ..MaxCliqueParams::default()
            },
        )?
        .size;

        let bit_graph = to_bit_graph(&graph);
        let p = BitSet::with_first_set(40);
        for variant in ALL_VARIANTS {
            let (_, p_bounds) = colour(&bit_graph, variant, 0, &p);
            assert!(*p_bounds.last().unwrap() >= omega, "{:?}", variant);
        }
    }
    Ok(())
}
