/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::sync::atomic::Ordering;

use anyhow::Result;
use parclique::graphs::graph::Graph;
use parclique::graphs::random::ErdosRenyi;
use parclique::orders::{none_order, order_by_name};
use parclique::solvers::{solve, Algorithm, MaxCliqueParams, MaxCliqueResult};
use parclique::utils::is_clique;

/// Builds a graph from one-based edges, as in the DIMACS scenarios.
fn graph_of(n: usize, edges: &[(usize, usize)]) -> Graph {
    let mut graph = Graph::new(n);
    for &(u, v) in edges {
        graph.add_edge(u - 1, v - 1);
    }
    graph
}

fn params(n_threads: usize) -> MaxCliqueParams {
    MaxCliqueParams {
        n_threads,
        ..MaxCliqueParams::default()
    }
}

fn run(graph: &Graph, algorithm: &str, params: &MaxCliqueParams) -> Result<MaxCliqueResult> {
    let result = solve(graph, algorithm.parse::<Algorithm>()?, none_order, params)?;
    if !result.members.is_empty() {
        assert_eq!(result.members.len() as u32, result.size);
        assert!(is_clique(graph, &result.members));
    }
    Ok(result)
}

const ALL_ALGORITHMS: &[&str] = &[
    "seq",
    "seq-defer1",
    "seq-repair",
    "seq-repair-defer1",
    "seq-repairsel",
    "seq-repairsel-defer1",
    "seq-dom",
    "seq-lazydom",
    "seq-defer1-dom",
    "queue",
    "queue-defer1",
    "queue-repair",
    "steal",
    "steal-defer1",
    "steal-repair",
];

#[test]
fn test_triangle() -> Result<()> {
    let graph = graph_of(3, &[(1, 2), (1, 3), (2, 3)]);
    for algorithm in ALL_ALGORITHMS {
        let result = run(&graph, algorithm, &params(2))?;
        assert_eq!(result.size, 3, "{}", algorithm);
        assert_eq!(result.members.iter().copied().collect::<Vec<_>>(), [0, 1, 2]);
    }
    Ok(())
}

#[test]
fn test_path_p4() -> Result<()> {
    let graph = graph_of(4, &[(1, 2), (2, 3), (3, 4)]);
    for algorithm in ALL_ALGORITHMS {
        let result = run(&graph, algorithm, &params(2))?;
        assert_eq!(result.size, 2, "{}", algorithm);
    }
    Ok(())
}

#[test]
fn test_five_cycle() -> Result<()> {
    let graph = graph_of(5, &[(1, 2), (2, 3), (3, 4), (4, 5), (5, 1)]);
    for algorithm in ALL_ALGORITHMS {
        assert_eq!(run(&graph, algorithm, &params(2))?.size, 2, "{}", algorithm);
    }
    Ok(())
}

#[test]
fn test_k4_plus_pendant() -> Result<()> {
    let graph = graph_of(
        5,
        &[(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4), (4, 5)],
    );
    for algorithm in ALL_ALGORITHMS {
        let result = run(&graph, algorithm, &params(3))?;
        assert_eq!(result.size, 4, "{}", algorithm);
        assert_eq!(result.members.iter().copied().collect::<Vec<_>>(), [0, 1, 2, 3]);
    }
    Ok(())
}

#[test]
fn test_two_disjoint_triangles() -> Result<()> {
    let graph = graph_of(6, &[(1, 2), (1, 3), (2, 3), (4, 5), (4, 6), (5, 6)]);
    for algorithm in ALL_ALGORITHMS {
        assert_eq!(run(&graph, algorithm, &params(2))?.size, 3, "{}", algorithm);
    }
    Ok(())
}

#[test]
fn test_unbeatable_initial_bound_proves_nonexistence() -> Result<()> {
    let graph = graph_of(5, &[(1, 2), (2, 3), (3, 4), (4, 5), (5, 1)]);
    for algorithm in ALL_ALGORITHMS {
        let result = run(
            &graph,
            algorithm,
            &MaxCliqueParams {
                initial_bound: 3,
                ..params(2)
            },
        )?;
        assert_eq!(result.size, 3, "{}", algorithm);
        assert!(result.members.is_empty(), "{}", algorithm);
    }
    Ok(())
}

#[test]
fn test_empty_graph() -> Result<()> {
    let graph = Graph::new(0);
    let result = run(&graph, "seq", &params(1))?;
    assert_eq!(result.size, 0);
    assert_eq!(result.nodes, 0);
    assert!(result.members.is_empty());
    Ok(())
}

#[test]
fn test_edgeless_graph() -> Result<()> {
    let graph = Graph::new(5);
    for algorithm in ["seq", "queue", "steal"] {
        let result = run(&graph, algorithm, &params(2))?;
        assert_eq!(result.size, 1, "{}", algorithm);
    }
    Ok(())
}

#[test]
fn test_complete_graph_reaches_one_leaf() -> Result<()> {
    let mut graph = Graph::new(10);
    for u in 0..10 {
        for v in 0..u {
            graph.add_edge(u, v);
        }
    }
    let result = run(&graph, "seq", &params(1))?;
    assert_eq!(result.size, 10);
    // one node per level, straight down to the single leaf
    assert_eq!(result.nodes, 10);
    Ok(())
}

#[test]
fn test_word_boundary_dispatches_to_next_tier() -> Result<()> {
    // a complete graph exactly at the one-word boundary
    let mut graph = Graph::new(64);
    for u in 0..64 {
        for v in 0..u {
            graph.add_edge(u, v);
        }
    }
    for algorithm in ["seq", "queue", "steal"] {
        assert_eq!(run(&graph, algorithm, &params(2))?.size, 64, "{}", algorithm);
    }
    Ok(())
}

#[test]
fn test_graph_too_large() -> Result<()> {
    let graph = Graph::new(32 * 64);
    let err = solve(
        &graph,
        "seq".parse::<Algorithm>()?,
        none_order,
        &params(1),
    )
    .unwrap_err();
    assert!(err.to_string().contains("2048 vertices"));
    Ok(())
}

/// All algorithm variants, orders, thread counts and split depths must agree
/// on the clique size.
#[test]
fn test_variants_agree_on_random_graphs() -> Result<()> {
    for seed in 0..3 {
        let graph = ErdosRenyi::new(45, 0.5, seed).build();
        let reference = run(&graph, "seq", &params(1))?.size;

        for algorithm in ALL_ALGORITHMS {
            for n_threads in [1, 3] {
                for split_depth in [1, 2] {
                    let result = run(
                        &graph,
                        algorithm,
                        &MaxCliqueParams {
                            split_depth,
                            ..params(n_threads)
                        },
                    )?;
                    assert_eq!(
                        result.size, reference,
                        "{} with {} threads, split depth {}",
                        algorithm, n_threads, split_depth
                    );
                }
            }
        }

        for &(order_name, _) in parclique::orders::ORDERS {
            let order_fn = order_by_name(order_name)?;
            let result = solve(&graph, "seq".parse::<Algorithm>()?, order_fn, &params(1))?;
            assert_eq!(result.size, reference, "order {}", order_name);
            assert!(is_clique(&graph, &result.members));
        }
    }
    Ok(())
}

#[test]
fn test_initial_bound_monotonicity() -> Result<()> {
    let graph = ErdosRenyi::new(40, 0.5, 11).build();
    let omega = run(&graph, "seq", &params(1))?.size;

    for bound in 0..omega + 3 {
        let result = run(
            &graph,
            "seq",
            &MaxCliqueParams {
                initial_bound: bound,
                ..params(1)
            },
        )?;
        if bound < omega {
            assert_eq!(result.size, omega);
            assert!(is_clique(&graph, &result.members));
        } else {
            // the bound is unbeatable: it is echoed back with no clique
            assert_eq!(result.size, bound);
            assert!(result.members.is_empty());
        }
    }
    Ok(())
}

#[test]
fn test_stop_after_finding() -> Result<()> {
    let graph = ErdosRenyi::new(40, 0.5, 5).build();
    let unrestricted = run(&graph, "seq", &params(1))?;
    let omega = unrestricted.size;

    let exact = run(
        &graph,
        "seq",
        &MaxCliqueParams {
            stop_after_finding: omega,
            ..params(1)
        },
    )?;
    assert_eq!(exact.size, omega);
    assert!(exact.nodes <= unrestricted.nodes);

    let early = run(
        &graph,
        "seq",
        &MaxCliqueParams {
            stop_after_finding: omega - 1,
            ..params(1)
        },
    )?;
    assert!(early.size >= omega - 1);
    assert!(early.nodes <= exact.nodes);
    Ok(())
}

#[test]
fn test_enumerate_counts_maximum_cliques() -> Result<()> {
    // C5 has five maximum cliques (its edges)
    let c5 = graph_of(5, &[(1, 2), (2, 3), (3, 4), (4, 5), (5, 1)]);
    let result = run(
        &c5,
        "seq",
        &MaxCliqueParams {
            enumerate: true,
            initial_bound: 1,
            ..params(1)
        },
    )?;
    assert_eq!(result.size, 2);
    assert_eq!(result.result_count, 5);

    // two disjoint triangles
    let two = graph_of(6, &[(1, 2), (1, 3), (2, 3), (4, 5), (4, 6), (5, 6)]);
    let result = run(
        &two,
        "seq",
        &MaxCliqueParams {
            enumerate: true,
            initial_bound: 2,
            ..params(1)
        },
    )?;
    assert_eq!(result.size, 3);
    assert_eq!(result.result_count, 2);
    Ok(())
}

#[test]
fn test_preset_abort_flag_reports_aborted() -> Result<()> {
    let graph = ErdosRenyi::new(40, 0.5, 2).build();
    for algorithm in ["seq", "queue", "steal"] {
        let p = params(2);
        p.abort.store(true, Ordering::SeqCst);
        let result = run(&graph, algorithm, &p)?;
        assert!(result.aborted, "{}", algorithm);
    }
    Ok(())
}

#[test]
fn test_work_donation_is_counted_and_correct() -> Result<()> {
    let graph = ErdosRenyi::new(50, 0.5, 9).build();
    let reference = run(&graph, "seq", &params(1))?.size;
    let result = run(
        &graph,
        "queue",
        &MaxCliqueParams {
            work_donation: true,
            ..params(4)
        },
    )?;
    assert_eq!(result.size, reference);
    Ok(())
}

#[test]
fn test_per_worker_times_are_reported() -> Result<()> {
    let graph = ErdosRenyi::new(40, 0.5, 4).build();
    let result = run(&graph, "queue", &params(3))?;
    assert_eq!(result.times.len(), 3);
    let result = run(&graph, "steal", &params(3))?;
    assert_eq!(result.times.len(), 3);
    Ok(())
}

/// With `T` workers the total node count stays within a small constant
/// factor of the single-threaded count.
#[cfg(feature = "slow_tests")]
#[test]
fn test_parallel_node_count_sanity() -> Result<()> {
    let graph = ErdosRenyi::new(100, 0.5, 1).build();
    let sequential = run(&graph, "seq", &params(1))?;
    for algorithm in ["queue", "steal"] {
        let parallel = run(&graph, algorithm, &params(4))?;
        assert_eq!(parallel.size, sequential.size);
        assert!(parallel.nodes <= sequential.nodes * 8, "{}", algorithm);
    }
    Ok(())
}

#[test]
fn test_algorithm_parsing() -> Result<()> {
    for name in ALL_ALGORITHMS {
        name.parse::<Algorithm>()?;
    }
    for bad in [
        "par",
        "seq-defer1-defer1",
        "seq-repair-repairsel",
        "queue-dom",
        "steal-lazydom",
        "seq-defer2",
        "",
    ] {
        assert!(bad.parse::<Algorithm>().is_err(), "{:?}", bad);
    }
    Ok(())
}
