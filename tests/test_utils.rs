/*
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use parclique::graphs::graph::Graph;
use parclique::utils::{is_clique, AbortTimer};

#[test]
fn test_is_clique() -> Result<()> {
    let mut graph = Graph::new(4);
    graph.add_edge(0, 1);
    graph.add_edge(0, 2);
    graph.add_edge(1, 2);

    assert!(is_clique(&graph, &BTreeSet::new()));
    assert!(is_clique(&graph, &BTreeSet::from([0])));
    assert!(is_clique(&graph, &BTreeSet::from([0, 1, 2])));
    assert!(!is_clique(&graph, &BTreeSet::from([0, 1, 3])));
    Ok(())
}

#[test]
fn test_abort_timer_fires() -> Result<()> {
    let abort = Arc::new(AtomicBool::new(false));
    let timer = AbortTimer::start(abort.clone(), Duration::from_millis(1));
    std::thread::sleep(Duration::from_millis(100));
    assert!(abort.load(Ordering::SeqCst));
    drop(timer);
    Ok(())
}

#[test]
fn test_abort_timer_cancels_on_drop() -> Result<()> {
    let abort = Arc::new(AtomicBool::new(false));
    let timer = AbortTimer::start(abort.clone(), Duration::from_secs(3600));
    drop(timer);
    assert!(!abort.load(Ordering::SeqCst));
    Ok(())
}
