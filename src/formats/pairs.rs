/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The pairs format: one edge per line, as two whitespace-separated vertex
//! names.
//!
//! Names are mapped to 0-based ids in order of first appearance; lines
//! starting with `#` and blank lines are skipped.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::InputParseError;
use crate::graphs::graph::Graph;

/// Reads a graph in pairs format.
pub fn read_pairs(path: &Path) -> Result<Graph, InputParseError> {
    let reader = BufReader::new(File::open(path)?);
    let mut ids: HashMap<String, usize> = HashMap::new();
    let mut names: Vec<String> = Vec::new();
    let mut edges: Vec<(usize, usize)> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = line_no + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let (Some(u), Some(v), None) = (tokens.next(), tokens.next(), tokens.next()) else {
            return Err(InputParseError::malformed(
                path,
                line_no,
                "expected exactly two vertex names",
            ));
        };
        let u = intern(u, &mut ids, &mut names);
        let v = intern(v, &mut ids, &mut names);
        if u != v {
            edges.push((u, v));
        }
    }

    let mut graph = Graph::new(names.len());
    for (id, name) in names.into_iter().enumerate() {
        graph.set_vertex_name(id, name);
    }
    for (u, v) in edges {
        graph.add_edge(u, v);
    }
    Ok(graph)
}

fn intern(name: &str, ids: &mut HashMap<String, usize>, names: &mut Vec<String>) -> usize {
    *ids.entry(name.to_owned()).or_insert_with(|| {
        names.push(name.to_owned());
        names.len() - 1
    })
}
