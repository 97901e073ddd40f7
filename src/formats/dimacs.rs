/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The DIMACS edge-list format.
//!
//! A `p edge <n> <m>` line declares the graph, `e <u> <v>` lines add
//! one-based edges, and `c` lines are comments. The edge count of the `p`
//! line is not trusted: the edges actually present win.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::InputParseError;
use crate::graphs::graph::Graph;

/// Reads a graph in DIMACS edge-list format.
pub fn read_dimacs(path: &Path) -> Result<Graph, InputParseError> {
    let reader = BufReader::new(File::open(path)?);
    let mut graph: Option<Graph> = None;

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = line_no + 1;
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            None | Some("c") => continue,
            Some("p") => {
                if graph.is_some() {
                    return Err(InputParseError::malformed(
                        path,
                        line_no,
                        "duplicate problem line",
                    ));
                }
                if tokens.next() != Some("edge") {
                    return Err(InputParseError::malformed(
                        path,
                        line_no,
                        "expected \"p edge <n> <m>\"",
                    ));
                }
                let size = parse_int(path, line_no, tokens.next())?;
                // the edge count; present but unused
                parse_int(path, line_no, tokens.next())?;
                graph = Some(Graph::new(size));
            }
            Some("e") => {
                let Some(graph) = graph.as_mut() else {
                    return Err(InputParseError::malformed(
                        path,
                        line_no,
                        "edge line before the problem line",
                    ));
                };
                let u = parse_int(path, line_no, tokens.next())?;
                let v = parse_int(path, line_no, tokens.next())?;
                if u == 0 || v == 0 || u > graph.size() || v > graph.size() {
                    return Err(InputParseError::malformed(
                        path,
                        line_no,
                        format!("vertex out of range in edge ({}, {})", u, v),
                    ));
                }
                if u != v {
                    graph.add_edge(u - 1, v - 1);
                }
            }
            Some(other) => {
                return Err(InputParseError::malformed(
                    path,
                    line_no,
                    format!("unexpected line starting with {:?}", other),
                ));
            }
        }
    }

    graph.ok_or_else(|| InputParseError::malformed(path, 0, "no problem line found"))
}

fn parse_int(
    path: &Path,
    line_no: usize,
    token: Option<&str>,
) -> Result<usize, InputParseError> {
    token
        .ok_or_else(|| InputParseError::malformed(path, line_no, "missing integer"))?
        .parse()
        .map_err(|_| InputParseError::malformed(path, line_no, "malformed integer"))
}
