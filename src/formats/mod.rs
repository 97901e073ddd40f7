/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Input file formats.
//!
//! Every parser maps the vertex names found in the input to contiguous
//! 0-based ids and records the original names in the resulting
//! [`Graph`](crate::graphs::graph::Graph). Self-loops are stripped on
//! ingestion, as the clique kernels forbid them.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::graphs::graph::Graph;

pub mod dimacs;
pub mod pairs;

/// A parser failure, or a request for a format nobody has heard of.
#[derive(Error, Debug)]
pub enum InputParseError {
    #[error("{path}:{line}: {msg}")]
    Malformed {
        path: PathBuf,
        line: usize,
        msg: String,
    },
    #[error("unknown format {name}, choose from: {}", known_formats())]
    UnknownFormat { name: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl InputParseError {
    fn malformed(path: &Path, line: usize, msg: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.to_owned(),
            line,
            msg: msg.into(),
        }
    }
}

/// The known input formats, by CLI name.
pub const GRAPH_FILE_FORMATS: &[(&str, fn(&Path) -> Result<Graph, InputParseError>)] = &[
    ("dimacs", dimacs::read_dimacs),
    ("pairs", pairs::read_pairs),
];

fn known_formats() -> String {
    GRAPH_FILE_FORMATS
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Reads a graph from `path` using the format registered under `format`.
pub fn read_graph(format: &str, path: &Path) -> Result<Graph, InputParseError> {
    let Some((_, read)) = GRAPH_FILE_FORMATS.iter().find(|(name, _)| *name == format) else {
        return Err(InputParseError::UnknownFormat {
            name: format.to_owned(),
        });
    };
    read(path)
}
