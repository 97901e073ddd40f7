/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

#![doc = include_str!("../README.md")]
#![deny(unstable_features)]
#![deny(trivial_casts)]
#![deny(unconditional_recursion)]
#![deny(clippy::empty_loop)]
#![deny(unreachable_code)]
#![deny(unreachable_pub)]
#![deny(unreachable_patterns)]
#![deny(unused_macro_rules)]
#![deny(unused_doc_comments)]

#[cfg(feature = "cli")]
pub mod cli;
pub mod colour;
pub mod formats;
pub mod graphs;
pub mod orders;
pub mod solvers;
pub mod utils;

/// Prelude module to import everything from this crate.
pub mod prelude {
    pub use crate::colour::*;
    pub use crate::formats::*;
    pub use crate::graphs::prelude::*;
    pub use crate::orders::*;
    pub use crate::solvers::*;
    pub use crate::utils::*;
}
