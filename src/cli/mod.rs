/*
 * SPDX-FileCopyrightText: 2025 Inria
 * SPDX-FileCopyrightText: 2025 Tommaso Fontana
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The command line interface.

use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use itertools::Itertools;

use crate::formats::read_graph;
use crate::orders::order_by_name;
use crate::solvers::{solve, Algorithm, MaxCliqueParams, Strategy};
use crate::utils::{is_clique, AbortTimer};

#[derive(Parser, Debug)]
#[command(
    name = "parclique",
    version,
    about = "Finds a maximum clique of a graph.",
    long_about = None
)]
pub struct CliArgs {
    /// The algorithm variant: a threading strategy (seq, queue, steal),
    /// optionally joined by "-" with colouring modifiers (defer1, repair,
    /// repairsel) and, sequentially, inference modifiers (dom, lazydom).
    pub algorithm: String,

    /// The initial vertex order: none, deg, ex, dynex or mw.
    pub order: String,

    /// The input files (DIMACS format, unless --format is specified). May be
    /// specified multiple times.
    #[arg(required = true)]
    pub input_files: Vec<PathBuf>,

    /// The number of worker threads to use (where relevant).
    #[arg(long, default_value_t = num_cpus::get())]
    pub threads: usize,

    /// Stop after finding a clique of this size.
    #[arg(long)]
    pub stop_after_finding: Option<u32>,

    /// Specify an initial bound: only cliques strictly larger are reported.
    #[arg(long, default_value_t = 0)]
    pub initial_bound: u32,

    /// Specify the depth at which to perform splitting (where relevant).
    #[arg(long, default_value_t = 1)]
    pub split_depth: u32,

    /// Enable work donation (where relevant).
    #[arg(long)]
    pub work_donation: bool,

    /// Do not donate branches with fewer candidates than this.
    #[arg(long, default_value_t = 0)]
    pub min_donate_size: u32,

    /// The minimum number of microseconds between donations from one worker.
    #[arg(long, default_value_t = 0)]
    pub donation_wait: u64,

    /// Abort after this many seconds, reporting the best clique found so
    /// far.
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Count the maximum cliques instead of just finding one (sequential
    /// strategy only; use with --initial-bound=omega-1 to count the maximum
    /// cliques only).
    #[arg(long)]
    pub enumerate: bool,

    /// Log new incumbents as they are found.
    #[arg(long)]
    pub print_incumbents: bool,

    /// Specify the format of the input.
    #[arg(long, default_value = "dimacs")]
    pub format: String,

    /// Verify that we have found a valid result (for sanity checking
    /// changes).
    #[arg(long)]
    pub verify: bool,
}

/// Initializes the logger the way the binary does; exposed so that other
/// front ends can reuse it.
pub fn init_env_logger() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init()?;
    Ok(())
}

/// The body of the binary: parses `args` and runs the solver on every input
/// file.
pub fn cli_main<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match CliArgs::try_parse_from(args) {
        Ok(args) => args,
        Err(e)
            if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion =>
        {
            e.print()?;
            return Ok(());
        }
        Err(e) => {
            e.print()?;
            eprintln!("Try --help");
            std::process::exit(1);
        }
    };

    let algorithm: Algorithm = args.algorithm.parse()?;
    let order_fn = order_by_name(&args.order)?;
    ensure!(
        !args.enumerate || algorithm.strategy == Strategy::Sequential,
        "enumeration requires the sequential solver"
    );

    let mut first = true;
    for input_file in &args.input_files {
        if first {
            first = false;
        } else {
            println!("--");
        }

        let graph = read_graph(&args.format, input_file)
            .with_context(|| format!("could not read {}", input_file.display()))?;

        let params = MaxCliqueParams {
            n_threads: args.threads,
            stop_after_finding: args.stop_after_finding.unwrap_or(u32::MAX),
            initial_bound: args.initial_bound,
            split_depth: args.split_depth,
            work_donation: args.work_donation,
            min_donate_size: args.min_donate_size,
            donation_wait: Duration::from_micros(args.donation_wait),
            enumerate: args.enumerate,
            print_incumbents: args.print_incumbents,
            abort: Arc::new(AtomicBool::new(false)),
        };

        let _timer = args
            .timeout
            .map(|seconds| AbortTimer::start(params.abort.clone(), Duration::from_secs(seconds)));

        let start_time = Instant::now();
        let result = solve(&graph, algorithm, order_fn, &params)?;
        let overall_time = start_time.elapsed();

        print!("{} {}", result.size, result.nodes);
        if args.enumerate {
            print!(" {}", result.result_count);
        }
        if result.aborted {
            print!(" aborted");
        }
        println!();

        println!(
            "{}",
            result
                .members
                .iter()
                .map(|&v| graph.vertex_name(v as usize))
                .join(" ")
        );

        print!("{}", overall_time.as_millis());
        for time in &result.times {
            print!(" {}", time.as_millis());
        }
        println!();

        if args.work_donation {
            println!("{}", result.donations);
        }

        if args.verify {
            ensure!(
                is_clique(&graph, &result.members),
                "verification failed: the result is not a clique"
            );
        }
    }

    Ok(())
}
