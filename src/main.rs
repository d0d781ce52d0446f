// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::io::{self, Write};
use std::str::FromStr;

use clap::Parser;
use color_eyre::eyre::{self, WrapErr};
use strum::IntoEnumIterator;

use polykernels::config::Config;
use polykernels::suite::{self, KernelId};
use polykernels::{Dataset, Execution};

#[derive(Debug, Parser)]
#[command(author, version, about = "Run one benchmark kernel and print its time", long_about = None)]
struct Options {
    /// Kernel to run, or `list` to show all kernels
    kernel: String,

    /// Size class: mini, small, medium, large or extralarge
    #[arg(long = "dataset")]
    dataset: Option<Dataset>,

    /// Use the data-parallel form of the kernel
    #[arg(long = "parallel")]
    parallel: bool,

    /// Dump the output arrays to stderr
    #[arg(long = "dump")]
    dump: bool,

    #[arg(long = "repetitions", default_value_t = 1)]
    repetitions: usize,
}

fn list_kernels() {
    for id in KernelId::iter() {
        let mode = if id.has_parallel_form() { "sequential, parallel" } else { "sequential" };
        println!("{:<10} {}", id, mode);
    }
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let options = Options::parse();
    if options.kernel == "list" {
        list_kernels();
        return Ok(());
    }
    let id = KernelId::from_str(&options.kernel)
        .map_err(|_| eyre::eyre!("unknown kernel {:?}, see `polykernels list`", options.kernel))?;

    let config = Config::from_env();
    let dataset = options.dataset.unwrap_or(config.dataset);
    let dump = options.dump || config.dump;
    let exec = if options.parallel { Execution::Parallel } else { Execution::Sequential };
    if exec.is_parallel() && !id.has_parallel_form() {
        log::warn!("{} has no parallel form, running it sequentially", id);
    }
    log::info!("{} with dataset {} ({:?}, {} threads)", id, dataset, exec, config.threads);

    for repetition in 0..options.repetitions {
        let stderr = io::stderr();
        let mut sink = stderr.lock();
        let sink = if dump { Some(&mut sink as &mut dyn Write) } else { None };
        let report = suite::run_kernel(id, dataset, exec, sink)
            .wrap_err_with(|| format!("{} failed in repetition {}", id, repetition))?;
        println!("{}", report);
    }
    Ok(())
}
