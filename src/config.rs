// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Runner defaults from the environment.
//!
//! The thread count (`POLYKERNELS_NUM_THREADS`) is read separately by the
//! thread pool registry, see [`crate::threading`].

use std::env;
use std::str::FromStr;

use crate::dataset::Dataset;
use crate::threading::num_threads;

pub const DATASET_VAR: &str = "POLYKERNELS_DATASET";
pub const DUMP_VAR: &str = "POLYKERNELS_DUMP";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Size class used when the command line does not name one
    pub dataset: Dataset,
    /// Dump outputs after each run
    pub dump: bool,
    /// Threads of the parallel mode
    pub threads: usize,
}

impl Config {
    pub fn from_env() -> Self {
        let dataset = env::var(DATASET_VAR).ok();
        let dump = env::var(DUMP_VAR).ok();
        Config {
            dataset: parse_dataset(dataset.as_deref()),
            dump: parse_flag(dump.as_deref()),
            threads: num_threads(),
        }
    }
}

fn parse_dataset(value: Option<&str>) -> Dataset {
    match value {
        Some(s) if !s.is_empty() => Dataset::from_str(s).unwrap_or_else(|_| {
            log::warn!("failed to parse {}={:?}, using {}", DATASET_VAR, s, Dataset::default());
            Dataset::default()
        }),
        _otherwise => Dataset::default(),
    }
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(value, Some(s) if !s.is_empty() && s != "0")
}
