// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//!
//! Numeric benchmark kernels from PolyBench, MiBench and the NAS suite,
//! with their deterministic inputs and exact floating point operation
//! order.
//!
//! Every kernel is a plain function over explicitly sized buffers. Each
//! kernel module also has a `Size` (built by hand or from a [`Dataset`]
//! class), a struct holding the benchmark's buffers with a deterministic
//! `init`, and an implementation of [`suite::Benchmark`] which times the
//! kernel and writes the verification dump.
//!
//! ## Kernels
//!
//! - Dense linear algebra: [`mm3`], [`gemm`], [`bicg`], [`gesummv`],
//!   [`mvt`], [`lufac`], [`dgemvt`]
//! - Stencils and filters: [`jacobi_1d`], [`jacobi_2d`], [`fdtd_2d`],
//!   [`deriche`]
//! - Signal and table kernels: [`fourierf`], [`tblshft`], [`colormap`],
//!   [`cp50`]
//! - Iterative solver: [`conjgrad`]
//! - Tensor remap: [`remap`]
//!
//! ## Data representation
//!
//! Buffers are row-major [`Matrix`] and [`Cube`] values or plain `Vec`s.
//! Their shapes are fixed before a kernel runs and kernels never
//! reallocate them. Mismatched buffer shapes panic; data-dependent
//! failures such as a singular matrix are returned as [`KernelError`].
//!
//! ## Parallel execution
//!
//! Kernels that take an [`Execution`] can split their work over a thread
//! pool when the crate feature `threading` is enabled. The split only ever
//! hands whole write-disjoint rows, columns or independent passes to
//! threads, so both modes compute bit-identical results. The thread count
//! is read once from `POLYKERNELS_NUM_THREADS` and defaults to the number
//! of physical cores.

#![doc(html_root_url = "https://docs.rs/polykernels/0.1/")]

mod util;
pub mod threading;

pub mod config;
pub mod crand;
pub mod dataset;
pub mod dump;
pub mod element;
pub mod error;
pub mod matrix;
pub mod suite;

pub mod bicg;
pub mod colormap;
pub mod conjgrad;
pub mod cp50;
pub mod deriche;
pub mod dgemvt;
pub mod fdtd_2d;
pub mod fourierf;
pub mod gemm;
pub mod gesummv;
pub mod jacobi_1d;
pub mod jacobi_2d;
pub mod lufac;
pub mod mm3;
pub mod mvt;
pub mod remap;
pub mod tblshft;

pub use crate::dataset::Dataset;
pub use crate::element::Element;
pub use crate::error::KernelError;
pub use crate::matrix::{Cube, Matrix};
pub use crate::suite::{Benchmark, KernelId, Report};
pub use crate::threading::Execution;
