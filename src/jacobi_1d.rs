// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `jacobi-1d`: three point averaging stencil

use std::io::{self, Write};

use crate::dataset::Dataset;
use crate::dump::Dump;
use crate::error::KernelError;
use crate::suite::Benchmark;
use crate::threading::Execution;

/// The stencil weight, a truncated one third
pub const WEIGHT: f64 = 0.33333;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Size {
    pub tsteps: usize,
    pub n: usize,
}

impl Size {
    pub fn from_dataset(dataset: Dataset) -> Self {
        let [tsteps, n] = dataset.pick([
            [20, 30],
            [40, 120],
            [100, 400],
            [500, 2000],
            [1000, 4000],
        ]);
        Size { tsteps, n }
    }
}

pub struct Jacobi1d {
    pub size: Size,
    pub a: Vec<f64>,
    pub b: Vec<f64>,
}

impl Jacobi1d {
    pub fn init(size: Size) -> Self {
        let n = size.n;
        Jacobi1d {
            size,
            a: (0..n).map(|i| (i as f64 + 2.) / n as f64).collect(),
            b: (0..n).map(|i| (i as f64 + 3.) / n as f64).collect(),
        }
    }
}

fn sweep(src: &[f64], dst: &mut [f64]) {
    for i in 1..src.len().saturating_sub(1) {
        dst[i] = WEIGHT * (src[i - 1] + src[i] + src[i + 1]);
    }
}

/// Each time step writes the interior of `b` from `a`, then the interior
/// of `a` from `b`. The first and last elements are never written.
pub fn kernel_jacobi_1d(tsteps: usize, a: &mut [f64], b: &mut [f64]) {
    assert_eq!(a.len(), b.len());
    for _ in 0..tsteps {
        sweep(a, b);
        sweep(b, a);
    }
}

impl Benchmark for Jacobi1d {
    const NAME: &'static str = "jacobi-1d";
    type Size = Size;

    fn size(dataset: Dataset) -> Size { Size::from_dataset(dataset) }

    fn init(size: Size) -> Self { Jacobi1d::init(size) }

    fn run(&mut self, _exec: Execution) -> Result<(), KernelError> {
        kernel_jacobi_1d(self.size.tsteps, &mut self.a, &mut self.b);
        Ok(())
    }

    fn dump<W: Write>(&self, dump: &mut Dump<W>) -> io::Result<()> {
        dump.array("A", &self.a)
    }
}
