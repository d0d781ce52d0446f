// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `bicg`: the BiCG sub kernel, s = Aᵗ r and q = A p in one pass

use std::io::{self, Write};

use crate::dataset::Dataset;
use crate::dump::Dump;
use crate::error::KernelError;
use crate::matrix::Matrix;
use crate::suite::Benchmark;
use crate::threading::Execution;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Size {
    /// Columns of A
    pub m: usize,
    /// Rows of A
    pub n: usize,
}

impl Size {
    pub fn from_dataset(dataset: Dataset) -> Self {
        let [m, n] = dataset.pick([
            [38, 42],
            [116, 124],
            [390, 410],
            [1900, 2100],
            [1800, 2200],
        ]);
        Size { m, n }
    }
}

pub struct Bicg {
    pub size: Size,
    /// n x m
    pub a: Matrix<f64>,
    pub s: Vec<f64>,
    pub q: Vec<f64>,
    pub p: Vec<f64>,
    pub r: Vec<f64>,
}

impl Bicg {
    pub fn init(size: Size) -> Self {
        let Size { m, n } = size;
        Bicg {
            size,
            a: Matrix::from_fn(n, m, |i, j| (i * (j + 1) % n) as f64 / n as f64),
            s: vec![0.; m],
            q: vec![0.; n],
            p: (0..m).map(|i| (i % m) as f64 / m as f64).collect(),
            r: (0..n).map(|i| (i % n) as f64 / n as f64).collect(),
        }
    }
}

/// Fused pass over A: `s[j]` sums over rows while `q[i]` sums along row `i`.
///
/// `s` accumulates across the outer loop, so the pass stays sequential.
pub fn kernel_bicg(a: &Matrix<f64>, s: &mut [f64], q: &mut [f64], p: &[f64], r: &[f64]) {
    let (n, m) = a.shape();
    assert_eq!(s.len(), m);
    assert_eq!(p.len(), m);
    assert_eq!(q.len(), n);
    assert_eq!(r.len(), n);
    for elt in s.iter_mut() {
        *elt = 0.;
    }
    for i in 0..n {
        q[i] = 0.;
        let a_row = a.row(i);
        for j in 0..m {
            s[j] = s[j] + r[i] * a_row[j];
            q[i] = q[i] + a_row[j] * p[j];
        }
    }
}

impl Benchmark for Bicg {
    const NAME: &'static str = "bicg";
    type Size = Size;

    fn size(dataset: Dataset) -> Size { Size::from_dataset(dataset) }

    fn init(size: Size) -> Self { Bicg::init(size) }

    fn run(&mut self, _exec: Execution) -> Result<(), KernelError> {
        kernel_bicg(&self.a, &mut self.s, &mut self.q, &self.p, &self.r);
        Ok(())
    }

    fn dump<W: Write>(&self, dump: &mut Dump<W>) -> io::Result<()> {
        dump.array("s", &self.s)?;
        dump.array("q", &self.q)
    }
}
