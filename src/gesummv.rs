// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `gesummv`: y = α A x + β B x

use std::io::{self, Write};

use crate::dataset::Dataset;
use crate::dump::Dump;
use crate::error::KernelError;
use crate::matrix::Matrix;
use crate::suite::Benchmark;
use crate::threading::{for_each_row, Execution};

pub const ALPHA: f64 = 1.5;
pub const BETA: f64 = 1.2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Size {
    pub n: usize,
}

impl Size {
    pub fn from_dataset(dataset: Dataset) -> Self {
        Size { n: dataset.pick([30, 90, 250, 1300, 2800]) }
    }
}

pub struct Gesummv {
    pub size: Size,
    pub alpha: f64,
    pub beta: f64,
    pub a: Matrix<f64>,
    pub b: Matrix<f64>,
    pub tmp: Vec<f64>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Gesummv {
    pub fn init(size: Size) -> Self {
        let n = size.n;
        Gesummv {
            size,
            alpha: ALPHA,
            beta: BETA,
            a: Matrix::from_fn(n, n, |i, j| ((i * j + 1) % n) as f64 / n as f64),
            b: Matrix::from_fn(n, n, |i, j| ((i * j + 2) % n) as f64 / n as f64),
            tmp: vec![0.; n],
            x: (0..n).map(|i| (i % n) as f64 / n as f64).collect(),
            y: vec![0.; n],
        }
    }
}

/// `tmp[i] = A[i]·x`, then `y[i] = alpha tmp[i] + beta B[i]·x`.
///
/// Both dot products accumulate over `j` in increasing order. Rows are
/// independent; parallel mode splits them between threads.
pub fn kernel_gesummv(exec: Execution, alpha: f64, beta: f64,
                      a: &Matrix<f64>, b: &Matrix<f64>,
                      tmp: &mut [f64], x: &[f64], y: &mut [f64])
{
    let n = x.len();
    assert_eq!(a.shape(), (n, n));
    assert_eq!(b.shape(), (n, n));
    assert_eq!(tmp.len(), n);
    assert_eq!(y.len(), n);
    if n == 0 {
        return;
    }
    let dot = |row: &[f64]| {
        let mut acc = 0.;
        for (&mij, &xj) in row.iter().zip(x) {
            acc = mij * xj + acc;
        }
        acc
    };
    for_each_row(exec, tmp, 1, |i, t| t[0] = dot(a.row(i)));
    let tmp: &[f64] = tmp;
    for_each_row(exec, y, 1, |i, yi| yi[0] = alpha * tmp[i] + beta * dot(b.row(i)));
}

impl Benchmark for Gesummv {
    const NAME: &'static str = "gesummv";
    type Size = Size;

    fn size(dataset: Dataset) -> Size { Size::from_dataset(dataset) }

    fn init(size: Size) -> Self { Gesummv::init(size) }

    fn run(&mut self, exec: Execution) -> Result<(), KernelError> {
        kernel_gesummv(exec, self.alpha, self.beta, &self.a, &self.b,
                       &mut self.tmp, &self.x, &mut self.y);
        Ok(())
    }

    fn dump<W: Write>(&self, dump: &mut Dump<W>) -> io::Result<()> {
        dump.array("y", &self.y)
    }
}
