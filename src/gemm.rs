// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `gemm`: C ← β C + α A B

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
    pub ni: usize,
    pub nj: usize,
    pub nk: usize,
}

impl Size {
    pub fn from_dataset(dataset: Dataset) -> Self {
        let [ni, nj, nk] = dataset.pick([
            [20, 25, 30],
            [60, 70, 80],
            [200, 220, 240],
            [1000, 1100, 1200],
            [2000, 2300, 2600],
        ]);
        Size { ni, nj, nk }
    }
}

pub struct Gemm {
    pub size: Size,
    pub alpha: f64,
    pub beta: f64,
    /// ni x nj
    pub c: Matrix<f64>,
    /// ni x nk
    pub a: Matrix<f64>,
    /// nk x nj
    pub b: Matrix<f64>,
}

impl Gemm {
    pub fn init(size: Size) -> Self {
        let Size { ni, nj, nk } = size;
        Gemm {
            size,
            alpha: ALPHA,
            beta: BETA,
            c: Matrix::from_fn(ni, nj, |i, j| ((i * j + 1) % ni) as f64 / ni as f64),
            a: Matrix::from_fn(ni, nk, |i, j| (i * (j + 1) % nk) as f64 / nk as f64),
            b: Matrix::from_fn(nk, nj, |i, j| (i * (j + 2) % nj) as f64 / nj as f64),
        }
    }
}

/// General matrix multiplication, in place in `c`.
///
/// First scales every element of `c` by `beta`, then for each row `i` and
/// each `k` adds `alpha * a[i][k] * b[k][j]` across the row. Rows are
/// independent; parallel mode splits them between threads.
pub fn kernel_gemm(exec: Execution, alpha: f64, beta: f64,
                   c: &mut Matrix<f64>, a: &Matrix<f64>, b: &Matrix<f64>)
{
    assert_eq!(a.cols(), b.rows(), "inner dimensions differ");
    assert_eq!(c.shape(), (a.rows(), b.cols()), "output shape");
    let nj = c.cols();
    if nj == 0 {
        return;
    }
    for_each_row(exec, c.as_mut_slice(), nj, |_, c_row| {
        for elt in c_row.iter_mut() {
            *elt *= beta;
        }
    });
    for_each_row(exec, c.as_mut_slice(), nj, |i, c_row| {
        for (k, &aik) in a.row(i).iter().enumerate() {
            for (elt, &bkj) in c_row.iter_mut().zip(b.row(k)) {
                *elt += alpha * aik * bkj;
            }
        }
    });
}

impl Benchmark for Gemm {
    const NAME: &'static str = "gemm";
    type Size = Size;

    fn size(dataset: Dataset) -> Size { Size::from_dataset(dataset) }

    fn init(size: Size) -> Self { Gemm::init(size) }

    fn run(&mut self, exec: Execution) -> Result<(), KernelError> {
        kernel_gemm(exec, self.alpha, self.beta, &mut self.c, &self.a, &self.b);
        Ok(())
    }

    fn dump<W: Write>(&self, dump: &mut Dump<W>) -> io::Result<()> {
        dump.array("C", self.c.as_slice())
    }
}
