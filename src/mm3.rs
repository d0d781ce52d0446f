// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `3mm`: G = (A B) (C D)

use std::io::{self, Write};

use crate::dataset::Dataset;
use crate::dump::Dump;
use crate::error::KernelError;
use crate::matrix::Matrix;
use crate::suite::Benchmark;
use crate::threading::{for_each_row, Execution};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Size {
    pub ni: usize,
    pub nj: usize,
    pub nk: usize,
    pub nl: usize,
    pub nm: usize,
}

impl Size {
    pub fn from_dataset(dataset: Dataset) -> Self {
        let [ni, nj, nk, nl, nm] = dataset.pick([
            [16, 18, 20, 22, 24],
            [40, 50, 60, 70, 80],
            [180, 190, 200, 210, 220],
            [800, 900, 1000, 1100, 1200],
            [1600, 1800, 2000, 2200, 2400],
        ]);
        Size { ni, nj, nk, nl, nm }
    }
}

pub struct Mm3 {
    pub size: Size,
    /// ni x nk
    pub a: Matrix<f64>,
    /// nk x nj
    pub b: Matrix<f64>,
    /// nj x nm
    pub c: Matrix<f64>,
    /// nm x nl
    pub d: Matrix<f64>,
    /// ni x nj
    pub e: Matrix<f64>,
    /// nj x nl
    pub f: Matrix<f64>,
    /// ni x nl
    pub g: Matrix<f64>,
}

impl Mm3 {
    pub fn init(size: Size) -> Self {
        let Size { ni, nj, nk, nl, nm } = size;
        let a = Matrix::from_fn(ni, nk, |i, j| ((i * j + 1) % ni) as f64 / (5 * ni) as f64);
        let b = Matrix::from_fn(nk, nj, |i, j| ((i * (j + 1) + 2) % nj) as f64 / (5 * nj) as f64);
        let c = Matrix::from_fn(nj, nm, |i, j| ((i * (j + 3)) % nl) as f64 / (5 * nl) as f64);
        let d = Matrix::from_fn(nm, nl, |i, j| ((i * (j + 2) + 2) % nk) as f64 / (5 * nk) as f64);
        Mm3 {
            size,
            a, b, c, d,
            e: Matrix::zeros(ni, nj),
            f: Matrix::zeros(nj, nl),
            g: Matrix::zeros(ni, nl),
        }
    }
}

/// Compute the matrix product *out = a b*.
///
/// Each element starts from 0.0 and accumulates over `k` in increasing
/// order. In parallel mode the rows of `out` are split between threads.
pub fn matmul(exec: Execution, a: &Matrix<f64>, b: &Matrix<f64>, out: &mut Matrix<f64>) {
    assert_eq!(a.cols(), b.rows(), "inner dimensions differ");
    assert_eq!(out.shape(), (a.rows(), b.cols()), "output shape");
    let n = out.cols();
    if n == 0 {
        return;
    }
    for_each_row(exec, out.as_mut_slice(), n, |i, out_row| {
        let a_row = a.row(i);
        for (j, elt) in out_row.iter_mut().enumerate() {
            let mut acc = 0.;
            for (k, &aik) in a_row.iter().enumerate() {
                acc += aik * b[(k, j)];
            }
            *elt = acc;
        }
    });
}

/// E = A B, F = C D, G = E F
pub fn kernel_3mm(exec: Execution,
                  a: &Matrix<f64>, b: &Matrix<f64>, c: &Matrix<f64>, d: &Matrix<f64>,
                  e: &mut Matrix<f64>, f: &mut Matrix<f64>, g: &mut Matrix<f64>)
{
    matmul(exec, a, b, e);
    matmul(exec, c, d, f);
    matmul(exec, e, f, g);
}

impl Benchmark for Mm3 {
    const NAME: &'static str = "3mm";
    type Size = Size;

    fn size(dataset: Dataset) -> Size { Size::from_dataset(dataset) }

    fn init(size: Size) -> Self { Mm3::init(size) }

    fn run(&mut self, exec: Execution) -> Result<(), KernelError> {
        kernel_3mm(exec, &self.a, &self.b, &self.c, &self.d,
                   &mut self.e, &mut self.f, &mut self.g);
        Ok(())
    }

    fn dump<W: Write>(&self, dump: &mut Dump<W>) -> io::Result<()> {
        dump.array("G", self.g.as_slice())
    }
}
