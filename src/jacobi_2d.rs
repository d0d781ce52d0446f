// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `jacobi-2d`: five point averaging stencil

use std::io::{self, Write};

use crate::dataset::Dataset;
use crate::dump::Dump;
use crate::error::KernelError;
use crate::matrix::Matrix;
use crate::suite::Benchmark;
use crate::threading::{for_each_row, Execution};

pub const WEIGHT: f64 = 0.2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Size {
    pub tsteps: usize,
    pub n: usize,
}

impl Size {
    pub fn from_dataset(dataset: Dataset) -> Self {
        let [tsteps, n] = dataset.pick([
            [20, 30],
            [40, 90],
            [100, 250],
            [500, 1300],
            [1000, 2800],
        ]);
        Size { tsteps, n }
    }
}

pub struct Jacobi2d {
    pub size: Size,
    pub a: Matrix<f64>,
    pub b: Matrix<f64>,
}

impl Jacobi2d {
    pub fn init(size: Size) -> Self {
        let n = size.n;
        Jacobi2d {
            size,
            a: Matrix::from_fn(n, n, |i, j| (i as f64 * (j + 2) as f64 + 2.) / n as f64),
            b: Matrix::from_fn(n, n, |i, j| (i as f64 * (j + 3) as f64 + 3.) / n as f64),
        }
    }
}

/// Interior of `dst` from the five point average of `src`
fn sweep(exec: Execution, src: &Matrix<f64>, dst: &mut Matrix<f64>) {
    let n = src.rows();
    if n < 3 {
        return;
    }
    for_each_row(exec, dst.as_mut_slice(), n, |i, row| {
        if i == 0 || i == n - 1 {
            return;
        }
        let (up, mid, down) = (src.row(i - 1), src.row(i), src.row(i + 1));
        for j in 1..n - 1 {
            row[j] = WEIGHT * (mid[j] + mid[j - 1] + mid[j + 1] + down[j] + up[j]);
        }
    });
}

/// Alternate interior updates of `b` from `a` and of `a` from `b`,
/// `tsteps` times. Border rows and columns keep their initial values.
///
/// Within a half step every row only reads the other array, so parallel
/// mode splits rows between threads.
pub fn kernel_jacobi_2d(exec: Execution, tsteps: usize, a: &mut Matrix<f64>, b: &mut Matrix<f64>) {
    assert_eq!(a.rows(), a.cols(), "grid must be square");
    assert_eq!(a.shape(), b.shape());
    for _ in 0..tsteps {
        sweep(exec, a, b);
        sweep(exec, b, a);
    }
}

impl Benchmark for Jacobi2d {
    const NAME: &'static str = "jacobi-2d";
    type Size = Size;

    fn size(dataset: Dataset) -> Size { Size::from_dataset(dataset) }

    fn init(size: Size) -> Self { Jacobi2d::init(size) }

    fn run(&mut self, exec: Execution) -> Result<(), KernelError> {
        kernel_jacobi_2d(exec, self.size.tsteps, &mut self.a, &mut self.b);
        Ok(())
    }

    fn dump<W: Write>(&self, dump: &mut Dump<W>) -> io::Result<()> {
        dump.array("A", self.a.as_slice())
    }
}
