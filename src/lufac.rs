// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `lufac`: in-place LU factorization with partial pivoting

use std::io::{self, Write};

use crate::dataset::Dataset;
use crate::dump::Dump;
use crate::error::KernelError;
use crate::matrix::Matrix;
use crate::suite::Benchmark;
use crate::threading::Execution;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Size {
    pub n: usize,
}

impl Size {
    pub fn from_dataset(dataset: Dataset) -> Self {
        Size { n: dataset.pick([32, 128, 256, 1024, 2048]) }
    }
}

pub struct Lufac {
    pub size: Size,
    pub c: Matrix<f64>,
    /// Pivot row of each elimination step, filled by the kernel
    pub pivots: Vec<usize>,
}

impl Lufac {
    /// Anti-diagonal of `n` over entries in `[0, 1)`: nonsingular, and
    /// the first column's maximum sits in the last row.
    pub fn init(size: Size) -> Self {
        let n = size.n;
        let c = Matrix::from_fn(n, n, |i, j| {
            if j == n - 1 - i {
                n as f64
            } else {
                ((i * j + 1) % n) as f64 / n as f64
            }
        });
        Lufac { size, c, pivots: Vec::new() }
    }
}

/// Factor `a` in place and return the pivot row chosen at each step.
///
/// Step `k` (for `k` in `0..n-1`) picks the first row `i >= k` with the
/// largest `|a[i][k]|`, swaps columns `k..n` of rows `k` and `i`, divides
/// the column below the pivot by it, then updates the trailing submatrix.
/// Afterwards the upper triangle holds U and the strict lower triangle
/// the multipliers of L. Multipliers from earlier steps are not
/// permuted by later swaps.
///
/// ***Errors*** with `SingularMatrix` when a pivot is exactly zero.
pub fn kernel_lufac(a: &mut Matrix<f64>) -> Result<Vec<usize>, KernelError> {
    let n = a.rows();
    assert_eq!(a.cols(), n, "matrix must be square");
    let mut pivots = Vec::with_capacity(n.saturating_sub(1));
    for k in 0..n.saturating_sub(1) {
        let mut p = k;
        let mut mu = a[(k, k)].abs();
        for i in k + 1..n {
            if mu < a[(i, k)].abs() {
                mu = a[(i, k)].abs();
                p = i;
            }
        }
        pivots.push(p);
        a.swap_rows_from(k, p, k);

        let pivot = a[(k, k)];
        if pivot == 0. {
            return Err(KernelError::SingularMatrix { step: k });
        }
        for i in k + 1..n {
            a[(i, k)] = a[(i, k)] / pivot;
        }
        for j in k + 1..n {
            let akj = a[(k, j)];
            for i in k + 1..n {
                a[(i, j)] = a[(i, j)] - a[(i, k)] * akj;
            }
        }
    }
    Ok(pivots)
}

impl Benchmark for Lufac {
    const NAME: &'static str = "lufac";
    type Size = Size;

    fn size(dataset: Dataset) -> Size { Size::from_dataset(dataset) }

    fn init(size: Size) -> Self { Lufac::init(size) }

    fn run(&mut self, _exec: Execution) -> Result<(), KernelError> {
        self.pivots = kernel_lufac(&mut self.c)?;
        Ok(())
    }

    fn dump<W: Write>(&self, dump: &mut Dump<W>) -> io::Result<()> {
        dump.array("C", self.c.as_slice())
    }
}
