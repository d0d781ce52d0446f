// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `dgemvt`: y ← β y + A x over a flat, strided A

use std::io::{self, Write};

use crate::dataset::Dataset;
use crate::dump::Dump;
use crate::error::KernelError;
use crate::suite::Benchmark;
use crate::threading::Execution;

pub const BETA: f64 = 1.2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Size {
    /// Length of y, rows of A
    pub m: usize,
    /// Length of x, columns read per row
    pub n: usize,
    /// Row stride of A
    pub lda: usize,
}

impl Size {
    pub fn from_dataset(dataset: Dataset) -> Self {
        let [m, n, lda] = dataset.pick([
            [256, 256, 128],
            [512, 256, 128],
            [1024, 512, 256],
            [4096, 4096, 512],
            [16384, 16384, 1024],
        ]);
        Size { m, n, lda }
    }

    /// Length of the flat A buffer
    pub fn p(&self) -> usize {
        self.m * self.lda + self.n
    }
}

pub struct Dgemvt {
    pub size: Size,
    pub beta: f64,
    pub y: Vec<f64>,
    pub x: Vec<f64>,
    pub a: Vec<f64>,
}

impl Dgemvt {
    /// `x[i] = ln(i + 1)` keeps the first element finite.
    pub fn init(size: Size) -> Self {
        Dgemvt {
            size,
            beta: BETA,
            y: (0..size.m).map(|i| 42. + i as f64).collect(),
            x: (0..size.n).map(|i| ((i + 1) as f64).ln()).collect(),
            a: (0..size.p()).map(|i| (i as f64).sin()).collect(),
        }
    }
}

/// For each `i`: `y[i] = beta * y[i]`, then `y[i] += a[i*lda + j] * x[j]`
/// for `j` in `0..x.len()`.
///
/// Rows of A may overlap when `lda < x.len()`.
///
/// ***Errors*** with `InvalidSize` when the last row would read past the
/// end of `a`.
pub fn kernel_dgemvt(lda: usize, beta: f64, y: &mut [f64], x: &[f64], a: &[f64])
    -> Result<(), KernelError>
{
    let (m, n) = (y.len(), x.len());
    if m > 0 && (m - 1) * lda + n > a.len() {
        return Err(KernelError::InvalidSize {
            kernel: "dgemvt",
            reason: format!("{} rows of stride {} and length {} need more than {} elements",
                            m, lda, n, a.len()),
        });
    }
    for (i, yi) in y.iter_mut().enumerate() {
        *yi = beta * *yi;
        let row = &a[i * lda..i * lda + n];
        for (&aij, &xj) in row.iter().zip(x) {
            *yi += aij * xj;
        }
    }
    Ok(())
}

impl Benchmark for Dgemvt {
    const NAME: &'static str = "dgemvt";
    type Size = Size;

    fn size(dataset: Dataset) -> Size { Size::from_dataset(dataset) }

    fn init(size: Size) -> Self { Dgemvt::init(size) }

    fn run(&mut self, _exec: Execution) -> Result<(), KernelError> {
        kernel_dgemvt(self.size.lda, self.beta, &mut self.y, &self.x, &self.a)
    }

    fn dump<W: Write>(&self, dump: &mut Dump<W>) -> io::Result<()> {
        dump.array("Y", &self.y)
    }
}
