// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `mvt`: x1 += A y1, x2 += Aᵗ y2

use std::io::{self, Write};

use crate::dataset::Dataset;
use crate::dump::Dump;
use crate::error::KernelError;
use crate::matrix::Matrix;
use crate::suite::Benchmark;
use crate::threading::{for_each_row, Execution};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Size {
    pub n: usize,
}

impl Size {
    pub fn from_dataset(dataset: Dataset) -> Self {
        Size { n: dataset.pick([40, 120, 400, 2000, 4000]) }
    }
}

pub struct Mvt {
    pub size: Size,
    pub x1: Vec<f64>,
    pub x2: Vec<f64>,
    pub y1: Vec<f64>,
    pub y2: Vec<f64>,
    pub a: Matrix<f64>,
}

impl Mvt {
    pub fn init(size: Size) -> Self {
        let n = size.n;
        let ramp = |offset: usize| -> Vec<f64> {
            (0..n).map(|i| ((i + offset) % n) as f64 / n as f64).collect()
        };
        Mvt {
            size,
            x1: ramp(0),
            x2: ramp(1),
            y1: ramp(3),
            y2: ramp(4),
            a: Matrix::from_fn(n, n, |i, j| (i * j % n) as f64 / n as f64),
        }
    }
}

/// Two matrix-vector passes, the second with A transposed.
///
/// Each `x1[i]` and `x2[i]` accumulates over `j` on its own, so parallel
/// mode splits the `i` range of each pass between threads.
pub fn kernel_mvt(exec: Execution, x1: &mut [f64], x2: &mut [f64],
                  y1: &[f64], y2: &[f64], a: &Matrix<f64>)
{
    let n = x1.len();
    assert_eq!(a.shape(), (n, n));
    assert_eq!(x2.len(), n);
    assert_eq!(y1.len(), n);
    assert_eq!(y2.len(), n);
    if n == 0 {
        return;
    }
    for_each_row(exec, x1, 1, |i, x| {
        let mut acc = x[0];
        for (&aij, &yj) in a.row(i).iter().zip(y1) {
            acc = acc + aij * yj;
        }
        x[0] = acc;
    });
    for_each_row(exec, x2, 1, |i, x| {
        let mut acc = x[0];
        for (j, &yj) in y2.iter().enumerate() {
            acc = acc + a[(j, i)] * yj;
        }
        x[0] = acc;
    });
}

impl Benchmark for Mvt {
    const NAME: &'static str = "mvt";
    type Size = Size;

    fn size(dataset: Dataset) -> Size { Size::from_dataset(dataset) }

    fn init(size: Size) -> Self { Mvt::init(size) }

    fn run(&mut self, exec: Execution) -> Result<(), KernelError> {
        kernel_mvt(exec, &mut self.x1, &mut self.x2, &self.y1, &self.y2, &self.a);
        Ok(())
    }

    fn dump<W: Write>(&self, dump: &mut Dump<W>) -> io::Result<()> {
        dump.array("x1", &self.x1)?;
        dump.array("x2", &self.x2)
    }
}
