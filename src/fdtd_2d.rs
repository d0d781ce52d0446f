// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `fdtd-2d`: 2D finite-difference time-domain leapfrog

use std::io::{self, Write};

use crate::dataset::Dataset;
use crate::dump::Dump;
use crate::error::KernelError;
use crate::matrix::Matrix;
use crate::suite::Benchmark;
use crate::threading::Execution;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Size {
    pub tmax: usize,
    pub nx: usize,
    pub ny: usize,
}

impl Size {
    pub fn from_dataset(dataset: Dataset) -> Self {
        let [tmax, nx, ny] = dataset.pick([
            [20, 20, 30],
            [40, 60, 80],
            [100, 200, 240],
            [500, 1000, 1200],
            [1000, 2000, 2600],
        ]);
        Size { tmax, nx, ny }
    }
}

pub struct Fdtd2d {
    pub size: Size,
    pub ex: Matrix<f64>,
    pub ey: Matrix<f64>,
    pub hz: Matrix<f64>,
    /// Source value of each time step
    pub fict: Vec<f64>,
}

impl Fdtd2d {
    pub fn init(size: Size) -> Self {
        let Size { tmax, nx, ny } = size;
        Fdtd2d {
            size,
            ex: Matrix::from_fn(nx, ny, |i, j| i as f64 * (j + 1) as f64 / nx as f64),
            ey: Matrix::from_fn(nx, ny, |i, j| i as f64 * (j + 2) as f64 / ny as f64),
            hz: Matrix::from_fn(nx, ny, |i, j| i as f64 * (j + 3) as f64 / nx as f64),
            fict: (0..tmax).map(|t| t as f64).collect(),
        }
    }
}

/// One time step per entry of `fict`, each in four ordered sub-updates:
/// the source row of `ey`, `ey` from `hz`, `ex` from `hz`, and `hz` from
/// the new `ex` and `ey`.
pub fn kernel_fdtd_2d(ex: &mut Matrix<f64>, ey: &mut Matrix<f64>, hz: &mut Matrix<f64>,
                      fict: &[f64])
{
    let (nx, ny) = ex.shape();
    assert_eq!(ey.shape(), (nx, ny));
    assert_eq!(hz.shape(), (nx, ny));
    if nx == 0 || ny == 0 {
        return;
    }
    for &source in fict {
        for elt in ey.row_mut(0) {
            *elt = source;
        }
        for i in 1..nx {
            for j in 0..ny {
                ey[(i, j)] = ey[(i, j)] - 0.5 * (hz[(i, j)] - hz[(i - 1, j)]);
            }
        }
        for i in 0..nx {
            for j in 1..ny {
                ex[(i, j)] = ex[(i, j)] - 0.5 * (hz[(i, j)] - hz[(i, j - 1)]);
            }
        }
        for i in 0..nx - 1 {
            for j in 0..ny - 1 {
                hz[(i, j)] = hz[(i, j)]
                    - 0.7 * (ex[(i, j + 1)] - ex[(i, j)] + ey[(i + 1, j)] - ey[(i, j)]);
            }
        }
    }
}

impl Benchmark for Fdtd2d {
    const NAME: &'static str = "fdtd-2d";
    type Size = Size;

    fn size(dataset: Dataset) -> Size { Size::from_dataset(dataset) }

    fn init(size: Size) -> Self { Fdtd2d::init(size) }

    fn run(&mut self, _exec: Execution) -> Result<(), KernelError> {
        kernel_fdtd_2d(&mut self.ex, &mut self.ey, &mut self.hz, &self.fict);
        Ok(())
    }

    fn dump<W: Write>(&self, dump: &mut Dump<W>) -> io::Result<()> {
        dump.array("ex", self.ex.as_slice())?;
        dump.array("ey", self.ey.as_slice())?;
        dump.array("hz", self.hz.as_slice())
    }
}
