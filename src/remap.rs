// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `remap`: spectral element refinement from the NAS UA benchmark
//!
//! Interpolates the `lx³` solution of a parent element onto its eight
//! children. Each child value is a tensor product of one of two 1D
//! interpolation matrices per dimension: `ixmc1`/`ixmc2` along the first
//! contracted index, `ixtmc1`/`ixtmc2` along the other two.

use std::io::{self, Write};

use crate::dataset::Dataset;
use crate::dump::Dump;
use crate::error::KernelError;
use crate::matrix::{Cube, Matrix};
use crate::suite::Benchmark;
use crate::threading::Execution;

pub const YONE_LEN: usize = 2;
pub const YTWO_LEN: usize = 4;
/// Children other than the one written to `Y`
pub const Y1_LEN: usize = 7;

/// Per row coefficients of the three patterned rows of `ixtmc1`
const ROW_COEFFS: [[f64; 5]; 3] = [
    [0.3385078435248143, 0.7898516348912331, -0.1884018684471238,
     9.202967302175333e-02, -3.198728299067715e-02],
    [-0.1171875, 0.8840317166357952, 0.3125, -0.118406716635795, 0.0390625],
    [-7.065070066767144e-02, 0.2829703269782467, 0.902687582732838,
     -0.1648516348912333, 4.984442584781999e-02],
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Size {
    /// Points per element edge
    pub lx: usize,
}

impl Size {
    pub fn from_dataset(dataset: Dataset) -> Self {
        Size { lx: dataset.pick([2, 4, 8, 16, 32]) }
    }
}

/// The interpolation operators
#[derive(Clone, Debug)]
pub struct Interpolation {
    pub ixmc1: Matrix<f64>,
    pub ixmc2: Matrix<f64>,
    pub ixtmc1: Matrix<f64>,
    pub ixtmc2: Matrix<f64>,
}

impl Interpolation {
    /// Synthetic operators for any `lx >= 1`.
    ///
    /// `ixtmc1` has unit entries in its first and last rows and the
    /// patterned rows in between; `ixtmc2` is `ixtmc1` rotated by half a
    /// turn; `ixmc1` and `ixmc2` are the transposes.
    pub fn new(lx: usize) -> Self {
        let mut ixtmc1 = Matrix::zeros(lx, lx);
        if lx > 0 {
            ixtmc1[(0, 0)] = 1.;
            ixtmc1[(lx - 1, lx / 2)] = 1.;
        }
        let limit = lx.saturating_sub(2) / 3;
        for i in (1..limit).step_by(3) {
            for (r, coeffs) in ROW_COEFFS.iter().enumerate() {
                for j in (0..lx / 5).step_by(5) {
                    for (k, &c) in coeffs.iter().enumerate() {
                        ixtmc1[(1 + r + i, (j + k) % lx)] = j as f64 + i as f64 * c;
                    }
                }
            }
        }
        let ixtmc2 = Matrix::from_fn(lx, lx, |j, i| ixtmc1[(lx - 1 - j, lx - 1 - i)]);
        let ixmc1 = Matrix::from_fn(lx, lx, |j, i| ixtmc1[(i, j)]);
        let ixmc2 = Matrix::from_fn(lx, lx, |j, i| ixtmc2[(i, j)]);
        Interpolation { ixmc1, ixmc2, ixtmc1, ixtmc2 }
    }
}

pub struct Remap {
    pub size: Size,
    pub ops: Interpolation,
    pub x: Cube<f64>,
    pub y: Cube<f64>,
    pub yone: [Cube<f64>; YONE_LEN],
    pub ytwo: [Cube<f64>; YTWO_LEN],
    pub y1: [Cube<f64>; Y1_LEN],
}

impl Remap {
    pub fn init(size: Size) -> Self {
        let lx = size.lx;
        let zeros = || Cube::zeros(lx, lx, lx);
        Remap {
            size,
            ops: Interpolation::new(lx),
            x: Cube::from_fn(lx, lx, lx, |i, j, k| ((i + j + k) as f64).sin()),
            y: Cube::from_fn(lx, lx, lx, |i, j, k| ((i + j + k) as f64).cos()),
            yone: [(); YONE_LEN].map(|_| zeros()),
            ytwo: [(); YTWO_LEN].map(|_| zeros()),
            y1: [(); Y1_LEN].map(|_| zeros()),
        }
    }
}

/// Accumulate the eight children of `x`: one into `y`, seven into `y1`.
///
/// `yone` and `ytwo` hold the intermediate contractions and are
/// accumulated into as well, so they start zeroed for a clean result.
/// Stage one contracts the last index of `x` with `ixmc1` and `ixmc2`,
/// stage two the middle index with `ixtmc1` and `ixtmc2`, stage three the
/// remaining one, with the pairings
///
/// | output  | stage two input | stage three operator |
/// |---------|-----------------|----------------------|
/// | `y`     | `ytwo[0]`       | `ixtmc1`             |
/// | `y1[0]` | `ytwo[2]`       | `ixtmc1`             |
/// | `y1[1]` | `ytwo[1]`       | `ixtmc1`             |
/// | `y1[2]` | `ytwo[3]`       | `ixtmc1`             |
/// | `y1[3]` | `ytwo[0]`       | `ixtmc2`             |
/// | `y1[4]` | `ytwo[2]`       | `ixtmc2`             |
/// | `y1[5]` | `ytwo[1]`       | `ixtmc2`             |
/// | `y1[6]` | `ytwo[3]`       | `ixtmc2`             |
///
/// where `ytwo[2a + b]` is `yone[a]` contracted with `ixtmc1` (b = 0) or
/// `ixtmc2` (b = 1).
pub fn kernel_remap(ops: &Interpolation, x: &Cube<f64>, y: &mut Cube<f64>,
                    yone: &mut [Cube<f64>; YONE_LEN], ytwo: &mut [Cube<f64>; YTWO_LEN],
                    y1: &mut [Cube<f64>; Y1_LEN])
{
    let lx = x.dim()[0];
    let cube = [lx; 3];
    assert_eq!(x.dim(), cube);
    assert_eq!(y.dim(), cube);
    for c in yone.iter().chain(ytwo.iter()).chain(y1.iter()) {
        assert_eq!(c.dim(), cube);
    }
    for m in [&ops.ixmc1, &ops.ixmc2, &ops.ixtmc1, &ops.ixtmc2] {
        assert_eq!(m.shape(), (lx, lx));
    }
    let Interpolation { ixmc1, ixmc2, ixtmc1, ixtmc2 } = ops;

    for i in 0..lx {
        for kk in 0..lx {
            for jj in 0..lx {
                let xv = x[(i, jj, kk)];
                for ii in 0..lx {
                    yone[0][(i, jj, ii)] = yone[0][(i, jj, ii)] + ixmc1[(kk, ii)] * xv;
                    yone[1][(i, jj, ii)] = yone[1][(i, jj, ii)] + ixmc2[(kk, ii)] * xv;
                }
            }
        }
        for kk in 0..lx {
            for jj in 0..lx {
                let (t1, t2) = (ixtmc1[(jj, kk)], ixtmc2[(jj, kk)]);
                for ii in 0..lx {
                    let (a0, a1) = (yone[0][(i, kk, ii)], yone[1][(i, kk, ii)]);
                    ytwo[0][(jj, i, ii)] = ytwo[0][(jj, i, ii)] + a0 * t1;
                    ytwo[1][(jj, i, ii)] = ytwo[1][(jj, i, ii)] + a0 * t2;
                    ytwo[2][(jj, i, ii)] = ytwo[2][(jj, i, ii)] + a1 * t1;
                    ytwo[3][(jj, i, ii)] = ytwo[3][(jj, i, ii)] + a1 * t2;
                }
            }
        }
    }

    // (stage two input, stage three operator is ixtmc2) per y1 entry
    const WIRING: [(usize, bool); Y1_LEN] = [
        (2, false), (1, false), (3, false),
        (0, true), (2, true), (1, true), (3, true),
    ];
    for iz in 0..lx {
        for kk in 0..lx {
            for jj in 0..lx {
                let (t1, t2) = (ixtmc1[(jj, kk)], ixtmc2[(jj, kk)]);
                for ii in 0..lx {
                    y[(jj, iz, ii)] = y[(jj, iz, ii)] + ytwo[0][(iz, kk, ii)] * t1;
                    for (out, &(src, second)) in y1.iter_mut().zip(&WIRING) {
                        let t = if second { t2 } else { t1 };
                        out[(jj, iz, ii)] = out[(jj, iz, ii)] + ytwo[src][(iz, kk, ii)] * t;
                    }
                }
            }
        }
    }
}

impl Benchmark for Remap {
    const NAME: &'static str = "remap";
    type Size = Size;

    fn size(dataset: Dataset) -> Size { Size::from_dataset(dataset) }

    fn init(size: Size) -> Self { Remap::init(size) }

    fn run(&mut self, _exec: Execution) -> Result<(), KernelError> {
        kernel_remap(&self.ops, &self.x, &mut self.y,
                     &mut self.yone, &mut self.ytwo, &mut self.y1);
        Ok(())
    }

    fn dump<W: Write>(&self, dump: &mut Dump<W>) -> io::Result<()> {
        let y1: Vec<f64> = self.y1.iter().flat_map(|c| c.as_slice().iter().copied()).collect();
        dump.array("Y1", &y1)
    }
}
