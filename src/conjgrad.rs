// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `conjgrad`: truncated conjugate gradient iteration
//!
//! A fixed number of iterations of the z/r update of CG. The search
//! direction `p` and `q = A p` are inputs that never change, and the two
//! dot product accumulators carry over between iterations. There is no
//! convergence test.

use std::io::{self, Write};

use crate::dataset::Dataset;
use crate::dump::Dump;
use crate::error::KernelError;
use crate::suite::Benchmark;
use crate::threading::Execution;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Size {
    pub na: usize,
    pub niter: usize,
}

impl Size {
    pub fn from_dataset(dataset: Dataset) -> Self {
        let [na, niter] = dataset.pick([
            [1400, 15],
            [7000, 15],
            [14000, 15],
            [75000, 75],
            [150000, 75],
        ]);
        Size { na, niter }
    }
}

pub struct Conjgrad {
    pub size: Size,
    pub p: Vec<f64>,
    pub q: Vec<f64>,
    pub z: Vec<f64>,
    pub r: Vec<f64>,
}

impl Conjgrad {
    pub fn init(size: Size) -> Self {
        let ramp = |step: f64| -> Vec<f64> { (0..size.na).map(|j| step * j as f64).collect() };
        let r = ramp(0.00003);
        Conjgrad {
            size,
            p: r.clone(),
            q: ramp(0.00001),
            z: ramp(0.00002),
            r,
        }
    }
}

/// Iterations `1..=niter` of:
/// `rho += r·r`, `d += p·q`, `alpha = rho / d`, `z += alpha p`, `r -= alpha q`.
///
/// ***Errors*** with `ZeroCurvature` when `d` is exactly zero.
pub fn kernel_conjgrad(niter: usize, p: &[f64], q: &[f64], z: &mut [f64], r: &mut [f64])
    -> Result<(), KernelError>
{
    let na = p.len();
    assert_eq!(q.len(), na);
    assert_eq!(z.len(), na);
    assert_eq!(r.len(), na);
    let mut rho = 0.;
    let mut d = 0.;
    for iteration in 1..=niter {
        for &rj in r.iter() {
            rho = rho + rj * rj;
        }
        for (&pj, &qj) in p.iter().zip(q) {
            d = d + pj * qj;
        }
        if d == 0. {
            return Err(KernelError::ZeroCurvature { iteration });
        }
        let alpha = rho / d;
        for (zj, &pj) in z.iter_mut().zip(p) {
            *zj = *zj + alpha * pj;
        }
        for (rj, &qj) in r.iter_mut().zip(q) {
            *rj = *rj - alpha * qj;
        }
        log::trace!("conjgrad: iteration {} alpha {}", iteration, alpha);
    }
    Ok(())
}

impl Benchmark for Conjgrad {
    const NAME: &'static str = "conjgrad";
    type Size = Size;

    fn size(dataset: Dataset) -> Size { Size::from_dataset(dataset) }

    fn init(size: Size) -> Self { Conjgrad::init(size) }

    fn run(&mut self, _exec: Execution) -> Result<(), KernelError> {
        kernel_conjgrad(self.size.niter, &self.p, &self.q, &mut self.z, &mut self.r)
    }

    fn dump<W: Write>(&self, dump: &mut Dump<W>) -> io::Result<()> {
        dump.array("z", &self.z)?;
        dump.array("r", &self.r)
    }
}
