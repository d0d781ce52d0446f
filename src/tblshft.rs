// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `tblshft`: quantize index ramps through a lin-log table

use std::io::{self, Write};

use crate::dataset::Dataset;
use crate::dump::Dump;
use crate::error::KernelError;
use crate::suite::Benchmark;
use crate::threading::{join, Execution};

/// Table position of the value 1.0
pub const ONE: usize = 1250;
/// Nominal ratio of consecutive entries in the logarithmic part
pub const RATIO: f64 = 1.004;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Size {
    pub f8sz: usize,
    pub f14sz: usize,
    /// Table length
    pub tsz: usize,
}

impl Size {
    pub fn from_dataset(dataset: Dataset) -> Self {
        let [f8sz, f14sz] = dataset.pick([
            [256, 16384],
            [1024, 65536],
            [4096, 262144],
            [65536, 4194304],
            [4194304, 268435456],
        ]);
        Size { f8sz, f14sz, tsz: 2049 }
    }
}

pub struct Tblshft {
    pub size: Size,
    pub f8: Vec<f64>,
    pub f14: Vec<f64>,
    pub tlf: Vec<f64>,
}

impl Tblshft {
    pub fn init(size: Size) -> Self {
        Tblshft {
            size,
            f8: vec![0.; size.f8sz],
            f14: vec![0.; size.f14sz],
            tlf: build_table(size.tsz),
        }
    }
}

/// Build the table: a linear segment from zero up to `nlin`, then
/// exponential growth by `e^c` per entry, with the last entry repeated.
///
/// The logarithmic part passes 1.0 at entry [`ONE`].
pub fn build_table(tsz: usize) -> Vec<f64> {
    let nlin = (1. / RATIO.ln()) as usize;
    let c = 1. / nlin as f64;
    let b = (-c * ONE as f64).exp();
    let linstep = b * c * 1f64.exp();
    let mut tlf = Vec::with_capacity(tsz);
    for i in 0..nlin.min(tsz) {
        tlf.push(i as f64 * linstep);
    }
    for i in nlin..tsz.saturating_sub(1) {
        tlf.push(b * (c * i as f64).exp());
    }
    if tsz >= 2 {
        let last = tlf[tsz - 2];
        tlf.truncate(tsz - 1);
        tlf.push(last);
    } else {
        tlf.resize(tsz, 0.);
    }
    tlf
}

/// For each `i`, with `x = i / (len - 1)`, store the first `j` at or after
/// the previous one where `x*x <= tlf[j] * tlf[j+1]`.
fn search(tlf: &[f64], out: &mut [f64]) -> Result<(), KernelError> {
    let last = (out.len() as f64) - 1.;
    let mut j = 0;
    for (i, elt) in out.iter_mut().enumerate() {
        let x = i as f64 / last;
        loop {
            if j + 1 >= tlf.len() {
                return Err(KernelError::TableExhausted { index: i, len: tlf.len() });
            }
            if x * x > tlf[j] * tlf[j + 1] {
                j += 1;
            } else {
                break;
            }
        }
        *elt = j as f64;
    }
    Ok(())
}

/// Fill `f14` and then `f8` with table positions.
///
/// Each pass starts its search at the front of the table. The passes
/// share nothing but the table, so parallel mode runs them concurrently.
///
/// ***Errors*** with `TableExhausted` if a search walks off the table.
pub fn kernel_tblshft(exec: Execution, f8: &mut [f64], f14: &mut [f64], tlf: &[f64])
    -> Result<(), KernelError>
{
    let (r14, r8) = join(exec, || search(tlf, f14), || search(tlf, f8));
    r14?;
    r8
}

impl Benchmark for Tblshft {
    const NAME: &'static str = "tblshft";
    type Size = Size;

    fn size(dataset: Dataset) -> Size { Size::from_dataset(dataset) }

    fn init(size: Size) -> Self { Tblshft::init(size) }

    fn run(&mut self, exec: Execution) -> Result<(), KernelError> {
        kernel_tblshft(exec, &mut self.f8, &mut self.f14, &self.tlf)
    }

    fn dump<W: Write>(&self, dump: &mut Dump<W>) -> io::Result<()> {
        dump.array("F8", &self.f8)?;
        dump.array("F14", &self.f14)
    }
}
