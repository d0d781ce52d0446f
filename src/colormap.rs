// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `colormap`: 16-bit gray ramp into three color planes

use std::io::{self, Write};

use crate::dataset::Dataset;
use crate::dump::Dump;
use crate::error::KernelError;
use crate::suite::Benchmark;
use crate::threading::{for_each_row, Execution};

/// Largest 16-bit channel value
pub const MAX16: i64 = 65535;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Size {
    pub n: usize,
}

impl Size {
    pub fn from_dataset(dataset: Dataset) -> Self {
        Size { n: dataset.pick([1024, 65536, 1048576, 16777216, 67108864]) }
    }
}

pub struct Colormap {
    pub size: Size,
    pub r: Vec<f64>,
    pub g: Vec<f64>,
    pub b: Vec<f64>,
}

impl Colormap {
    /// Planes start zeroed; the ramp overwrites every element.
    pub fn init(size: Size) -> Self {
        Colormap {
            size,
            r: vec![0.; size.n],
            g: vec![0.; size.n],
            b: vec![0.; size.n],
        }
    }

    /// Planes holding 8-bit style values, the input of
    /// [`kernel_colormap_scale`].
    pub fn init_scaled(size: Size) -> Self {
        let n = size.n as u64;
        let plane = |f: &dyn Fn(u64) -> u64| -> Vec<f64> {
            (0..n).map(|i| (f(i) % n) as f64 / (5 * n) as f64).collect()
        };
        Colormap {
            size,
            r: plane(&|i| i * i + 1),
            g: plane(&|i| i * (i + 1) + 2),
            b: plane(&|i| i * (i + 3)),
        }
    }
}

fn check_planes(r: &[f64], g: &[f64], b: &[f64]) -> usize {
    let n = r.len();
    assert_eq!(g.len(), n);
    assert_eq!(b.len(), n);
    n
}

/// Write `(i * 65535) / (n - 1)`, in integer arithmetic, to all three
/// planes at every index `i`.
///
/// ***Errors*** with `InvalidSize` for planes shorter than two elements.
pub fn kernel_colormap(exec: Execution, r: &mut [f64], g: &mut [f64], b: &mut [f64])
    -> Result<(), KernelError>
{
    let n = check_planes(r, g, b);
    if n < 2 {
        return Err(KernelError::InvalidSize {
            kernel: "colormap",
            reason: format!("a ramp needs at least two entries, got {}", n),
        });
    }
    let span = n as i64 - 1;
    for plane in [r, g, b] {
        for_each_row(exec, plane, 1, |i, v| v[0] = ((i as i64 * MAX16) / span) as f64);
    }
    Ok(())
}

/// Scale every value of the three planes from the 8-bit to the 16-bit
/// range, `v * 65535 / 255` in floating point.
pub fn kernel_colormap_scale(exec: Execution, r: &mut [f64], g: &mut [f64], b: &mut [f64]) {
    let n = check_planes(r, g, b);
    if n == 0 {
        return;
    }
    for plane in [r, g, b] {
        for_each_row(exec, plane, 1, |_, v| v[0] = (v[0] * MAX16 as f64) / 255.);
    }
}

impl Benchmark for Colormap {
    const NAME: &'static str = "colormap";
    type Size = Size;

    fn size(dataset: Dataset) -> Size { Size::from_dataset(dataset) }

    fn init(size: Size) -> Self { Colormap::init(size) }

    fn run(&mut self, exec: Execution) -> Result<(), KernelError> {
        kernel_colormap(exec, &mut self.r, &mut self.g, &mut self.b)
    }

    fn dump<W: Write>(&self, dump: &mut Dump<W>) -> io::Result<()> {
        dump.array("R", &self.r)?;
        dump.array("G", &self.g)?;
        dump.array("B", &self.b)
    }
}
