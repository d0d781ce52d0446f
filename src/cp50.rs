// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `cp50`: split interleaved printer lines into color planes

use std::io::{self, Write};

use crate::dataset::Dataset;
use crate::dump::Dump;
use crate::error::KernelError;
use crate::matrix::Matrix;
use crate::suite::Benchmark;
use crate::threading::{for_each_row, Execution};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Size {
    /// Pixels per line
    pub x: usize,
    /// Nominal lines of the page
    pub y: usize,
    /// First column of pixel data in a line
    pub fc: usize,
    /// First line copied
    pub fl: usize,
    /// Last line copied, inclusive
    pub ll: usize,
}

impl Size {
    pub fn from_dataset(dataset: Dataset) -> Self {
        let [x, y, fc, fl, ll] = dataset.pick([
            [237, 400, 90, 70, 472],
            [330, 560, 126, 98, 661],
            [474, 800, 180, 140, 933],
            [592, 1000, 225, 175, 1175],
            [1184, 2000, 450, 350, 2350],
        ]);
        Size { x, y, fc, fl, ll }
    }

    /// Values per printer line
    pub fn line_size(&self) -> usize {
        3 * self.x + 2 * self.fc
    }

    /// Lines copied into the planes
    pub fn lines(&self) -> usize {
        (self.ll + 1).saturating_sub(self.fl)
    }
}

pub struct Cp50 {
    pub size: Size,
    /// `ll + 1` printer lines
    pub out: Matrix<f64>,
    pub r: Vec<f64>,
    pub g: Vec<f64>,
    pub b: Vec<f64>,
}

impl Cp50 {
    pub fn init(size: Size) -> Self {
        let plane = size.lines() * size.x;
        Cp50 {
            size,
            out: Matrix::from_fn(size.ll + 1, size.line_size(), |i, j| (i * j + 1) as f64),
            r: vec![0.; plane],
            g: vec![0.; plane],
            b: vec![0.; plane],
        }
    }
}

/// Copy pixel `i` of line `l` (for `l` in `fl..=ll`) from its three
/// interleaved values at column `3i + fc` into plane position
/// `(l - fl) * x + i`.
///
/// Each plane is filled line by line; parallel mode splits the lines of
/// a plane between threads.
pub fn kernel_cp50(exec: Execution, size: &Size, out: &Matrix<f64>,
                   r: &mut [f64], g: &mut [f64], b: &mut [f64])
{
    let Size { x, fc, fl, .. } = *size;
    let lines = size.lines();
    assert!(out.rows() > size.ll, "missing printer lines");
    assert!(out.cols() >= 3 * x + fc, "printer lines too short");
    for plane in [&*r, &*g, &*b] {
        assert_eq!(plane.len(), lines * x, "plane size");
    }
    if x == 0 {
        return;
    }
    for (channel, plane) in [r, g, b].into_iter().enumerate() {
        for_each_row(exec, plane, x, |line, pixels| {
            let src = out.row(fl + line);
            for (i, elt) in pixels.iter_mut().enumerate() {
                *elt = src[3 * i + channel + fc];
            }
        });
    }
}

impl Benchmark for Cp50 {
    const NAME: &'static str = "cp50";
    type Size = Size;

    fn size(dataset: Dataset) -> Size { Size::from_dataset(dataset) }

    fn init(size: Size) -> Self { Cp50::init(size) }

    fn run(&mut self, exec: Execution) -> Result<(), KernelError> {
        kernel_cp50(exec, &self.size, &self.out, &mut self.r, &mut self.g, &mut self.b);
        Ok(())
    }

    fn dump<W: Write>(&self, dump: &mut Dump<W>) -> io::Result<()> {
        dump.array("RPLANE", &self.r)?;
        dump.array("GPLANE", &self.g)?;
        dump.array("BPLANE", &self.b)
    }
}
