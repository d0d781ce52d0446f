// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `deriche`: recursive Deriche edge detector, single precision
//!
//! Forward and backward second order IIR recursions along every row, summed,
//! then the same along every column of the result. All arithmetic is `f32`.

use std::io::{self, Write};

use crate::dataset::Dataset;
use crate::dump::Dump;
use crate::error::KernelError;
use crate::matrix::Matrix;
use crate::suite::Benchmark;
use crate::threading::{for_each_range, for_each_row, Execution, SyncPtr};

pub const ALPHA: f32 = 0.25;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Size {
    pub w: usize,
    pub h: usize,
}

impl Size {
    pub fn from_dataset(dataset: Dataset) -> Self {
        let [w, h] = dataset.pick([
            [64, 64],
            [192, 128],
            [720, 480],
            [4096, 2160],
            [7680, 4320],
        ]);
        Size { w, h }
    }
}

/// Filter coefficients for a smoothing parameter alpha
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Coefficients {
    pub k: f32,
    pub a1: f32,
    pub a2: f32,
    pub a3: f32,
    pub a4: f32,
    pub a5: f32,
    pub a6: f32,
    pub a7: f32,
    pub a8: f32,
    pub b1: f32,
    pub b2: f32,
    pub c1: f32,
    pub c2: f32,
}

impl Coefficients {
    pub fn new(alpha: f32) -> Self {
        let e = (-alpha).exp();
        let k = (1.0 - e) * (1.0 - e) / (1.0 + 2.0 * alpha * e - (2.0 * alpha).exp());
        let a1 = k;
        let a2 = k * e * (alpha - 1.0);
        let a3 = k * e * (alpha + 1.0);
        let a4 = -k * (-2.0 * alpha).exp();
        Coefficients {
            k,
            a1, a2, a3, a4,
            a5: a1, a6: a2, a7: a3, a8: a4,
            b1: 2.0f32.powf(-alpha),
            b2: -(-2.0 * alpha).exp(),
            c1: 1.0,
            c2: 1.0,
        }
    }
}

pub struct Deriche {
    pub size: Size,
    pub alpha: f32,
    /// w x h
    pub img_in: Matrix<f32>,
    pub img_out: Matrix<f32>,
    pub y1: Matrix<f32>,
    pub y2: Matrix<f32>,
}

impl Deriche {
    pub fn init(size: Size) -> Self {
        let Size { w, h } = size;
        Deriche {
            size,
            alpha: ALPHA,
            img_in: Matrix::from_fn(w, h, |i, j| ((313 * i + 991 * j) % 65536) as f32 / 65535.0),
            img_out: Matrix::zeros(w, h),
            y1: Matrix::zeros(w, h),
            y2: Matrix::zeros(w, h),
        }
    }
}

/// Run the six passes of the filter, `y1` and `y2` are scratch.
///
/// Recursion state restarts at zero for every row and column. Parallel
/// mode splits the row passes by row and the column passes by column.
pub fn kernel_deriche(exec: Execution, alpha: f32, img_in: &Matrix<f32>, img_out: &mut Matrix<f32>,
                      y1: &mut Matrix<f32>, y2: &mut Matrix<f32>)
{
    let (w, h) = img_in.shape();
    assert_eq!(img_out.shape(), (w, h));
    assert_eq!(y1.shape(), (w, h));
    assert_eq!(y2.shape(), (w, h));
    if w == 0 || h == 0 {
        return;
    }
    let c = Coefficients::new(alpha);

    for_each_row(exec, y1.as_mut_slice(), h, |i, y1_row| {
        let (mut xm1, mut ym1, mut ym2) = (0.0f32, 0.0f32, 0.0f32);
        for (y, &x) in y1_row.iter_mut().zip(img_in.row(i)) {
            *y = c.a1 * x + c.a2 * xm1 + c.b1 * ym1 + c.b2 * ym2;
            xm1 = x;
            ym2 = ym1;
            ym1 = *y;
        }
    });
    for_each_row(exec, y2.as_mut_slice(), h, |i, y2_row| {
        let (mut xp1, mut xp2, mut yp1, mut yp2) = (0.0f32, 0.0f32, 0.0f32, 0.0f32);
        for (y, &x) in y2_row.iter_mut().zip(img_in.row(i)).rev() {
            *y = c.a3 * xp1 + c.a4 * xp2 + c.b1 * yp1 + c.b2 * yp2;
            xp2 = xp1;
            xp1 = x;
            yp2 = yp1;
            yp1 = *y;
        }
    });
    combine(exec, c.c1, y1, y2, img_out);

    let out: &Matrix<f32> = img_out;
    let y1_ptr = SyncPtr::new(y1.as_mut_slice());
    for_each_range(exec, h, |start, end| {
        for j in start..end {
            let (mut tm1, mut ym1, mut ym2) = (0.0f32, 0.0f32, 0.0f32);
            for i in 0..w {
                let y = c.a5 * out[(i, j)] + c.a6 * tm1 + c.b1 * ym1 + c.b2 * ym2;
                // column j belongs to this range only
                unsafe { *y1_ptr.stride_offset(1, i * h + j) = y; }
                tm1 = out[(i, j)];
                ym2 = ym1;
                ym1 = y;
            }
        }
    });
    let y2_ptr = SyncPtr::new(y2.as_mut_slice());
    for_each_range(exec, h, |start, end| {
        for j in start..end {
            let (mut tp1, mut tp2, mut yp1, mut yp2) = (0.0f32, 0.0f32, 0.0f32, 0.0f32);
            for i in (0..w).rev() {
                let y = c.a7 * tp1 + c.a8 * tp2 + c.b1 * yp1 + c.b2 * yp2;
                unsafe { *y2_ptr.stride_offset(1, i * h + j) = y; }
                tp2 = tp1;
                tp1 = out[(i, j)];
                yp2 = yp1;
                yp1 = y;
            }
        }
    });
    combine(exec, c.c2, y1, y2, img_out);
}

/// out = c (y1 + y2)
fn combine(exec: Execution, c: f32, y1: &Matrix<f32>, y2: &Matrix<f32>, out: &mut Matrix<f32>) {
    let h = out.cols();
    for_each_row(exec, out.as_mut_slice(), h, |i, out_row| {
        for ((o, &a), &b) in out_row.iter_mut().zip(y1.row(i)).zip(y2.row(i)) {
            *o = c * (a + b);
        }
    });
}

impl Benchmark for Deriche {
    const NAME: &'static str = "deriche";
    type Size = Size;

    fn size(dataset: Dataset) -> Size { Size::from_dataset(dataset) }

    fn init(size: Size) -> Self { Deriche::init(size) }

    fn run(&mut self, exec: Execution) -> Result<(), KernelError> {
        kernel_deriche(exec, self.alpha, &self.img_in, &mut self.img_out,
                       &mut self.y1, &mut self.y2);
        Ok(())
    }

    fn dump<W: Write>(&self, dump: &mut Dump<W>) -> io::Result<()> {
        dump.array("imgOut", self.img_out.as_slice())
    }
}
