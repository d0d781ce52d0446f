// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `fourierf`: iterative radix-2 FFT with normalization
//!
//! Bit-reversal ordering, then `log2(m)` butterfly stages whose twiddle
//! factors come from a three term trigonometric recurrence, then every
//! output divided by `m`. The result is
//! *out\[j\] = (1/m) Σₖ in\[k\] e^(-2πi jk/m)*.

use std::f64::consts::PI;
use std::io::{self, Write};

use crate::crand::CRand;
use crate::dataset::Dataset;
use crate::dump::Dump;
use crate::error::KernelError;
use crate::suite::Benchmark;
use crate::threading::Execution;

/// Seed of the input synthesis
pub const SEED: u32 = 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Size {
    /// Transform length, a power of two
    pub m: usize,
    /// Number of synthesized waves
    pub w: usize,
}

impl Size {
    pub fn from_dataset(dataset: Dataset) -> Self {
        let [m, w] = dataset.pick([
            [8, 32],
            [64, 128],
            [512, 256],
            [2048, 512],
            [16384, 1024],
        ]);
        Size { m, w }
    }
}

pub struct Fourierf {
    pub size: Size,
    pub real_in: Vec<f64>,
    pub imag_in: Vec<f64>,
    pub real_out: Vec<f64>,
    pub imag_out: Vec<f64>,
    pub coeff: Vec<f64>,
    pub amp: Vec<f64>,
}

impl Fourierf {
    /// Sum of `w` random waves per sample, from the C `rand()` stream.
    ///
    /// Draws `w` coefficient and amplitude pairs, then for every sample and
    /// every wave picks cosine or sine by the parity of the next draw.
    pub fn init(size: Size) -> Self {
        let Size { m, w } = size;
        let mut rng = CRand::new(SEED);
        let mut coeff = Vec::with_capacity(w);
        let mut amp = Vec::with_capacity(w);
        for _ in 0..w {
            coeff.push((rng.next_u32() % 1000) as f64);
            amp.push((rng.next_u32() % 1000) as f64);
        }
        let mut real_in = vec![0.; m];
        for (i, elt) in real_in.iter_mut().enumerate() {
            for (&c, &a) in coeff.iter().zip(&amp) {
                if rng.next_u32() % 2 != 0 {
                    *elt += c * (a * i as f64).cos();
                } else {
                    *elt += c * (a * i as f64).sin();
                }
            }
        }
        Fourierf {
            size,
            real_in,
            imag_in: vec![0.; m],
            real_out: vec![0.; m],
            imag_out: vec![0.; m],
            coeff,
            amp,
        }
    }
}

/// Reverse the low `bits` bits of `index`
#[inline]
fn reverse_bits(mut index: usize, bits: u32) -> usize {
    let mut rev = 0;
    for _ in 0..bits {
        rev = (rev << 1) | (index & 1);
        index >>= 1;
    }
    rev
}

/// Transform `(real_in, imag_in)` into `(real_out, imag_out)`.
///
/// ***Errors*** with `NotPowerOfTwo` unless the length is a power of two.
pub fn kernel_fourierf(real_in: &[f64], imag_in: &[f64],
                       real_out: &mut [f64], imag_out: &mut [f64]) -> Result<(), KernelError>
{
    let m = real_in.len();
    assert_eq!(imag_in.len(), m);
    assert_eq!(real_out.len(), m);
    assert_eq!(imag_out.len(), m);
    if !m.is_power_of_two() {
        return Err(KernelError::NotPowerOfTwo { len: m });
    }
    let bits = m.trailing_zeros();
    for i in 0..m {
        let j = reverse_bits(i, bits);
        real_out[j] = real_in[i];
        imag_out[j] = imag_in[i];
    }

    let angle_numerator = -2.0 * PI;
    let mut block_end = 1;
    let mut block_size = 2;
    while block_size <= m {
        let delta_angle = angle_numerator / block_size as f64;
        let sm2 = (-2. * delta_angle).sin();
        let sm1 = (-delta_angle).sin();
        let cm2 = (-2. * delta_angle).cos();
        let cm1 = (-delta_angle).cos();
        let w = 2. * cm1;
        for i in (0..m).step_by(block_size) {
            let (mut ar1, mut ar2) = (cm1, cm2);
            let (mut ai1, mut ai2) = (sm1, sm2);
            for j in i..i + block_end {
                let ar0 = w * ar1 - ar2;
                ar2 = ar1;
                ar1 = ar0;
                let ai0 = w * ai1 - ai2;
                ai2 = ai1;
                ai1 = ai0;

                let k = j + block_end;
                let tr = ar0 * real_out[k] - ai0 * imag_out[k];
                let ti = ar0 * imag_out[k] + ai0 * real_out[k];
                real_out[k] = real_out[j] - tr;
                imag_out[k] = imag_out[j] - ti;
                real_out[j] += tr;
                imag_out[j] += ti;
            }
        }
        block_end = block_size;
        block_size <<= 1;
    }

    let denom = m as f64;
    for (re, im) in real_out.iter_mut().zip(imag_out.iter_mut()) {
        *re /= denom;
        *im /= denom;
    }
    Ok(())
}

impl Benchmark for Fourierf {
    const NAME: &'static str = "fourierf";
    type Size = Size;

    fn size(dataset: Dataset) -> Size { Size::from_dataset(dataset) }

    fn init(size: Size) -> Self { Fourierf::init(size) }

    fn run(&mut self, _exec: Execution) -> Result<(), KernelError> {
        kernel_fourierf(&self.real_in, &self.imag_in, &mut self.real_out, &mut self.imag_out)
    }

    fn dump<W: Write>(&self, dump: &mut Dump<W>) -> io::Result<()> {
        dump.array("RealOut", &self.real_out)?;
        dump.array("ImagOut", &self.imag_out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_reversal() {
        assert_eq!(reverse_bits(1, 3), 4);
        assert_eq!(reverse_bits(6, 3), 3);
        assert_eq!(reverse_bits(5, 0), 0);
    }
}
