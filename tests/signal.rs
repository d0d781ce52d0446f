extern crate approx;
extern crate itertools;
extern crate polykernels;

use std::f64::consts::PI;

use approx::assert_abs_diff_eq;
use itertools::{iproduct, Itertools};

use polykernels::suite::execute;
use polykernels::{colormap, cp50, fourierf, tblshft};
use polykernels::{Execution, KernelError};

const EXECS: [Execution; 2] = [Execution::Sequential, Execution::Parallel];

fn transform(real: &[f64], imag: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let mut re = vec![0.; real.len()];
    let mut im = vec![0.; real.len()];
    fourierf::kernel_fourierf(real, imag, &mut re, &mut im).unwrap();
    (re, im)
}

/// Direct evaluation of (1/m) sum x[k] e^(-2 pi i jk/m)
fn naive_dft(real: &[f64], imag: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let m = real.len();
    (0..m).map(|j| {
        let (mut re, mut im) = (0., 0.);
        for k in 0..m {
            let theta = -2. * PI * (j * k % m) as f64 / m as f64;
            let (s, c) = theta.sin_cos();
            re += real[k] * c - imag[k] * s;
            im += real[k] * s + imag[k] * c;
        }
        (re / m as f64, im / m as f64)
    }).unzip()
}

#[test]
fn test_fourierf_impulse() {
    for &m in &[1, 2, 8, 64] {
        let mut real = vec![0.; m];
        real[0] = 1.;
        let (re, im) = transform(&real, &vec![0.; m]);
        for j in 0..m {
            assert_abs_diff_eq!(re[j], 1. / m as f64, epsilon = 1e-15);
            assert_abs_diff_eq!(im[j], 0., epsilon = 1e-15);
        }
    }
}

#[test]
fn test_fourierf_constant() {
    let m = 16;
    let (re, im) = transform(&vec![3.; m], &vec![0.; m]);
    assert_abs_diff_eq!(re[0], 3., epsilon = 1e-12);
    for j in 1..m {
        assert_abs_diff_eq!(re[j], 0., epsilon = 1e-12);
    }
    for j in 0..m {
        assert_abs_diff_eq!(im[j], 0., epsilon = 1e-12);
    }
}

#[test]
fn test_fourierf_single_frequency_sign() {
    // e^(+2 pi i n/m) lands in bin 1 with this sign convention
    let m = 8;
    let real = (0..m).map(|n| (2. * PI * n as f64 / m as f64).cos()).collect_vec();
    let imag = (0..m).map(|n| (2. * PI * n as f64 / m as f64).sin()).collect_vec();
    let (re, im) = transform(&real, &imag);
    for j in 0..m {
        let want = if j == 1 { 1. } else { 0. };
        assert_abs_diff_eq!(re[j], want, epsilon = 1e-12);
        assert_abs_diff_eq!(im[j], 0., epsilon = 1e-12);
    }
}

#[test]
fn test_fourierf_matches_direct_sum() {
    let data = fourierf::Fourierf::init(fourierf::Size { m: 32, w: 6 });
    let imag = (0..32).map(|i| (i % 5) as f64 - 2.).collect_vec();
    let (re, im) = transform(&data.real_in, &imag);
    let (want_re, want_im) = naive_dft(&data.real_in, &imag);
    let scale = data.real_in.iter().map(|x| x.abs()).fold(1., f64::max);
    for j in 0..32 {
        assert_abs_diff_eq!(re[j], want_re[j], epsilon = 1e-10 * scale);
        assert_abs_diff_eq!(im[j], want_im[j], epsilon = 1e-10 * scale);
    }
}

#[test]
fn test_fourierf_input_synthesis() {
    let data = fourierf::Fourierf::init(fourierf::Size { m: 8, w: 3 });
    // the first C rand() draws for seed 1, modulo 1000
    assert_eq!(data.coeff, vec![383., 777., 793.]);
    assert_eq!(data.amp, vec![886., 915., 335.]);
    assert!(data.imag_in.iter().all(|&x| x == 0.));
    assert!(data.real_in.iter().all(|x| x.is_finite()));
}

#[test]
fn test_fourierf_not_power_of_two() {
    let mut re = vec![0.; 6];
    let mut im = vec![0.; 6];
    let err = fourierf::kernel_fourierf(&[1.; 6], &[0.; 6], &mut re, &mut im);
    assert_eq!(err, Err(KernelError::NotPowerOfTwo { len: 6 }));
    let err = fourierf::kernel_fourierf(&[], &[], &mut [], &mut []);
    assert_eq!(err, Err(KernelError::NotPowerOfTwo { len: 0 }));
}

#[test]
fn test_tblshft_table_shape() {
    let tlf = tblshft::build_table(2049);
    assert_eq!(tlf.len(), 2049);
    assert_eq!(tlf[0], 0.);
    assert_eq!(tlf[2047], tlf[2048]);
    for (a, b) in tlf.iter().tuple_windows() {
        assert!(a <= b, "{} > {}", a, b);
    }
    assert_abs_diff_eq!(tlf[tblshft::ONE], 1., epsilon = 1e-12);
}

#[test]
fn test_tblshft_positions() {
    let size = tblshft::Size { f8sz: 256, f14sz: 4096, tsz: 2049 };
    for &exec in &EXECS {
        let (data, _) = execute::<tblshft::Tblshft>(size, exec).unwrap();
        for out in [&data.f8, &data.f14] {
            assert_eq!(out[0], 0.);
            let last = *out.last().unwrap();
            assert!(last == 1249. || last == 1250., "last position {}", last);
            for (a, b) in out.iter().tuple_windows() {
                assert!(a <= b);
            }
        }
    }
}

#[test]
fn test_tblshft_table_exhausted() {
    let tlf = tblshft::build_table(3);
    let mut f8 = vec![0.; 2];
    let mut f14 = vec![0.; 2];
    let err = tblshft::kernel_tblshft(Execution::Sequential, &mut f8, &mut f14, &tlf);
    assert_eq!(err, Err(KernelError::TableExhausted { index: 1, len: 3 }));
}

#[test]
fn test_colormap_ramp() {
    for &exec in &EXECS {
        let (data, _) = execute::<colormap::Colormap>(colormap::Size { n: 1000 }, exec).unwrap();
        for plane in [&data.r, &data.g, &data.b] {
            assert_eq!(plane[0], 0.);
            assert_eq!(plane[999], 65535.);
            // (500 * 65535) / 999 truncated
            assert_eq!(plane[500], 32800.);
            assert!(plane.iter().all(|x| x.fract() == 0.));
        }
        assert_eq!(data.r, data.g);
        assert_eq!(data.g, data.b);
    }
}

#[test]
fn test_colormap_too_short() {
    for n in 0..2 {
        let (mut r, mut g, mut b) = (vec![0.; n], vec![0.; n], vec![0.; n]);
        let err = colormap::kernel_colormap(Execution::Sequential, &mut r, &mut g, &mut b);
        assert!(matches!(err, Err(KernelError::InvalidSize { kernel: "colormap", .. })));
    }
}

#[test]
fn test_colormap_scale() {
    let size = colormap::Size { n: 64 };
    for &exec in &EXECS {
        let mut data = colormap::Colormap::init_scaled(size);
        let before = (data.r.clone(), data.g.clone(), data.b.clone());
        colormap::kernel_colormap_scale(exec, &mut data.r, &mut data.g, &mut data.b);
        for i in 0..64 {
            assert_eq!(data.r[i], before.0[i] * 65535. / 255.);
            assert_eq!(data.g[i], before.1[i] * 65535. / 255.);
            assert_eq!(data.b[i], before.2[i] * 65535. / 255.);
        }
    }
    let data = colormap::Colormap::init_scaled(size);
    // (3*3+1) % 64 / 320
    assert_eq!(data.r[3], 10. / 320.);
}

#[test]
fn test_cp50_planes() {
    let size = cp50::Size { x: 5, y: 8, fc: 2, fl: 3, ll: 6 };
    assert_eq!(size.line_size(), 19);
    assert_eq!(size.lines(), 4);
    for &exec in &EXECS {
        let (data, _) = execute::<cp50::Cp50>(size, exec).unwrap();
        for (l, i) in iproduct!(0..4, 0..5) {
            let line = (size.fl + l) as f64;
            let col = (3 * i + size.fc) as f64;
            assert_eq!(data.r[l * 5 + i], line * col + 1.);
            assert_eq!(data.g[l * 5 + i], line * (col + 1.) + 1.);
            assert_eq!(data.b[l * 5 + i], line * (col + 2.) + 1.);
        }
    }
}

#[test]
fn test_cp50_no_lines() {
    let size = cp50::Size { x: 4, y: 4, fc: 1, fl: 5, ll: 2 };
    assert_eq!(size.lines(), 0);
    let (data, _) = execute::<cp50::Cp50>(size, Execution::Parallel).unwrap();
    assert!(data.r.is_empty());
}

#[test]
fn test_cp50_dataset_sizes() {
    let size = cp50::Size::from_dataset(polykernels::Dataset::Mini);
    let data = cp50::Cp50::init(size);
    assert_eq!(data.out.rows(), size.ll + 1);
    assert_eq!(data.r.len(), size.lines() * size.x);
}

#[test]
fn test_cp50_zero_width() {
    let size = cp50::Size { x: 0, y: 4, fc: 3, fl: 1, ll: 3 };
    for &exec in &EXECS {
        let (data, _) = execute::<cp50::Cp50>(size, exec).unwrap();
        assert!(data.r.is_empty() && data.g.is_empty() && data.b.is_empty());
    }
}
