extern crate approx;
extern crate itertools;
extern crate polykernels;

use approx::assert_relative_eq;
use itertools::iproduct;

use polykernels::remap::{self, kernel_remap, Interpolation, Remap};
use polykernels::suite::execute;
use polykernels::{Cube, Execution, Matrix};

fn run(ops: &Interpolation, x: &Cube<f64>) -> (Cube<f64>, Vec<Cube<f64>>) {
    let lx = x.dim()[0];
    let zeros = || Cube::zeros(lx, lx, lx);
    let mut y = zeros();
    let mut yone = [zeros(), zeros()];
    let mut ytwo = [zeros(), zeros(), zeros(), zeros()];
    let mut y1 = [(); remap::Y1_LEN].map(|_| zeros());
    kernel_remap(ops, x, &mut y, &mut yone, &mut ytwo, &mut y1);
    (y, y1.to_vec())
}

fn operators(lx: usize) -> Interpolation {
    let m = |s: f64| Matrix::from_fn(lx, lx, |i, j| ((i * 7 + j * 3) % 11) as f64 * s - 0.4);
    Interpolation { ixmc1: m(0.1), ixmc2: m(-0.07), ixtmc1: m(0.05), ixtmc2: m(0.13) }
}

/// The eight children written out as triple sums
fn reference(ops: &Interpolation, x: &Cube<f64>) -> Vec<Cube<f64>> {
    let lx = x.dim()[0];
    let first = [&ops.ixmc1, &ops.ixmc2];
    let second = [&ops.ixtmc1, &ops.ixtmc2];
    // (first, middle, last) operator choice per child: y, then y1[0..7]
    let choice = [
        (0, 0, 0), (1, 0, 0), (0, 1, 0), (1, 1, 0),
        (0, 0, 1), (1, 0, 1), (0, 1, 1), (1, 1, 1),
    ];
    choice.iter().map(|&(a, b, c)| {
        Cube::from_fn(lx, lx, lx, |jj, iz, ii| {
            let mut sum = 0.;
            for (k2, k1, k0) in iproduct!(0..lx, 0..lx, 0..lx) {
                sum += second[c][(jj, k2)] * second[b][(iz, k1)]
                    * first[a][(k0, ii)] * x[(k2, k1, k0)];
            }
            sum
        })
    }).collect()
}

#[test]
fn test_remap_matches_triple_sums() {
    for &lx in &[1, 3, 5] {
        let ops = operators(lx);
        let x = Cube::from_fn(lx, lx, lx, |i, j, k| ((i + 2 * j + 3 * k) as f64).sin());
        let (y, y1) = run(&ops, &x);
        let want = reference(&ops, &x);
        for (got, want) in Some(&y).into_iter().chain(&y1).zip(&want) {
            for (&g, &w) in got.as_slice().iter().zip(want.as_slice()) {
                assert_relative_eq!(g, w, max_relative = 1e-10, epsilon = 1e-12);
            }
        }
    }
}

#[test]
fn test_remap_zero_second_fine_operator() {
    let lx = 4;
    let mut ops = operators(lx);
    ops.ixtmc2 = Matrix::zeros(lx, lx);
    let x = Cube::from_fn(lx, lx, lx, |i, j, k| 1. + (i * j + k) as f64);
    let (y, y1) = run(&ops, &x);
    assert!(y.as_slice().iter().any(|&v| v != 0.));
    assert!(y1[0].as_slice().iter().any(|&v| v != 0.));
    for c in &y1[1..] {
        assert!(c.as_slice().iter().all(|&v| v == 0.));
    }
}

#[test]
fn test_remap_zero_second_coarse_operator() {
    let lx = 4;
    let mut ops = operators(lx);
    ops.ixmc2 = Matrix::zeros(lx, lx);
    let x = Cube::from_fn(lx, lx, lx, |i, j, k| 1. + (i + j * k) as f64);
    let (_, y1) = run(&ops, &x);
    for &n in &[0, 2, 4, 6] {
        assert!(y1[n].as_slice().iter().all(|&v| v == 0.), "y1[{}]", n);
    }
    for &n in &[1, 3, 5] {
        assert!(y1[n].as_slice().iter().any(|&v| v != 0.), "y1[{}]", n);
    }
}

#[test]
fn test_remap_identity_operators() {
    let lx = 3;
    let eye = Matrix::from_fn(lx, lx, |i, j| if i == j { 1. } else { 0. });
    let ops = Interpolation { ixmc1: eye.clone(), ixmc2: eye.clone(), ixtmc1: eye.clone(), ixtmc2: eye };
    let x = Cube::from_fn(lx, lx, lx, |i, j, k| (9 * i + 3 * j + k) as f64);
    let (y, y1) = run(&ops, &x);
    assert_eq!(y, x);
    for c in &y1 {
        assert_eq!(c, &x);
    }
}

#[test]
fn test_remap_synthetic_operators() {
    let ops = Interpolation::new(8);
    assert_eq!(ops.ixtmc1[(0, 0)], 1.);
    assert_eq!(ops.ixtmc1[(7, 4)], 1.);
    assert_eq!(ops.ixtmc1[(3, 1)], 0.8840317166357952);
    assert_eq!(ops.ixtmc1[(2, 4)], -3.198728299067715e-02);
    for (i, j) in iproduct!(0..8, 0..8) {
        assert_eq!(ops.ixtmc2[(i, j)], ops.ixtmc1[(7 - i, 7 - j)]);
        assert_eq!(ops.ixmc1[(i, j)], ops.ixtmc1[(j, i)]);
        assert_eq!(ops.ixmc2[(i, j)], ops.ixtmc2[(j, i)]);
    }
}

#[test]
fn test_remap_benchmark_runs() {
    let (data, _) = execute::<Remap>(remap::Size { lx: 4 }, Execution::Sequential).unwrap();
    assert!(data.y.as_slice().iter().all(|v| v.is_finite()));
    assert!(data.y1.iter().all(|c| c.dim() == [4, 4, 4]));
}
