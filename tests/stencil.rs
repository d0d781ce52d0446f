extern crate itertools;
extern crate polykernels;

use itertools::iproduct;

use polykernels::deriche::{self, Coefficients};
use polykernels::suite::execute;
use polykernels::{fdtd_2d, jacobi_1d, jacobi_2d};
use polykernels::{Execution, Matrix};

#[test]
fn test_jacobi_1d_one_step() {
    let mut a = vec![1., 2., 4.];
    let mut b = vec![0.; 3];
    jacobi_1d::kernel_jacobi_1d(1, &mut a, &mut b);
    let b1 = jacobi_1d::WEIGHT * (1. + 2. + 4.);
    assert_eq!(b, vec![0., b1, 0.]);
    assert_eq!(a, vec![1., jacobi_1d::WEIGHT * (0. + b1 + 0.), 4.]);
}

#[test]
fn test_jacobi_1d_boundaries_fixed() {
    let size = jacobi_1d::Size { tsteps: 10, n: 25 };
    let init = jacobi_1d::Jacobi1d::init(size);
    let (data, _) = execute::<jacobi_1d::Jacobi1d>(size, Execution::Sequential).unwrap();
    assert_eq!(data.a[0], init.a[0]);
    assert_eq!(data.a[24], init.a[24]);
    assert_eq!(data.b[0], init.b[0]);
    assert_eq!(data.b[24], init.b[24]);
    assert!(data.a != init.a);
}

#[test]
fn test_jacobi_1d_zero_steps() {
    let mut a = vec![3.; 5];
    let mut b = vec![7.; 5];
    jacobi_1d::kernel_jacobi_1d(0, &mut a, &mut b);
    assert_eq!(a, vec![3.; 5]);
    assert_eq!(b, vec![7.; 5]);
}

#[test]
fn test_jacobi_2d_borders_fixed() {
    let size = jacobi_2d::Size { tsteps: 4, n: 9 };
    let init = jacobi_2d::Jacobi2d::init(size);
    for &exec in &[Execution::Sequential, Execution::Parallel] {
        let (data, _) = execute::<jacobi_2d::Jacobi2d>(size, exec).unwrap();
        for (i, j) in iproduct!(0..9, 0..9) {
            if i == 0 || j == 0 || i == 8 || j == 8 {
                assert_eq!(data.a[(i, j)], init.a[(i, j)], "({}, {})", i, j);
                assert_eq!(data.b[(i, j)], init.b[(i, j)], "({}, {})", i, j);
            }
        }
    }
}

#[test]
fn test_jacobi_2d_constant_field() {
    // a constant interior surrounded by the same constant stays constant
    let n = 6;
    let mut a = Matrix::from_fn(n, n, |_, _| 5.);
    let mut b = Matrix::from_fn(n, n, |_, _| 5.);
    jacobi_2d::kernel_jacobi_2d(Execution::Sequential, 3, &mut a, &mut b);
    // 0.2 * 25 rounds to exactly 5
    assert!(a.as_slice().iter().all(|&x| x == 5.));
    assert!(b.as_slice().iter().all(|&x| x == 5.));
}

#[test]
fn test_jacobi_2d_parallel_is_bit_identical() {
    let size = jacobi_2d::Size { tsteps: 6, n: 37 };
    let (seq, _) = execute::<jacobi_2d::Jacobi2d>(size, Execution::Sequential).unwrap();
    let (par, _) = execute::<jacobi_2d::Jacobi2d>(size, Execution::Parallel).unwrap();
    assert_eq!(seq.a, par.a);
    assert_eq!(seq.b, par.b);
}

#[test]
fn test_fdtd_source_row_and_fixed_edges() {
    let size = fdtd_2d::Size { tmax: 7, nx: 8, ny: 10 };
    let init = fdtd_2d::Fdtd2d::init(size);
    let (data, _) = execute::<fdtd_2d::Fdtd2d>(size, Execution::Sequential).unwrap();
    assert!(data.ey.row(0).iter().all(|&x| x == 6.));
    for i in 0..8 {
        // column 0 of ex is never updated
        assert_eq!(data.ex[(i, 0)], init.ex[(i, 0)]);
        // nor the last column of hz
        assert_eq!(data.hz[(i, 9)], init.hz[(i, 9)]);
    }
    assert_eq!(data.hz.row(7), init.hz.row(7));
}

#[test]
fn test_fdtd_single_step() {
    let mut ex = Matrix::from_vec(2, 2, vec![1., 2., 3., 4.]);
    let mut ey = Matrix::from_vec(2, 2, vec![0., 0., 5., 6.]);
    let mut hz = Matrix::from_vec(2, 2, vec![1., 3., 7., 8.]);
    fdtd_2d::kernel_fdtd_2d(&mut ex, &mut ey, &mut hz, &[9.]);
    // ey: row 0 from the source, row 1 from hz rows
    assert_eq!(ey.as_slice(), &[9., 9., 5. - 0.5 * 6., 6. - 0.5 * 5.]);
    assert_eq!(ex.as_slice(), &[1., 2. - 0.5 * 2., 3., 4. - 0.5 * 1.]);
    let hz00 = 1. - 0.7 * (ex[(0, 1)] - ex[(0, 0)] + ey[(1, 0)] - ey[(0, 0)]);
    assert_eq!(hz.as_slice(), &[hz00, 3., 7., 8.]);
}

#[test]
fn test_fdtd_no_steps() {
    let size = fdtd_2d::Size { tmax: 0, nx: 4, ny: 5 };
    let init = fdtd_2d::Fdtd2d::init(size);
    let (data, _) = execute::<fdtd_2d::Fdtd2d>(size, Execution::Sequential).unwrap();
    assert_eq!(data.ex, init.ex);
    assert_eq!(data.ey, init.ey);
    assert_eq!(data.hz, init.hz);
}

fn run_deriche(exec: Execution, img: &Matrix<f32>) -> Matrix<f32> {
    let (w, h) = img.shape();
    let mut out = Matrix::zeros(w, h);
    let mut y1 = Matrix::zeros(w, h);
    let mut y2 = Matrix::zeros(w, h);
    deriche::kernel_deriche(exec, deriche::ALPHA, img, &mut out, &mut y1, &mut y2);
    out
}

#[test]
fn test_deriche_single_pixel() {
    let k = Coefficients::new(deriche::ALPHA).k;
    for &x in &[1.0f32, 0.5, -3.0] {
        let out = run_deriche(Execution::Sequential, &Matrix::from_vec(1, 1, vec![x]));
        assert_eq!(out[(0, 0)], k * (k * x));
    }
}

#[test]
fn test_deriche_zero_image() {
    let out = run_deriche(Execution::Sequential, &Matrix::zeros(5, 7));
    assert!(out.as_slice().iter().all(|&x| x == 0.));
}

#[test]
fn test_deriche_is_linear() {
    let data = deriche::Deriche::init(deriche::Size { w: 12, h: 9 });
    let doubled = Matrix::from_fn(12, 9, |i, j| 2. * data.img_in[(i, j)]);
    let once = run_deriche(Execution::Sequential, &data.img_in);
    let twice = run_deriche(Execution::Sequential, &doubled);
    for (&a, &b) in once.as_slice().iter().zip(twice.as_slice()) {
        assert_eq!(2. * a, b);
    }
}

#[test]
fn test_deriche_parallel_is_bit_identical() {
    let data = deriche::Deriche::init(deriche::Size { w: 31, h: 17 });
    let seq = run_deriche(Execution::Sequential, &data.img_in);
    let par = run_deriche(Execution::Parallel, &data.img_in);
    assert_eq!(seq, par);
    assert!(seq.as_slice().iter().all(|x| x.is_finite()));
}
