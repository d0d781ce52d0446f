// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Fixed shape row-major buffers.
//!
//! Shapes are set at construction and never change afterwards; the
//! kernels only read and write elements in place.

use std::ops::{Index, IndexMut};

use crate::element::Element;

/// Row-major `rows` by `cols` matrix
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Element> Matrix<T> {
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix { rows, cols, data: vec![T::zero(); rows * cols] }
    }

    /// Build a matrix from a function of the index *i, j*
    pub fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
        where F: FnMut(usize, usize) -> T
    {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Matrix { rows, cols, data }
    }

    /// Wrap a row-major buffer; panics if the length does not match.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Self {
        assert_eq!(data.len(), rows * cols,
                   "buffer of {} elements for a {}x{} matrix", data.len(), rows, cols);
        Matrix { rows, cols, data }
    }

    pub fn fill(&mut self, value: T) {
        for elt in &mut self.data {
            *elt = value;
        }
    }
}

impl<T> Matrix<T> {
    #[inline]
    pub fn rows(&self) -> usize { self.rows }
    #[inline]
    pub fn cols(&self) -> usize { self.cols }
    #[inline]
    pub fn shape(&self) -> (usize, usize) { (self.rows, self.cols) }

    #[inline]
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Swap columns `from..` of rows `a` and `b`
    pub fn swap_rows_from(&mut self, a: usize, b: usize, from: usize) {
        if a == b {
            return;
        }
        for j in from..self.cols {
            self.data.swap(a * self.cols + j, b * self.cols + j);
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] { &self.data }
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] { &mut self.data }
    pub fn into_vec(self) -> Vec<T> { self.data }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;
    #[inline(always)]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        debug_assert!(i < self.rows && j < self.cols);
        &self.data[i * self.cols + j]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    #[inline(always)]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        debug_assert!(i < self.rows && j < self.cols);
        &mut self.data[i * self.cols + j]
    }
}

/// Row-major `n0` by `n1` by `n2` array
#[derive(Clone, Debug, PartialEq)]
pub struct Cube<T> {
    dim: [usize; 3],
    data: Vec<T>,
}

impl<T: Element> Cube<T> {
    pub fn zeros(n0: usize, n1: usize, n2: usize) -> Self {
        Cube { dim: [n0, n1, n2], data: vec![T::zero(); n0 * n1 * n2] }
    }

    /// Build a cube from a function of the index *i, j, k*
    pub fn from_fn<F>(n0: usize, n1: usize, n2: usize, mut f: F) -> Self
        where F: FnMut(usize, usize, usize) -> T
    {
        let mut data = Vec::with_capacity(n0 * n1 * n2);
        for i in 0..n0 {
            for j in 0..n1 {
                for k in 0..n2 {
                    data.push(f(i, j, k));
                }
            }
        }
        Cube { dim: [n0, n1, n2], data }
    }
}

impl<T> Cube<T> {
    #[inline]
    pub fn dim(&self) -> [usize; 3] { self.dim }
    #[inline]
    pub fn as_slice(&self) -> &[T] { &self.data }
}

impl<T> Index<(usize, usize, usize)> for Cube<T> {
    type Output = T;
    #[inline(always)]
    fn index(&self, (i, j, k): (usize, usize, usize)) -> &T {
        let [_, n1, n2] = self.dim;
        debug_assert!(i < self.dim[0] && j < n1 && k < n2);
        &self.data[(i * n1 + j) * n2 + k]
    }
}

impl<T> IndexMut<(usize, usize, usize)> for Cube<T> {
    #[inline(always)]
    fn index_mut(&mut self, (i, j, k): (usize, usize, usize)) -> &mut T {
        let [_, n1, n2] = self.dim;
        debug_assert!(i < self.dim[0] && j < n1 && k < n2);
        &mut self.data[(i * n1 + j) * n2 + k]
    }
}
