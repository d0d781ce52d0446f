// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;

/// Element type of the kernel buffers.
///
/// The kernels pick one precision each (`f64` everywhere except `deriche`,
/// which is `f32`); this trait only covers what the shared buffer and dump
/// code needs.
pub trait Element : Copy + Send + Sync + PartialEq + fmt::Debug + 'static {
    fn zero() -> Self;
    fn to_f64(self) -> f64;
}

impl Element for f32 {
    fn zero() -> Self { 0. }
    fn to_f64(self) -> f64 { self as f64 }
}

impl Element for f64 {
    fn zero() -> Self { 0. }
    fn to_f64(self) -> f64 { self }
}

/// Formats an element like C's `%0.2f`
#[derive(Copy, Clone)]
pub struct TwoDecimals<T>(pub T);

impl<T: Element> fmt::Display for TwoDecimals<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0.to_f64())
    }
}
