// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use thiserror::Error;

/// Data-dependent kernel failures.
///
/// Mismatched buffer shapes are not reported here; the kernels panic on
/// those.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    #[error("matrix is singular: zero pivot at step {step}")]
    SingularMatrix { step: usize },

    #[error("p.q is zero at iteration {iteration}, step size is undefined")]
    ZeroCurvature { iteration: usize },

    #[error("table search for element {index} ran past the end of a table of {len} entries")]
    TableExhausted { index: usize, len: usize },

    #[error("transform length {len} is not a power of two")]
    NotPowerOfTwo { len: usize },

    #[error("invalid size for {kernel}: {reason}")]
    InvalidSize { kernel: &'static str, reason: String },
}

pub type Result<T, E = KernelError> = std::result::Result<T, E>;
