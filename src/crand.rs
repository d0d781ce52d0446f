// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The C library `srand`/`rand` stream of glibc.
//!
//! `fourierf` draws its input from `rand()` seeded with 1; reproducing the
//! stream bit for bit keeps its dumps comparable with the C builds.
//! This is the `TYPE_3` additive feedback generator: degree 31,
//! separation 3, seeded by a Park-Miller LCG, first 310 outputs dropped.

/// Largest value `rand` returns
pub const RAND_MAX: u32 = 0x7fff_ffff;

const DEG: usize = 31;
const SEP: usize = 3;
const DISCARD: usize = 10 * DEG;

#[derive(Clone, Debug)]
pub struct CRand {
    state: [u32; DEG],
    front: usize,
    rear: usize,
}

impl CRand {
    /// Equivalent of `srand(seed)`
    pub fn new(seed: u32) -> Self {
        let mut state = [0u32; DEG];
        state[0] = if seed == 0 { 1 } else { seed };
        for i in 1..DEG {
            // 16807 * word % 2147483647 without overflow (Schrage)
            let word = state[i - 1] as i32 as i64;
            let hi = word / 127773;
            let lo = word % 127773;
            let mut next = 16807 * lo - 2836 * hi;
            if next < 0 {
                next += 2147483647;
            }
            state[i] = next as u32;
        }
        let mut rng = CRand { state, front: SEP, rear: 0 };
        for _ in 0..DISCARD {
            rng.next_u32();
        }
        rng
    }

    /// Equivalent of `rand()`, in `0..=RAND_MAX`
    pub fn next_u32(&mut self) -> u32 {
        let sum = self.state[self.front].wrapping_add(self.state[self.rear]);
        self.state[self.front] = sum;
        self.front = (self.front + 1) % DEG;
        self.rear = (self.rear + 1) % DEG;
        sum >> 1
    }
}

impl Iterator for CRand {
    type Item = u32;
    fn next(&mut self) -> Option<u32> {
        Some(self.next_u32())
    }
}
