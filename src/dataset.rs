// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use strum::{Display, EnumIter, EnumString};

/// Problem size class
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[derive(Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Dataset {
    Mini,
    Small,
    Medium,
    #[default]
    Large,
    #[strum(to_string = "extralarge", serialize = "xl")]
    ExtraLarge,
}

impl Dataset {
    /// Pick the entry for this class out of a
    /// `[mini, small, medium, large, extralarge]` table.
    #[inline]
    pub fn pick<T: Copy>(self, table: [T; 5]) -> T {
        table[self as usize]
    }
}
