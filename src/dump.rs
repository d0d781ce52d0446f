// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Verification dump of kernel outputs.
//!
//! Markers, names and `%0.2f` values follow the C benchmark programs. Line
//! breaks are uniform: a newline before every 20th value of the flattened
//! array, whatever its shape.
//!
//! ```text
//! ==BEGIN DUMP_ARRAYS==
//! begin dump: G
//! 0.00 0.12 ...
//! end   dump: G
//! ==END   DUMP_ARRAYS==
//! ```

use std::io::{self, Write};

use crate::element::{Element, TwoDecimals};

/// Values per dump line
const LINE_LEN: usize = 20;

pub struct Dump<W: Write> {
    out: W,
}

impl<W: Write> Dump<W> {
    /// Write the opening marker and return the dump writer.
    pub fn begin(mut out: W) -> io::Result<Self> {
        out.write_all(b"==BEGIN DUMP_ARRAYS==\n")?;
        Ok(Dump { out })
    }

    /// Write one named array, flattened row-major.
    pub fn array<T: Element>(&mut self, name: &str, values: &[T]) -> io::Result<()> {
        write!(self.out, "begin dump: {}", name)?;
        for (index, &value) in values.iter().enumerate() {
            if index % LINE_LEN == 0 {
                self.out.write_all(b"\n")?;
            }
            write!(self.out, "{} ", TwoDecimals(value))?;
        }
        write!(self.out, "\nend   dump: {}\n", name)
    }

    /// Write the closing marker and hand back the writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.out.write_all(b"==END   DUMP_ARRAYS==\n")?;
        self.out.flush()?;
        Ok(self.out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dump_to_string<F>(f: F) -> String
        where F: FnOnce(&mut Dump<Vec<u8>>) -> io::Result<()>
    {
        let mut dump = Dump::begin(Vec::new()).unwrap();
        f(&mut dump).unwrap();
        String::from_utf8(dump.finish().unwrap()).unwrap()
    }

    #[test]
    fn dump_markers_and_format() {
        let text = dump_to_string(|d| d.array("x", &[1.0f64, 0.25, -2.5]));
        assert_eq!(text, "==BEGIN DUMP_ARRAYS==\n\
                          begin dump: x\n\
                          1.00 0.25 -2.50 \n\
                          end   dump: x\n\
                          ==END   DUMP_ARRAYS==\n");
    }

    #[test]
    fn dump_breaks_lines_every_twenty() {
        let values: Vec<f32> = (0..41).map(|i| i as f32).collect();
        let text = dump_to_string(|d| d.array("v", &values));
        let lines: Vec<&str> = text.lines().collect();
        // markers, then lines of 20, 20 and 1 values
        assert_eq!(lines[1], "begin dump: v");
        assert_eq!(lines[2].split_whitespace().count(), 20);
        assert_eq!(lines[3].split_whitespace().count(), 20);
        assert_eq!(lines[4], "40.00 ");
        assert_eq!(lines[5], "end   dump: v");
    }

    #[test]
    fn dump_empty_array() {
        let text = dump_to_string(|d| d.array::<f64>("e", &[]));
        assert!(text.contains("begin dump: e\nend   dump: e\n"), "{:?}", text);
    }
}
