// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The benchmark harness: init, timed kernel, optional dump.

use std::fmt;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use thiserror::Error;

use crate::dataset::Dataset;
use crate::dump::Dump;
use crate::error::KernelError;
use crate::threading::Execution;
use crate::{
    bicg, colormap, conjgrad, cp50, deriche, dgemvt, fdtd_2d, fourierf, gemm, gesummv,
    jacobi_1d, jacobi_2d, lufac, mm3, mvt, remap, tblshft,
};

/// One benchmark program: buffers, their deterministic fill, the kernel
/// and the arrays it dumps.
pub trait Benchmark: Sized {
    /// Name as used on the command line
    const NAME: &'static str;

    type Size: Copy + fmt::Debug;

    /// Problem size of a dataset class
    fn size(dataset: Dataset) -> Self::Size;

    /// Allocate and fill all buffers
    fn init(size: Self::Size) -> Self;

    /// Run the kernel once over the buffers
    fn run(&mut self, exec: Execution) -> Result<(), KernelError>;

    /// Write the output arrays
    fn dump<W: Write>(&self, dump: &mut Dump<W>) -> io::Result<()>;
}

#[derive(Error, Debug)]
pub enum SuiteError {
    #[error(transparent)]
    Kernel(#[from] KernelError),
    #[error("failed to write dump")]
    Io(#[from] io::Error),
}

/// Timing of one kernel run
#[derive(Clone, Debug)]
pub struct Report {
    pub name: &'static str,
    pub elapsed: Duration,
}

impl fmt::Display for Report {
    /// The timer line: seconds with six decimals
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0.6}", self.elapsed.as_secs_f64())
    }
}

/// Initialize `B` at `size` and time one kernel run.
///
/// Returns the buffers after the run with the timing.
pub fn execute<B: Benchmark>(size: B::Size, exec: Execution) -> Result<(B, Report), KernelError> {
    log::debug!("{}: init {:?}", B::NAME, size);
    let mut bench = B::init(size);
    log::info!("{}: start ({:?})", B::NAME, exec);
    let start = Instant::now();
    bench.run(exec)?;
    let elapsed = start.elapsed();
    log::info!("{}: done in {:?}", B::NAME, elapsed);
    Ok((bench, Report { name: B::NAME, elapsed }))
}

/// Write the complete dump of a finished benchmark.
pub fn dump_to<B: Benchmark, W: Write>(bench: &B, out: W) -> io::Result<W> {
    let mut dump = Dump::begin(out)?;
    bench.dump(&mut dump)?;
    dump.finish()
}

/// All benchmarks of the suite
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[derive(Display, EnumIter, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum KernelId {
    #[strum(to_string = "3mm")]
    Mm3,
    Gemm,
    Bicg,
    Gesummv,
    Mvt,
    Lufac,
    Dgemvt,
    #[strum(to_string = "jacobi-1d")]
    Jacobi1d,
    #[strum(to_string = "jacobi-2d")]
    Jacobi2d,
    #[strum(to_string = "fdtd-2d")]
    Fdtd2d,
    Deriche,
    Fourierf,
    Tblshft,
    Colormap,
    Cp50,
    Conjgrad,
    Remap,
}

impl KernelId {
    /// Whether the kernel splits work in [`Execution::Parallel`] mode
    pub fn has_parallel_form(self) -> bool {
        matches!(self,
                 KernelId::Mm3 | KernelId::Gemm | KernelId::Gesummv | KernelId::Mvt |
                 KernelId::Jacobi2d | KernelId::Deriche | KernelId::Tblshft |
                 KernelId::Cp50 | KernelId::Colormap)
    }
}

/// Run kernel `id` at `dataset`, dumping to `dump` when given.
pub fn run_kernel(id: KernelId, dataset: Dataset, exec: Execution,
                  dump: Option<&mut dyn Write>) -> Result<Report, SuiteError>
{
    match id {
        KernelId::Mm3 => run::<mm3::Mm3>(dataset, exec, dump),
        KernelId::Gemm => run::<gemm::Gemm>(dataset, exec, dump),
        KernelId::Bicg => run::<bicg::Bicg>(dataset, exec, dump),
        KernelId::Gesummv => run::<gesummv::Gesummv>(dataset, exec, dump),
        KernelId::Mvt => run::<mvt::Mvt>(dataset, exec, dump),
        KernelId::Lufac => run::<lufac::Lufac>(dataset, exec, dump),
        KernelId::Dgemvt => run::<dgemvt::Dgemvt>(dataset, exec, dump),
        KernelId::Jacobi1d => run::<jacobi_1d::Jacobi1d>(dataset, exec, dump),
        KernelId::Jacobi2d => run::<jacobi_2d::Jacobi2d>(dataset, exec, dump),
        KernelId::Fdtd2d => run::<fdtd_2d::Fdtd2d>(dataset, exec, dump),
        KernelId::Deriche => run::<deriche::Deriche>(dataset, exec, dump),
        KernelId::Fourierf => run::<fourierf::Fourierf>(dataset, exec, dump),
        KernelId::Tblshft => run::<tblshft::Tblshft>(dataset, exec, dump),
        KernelId::Colormap => run::<colormap::Colormap>(dataset, exec, dump),
        KernelId::Cp50 => run::<cp50::Cp50>(dataset, exec, dump),
        KernelId::Conjgrad => run::<conjgrad::Conjgrad>(dataset, exec, dump),
        KernelId::Remap => run::<remap::Remap>(dataset, exec, dump),
    }
}

fn run<B: Benchmark>(dataset: Dataset, exec: Execution,
                     dump: Option<&mut dyn Write>) -> Result<Report, SuiteError>
{
    let (bench, report) = execute::<B>(B::size(dataset), exec)?;
    if let Some(out) = dump {
        dump_to(&bench, out)?;
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn kernel_names() {
        assert_eq!(KernelId::Mm3.to_string(), "3mm");
        assert_eq!(KernelId::from_str("jacobi-2d"), Ok(KernelId::Jacobi2d));
        assert_eq!(KernelId::from_str("FDTD-2D"), Ok(KernelId::Fdtd2d));
        assert_eq!(KernelId::from_str("cp50"), Ok(KernelId::Cp50));
        for id in KernelId::iter() {
            assert_eq!(KernelId::from_str(&id.to_string()), Ok(id));
        }
    }

    #[test]
    fn every_kernel_runs_at_mini() {
        for id in KernelId::iter() {
            let mut out = Vec::new();
            let report = run_kernel(id, Dataset::Mini, Execution::Sequential,
                                    Some(&mut out as &mut dyn Write));
            let report = report.unwrap_or_else(|e| panic!("{}: {}", id, e));
            assert_eq!(report.name, id.to_string());
            let text = String::from_utf8(out).unwrap();
            assert!(text.starts_with("==BEGIN DUMP_ARRAYS==\n"), "{}", id);
            assert!(text.ends_with("==END   DUMP_ARRAYS==\n"), "{}", id);
        }
    }

    #[test]
    fn parallel_dump_matches_sequential() {
        for id in KernelId::iter().filter(|id| id.has_parallel_form()) {
            let mut seq = Vec::new();
            let mut par = Vec::new();
            run_kernel(id, Dataset::Mini, Execution::Sequential, Some(&mut seq as &mut dyn Write)).unwrap();
            run_kernel(id, Dataset::Mini, Execution::Parallel, Some(&mut par as &mut dyn Write)).unwrap();
            assert!(seq == par, "{}: parallel dump differs", id);
        }
    }

    fn dump_text(id: KernelId, exec: Execution) -> String {
        let mut out = Vec::new();
        run_kernel(id, Dataset::Mini, exec, Some(&mut out as &mut dyn Write))
            .unwrap_or_else(|e| panic!("{}: {}", id, e));
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn repeated_runs_dump_the_same() {
        for id in KernelId::iter() {
            assert!(dump_text(id, Execution::Sequential) == dump_text(id, Execution::Sequential),
                    "{}: two runs differ", id);
        }
    }

    #[test]
    fn dumped_array_names() {
        let names = |id| -> Vec<String> {
            dump_text(id, Execution::Sequential).lines()
                .filter_map(|line| line.strip_prefix("begin dump: "))
                .map(String::from)
                .collect()
        };
        assert_eq!(names(KernelId::Lufac), ["C"]);
        assert_eq!(names(KernelId::Remap), ["Y1"]);
        assert_eq!(names(KernelId::Mm3), ["G"]);
        assert_eq!(names(KernelId::Bicg), ["s", "q"]);
        assert_eq!(names(KernelId::Fdtd2d), ["ex", "ey", "hz"]);
        assert_eq!(names(KernelId::Cp50), ["RPLANE", "GPLANE", "BPLANE"]);
    }
}
