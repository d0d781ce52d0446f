// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//!
//! Threading support functions and statics
//!
//! The parallel kernel forms only ever split write-disjoint output (rows,
//! columns or whole independent passes) between threads, so they produce
//! the same bits as the sequential forms.

#[cfg(feature="threading")]
use std::str::FromStr;
#[cfg(feature="threading")]
use once_cell::sync::Lazy;

#[cfg(feature="threading")]
pub use thread_tree::ThreadTree as ThreadPool;
#[cfg(feature="threading")]
pub use thread_tree::ThreadTreeCtx as ThreadPoolCtx;

use rawpointer::PointerExt;

use crate::util::{chunk_len, range_chunk};

/// Environment variable holding the thread count of the parallel mode
pub const NUM_THREADS_VAR: &str = "POLYKERNELS_NUM_THREADS";

/// How a kernel is executed
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Execution {
    /// The reference loop nest on the calling thread
    #[default]
    Sequential,
    /// Write-disjoint parts of the loop nest on the thread pool
    Parallel,
}

impl Execution {
    pub fn is_parallel(self) -> bool {
        self == Execution::Parallel
    }
}

/// Dummy threadpool
#[cfg(not(feature="threading"))]
pub struct ThreadPool;

#[cfg(not(feature="threading"))]
pub type ThreadPoolCtx<'a> = &'a ();

#[cfg(not(feature="threading"))]
impl ThreadPool {
    /// Get top dummy thread pool context
    pub(crate) fn top(&self) -> ThreadPoolCtx<'_> { &() }
}

pub(crate) fn get_thread_pool<'a>() -> (usize, ThreadPoolCtx<'a>) {
    let reg = &*REGISTRY;
    (reg.nthreads, reg.thread_pool().top())
}

/// Number of threads the parallel mode uses
pub fn num_threads() -> usize {
    REGISTRY.nthreads
}

struct Registry {
    nthreads: usize,
    #[cfg(feature="threading")]
    thread_pool: Box<ThreadPool>,
}

impl Registry {
    fn thread_pool(&self) -> &ThreadPool {
        #[cfg(feature="threading")]
        return &*REGISTRY.thread_pool;
        #[cfg(not(feature="threading"))]
        return &ThreadPool;
    }
}

#[cfg(not(feature="threading"))]
const REGISTRY: &'static Registry = &Registry { nthreads: 1 };

#[cfg(feature="threading")]
static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let var = ::std::env::var(NUM_THREADS_VAR).ok();
    let threads = match var {
        Some(s) if !s.is_empty() => {
            if let Ok(nt) = usize::from_str(&s) {
                1.max(nt)
            } else {
                log::warn!("failed to parse {}={:?}, using 1 thread", NUM_THREADS_VAR, s);
                1
            }
        }
        _otherwise => num_cpus::get_physical(),
    };

    let tp = if threads <= 1 {
        Box::new(ThreadPool::new_level0())
    } else if threads <= 3 {
        ThreadPool::new_with_level(1)
    } else {
        ThreadPool::new_with_level(2)
    };
    log::debug!("thread pool ready with {} threads", threads);

    Registry {
        nthreads: threads,
        thread_pool: tp,
    }
});

/// A raw pointer that may cross threads.
///
/// Users must only write through it to locations that no other thread
/// reads or writes during the same parallel loop.
pub(crate) struct SyncPtr<T>(*mut T);

impl<T> Clone for SyncPtr<T> {
    fn clone(&self) -> Self { *self }
}

impl<T> Copy for SyncPtr<T> {}

unsafe impl<T: Send> Send for SyncPtr<T> {}
unsafe impl<T: Send> Sync for SyncPtr<T> {}

impl<T> SyncPtr<T> {
    pub(crate) fn new(slice: &mut [T]) -> Self { SyncPtr(slice.as_mut_ptr()) }

    /// Pointer to element `index * stride`
    #[inline(always)]
    pub(crate) unsafe fn stride_offset(self, stride: isize, index: usize) -> *mut T {
        self.0.stride_offset(stride, index)
    }
}

/// Split `0..n` in contiguous ranges and call `f(start, end)` for each,
/// on the thread pool when `exec` is parallel.
pub(crate) fn for_each_range<F>(exec: Execution, n: usize, f: F)
    where F: Fn(usize, usize) + Sync,
{
    if !exec.is_parallel() || n == 0 {
        return f(0, n);
    }
    let (nthreads, pool) = get_thread_pool();
    let range = range_chunk(n, chunk_len(n, nthreads));
    let chunk = range.chunk();
    range.parallel(nthreads, pool)
         .for_each(|_ctx, ln, len| f(ln * chunk, ln * chunk + len));
}

/// Call `f(row_index, row)` for every `row_len` long row of `data`,
/// splitting the rows over the thread pool when `exec` is parallel.
///
/// Row indices count from the start of `data`.
pub(crate) fn for_each_row<T, F>(exec: Execution, data: &mut [T], row_len: usize, f: F)
    where T: Send,
          F: Fn(usize, &mut [T]) + Sync,
{
    assert!(row_len > 0 && data.len() % row_len == 0,
            "buffer of {} elements is not made of rows of {}", data.len(), row_len);
    if !exec.is_parallel() {
        for (i, row) in data.chunks_mut(row_len).enumerate() {
            f(i, row);
        }
        return;
    }
    let nrows = data.len() / row_len;
    let base = SyncPtr::new(data);
    for_each_range(exec, nrows, |start, end| {
        for i in start..end {
            // rows handed to different threads never overlap
            let row = unsafe {
                std::slice::from_raw_parts_mut(base.stride_offset(row_len as isize, i), row_len)
            };
            f(i, row);
        }
    });
}

/// Run two independent closures, concurrently when `exec` is parallel.
pub(crate) fn join<A, B, RA, RB>(exec: Execution, a: A, b: B) -> (RA, RB)
    where A: FnOnce() -> RA + Send,
          B: FnOnce() -> RB + Send,
          RA: Send,
          RB: Send,
{
    #[cfg(feature="threading")]
    {
        if exec.is_parallel() && num_threads() > 1 {
            let (_, pool) = get_thread_pool();
            return pool.join(|_| a(), |_| b());
        }
    }
    let _ = exec;
    (a(), b())
}
