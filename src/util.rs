// Copyright 2024 polykernels authors
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use core::cmp::min;

use crate::threading::ThreadPoolCtx;

#[derive(Copy, Clone, Debug)]
pub struct RangeChunk { i: usize, n: usize, chunk: usize }

/// Create an iterator that splits `n` in chunks of size `chunk`;
/// the last item can be an uneven chunk.
///
/// Items are `(chunk index, chunk length)`.
pub fn range_chunk(n: usize, chunk: usize) -> RangeChunk {
    debug_assert!(chunk > 0 || n == 0);
    RangeChunk {
        i: 0,
        n,
        chunk,
    }
}

/// Chunk length that splits `n` items in at most `parts` chunks.
#[inline]
pub fn chunk_len(n: usize, parts: usize) -> usize {
    let parts = parts.max(1);
    let (mut d, r) = (n / parts, n % parts);
    if r > 0 { d += 1; }
    d.max(1)
}

impl Iterator for RangeChunk {
    type Item = (usize, usize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.n == 0 {
            None
        } else {
            let i = self.i;
            let rem = min(self.n, self.chunk);
            self.i += 1;
            self.n -= rem;
            Some((i, rem))
        }
    }
}

#[cfg(feature="threading")]
/// Create an iterator that splits `n` in chunks of size `chunk`;
/// the last item can be an uneven chunk.
///
/// And splits the iterator in `total` parts and only iterates the `index`th part of it
pub fn range_chunk_part(n: usize, chunk: usize, index: usize, total: usize) -> RangeChunk {
    debug_assert_ne!(total, 0);

    // round up
    let mut nchunks = n / chunk;
    nchunks += (n % chunk != 0) as usize;

    // chunks per thread
    // round up
    let mut chunks_per = nchunks / total;
    chunks_per += (nchunks % total != 0) as usize;

    let i = chunks_per * index;
    let nn = min(n, (i + chunks_per) * chunk).saturating_sub(i * chunk);

    RangeChunk { i, n: nn, chunk }
}

impl RangeChunk {
    /// "Builder" method to create a RangeChunkParallel
    pub(crate) fn parallel(self, nthreads: usize, pool: ThreadPoolCtx<'_>) -> RangeChunkParallel<'_> {
        RangeChunkParallel {
            nthreads,
            pool,
            range: self,
        }
    }

    /// Chunk size this iterator was created with
    pub(crate) fn chunk(&self) -> usize { self.chunk }
}

/// Intermediate struct for building the parallel execution of a range chunk.
pub(crate) struct RangeChunkParallel<'a> {
    range: RangeChunk,
    nthreads: usize,
    pool: ThreadPoolCtx<'a>,
}

#[cfg(not(feature="threading"))]
impl RangeChunkParallel<'_> {
    pub(crate) fn for_each<F>(self, for_each: F)
        where F: Fn(ThreadPoolCtx<'_>, usize, usize) + Sync,
    {
        let _ = self.nthreads;
        for (ln, chunk_size) in self.range {
            for_each(self.pool, ln, chunk_size)
        }
    }
}

#[cfg(feature="threading")]
impl RangeChunkParallel<'_> {
    /// Execute loop iterations (parallel if enabled) using the given closure.
    ///
    /// The closure gets the following arguments for each iteration:
    ///
    /// - Thread pool context (used for child threads)
    /// - index of chunk (like RangeChunk)
    /// - size of chunk (like RangeChunk)
    pub(crate) fn for_each<F>(self, for_each: F)
        where F: Fn(ThreadPoolCtx<'_>, usize, usize) + Sync,
    {
        fn inner<F>(range: RangeChunk, index: usize, nthreads: usize, pool: ThreadPoolCtx<'_>,
                    for_each: F)
            where F: Fn(ThreadPoolCtx<'_>, usize, usize) + Sync
        {
            for (ln, chunk_size) in range_chunk_part(range.n, range.chunk, index, nthreads) {
                for_each(pool, ln, chunk_size)
            }
        }

        if self.range.n == 0 {
            return;
        }
        let pool = self.pool;
        let range = self.range;
        let for_each = &for_each;
        let nthreads = min(self.nthreads, 4);
        let f = move |ctx: ThreadPoolCtx<'_>, i| inner(range, i, nthreads, ctx, for_each);
        if nthreads >= 4 {
            pool.join4(&f);
        } else if nthreads >= 3 {
            pool.join3l(&f);
        } else if nthreads >= 2 {
            pool.join(|ctx| f(ctx, 0), |ctx| f(ctx, 1));
        } else {
            f(pool, 0)
        }
    }
}
