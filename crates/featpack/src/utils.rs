//! Parallelism configuration and thread pool helpers.

use rayon::prelude::*;

use crate::error::{CodecError, Result};

// =============================================================================
// Parallelism Configuration
// =============================================================================

/// Whether parallel execution is allowed.
///
/// Passed explicitly into every bulk operation. When `true`, the operation may
/// use `rayon` parallel iterators on the pool it is running in; when `false`,
/// it iterates sequentially on the calling thread.
///
/// The thread pool itself is set up by the caller via [`run_with_threads`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parallelism {
    Sequential,
    Parallel,
}

impl Parallelism {
    /// Create from thread count semantics.
    ///
    /// - 0 = auto (parallel if rayon pool has multiple threads, sequential otherwise)
    /// - 1 = sequential
    /// - >1 = parallel
    #[inline]
    pub fn from_threads(n_threads: usize) -> Self {
        if n_threads == 1 || (n_threads == 0 && rayon::current_num_threads() == 1) {
            Parallelism::Sequential
        } else {
            Parallelism::Parallel
        }
    }

    /// Returns `true` if parallel execution is allowed.
    #[inline]
    pub fn is_parallel(self) -> bool {
        matches!(self, Parallelism::Parallel)
    }

    /// Fallible for_each over disjoint mutable chunks of `slice`.
    ///
    /// `f` receives the chunk index and the chunk. Each chunk has exactly one
    /// writer, so no synchronization is needed inside `f`. The first error
    /// observed is returned; remaining chunks may or may not run.
    ///
    /// # Panics
    /// Panics if `chunk_size == 0`.
    #[inline]
    pub fn maybe_par_try_chunks_mut<T, E, F>(
        self,
        slice: &mut [T],
        chunk_size: usize,
        f: F,
    ) -> std::result::Result<(), E>
    where
        T: Send,
        E: Send,
        F: Fn(usize, &mut [T]) -> std::result::Result<(), E> + Sync + Send,
    {
        if self.is_parallel() {
            slice
                .par_chunks_mut(chunk_size)
                .enumerate()
                .try_for_each(|(idx, chunk)| f(idx, chunk))
        } else {
            slice
                .chunks_mut(chunk_size)
                .enumerate()
                .try_for_each(|(idx, chunk)| f(idx, chunk))
        }
    }

    /// Infallible variant of [`maybe_par_try_chunks_mut`](Self::maybe_par_try_chunks_mut).
    #[inline]
    pub fn maybe_par_chunks_mut<T, F>(self, slice: &mut [T], chunk_size: usize, f: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Sync + Send,
    {
        if self.is_parallel() {
            slice
                .par_chunks_mut(chunk_size)
                .enumerate()
                .for_each(|(idx, chunk)| f(idx, chunk));
        } else {
            slice
                .chunks_mut(chunk_size)
                .enumerate()
                .for_each(|(idx, chunk)| f(idx, chunk));
        }
    }
}

// =============================================================================
// Thread Pool Setup
// =============================================================================

/// Run a closure with the appropriate thread pool.
///
/// Thread count semantics:
/// - `0` = auto (use the ambient rayon pool)
/// - `1` = sequential (no thread pool)
/// - `n > 1` = use exactly `n` threads
///
/// # Example
///
/// ```
/// use featpack::run_with_threads;
///
/// let sum = run_with_threads(2, |_| (0..10).sum::<u32>()).unwrap();
/// assert_eq!(sum, 45);
/// ```
pub fn run_with_threads<T: Send>(
    n_threads: usize,
    f: impl FnOnce(Parallelism) -> T + Send,
) -> Result<T> {
    let parallelism = Parallelism::from_threads(n_threads);

    match (parallelism, n_threads) {
        (Parallelism::Sequential, _) => Ok(f(Parallelism::Sequential)),
        (Parallelism::Parallel, 0) => Ok(f(Parallelism::Parallel)),
        (Parallelism::Parallel, n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| CodecError::ThreadPool(e.to_string()))?;
            Ok(pool.install(|| f(Parallelism::Parallel)))
        }
    }
}

/// `ceil(a / b)` for `b > 0`.
#[inline]
pub(crate) fn ceil_div(a: usize, b: usize) -> usize {
    a.div_ceil(b)
}
