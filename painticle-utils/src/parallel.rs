// parallel.rs - Parallel-for primitives shared by the batch kernels

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use log::debug;

use crate::error::PoolError;

/// Options for the worker pool used by batch operations
#[derive(Debug, Clone, Default)]
pub struct ParallelOptions {
    /// Maximum number of threads to use (0 = auto)
    pub max_threads: usize,
}

impl ParallelOptions {
    /// Create options with an explicit thread limit (0 = auto)
    pub fn new(max_threads: usize) -> Self {
        Self { max_threads }
    }

    /// Configure the global worker pool
    ///
    /// Only the first call in a process can change the pool size; later calls
    /// with a thread limit fail with [`PoolError`]. With `max_threads == 0`
    /// the pool keeps its automatic size and this is a no-op.
    #[cfg(feature = "parallel")]
    pub fn configure_global(&self) -> Result<(), PoolError> {
        if self.max_threads == 0 {
            return Ok(());
        }

        rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_threads)
            .build_global()
            .map_err(|e| PoolError(e.to_string()))?;

        debug!("Configured worker pool with {} threads", self.max_threads);
        Ok(())
    }

    /// Configure the global worker pool
    ///
    /// Without the `parallel` feature everything runs on the calling thread.
    #[cfg(not(feature = "parallel"))]
    pub fn configure_global(&self) -> Result<(), PoolError> {
        debug!(
            "Parallel feature disabled, ignoring thread limit {}",
            self.max_threads
        );
        Ok(())
    }
}

/// Number of worker threads batch operations fan out to
pub fn current_num_threads() -> usize {
    #[cfg(feature = "parallel")]
    {
        rayon::current_num_threads()
    }
    #[cfg(not(feature = "parallel"))]
    {
        1
    }
}

/// Write `out[i] = f(i)` for every slot of `out`
///
/// Iterations run on the worker pool in no particular order; each writes only
/// its own slot. Returns once every slot has been written.
#[cfg(feature = "parallel")]
pub fn fill_parallel<T, F>(out: &mut [T], f: F)
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    out.par_iter_mut()
        .enumerate()
        .for_each(|(i, slot)| *slot = f(i));
}

/// Write `out[i] = f(i)` for every slot of `out`
#[cfg(not(feature = "parallel"))]
pub fn fill_parallel<T, F>(out: &mut [T], f: F)
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = f(i);
    }
}

/// Collect `f(0), f(1), ..., f(len - 1)` into a vector, computed in parallel
///
/// The result is in index order even though evaluation order is unspecified.
#[cfg(feature = "parallel")]
pub fn map_parallel<T, F>(len: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    (0..len).into_par_iter().map(f).collect()
}

/// Collect `f(0), f(1), ..., f(len - 1)` into a vector
#[cfg(not(feature = "parallel"))]
pub fn map_parallel<T, F>(len: usize, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    (0..len).map(f).collect()
}
