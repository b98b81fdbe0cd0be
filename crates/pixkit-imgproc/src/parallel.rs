use std::ops::Range;

use rayon::prelude::*;

use crate::error::ProcessError;

/// Controls how row operations are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

impl ExecutionStrategy {
    /// Check the strategy can run.
    pub fn validate(self) -> Result<(), ProcessError> {
        match self {
            ExecutionStrategy::Fixed(0) => Err(ProcessError::InvalidThreadCount(0)),
            _ => Ok(()),
        }
    }
}

/// Run `op` over the rows of `data` with indices in `rows`.
///
/// `data` is a row-major buffer of rows `stride` elements long. Each worker
/// creates its scratch state once with `init` and reuses it for every row it
/// processes; `op` receives the scratch, the row index and the row.
///
/// # Errors
///
/// Fails before touching any row if the strategy is invalid or its thread
/// pool cannot be built.
pub fn par_iter_rows_range<T, S, I, F>(
    strategy: ExecutionStrategy,
    data: &mut [T],
    stride: usize,
    rows: Range<usize>,
    init: I,
    op: F,
) -> Result<(), ProcessError>
where
    T: Send,
    I: Fn() -> S + Send + Sync,
    F: Fn(&mut S, usize, &mut [T]) + Send + Sync,
{
    strategy.validate()?;

    if stride == 0 || rows.is_empty() {
        return Ok(());
    }

    let par_rows = |data: &mut [T]| {
        data.par_chunks_exact_mut(stride)
            .enumerate()
            .skip(rows.start)
            .take(rows.len())
            .for_each_init(&init, |scratch, (y, row)| op(scratch, y, row));
    };

    match strategy {
        ExecutionStrategy::Serial => {
            let mut scratch = init();
            data.chunks_exact_mut(stride)
                .enumerate()
                .skip(rows.start)
                .take(rows.len())
                .for_each(|(y, row)| op(&mut scratch, y, row));
        }
        ExecutionStrategy::ParallelRows => par_rows(data),
        ExecutionStrategy::Fixed(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ProcessError::BuildError(e.to_string()))?;

            pool.install(|| par_rows(data));
        }
    }

    Ok(())
}

/// Apply a function to each pair of source and destination rows.
///
/// Both slices hold the same number of rows; `src_stride` and `dst_stride` are
/// their row lengths.
pub fn par_iter_rows<T1, T2, F>(
    strategy: ExecutionStrategy,
    src: &[T1],
    src_stride: usize,
    dst: &mut [T2],
    dst_stride: usize,
    f: F,
) -> Result<(), ProcessError>
where
    T1: Sync,
    T2: Send,
    F: Fn(&[T1], &mut [T2]) + Send + Sync,
{
    strategy.validate()?;

    if src_stride == 0 || dst_stride == 0 {
        return Ok(());
    }

    let par_rows = |dst: &mut [T2]| {
        src.par_chunks_exact(src_stride)
            .zip(dst.par_chunks_exact_mut(dst_stride))
            .for_each(|(src_row, dst_row)| f(src_row, dst_row));
    };

    match strategy {
        ExecutionStrategy::Serial => src
            .chunks_exact(src_stride)
            .zip(dst.chunks_exact_mut(dst_stride))
            .for_each(|(src_row, dst_row)| f(src_row, dst_row)),
        ExecutionStrategy::ParallelRows => par_rows(dst),
        ExecutionStrategy::Fixed(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ProcessError::BuildError(e.to_string()))?;

            pool.install(|| par_rows(dst));
        }
    }

    Ok(())
}
