//! Parallel batch evaluation.
//!
//! A built spline is `Sync` and evaluation keeps its search hint in a
//! caller-owned [`SegmentCursor`](crate::search::SegmentCursor), so large
//! query sets can be split across threads with one cursor per chunk.

use rayon::prelude::*;

use crate::error::SplineResult;
use crate::spline::Spline;

/// Queries per rayon task; each task threads its own cursor.
const CHUNK_SIZE: usize = 1024;

/// Evaluates `spline` at every point of `xs` in parallel.
///
/// Results are in the order of `xs`. Sorted queries benefit most, since
/// each chunk's cursor then walks the segments sequentially.
///
/// # Errors
///
/// Returns the first error reported by any chunk.
pub fn par_values<S: Spline + ?Sized>(spline: &S, xs: &[f64]) -> SplineResult<Vec<f64>> {
    let chunks = xs
        .par_chunks(CHUNK_SIZE)
        .map(|chunk| spline.values(chunk))
        .collect::<SplineResult<Vec<Vec<f64>>>>()?;

    Ok(chunks.concat())
}
