//! Segment location on sorted node abscissas.
//!
//! [`locate`] returns the index `i` of the segment `[X[i], X[i+1])` that
//! contains a query point. Segments are left-closed: a query equal to an
//! interior node belongs to the segment starting at that node. Queries at or
//! past the last node map to the last segment and queries below the first
//! node map to segment 0, so the search is total; splines apply their
//! extrapolation policy before searching.
//!
//! Sequential queries usually land in the same or the next segment. The
//! caller threads a [`SegmentCursor`] through consecutive calls so those
//! lookups skip the binary search. The cursor lives with the caller rather
//! than inside the spline, which keeps evaluation `&self` and lets several
//! threads query one spline with a cursor each.

/// Caller-owned locality hint for [`locate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentCursor {
    last: usize,
}

impl SegmentCursor {
    /// Creates a cursor pointing at the first segment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Segment found by the most recent search.
    #[must_use]
    pub fn segment(&self) -> usize {
        self.last
    }

    /// Points the cursor back at the first segment.
    pub fn reset(&mut self) {
        self.last = 0;
    }
}

/// Finds the segment containing `x`, starting from the cursor's hint.
///
/// Returns 0 when `xs` has fewer than two nodes.
pub fn locate(xs: &[f64], x: f64, cursor: &mut SegmentCursor) -> usize {
    let n = xs.len();
    if n < 2 {
        cursor.last = 0;
        return 0;
    }

    let last_segment = n - 2;
    let hint = cursor.last.min(last_segment);

    let segment = if contains(xs, hint, x) {
        hint
    } else if hint < last_segment && contains(xs, hint + 1, x) {
        hint + 1
    } else {
        bisect(xs, x)
    };

    cursor.last = segment;
    segment
}

/// Finds the segment containing `x` without a hint.
pub fn find_segment(xs: &[f64], x: f64) -> usize {
    if xs.len() < 2 {
        return 0;
    }
    bisect(xs, x)
}

// The last segment also owns everything at or past its right end.
fn contains(xs: &[f64], i: usize, x: f64) -> bool {
    xs[i] <= x && (x < xs[i + 1] || i + 2 == xs.len())
}

fn bisect(xs: &[f64], x: f64) -> usize {
    xs.partition_point(|&node| node <= x)
        .saturating_sub(1)
        .min(xs.len() - 2)
}
