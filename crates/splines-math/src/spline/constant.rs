//! Piecewise constant (step function) spline.

use std::io;

use log::debug;

use super::{
    check_stride, place, queryable, validate_nodes, ExtrapolationPolicy, Placement, Spline,
    SplineKind, SplineState,
};
use crate::error::{SplineError, SplineResult};
use crate::search::{locate, SegmentCursor};
use crate::storage::NodeBuffer;

/// Piecewise constant spline.
///
/// Segment `i` takes the value `Y[i]` on `[X[i], X[i+1])`. A spline with `n`
/// nodes has `n - 1` values. The final ordinate sample passed to a build is
/// never evaluated; it is kept as the value of the segment a later
/// [`push_back`](ConstantSpline::push_back) opens at `X[n-1]`. Below the
/// first node the first value applies, above the last node the last
/// segment's value applies.
///
/// # Example
///
/// ```rust
/// use splines_math::spline::{ConstantSpline, Spline};
///
/// let xs = [0.0, 1.0, 2.0, 3.0];
/// let ys = [5.0, 6.0, 7.0, 8.0]; // 8.0 is unused
///
/// let mut spline = ConstantSpline::new("steps");
/// spline.build(&xs, &ys).unwrap();
///
/// assert_eq!(spline.value(1.5).unwrap(), 6.0);
/// assert_eq!(spline.value(10.0).unwrap(), 7.0);
/// ```
#[derive(Debug, Default)]
pub struct ConstantSpline<'a> {
    name: String,
    nodes: NodeBuffer<'a>,
    state: SplineState,
    extrapolation: ExtrapolationPolicy,
    /// The last node has no value for a segment appended after it.
    open_tail: bool,
}

impl<'a> ConstantSpline<'a> {
    /// Creates an empty spline.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the extrapolation policy.
    #[must_use]
    pub fn with_extrapolation(mut self, policy: ExtrapolationPolicy) -> Self {
        self.extrapolation = policy;
        self
    }

    /// Builds into caller-owned arrays of capacity `n` instead of allocating.
    ///
    /// A later build of at most `n` nodes writes into `x` and `y`; the spline
    /// never frees them.
    ///
    /// # Errors
    ///
    /// Returns [`SplineError::CapacityExceeded`] if either slice holds fewer
    /// than `n` values.
    pub fn reserve_external(
        &mut self,
        n: usize,
        x: &'a mut [f64],
        y: &'a mut [f64],
    ) -> SplineResult<()> {
        self.nodes.reserve_external(n, x, y)?;
        self.state = SplineState::Reserved;
        debug!("spline '{}': attached external buffers for {} nodes", self.name, n);
        Ok(())
    }

    /// Appends a node; `y` becomes the value of the segment starting at `x`.
    ///
    /// The spline is built once it holds at least one node.
    ///
    /// # Errors
    ///
    /// - [`SplineError::InvalidInput`] if the spline was built from a single
    ///   node and no ordinate, so the new segment would have no value.
    /// - See [`NodeBuffer::push_back`].
    pub fn push_back(&mut self, x: f64, y: f64) -> SplineResult<()> {
        if self.open_tail && !self.nodes.is_empty() {
            return Err(SplineError::invalid_input(format!(
                "no value for the segment starting at X[{}]",
                self.nodes.len() - 1
            )));
        }
        self.nodes.push_back(x, y)?;
        self.open_tail = false;
        self.state = SplineState::Built;
        Ok(())
    }

    /// Removes the last node.
    pub fn drop_back(&mut self) {
        self.nodes.drop_back();
    }

    /// Segment values (one per segment).
    #[must_use]
    pub fn y_values(&self) -> &[f64] {
        let nseg = self.nodes.len().saturating_sub(1);
        &self.nodes.ys()[..nseg]
    }

    fn finalize(&mut self) -> SplineResult<()> {
        if let Err(err) = validate_nodes(self.nodes.x_nodes()) {
            self.nodes.set_len(0);
            self.state = SplineState::Reserved;
            return Err(err);
        }
        self.state = SplineState::Built;
        debug!(
            "spline '{}': built constant spline with {} nodes",
            self.name,
            self.nodes.len()
        );
        Ok(())
    }
}

impl Spline for ConstantSpline<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SplineKind {
        SplineKind::Constant
    }

    fn state(&self) -> SplineState {
        self.state
    }

    fn num_points(&self) -> usize {
        self.nodes.len()
    }

    fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    fn is_owned(&self) -> bool {
        self.nodes.is_owned()
    }

    fn x_nodes(&self) -> &[f64] {
        self.nodes.x_nodes()
    }

    fn extrapolation(&self) -> ExtrapolationPolicy {
        self.extrapolation
    }

    fn set_extrapolation(&mut self, policy: ExtrapolationPolicy) {
        self.extrapolation = policy;
    }

    fn reserve(&mut self, n: usize) {
        self.nodes.reserve(n);
        self.open_tail = false;
        self.state = SplineState::Reserved;
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.open_tail = false;
        self.state = SplineState::Empty;
    }

    fn build_strided(
        &mut self,
        x: &[f64],
        incx: usize,
        y: &[f64],
        incy: usize,
        n: usize,
    ) -> SplineResult<()> {
        let nseg = n.saturating_sub(1);
        check_stride("x", x.len(), incx, n)?;
        check_stride("y", y.len(), incy, nseg)?;

        self.reserve(n);
        let (xs, ys) = self.nodes.split_mut();
        for (dst, src) in xs.iter_mut().zip(x.iter().step_by(incx)).take(n) {
            *dst = *src;
        }
        let mut filled = 0;
        for (dst, src) in ys.iter_mut().zip(y.iter().step_by(incy)).take(n) {
            *dst = *src;
            filled += 1;
        }
        // Without a trailing sample, appended segments continue the last value
        if filled < n {
            if n >= 2 {
                ys[n - 1] = ys[n - 2];
            } else {
                self.open_tail = true;
            }
        }
        self.nodes.set_len(n);
        self.finalize()
    }

    /// Accepts `xs.len() - 1 <= ys.len() <= xs.len() + 1` and builds
    /// `xs.len()` nodes. The leading `xs.len() - 1` ordinates are the segment
    /// values.
    fn build(&mut self, xs: &[f64], ys: &[f64]) -> SplineResult<()> {
        let n = xs.len();
        if ys.len() + 1 < n || ys.len() > n + 1 {
            return Err(SplineError::dimension_mismatch(n, ys.len()));
        }
        self.build_strided(xs, 1, ys, 1, n)
    }

    fn value_with(&self, x: f64, cursor: &mut SegmentCursor) -> SplineResult<f64> {
        let xs = queryable(self.state, self.nodes.x_nodes(), "evaluate")?;
        let ys = self.nodes.ys();
        let segment = match place(xs, x, self.extrapolation)? {
            Placement::Below => 0,
            Placement::Above => xs.len() - 2,
            Placement::Inside => locate(xs, x, cursor),
        };
        Ok(ys[segment])
    }

    /// Zero wherever defined; the jumps at nodes are not represented.
    fn derivative_with(&self, x: f64, _cursor: &mut SegmentCursor) -> SplineResult<f64> {
        let xs = queryable(self.state, self.nodes.x_nodes(), "differentiate")?;
        place(xs, x, self.extrapolation)?;
        Ok(0.0)
    }

    fn second_derivative_with(&self, x: f64, cursor: &mut SegmentCursor) -> SplineResult<f64> {
        self.derivative_with(x, cursor)
    }

    fn segment_coefficients(&self, segment: usize, out: &mut [f64]) -> SplineResult<()> {
        let nseg = self.nodes.len().saturating_sub(1);
        if segment >= nseg {
            return Err(SplineError::invalid_input(format!(
                "segment {segment} out of range 0..{nseg}"
            )));
        }
        let slot = out
            .first_mut()
            .ok_or_else(|| SplineError::capacity_exceeded(1, 0))?;
        *slot = self.nodes.ys()[segment];
        Ok(())
    }

    fn write_segments(&self, out: &mut dyn io::Write) -> io::Result<()> {
        let xs = self.nodes.x_nodes();
        let ys = self.nodes.ys();
        for (i, bounds) in xs.windows(2).enumerate() {
            writeln!(
                out,
                "segment N.{:>4} X:[ {}, {} ] Y:{}",
                i, bounds[0], bounds[1], ys[i]
            )?;
        }
        Ok(())
    }
}
