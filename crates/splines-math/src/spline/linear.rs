//! Piecewise linear spline.

use std::io;

use log::debug;

use super::{
    check_stride, place, queryable, validate_nodes, ExtrapolationPolicy, Placement, Spline,
    SplineKind, SplineState,
};
use crate::error::{SplineError, SplineResult};
use crate::search::{locate, SegmentCursor};
use crate::storage::NodeBuffer;

/// Linear interpolation between consecutive nodes.
///
/// Unlike [`ConstantSpline`](super::ConstantSpline) every ordinate sample is
/// used. Outside the node range the boundary value is held and the
/// derivative is zero.
///
/// # Example
///
/// ```rust
/// use splines_math::spline::{LinearSpline, Spline};
///
/// let xs = [0.0, 1.0, 2.0, 3.0];
/// let ys = [0.0, 1.0, 4.0, 9.0];
///
/// let mut spline = LinearSpline::new("squares");
/// spline.build(&xs, &ys).unwrap();
///
/// // Halfway between (1, 1) and (2, 4)
/// assert_eq!(spline.value(1.5).unwrap(), 2.5);
/// assert_eq!(spline.derivative(1.5).unwrap(), 3.0);
/// ```
#[derive(Debug, Default)]
pub struct LinearSpline<'a> {
    name: String,
    nodes: NodeBuffer<'a>,
    state: SplineState,
    extrapolation: ExtrapolationPolicy,
}

impl<'a> LinearSpline<'a> {
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

    /// Appends a node.
    ///
    /// # Errors
    ///
    /// See [`NodeBuffer::push_back`].
    pub fn push_back(&mut self, x: f64, y: f64) -> SplineResult<()> {
        self.nodes.push_back(x, y)?;
        self.state = SplineState::Built;
        Ok(())
    }

    /// Removes the last node.
    pub fn drop_back(&mut self) {
        self.nodes.drop_back();
    }

    /// Node values.
    #[must_use]
    pub fn y_values(&self) -> &[f64] {
        &self.nodes.ys()[..self.nodes.len()]
    }

    /// Slope of `segment`; zero-width segments have slope 0.
    fn slope(&self, segment: usize) -> f64 {
        let xs = self.nodes.xs();
        let ys = self.nodes.ys();
        let h = xs[segment + 1] - xs[segment];
        if h > 0.0 {
            (ys[segment + 1] - ys[segment]) / h
        } else {
            0.0
        }
    }

    fn finalize(&mut self) -> SplineResult<()> {
        if let Err(err) = validate_nodes(self.nodes.x_nodes()) {
            self.nodes.set_len(0);
            self.state = SplineState::Reserved;
            return Err(err);
        }
        self.state = SplineState::Built;
        debug!(
            "spline '{}': built linear spline with {} nodes",
            self.name,
            self.nodes.len()
        );
        Ok(())
    }
}

impl Spline for LinearSpline<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> SplineKind {
        SplineKind::Linear
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
        self.state = SplineState::Reserved;
    }

    fn clear(&mut self) {
        self.nodes.clear();
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
        check_stride("x", x.len(), incx, n)?;
        check_stride("y", y.len(), incy, n)?;

        self.reserve(n);
        let (xs, ys) = self.nodes.split_mut();
        for (dst, src) in xs.iter_mut().zip(x.iter().step_by(incx)).take(n) {
            *dst = *src;
        }
        for (dst, src) in ys.iter_mut().zip(y.iter().step_by(incy)).take(n) {
            *dst = *src;
        }
        self.nodes.set_len(n);
        self.finalize()
    }

    /// Requires `xs.len() == ys.len()`.
    fn build(&mut self, xs: &[f64], ys: &[f64]) -> SplineResult<()> {
        if xs.len() != ys.len() {
            return Err(SplineError::dimension_mismatch(xs.len(), ys.len()));
        }
        self.build_strided(xs, 1, ys, 1, xs.len())
    }

    fn value_with(&self, x: f64, cursor: &mut SegmentCursor) -> SplineResult<f64> {
        let xs = queryable(self.state, self.nodes.x_nodes(), "evaluate")?;
        let ys = self.nodes.ys();
        match place(xs, x, self.extrapolation)? {
            Placement::Below => Ok(ys[0]),
            Placement::Above => Ok(ys[xs.len() - 1]),
            Placement::Inside => {
                let i = locate(xs, x, cursor);
                Ok(ys[i] + self.slope(i) * (x - xs[i]))
            }
        }
    }

    fn derivative_with(&self, x: f64, cursor: &mut SegmentCursor) -> SplineResult<f64> {
        let xs = queryable(self.state, self.nodes.x_nodes(), "differentiate")?;
        match place(xs, x, self.extrapolation)? {
            Placement::Below | Placement::Above => Ok(0.0),
            Placement::Inside => Ok(self.slope(locate(xs, x, cursor))),
        }
    }

    fn second_derivative_with(&self, x: f64, _cursor: &mut SegmentCursor) -> SplineResult<f64> {
        let xs = queryable(self.state, self.nodes.x_nodes(), "differentiate")?;
        place(xs, x, self.extrapolation)?;
        Ok(0.0)
    }

    fn segment_coefficients(&self, segment: usize, out: &mut [f64]) -> SplineResult<()> {
        let nseg = self.nodes.len().saturating_sub(1);
        if segment >= nseg {
            return Err(SplineError::invalid_input(format!(
                "segment {segment} out of range 0..{nseg}"
            )));
        }
        if out.len() < 2 {
            return Err(SplineError::capacity_exceeded(2, out.len()));
        }
        out[0] = self.nodes.ys()[segment];
        out[1] = self.slope(segment);
        Ok(())
    }

    fn write_segments(&self, out: &mut dyn io::Write) -> io::Result<()> {
        let xs = self.nodes.x_nodes();
        let ys = self.nodes.ys();
        for (i, bounds) in xs.windows(2).enumerate() {
            writeln!(
                out,
                "segment N.{:>4} X:[ {}, {} ] Y:[ {}, {} ] slope: {}",
                i,
                bounds[0],
                bounds[1],
                ys[i],
                ys[i + 1],
                self.slope(i)
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::CoefficientLayout;
    use approx::assert_relative_eq;

    fn spline() -> LinearSpline<'static> {
        let mut spline = LinearSpline::new("linear");
        spline.build(&[0.0, 1.0, 2.0], &[0.0, 2.0, 4.0]).unwrap();
        spline
    }

    #[test]
    fn test_linear_interpolation() {
        let spline = spline();

        // Test at exact points
        assert_relative_eq!(spline.value(0.0).unwrap(), 0.0, epsilon = 1e-10);
        assert_relative_eq!(spline.value(1.0).unwrap(), 2.0, epsilon = 1e-10);
        assert_relative_eq!(spline.value(2.0).unwrap(), 4.0, epsilon = 1e-10);

        // Test interpolation
        assert_relative_eq!(spline.value(0.5).unwrap(), 1.0, epsilon = 1e-10);
        assert_relative_eq!(spline.value(1.5).unwrap(), 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_clamped_extrapolation() {
        let spline = spline();

        assert_eq!(spline.value(-0.5).unwrap(), 0.0);
        assert_eq!(spline.value(2.5).unwrap(), 4.0);
        assert_eq!(spline.derivative(-0.5).unwrap(), 0.0);
        assert_eq!(spline.derivative(2.5).unwrap(), 0.0);
        assert_relative_eq!(spline.derivative(1.2).unwrap(), 2.0);
    }

    #[test]
    fn test_rejected_extrapolation() {
        let spline = spline().with_extrapolation(ExtrapolationPolicy::Reject);

        assert!(spline.value(-0.5).is_err());
        assert!(spline.derivative(2.5).is_err());
        assert!(spline.second_derivative(2.5).is_err());
        assert!(spline.value(2.0).is_ok());
    }

    #[test]
    fn test_lengths_must_match() {
        let mut spline = LinearSpline::new("mismatch");
        assert_eq!(
            spline.build(&[0.0, 1.0], &[0.0]).unwrap_err(),
            SplineError::dimension_mismatch(2, 1)
        );
    }

    #[test]
    fn test_unsorted_error() {
        let mut spline = LinearSpline::new("unsorted");
        assert!(spline.build(&[1.0, 0.0, 2.0], &[1.0, 0.0, 2.0]).is_err());
        assert_eq!(spline.state(), SplineState::Reserved);
    }

    #[test]
    fn test_single_point() {
        let mut spline = LinearSpline::new("single");
        spline.build(&[0.0], &[1.0]).unwrap();
        assert_eq!(
            spline.value(0.0).unwrap_err(),
            SplineError::insufficient_data(2, 1)
        );
    }

    #[test]
    fn test_coefficients_both_layouts() {
        let mut spline = LinearSpline::new("cfs");
        spline.build(&[0.0, 1.0, 3.0], &[1.0, 3.0, 2.0]).unwrap();

        let mut cfs = [0.0; 4];
        let mut nodes = [0.0; 2];
        let order = spline
            .coeffs(&mut cfs, &mut nodes, CoefficientLayout::SegmentMajor)
            .unwrap();
        assert_eq!(order, 2);
        assert_eq!(nodes, [0.0, 1.0]);
        assert_eq!(cfs, [1.0, 2.0, 3.0, -0.5]);

        spline
            .coeffs(&mut cfs, &mut nodes, CoefficientLayout::CoefficientMajor)
            .unwrap();
        assert_eq!(cfs, [1.0, 3.0, 2.0, -0.5]);
    }

    #[test]
    fn test_external_storage() {
        let mut bx = [0.0; 3];
        let mut by = [0.0; 3];
        {
            let mut spline = LinearSpline::new("external");
            spline.reserve_external(3, &mut bx, &mut by).unwrap();
            spline.push_back(0.0, 0.0).unwrap();
            spline.push_back(2.0, 4.0).unwrap();
            assert_relative_eq!(spline.value(0.5).unwrap(), 1.0);
            spline.clear();
        }
        assert_eq!(bx[..2], [0.0, 2.0]);
        assert_eq!(by[..2], [0.0, 4.0]);
    }

    #[test]
    fn test_write_segments_format() {
        let mut out = Vec::new();
        spline().write_segments(&mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text.lines().next().unwrap(),
            "segment N.   0 X:[ 0, 1 ] Y:[ 0, 2 ] slope: 2"
        );
        assert_eq!(text.lines().count(), 2);
    }
}
