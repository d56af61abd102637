//! Coefficient export.
//!
//! Flattens a built spline into plain node and coefficient arrays for
//! serialization or plotting. Segment `i` is described by the abscissa
//! `X[i]` and `order` power-basis coefficients `c[0..order]`:
//!
//! ```text
//! p_i(x) = c[0] + c[1] (x - X[i]) + ... + c[order-1] (x - X[i])^(order-1)
//! ```
//!
//! [`write_coefficients`] writes into caller buffers and never allocates;
//! [`CoefficientTable`] is an owned, serde-ready snapshot.

use serde::{Deserialize, Serialize};

use crate::error::{SplineError, SplineResult};
use crate::spline::{Spline, SplineKind, SplineState, MAX_ORDER};

/// Arrangement of coefficients in the flat output buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CoefficientLayout {
    /// `cfs[i * order + k]`: all coefficients of a segment are adjacent.
    #[default]
    SegmentMajor,
    /// `cfs[k * nseg + i]`: one run per power.
    CoefficientMajor,
}

/// Writes the node abscissa and coefficients of every segment.
///
/// Writes `nseg = max(num_points - 1, 0)` entries into `nodes` and
/// `nseg * order` into `cfs`; returns the spline's order.
///
/// # Errors
///
/// - [`SplineError::InvalidState`] if the spline is not built.
/// - [`SplineError::CapacityExceeded`] if either buffer is too small.
pub fn write_coefficients<S: Spline + ?Sized>(
    spline: &S,
    cfs: &mut [f64],
    nodes: &mut [f64],
    layout: CoefficientLayout,
) -> SplineResult<usize> {
    if spline.state() != SplineState::Built {
        return Err(SplineError::invalid_state("export", spline.state()));
    }

    let order = spline.order();
    if order == 0 || order > MAX_ORDER {
        return Err(SplineError::invalid_input(format!(
            "order {order} outside 1..={MAX_ORDER}"
        )));
    }

    let xs = spline.x_nodes();
    let nseg = xs.len().saturating_sub(1);
    if nodes.len() < nseg {
        return Err(SplineError::capacity_exceeded(nseg, nodes.len()));
    }
    if cfs.len() < nseg * order {
        return Err(SplineError::capacity_exceeded(nseg * order, cfs.len()));
    }

    let mut scratch = [0.0; MAX_ORDER];
    let segment = &mut scratch[..order];
    for i in 0..nseg {
        nodes[i] = xs[i];
        spline.segment_coefficients(i, segment)?;
        match layout {
            CoefficientLayout::SegmentMajor => {
                cfs[i * order..(i + 1) * order].copy_from_slice(segment);
            }
            CoefficientLayout::CoefficientMajor => {
                for (k, &c) in segment.iter().enumerate() {
                    cfs[k * nseg + i] = c;
                }
            }
        }
    }

    Ok(order)
}

/// Owned export of a spline's segments.
///
/// # Example
///
/// ```rust
/// use splines_math::export::CoefficientTable;
/// use splines_math::spline::{ConstantSpline, Spline};
///
/// let mut spline = ConstantSpline::new("steps");
/// spline.build(&[0.0, 1.0, 2.0], &[3.0, 4.0]).unwrap();
///
/// let table = CoefficientTable::from_spline(&spline).unwrap();
/// assert_eq!(table.num_segments(), 2);
/// assert_eq!(table.segment(1), &[4.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientTable {
    /// Kind of the exported spline.
    pub kind: SplineKind,
    /// Coefficients per segment.
    pub order: usize,
    /// Left abscissa of each segment.
    pub nodes: Vec<f64>,
    /// Segment-major coefficients, `order` per segment.
    pub coefficients: Vec<f64>,
}

impl CoefficientTable {
    /// Exports a built spline.
    ///
    /// # Errors
    ///
    /// See [`write_coefficients`].
    pub fn from_spline<S: Spline + ?Sized>(spline: &S) -> SplineResult<Self> {
        let order = spline.order();
        let nseg = spline.num_points().saturating_sub(1);
        let mut nodes = vec![0.0; nseg];
        let mut coefficients = vec![0.0; nseg * order];

        write_coefficients(
            spline,
            &mut coefficients,
            &mut nodes,
            CoefficientLayout::SegmentMajor,
        )?;

        Ok(Self {
            kind: spline.kind(),
            order,
            nodes,
            coefficients,
        })
    }

    /// Number of exported segments.
    #[must_use]
    pub fn num_segments(&self) -> usize {
        self.nodes.len()
    }

    /// Coefficients of segment `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= num_segments()`.
    #[must_use]
    pub fn segment(&self, i: usize) -> &[f64] {
        &self.coefficients[i * self.order..(i + 1) * self.order]
    }

    /// Evaluates segment `i`'s polynomial at `x` (Horner).
    #[must_use]
    pub fn eval_segment(&self, i: usize, x: f64) -> f64 {
        let dx = x - self.nodes[i];
        self.segment(i).iter().rev().fold(0.0, |acc, &c| acc * dx + c)
    }
}
