//! The spline family contract and its implementations.
//!
//! Every spline kind implements [`Spline`]: it owns a
//! [`NodeBuffer`](crate::storage::NodeBuffer), fills it through one of the
//! build methods, and answers value/derivative queries by locating the
//! segment of a query point and evaluating that segment's polynomial.
//!
//! # Available Kinds
//!
//! | Kind | Order | Continuity | Extra samples |
//! |------|-------|------------|---------------|
//! | [`ConstantSpline`] | 1 | step function | last `y` sample unused |
//! | [`LinearSpline`] | 2 | C0 | none |
//!
//! Higher-order kinds (cubic, Akima, Bessel, PCHIP, quintic) plug into the
//! same trait with their own coefficient derivation.
//!
//! # Lifecycle
//!
//! ```text
//! Empty --reserve--> Reserved --build--> Built --clear--> Empty
//!                        ^                 |
//!                        +----reserve------+
//! ```
//!
//! Queries on a spline that is not [`SplineState::Built`] return
//! [`SplineError::InvalidState`].

mod constant;
mod linear;

pub use constant::ConstantSpline;
pub use linear::LinearSpline;

use std::fmt;
use std::io;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{SplineError, SplineResult};
use crate::export::{self, CoefficientLayout};
use crate::search::SegmentCursor;

/// Highest order a spline kind may report (quintic).
pub const MAX_ORDER: usize = 6;

/// Construction state of a spline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SplineState {
    /// No storage.
    #[default]
    Empty,
    /// Storage reserved, nodes not built.
    Reserved,
    /// Nodes populated and validated.
    Built,
}

impl fmt::Display for SplineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Empty => "Empty",
            Self::Reserved => "Reserved",
            Self::Built => "Built",
        };
        write!(f, "{name}")
    }
}

/// Behaviour for queries outside `[X[0], X[n-1]]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExtrapolationPolicy {
    /// Boundary value, zero derivatives.
    #[default]
    Clamp,
    /// Return [`SplineError::ExtrapolationNotAllowed`].
    Reject,
}

/// Spline kinds available in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SplineKind {
    /// Piecewise constant (step function).
    #[default]
    Constant,
    /// Piecewise linear.
    Linear,
}

impl SplineKind {
    /// Polynomial degree + 1.
    #[must_use]
    pub fn order(&self) -> usize {
        match self {
            Self::Constant => 1,
            Self::Linear => 2,
        }
    }

    /// Short lowercase identifier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Constant => "constant",
            Self::Linear => "linear",
        }
    }

    /// Creates an empty spline of this kind.
    #[must_use]
    pub fn create(&self, name: impl Into<String>) -> Box<dyn Spline> {
        match self {
            Self::Constant => Box::new(ConstantSpline::new(name)),
            Self::Linear => Box::new(LinearSpline::new(name)),
        }
    }
}

impl fmt::Display for SplineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Constant => "Constant",
            Self::Linear => "Linear",
        };
        write!(f, "{name}")
    }
}

impl FromStr for SplineKind {
    type Err = SplineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "constant" => Ok(Self::Constant),
            "linear" => Ok(Self::Linear),
            other => Err(SplineError::invalid_input(format!(
                "unknown spline kind '{other}'"
            ))),
        }
    }
}

/// Shared contract of every spline kind.
///
/// Construction takes `&mut self`; evaluation takes `&self` plus an
/// optional [`SegmentCursor`], so a built spline can be queried from several
/// threads at once.
pub trait Spline: Send + Sync {
    /// Diagnostic label.
    fn name(&self) -> &str;

    /// Kind of this spline.
    fn kind(&self) -> SplineKind;

    /// Polynomial degree + 1 of each segment.
    fn order(&self) -> usize {
        self.kind().order()
    }

    /// Current construction state.
    fn state(&self) -> SplineState;

    /// Number of populated nodes.
    fn num_points(&self) -> usize;

    /// Number of nodes the current storage can hold.
    fn capacity(&self) -> usize;

    /// Returns true if the spline allocated its node storage itself.
    fn is_owned(&self) -> bool;

    /// Populated node abscissas.
    fn x_nodes(&self) -> &[f64];

    /// Extrapolation policy in effect.
    fn extrapolation(&self) -> ExtrapolationPolicy;

    /// Changes the extrapolation policy.
    fn set_extrapolation(&mut self, policy: ExtrapolationPolicy);

    /// Ensures room for `n` nodes and starts a new curve.
    ///
    /// External buffers attached with `reserve_external` are kept while `n`
    /// fits in them. A larger `n` detaches them and switches to owned
    /// storage; check [`Spline::is_owned`] afterwards when the nodes must
    /// land in caller memory.
    fn reserve(&mut self, n: usize);

    /// Releases owned storage and returns to [`SplineState::Empty`].
    fn clear(&mut self);

    /// Builds from strided arrays: node `i` is `(x[i * incx], y[i * incy])`.
    fn build_strided(
        &mut self,
        x: &[f64],
        incx: usize,
        y: &[f64],
        incy: usize,
        n: usize,
    ) -> SplineResult<()>;

    /// Builds from the first `n` entries of packed arrays.
    fn build_packed(&mut self, x: &[f64], y: &[f64], n: usize) -> SplineResult<()> {
        self.build_strided(x, 1, y, 1, n)
    }

    /// Builds from whole sequences, deriving the node count from their
    /// lengths according to the kind's length policy.
    fn build(&mut self, xs: &[f64], ys: &[f64]) -> SplineResult<()>;

    /// Value at `x`, using and updating `cursor`.
    fn value_with(&self, x: f64, cursor: &mut SegmentCursor) -> SplineResult<f64>;

    /// First derivative at `x`, using and updating `cursor`.
    fn derivative_with(&self, x: f64, cursor: &mut SegmentCursor) -> SplineResult<f64>;

    /// Second derivative at `x`, using and updating `cursor`.
    fn second_derivative_with(&self, x: f64, cursor: &mut SegmentCursor) -> SplineResult<f64>;

    /// Value at `x`.
    fn value(&self, x: f64) -> SplineResult<f64> {
        self.value_with(x, &mut SegmentCursor::new())
    }

    /// First derivative at `x`.
    fn derivative(&self, x: f64) -> SplineResult<f64> {
        self.derivative_with(x, &mut SegmentCursor::new())
    }

    /// Second derivative at `x`.
    fn second_derivative(&self, x: f64) -> SplineResult<f64> {
        self.second_derivative_with(x, &mut SegmentCursor::new())
    }

    /// Values at every point of `xs`, sharing one cursor.
    fn values(&self, xs: &[f64]) -> SplineResult<Vec<f64>> {
        let mut cursor = SegmentCursor::new();
        xs.iter().map(|&x| self.value_with(x, &mut cursor)).collect()
    }

    /// First node abscissa.
    fn x_min(&self) -> SplineResult<f64> {
        self.x_nodes()
            .first()
            .copied()
            .ok_or_else(|| SplineError::insufficient_data(1, 0))
    }

    /// Last node abscissa.
    fn x_max(&self) -> SplineResult<f64> {
        self.x_nodes()
            .last()
            .copied()
            .ok_or_else(|| SplineError::insufficient_data(1, 0))
    }

    /// Writes the `order()` power-basis coefficients of `segment`, in
    /// ascending powers of `(x - X[segment])`, into `out`.
    fn segment_coefficients(&self, segment: usize, out: &mut [f64]) -> SplineResult<()>;

    /// Exports nodes and coefficients of every segment; returns the order.
    ///
    /// See [`export::write_coefficients`].
    fn coeffs(
        &self,
        cfs: &mut [f64],
        nodes: &mut [f64],
        layout: CoefficientLayout,
    ) -> SplineResult<usize> {
        export::write_coefficients(self, cfs, nodes, layout)
    }

    /// Writes one human-readable line per segment.
    fn write_segments(&self, out: &mut dyn io::Write) -> io::Result<()>;
}

/// Where a query falls relative to the node range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    Below,
    Inside,
    Above,
}

/// Checks that a spline can answer queries and returns its node abscissas.
pub(crate) fn queryable<'s>(
    state: SplineState,
    xs: &'s [f64],
    operation: &'static str,
) -> SplineResult<&'s [f64]> {
    if state != SplineState::Built {
        return Err(SplineError::invalid_state(operation, state));
    }
    if xs.len() < 2 {
        return Err(SplineError::insufficient_data(2, xs.len()));
    }
    Ok(xs)
}

/// Classifies `x` against `xs` (at least two nodes), honouring `policy`.
///
/// A NaN query lies nowhere on the axis and is rejected under either policy.
pub(crate) fn place(xs: &[f64], x: f64, policy: ExtrapolationPolicy) -> SplineResult<Placement> {
    if x.is_nan() {
        return Err(SplineError::invalid_input("query point is NaN"));
    }
    let min = xs[0];
    let max = xs[xs.len() - 1];

    let placement = if x < min {
        Placement::Below
    } else if x > max {
        Placement::Above
    } else {
        Placement::Inside
    };

    if placement != Placement::Inside && policy == ExtrapolationPolicy::Reject {
        return Err(SplineError::ExtrapolationNotAllowed { x, min, max });
    }
    Ok(placement)
}

/// Rejects NaN abscissas and decreasing pairs. Duplicates are accepted.
pub(crate) fn validate_nodes(xs: &[f64]) -> SplineResult<()> {
    if let Some(i) = xs.iter().position(|x| x.is_nan()) {
        return Err(SplineError::invalid_input(format!(
            "node abscissa {i} is NaN"
        )));
    }
    if let Some(i) = xs.windows(2).position(|w| w[1] < w[0]) {
        return Err(SplineError::invalid_input(format!(
            "x values must be non-decreasing: X[{}] = {} > X[{}] = {}",
            i,
            xs[i],
            i + 1,
            xs[i + 1]
        )));
    }
    Ok(())
}

/// Checks that `len` values hold `count` entries at stride `inc`.
pub(crate) fn check_stride(field: &str, len: usize, inc: usize, count: usize) -> SplineResult<()> {
    if inc == 0 {
        return Err(SplineError::invalid_input(format!(
            "stride of `{field}` must be positive"
        )));
    }
    let required = match count {
        0 => Some(0),
        _ => (count - 1)
            .checked_mul(inc)
            .and_then(|span| span.checked_add(1)),
    };
    let Some(required) = required else {
        return Err(SplineError::invalid_input(format!(
            "{count} samples of `{field}` at stride {inc} overflow the address space"
        )));
    };
    if len < required {
        return Err(SplineError::invalid_input(format!(
            "`{field}` holds {len} values, {count} samples at stride {inc} need {required}"
        )));
    }
    Ok(())
}
