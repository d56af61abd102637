//! # Splines Math
//!
//! Piecewise polynomial spline construction and evaluation.
//!
//! This crate provides:
//!
//! - **Node storage**: owned or caller-borrowed node arrays ([`storage`])
//! - **Interval search**: segment lookup with a caller-owned locality hint ([`search`])
//! - **Spline contract**: the [`Spline`](spline::Spline) trait shared by every kind
//! - **Spline kinds**: piecewise constant and piecewise linear splines
//! - **Coefficient export**: flat per-segment coefficients for plotting or storage ([`export`])
//!
//! ## Design Philosophy
//!
//! - **Checked preconditions**: querying an unbuilt spline or overrunning a
//!   borrowed buffer is an error, not undefined behaviour
//! - **Shareable evaluation**: queries take `&self`, so a built spline can be
//!   read from many threads at once
//! - **No hidden allocation**: export and evaluation write into caller buffers
//!
//! ## Example
//!
//! ```rust
//! use splines_math::prelude::*;
//!
//! let xs = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//! let ys = [10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.5, 15.0, 50.0, 60.0, 85.0];
//!
//! let mut spline = ConstantSpline::new("akima");
//! spline.build(&xs, &ys).unwrap();
//!
//! assert_eq!(spline.value(6.5).unwrap(), 10.5);
//! assert_eq!(spline.value(10.5).unwrap(), 60.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_code)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::uninlined_format_args)]

#[cfg(feature = "parallel")]
pub mod batch;
pub mod error;
pub mod export;
pub mod search;
pub mod spline;
pub mod storage;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{SplineError, SplineResult};
    pub use crate::export::{write_coefficients, CoefficientLayout, CoefficientTable};
    pub use crate::search::{find_segment, locate, SegmentCursor};
    pub use crate::spline::{
        ConstantSpline, ExtrapolationPolicy, LinearSpline, Spline, SplineKind, SplineState,
    };
    pub use crate::storage::NodeBuffer;
}

pub use error::{SplineError, SplineResult};
