//! Integration tests on the classic spline test data sets.
//!
//! Akima (1970) step data, the RPN 14 response curve, a titanium heat
//! capacity curve and a toolpath fragment. The sets are sampled densely
//! across and slightly beyond their node range, the way a plotting driver
//! would, and checked against the piecewise laws of each kind.

use approx::assert_relative_eq;
use splines_math::prelude::*;

struct DataSet {
    name: &'static str,
    xs: &'static [f64],
    ys: &'static [f64],
}

const DATA_SETS: &[DataSet] = &[
    DataSet {
        name: "akima0",
        xs: &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0],
        ys: &[10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.5, 15.0, 50.0, 60.0, 85.0],
    },
    DataSet {
        name: "akima1",
        xs: &[0.0, 1.0, 3.0, 4.0, 6.0, 7.0, 9.0, 10.0, 12.0, 13.0, 15.0],
        ys: &[10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.5, 15.0, 50.0, 60.0, 85.0],
    },
    DataSet {
        name: "akima2",
        xs: &[0.0, 2.0, 3.0, 5.0, 6.0, 8.0, 9.0, 11.0, 12.0, 14.0, 15.0],
        ys: &[10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.5, 15.0, 50.0, 60.0, 85.0],
    },
    DataSet {
        name: "rpn14",
        xs: &[7.99, 8.09, 8.19, 8.7, 9.2, 10.0, 12.0, 15.0, 20.0],
        ys: &[
            0.0, 2.76429e-5, 4.37498e-2, 0.169183, 0.469428, 0.943740, 0.998636, 0.999919,
            0.999994,
        ],
    },
    DataSet {
        name: "titanium",
        xs: &[
            595.0, 635.0, 695.0, 795.0, 855.0, 875.0, 895.0, 915.0, 935.0, 985.0, 1035.0, 1075.0,
        ],
        ys: &[
            0.644, 0.652, 0.644, 0.694, 0.907, 1.336, 2.169, 1.598, 0.916, 0.607, 0.603, 0.608,
        ],
    },
    DataSet {
        name: "toolpath",
        xs: &[0.11, 0.12, 0.15, 0.16],
        ys: &[0.0003, 0.0003, 0.0004, 0.0004],
    },
];

/// Query grid covering the node range plus 1% on each side.
fn sample_grid(xs: &[f64]) -> Vec<f64> {
    let xmin = xs[0];
    let xmax = xs[xs.len() - 1];
    let span = xmax - xmin;
    (0..=1020)
        .map(|i| xmin - 0.01 * span + f64::from(i) * span / 1000.0)
        .collect()
}

/// Value a step function must take at `x`.
fn expected_step(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    let n = xs.len();
    if x < xs[0] {
        return ys[0];
    }
    (0..n - 1)
        .rev()
        .find(|&i| xs[i] <= x)
        .map_or(ys[0], |i| ys[i])
}

#[test]
fn constant_spline_matches_step_function_on_all_sets() {
    let mut spline = ConstantSpline::new("reference");

    for set in DATA_SETS {
        spline.build(set.xs, set.ys).unwrap();
        assert_eq!(spline.num_points(), set.xs.len(), "{}", set.name);

        let grid = sample_grid(set.xs);
        let values = spline.values(&grid).unwrap();
        for (x, y) in grid.iter().zip(values) {
            assert_eq!(
                y,
                expected_step(set.xs, set.ys, *x),
                "{} at x = {}",
                set.name,
                x
            );
        }
    }
}

#[test]
fn linear_spline_stays_within_segment_bounds() {
    let mut spline = LinearSpline::new("reference");

    for set in DATA_SETS {
        spline.build(set.xs, set.ys).unwrap();

        let grid = sample_grid(set.xs);
        let mut cursor = SegmentCursor::new();
        for &x in &grid {
            let y = spline.value_with(x, &mut cursor).unwrap();
            let i = find_segment(set.xs, x);
            let lo = set.ys[i].min(set.ys[i + 1]);
            let hi = set.ys[i].max(set.ys[i + 1]);
            assert!(
                y >= lo - 1e-12 && y <= hi + 1e-12,
                "{} at x = {}: {} outside [{}, {}]",
                set.name,
                x,
                y,
                lo,
                hi
            );
        }

        for (x, y) in set.xs.iter().zip(set.ys) {
            assert_relative_eq!(spline.value(*x).unwrap(), *y, epsilon = 1e-12);
        }
    }
}

#[test]
fn rebuilding_one_instance_reuses_storage() {
    let mut spline = ConstantSpline::new("reuse");
    let largest = DATA_SETS.iter().map(|s| s.xs.len()).max().unwrap();

    spline.reserve(largest);
    assert!(spline.is_owned());
    for set in DATA_SETS {
        spline.build(set.xs, set.ys).unwrap();
        assert_eq!(spline.capacity(), set.xs.len());
        assert_eq!(spline.state(), SplineState::Built);
    }

    spline.clear();
    assert_eq!(spline.state(), SplineState::Empty);
    assert_eq!(spline.num_points(), 0);
    assert_eq!(spline.capacity(), 0);
    assert!(!spline.is_owned());
}

#[test]
fn external_buffers_survive_the_spline() {
    let set = &DATA_SETS[5];
    let mut buf_x = [0.0; 4];
    let mut buf_y = [0.0; 4];

    {
        let mut spline = ConstantSpline::new("toolpath");
        spline.reserve_external(4, &mut buf_x, &mut buf_y).unwrap();
        spline.build_packed(set.xs, set.ys, 4).unwrap();

        assert!(!spline.is_owned());
        assert_eq!(spline.value(0.13).unwrap(), 0.0003);
        assert_eq!(spline.value(0.155).unwrap(), 0.0004);

        spline.clear();
        assert!(!spline.is_owned());
    }

    assert_eq!(buf_x, [0.11, 0.12, 0.15, 0.16]);
    assert_eq!(buf_y[..3], [0.0003, 0.0003, 0.0004]);
}

#[test]
fn external_buffer_too_small_is_reported() {
    let mut buf_x = [0.0; 3];
    let mut buf_y = [0.0; 3];

    let mut spline = ConstantSpline::new("small");
    let err = spline
        .reserve_external(4, &mut buf_x, &mut buf_y)
        .unwrap_err();
    assert_eq!(
        err,
        SplineError::CapacityExceeded {
            required: 4,
            capacity: 3
        }
    );
    assert_eq!(spline.state(), SplineState::Empty);
}

#[test]
fn heterogeneous_collection_exports_uniformly() {
    let set = &DATA_SETS[4];
    let mut splines: Vec<Box<dyn Spline>> = [SplineKind::Constant, SplineKind::Linear]
        .iter()
        .map(|kind| kind.create(set.name))
        .collect();

    for spline in &mut splines {
        spline.build_packed(set.xs, set.ys, set.xs.len()).unwrap();
    }

    let nseg = set.xs.len() - 1;
    for spline in &splines {
        let table = CoefficientTable::from_spline(spline.as_ref()).unwrap();
        assert_eq!(table.num_segments(), nseg);
        assert_eq!(table.order, spline.order());
        assert_eq!(table.nodes, set.xs[..nseg]);

        for i in 0..nseg {
            assert_relative_eq!(table.segment(i)[0], set.ys[i]);
        }
    }
}

#[test]
fn diagnostics_dump_one_line_per_segment() {
    let set = &DATA_SETS[0];
    let mut spline = ConstantSpline::new("dump");
    spline.build(set.xs, set.ys).unwrap();

    let mut out = Vec::new();
    spline.write_segments(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[6], "segment N.   6 X:[ 6, 7 ] Y:10.5");
    assert_eq!(lines[9], "segment N.   9 X:[ 9, 10 ] Y:60");
}
