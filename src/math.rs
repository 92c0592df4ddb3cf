use num::Float;

use crate::error::{FuzzyError, Result};

/// Similar to numpy.interp: piecewise linear between the points of `xp`, which must be
/// increasing, and flat beyond either end. Grid points map exactly onto their `fp` value.
pub(crate) fn interp<F: Float>(x: F, xp: &[F], fp: &[F]) -> F {
    debug_assert_eq!(xp.len(), fp.len());
    debug_assert!(!xp.is_empty());

    // Index of the first point not below x
    let i = xp.partition_point(|p| *p < x);

    // Base cases
    if i == 0 {
        return fp[0];
    }
    if i == xp.len() {
        return fp[fp.len() - 1];
    }
    if xp[i] == x {
        return fp[i];
    }

    let (x1, y1) = (xp[i - 1], fp[i - 1]);
    let (x2, y2) = (xp[i], fp[i]);

    y1 + (x - x1) * (y2 - y1) / (x2 - x1)
}

/// Membership degree of `value` on a curve sampled over `universe`.
///
/// Values at or past either end of the universe take the boundary degree.
pub fn interp_membership(universe: &[f64], membership: &[f64], value: f64) -> Result<f64> {
    if universe.is_empty() {
        return Err(FuzzyError::EmptyUniverse);
    }
    if universe.len() != membership.len() {
        return Err(FuzzyError::ShapeMismatch { expected: universe.len(), found: membership.len() });
    }
    if value.is_nan() {
        return Err(FuzzyError::NonFiniteInput(value));
    }

    Ok(interp(value, universe, membership))
}

#[test]
fn test_interp() {
    let x = [0., 1., 1.5, 2.72, 3.24];
    let xs = [1., 2., 3.];
    let ys = [3., 2., 0.];

    assert_eq!(x.map(|x| interp(x, &xs, &ys)), [3., 3., 2.5, 0.5599999999999996, 0.]);

    let x = [2.5, -1., 7.5];
    let xs = [0., 1., 2., 3., 4.5];
    let ys = [0., 2., 5., 3., 2.];

    assert_eq!(x.map(|x| interp(x, &xs, &ys)), [4., 0., 2.]);
}

#[test]
fn test_interp_exact_at_nodes() {
    let xs = [0., 1., 2., 3.];
    let ys = [0.1, 0.7, 0.30000000000000004, 0.9];

    for (x, y) in xs.iter().zip(ys.iter()) {
        assert_eq!(interp(*x, &xs, &ys), *y);
    }
}

#[test]
fn test_interp_membership_errors() {
    assert_eq!(interp_membership(&[], &[], 1.), Err(FuzzyError::EmptyUniverse));
    assert_eq!(
        interp_membership(&[0., 1.], &[1.], 0.5),
        Err(FuzzyError::ShapeMismatch { expected: 2, found: 1 })
    );
    assert!(matches!(interp_membership(&[0., 1.], &[0., 1.], f64::NAN), Err(FuzzyError::NonFiniteInput(_))));
    assert_eq!(interp_membership(&[0., 1.], &[0., 1.], f64::INFINITY), Ok(1.));
}
