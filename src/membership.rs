use serde::Serialize;

use crate::error::{FuzzyError, Result};

/// Shape of a membership function. Parameters are checked when the shape is built,
/// so evaluating a `Shape` never fails.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    Triangular { a: f64, b: f64, c: f64 },
    Trapezoidal { a: f64, b: f64, c: f64, d: f64 },
    Gaussian { mean: f64, sigma: f64 },
}

impl Shape {
    pub fn triangular(a: f64, b: f64, c: f64) -> Result<Self> {
        check_breakpoints("triangular", &[a, b, c], "a <= b <= c")?;

        Ok(Shape::Triangular { a, b, c })
    }

    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        check_breakpoints("trapezoidal", &[a, b, c, d], "a <= b <= c <= d")?;

        Ok(Shape::Trapezoidal { a, b, c, d })
    }

    pub fn gaussian(mean: f64, sigma: f64) -> Result<Self> {
        check_breakpoints("gaussian", &[mean, sigma], "")?;

        if sigma <= 0. {
            return Err(FuzzyError::InvalidParameters {
                shape: "gaussian",
                reason: format!("sigma must be positive, got {sigma}"),
            });
        }

        Ok(Shape::Gaussian { mean, sigma })
    }

    /// Membership degree at a single point
    pub fn degree(&self, x: f64) -> f64 {
        match *self {
            Shape::Triangular { a, b, c } => tri(x, a, b, c),
            Shape::Trapezoidal { a, b, c, d } => {
                if x < a || x > d {
                    0.
                } else if x <= b {
                    tri(x, a, b, b)
                } else if x >= c {
                    tri(x, c, c, d)
                } else {
                    1.
                }
            },
            Shape::Gaussian { mean, sigma } => (-(x - mean).powi(2) / (2. * sigma.powi(2))).exp(),
        }
    }

    /// Samples the shape over every point of `universe`
    pub fn curve(&self, universe: &[f64]) -> Vec<f64> {
        universe.iter().map(|x| self.degree(*x)).collect()
    }
}

/// Similar to skfuzzy.trimf
pub fn trimf(universe: &[f64], a: f64, b: f64, c: f64) -> Result<Vec<f64>> {
    Ok(Shape::triangular(a, b, c)?.curve(universe))
}

/// Similar to skfuzzy.trapmf
pub fn trapmf(universe: &[f64], a: f64, b: f64, c: f64, d: f64) -> Result<Vec<f64>> {
    Ok(Shape::trapezoidal(a, b, c, d)?.curve(universe))
}

/// Similar to skfuzzy.gaussmf
pub fn gaussmf(universe: &[f64], mean: f64, sigma: f64) -> Result<Vec<f64>> {
    Ok(Shape::gaussian(mean, sigma)?.curve(universe))
}

// Rise on (a, b), fall on (b, c). Either side may be empty when breakpoints coincide.
fn tri(x: f64, a: f64, b: f64, c: f64) -> f64 {
    if x == b {
        1.
    } else if x <= a || x >= c {
        0.
    } else if x < b {
        (x - a) / (b - a)
    } else {
        (c - x) / (c - b)
    }
}

fn check_breakpoints(shape: &'static str, params: &[f64], ordering: &str) -> Result<()> {
    if params.iter().any(|p| !p.is_finite()) {
        return Err(FuzzyError::InvalidParameters {
            shape,
            reason: format!("parameters must be finite, got {params:?}"),
        });
    }
    if !ordering.is_empty() && params.windows(2).any(|w| w[0] > w[1]) {
        return Err(FuzzyError::InvalidParameters { shape, reason: format!("expected {ordering}, got {params:?}") });
    }

    Ok(())
}

#[cfg(test)]
fn quality() -> Vec<f64> {
    (0..=10).map(f64::from).collect()
}

#[test]
fn test_triangular() {
    let curve = trimf(&quality(), 2., 4., 8.).unwrap();

    assert_eq!(curve, vec![0., 0., 0., 0.5, 1., 0.75, 0.5, 0.25, 0., 0., 0.]);
}

#[test]
fn test_triangular_degenerate_sides() {
    // a == b: falling ramp only
    assert_eq!(trimf(&quality(), 0., 0., 4.).unwrap()[..6], [1., 0.75, 0.5, 0.25, 0., 0.]);
    // b == c: rising ramp only
    assert_eq!(trimf(&quality(), 6., 10., 10.).unwrap()[5..], [0., 0., 0.25, 0.5, 0.75, 1.]);
    // a == b == c: a spike
    assert_eq!(trimf(&quality(), 3., 3., 3.).unwrap(), [0., 0., 0., 1., 0., 0., 0., 0., 0., 0., 0.]);
}

#[test]
fn test_invalid_parameters() {
    assert!(matches!(
        Shape::triangular(0., 5., 3.),
        Err(FuzzyError::InvalidParameters { shape: "triangular", .. })
    ));
    assert!(matches!(
        Shape::trapezoidal(0., 4., 3., 6.),
        Err(FuzzyError::InvalidParameters { shape: "trapezoidal", .. })
    ));
    assert!(Shape::triangular(0., f64::NAN, 3.).is_err());
    assert!(Shape::gaussian(5., 0.).is_err());
    assert!(Shape::gaussian(5., -1.7).is_err());
    assert!(Shape::gaussian(f64::INFINITY, 1.).is_err());
}

#[test]
fn test_trapezoidal() {
    let rancid = trapmf(&quality(), 0., 0., 3., 6.).unwrap();
    let delicious = trapmf(&quality(), 4., 7., 10., 10.).unwrap();

    assert_eq!(rancid[..4], [1., 1., 1., 1.]);
    assert_eq!(rancid[6..], [0., 0., 0., 0., 0.]);
    assert_eq!(rancid[5], 1. / 3.);
    assert_eq!(delicious[..5], [0., 0., 0., 0., 0.]);
    assert_eq!(delicious[7..], [1., 1., 1., 1.]);
    assert_eq!(delicious[5], 1. / 3.);
}

#[test]
fn test_trapezoidal_outside_support_is_zero() {
    let shape = Shape::trapezoidal(2., 3., 5., 7.).unwrap();

    assert_eq!(shape.degree(1.999), 0.);
    assert_eq!(shape.degree(7.001), 0.);
    assert_eq!(shape.degree(2.), 0.);
    assert_eq!(shape.degree(7.), 0.);
    assert_eq!(shape.degree(4.), 1.);
}

#[test]
fn test_gaussian() {
    let good = gaussmf(&quality(), 5., 1.7).unwrap();

    assert_eq!(good[5], 1.);
    for i in 0..5 {
        assert_eq!(good[i], good[10 - i]);
        assert!(good[i] < good[i + 1]);
        assert!(good[i] > 0.);
    }
}
