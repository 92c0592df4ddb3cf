use std::fmt;
use std::iter::Sum;
use std::str::FromStr;

use num::Float;

use crate::error::{FuzzyError, Result};

/// And operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum AndOp {
    #[default]
    Min,
    Prod,
}

impl AndOp {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => ProductionLink::Min.apply(u, v),
            Self::Prod => ProductionLink::Prod.apply(u, v),
        }
    }
}

/// Or operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
}

impl OrOp {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => ProductionLink::Max.apply(u, v),
            Self::ProbOr => ProductionLink::ProbOr.apply(u, v),
        }
    }
}

/// Implication operator method: how a rule's firing strength shapes
/// the membership of its consequence.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ImplicationOp {
    /// Mamdani, min(strength, membership)
    #[default]
    Clip,
    /// Larsen, strength * membership
    Scale,
}

impl ImplicationOp {
    pub fn call<F: Float>(self, strength: F, consequence: &[F]) -> Vec<F> {
        consequence
            .iter()
            .map(|m| match self {
                Self::Clip => F::min(strength, *m),
                Self::Scale => strength * *m,
            })
            .collect()
    }
}

/// Method for aggregating the consequences of the fuzzy rules
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ProductionLink {
    Min,
    Prod,
    #[default]
    Max,
    ProbOr,
}

impl ProductionLink {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
        }
    }

    pub fn call<F: Float>(self, u: impl IntoIterator<Item = F>, v: impl IntoIterator<Item = F>) -> impl Iterator<Item = F> {
        u.into_iter().zip(v).map(move |(u, v)| self.apply(u, v))
    }
}

/// Method for defuzzifcating the resulting membership function.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum DefuzzificationOp {
    /// Weighted average of the universe by membership
    #[default]
    Centroid,
    /// Bisector of Area
    Bisector,
    /// Mean of the values for which the membership function is maximum
    Mom,
    /// Smallest value for which the membership function is maximum
    Som,
    /// Largest value for which the membership function is maximum
    Lom,
}

impl DefuzzificationOp {
    pub fn call<F: Float + Sum>(self, universe: &[F], membership: &[F]) -> Result<F> {
        if universe.is_empty() {
            return Err(FuzzyError::EmptyUniverse);
        }
        if universe.len() != membership.len() {
            return Err(FuzzyError::ShapeMismatch { expected: universe.len(), found: membership.len() });
        }

        let den = membership.iter().copied().sum::<F>();

        if den == F::zero() {
            return Err(FuzzyError::DegenerateAggregate);
        }

        let maximum = || membership.iter().copied().fold(F::zero(), F::max);
        let at_maximum = |maximum: F| {
            universe.iter().copied().zip(membership.iter().copied()).filter_map(move |(u, m)| (m == maximum).then_some(u))
        };

        let crisp = match self {
            Self::Centroid => {
                let num = universe.iter().zip(membership).map(|(u, m)| *u * *m).sum::<F>();

                num / den
            },
            Self::Bisector => bisector(universe, membership),
            Self::Mom => {
                let (len, sum) = at_maximum(maximum()).fold((0usize, F::zero()), |(n, accum), u| (n + 1, accum + u));

                sum / F::from(len).ok_or(FuzzyError::DegenerateAggregate)?
            },
            Self::Som => at_maximum(maximum()).reduce(F::min).ok_or(FuzzyError::DegenerateAggregate)?,
            Self::Lom => at_maximum(maximum()).reduce(F::max).ok_or(FuzzyError::DegenerateAggregate)?,
        };

        Ok(crisp)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Centroid => "centroid",
            Self::Bisector => "bisector",
            Self::Mom => "mom",
            Self::Som => "som",
            Self::Lom => "lom",
        }
    }
}

impl FromStr for DefuzzificationOp {
    type Err = FuzzyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "centroid" | "cog" => Ok(Self::Centroid),
            "bisector" | "boa" => Ok(Self::Bisector),
            "mom" => Ok(Self::Mom),
            "som" => Ok(Self::Som),
            "lom" => Ok(Self::Lom),
            _ => Err(FuzzyError::UnsupportedMethod(s.to_owned())),
        }
    }
}

impl fmt::Display for DefuzzificationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AndOp {
    type Err = FuzzyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "min" => Ok(Self::Min),
            "prod" => Ok(Self::Prod),
            _ => Err(FuzzyError::UnsupportedMethod(s.to_owned())),
        }
    }
}

impl FromStr for OrOp {
    type Err = FuzzyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "max" => Ok(Self::Max),
            "probor" | "prob_or" => Ok(Self::ProbOr),
            _ => Err(FuzzyError::UnsupportedMethod(s.to_owned())),
        }
    }
}

impl FromStr for ImplicationOp {
    type Err = FuzzyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "clip" | "min" => Ok(Self::Clip),
            "scale" | "prod" => Ok(Self::Scale),
            _ => Err(FuzzyError::UnsupportedMethod(s.to_owned())),
        }
    }
}

// Point splitting the trapezoid-rule area in half. Inside the crossing segment the area
// from its left end grows as y0 * t + slope * t^2 / 2, solved here for t.
fn bisector<F: Float + Sum>(universe: &[F], membership: &[F]) -> F {
    let two = F::one() + F::one();
    let areas: Vec<F> =
        universe.windows(2).zip(membership.windows(2)).map(|(u, m)| (m[0] + m[1]) * (u[1] - u[0]) / two).collect();
    let target = areas.iter().copied().sum::<F>() / two;
    let mut cum_area = F::zero();

    for (i, area) in areas.iter().enumerate() {
        if cum_area + *area >= target {
            let (x0, width) = (universe[i], universe[i + 1] - universe[i]);
            let (y0, y1) = (membership[i], membership[i + 1]);
            let rest = target - cum_area;

            if rest <= F::zero() {
                return x0;
            }

            let slope = (y1 - y0) / width;
            let discriminant = F::max(y0 * y0 + two * slope * rest, F::zero());
            let t = two * rest / (y0 + discriminant.sqrt());

            return x0 + F::min(t, width);
        }

        cum_area = cum_area + *area;
    }

    universe[universe.len() - 1]
}

#[cfg(test)]
fn universe(n: u8) -> Vec<f64> {
    (0..n).map(f64::from).collect()
}

#[test]
fn test_pointwise_ops() {
    let u = [0.2, 0.8, 0.5];
    let v = [0.6, 0.4, 0.5];

    assert_eq!(AndOp::Min.apply(0.2, 0.6), 0.2);
    assert_eq!(OrOp::Max.apply(0.2, 0.6), 0.6);
    assert_eq!(ProductionLink::Max.call(u, v).collect::<Vec<_>>(), vec![0.6, 0.8, 0.5]);
    assert_eq!(AndOp::Prod.apply(0.5, 0.5), 0.25);
    assert_eq!(OrOp::ProbOr.apply(0.5, 0.5), 0.75);
}

#[test]
fn test_implication() {
    let consequence = [0., 0.5, 1., 0.5, 0.];

    assert_eq!(ImplicationOp::Clip.call(0.6, &consequence), vec![0., 0.5, 0.6, 0.5, 0.]);
    assert_eq!(ImplicationOp::Scale.call(0.5, &consequence), vec![0., 0.25, 0.5, 0.25, 0.]);
    assert_eq!(ImplicationOp::Clip.call(0., &consequence), vec![0.; 5]);
}

#[test]
fn test_centroid_of_symmetric_curve() {
    let universe = universe(11);
    let membership = [0., 0., 0., 1. / 3., 2. / 3., 1., 2. / 3., 1. / 3., 0., 0., 0.];
    let crisp = DefuzzificationOp::Centroid.call(&universe, &membership).unwrap();

    assert!((crisp - 5.).abs() < 1e-12, "{crisp}");
}

#[test]
fn test_centroid_weights() {
    let crisp = DefuzzificationOp::Centroid.call(&[0., 10.], &[0.25, 0.75]).unwrap();

    assert_eq!(crisp, 7.5);
}

#[test]
fn test_bisector() {
    let universe = universe(11);
    let membership = [0., 0.2, 0.4, 0.6, 0.8, 1., 0.8, 0.6, 0.4, 0.2, 0.];
    let crisp = DefuzzificationOp::Bisector.call(&universe, &membership).unwrap();

    assert!((crisp - 5.).abs() < 1e-9, "{crisp}");
    assert_eq!(DefuzzificationOp::Bisector.call(&[4.], &[0.5]), Ok(4.));
}

#[test]
fn test_bisector_of_asymmetric_curves() {
    // Area left of x on a unit ramp is x^2 / 2
    let crisp = DefuzzificationOp::Bisector.call(&[0., 1.], &[0., 1.]).unwrap();
    assert!((crisp - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-12, "{crisp}");

    // Falling ramp: the half-area point is 1 - sqrt(0.5)
    let crisp = DefuzzificationOp::Bisector.call(&[0., 1.], &[1., 0.]).unwrap();
    assert!((crisp - (1. - std::f64::consts::FRAC_1_SQRT_2)).abs() < 1e-12, "{crisp}");

    // Crossing inside a flat segment
    let crisp = DefuzzificationOp::Bisector.call(&[0., 1., 2.], &[1., 1., 0.]).unwrap();
    assert!((crisp - 0.75).abs() < 1e-12, "{crisp}");

    let universe = universe(11);
    let membership = [0., 1., 1., 0.8, 0.6, 0.4, 0.2, 0., 0., 0., 0.];
    let crisp = DefuzzificationOp::Bisector.call(&universe, &membership).unwrap();
    let total = area_left_of(&universe, &membership, 10.);

    assert!((area_left_of(&universe, &membership, crisp) - total / 2.).abs() < 1e-9, "{crisp}");
}

#[cfg(test)]
fn area_left_of(universe: &[f64], membership: &[f64], x: f64) -> f64 {
    universe
        .windows(2)
        .zip(membership.windows(2))
        .filter(|(u, _)| u[0] < x)
        .map(|(u, m)| {
            let hi = u[1].min(x);
            let m_hi = m[0] + (m[1] - m[0]) * (hi - u[0]) / (u[1] - u[0]);
            (m[0] + m_hi) * (hi - u[0]) / 2.
        })
        .sum()
}

#[test]
fn test_maximum_methods() {
    let universe = universe(6);
    let membership = [0., 0.5, 1., 1., 0.5, 0.];

    assert_eq!(DefuzzificationOp::Mom.call(&universe, &membership), Ok(2.5));
    assert_eq!(DefuzzificationOp::Som.call(&universe, &membership), Ok(2.));
    assert_eq!(DefuzzificationOp::Lom.call(&universe, &membership), Ok(3.));
}

#[test]
fn test_degenerate_aggregate() {
    let universe = universe(4);

    for op in [
        DefuzzificationOp::Centroid,
        DefuzzificationOp::Bisector,
        DefuzzificationOp::Mom,
        DefuzzificationOp::Som,
        DefuzzificationOp::Lom,
    ] {
        assert_eq!(op.call(&universe, &[0.; 4]), Err(FuzzyError::DegenerateAggregate));
    }

    assert_eq!(
        DefuzzificationOp::Centroid.call(&universe, &[1.; 3]),
        Err(FuzzyError::ShapeMismatch { expected: 4, found: 3 })
    );
    assert_eq!(DefuzzificationOp::Centroid.call::<f64>(&[], &[]), Err(FuzzyError::EmptyUniverse));
}

#[test]
fn test_parse_methods() {
    assert_eq!("centroid".parse::<DefuzzificationOp>(), Ok(DefuzzificationOp::Centroid));
    assert_eq!("MOM".parse::<DefuzzificationOp>(), Ok(DefuzzificationOp::Mom));
    assert_eq!("bisector".parse::<DefuzzificationOp>(), Ok(DefuzzificationOp::Bisector));
    assert_eq!(
        "median".parse::<DefuzzificationOp>(),
        Err(FuzzyError::UnsupportedMethod("median".into()))
    );
    assert_eq!("prod".parse::<AndOp>(), Ok(AndOp::Prod));
    assert_eq!("probor".parse::<OrOp>(), Ok(OrOp::ProbOr));
    assert_eq!("clip".parse::<ImplicationOp>(), Ok(ImplicationOp::Clip));
    assert!("xor".parse::<OrOp>().is_err());
}
