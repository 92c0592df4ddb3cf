use std::fmt;
use std::ops::RangeInclusive;

use fixed_map::Map as FixedMap;
use tracing::warn;

use crate::error::{FuzzyError, Result};
use crate::linspace::Linspace;
use crate::math::interp;
use crate::terms::{Key, Membership, Terms};

/// Evenly spaced, strictly increasing points of a universe of discourse
#[derive(Clone, Debug, PartialEq)]
pub struct Universe {
    points: Vec<f64>,
}

impl Universe {
    pub fn new(range: RangeInclusive<f64>, step: f64) -> Result<Self> {
        let (min, max) = (*range.start(), *range.end());

        if !(min.is_finite() && max.is_finite() && step.is_finite()) || step <= 0. || max < min {
            return Err(FuzzyError::InvalidDomain { min, max, step });
        }

        Ok(Self { points: Linspace::with_step(min, max, step).collect() })
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    // Never true; a universe keeps at least its lower bound
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn min(&self) -> f64 {
        self.points[0]
    }

    pub fn max(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    pub fn midpoint(&self) -> f64 {
        (self.min() + self.max()) / 2.
    }

    pub fn contains(&self, x: f64) -> bool {
        (self.min()..=self.max()).contains(&x)
    }
}

/// A linguistic variable: a universe and the terms sampled over it
pub struct Variable<K: Key> {
    name: &'static str,
    universe: Universe,
    terms: FixedMap<K, Membership>,
}

impl<K: Key + fmt::Debug> Variable<K> {
    pub fn new(name: &'static str, universe: Universe, terms: Terms<K>) -> Self {
        let mut memberships = FixedMap::new();

        for (term, shape) in terms.0.iter() {
            memberships.insert(term, Membership::new(*shape, universe.points()));
        }

        Self { name, universe, terms: memberships }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn terms(&self) -> impl Iterator<Item = (K, &Membership)> + '_ {
        self.terms.iter()
    }

    pub fn membership(&self, term: K) -> Result<&Membership> {
        self.terms.get(term).ok_or_else(|| FuzzyError::MissingTerm(format!("{}.{term:?}", self.name)))
    }

    /// Degree of `x` in `term`, clamping `x` onto the universe first
    pub fn degree(&self, term: K, x: f64) -> Result<f64> {
        let x = self.clamp(x)?;
        let membership = self.membership(term)?;

        Ok(interp(x, self.universe.points(), membership.values()))
    }

    /// Degrees of `x` in every term of the variable
    pub fn fuzzify(&self, x: f64) -> Result<Degrees<K>> {
        let x = self.clamp(x)?;
        let mut degrees = FixedMap::new();

        for (term, membership) in self.terms.iter() {
            degrees.insert(term, interp(x, self.universe.points(), membership.values()));
        }

        Ok(Degrees(degrees))
    }

    fn clamp(&self, x: f64) -> Result<f64> {
        if !x.is_finite() {
            return Err(FuzzyError::NonFiniteInput(x));
        }

        if !self.universe.contains(x) {
            let clamped = x.clamp(self.universe.min(), self.universe.max());
            warn!(variable = self.name, input = x, clamped, "input outside of universe, clamping");

            return Ok(clamped);
        }

        Ok(x)
    }
}

/// Fuzzified degrees of one crisp input
pub struct Degrees<K: Key>(FixedMap<K, f64>);

impl<K: Key> Degrees<K> {
    /// Zero for terms the variable does not define
    pub fn get(&self, term: K) -> f64 {
        self.0.get(term).copied().unwrap_or(0.)
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, f64)> + '_ {
        self.0.iter().map(|(term, degree)| (term, *degree))
    }
}
