pub use fixed_map::key::Key;
pub use fixed_map::Key;
use fixed_map::Map as FixedMap;

use crate::membership::Shape;

/// A linguistic term sampled over its variable's universe
#[derive(Clone, Debug, PartialEq)]
pub struct Membership {
    shape: Shape,
    values: Vec<f64>,
}

impl Membership {
    pub(crate) fn new(shape: Shape, universe: &[f64]) -> Self {
        Self { shape, values: shape.curve(universe) }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Shapes keyed by term, before they are sampled onto a universe
pub struct Terms<K: Key>(pub(crate) FixedMap<K, Shape>);

impl<K: Key> Default for Terms<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key> Terms<K> {
    pub fn new() -> Self {
        Self(FixedMap::new())
    }

    pub fn insert(&mut self, key: K, shape: Shape) {
        self.0.insert(key, shape);
    }

    pub fn with(mut self, key: K, shape: Shape) -> Self {
        self.insert(key, shape);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
