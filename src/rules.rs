use crate::dsl::Expr;

pub struct Rules<T, K>(pub(crate) Vec<Rule<T, K>>);

impl<T, K> Default for Rules<T, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K> Rules<T, K> {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    pub fn add(&mut self, premise: Expr<T>, consequence: K) {
        self.0.push(Rule { premise, consequence });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule<T, K>> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// IF `premise` THEN output is `consequence`
pub struct Rule<T, K> {
    pub(crate) premise: Expr<T>,
    pub(crate) consequence: K,
}

impl<T, K: Copy> Rule<T, K> {
    pub fn premise(&self) -> &Expr<T> {
        &self.premise
    }

    pub fn consequence(&self) -> K {
        self.consequence
    }
}
